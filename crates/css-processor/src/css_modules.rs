//! The default CSS Modules processor.

use crate::processor::{ProcessError, ProcessOptions, ProcessedCss, Processor};
use css_parser::{class_selectors, parse, CssExports};
use source_map::{compose, ByteOffset, LineIndex, RawSourceMap, Token, TokenSource};

/// Scopes local class selectors and emits the ICSS `:export` block.
///
/// Every `.name` in the input becomes `.name_<hash>` where the hash is
/// derived from the file path, so two modules can declare the same class
/// without colliding. The rewrite never adds or removes lines, which keeps
/// the emitted source map line-exact.
#[derive(Debug, Default)]
pub struct CssModulesProcessor {}

impl CssModulesProcessor {
    /// Creates a new processor instance.
    ///
    /// Build one per host and reuse it across extractions.
    pub fn new() -> Self {
        Self::default()
    }
}

struct Edit {
    /// Byte offset of the class name (without the dot) in the input.
    offset: usize,
    /// Length of the original name.
    len: usize,
    replacement: String,
}

impl Processor for CssModulesProcessor {
    fn process(&self, css: &str, options: ProcessOptions<'_>) -> Result<ProcessedCss, ProcessError> {
        let parsed = parse(css);
        let hash = path_hash(options.from.as_str());

        let mut exports = CssExports::new();
        let mut edits: Vec<Edit> = Vec::new();

        for rule in parsed.stylesheet.style_rules() {
            for class in class_selectors(&rule.selector) {
                let scoped = format!("{}_{}", class.name, hash);
                exports.entry(class.name.clone()).or_insert(scoped.clone());

                edits.push(Edit {
                    offset: usize::from(rule.selector_span.start) + class.offset,
                    len: class.name.len(),
                    replacement: scoped,
                });
            }
        }
        edits.sort_by_key(|e| e.offset);

        let (mut output, tokens) = apply_edits(css, &edits);
        append_export_block(&mut output, &exports);

        let mut own_map = RawSourceMap::new(vec![options.from.to_string()]);
        own_map.sources_content = Some(vec![Some(css.to_string())]);
        own_map.set_tokens(tokens);

        let map = match options.prev_map {
            Some(prev) => compose(prev, &own_map)?,
            None => own_map,
        };

        let root = parse(&output).stylesheet;
        Ok(ProcessedCss {
            root: Some(root),
            css: output,
            map: Some(map),
        })
    }
}

/// Applies the rewrites and builds mapping tokens.
///
/// Edits never contain newlines, so output line N is input line N; one
/// token anchors each line start and one tracks every rewritten name's
/// shifted column.
fn apply_edits(css: &str, edits: &[Edit]) -> (String, Vec<Token>) {
    let index = LineIndex::new(css);
    let mut output = String::with_capacity(css.len());
    let mut tokens = Vec::new();

    for line in 0..index.line_count() as u32 {
        tokens.push(identity_token(line, 0, 0));
    }

    let mut last = 0usize;
    let mut delta_line: u32 = 0;
    let mut delta: i64 = 0;

    for edit in edits {
        let line_col = index.line_col(ByteOffset::from(edit.offset as u32));
        if line_col.line != delta_line {
            delta_line = line_col.line;
            delta = 0;
        }

        tokens.push(identity_token(
            line_col.line,
            (line_col.col as i64 + delta) as u32,
            line_col.col,
        ));
        delta += edit.replacement.len() as i64 - edit.len as i64;

        output.push_str(&css[last..edit.offset]);
        output.push_str(&edit.replacement);
        last = edit.offset + edit.len;
    }
    output.push_str(&css[last..]);

    (output, tokens)
}

fn identity_token(line: u32, generated_column: u32, original_column: u32) -> Token {
    Token {
        generated_line: line,
        generated_column,
        source: Some(TokenSource {
            source_id: 0,
            line,
            column: original_column,
            name_id: None,
        }),
    }
}

/// Appends the ICSS `:export` block. The block carries no mappings.
fn append_export_block(output: &mut String, exports: &CssExports) {
    if exports.is_empty() {
        return;
    }
    if !output.is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }
    output.push_str(":export {\n");
    for (name, scoped) in exports {
        output.push_str("  ");
        output.push_str(name);
        output.push_str(": ");
        output.push_str(scoped);
        output.push_str(";\n");
    }
    output.push_str("}\n");
}

/// An 8-character hex digest of the file path.
fn path_hash(path: &str) -> String {
    let hex = blake3::hash(path.as_bytes()).to_hex();
    hex.as_str()[..8].to_string()
}
