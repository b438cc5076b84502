//! Composition of two chained source maps into one.

use crate::consumer::SourceMapConsumer;
use crate::raw::{RawSourceMap, SourceMapError, Token, TokenSource};

/// Composes a renderer map with a processor map.
///
/// `prev` maps rendered text back to the original stylesheet; `next` maps
/// final processed text back to the rendered text. The result maps final
/// text directly to the original stylesheet, so that for every mapped point
/// `compose(prev, next)` answers what chaining the two lookups would.
///
/// Segments of `next` whose rendered position has no counterpart in `prev`
/// are dropped: they describe text the renderer synthesized out of thin air
/// and carry no original position. `sourcesContent` is taken from `prev`.
pub fn compose(prev: &RawSourceMap, next: &RawSourceMap) -> Result<RawSourceMap, SourceMapError> {
    let prev_consumer = SourceMapConsumer::new(prev)?;

    let mut sources: Vec<String> = Vec::new();
    let mut sources_content: Vec<Option<String>> = Vec::new();
    let mut tokens = Vec::new();

    for token in next.tokens()? {
        let Some(through) = token.source else {
            continue;
        };

        let Some(original) =
            prev_consumer.original_position_for(through.line + 1, through.column)
        else {
            continue;
        };

        let source_name = original.source.unwrap_or_default();
        let source_id = match sources.iter().position(|s| *s == source_name) {
            Some(id) => id as u32,
            None => {
                sources.push(source_name.clone());
                sources_content.push(content_for(prev, &source_name));
                (sources.len() - 1) as u32
            }
        };

        tokens.push(Token {
            generated_line: token.generated_line,
            generated_column: token.generated_column,
            source: Some(TokenSource {
                source_id,
                line: original.line - 1,
                column: original.column,
                name_id: None,
            }),
        });
    }

    let mut composed = RawSourceMap::new(sources);
    composed.file = next.file.clone();
    if sources_content.iter().any(|c| c.is_some()) {
        composed.sources_content = Some(sources_content);
    }
    composed.set_tokens(tokens);
    Ok(composed)
}

/// Looks up the recorded content for a source of `prev`, if any.
fn content_for(prev: &RawSourceMap, source: &str) -> Option<String> {
    let contents = prev.sources_content.as_ref()?;
    let index = prev.sources.iter().position(|s| s == source)?;
    contents.get(index)?.clone()
}
