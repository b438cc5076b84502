//! Declaration text synthesis.

use std::sync::OnceLock;

use camino::Utf8Path;
use css_exports::{
    ClassnameTransform, CssExports, CssExportsWithSourceMap, CustomTemplateContext,
    ExtensionRegistry, Logger, Options, TemplateError,
};
use regex::Regex;
use source_map::SourceMapConsumer;
use thiserror::Error;

use crate::locate::locate;
use crate::transforms::class_name_transform;

/// Failure while synthesizing declaration text.
///
/// The template hook is the only fallible step; everything else degrades
/// through the logger.
#[derive(Debug, Error)]
pub enum DtsError {
    #[error("no custom template registered under id `{id}`")]
    UnknownTemplate { id: String },

    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Synthesizes the `.d.ts` text for one extracted export table.
///
/// The standard shape is a default-export dictionary typed over the raw
/// class names followed by one named binding per valid spelling. With
/// `goToDefinition` enabled and a source map available, the named bindings
/// instead replace the whole text, laid out so each binding sits on the
/// stylesheet line its class was declared on. A configured custom template
/// rewrites the result as the final step, except in the degraded
/// goToDefinition-without-map path, which returns the dictionary alone.
pub fn create_dts_exports(
    exports: &CssExportsWithSourceMap,
    file_path: &Utf8Path,
    logger: &dyn Logger,
    options: &Options,
    registry: &ExtensionRegistry,
) -> Result<String, DtsError> {
    let convention = options.classname_transform();

    if options.go_to_definition {
        match (&exports.css, &exports.source_map) {
            (Some(css), Some(map)) => match SourceMapConsumer::new(map) {
                Ok(consumer) => {
                    let dts = line_accurate(&exports.classes, css, &consumer, convention);
                    return apply_template(dts, exports, file_path, logger, options, registry);
                }
                // A map we cannot read gets the same treatment as no map.
                Err(error) => {
                    logger.error(&error);
                    return Ok(dictionary_block(&exports.classes));
                }
            },
            _ => return Ok(dictionary_block(&exports.classes)),
        }
    }

    let mut dts = dictionary_block(&exports.classes);
    if options.named_exports_enabled() {
        let bindings = named_bindings(&exports.classes, convention);
        if !bindings.is_empty() {
            dts.push_str(&bindings.join("\n"));
            dts.push('\n');
        }
    }
    apply_template(dts, exports, file_path, logger, options, registry)
}

/// The default-export dictionary, typed over the raw class names in
/// insertion order.
fn dictionary_block(classes: &CssExports) -> String {
    let mut out = String::from("declare let classes: {\n");
    for key in classes.keys() {
        out.push_str(&format!("  '{key}': string;\n"));
    }
    out.push_str("};\nexport default classes;\n");
    out
}

/// One `export let` binding per valid spelling, in flattening order.
fn named_bindings(classes: &CssExports, convention: ClassnameTransform) -> Vec<String> {
    classes
        .keys()
        .flat_map(|raw| class_name_transform(raw, convention))
        .filter(|spelling| is_valid_identifier(spelling))
        .map(|spelling| format!("export let {spelling}: string;"))
        .collect()
}

/// Lays the named bindings out line-accurately.
///
/// Each scoped identifier is located in the rendered text and traced back
/// through the map; its bindings land on the output line matching the
/// original declaration line. Unresolvable classes anchor to the first
/// line. Bindings sharing a line are concatenated without separators, and
/// the output carries one line per rendered line so the layout tracks the
/// stylesheet shape.
fn line_accurate(
    classes: &CssExports,
    css: &str,
    consumer: &SourceMapConsumer,
    convention: ClassnameTransform,
) -> String {
    let lines: Vec<&str> = css.lines().collect();
    let mut slots: Vec<String> = Vec::new();

    for (raw, scoped) in classes {
        let bindings: Vec<String> = class_name_transform(raw, convention)
            .into_iter()
            .filter(|spelling| is_valid_identifier(spelling))
            .map(|spelling| format!("export let {spelling}: string;"))
            .collect();
        if bindings.is_empty() {
            continue;
        }

        let (line, column) = locate(scoped, &lines).unwrap_or((0, 0));
        let slot = consumer
            .original_position_for((line + 1) as u32, column as u32)
            .map(|position| position.line.saturating_sub(1) as usize)
            .unwrap_or(0);

        if slot >= slots.len() {
            slots.resize(slot + 1, String::new());
        }
        for binding in bindings {
            slots[slot].push_str(&binding);
        }
    }

    if slots.len() < lines.len() {
        slots.resize(lines.len(), String::new());
    }

    let mut out = slots.join("\n");
    out.push('\n');
    out
}

fn apply_template(
    dts: String,
    exports: &CssExportsWithSourceMap,
    file_path: &Utf8Path,
    logger: &dyn Logger,
    options: &Options,
    registry: &ExtensionRegistry,
) -> Result<String, DtsError> {
    let Some(id) = &options.custom_template else {
        return Ok(dts);
    };
    let template = registry
        .template(id)
        .ok_or_else(|| DtsError::UnknownTemplate { id: id.clone() })?;
    let ctx = CustomTemplateContext {
        classes: &exports.classes,
        file_path,
        logger,
    };
    Ok(template.apply(&dts, &ctx)?)
}

/// Whether a spelling can be emitted as a TypeScript binding name.
fn is_valid_identifier(name: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap())
        .is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_exports::NullLogger;
    use source_map::{RawSourceMap, Token, TokenSource};
    use std::sync::Arc;

    fn exports_for(pairs: &[(&str, &str)]) -> CssExportsWithSourceMap {
        CssExportsWithSourceMap {
            classes: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            css: None,
            source_map: None,
        }
    }

    fn synthesize(exports: &CssExportsWithSourceMap, options: &Options) -> String {
        create_dts_exports(
            exports,
            Utf8Path::new("/project/button.module.css"),
            &NullLogger,
            options,
            &ExtensionRegistry::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_single_class() {
        let exports = exports_for(&[("foo", "foo_12345678")]);
        insta::assert_snapshot!(synthesize(&exports, &Options::default()), @r###"
        declare let classes: {
          'foo': string;
        };
        export default classes;
        export let foo: string;
        "###);
    }

    #[test]
    fn test_dictionary_lists_raw_keys_only() {
        let exports = exports_for(&[("my-class", "my-class_12345678")]);
        let options = Options {
            classname_transform: Some(ClassnameTransform::CamelCaseOnly),
            ..Options::default()
        };
        insta::assert_snapshot!(synthesize(&exports, &options), @r###"
        declare let classes: {
          'my-class': string;
        };
        export default classes;
        export let myClass: string;
        "###);
    }

    #[test]
    fn test_invalid_spellings_get_no_named_binding() {
        let exports = exports_for(&[("my-class", "x"), ("ok", "y")]);
        insta::assert_snapshot!(synthesize(&exports, &Options::default()), @r###"
        declare let classes: {
          'my-class': string;
          'ok': string;
        };
        export default classes;
        export let ok: string;
        "###);
    }

    #[test]
    fn test_named_exports_disabled() {
        let exports = exports_for(&[("foo", "x")]);
        let options = Options {
            named_exports: Some(false),
            ..Options::default()
        };
        insta::assert_snapshot!(synthesize(&exports, &options), @r###"
        declare let classes: {
          'foo': string;
        };
        export default classes;
        "###);
    }

    #[test]
    fn test_unlocatable_identifier_anchors_to_the_first_line() {
        // Identity map over the rendered text.
        let mut map = RawSourceMap::new(vec!["/project/styles.module.css".to_string()]);
        map.set_tokens(
            (0..4)
                .map(|n| Token {
                    generated_line: n,
                    generated_column: 0,
                    source: Some(TokenSource {
                        source_id: 0,
                        line: n,
                        column: 0,
                        name_id: None,
                    }),
                })
                .collect(),
        );

        // The `ghost` class carries a scoped name that never occurs in the
        // rendered text, so its anchor search misses.
        let exports = CssExportsWithSourceMap {
            classes: [
                ("ghost".to_string(), "zz_nowhere".to_string()),
                ("real".to_string(), "real_abcd1234".to_string()),
            ]
            .into_iter()
            .collect(),
            css: Some("body {\n}\n.real_abcd1234 {\n}\n".to_string()),
            source_map: Some(map),
        };
        let options = Options {
            go_to_definition: true,
            ..Options::default()
        };

        let dts = synthesize(&exports, &options);
        let lines: Vec<&str> = dts.lines().collect();
        assert_eq!(lines[0], "export let ghost: string;");
        assert_eq!(lines[2], "export let real: string;");
        assert_eq!(lines[1], "");
        assert_eq!(lines[3], "");
    }

    #[test]
    fn test_go_to_definition_without_map_is_dictionary_only() {
        let exports = exports_for(&[("foo", "x")]);
        let options = Options {
            go_to_definition: true,
            // The template is skipped in this degraded path, so an
            // unregistered id must not error.
            custom_template: Some("unregistered".to_string()),
            ..Options::default()
        };
        insta::assert_snapshot!(synthesize(&exports, &options), @r###"
        declare let classes: {
          'foo': string;
        };
        export default classes;
        "###);
    }

    #[test]
    fn test_custom_template_rewrites_the_output() {
        let mut registry = ExtensionRegistry::new();
        registry.register_template(
            "banner",
            Arc::new(|dts: &str, ctx: &CustomTemplateContext<'_>| {
                Ok(format!("// {} classes\n{dts}", ctx.classes.len()))
            }),
        );
        let options = Options {
            custom_template: Some("banner".to_string()),
            ..Options::default()
        };

        let exports = exports_for(&[("foo", "x")]);
        let dts = create_dts_exports(
            &exports,
            Utf8Path::new("/project/button.module.css"),
            &NullLogger,
            &options,
            &registry,
        )
        .unwrap();
        assert!(dts.starts_with("// 1 classes\n"));
    }

    #[test]
    fn test_unknown_template_id_errors() {
        let options = Options {
            custom_template: Some("missing".to_string()),
            ..Options::default()
        };
        let exports = exports_for(&[("foo", "x")]);
        let err = create_dts_exports(
            &exports,
            Utf8Path::new("/project/button.module.css"),
            &NullLogger,
            &options,
            &ExtensionRegistry::new(),
        )
        .unwrap_err();
        assert!(matches!(err, DtsError::UnknownTemplate { id } if id == "missing"));
    }

    #[test]
    fn test_failing_template_propagates() {
        let mut registry = ExtensionRegistry::new();
        registry.register_template(
            "broken",
            Arc::new(
                |_dts: &str, _ctx: &CustomTemplateContext<'_>| -> Result<String, TemplateError> {
                    Err(TemplateError::new("refused"))
                },
            ),
        );
        let options = Options {
            custom_template: Some("broken".to_string()),
            ..Options::default()
        };
        let err = create_dts_exports(
            &exports_for(&[]),
            Utf8Path::new("/project/button.module.css"),
            &NullLogger,
            &options,
            &registry,
        )
        .unwrap_err();
        assert!(matches!(err, DtsError::Template(_)));
    }
}
