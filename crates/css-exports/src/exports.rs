//! The extraction entry point: stylesheet text in, export table out.

use camino::Utf8Path;
use css_parser::{extract_icss, parse, CssExports};
use css_processor::{ProcessError, ProcessOptions, Processor};
use source_map::RawSourceMap;
use thiserror::Error;

use crate::logger::Logger;
use crate::options::{CompilerOptions, Options};
use crate::registry::ExtensionRegistry;
use crate::renderer::{render, RenderError, StyleSource};

/// The result of one extraction.
#[derive(Debug, Clone, Default)]
pub struct CssExportsWithSourceMap {
    /// Raw class names mapped to their scoped spellings, in source order.
    pub classes: CssExports,
    /// The fully processed stylesheet text. `None` when extraction failed.
    pub css: Option<String>,
    /// Map from the processed text back to the original stylesheet.
    /// `None` when extraction failed or no map could be produced.
    pub source_map: Option<RawSourceMap>,
}

/// Everything one extraction needs.
pub struct ExtractRequest<'a> {
    /// The stylesheet text as the host sees it.
    pub css: &'a str,
    /// Absolute path of the stylesheet.
    pub file_path: &'a Utf8Path,
    pub logger: &'a dyn Logger,
    pub options: &'a Options,
    /// The processor the rendered text runs through.
    pub processor: &'a dyn Processor,
    pub registry: &'a ExtensionRegistry,
    pub compiler_options: &'a CompilerOptions,
}

#[derive(Debug, Error)]
enum ExtractError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Process(#[from] ProcessError),
}

/// Renders, processes, and reads the export table of one stylesheet.
///
/// This never fails: any error along the way is reported to the logger and
/// the extraction degrades to an empty table, so one broken stylesheet
/// cannot take the host's request cycle down.
pub fn get_css_exports(request: &ExtractRequest<'_>) -> CssExportsWithSourceMap {
    match try_get_css_exports(request) {
        Ok(exports) => exports,
        Err(error) => {
            request.logger.error(&error);
            CssExportsWithSourceMap::default()
        }
    }
}

fn try_get_css_exports(
    request: &ExtractRequest<'_>,
) -> Result<CssExportsWithSourceMap, ExtractError> {
    let source = StyleSource::new(request.css, request.file_path);
    let rendered = render(
        &source,
        request.options,
        request.registry,
        request.compiler_options,
        request.logger,
    )?;

    let processed = request.processor.process(
        &rendered.css,
        ProcessOptions {
            from: request.file_path,
            prev_map: rendered.source_map.as_ref(),
        },
    )?;

    let classes = match &processed.root {
        Some(root) => extract_icss(root),
        None => extract_icss(&parse(&processed.css).stylesheet),
    };

    // A custom renderer yields no map, and the processor's own identity
    // map would point into text the editor never sees. Suppress it.
    let source_map = if request.options.custom_renderer.is_some() {
        None
    } else {
        processed.map
    };

    Ok(CssExportsWithSourceMap {
        classes,
        css: Some(processed.css),
        source_map,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::RecordingLogger;
    use css_processor::CssModulesProcessor;
    use pretty_assertions::assert_eq;

    fn extract(css: &str, options: &Options) -> (CssExportsWithSourceMap, RecordingLogger) {
        let logger = RecordingLogger::new();
        let processor = CssModulesProcessor::new();
        let exports = get_css_exports(&ExtractRequest {
            css,
            file_path: Utf8Path::new("/project/button.module.css"),
            logger: &logger,
            options,
            processor: &processor,
            registry: &ExtensionRegistry::new(),
            compiler_options: &CompilerOptions::default(),
        });
        (exports, logger)
    }

    #[test]
    fn test_plain_css_exports() {
        let (exports, logger) = extract(".foo { color: red; }\n", &Options::default());

        let keys: Vec<&str> = exports.classes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["foo"]);
        assert!(exports.classes["foo"].starts_with("foo_"));
        assert!(exports.css.is_some());
        assert!(exports.source_map.is_some());
        assert!(logger.errors().is_empty());
    }

    #[test]
    fn test_missing_engine_degrades_to_empty() {
        let logger = RecordingLogger::new();
        let processor = CssModulesProcessor::new();
        let exports = get_css_exports(&ExtractRequest {
            css: ".foo { color: red; }\n",
            file_path: Utf8Path::new("/project/button.module.scss"),
            logger: &logger,
            options: &Options::default(),
            processor: &processor,
            registry: &ExtensionRegistry::new(),
            compiler_options: &CompilerOptions::default(),
        });

        assert!(exports.classes.is_empty());
        assert!(exports.css.is_none());
        assert!(exports.source_map.is_none());
        assert_eq!(logger.errors().len(), 1);
        assert!(logger.errors()[0].contains("no dialect engine"));
    }

    #[test]
    fn test_unknown_custom_renderer_degrades_to_empty() {
        let options = Options {
            custom_renderer: Some("missing".to_string()),
            ..Options::default()
        };
        let (exports, logger) = extract(".foo {}\n", &options);

        assert!(exports.classes.is_empty());
        assert_eq!(logger.errors().len(), 1);
        assert!(logger.errors()[0].contains("missing"));
    }
}
