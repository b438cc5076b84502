//! Rendering stage: from dialect text to plain CSS.

use camino::{Utf8Path, Utf8PathBuf};
use source_map::RawSourceMap;
use thiserror::Error;

use crate::file_type::{classify, FileKind};
use crate::importers::{StyleImporter, TildeImporter};
use crate::logger::Logger;
use crate::options::{CompilerOptions, Options};
use crate::registry::{CustomRendererContext, ExtensionRegistry};
use crate::resolver::{AliasImporter, PathMatcher};

/// A stylesheet waiting to be rendered.
#[derive(Debug, Clone, Copy)]
pub struct StyleSource<'a> {
    /// The stylesheet text as the host sees it, unsaved edits included.
    pub raw_text: &'a str,
    /// Absolute path of the stylesheet.
    pub file_path: &'a Utf8Path,
    /// The dialect the file classifies as.
    pub kind: FileKind,
}

impl<'a> StyleSource<'a> {
    /// Classifies `file_path` by suffix.
    pub fn new(raw_text: &'a str, file_path: &'a Utf8Path) -> Self {
        Self {
            raw_text,
            file_path,
            kind: classify(file_path.as_str()),
        }
    }
}

/// Plain CSS produced by the rendering stage.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub css: String,
    /// Map from rendered lines back to the dialect text. `None` when the
    /// renderer cannot produce one; later stages degrade accordingly.
    pub source_map: Option<RawSourceMap>,
}

/// Failure in the rendering stage.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no custom renderer registered under id `{id}`")]
    UnknownRenderer { id: String },

    #[error("no dialect engine registered for {kind:?} files")]
    EngineUnavailable { kind: FileKind },

    #[error("dialect engine failed: {0}")]
    Engine(String),

    #[error("custom renderer failed: {0}")]
    Renderer(String),
}

/// Options handed to a dialect engine for one compile.
pub struct EngineOptions {
    /// Directories searched for imports, in order. The stylesheet's own
    /// directory comes first.
    pub load_paths: Vec<Utf8PathBuf>,
    /// Resolution hooks consulted before the load-path search.
    pub importers: Vec<Box<dyn StyleImporter>>,
    /// Whether the engine should emit a source map.
    pub source_map: bool,
    /// Whether the input uses the indented Sass syntax.
    pub indented_syntax: bool,
}

/// What a dialect engine hands back.
#[derive(Debug, Clone)]
pub struct EngineOutput {
    pub css: String,
    pub source_map: Option<RawSourceMap>,
}

/// Compiles one dialect to plain CSS.
///
/// Hosts install concrete engines in the [`ExtensionRegistry`]; the
/// pipeline treats them as black boxes and only relies on the output map
/// using version-3 semantics.
pub trait DialectEngine: Send + Sync {
    fn compile(
        &self,
        source: &StyleSource<'_>,
        options: &EngineOptions,
    ) -> Result<EngineOutput, RenderError>;
}

/// Renders a stylesheet to plain CSS.
///
/// A configured `customRenderer` takes precedence over everything else and
/// never yields a map. Otherwise plain CSS passes through untouched and
/// Sass/SCSS goes through the registered engine with a source map
/// requested.
pub fn render(
    source: &StyleSource<'_>,
    options: &Options,
    registry: &ExtensionRegistry,
    compiler_options: &CompilerOptions,
    logger: &dyn Logger,
) -> Result<RenderOutput, RenderError> {
    if let Some(id) = &options.custom_renderer {
        let renderer = registry
            .renderer(id)
            .ok_or_else(|| RenderError::UnknownRenderer { id: id.clone() })?;
        let ctx = CustomRendererContext {
            file_path: source.file_path,
            logger,
            compiler_options,
        };
        let css = renderer.render(source.raw_text, &ctx)?;
        return Ok(RenderOutput {
            css,
            source_map: None,
        });
    }

    match source.kind {
        FileKind::Css => Ok(RenderOutput {
            css: source.raw_text.to_string(),
            source_map: None,
        }),
        FileKind::Sass | FileKind::Scss => {
            let engine = registry
                .sass_engine()
                .ok_or(RenderError::EngineUnavailable { kind: source.kind })?;
            let engine_options = engine_options(source, options, compiler_options);
            let output = engine.compile(source, &engine_options)?;
            Ok(RenderOutput {
                css: output.css,
                source_map: output.source_map,
            })
        }
    }
}

fn engine_options(
    source: &StyleSource<'_>,
    options: &Options,
    compiler_options: &CompilerOptions,
) -> EngineOptions {
    let extensions = source.kind.extensions();
    let dir = source
        .file_path
        .parent()
        .unwrap_or_else(|| Utf8Path::new("."));

    let mut load_paths = vec![dir.to_owned(), Utf8PathBuf::from("node_modules")];
    if let Some(sass) = &options.renderer_options.sass {
        load_paths.extend(sass.load_paths.iter().cloned());
    }

    let mut importers: Vec<Box<dyn StyleImporter>> = Vec::new();
    if let Some(base_url) = &compiler_options.base_url {
        let matcher = PathMatcher::new(base_url, &compiler_options.paths);
        importers.push(Box::new(AliasImporter::new(matcher, extensions)));
    }
    importers.push(Box::new(TildeImporter::new(dir.to_owned(), extensions)));

    EngineOptions {
        load_paths,
        importers,
        source_map: true,
        indented_syntax: source.kind == FileKind::Sass,
    }
}
