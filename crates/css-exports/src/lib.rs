//! Stage (a) of css-modules-dts: from stylesheet text to an export table.
//!
//! Given a stylesheet module (plain CSS, Sass, or SCSS), this crate renders
//! it to plain rules, runs the result through a caller-owned processor, and
//! extracts the ICSS export table together with the final text and a source
//! map composed across both steps.
//!
//! The entry point is [`get_css_exports`], which never fails: a broken
//! stylesheet, a missing dialect engine, or a failing custom renderer all
//! degrade to an empty export table and a logged error, because this runs
//! inside a language-service request cycle where a crash takes the host
//! down with it.
//!
//! Preprocessor engines and user extensions are not loaded dynamically;
//! hosts register them in an [`ExtensionRegistry`] and configuration refers
//! to them by id.

mod exports;
mod extensions;
mod file_type;
mod importers;
mod logger;
mod options;
mod registry;
mod renderer;
mod resolver;

pub use exports::{get_css_exports, CssExportsWithSourceMap, ExtractRequest};
pub use extensions::{is_relative, CssModuleMatcher, DEFAULT_MATCHER};
pub use file_type::{classify, FileKind};
pub use importers::{StyleImporter, TildeImporter};
pub use logger::{ConsoleLogger, Logger, NullLogger, RecordingLogger};
pub use options::{
    ClassnameTransform, CompilerOptions, Options, PostcssOptions, RendererOptions,
    SassRendererOptions,
};
pub use registry::{
    CustomRenderer, CustomRendererContext, CustomTemplate, CustomTemplateContext,
    ExtensionRegistry, TemplateError,
};
pub use renderer::{
    render, DialectEngine, EngineOptions, EngineOutput, RenderError, RenderOutput, StyleSource,
};
pub use resolver::{AliasImporter, PathMatcher};

pub use css_parser::CssExports;
