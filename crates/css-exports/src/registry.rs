//! Host-registered extension points.
//!
//! Configuration cannot carry executable code, so the `customRenderer`,
//! `customTemplate`, and dialect-engine hooks are strategy objects the
//! host registers here under string ids. Options then name the id.

use std::collections::HashMap;
use std::sync::Arc;

use camino::Utf8Path;
use css_parser::CssExports;
use thiserror::Error;

use crate::logger::Logger;
use crate::options::CompilerOptions;
use crate::renderer::{DialectEngine, RenderError};

/// Context handed to a custom renderer.
pub struct CustomRendererContext<'a> {
    /// Absolute path of the stylesheet being rendered.
    pub file_path: &'a Utf8Path,
    /// The pipeline logger.
    pub logger: &'a dyn Logger,
    /// Compiler options of the surrounding project.
    pub compiler_options: &'a CompilerOptions,
}

/// Replaces the built-in rendering stage entirely.
///
/// A custom renderer receives the raw stylesheet text and must produce
/// plain CSS. It yields no source map, so line-accurate declarations
/// degrade to the dictionary shape for files rendered this way.
pub trait CustomRenderer: Send + Sync {
    fn render(&self, css: &str, ctx: &CustomRendererContext<'_>) -> Result<String, RenderError>;
}

impl<F> CustomRenderer for F
where
    F: Fn(&str, &CustomRendererContext<'_>) -> Result<String, RenderError> + Send + Sync,
{
    fn render(&self, css: &str, ctx: &CustomRendererContext<'_>) -> Result<String, RenderError> {
        self(css, ctx)
    }
}

/// Context handed to a custom template.
pub struct CustomTemplateContext<'a> {
    /// The extracted export table, raw names mapped to scoped names.
    pub classes: &'a CssExports,
    /// Absolute path of the stylesheet the declarations describe.
    pub file_path: &'a Utf8Path,
    /// The pipeline logger.
    pub logger: &'a dyn Logger,
}

/// Rewrites the synthesized declaration text as a final step.
pub trait CustomTemplate: Send + Sync {
    fn apply(&self, dts: &str, ctx: &CustomTemplateContext<'_>) -> Result<String, TemplateError>;
}

impl<F> CustomTemplate for F
where
    F: Fn(&str, &CustomTemplateContext<'_>) -> Result<String, TemplateError> + Send + Sync,
{
    fn apply(&self, dts: &str, ctx: &CustomTemplateContext<'_>) -> Result<String, TemplateError> {
        self(dts, ctx)
    }
}

/// Failure raised by a custom template.
#[derive(Debug, Error)]
#[error("custom template failed: {message}")]
pub struct TemplateError {
    pub message: String,
}

impl TemplateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Holds every extension the host has made available.
#[derive(Default, Clone)]
pub struct ExtensionRegistry {
    renderers: HashMap<String, Arc<dyn CustomRenderer>>,
    templates: HashMap<String, Arc<dyn CustomTemplate>>,
    sass_engine: Option<Arc<dyn DialectEngine>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a custom renderer under an id; a later registration with
    /// the same id replaces the earlier one.
    pub fn register_renderer(&mut self, id: impl Into<String>, renderer: Arc<dyn CustomRenderer>) {
        self.renderers.insert(id.into(), renderer);
    }

    /// Registers a custom template under an id.
    pub fn register_template(&mut self, id: impl Into<String>, template: Arc<dyn CustomTemplate>) {
        self.templates.insert(id.into(), template);
    }

    /// Installs the engine used for Sass and SCSS files.
    pub fn set_sass_engine(&mut self, engine: Arc<dyn DialectEngine>) {
        self.sass_engine = Some(engine);
    }

    pub fn renderer(&self, id: &str) -> Option<&Arc<dyn CustomRenderer>> {
        self.renderers.get(id)
    }

    pub fn template(&self, id: &str) -> Option<&Arc<dyn CustomTemplate>> {
        self.templates.get(id)
    }

    pub fn sass_engine(&self) -> Option<&Arc<dyn DialectEngine>> {
        self.sass_engine.as_ref()
    }
}

impl std::fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("renderers", &self.renderers.keys().collect::<Vec<_>>())
            .field("templates", &self.templates.keys().collect::<Vec<_>>())
            .field("sass_engine", &self.sass_engine.is_some())
            .finish()
    }
}
