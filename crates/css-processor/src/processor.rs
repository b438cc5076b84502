//! The processor contract.

use camino::Utf8Path;
use css_parser::Stylesheet;
use source_map::{RawSourceMap, SourceMapError};
use thiserror::Error;

/// An error raised by a processor.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Chaining the processor map onto the renderer map failed.
    #[error("source map composition failed: {0}")]
    SourceMap(#[from] SourceMapError),

    /// A host-supplied processor failed for its own reasons.
    #[error("processor failed: {0}")]
    Other(String),
}

/// Options for a single `process` call.
#[derive(Debug, Clone, Copy)]
pub struct ProcessOptions<'a> {
    /// The stylesheet file the text came from.
    pub from: &'a Utf8Path,
    /// The renderer's source map to chain from, if one was produced.
    pub prev_map: Option<&'a RawSourceMap>,
}

/// The output of a `process` call.
#[derive(Debug)]
pub struct ProcessedCss {
    /// The parsed root of the processed text, when parsing produced one.
    pub root: Option<Stylesheet>,
    /// The processed text.
    pub css: String,
    /// Map from processed text back to the original stylesheet, composed
    /// through `prev_map` when one was supplied.
    pub map: Option<RawSourceMap>,
}

/// A reusable plain-syntax CSS processor.
///
/// Implementations must be stateless with respect to individual calls so a
/// single instance can serve many sequential extractions.
pub trait Processor {
    /// Processes rendered CSS text into its final form.
    fn process(&self, css: &str, options: ProcessOptions<'_>) -> Result<ProcessedCss, ProcessError>;
}
