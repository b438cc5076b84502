//! The plain-syntax processor stage of css-modules-dts.
//!
//! The export extractor feeds rendered CSS through a caller-owned
//! [`Processor`] instance. The processor normalizes the text, exposes a
//! parsed root for the ICSS export walk, and produces a source map chained
//! from whatever map the renderer handed over.
//!
//! [`CssModulesProcessor`] is the default implementation: it scopes local
//! class selectors to hashed identifiers and emits the `:export` block that
//! the ICSS convention reads exports from. Hosts with their own processing
//! pipeline implement [`Processor`] themselves and pass that in instead.
//!
//! A processor instance holds no per-call state and is intended to be
//! reused across many sequential extractions; it is not a process-wide
//! singleton, and callers must serialize extraction calls against a given
//! instance.

mod css_modules;
mod processor;

pub use css_modules::CssModulesProcessor;
pub use processor::{ProcessError, ProcessOptions, ProcessedCss, Processor};
