//! Source map documents and position mapping for css-modules-dts.
//!
//! This crate covers the two position-tracking concerns of the pipeline:
//!
//! - Byte-level spans and line indexing over stylesheet text ([`Span`],
//!   [`LineIndex`]), used by the CSS tokenizer and the processor.
//! - The standard version-3 JSON source map document ([`RawSourceMap`]),
//!   with decoding of VLQ mappings, a [`SourceMapConsumer`] answering
//!   "original position for (line, column)" queries, and an explicit
//!   [`compose`] operation that chains a renderer map with a processor map
//!   into a single document.

mod compose;
mod consumer;
mod line_index;
mod raw;
mod span;
mod vlq;

pub use compose::compose;
pub use consumer::{OriginalPosition, SourceMapConsumer};
pub use line_index::{LineCol, LineIndex};
pub use raw::{RawSourceMap, SourceMapError, Token, TokenSource};
pub use span::{ByteOffset, Span};
