//! Query interface over a decoded source map.

use crate::raw::{RawSourceMap, SourceMapError, Token};

/// An original position resolved from a generated position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalPosition {
    /// The original source file, when the map names one.
    pub source: Option<String>,
    /// 1-indexed original line.
    pub line: u32,
    /// 0-indexed original column.
    pub column: u32,
    /// The mapped symbol name, when present.
    pub name: Option<String>,
}

/// A consumer over a [`RawSourceMap`] answering original-position queries.
///
/// Decodes the mappings once at construction; individual queries are a
/// binary search over the token list.
#[derive(Debug)]
pub struct SourceMapConsumer {
    tokens: Vec<Token>,
    sources: Vec<String>,
    names: Vec<String>,
}

impl SourceMapConsumer {
    /// Builds a consumer from a raw map document.
    pub fn new(map: &RawSourceMap) -> Result<Self, SourceMapError> {
        let mut tokens = map.tokens()?;
        tokens.sort_by_key(|t| (t.generated_line, t.generated_column));
        Ok(Self {
            tokens,
            sources: map.sources.clone(),
            names: map.names.clone(),
        })
    }

    /// Returns the number of mapping segments.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the map carries no mappings.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Finds the original position for a generated position.
    ///
    /// `line` is 1-indexed and `column` 0-indexed, matching the convention
    /// of source-map consumers. The match is the greatest mapped column on
    /// the generated line that does not exceed `column`; a line with no
    /// mapped segment at or before `column` yields `None`, as does a
    /// segment with no original side.
    pub fn original_position_for(&self, line: u32, column: u32) -> Option<OriginalPosition> {
        if line == 0 {
            return None;
        }
        let generated_line = line - 1;

        // First token past (line, column), then step back one.
        let idx = self
            .tokens
            .partition_point(|t| (t.generated_line, t.generated_column) <= (generated_line, column));
        let token = self.tokens.get(idx.checked_sub(1)?)?;
        if token.generated_line != generated_line {
            return None;
        }

        let source = token.source?;
        Some(OriginalPosition {
            source: self.sources.get(source.source_id as usize).cloned(),
            line: source.line + 1,
            column: source.column,
            name: source
                .name_id
                .and_then(|id| self.names.get(id as usize).cloned()),
        })
    }
}
