//! Parse error types.

use source_map::Span;
use thiserror::Error;

/// An error that occurred during parsing.
///
/// Parse errors are collected, not thrown; the parser keeps going and the
/// resulting stylesheet covers whatever could be recovered.
#[derive(Debug, Clone, Error)]
#[error("{kind}")]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// The location in the source where the error occurred.
    pub span: Span,
}

impl ParseError {
    /// Creates a new parse error.
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of parse error.
#[derive(Debug, Clone, Error)]
pub enum ParseErrorKind {
    /// A block was still open at the end of input.
    #[error("unclosed block")]
    UnclosedBlock,

    /// A `}` with no matching open brace.
    #[error("unexpected '}}'")]
    UnexpectedCloseBrace,

    /// A declaration without a `:` separating property and value.
    #[error("invalid declaration: {text}")]
    InvalidDeclaration {
        /// The offending text.
        text: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use text_size::TextSize;

    #[test]
    fn test_error_display() {
        let error = ParseError::new(
            ParseErrorKind::UnexpectedCloseBrace,
            Span::new(TextSize::from(0), TextSize::from(1)),
        );
        assert_eq!(error.to_string(), "unexpected '}'");

        let error = ParseError::new(
            ParseErrorKind::InvalidDeclaration {
                text: "color red".to_string(),
            },
            Span::new(TextSize::from(0), TextSize::from(9)),
        );
        assert_eq!(error.to_string(), "invalid declaration: color red");
    }
}
