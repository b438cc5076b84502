//! Plain-CSS parsing for css-modules-dts.
//!
//! This crate tokenizes and parses rendered (post-preprocessor) stylesheet
//! text into a loose rule tree, just enough structure for the two consumers
//! downstream: the CSS Modules processor (which rewrites class selectors)
//! and the ICSS export walk (which reads `:export` blocks).
//!
//! The parser is deliberately lenient: it always produces a [`Stylesheet`]
//! plus a list of [`ParseError`]s, and never fails outright. A broken
//! stylesheet must degrade, not crash the host.
//!
//! # Example
//!
//! ```
//! use css_parser::parse;
//!
//! let result = parse(".foo { color: red; }");
//! assert!(result.errors.is_empty());
//! assert_eq!(result.stylesheet.rules.len(), 1);
//! ```

mod ast;
mod error;
mod icss;
mod lexer;
mod parser;
mod selector;

pub use ast::{AtRule, Declaration, Rule, StyleRule, Stylesheet};
pub use error::{ParseError, ParseErrorKind};
pub use icss::{extract_icss, CssExports};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{parse, ParseResult};
pub use selector::{class_selectors, ClassSelector};
