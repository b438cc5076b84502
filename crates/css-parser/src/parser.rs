//! The rule parser.
//!
//! Builds a [`Stylesheet`] from the token stream. Structure is driven
//! entirely by lookahead to the next `{`, `;` or `}`: a segment ending in
//! `{` is a rule prelude (selector or at-rule), anything else inside a
//! block is a declaration. This is how nested preprocessor output and
//! `a:hover` selectors are told apart from `color: red` without a selector
//! grammar.

use crate::ast::{AtRule, Declaration, Rule, StyleRule, Stylesheet};
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::{Lexer, Token, TokenKind};
use source_map::Span;

/// The outcome of parsing: a stylesheet plus any recovered errors.
#[derive(Debug)]
pub struct ParseResult {
    /// The parsed rule tree.
    pub stylesheet: Stylesheet,
    /// Errors encountered; the stylesheet covers what was recoverable.
    pub errors: Vec<ParseError>,
}

/// Parses stylesheet source into a rule tree. Never fails.
pub fn parse(source: &str) -> ParseResult {
    let tokens: Vec<Token> = Lexer::new(source).collect();
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
        errors: Vec::new(),
    };

    let (_, rules) = parser.parse_contents(true);
    ParseResult {
        stylesheet: Stylesheet { rules },
        errors: parser.errors,
    }
}

struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    errors: Vec<ParseError>,
}

impl<'src> Parser<'src> {
    fn peek(&self) -> Token {
        self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    /// End offset of the most recently consumed token.
    fn last_end(&self) -> Span {
        if self.pos == 0 {
            Span::empty(0u32)
        } else {
            let span = self.tokens[self.pos - 1].span;
            Span::empty(span.end)
        }
    }

    fn slice(&self, from: usize, to: usize) -> (String, Span) {
        if from >= to {
            return (String::new(), self.tokens[from.min(self.tokens.len() - 1)].span);
        }
        let span = Span::new(self.tokens[from].span.start, self.tokens[to - 1].span.end);
        (span.text(self.source).to_string(), span)
    }

    /// Parses block contents (or the whole sheet when `top_level`).
    ///
    /// Consumes the closing `}` of the block it was called for.
    fn parse_contents(&mut self, top_level: bool) -> (Vec<Declaration>, Vec<Rule>) {
        let mut declarations = Vec::new();
        let mut rules = Vec::new();

        loop {
            match self.peek().kind {
                TokenKind::Eof => {
                    if !top_level {
                        self.errors
                            .push(ParseError::new(ParseErrorKind::UnclosedBlock, self.peek().span));
                    }
                    break;
                }
                TokenKind::RBrace => {
                    if top_level {
                        self.errors.push(ParseError::new(
                            ParseErrorKind::UnexpectedCloseBrace,
                            self.peek().span,
                        ));
                        self.advance();
                        continue;
                    }
                    self.advance();
                    break;
                }
                TokenKind::Semicolon => {
                    self.advance();
                    continue;
                }
                _ => {}
            }

            // Scan the segment up to the next structural token.
            let start = self.pos;
            while !matches!(
                self.peek().kind,
                TokenKind::LBrace | TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
            ) {
                self.advance();
            }
            let end = self.pos;

            match self.peek().kind {
                TokenKind::LBrace => {
                    self.advance();
                    let (block_declarations, block_rules) = self.parse_contents(false);
                    let rule_span =
                        Span::new(self.tokens[start].span.start, self.last_end().start);

                    if self.tokens[start].kind == TokenKind::AtKeyword {
                        let name = self.tokens[start]
                            .span
                            .text(self.source)
                            .trim_start_matches('@')
                            .to_string();
                        let (prelude, _) = self.slice(start + 1, end);
                        rules.push(Rule::At(AtRule {
                            name,
                            prelude,
                            declarations: block_declarations,
                            rules: block_rules,
                            has_block: true,
                            span: rule_span,
                        }));
                    } else {
                        let (selector, selector_span) = self.slice(start, end);
                        rules.push(Rule::Style(StyleRule {
                            selector,
                            selector_span,
                            declarations: block_declarations,
                            nested: block_rules,
                            span: rule_span,
                        }));
                    }
                }
                _ => {
                    // Segment terminated by `;`, `}` or end of input.
                    if end > start {
                        if self.tokens[start].kind == TokenKind::AtKeyword {
                            // Block-less at-rule such as `@import "x.css";`.
                            let name = self.tokens[start]
                                .span
                                .text(self.source)
                                .trim_start_matches('@')
                                .to_string();
                            let (prelude, _) = self.slice(start + 1, end);
                            let (_, span) = self.slice(start, end);
                            rules.push(Rule::At(AtRule {
                                name,
                                prelude,
                                declarations: Vec::new(),
                                rules: Vec::new(),
                                has_block: false,
                                span,
                            }));
                        } else if top_level {
                            let (text, span) = self.slice(start, end);
                            self.errors.push(ParseError::new(
                                ParseErrorKind::InvalidDeclaration { text },
                                span,
                            ));
                        } else {
                            self.push_declaration(start, end, &mut declarations);
                        }
                    }
                    if self.peek().kind == TokenKind::Semicolon {
                        self.advance();
                    }
                }
            }
        }

        (declarations, rules)
    }

    fn push_declaration(&mut self, start: usize, end: usize, out: &mut Vec<Declaration>) {
        let colon = (start..end).find(|&i| self.tokens[i].kind == TokenKind::Colon);

        let Some(colon) = colon else {
            let (text, span) = self.slice(start, end);
            self.errors
                .push(ParseError::new(ParseErrorKind::InvalidDeclaration { text }, span));
            return;
        };

        let (property, _) = self.slice(start, colon);
        let (value, _) = self.slice(colon + 1, end);
        let (_, span) = self.slice(start, end);

        if property.is_empty() {
            let (text, span) = self.slice(start, end);
            self.errors
                .push(ParseError::new(ParseErrorKind::InvalidDeclaration { text }, span));
            return;
        }

        out.push(Declaration {
            property,
            value,
            span,
        });
    }
}
