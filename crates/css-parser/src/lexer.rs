//! CSS lexer using logos.
//!
//! Tokenization is coarse: the parser reconstructs selector and value text
//! from source slices, so the lexer only needs to be precise about the
//! characters that shape rule structure (braces, semicolons, colons) and
//! about skipping comments and strings correctly.

use logos::Logos;
use source_map::Span;
use text_size::TextSize;

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The span of the token in the source.
    pub span: Span,
}

/// Token kinds for plain CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Logos)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/")]
pub enum TokenKind {
    /// `{`
    #[token("{")]
    LBrace,

    /// `}`
    #[token("}")]
    RBrace,

    /// `;`
    #[token(";")]
    Semicolon,

    /// `:`
    #[token(":")]
    Colon,

    /// `,`
    #[token(",")]
    Comma,

    /// `.`
    #[token(".")]
    Dot,

    /// `(`
    #[token("(")]
    LParen,

    /// `)`
    #[token(")")]
    RParen,

    /// An at-keyword such as `@media` or `@import`.
    #[regex(r"@[a-zA-Z-]+")]
    AtKeyword,

    /// An identifier, including vendor prefixes and custom properties.
    #[regex(r"-?-?[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    /// A hash token (`#fff`, `#some-id`).
    #[regex(r"#[a-zA-Z0-9_-]+")]
    Hash,

    /// A quoted string (either quote style, with escapes).
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"'([^'\\\n]|\\.)*'"#)]
    String,

    /// A numeric value with an optional unit.
    #[regex(r"[0-9]+(\.[0-9]+)?(%|[a-zA-Z]+)?")]
    Number,

    /// Any character the lexer does not recognize.
    Unknown,

    /// End of input.
    Eof,
}

/// A lexer over CSS source text.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    source: &'src str,
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            source,
            finished: false,
        }
    }

    /// Returns the source string being lexed.
    pub fn source(&self) -> &'src str {
        self.source
    }

    fn current_span(&self) -> Span {
        let span = self.inner.span();
        Span::new(
            TextSize::from(span.start as u32),
            TextSize::from(span.end as u32),
        )
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.inner.next() {
            Some(Ok(kind)) => Some(Token {
                kind,
                span: self.current_span(),
            }),
            Some(Err(())) => Some(Token {
                kind: TokenKind::Unknown,
                span: self.current_span(),
            }),
            None => {
                self.finished = true;
                let end = TextSize::from(self.source.len() as u32);
                Some(Token {
                    kind: TokenKind::Eof,
                    span: Span::new(end, end),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .map(|t| t.kind)
            .filter(|k| *k != TokenKind::Eof)
            .collect()
    }

    #[test]
    fn test_simple_rule() {
        assert_eq!(
            kinds(".foo { color: red; }"),
            vec![
                TokenKind::Dot,
                TokenKind::Ident,
                TokenKind::LBrace,
                TokenKind::Ident,
                TokenKind::Colon,
                TokenKind::Ident,
                TokenKind::Semicolon,
                TokenKind::RBrace,
            ]
        );
    }

    #[test]
    fn test_comments_skipped() {
        assert_eq!(
            kinds("/* a comment */ .foo /* another * one */ {}"),
            vec![
                TokenKind::Dot,
                TokenKind::Ident,
                TokenKind::LBrace,
                TokenKind::RBrace,
            ]
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            kinds(r#"content: "a { b }";"#),
            vec![
                TokenKind::Ident,
                TokenKind::Colon,
                TokenKind::String,
                TokenKind::Semicolon,
            ]
        );
        assert_eq!(kinds(r"'it\'s'"), vec![TokenKind::String]);
    }

    #[test]
    fn test_at_keyword_and_numbers() {
        assert_eq!(
            kinds("@media (min-width: 40.5em)"),
            vec![
                TokenKind::AtKeyword,
                TokenKind::LParen,
                TokenKind::Ident,
                TokenKind::Colon,
                TokenKind::Number,
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn test_vendor_prefix_and_custom_property() {
        assert_eq!(kinds("-webkit-box"), vec![TokenKind::Ident]);
        assert_eq!(kinds("--main-color"), vec![TokenKind::Ident]);
    }

    #[test]
    fn test_unknown_characters() {
        assert_eq!(kinds("!"), vec![TokenKind::Unknown]);
    }

    #[test]
    fn test_token_spans() {
        let tokens: Vec<Token> = Lexer::new(".foo").collect();
        assert_eq!(tokens[0].span, Span::new(0u32, 1u32));
        assert_eq!(tokens[1].span, Span::new(1u32, 4u32));
        // Eof token sits at the end of input.
        assert_eq!(tokens[2].span, Span::new(4u32, 4u32));
    }
}
