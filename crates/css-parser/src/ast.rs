//! Rule tree types for parsed stylesheets.

use source_map::Span;

/// A parsed stylesheet: a flat list of top-level rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    /// Top-level rules in source order.
    pub rules: Vec<Rule>,
}

/// A top-level or nested rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// A style rule (`selector { declarations }`).
    Style(StyleRule),
    /// An at-rule (`@media`, `@import`, ...).
    At(AtRule),
}

/// A style rule: selector, declarations, and any nested rules.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    /// The selector text, trimmed, with comments intact.
    pub selector: String,
    /// Span of the selector text in the source.
    pub selector_span: Span,
    /// Declarations inside the block, in source order.
    pub declarations: Vec<Declaration>,
    /// Nested rules inside the block (preprocessor output, `@media` bodies).
    pub nested: Vec<Rule>,
    /// Span of the whole rule.
    pub span: Span,
}

/// An at-rule, with or without a block.
#[derive(Debug, Clone, PartialEq)]
pub struct AtRule {
    /// The keyword without the `@` (e.g. `media`, `import`).
    pub name: String,
    /// Everything between the keyword and the block or semicolon, trimmed.
    pub prelude: String,
    /// Declarations in the block, for at-rules like `@font-face`.
    pub declarations: Vec<Declaration>,
    /// Nested rules in the block, for at-rules like `@media`.
    pub rules: Vec<Rule>,
    /// Whether the at-rule had a `{ ... }` block at all.
    pub has_block: bool,
    /// Span of the whole rule.
    pub span: Span,
}

/// A single `property: value` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The property name, trimmed.
    pub property: String,
    /// The value text, trimmed.
    pub value: String,
    /// Span of the declaration in the source.
    pub span: Span,
}

impl Stylesheet {
    /// Iterates over every style rule in the sheet, including nested ones.
    pub fn style_rules(&self) -> impl Iterator<Item = &StyleRule> {
        fn walk<'a>(rules: &'a [Rule], out: &mut Vec<&'a StyleRule>) {
            for rule in rules {
                match rule {
                    Rule::Style(style) => {
                        out.push(style);
                        walk(&style.nested, out);
                    }
                    Rule::At(at) => walk(&at.rules, out),
                }
            }
        }

        let mut out = Vec::new();
        walk(&self.rules, &mut out);
        out.into_iter()
    }
}
