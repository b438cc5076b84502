//! ICSS export extraction.
//!
//! The "interoperable CSS" convention communicates a stylesheet's exports
//! through `:export` rules whose declarations map an author-facing name to
//! its rendered identifier:
//!
//! ```css
//! :export {
//!   foo: foo_1a2b3c4d;
//! }
//! ```

use crate::ast::{Rule, Stylesheet};
use indexmap::IndexMap;

/// The export table of a stylesheet: raw name → rendered identifier.
///
/// Insertion order follows the order of `:export` declarations.
pub type CssExports = IndexMap<String, String>;

/// Collects the export table from every top-level `:export` rule.
///
/// Later declarations for the same name replace earlier ones, keeping the
/// original insertion position.
pub fn extract_icss(stylesheet: &Stylesheet) -> CssExports {
    let mut exports = CssExports::new();

    for rule in &stylesheet.rules {
        let Rule::Style(style) = rule else {
            continue;
        };
        if style.selector != ":export" {
            continue;
        }

        for declaration in &style.declarations {
            exports.insert(declaration.property.clone(), declaration.value.clone());
        }
    }

    exports
}
