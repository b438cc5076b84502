//! Deciding which files this pipeline owns.

use regex::Regex;

/// The default pattern for stylesheet modules.
pub const DEFAULT_MATCHER: &str = r"\.module\.((c|sa|sc)ss)$";

/// Matches file names against the stylesheet-module pattern.
///
/// Hosts use this to decide which imports to intercept; the pipeline
/// itself only consults it for the `customMatcher` option.
#[derive(Debug, Clone)]
pub struct CssModuleMatcher {
    pattern: Regex,
}

impl CssModuleMatcher {
    /// Builds a matcher from the `customMatcher` option, falling back to
    /// [`DEFAULT_MATCHER`].
    pub fn new(custom_matcher: Option<&str>) -> Result<Self, regex::Error> {
        let pattern = Regex::new(custom_matcher.unwrap_or(DEFAULT_MATCHER))?;
        Ok(Self { pattern })
    }

    /// Whether the file is a stylesheet module.
    pub fn is_match(&self, file_name: &str) -> bool {
        self.pattern.is_match(file_name)
    }

    /// Whether the file is a stylesheet module referenced by a relative
    /// specifier.
    pub fn is_relative_match(&self, file_name: &str) -> bool {
        self.is_match(file_name) && is_relative(file_name)
    }
}

/// Whether a module specifier is relative (`.` or `..` prefixed).
pub fn is_relative(file_name: &str) -> bool {
    for prefix in [".", ".."] {
        if file_name == prefix {
            return true;
        }
        if let Some(rest) = file_name.strip_prefix(prefix) {
            if rest.starts_with('/') || rest.starts_with('\\') {
                return true;
            }
        }
    }
    false
}
