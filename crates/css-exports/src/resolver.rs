//! Path-alias resolution mirroring the type checker's `paths` mapping.

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;

use crate::importers::StyleImporter;

/// One alias pattern with its substitutions.
#[derive(Debug, Clone)]
struct AliasPattern {
    /// Text before the `*`, or the whole pattern for exact aliases.
    prefix: String,
    /// Text after the `*`; `None` for exact aliases.
    suffix: Option<String>,
    substitutions: Vec<String>,
}

/// Resolves specifiers through `baseUrl` + `paths` alias patterns.
///
/// Patterns are tried in declaration order. A pattern with a `*` captures
/// the middle of the specifier and splices it into each substitution; an
/// exact pattern matches the whole specifier. Every substitution is probed
/// on disk, verbatim first and then with each candidate extension.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    base_url: Utf8PathBuf,
    patterns: Vec<AliasPattern>,
}

impl PathMatcher {
    pub fn new(base_url: &Utf8Path, paths: &IndexMap<String, Vec<String>>) -> Self {
        let patterns = paths
            .iter()
            .map(|(pattern, substitutions)| match pattern.split_once('*') {
                Some((prefix, suffix)) => AliasPattern {
                    prefix: prefix.to_string(),
                    suffix: Some(suffix.to_string()),
                    substitutions: substitutions.clone(),
                },
                None => AliasPattern {
                    prefix: pattern.clone(),
                    suffix: None,
                    substitutions: substitutions.clone(),
                },
            })
            .collect();
        Self {
            base_url: base_url.to_owned(),
            patterns,
        }
    }

    /// Resolves `url` to an existing file, or `None` when no alias matches
    /// or nothing matched on disk.
    pub fn match_path(&self, url: &str, extensions: &[&str]) -> Option<Utf8PathBuf> {
        for pattern in &self.patterns {
            let captured = match &pattern.suffix {
                Some(suffix) => {
                    let stripped = url
                        .strip_prefix(pattern.prefix.as_str())
                        .and_then(|rest| rest.strip_suffix(suffix.as_str()));
                    match stripped {
                        Some(captured) => captured,
                        None => continue,
                    }
                }
                None => {
                    if url != pattern.prefix {
                        continue;
                    }
                    ""
                }
            };
            for substitution in &pattern.substitutions {
                let substituted = substitution.replacen('*', captured, 1);
                let base = self.base_url.join(substituted);
                if base.is_file() {
                    return Some(base);
                }
                for ext in extensions {
                    let candidate = Utf8PathBuf::from(format!("{base}{ext}"));
                    if candidate.is_file() {
                        return Some(candidate);
                    }
                }
            }
        }
        None
    }
}

/// Adapts a [`PathMatcher`] to the importer interface the engine consumes.
#[derive(Debug, Clone)]
pub struct AliasImporter {
    matcher: PathMatcher,
    extensions: Vec<&'static str>,
}

impl AliasImporter {
    pub fn new(matcher: PathMatcher, extensions: &[&'static str]) -> Self {
        Self {
            matcher,
            extensions: extensions.to_vec(),
        }
    }
}

impl StyleImporter for AliasImporter {
    fn find_file_url(&self, url: &str) -> Option<Utf8PathBuf> {
        self.matcher.match_path(url, &self.extensions)
    }
}
