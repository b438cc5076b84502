//! Import resolution hooks handed to the dialect engine.

use camino::{Utf8Path, Utf8PathBuf};

/// Resolves an import specifier the engine could not find on its own.
///
/// Returning `None` lets the next importer, and finally the engine's own
/// load-path search, take over.
pub trait StyleImporter: Send + Sync {
    fn find_file_url(&self, url: &str) -> Option<Utf8PathBuf>;
}

/// Resolves `~package/...` specifiers against `node_modules` directories.
///
/// The search walks upward from the importing file's directory, joining
/// each ancestor's `node_modules` with the rest of the specifier, and
/// probes the usual Sass spellings: the verbatim path, each candidate
/// extension, the `_`-prefixed partial, and index files for directory
/// imports.
#[derive(Debug, Clone)]
pub struct TildeImporter {
    start_dir: Utf8PathBuf,
    extensions: Vec<&'static str>,
}

impl TildeImporter {
    /// `start_dir` is the directory of the importing stylesheet;
    /// `extensions` come from the file kind being rendered.
    pub fn new(start_dir: impl Into<Utf8PathBuf>, extensions: &[&'static str]) -> Self {
        Self {
            start_dir: start_dir.into(),
            extensions: extensions.to_vec(),
        }
    }

    fn probe(&self, base: &Utf8Path) -> Option<Utf8PathBuf> {
        if base.is_file() {
            return Some(base.to_owned());
        }
        for ext in &self.extensions {
            let candidate = Utf8PathBuf::from(format!("{base}{ext}"));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        // Sass partials: the on-disk name carries a leading underscore.
        if let (Some(parent), Some(name)) = (base.parent(), base.file_name()) {
            let partial = parent.join(format!("_{name}"));
            if partial.is_file() {
                return Some(partial);
            }
            for ext in &self.extensions {
                let candidate = parent.join(format!("_{name}{ext}"));
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
        // Directory import.
        if base.is_dir() {
            for ext in &self.extensions {
                for index in [format!("_index{ext}"), format!("index{ext}")] {
                    let candidate = base.join(index);
                    if candidate.is_file() {
                        return Some(candidate);
                    }
                }
            }
        }
        None
    }
}

impl StyleImporter for TildeImporter {
    fn find_file_url(&self, url: &str) -> Option<Utf8PathBuf> {
        let rest = url.strip_prefix('~')?;
        let mut dir = Some(self.start_dir.as_path());
        while let Some(current) = dir {
            let base = current.join("node_modules").join(rest);
            if let Some(found) = self.probe(&base) {
                return Some(found);
            }
            dir = current.parent();
        }
        None
    }
}
