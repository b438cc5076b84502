//! Stylesheet classification by filename suffix.

/// The rendering pipeline a stylesheet file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Plain CSS; rendered by pass-through.
    Css,
    /// Indented Sass syntax.
    Sass,
    /// SCSS superset syntax.
    Scss,
}

impl FileKind {
    /// Import extensions tried when resolving a specifier for this kind,
    /// in preference order.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            FileKind::Css => &[".css"],
            FileKind::Sass => &[".sass", ".scss"],
            FileKind::Scss => &[".scss", ".sass"],
        }
    }
}

/// Classifies a stylesheet file by suffix.
///
/// The predicate is fully ordered: `.scss` and `.sass` are checked before
/// `.css` so doubled extensions like `style.css.scss` classify as the
/// outermost dialect. Anything without a recognized suffix falls back to
/// SCSS, which also renders plain CSS.
pub fn classify(file_name: &str) -> FileKind {
    if file_name.ends_with(".scss") {
        FileKind::Scss
    } else if file_name.ends_with(".sass") {
        FileKind::Sass
    } else if file_name.ends_with(".css") {
        FileKind::Css
    } else {
        FileKind::Scss
    }
}
