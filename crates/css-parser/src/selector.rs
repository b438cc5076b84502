//! Class selector scanning.

/// A class selector found in selector text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSelector {
    /// The class name, without the leading dot.
    pub name: String,
    /// Byte offset of the name (not the dot) within the selector text.
    pub offset: usize,
}

/// Finds every `.class` reference in a selector.
///
/// Skips quoted strings (attribute selectors) and comments, and requires an
/// identifier start after the dot so `4.5` in an odd selector is not taken
/// for a class.
pub fn class_selectors(selector: &str) -> Vec<ClassSelector> {
    let bytes = selector.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                let quote = bytes[i];
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
                i += 1;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i += 2;
            }
            b'.' => {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && is_ident_byte(bytes[end]) {
                    end += 1;
                }
                if end > start && is_ident_start(bytes[start]) {
                    out.push(ClassSelector {
                        name: selector[start..end].to_string(),
                        offset: start,
                    });
                }
                i = end.max(i + 1);
            }
            _ => i += 1,
        }
    }

    out
}

fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_' || byte == b'-'
}

fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-'
}
