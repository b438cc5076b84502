//! Anchor search for line-accurate declarations.

/// Finds the first line containing `identifier` as a substring, returning
/// the 0-indexed line and the byte column of the match.
///
/// The search runs over the rendered stylesheet text, where the scoped
/// identifier is guaranteed to appear if the class survived processing.
/// Callers treat a miss as anchoring to the top of the file.
pub fn locate(identifier: &str, lines: &[&str]) -> Option<(usize, usize)> {
    if identifier.is_empty() {
        return None;
    }
    lines
        .iter()
        .enumerate()
        .find_map(|(line, text)| text.find(identifier).map(|column| (line, column)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_first_occurrence() {
        let lines = vec![".a {", "  color: red;", "}", ".b_12345678 {", "}"];
        assert_eq!(locate("b_12345678", &lines), Some((3, 1)));
        assert_eq!(locate(".a", &lines), Some((0, 0)));
    }

    #[test]
    fn test_earlier_line_wins() {
        let lines = vec![".x .y {", ".y {"];
        assert_eq!(locate(".y", &lines), Some((0, 3)));
    }

    #[test]
    fn test_miss() {
        let lines = vec![".a {}"];
        assert_eq!(locate("missing", &lines), None);
        assert_eq!(locate("x", &[]), None);
        assert_eq!(locate("", &lines), None);
    }
}
