//! Naming conventions applied to raw class names.

use css_exports::ClassnameTransform;

/// Expands one raw class name into the spellings a convention emits.
///
/// The "both" conventions keep the original name first and append the
/// transformed spelling only when it differs, so a name that needs no
/// merging yields a single entry.
pub fn class_name_transform(name: &str, convention: ClassnameTransform) -> Vec<String> {
    match convention {
        ClassnameTransform::AsIs => vec![name.to_string()],
        ClassnameTransform::CamelCase => with_original(name, camel_case(name)),
        ClassnameTransform::CamelCaseOnly => vec![camel_case(name)],
        ClassnameTransform::Dashes => with_original(name, dashes_camel_case(name)),
        ClassnameTransform::DashesOnly => vec![dashes_camel_case(name)],
    }
}

fn with_original(name: &str, transformed: String) -> Vec<String> {
    if transformed == name {
        vec![name.to_string()]
    } else {
        vec![name.to_string(), transformed]
    }
}

/// Merges `-` and `_` separators, capitalizing each following segment head.
fn camel_case(name: &str) -> String {
    merge_separators(name, |ch| ch == '-' || ch == '_')
}

/// Merges `-` separators only; underscores stay as written.
fn dashes_camel_case(name: &str) -> String {
    merge_separators(name, |ch| ch == '-')
}

fn merge_separators(name: &str, is_separator: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if is_separator(ch) {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_as_is() {
        assert_eq!(
            class_name_transform("my-class", ClassnameTransform::AsIs),
            vec!["my-class"]
        );
    }

    #[test]
    fn test_camel_case_keeps_original() {
        assert_eq!(
            class_name_transform("my-class", ClassnameTransform::CamelCase),
            vec!["my-class", "myClass"]
        );
        assert_eq!(
            class_name_transform("my_class", ClassnameTransform::CamelCase),
            vec!["my_class", "myClass"]
        );
        // Nothing to merge, no duplicate entry.
        assert_eq!(
            class_name_transform("plain", ClassnameTransform::CamelCase),
            vec!["plain"]
        );
    }

    #[test]
    fn test_camel_case_only() {
        assert_eq!(
            class_name_transform("my-class", ClassnameTransform::CamelCaseOnly),
            vec!["myClass"]
        );
        assert_eq!(
            class_name_transform("a-b_c", ClassnameTransform::CamelCaseOnly),
            vec!["aBC"]
        );
    }

    #[test]
    fn test_dashes_leave_underscores() {
        assert_eq!(
            class_name_transform("my-class_name", ClassnameTransform::Dashes),
            vec!["my-class_name", "myClass_name"]
        );
        assert_eq!(
            class_name_transform("my-class_name", ClassnameTransform::DashesOnly),
            vec!["myClass_name"]
        );
    }

    #[test]
    fn test_consecutive_separators_collapse() {
        assert_eq!(
            class_name_transform("a--b", ClassnameTransform::CamelCaseOnly),
            vec!["aB"]
        );
    }
}
