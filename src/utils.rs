//! Common utility functions shared across the codebase.

use std::path::{Component, Path};

/// Checks if the text contains at least one Unicode letter or digit.
///
/// Returns false for empty strings, whitespace, or pure punctuation/symbols.
///
/// # Examples
///
/// ```
/// use strloc::utils::contains_letter_or_digit;
///
/// assert!(contains_letter_or_digit("Hello"));
/// assert!(contains_letter_or_digit("你好"));
/// assert!(contains_letter_or_digit("404"));
/// assert!(!contains_letter_or_digit("---"));
/// assert!(!contains_letter_or_digit(": "));
/// assert!(!contains_letter_or_digit(""));
/// ```
pub fn contains_letter_or_digit(text: &str) -> bool {
    text.chars().any(char::is_alphanumeric)
}

/// True for the empty string and strings made only of whitespace.
pub fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Lexically normalize a path into a `/`-separated string.
///
/// `.` segments are dropped and `..` pops the previous segment when there is
/// one. The filesystem is never consulted, so the path does not need to exist.
///
/// # Examples
///
/// ```
/// use strloc::utils::normalize_path;
///
/// assert_eq!(normalize_path("./src/../lib/./i18n.ts"), "lib/i18n.ts");
/// assert_eq!(normalize_path("../shared/a.ts"), "../shared/a.ts");
/// ```
pub fn normalize_path(path: impl AsRef<Path>) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut absolute = false;

    for component in path.as_ref().components() {
        match component {
            Component::RootDir => absolute = true,
            Component::Prefix(prefix) => parts.push(prefix.as_os_str().to_string_lossy().into()),
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.last().is_some_and(|p| p != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..".to_string());
                }
            }
            Component::Normal(part) => parts.push(part.to_string_lossy().into()),
        }
    }

    let joined = parts.join("/");
    if absolute {
        format!("/{}", joined)
    } else {
        joined
    }
}
