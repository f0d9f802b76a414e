//! Filesystem-safe name normalization.
//!
//! Turns display names such as `My App (Beta)` into file stems such as
//! `My-App-Beta` for desktop entries and installed icons.

use regex::Regex;
use std::sync::LazyLock;

/// Regex for characters outside ASCII word characters, whitespace and hyphen.
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").unwrap());

/// Regex for runs of hyphens and whitespace.
static SEPARATOR_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-\s]+").unwrap());

/// Sanitize a display name for use as a file stem.
///
/// # Rules Applied
/// 1. Remove every character that is not an ASCII letter, digit, underscore,
///    whitespace or hyphen
/// 2. Collapse runs of hyphens and whitespace into a single hyphen
/// 3. Trim leading/trailing hyphens
///
/// Case is preserved and the result may be empty. Applying the function to
/// its own output returns the output unchanged.
///
/// # Examples
///
/// ```
/// use appdesk_core::naming::sanitize_filename;
///
/// assert_eq!(sanitize_filename("My App"), "My-App");
/// assert_eq!(sanitize_filename("Cool App (Beta) v2.0"), "Cool-App-Beta-v20");
/// assert_eq!(sanitize_filename("  --Editor--  "), "Editor");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let stripped = DISALLOWED.replace_all(name, "");
    let collapsed = SEPARATOR_RUNS.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

/// Pick the first non-empty sanitized candidate, falling back to `fallback`.
pub fn first_safe_stem<'a>(candidates: impl IntoIterator<Item = &'a str>, fallback: &str) -> String {
    candidates
        .into_iter()
        .map(sanitize_filename)
        .find(|stem| !stem.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_basic() {
        assert_eq!(sanitize_filename("MyApp"), "MyApp");
        assert_eq!(sanitize_filename("My App"), "My-App");
        assert_eq!(sanitize_filename("my_app-2"), "my_app-2");
    }

    #[test]
    fn test_sanitize_special_chars() {
        assert_eq!(sanitize_filename("Krita: Digital Painting!"), "Krita-Digital-Painting");
        assert_eq!(sanitize_filename("a/b\\c"), "abc");
        assert_eq!(sanitize_filename("Café"), "Caf");
        assert_eq!(sanitize_filename("1.2.3"), "123");
    }

    #[test]
    fn test_sanitize_collapses_separators() {
        assert_eq!(sanitize_filename("a - - b"), "a-b");
        assert_eq!(sanitize_filename("a\t\nb"), "a-b");
        assert_eq!(sanitize_filename("a---b"), "a-b");
        assert_eq!(sanitize_filename("a__b"), "a__b");
    }

    #[test]
    fn test_sanitize_trim() {
        assert_eq!(sanitize_filename("-leading"), "leading");
        assert_eq!(sanitize_filename("trailing - "), "trailing");
        assert_eq!(sanitize_filename("!!!"), "");
        assert_eq!(sanitize_filename(""), "");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for input in [
            "My App",
            "  spaced   out  ",
            "Weird*&^%Name",
            "--x--y--",
            "Tabs\tand\nlines",
            "Ünïcödé Name",
            "snake_case_name",
        ] {
            let once = sanitize_filename(input);
            assert_eq!(sanitize_filename(&once), once, "input: {:?}", input);
        }
    }

    #[test]
    fn test_sanitize_output_charset() {
        let out = sanitize_filename("Ω≈ç√ a!@#$%^&*()+={}[]|:;\"'<>,.?/~` b");
        assert!(out
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
        assert_eq!(out, "a-b");
    }

    #[test]
    fn test_first_safe_stem() {
        assert_eq!(first_safe_stem(["My App", "bundle"], "application"), "My-App");
        assert_eq!(first_safe_stem(["???", "bundle"], "application"), "bundle");
        assert_eq!(first_safe_stem(["???", "!!!"], "application"), "application");
    }
}
