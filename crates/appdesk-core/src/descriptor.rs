//! Parsing of the `.desktop` descriptor embedded in a bundle.
//!
//! Only the handful of keys that feed a launcher entry are read. The parser
//! is line based and tolerant: anything it does not understand is skipped.

use crate::error::{AppdeskError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Fields read from a descriptor file. Missing keys stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorFields {
    pub name: Option<String>,
    pub comment: Option<String>,
    pub categories: Option<String>,
    /// Value of the `Icon` key. Usually a theme icon name rather than a path.
    pub icon_name: Option<String>,
}

impl DescriptorFields {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Parse descriptor text into fields.
///
/// Each line is trimmed; blank lines and `#` comments are skipped. A line
/// is a pair only if it contains `=`, and it is split on the first `=` so
/// values may contain further `=` characters. Keys are matched exactly
/// (`Name[de]` is not `Name`). Later keys overwrite earlier ones.
///
/// Group headers are not tracked: a key under `[Desktop Action ...]` counts
/// the same as one under `[Desktop Entry]`.
pub fn parse_descriptor(content: &str) -> DescriptorFields {
    let mut fields = DescriptorFields::default();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().to_string();

        match key.trim() {
            "Name" => fields.name = Some(value),
            "Comment" => fields.comment = Some(value),
            "Categories" => fields.categories = Some(value),
            "Icon" => fields.icon_name = Some(value),
            _ => {}
        }
    }

    fields
}

/// Read and parse a descriptor file.
///
/// Read failures and invalid UTF-8 are reported as a recoverable
/// [`AppdeskError::Descriptor`].
pub fn read_descriptor(path: &Path) -> Result<DescriptorFields> {
    let content = fs::read_to_string(path).map_err(|e| AppdeskError::Descriptor {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let fields = parse_descriptor(&content);
    debug!("Parsed descriptor {}: {:?}", path.display(), fields);
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_basic_entry() {
        let fields = parse_descriptor(
            "[Desktop Entry]\n\
             Type=Application\n\
             Name=My App\n\
             Comment=Does things\n\
             Exec=AppRun %U\n\
             Icon=my-app\n\
             Categories=Graphics;Photography;\n",
        );

        assert_eq!(fields.name.as_deref(), Some("My App"));
        assert_eq!(fields.comment.as_deref(), Some("Does things"));
        assert_eq!(fields.categories.as_deref(), Some("Graphics;Photography;"));
        assert_eq!(fields.icon_name.as_deref(), Some("my-app"));
    }

    #[test]
    fn test_split_on_first_separator() {
        let fields = parse_descriptor("Comment=A=B");
        assert_eq!(fields.comment.as_deref(), Some("A=B"));
    }

    #[test]
    fn test_comments_and_blank_lines_ignored() {
        let fields = parse_descriptor("#Name=X\n\n   # Comment=hidden\nName=Real\n");
        assert_eq!(fields.name.as_deref(), Some("Real"));
        assert_eq!(fields.comment, None);
    }

    #[test]
    fn test_commented_name_alone() {
        assert!(parse_descriptor("#Name=X").is_empty());
    }

    #[test]
    fn test_whitespace_trimmed() {
        let fields = parse_descriptor("   Name =  Spaced Out  \n");
        assert_eq!(fields.name.as_deref(), Some("Spaced Out"));
    }

    #[test]
    fn test_keys_are_case_sensitive_and_exact() {
        let fields = parse_descriptor("name=lower\nName[de]=Deutsch\nNAME=upper\nGenericName=Generic\n");
        assert!(fields.is_empty());
    }

    #[test]
    fn test_lines_without_separator_ignored() {
        let fields = parse_descriptor("just some text\nName=Ok\n");
        assert_eq!(fields.name.as_deref(), Some("Ok"));
    }

    #[test]
    fn test_later_keys_overwrite() {
        let fields = parse_descriptor("Name=First\nName=Second\n");
        assert_eq!(fields.name.as_deref(), Some("Second"));
    }

    #[test]
    fn test_later_groups_overwrite_earlier_keys() {
        let fields = parse_descriptor(
            "[Desktop Entry]\n\
             Name=Browser\n\
             Icon=browser\n\
             \n\
             [Desktop Action new-window]\n\
             Name=New Window\n\
             Icon=x\n",
        );
        assert_eq!(fields.name.as_deref(), Some("New Window"));
        assert_eq!(fields.icon_name.as_deref(), Some("x"));
    }

    #[test]
    fn test_group_headers_are_not_pairs() {
        let fields = parse_descriptor("[Name=Odd]\nComment=Ok\n");
        assert_eq!(fields.name, None);
        assert_eq!(fields.comment.as_deref(), Some("Ok"));
    }

    #[test]
    fn test_read_descriptor_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.desktop");
        fs::write(&path, "[Desktop Entry]\nName=From File\n").unwrap();

        let fields = read_descriptor(&path).unwrap();
        assert_eq!(fields.name.as_deref(), Some("From File"));
    }

    #[test]
    fn test_read_descriptor_invalid_utf8_is_recoverable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.desktop");
        fs::write(&path, [b'N', b'a', b'm', b'e', b'=', 0xff, 0xfe]).unwrap();

        let err = read_descriptor(&path).unwrap_err();
        assert!(matches!(err, AppdeskError::Descriptor { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_read_descriptor_missing_file_is_recoverable() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_descriptor(&temp_dir.path().join("missing.desktop")).unwrap_err();
        assert!(err.is_recoverable());
    }
}
