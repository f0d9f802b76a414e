//! Desktop entry (.desktop file) generation.
//!
//! Implements the subset of the XDG Desktop Entry Specification that menu
//! launchers need. The key order is fixed; some shells are picky about it.

use crate::config::EntryConfig;
use crate::error::{AppdeskError, Result};
use crate::metadata::BundleMetadata;
use crate::naming::first_safe_stem;
use crate::platform;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A launcher entry ready to be serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    /// Entry name (shown in menus).
    pub name: String,
    pub comment: String,
    /// Executable command.
    pub exec: String,
    /// Icon path. The `Icon=` line is omitted when `None`.
    pub icon: Option<String>,
    /// Categories (semicolon-separated, as given).
    pub categories: String,
    /// Whether to run in a terminal.
    pub terminal: bool,
    pub startup_notify: bool,
}

impl From<&BundleMetadata> for DesktopEntry {
    fn from(record: &BundleMetadata) -> Self {
        Self {
            name: record.name.clone(),
            comment: record.comment.clone(),
            exec: record.exec.to_string_lossy().into_owned(),
            icon: record
                .icon
                .as_ref()
                .map(|icon| icon.to_string_lossy().into_owned()),
            categories: record.categories.clone(),
            terminal: false,
            startup_notify: true,
        }
    }
}

impl fmt::Display for DesktopEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", EntryConfig::GROUP_HEADER)?;
        writeln!(f, "Version={}", EntryConfig::VERSION)?;
        writeln!(f, "Type=Application")?;
        writeln!(f, "Name={}", self.name)?;
        writeln!(f, "Comment={}", self.comment)?;
        writeln!(f, "Exec={}", self.exec)?;
        if let Some(ref icon) = self.icon {
            writeln!(f, "Icon={}", icon)?;
        }
        writeln!(f, "Terminal={}", self.terminal)?;
        writeln!(f, "Categories={}", self.categories)?;
        writeln!(f, "StartupNotify={}", self.startup_notify)
    }
}

impl DesktopEntry {
    /// Write the desktop entry to `path`, replacing any existing file, and
    /// mark it executable (desktop shells only trust executable entries).
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppdeskError::io("create directory", parent, e))?;
        }

        let mut file = fs::File::create(path)
            .map_err(|e| AppdeskError::io("create desktop file", path, e))?;
        file.write_all(self.to_string().as_bytes())
            .map_err(|e| AppdeskError::io("write desktop file", path, e))?;

        platform::set_executable(path)?;

        debug!("Wrote desktop entry to {:?}", path);
        Ok(())
    }
}

/// Writes launcher entries into an applications directory.
#[derive(Debug, Clone)]
pub struct LauncherWriter {
    apps_dir: PathBuf,
}

impl LauncherWriter {
    pub fn new(apps_dir: impl AsRef<Path>) -> Self {
        Self {
            apps_dir: apps_dir.as_ref().to_path_buf(),
        }
    }

    /// Writer for `~/.local/share/applications`.
    pub fn for_current_user() -> Result<Self> {
        Ok(Self::new(platform::user_apps_dir()?))
    }

    pub fn apps_dir(&self) -> &Path {
        &self.apps_dir
    }

    /// Output path for a record: `<sanitized name>.desktop`.
    ///
    /// Falls back to the sanitized bundle stem, then to a fixed stem, when
    /// the name sanitizes to nothing.
    pub fn entry_path(&self, record: &BundleMetadata) -> PathBuf {
        let bundle_stem = record.bundle_stem();
        let stem = first_safe_stem(
            [record.name.as_str(), bundle_stem.as_str()],
            EntryConfig::FALLBACK_FILE_STEM,
        );
        self.apps_dir
            .join(format!("{}.{}", stem, EntryConfig::EXTENSION))
    }

    /// Serialize `record` into the applications directory.
    ///
    /// Any failure is fatal: the caller gets an [`AppdeskError::Io`].
    pub fn write(&self, record: &BundleMetadata) -> Result<PathBuf> {
        let path = self.entry_path(record);
        DesktopEntry::from(record).write_to_file(&path)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record() -> BundleMetadata {
        BundleMetadata::seeded("/home/u/MyApp.AppImage")
    }

    #[test]
    fn test_render_without_icon() {
        let content = DesktopEntry::from(&record()).to_string();
        assert_eq!(
            content,
            "[Desktop Entry]\n\
             Version=1.0\n\
             Type=Application\n\
             Name=MyApp\n\
             Comment=\n\
             Exec=/home/u/MyApp.AppImage\n\
             Terminal=false\n\
             Categories=Application;\n\
             StartupNotify=true\n"
        );
        assert!(!content.contains("Icon="));
    }

    #[test]
    fn test_render_with_icon_in_fixed_position() {
        let record = record().with_icon("/home/u/.local/share/icons/MyApp.png");
        let content = DesktopEntry::from(&record).to_string();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[5], "Exec=/home/u/MyApp.AppImage");
        assert_eq!(lines[6], "Icon=/home/u/.local/share/icons/MyApp.png");
        assert_eq!(lines[7], "Terminal=false");
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn test_entry_path_sanitizes_name() {
        let writer = LauncherWriter::new("/apps");
        let mut record = record();
        record.name = "Cool App: Deluxe!".into();
        assert_eq!(
            writer.entry_path(&record),
            PathBuf::from("/apps/Cool-App-Deluxe.desktop")
        );
    }

    #[test]
    fn test_entry_path_falls_back_to_bundle_stem() {
        let writer = LauncherWriter::new("/apps");
        let mut record = record();
        record.name = "???".into();
        assert_eq!(writer.entry_path(&record), PathBuf::from("/apps/MyApp.desktop"));
    }

    #[test]
    fn test_write_creates_dir_and_sets_permissions() {
        let temp_dir = TempDir::new().unwrap();
        let apps = temp_dir.path().join("nested/applications");
        let path = LauncherWriter::new(&apps).write(&record()).unwrap();

        assert_eq!(path, apps.join("MyApp.desktop"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Name=MyApp"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o755, 0o755);
        }
    }

    #[test]
    fn test_write_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let existing = temp_dir.path().join("MyApp.desktop");
        fs::write(&existing, "stale").unwrap();

        LauncherWriter::new(temp_dir.path()).write(&record()).unwrap();
        let content = fs::read_to_string(&existing).unwrap();
        assert!(content.starts_with("[Desktop Entry]\n"));
        assert!(!content.contains("stale"));
    }

    #[test]
    fn test_write_failure_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        // A file where the applications directory should be.
        let blocker = temp_dir.path().join("applications");
        fs::write(&blocker, "").unwrap();

        let err = LauncherWriter::new(&blocker).write(&record()).unwrap_err();
        assert!(matches!(err, AppdeskError::Io { .. }));
        assert!(!err.is_recoverable());
    }
}
