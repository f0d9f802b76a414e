//! Icon selection and installation.
//!
//! Handles:
//! - Ranking the icon candidates found in an extracted bundle
//! - Copying the chosen icon into the user's icon directory

use crate::config::IconConfig;
use crate::error::{AppdeskError, Result};
use crate::platform;
use std::fs::{self, File, FileTimes};
use std::path::{Path, PathBuf};
use tracing::debug;

fn lowercase_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Choose the best icon from `candidates` for an application called `app_name`.
///
/// 1. PNG files win over other formats when any are present.
/// 2. A file whose name contains the app name (case-insensitive) is next.
/// 3. Then a file whose name contains a generic hint (`icon`, `logo`, ...),
///    trying hints in order.
/// 4. Otherwise the first remaining candidate.
///
/// The result depends only on the inputs and their order.
pub fn select_icon<'a>(candidates: &'a [PathBuf], app_name: &str) -> Option<&'a Path> {
    let preferred: Vec<&Path> = candidates
        .iter()
        .map(PathBuf::as_path)
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(IconConfig::PREFERRED_EXTENSION))
        })
        .collect();

    let pool: Vec<&Path> = if preferred.is_empty() {
        candidates.iter().map(PathBuf::as_path).collect()
    } else {
        preferred
    };

    let app_name = app_name.to_lowercase();
    if let Some(found) = pool
        .iter()
        .find(|path| lowercase_file_name(path).contains(&app_name))
    {
        return Some(*found);
    }

    IconConfig::GENERIC_HINTS
        .iter()
        .find_map(|hint| {
            pool.iter()
                .find(|path| lowercase_file_name(path).contains(hint))
                .copied()
        })
        .or_else(|| pool.first().copied())
}

/// Installs icons into a persistent directory.
#[derive(Debug, Clone)]
pub struct IconInstaller {
    icon_dir: PathBuf,
}

impl IconInstaller {
    /// Create an installer that writes into `icon_dir`.
    pub fn new(icon_dir: impl AsRef<Path>) -> Self {
        Self {
            icon_dir: icon_dir.as_ref().to_path_buf(),
        }
    }

    /// Create an installer for `~/.local/share/icons`.
    pub fn for_current_user() -> Result<Self> {
        Ok(Self::new(platform::user_icon_dir()?))
    }

    pub fn icon_dir(&self) -> &Path {
        &self.icon_dir
    }

    /// Destination path for an icon installed under `stem`.
    pub fn destination(&self, source: &Path, stem: &str) -> PathBuf {
        match source.extension() {
            Some(ext) => self
                .icon_dir
                .join(format!("{}.{}", stem, ext.to_string_lossy())),
            None => self.icon_dir.join(stem),
        }
    }

    /// Copy `source` into the icon directory as `<stem>.<ext>`.
    ///
    /// An existing file with the same name is replaced. Permissions and
    /// access/modification times are carried over. Every failure is
    /// reported as a recoverable [`AppdeskError::IconInstall`].
    pub fn install(&self, source: &Path, stem: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.icon_dir).map_err(|e| AppdeskError::IconInstall {
            message: format!("create {}: {}", self.icon_dir.display(), e),
        })?;

        let dest = self.destination(source, stem);
        fs::copy(source, &dest).map_err(|e| AppdeskError::IconInstall {
            message: format!("{} -> {}: {}", source.display(), dest.display(), e),
        })?;

        if let Err(e) = copy_file_times(source, &dest) {
            debug!("Could not preserve timestamps on {}: {}", dest.display(), e);
        }

        debug!("Installed icon {} -> {}", source.display(), dest.display());
        Ok(dest)
    }
}

fn copy_file_times(source: &Path, dest: &Path) -> std::io::Result<()> {
    let metadata = fs::metadata(source)?;
    let times = FileTimes::new()
        .set_accessed(metadata.accessed()?)
        .set_modified(metadata.modified()?);
    File::options().write(true).open(dest)?.set_times(times)
}
