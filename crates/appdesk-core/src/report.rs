//! Read-only report on the well-known launcher directories.

use crate::error::Result;
use crate::platform::{self, LauncherScope};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Existence and write access of one launcher directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryStatus {
    pub scope: LauncherScope,
    pub path: PathBuf,
    pub exists: bool,
    pub writable: bool,
}

impl DirectoryStatus {
    /// Inspect `path` without creating or modifying anything.
    pub fn probe(scope: LauncherScope, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let exists = path.exists();
        let writable = exists && platform::is_writable(&path);
        debug!(
            "{} launcher dir {}: exists={}, writable={}",
            scope,
            path.display(),
            exists,
            writable
        );
        Self {
            scope,
            path,
            exists,
            writable,
        }
    }
}

/// Report on the user, system and local launcher directories, in that order.
pub fn report_launcher_dirs() -> Result<Vec<DirectoryStatus>> {
    Ok(platform::launcher_dirs()?
        .into_iter()
        .map(|(scope, path)| DirectoryStatus::probe(scope, path))
        .collect())
}
