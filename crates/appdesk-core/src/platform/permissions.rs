//! Platform-specific file permission handling.

use crate::error::{AppdeskError, Result};
use std::path::Path;
use tracing::debug;

/// Make a file executable.
///
/// # Platform Behavior
/// - **Linux/macOS**: Adds read and execute bits for everyone plus owner
///   write (`mode | 0o755`), leaving any other bits in place
/// - **Windows**: No-op (Windows determines executability by file extension)
///
/// # Errors
/// Returns an error if the file doesn't exist or permissions can't be changed.
pub fn set_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata =
            std::fs::metadata(path).map_err(|e| AppdeskError::io("read permissions", path, e))?;
        let mut permissions = metadata.permissions();
        permissions.set_mode(permissions.mode() | 0o755);
        std::fs::set_permissions(path, permissions)
            .map_err(|e| AppdeskError::io("set executable permissions", path, e))?;
        debug!("Set executable permissions on: {}", path.display());
    }

    #[cfg(not(unix))]
    {
        debug!("Skipping executable bit for: {}", path.display());
    }

    Ok(())
}

/// Check if a file has any executable bit set.
#[cfg(test)]
pub(crate) fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path)
            .map(|metadata| metadata.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    {
        path.exists()
    }
}

/// Check whether the current process may write into `path`.
///
/// Uses `access(2)` on Unix so that ownership, group membership and ACL-free
/// mode bits are evaluated by the kernel for the real user. Missing paths are
/// never writable.
pub fn is_writable(path: &Path) -> bool {
    if !path.exists() {
        return false;
    }

    #[cfg(unix)]
    {
        use nix::unistd::{access, AccessFlags};
        access(path, AccessFlags::W_OK).is_ok()
    }

    #[cfg(not(unix))]
    {
        std::fs::metadata(path)
            .map(|metadata| !metadata.permissions().readonly())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_set_executable() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("Tool.AppImage");
        File::create(&file_path).unwrap();

        set_executable(&file_path).unwrap();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            assert!(is_executable(&file_path));
            let mode = std::fs::metadata(&file_path).unwrap().permissions().mode();
            assert_eq!(mode & 0o755, 0o755);
        }
    }

    #[test]
    fn test_set_executable_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = set_executable(&temp_dir.path().join("missing"));

        #[cfg(unix)]
        assert!(matches!(result, Err(AppdeskError::Io { .. })));
        #[cfg(not(unix))]
        let _ = result;
    }

    #[test]
    fn test_is_executable_unix() {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let temp_dir = TempDir::new().unwrap();
            let file_path = temp_dir.path().join("plain");
            File::create(&file_path).unwrap();
            let mut perms = std::fs::metadata(&file_path).unwrap().permissions();
            perms.set_mode(0o644);
            std::fs::set_permissions(&file_path, perms).unwrap();

            assert!(!is_executable(&file_path));
        }
    }

    #[test]
    fn test_is_writable() {
        let temp_dir = TempDir::new().unwrap();
        assert!(is_writable(temp_dir.path()));
        assert!(!is_writable(&temp_dir.path().join("does-not-exist")));
    }
}
