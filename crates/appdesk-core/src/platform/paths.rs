//! Launcher and icon directory locations.
//!
//! Follows the XDG layout desktop environments scan for launchers:
//! - `~/.local/share/applications` for per-user desktop entries
//! - `/usr/share/applications` and `/usr/local/share/applications` system-wide
//! - `~/.local/share/icons` for installed icons

use crate::error::{AppdeskError, Result};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// System-wide applications directory (package-managed, usually needs root).
pub const SYSTEM_APPS_DIR: &str = "/usr/share/applications";

/// Locally installed system-wide applications directory.
pub const LOCAL_APPS_DIR: &str = "/usr/local/share/applications";

/// Which of the well-known launcher directories a path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LauncherScope {
    User,
    System,
    Local,
}

impl fmt::Display for LauncherScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LauncherScope::User => "user",
            LauncherScope::System => "system",
            LauncherScope::Local => "local",
        };
        f.write_str(label)
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppdeskError::Config {
        message: "Could not determine home directory".to_string(),
    })
}

fn local_share(home: &Path) -> PathBuf {
    home.join(".local").join("share")
}

/// Get the per-user applications directory (`~/.local/share/applications`).
///
/// This is the default output directory for generated entries.
pub fn user_apps_dir() -> Result<PathBuf> {
    Ok(local_share(&home_dir()?).join("applications"))
}

/// Get the per-user icon directory (`~/.local/share/icons`).
pub fn user_icon_dir() -> Result<PathBuf> {
    Ok(local_share(&home_dir()?).join("icons"))
}

/// The three well-known launcher directories, user directory first.
pub fn launcher_dirs() -> Result<Vec<(LauncherScope, PathBuf)>> {
    Ok(vec![
        (LauncherScope::User, user_apps_dir()?),
        (LauncherScope::System, PathBuf::from(SYSTEM_APPS_DIR)),
        (LauncherScope::Local, PathBuf::from(LOCAL_APPS_DIR)),
    ])
}
