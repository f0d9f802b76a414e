//! Platform abstraction layer.
//!
//! All `#[cfg]` blocks for OS-specific behavior live in this module rather
//! than being scattered throughout the codebase.
//!
//! - `paths` - XDG launcher and icon directories
//! - `permissions` - Executable bits and write-access checks
//! - `process` - Process-group termination
//!
//! Desktop entries are a freedesktop.org concept, so only Linux (and other
//! XDG desktops on Unix) is fully supported. Other platforms build but the
//! permission helpers are no-ops.

pub mod paths;
pub mod permissions;
pub mod process;

pub use paths::{launcher_dirs, user_apps_dir, user_icon_dir, LauncherScope};
pub use permissions::{is_writable, set_executable};
pub use process::kill_process_group;
