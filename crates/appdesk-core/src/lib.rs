//! appdesk core - turns AppImage bundles into XDG desktop entries.
//!
//! The library unpacks a bundle with its own `--appimage-extract` mode, reads
//! the embedded `.desktop` descriptor, installs the best icon it can find and
//! writes a launcher entry for the desktop shell's application menu.
//!
//! # Example
//!
//! ```rust,ignore
//! use appdesk_core::{Generator, Overrides};
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> appdesk_core::Result<()> {
//!     let generator = Generator::for_current_user()?;
//!     let overrides = Overrides {
//!         categories: Some("Graphics;".into()),
//!         ..Overrides::default()
//!     };
//!
//!     let entry = generator
//!         .generate(Path::new("Krita.AppImage"), &overrides)
//!         .await?;
//!     println!("Desktop file created: {}", entry.path.display());
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod descriptor;
pub mod entry;
pub mod error;
pub mod extract;
pub mod generator;
pub mod icon;
pub mod metadata;
pub mod naming;
pub mod platform;
pub mod report;
pub mod scan;

// Re-export commonly used types
pub use descriptor::{parse_descriptor, DescriptorFields};
pub use entry::{DesktopEntry, LauncherWriter};
pub use error::{AppdeskError, Result};
pub use extract::{ExtractedBundle, Extractor};
pub use generator::{GeneratedEntry, Generator};
pub use icon::{select_icon, IconInstaller};
pub use metadata::{BundleMetadata, Overrides};
pub use naming::sanitize_filename;
pub use platform::LauncherScope;
pub use report::{report_launcher_dirs, DirectoryStatus};
