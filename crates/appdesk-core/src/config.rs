//! Centralized configuration for appdesk.
//!
//! Constants for bundle extraction, icon discovery and desktop entry output.

use std::time::Duration;

/// Bundle extraction configuration.
pub struct ExtractionConfig;

impl ExtractionConfig {
    /// Argument that makes an AppImage unpack itself into the working directory.
    pub const EXTRACT_FLAG: &'static str = "--appimage-extract";
    /// Directory the AppImage runtime creates when extracting.
    pub const ROOT_DIR_NAME: &'static str = "squashfs-root";
    pub const TIMEOUT: Duration = Duration::from_secs(30);
    pub const TEMP_DIR_PREFIX: &'static str = "appdesk-";
    /// Removal attempts for a temp dir left behind by a killed extraction.
    pub const CLEANUP_ATTEMPTS: u32 = 5;
    pub const CLEANUP_RETRY_DELAY: Duration = Duration::from_millis(50);
}

/// Icon discovery and selection configuration.
pub struct IconConfig;

impl IconConfig {
    /// Recognised icon extensions, in scan order.
    pub const EXTENSIONS: [&'static str; 4] = ["png", "svg", "xpm", "ico"];
    pub const PREFERRED_EXTENSION: &'static str = "png";
    /// Generic file name fragments tried when no icon mentions the app name.
    pub const GENERIC_HINTS: [&'static str; 4] = ["icon", "logo", "app", "main"];
}

/// Desktop entry configuration.
pub struct EntryConfig;

impl EntryConfig {
    pub const EXTENSION: &'static str = "desktop";
    pub const GROUP_HEADER: &'static str = "[Desktop Entry]";
    pub const VERSION: &'static str = "1.0";
    pub const DEFAULT_CATEGORIES: &'static str = "Application;";
    /// File stem used when neither the app name nor the bundle name survive sanitizing.
    pub const FALLBACK_FILE_STEM: &'static str = "application";
}
