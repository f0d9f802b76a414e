//! The end-to-end pipeline: bundle in, desktop entry out.
//!
//! ```text
//! prepare bundle ─► extract ─► scan ─► parse descriptor ─► install icon ─► apply overrides ─► write
//!    (fatal)        (soft)            (soft)               (soft)                          (fatal)
//! ```
//!
//! Soft stages return ordinary `Result`s. [`absorb_recoverable`] is the one
//! place where a recoverable error is logged and turned into "keep the
//! previous record"; anything else propagates.

use crate::config::EntryConfig;
use crate::descriptor::read_descriptor;
use crate::entry::LauncherWriter;
use crate::error::Result;
use crate::extract::{self, Extractor};
use crate::icon::{select_icon, IconInstaller};
use crate::metadata::{BundleMetadata, Overrides};
use crate::naming::first_safe_stem;
use crate::scan::scan_extracted;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedEntry {
    /// Path of the written desktop entry.
    pub path: PathBuf,
    /// The metadata that was serialized.
    pub metadata: BundleMetadata,
}

/// Downgrade a recoverable error to a warning.
///
/// Returns `Ok(None)` after logging when the error is recoverable, and the
/// error itself otherwise.
pub fn absorb_recoverable<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_recoverable() => {
            warn!("{}", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Generates desktop entries for AppImage bundles.
#[derive(Debug, Clone)]
pub struct Generator {
    extractor: Extractor,
    icons: IconInstaller,
    writer: LauncherWriter,
}

impl Generator {
    /// Create a generator writing entries to `apps_dir` and icons to `icon_dir`.
    pub fn new(apps_dir: impl AsRef<Path>, icon_dir: impl AsRef<Path>) -> Self {
        Self {
            extractor: Extractor::new(),
            icons: IconInstaller::new(icon_dir),
            writer: LauncherWriter::new(apps_dir),
        }
    }

    /// Generator for the current user's XDG directories.
    pub fn for_current_user() -> Result<Self> {
        Ok(Self {
            extractor: Extractor::new(),
            icons: IconInstaller::for_current_user()?,
            writer: LauncherWriter::for_current_user()?,
        })
    }

    /// Write entries into `dir` instead.
    pub fn with_apps_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.writer = LauncherWriter::new(dir);
        self
    }

    /// Install icons into `dir` instead.
    pub fn with_icon_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.icons = IconInstaller::new(dir);
        self
    }

    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Set the wall-clock limit for the bundle's self-extraction.
    pub fn with_extract_timeout(mut self, timeout: Duration) -> Self {
        self.extractor = self.extractor.with_timeout(timeout);
        self
    }

    pub fn apps_dir(&self) -> &Path {
        self.writer.apps_dir()
    }

    pub fn icon_dir(&self) -> &Path {
        self.icons.icon_dir()
    }

    /// Collect metadata for a bundle without writing an entry.
    ///
    /// Only an invalid bundle path (or a failure to make it executable) is
    /// an error; problems during extraction, parsing or icon installation
    /// are logged and leave the record at its previous stage. The icon, if
    /// any, is installed as a side effect.
    pub async fn inspect(&self, bundle: &Path) -> Result<BundleMetadata> {
        let exec = extract::prepare_bundle(bundle)?;
        let seeded = BundleMetadata::seeded(&exec);

        let Some(extracted) = absorb_recoverable(self.extractor.extract(&exec).await)? else {
            return Ok(seeded);
        };

        let scan = scan_extracted(extracted.root());
        debug!(
            "Scan of {}: descriptor={:?}, {} icon candidate(s)",
            extracted.root().display(),
            scan.descriptor,
            scan.icon_candidates.len()
        );

        let described = match scan.descriptor {
            Some(ref path) => match absorb_recoverable(read_descriptor(path))? {
                Some(fields) if fields.is_empty() => {
                    debug!("Descriptor {} has no usable keys", path.display());
                    seeded
                }
                Some(fields) => seeded.with_descriptor(&fields),
                None => seeded,
            },
            None => seeded,
        };

        let record = match select_icon(&scan.icon_candidates, &described.name) {
            Some(best) => {
                let bundle_stem = described.bundle_stem();
                let stem = first_safe_stem(
                    [described.name.as_str(), bundle_stem.as_str()],
                    EntryConfig::FALLBACK_FILE_STEM,
                );
                match absorb_recoverable(self.icons.install(best, &stem))? {
                    Some(installed) => described.with_icon(installed),
                    None => described,
                }
            }
            None => described,
        };

        debug!("Removing extraction directory {}", extracted.temp_path().display());
        drop(extracted);

        Ok(record)
    }

    /// Inspect `bundle`, apply `overrides` and write the desktop entry.
    pub async fn generate(&self, bundle: &Path, overrides: &Overrides) -> Result<GeneratedEntry> {
        let inspected = self.inspect(bundle).await?;
        let metadata = if overrides.is_empty() {
            inspected
        } else {
            debug!("Applying overrides: {:?}", overrides);
            inspected.with_overrides(overrides)
        };
        let path = self.writer.write(&metadata)?;
        info!("Desktop file created: {}", path.display());
        Ok(GeneratedEntry { path, metadata })
    }
}
