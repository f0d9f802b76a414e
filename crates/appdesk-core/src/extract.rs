//! Bundle validation and self-extraction.
//!
//! An AppImage unpacks itself when run with `--appimage-extract`, writing a
//! `squashfs-root` directory into its working directory. The extraction runs
//! inside a [`TempDir`] that is owned by the returned [`ExtractedBundle`], so
//! the unpacked tree disappears as soon as the caller drops it. When the
//! extraction fails or times out the directory is removed before returning.

use crate::config::ExtractionConfig;
use crate::error::{AppdeskError, Result};
use crate::platform;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tracing::{debug, warn};

/// Resolve a bundle path to an absolute, canonical path of a regular file.
///
/// # Errors
/// - [`AppdeskError::BundleNotFound`] if nothing exists at `path`
/// - [`AppdeskError::InvalidTarget`] if `path` is not a regular file
pub fn resolve_bundle(path: &Path) -> Result<PathBuf> {
    let resolved = match path.canonicalize() {
        Ok(resolved) => resolved,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let shown = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
            return Err(AppdeskError::BundleNotFound(shown));
        }
        Err(e) => return Err(AppdeskError::io("resolve bundle path", path, e)),
    };

    if !resolved.is_file() {
        return Err(AppdeskError::InvalidTarget(resolved));
    }

    Ok(resolved)
}

/// Resolve a bundle and make sure it can be executed.
pub fn prepare_bundle(path: &Path) -> Result<PathBuf> {
    let resolved = resolve_bundle(path)?;
    platform::set_executable(&resolved)?;
    Ok(resolved)
}

/// An unpacked bundle. The extracted tree is removed when this is dropped.
#[derive(Debug)]
pub struct ExtractedBundle {
    temp_dir: TempDir,
    root: PathBuf,
}

impl ExtractedBundle {
    /// The `squashfs-root` directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The scoped temporary directory holding the extraction.
    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }
}

/// Runs a bundle's self-extraction under a timeout.
#[derive(Debug, Clone)]
pub struct Extractor {
    timeout: Duration,
    temp_parent: Option<PathBuf>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            timeout: ExtractionConfig::TIMEOUT,
            temp_parent: None,
        }
    }
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wall-clock limit for the extraction process.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create temporary directories under `dir` instead of the system temp dir.
    pub fn with_temp_parent(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_parent = Some(dir.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn create_temp_dir(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(ExtractionConfig::TEMP_DIR_PREFIX);
        let created = match &self.temp_parent {
            Some(parent) => builder.tempdir_in(parent),
            None => builder.tempdir(),
        };
        created.map_err(|e| AppdeskError::Extraction {
            message: format!("could not create temporary directory: {}", e),
        })
    }

    /// Run `<bundle> --appimage-extract` in a fresh temporary directory.
    ///
    /// The bundle runs as the leader of its own process group. On timeout the
    /// whole group is killed and reaped, then the temporary directory is
    /// removed before returning. Every failure here (spawn error, non-zero
    /// exit, timeout, missing `squashfs-root`) is recoverable.
    pub async fn extract(&self, bundle: &Path) -> Result<ExtractedBundle> {
        let temp_dir = self.create_temp_dir()?;
        debug!(
            "Extracting {} into {}",
            bundle.display(),
            temp_dir.path().display()
        );

        let mut command = Command::new(bundle);
        command
            .arg(ExtractionConfig::EXTRACT_FLAG)
            .current_dir(temp_dir.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        command.process_group(0);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                discard_temp_dir(temp_dir).await;
                return Err(AppdeskError::Extraction {
                    message: format!("failed to run {}: {}", bundle.display(), e),
                });
            }
        };

        let mut stderr_pipe = child.stderr.take();
        let run = async {
            let mut captured = Vec::new();
            if let Some(pipe) = stderr_pipe.as_mut() {
                // Unreadable stderr only costs the error message.
                let _ = pipe.read_to_end(&mut captured).await;
            }
            child.wait().await.map(|status| (status, captured))
        };

        let (status, stderr) = match tokio::time::timeout(self.timeout, run).await {
            Ok(Ok(finished)) => finished,
            Ok(Err(e)) => {
                discard_temp_dir(temp_dir).await;
                return Err(AppdeskError::Extraction {
                    message: format!("failed to wait for {}: {}", bundle.display(), e),
                });
            }
            Err(_) => {
                debug!(
                    "Extraction of {} exceeded {:?}, killing it",
                    bundle.display(),
                    self.timeout
                );
                terminate(&mut child).await;
                discard_temp_dir(temp_dir).await;
                return Err(AppdeskError::Timeout(self.timeout));
            }
        };

        if !status.success() {
            discard_temp_dir(temp_dir).await;
            let stderr = String::from_utf8_lossy(&stderr);
            return Err(AppdeskError::Extraction {
                message: format!("extraction exited with {}: {}", status, stderr.trim()),
            });
        }

        let root = temp_dir.path().join(ExtractionConfig::ROOT_DIR_NAME);
        if !root.is_dir() {
            discard_temp_dir(temp_dir).await;
            return Err(AppdeskError::Extraction {
                message: format!("no {} directory was produced", ExtractionConfig::ROOT_DIR_NAME),
            });
        }

        Ok(ExtractedBundle { temp_dir, root })
    }
}

/// Kill the extraction process group and reap the direct child.
async fn terminate(child: &mut Child) {
    if let Some(pid) = child.id() {
        platform::kill_process_group(pid);
    }
    if let Err(e) = child.kill().await {
        debug!("Extraction child already exited: {}", e);
    }
}

/// Remove a temporary directory, retrying while killed helpers wind down.
async fn discard_temp_dir(temp_dir: TempDir) {
    let path = temp_dir.path().to_path_buf();

    for _ in 1..ExtractionConfig::CLEANUP_ATTEMPTS {
        match tokio::fs::remove_dir_all(&path).await {
            Ok(()) => break,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => break,
            Err(e) => {
                debug!("Retrying removal of {}: {}", path.display(), e);
                tokio::time::sleep(ExtractionConfig::CLEANUP_RETRY_DELAY).await;
            }
        }
    }

    // Last attempt; a directory already removed above reports NotFound.
    if let Err(e) = temp_dir.close() {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!("Could not remove temporary directory {}: {}", path.display(), e);
        }
    }
}
