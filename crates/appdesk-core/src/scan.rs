//! Discovery of descriptor and icon files in an extracted bundle.
//!
//! Walks are sorted by file name so that "first match" means the same file
//! on every run, independent of directory entry order on disk.

use crate::config::{EntryConfig, IconConfig};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files found in an extracted bundle tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub descriptor: Option<PathBuf>,
    pub icon_candidates: Vec<PathBuf>,
}

/// Scan an extracted root for a descriptor and icon candidates.
///
/// The tree is walked once; both lookups work on the same file list.
pub fn scan_extracted(root: &Path) -> ScanResult {
    let files = files_under(root);
    ScanResult {
        descriptor: pick_descriptor(root, &files),
        icon_candidates: group_icon_candidates(&files),
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

/// Regular files (following symlinks for the type check) under `root`, in
/// sorted depth-first order.
fn files_under(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file())
        .collect()
}

fn pick_descriptor(root: &Path, files: &[PathBuf]) -> Option<PathBuf> {
    let mut descriptors = files
        .iter()
        .filter(|path| has_extension(path, EntryConfig::EXTENSION));
    let first = descriptors.clone().next();

    descriptors
        .find(|path| path.parent() == Some(root))
        .or(first)
        .cloned()
}

fn group_icon_candidates(files: &[PathBuf]) -> Vec<PathBuf> {
    let mut groups = vec![Vec::new(); IconConfig::EXTENSIONS.len()];
    for path in files {
        if let Some(slot) = IconConfig::EXTENSIONS
            .iter()
            .position(|ext| has_extension(path, ext))
        {
            groups[slot].push(path.clone());
        }
    }
    groups.into_iter().flatten().collect()
}

/// Find the descriptor file.
///
/// A `*.desktop` file directly inside `root` wins; otherwise the first one
/// found anywhere below it. No ranking is applied between several matches.
pub fn find_descriptor(root: &Path) -> Option<PathBuf> {
    pick_descriptor(root, &files_under(root))
}

/// Collect every file with a recognised icon extension.
///
/// Results are grouped by extension in [`IconConfig::EXTENSIONS`] order and
/// in walk order within each group.
pub fn find_icon_candidates(root: &Path) -> Vec<PathBuf> {
    group_icon_candidates(&files_under(root))
}
