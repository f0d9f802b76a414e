//! The metadata record carried through the pipeline.
//!
//! A [`BundleMetadata`] is seeded from the bundle's file name and then
//! rebuilt once per enrichment stage. Each `with_*` method consumes the
//! previous record and returns a new one, so the precedence
//! (file name < descriptor < installed icon < user overrides) is visible in
//! the call chain.

use crate::config::EntryConfig;
use crate::descriptor::DescriptorFields;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Metadata describing one bundle's launcher entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleMetadata {
    /// Display name. Never empty.
    pub name: String,
    /// Absolute path of the bundle.
    pub exec: PathBuf,
    /// Installed icon path, if one was resolved.
    pub icon: Option<PathBuf>,
    pub comment: String,
    /// Semicolon-terminated category list.
    pub categories: String,
}

/// User-supplied values that take precedence over extracted metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub name: Option<String>,
    pub comment: Option<String>,
    pub categories: Option<String>,
}

impl Overrides {
    /// True when no override would change a record.
    pub fn is_empty(&self) -> bool {
        [&self.name, &self.comment, &self.categories]
            .iter()
            .all(|value| non_empty(value.as_deref()).is_none())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Display name derived from a bundle path: the file stem, else the file name.
pub fn stem_name(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| EntryConfig::FALLBACK_FILE_STEM.to_string())
}

impl BundleMetadata {
    /// Seed a record from the resolved bundle path alone.
    pub fn seeded(exec: impl Into<PathBuf>) -> Self {
        let exec = exec.into();
        Self {
            name: stem_name(&exec),
            exec,
            icon: None,
            comment: String::new(),
            categories: EntryConfig::DEFAULT_CATEGORIES.to_string(),
        }
    }

    /// The bundle's file stem, independent of the current display name.
    pub fn bundle_stem(&self) -> String {
        stem_name(&self.exec)
    }

    /// Apply fields parsed from an embedded descriptor.
    ///
    /// An empty `Name` or `Categories` value keeps the previous value; an
    /// empty `Comment` is taken as-is.
    pub fn with_descriptor(self, fields: &DescriptorFields) -> Self {
        Self {
            name: non_empty(fields.name.as_deref())
                .map(str::to_string)
                .unwrap_or(self.name),
            comment: fields.comment.clone().unwrap_or(self.comment),
            categories: non_empty(fields.categories.as_deref())
                .map(str::to_string)
                .unwrap_or(self.categories),
            ..self
        }
    }

    /// Record the path of the installed icon.
    pub fn with_icon(self, icon: impl Into<PathBuf>) -> Self {
        Self {
            icon: Some(icon.into()),
            ..self
        }
    }

    /// Apply user overrides. Absent or empty values are ignored.
    pub fn with_overrides(self, overrides: &Overrides) -> Self {
        let pick = |value: &Option<String>, current: String| {
            non_empty(value.as_deref())
                .map(str::to_string)
                .unwrap_or(current)
        };

        Self {
            name: pick(&overrides.name, self.name),
            comment: pick(&overrides.comment, self.comment),
            categories: pick(&overrides.categories, self.categories),
            ..self
        }
    }
}
