//! Extension normalisation and matching.
//!
//! User supplied extensions arrive in any shape (`png`, `.PNG`, `JPG`). They
//! are folded into a single canonical form, lowercase with a leading dot, so
//! that matching a path is a plain set lookup.

use std::collections::BTreeSet;
use std::path::Path;

/// Extensions considered reference files when none are given.
pub const DEFAULT_REFERENCE_EXTENSIONS: &[&str] = &[".png"];

/// Extensions considered source assets when none are given.
pub const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg"];

/// Owned variant of [`DEFAULT_REFERENCE_EXTENSIONS`] for argument defaults.
pub fn default_reference_extensions_vec() -> Vec<String> {
    DEFAULT_REFERENCE_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

/// Owned variant of [`DEFAULT_SOURCE_EXTENSIONS`] for argument defaults.
pub fn default_source_extensions_vec() -> Vec<String> {
    DEFAULT_SOURCE_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

/// A set of lowercase, dot-prefixed extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSet {
    entries: BTreeSet<String>,
}

impl ExtensionSet {
    /// Normalise `extensions` into a set.
    ///
    /// Entries already starting with `.` are only lowercased, everything else
    /// gets a `.` prepended first. Shapes such as `..png` are not rejected.
    pub fn normalize<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = extensions
            .into_iter()
            .map(|ext| normalize_extension(ext.as_ref()))
            .collect();
        Self { entries }
    }

    /// Whether `ext` (already normalised) is part of the set.
    pub fn contains(&self, ext: &str) -> bool {
        self.entries.contains(ext)
    }

    /// Whether the final extension of `path` is part of the set.
    pub fn matches(&self, path: &Path) -> bool {
        path_extension(path).is_some_and(|ext| self.contains(&ext))
    }

    /// Number of distinct extensions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no extensions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Extensions in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

fn normalize_extension(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_lowercase()
    } else {
        format!(".{}", ext.to_lowercase())
    }
}

/// Final extension of `path` in normalised form, `None` when there is none.
pub fn path_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

/// File name without its final extension, the join key between directories.
pub fn path_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}
