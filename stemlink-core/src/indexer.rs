use crate::extensions::{ExtensionSet, path_stem};
use crate::listing::{ListingOrder, regular_files};
use crate::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Stem to path lookup over one source directory.
///
/// When two files share a stem the one listed later wins.
#[derive(Debug, Clone, Default)]
pub struct SourceIndex {
    entries: HashMap<String, PathBuf>,
    collisions: usize,
}

impl SourceIndex {
    /// Record `stem -> path`, replacing any earlier entry.
    pub fn insert(&mut self, stem: String, path: PathBuf) {
        if let Some(previous) = self.entries.insert(stem, path) {
            self.collisions += 1;
            debug!("Stem collision, replacing {}", previous.display());
        }
    }

    /// Path indexed under `stem`.
    pub fn get(&self, stem: &str) -> Option<&Path> {
        self.entries.get(stem).map(PathBuf::as_path)
    }

    /// Number of distinct stems.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no source file qualified.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries that were overwritten by a later file with the same stem.
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}

/// Builds a [`SourceIndex`] from the direct children of a directory.
#[derive(Debug, Clone)]
pub struct SourceIndexer {
    extensions: ExtensionSet,
    order: ListingOrder,
}

impl SourceIndexer {
    /// Indexer accepting files whose extension is in `extensions`.
    pub fn new(extensions: ExtensionSet) -> Self {
        Self {
            extensions,
            order: ListingOrder::default(),
        }
    }

    /// Set the order in which directory entries are visited
    pub fn with_order(mut self, order: ListingOrder) -> Self {
        self.order = order;
        self
    }

    /// Index the qualifying files directly inside `source_dir`.
    pub fn index<P: AsRef<Path>>(&self, source_dir: P) -> Result<SourceIndex> {
        let source_dir = source_dir.as_ref();
        info!("Indexing source assets in: {}", source_dir.display());

        let mut index = SourceIndex::default();
        let mut skipped = 0usize;

        for path in regular_files(source_dir, self.order)? {
            if !self.extensions.matches(&path) {
                skipped += 1;
                continue;
            }
            if let Some(stem) = path_stem(&path) {
                index.insert(stem, path);
            }
        }

        info!(
            "Source index complete: {} stems, {} skipped, {} collisions",
            index.len(),
            skipped,
            index.collisions()
        );

        Ok(index)
    }
}
