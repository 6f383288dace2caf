use crate::extensions::{ExtensionSet, path_stem};
use crate::indexer::SourceIndex;
use crate::listing::{ListingOrder, regular_files};
use crate::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome of joining reference stems against a [`SourceIndex`].
///
/// Both lists follow the order in which reference files were listed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Source assets whose stem matched a reference file.
    pub resolved: Vec<PathBuf>,
    /// Reference stems with no matching source asset.
    pub missing: Vec<String>,
}

impl Resolution {
    /// Whether every reference stem was resolved.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Number of reference files that took part in the join.
    pub fn total(&self) -> usize {
        self.resolved.len() + self.missing.len()
    }
}

/// Joins reference file stems against a [`SourceIndex`].
#[derive(Debug, Clone)]
pub struct AssetResolver {
    extensions: ExtensionSet,
    order: ListingOrder,
}

impl AssetResolver {
    /// Resolver considering reference files whose extension is in `extensions`.
    pub fn new(extensions: ExtensionSet) -> Self {
        Self {
            extensions,
            order: ListingOrder::default(),
        }
    }

    /// Set the order in which reference files are visited
    pub fn with_order(mut self, order: ListingOrder) -> Self {
        self.order = order;
        self
    }

    /// Look up every qualifying file of `reference_dir` in `index`.
    pub fn resolve<P: AsRef<Path>>(
        &self,
        reference_dir: P,
        index: &SourceIndex,
    ) -> Result<Resolution> {
        let reference_dir = reference_dir.as_ref();
        info!("Resolving references in: {}", reference_dir.display());

        let mut resolution = Resolution::default();

        for path in regular_files(reference_dir, self.order)? {
            if !self.extensions.matches(&path) {
                continue;
            }
            let Some(key) = path_stem(&path) else {
                continue;
            };

            match index.get(&key) {
                Some(asset) => {
                    debug!("Resolved {} -> {}", key, asset.display());
                    resolution.resolved.push(asset.to_path_buf());
                }
                None => {
                    debug!("No source asset for {}", key);
                    resolution.missing.push(key);
                }
            }
        }

        info!(
            "Resolution complete: {} resolved, {} missing",
            resolution.resolved.len(),
            resolution.missing.len()
        );

        Ok(resolution)
    }
}
