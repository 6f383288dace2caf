use crate::extensions::{
    ExtensionSet, default_reference_extensions_vec, default_source_extensions_vec,
};
use crate::listing::ListingOrder;
use crate::{ResolveError, Result};
use std::path::PathBuf;

/// Everything a single resolve run needs, gathered from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory whose file stems define the wanted keys.
    pub reference_dir: PathBuf,
    /// Directory searched for matching assets.
    pub source_dir: PathBuf,
    /// Directory receiving the copies.
    pub dest_dir: PathBuf,
    /// Raw reference extensions, normalised when the run starts.
    pub reference_extensions: Vec<String>,
    /// Raw source extensions, normalised when the run starts.
    pub source_extensions: Vec<String>,
    /// Print planned copies instead of copying.
    pub dry_run: bool,
    /// Visiting order for both directory listings.
    pub order: ListingOrder,
}

impl RunConfig {
    /// Configuration with the default extensions, copying in filesystem order.
    pub fn new(
        reference_dir: impl Into<PathBuf>,
        source_dir: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            reference_dir: reference_dir.into(),
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            reference_extensions: default_reference_extensions_vec(),
            source_extensions: default_source_extensions_vec(),
            dry_run: false,
            order: ListingOrder::default(),
        }
    }

    /// Replace the reference extensions.
    pub fn with_reference_extensions(mut self, extensions: Vec<String>) -> Self {
        self.reference_extensions = extensions;
        self
    }

    /// Replace the source extensions.
    pub fn with_source_extensions(mut self, extensions: Vec<String>) -> Self {
        self.source_extensions = extensions;
        self
    }

    /// Report copies instead of performing them.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sort listings by file name instead of using filesystem order
    pub fn with_sorted_listings(mut self, sorted: bool) -> Self {
        self.order = if sorted {
            ListingOrder::ByName
        } else {
            ListingOrder::Filesystem
        };
        self
    }

    /// Reject configurations that could never match anything.
    ///
    /// Directory existence is left to the listing step.
    pub fn validate(&self) -> Result<()> {
        if self.reference_extensions.is_empty() {
            return Err(ResolveError::InvalidConfig(
                "at least one reference extension is required".into(),
            ));
        }
        if self.source_extensions.is_empty() {
            return Err(ResolveError::InvalidConfig(
                "at least one source extension is required".into(),
            ));
        }
        Ok(())
    }

    /// Normalised reference extensions.
    pub fn reference_set(&self) -> ExtensionSet {
        ExtensionSet::normalize(&self.reference_extensions)
    }

    /// Normalised source extensions.
    pub fn source_set(&self) -> ExtensionSet {
        ExtensionSet::normalize(&self.source_extensions)
    }
}
