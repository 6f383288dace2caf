//! The end-to-end run: index sources, resolve references, copy matches.

use crate::config::RunConfig;
use crate::copier::{CopyPlan, Copier};
use crate::indexer::SourceIndexer;
use crate::resolver::{AssetResolver, Resolution};
use crate::{ResolveError, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// What a run did, in the order it happened.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Whether copies were only reported.
    pub dry_run: bool,
    /// Resolved assets and missing keys.
    pub resolution: Resolution,
    /// Copies performed, or planned in dry-run mode.
    pub copies: Vec<CopyPlan>,
    /// Source files shadowed by a later file with the same stem.
    pub stem_collisions: usize,
}

impl RunReport {
    /// Number of resolved assets.
    pub fn resolved_count(&self) -> usize {
        self.resolution.resolved.len()
    }

    /// Number of unresolved keys.
    pub fn missing_count(&self) -> usize {
        self.resolution.missing.len()
    }

    /// Print the resolved/missing counts and the unresolved keys.
    pub fn write_summary<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "Resolved assets: {}", self.resolved_count())?;
        writeln!(out, "Missing assets: {}", self.missing_count())?;

        if !self.resolution.missing.is_empty() {
            writeln!(out, "Unresolved keys:")?;
            for key in &self.resolution.missing {
                writeln!(out, "  - {key}")?;
            }
        }
        Ok(())
    }

    /// Write the report as pretty JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ResolveError::Report {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Run the whole pipeline. Dry-run lines go to `out`.
///
/// Nothing is retried or rolled back: a failed copy leaves earlier copies in
/// place and returns the error.
pub fn run<W: Write>(config: &RunConfig, out: &mut W) -> Result<RunReport> {
    config.validate()?;

    let reference_exts = config.reference_set();
    let source_exts = config.source_set();

    let index = SourceIndexer::new(source_exts)
        .with_order(config.order)
        .index(&config.source_dir)?;

    let resolution = AssetResolver::new(reference_exts)
        .with_order(config.order)
        .resolve(&config.reference_dir, &index)?;

    let copies = Copier::new(&config.dest_dir)
        .with_dry_run(config.dry_run)
        .copy_all(&resolution.resolved, out)?;

    info!(
        "Run complete: {} resolved, {} missing{}",
        resolution.resolved.len(),
        resolution.missing.len(),
        if config.dry_run { " (dry run)" } else { "" }
    );

    Ok(RunReport {
        dry_run: config.dry_run,
        resolution,
        copies,
        stem_collisions: index.collisions(),
    })
}
