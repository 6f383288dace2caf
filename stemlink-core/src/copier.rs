use crate::{ResolveError, Result};
use filetime::FileTime;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One file copy, planned or performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyPlan {
    /// Asset being copied.
    pub source: PathBuf,
    /// `destination_dir` joined with the asset's file name.
    pub destination: PathBuf,
}

impl CopyPlan {
    /// Target `destination_dir/<basename of source>`; `None` for paths without a file name.
    pub fn new(source: &Path, destination_dir: &Path) -> Option<Self> {
        let name = source.file_name()?;
        Some(Self {
            source: source.to_path_buf(),
            destination: destination_dir.join(name),
        })
    }
}

/// Materialises resolved assets into a destination directory.
#[derive(Debug, Clone)]
pub struct Copier {
    destination_dir: PathBuf,
    dry_run: bool,
}

impl Copier {
    /// Copier targeting `destination_dir`, copying for real.
    pub fn new<P: Into<PathBuf>>(destination_dir: P) -> Self {
        Self {
            destination_dir: destination_dir.into(),
            dry_run: false,
        }
    }

    /// Report copies on the output writer instead of performing them
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Directory the assets land in.
    pub fn destination_dir(&self) -> &Path {
        &self.destination_dir
    }

    /// Whether copies are only reported.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Copy every asset into the destination directory.
    ///
    /// The directory is created first, even in dry-run mode. Existing files of
    /// the same name are overwritten. The first failure stops the loop and
    /// leaves earlier copies in place. In dry-run mode each copy is written to
    /// `out` as `[DRY RUN] <source> -> <destination>`.
    pub fn copy_all<I, P, W>(&self, assets: I, out: &mut W) -> Result<Vec<CopyPlan>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
        W: Write,
    {
        fs::create_dir_all(&self.destination_dir).map_err(|source| {
            ResolveError::CreateDestination {
                path: self.destination_dir.clone(),
                source,
            }
        })?;

        let mut plans = Vec::new();
        for asset in assets {
            let asset = asset.as_ref();
            let plan = CopyPlan::new(asset, &self.destination_dir).ok_or_else(|| {
                ResolveError::Copy {
                    from: asset.to_path_buf(),
                    to: self.destination_dir.clone(),
                    source: io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "asset path has no file name",
                    ),
                }
            })?;

            if self.dry_run {
                writeln!(
                    out,
                    "[DRY RUN] {} -> {}",
                    plan.source.display(),
                    plan.destination.display()
                )
                .map_err(ResolveError::Output)?;
            } else {
                copy_with_metadata(&plan)?;
            }
            plans.push(plan);
        }

        info!(
            "{} {} assets into {}",
            if self.dry_run { "Planned" } else { "Copied" },
            plans.len(),
            self.destination_dir.display()
        );

        Ok(plans)
    }
}

/// Copy contents, permission bits and access/modification times.
fn copy_with_metadata(plan: &CopyPlan) -> Result<()> {
    let copy_error = |source: io::Error| ResolveError::Copy {
        from: plan.source.clone(),
        to: plan.destination.clone(),
        source,
    };

    if is_same_file(&plan.source, &plan.destination) {
        return Err(copy_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "source and destination are the same file",
        )));
    }

    let bytes = fs::copy(&plan.source, &plan.destination).map_err(copy_error)?;
    debug!(
        "Copied {} ({} bytes) -> {}",
        plan.source.display(),
        bytes,
        plan.destination.display()
    );

    let metadata = fs::metadata(&plan.source).map_err(copy_error)?;
    filetime::set_file_times(
        &plan.destination,
        FileTime::from_last_access_time(&metadata),
        FileTime::from_last_modification_time(&metadata),
    )
    .map_err(|source| ResolveError::Metadata {
        path: plan.destination.clone(),
        source,
    })
}

/// Identity check on device and inode (file index on Windows), so hard links
/// and symlinks to the source are caught. A missing destination is never the
/// same file.
fn is_same_file(a: &Path, b: &Path) -> bool {
    same_file::is_same_file(a, b).unwrap_or(false)
}
