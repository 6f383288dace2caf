//! Non-recursive directory enumeration shared by the indexer and resolver.

use crate::{ResolveError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Ordering applied to a directory listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListingOrder {
    /// Whatever order the filesystem hands entries back in.
    #[default]
    Filesystem,
    /// Sorted by file name.
    ByName,
}

/// Check that `dir` exists and is a directory, following symlinks.
pub fn ensure_directory(dir: &Path) -> Result<()> {
    match fs::metadata(dir) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(ResolveError::NotADirectory {
            path: dir.to_path_buf(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(ResolveError::DirectoryNotFound {
                path: dir.to_path_buf(),
            })
        }
        Err(source) => Err(ResolveError::ReadDir {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

/// List the regular files directly inside `dir`.
///
/// Symlinks count when they resolve to a regular file. Directories, dangling
/// links, entries that cannot be inspected and other special entries are
/// skipped. Failing to open `dir` itself is a [`ResolveError::ReadDir`].
pub fn regular_files(dir: &Path, order: ListingOrder) -> Result<Vec<PathBuf>> {
    ensure_directory(dir)?;

    let mut walker = WalkDir::new(dir).min_depth(1).max_depth(1);
    if order == ListingOrder::ByName {
        walker = walker.sort_by_file_name();
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() > 0 => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
            Err(e) => {
                return Err(ResolveError::ReadDir {
                    path: dir.to_path_buf(),
                    source: e.into(),
                });
            }
        };
        let is_file = entry.file_type().is_file();
        let is_symlink = entry.path_is_symlink();
        let path = entry.into_path();

        if is_file {
            files.push(path);
            continue;
        }

        if is_symlink {
            match fs::metadata(&path) {
                Ok(target) if target.is_file() => {
                    debug!("Following symlink to file: {}", path.display());
                    files.push(path);
                }
                Ok(_) => debug!("Skipping symlink to non-file: {}", path.display()),
                Err(e) => warn!("Skipping dangling symlink {}: {}", path.display(), e),
            }
            continue;
        }

        debug!("Skipping non-file entry: {}", path.display());
    }

    Ok(files)
}
