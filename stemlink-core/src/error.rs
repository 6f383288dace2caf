use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the resolve pipeline. Every variant is fatal to the run.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A reference or source directory does not exist.
    #[error("Directory does not exist: {}", path.display())]
    DirectoryNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// A reference or source path exists but is not a directory.
    #[error("Path is not a directory: {}", path.display())]
    NotADirectory {
        /// Offending path.
        path: PathBuf,
    },

    /// The directory itself could not be opened or listed.
    #[error("Failed to read directory {}", path.display())]
    ReadDir {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The destination directory could not be created.
    #[error("Failed to create destination directory {}", path.display())]
    CreateDestination {
        /// Destination directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Copying one asset failed; no further assets are copied.
    #[error("Failed to copy {} -> {}", from.display(), to.display())]
    Copy {
        /// Source asset.
        from: PathBuf,
        /// Intended destination file.
        to: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The copy succeeded but its timestamps could not be applied.
    #[error("Failed to preserve timestamps on {}", path.display())]
    Metadata {
        /// Destination file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing dry-run lines to the output failed.
    #[error("Failed to write output")]
    Output(#[source] std::io::Error),

    /// The run configuration can never match anything.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The JSON report could not be written.
    #[error("Failed to write report {}", path.display())]
    Report {
        /// Report path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The report could not be encoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ResolveError>;
