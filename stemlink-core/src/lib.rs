//! # stemlink core
//!
//! Pairs reference files with source assets that share the same file stem and
//! copies the matched assets into a destination directory.
//!
//! A run is a single synchronous pipeline:
//!
//! - [`extensions`]: normalise the reference and source extension lists
//! - [`indexer`]: map every qualifying source file's stem to its path
//! - [`resolver`]: look up each qualifying reference stem in that index
//! - [`copier`]: copy (or, in dry-run mode, report) the resolved assets
//! - [`pipeline`]: wire the steps together and summarise the outcome
//!
//! Directory listings are never recursive. Unresolved stems are reported, not
//! treated as failures; every I/O failure aborts the run.
//!
//! ```no_run
//! use stemlink_core::{RunConfig, run};
//!
//! let config = RunConfig::new("labels", "images", "out").with_dry_run(true);
//! let report = run(&config, &mut std::io::stdout())?;
//! report.write_summary(&mut std::io::stdout())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod copier;
pub mod error;
pub mod extensions;
pub mod indexer;
pub mod listing;
pub mod pipeline;
pub mod resolver;

pub use config::RunConfig;
pub use copier::{CopyPlan, Copier};
pub use error::*;
pub use extensions::ExtensionSet;
pub use indexer::{SourceIndex, SourceIndexer};
pub use listing::ListingOrder;
pub use pipeline::{RunReport, run};
pub use resolver::{AssetResolver, Resolution};
