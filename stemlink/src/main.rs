//! `stemlink` command line entry point.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use stemlink_core::extensions::{
    default_reference_extensions_vec, default_source_extensions_vec,
};
use stemlink_core::{RunConfig, run};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "stemlink", version)]
#[command(
    about = "Resolve assets from a source directory based on reference files"
)]
struct Cli {
    /// Directory containing reference files (keys are derived from these)
    #[arg(long)]
    reference_dir: PathBuf,

    /// Directory containing source assets to resolve from
    #[arg(long)]
    source_dir: PathBuf,

    /// Destination directory for resolved assets
    #[arg(long)]
    dest_dir: PathBuf,

    /// Reference file extensions, with or without a leading dot
    #[arg(
        long = "reference-ext",
        num_args = 1..,
        default_values_t = default_reference_extensions_vec()
    )]
    reference_ext: Vec<String>,

    /// Source file extensions, with or without a leading dot
    #[arg(
        long = "source-ext",
        num_args = 1..,
        default_values_t = default_source_extensions_vec()
    )]
    source_ext: Vec<String>,

    /// Show what would be copied without copying files
    #[arg(long)]
    dry_run: bool,

    /// Process both directories in file name order
    #[arg(long)]
    sorted: bool,

    /// Write a JSON report of the run to this path
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug); ignored when RUST_LOG is set
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn default_log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "stemlink=info,stemlink_core=info,warn",
            _ => "stemlink=debug,stemlink_core=debug,info",
        }
    }

    fn run_config(&self) -> RunConfig {
        RunConfig::new(&self.reference_dir, &self.source_dir, &self.dest_dir)
            .with_reference_extensions(self.reference_ext.clone())
            .with_source_extensions(self.source_ext.clone())
            .with_dry_run(self.dry_run)
            .with_sorted_listings(self.sorted)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.default_log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.run_config();
    debug!(?config, "starting run");

    let mut stdout = std::io::stdout().lock();
    let report = run(&config, &mut stdout).with_context(|| {
        format!(
            "failed to resolve assets from {} into {}",
            config.source_dir.display(),
            config.dest_dir.display()
        )
    })?;

    report
        .write_summary(&mut stdout)
        .context("failed to write summary")?;
    stdout.flush().context("failed to flush stdout")?;

    if let Some(path) = &cli.report {
        report
            .write_json(path)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        info!("Report written to {}", path.display());
    }

    Ok(())
}
