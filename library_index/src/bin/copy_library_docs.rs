//! Copies the files of open access documents listed in the library
//! spreadsheet export into the documents directory.

use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use library_index::catalog::{LibraryConfig, collect_open_access_files, read_records};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "copy-library-docs", version, about = "Copy open access document files into the documents directory")]
struct Args {
    /// Preparation settings
    #[arg(long, env = "LIBRARY_CONFIG", default_value = "library-config.toml")]
    config: PathBuf,

    /// Don't copy anything, only report what would be copied
    #[arg(long)]
    dry_run: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = LibraryConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if args.dry_run {
        info!("This is a dry-run, no changes will be made");
    }

    let csv = File::open(&config.paths.library_index_csv)
        .with_context(|| format!("opening {}", config.paths.library_index_csv.display()))?;
    let records = read_records(csv)?;

    let summary = collect_open_access_files(&records, &config, args.dry_run).context("copying library documents")?;
    if summary.missing > 0 || summary.empty_filenames > 0 {
        info!("{} rows need attention, see the warnings above", summary.missing + summary.empty_filenames);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
