//! Builds `library-index.json` and `query-config.json` from the library
//! spreadsheet export.

use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use library_index::catalog::{self, LibraryConfig, prepare_library, read_records};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "create-library-index", version, about = "Create the library catalog from the spreadsheet export")]
struct Args {
    /// Preparation settings
    #[arg(long, env = "LIBRARY_CONFIG", default_value = "library-config.toml")]
    config: PathBuf,

    /// Run every step and report, without writing any file
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

    info!("Loading csv file from {}", config.paths.library_index_csv.display());
    let csv = File::open(&config.paths.library_index_csv)
        .with_context(|| format!("opening {}", config.paths.library_index_csv.display()))?;
    let records = read_records(csv)?;

    let files = catalog::list_files(&config.paths.docs_dir)
        .with_context(|| format!("listing {}", config.paths.docs_dir.display()))?;
    let library = prepare_library(records, &config, &files);

    if args.dry_run {
        info!(
            "Would write {} documents and {} facets",
            library.documents.len(),
            library.query_config.aggregations.len()
        );
        return Ok(());
    }

    catalog::write_documents(&config.paths.library_index_json, &library.documents)?;
    catalog::write_query_config(&config.paths.query_config_json, &library.query_config)?;
    info!("library index and query config file creation is complete");
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
