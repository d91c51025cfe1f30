//! Wall-Archiver main entry point
//!
//! Command-line interface: archives the walls of one or more pages into a
//! local SQLite database.

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wall_archiver::config::load_config;
use wall_archiver::extract::archive_page;
use wall_archiver::{ApiClient, SqliteStore};

/// Wall-Archiver: a polite wall scraper
///
/// Extracts posts and comments from the walls of the given pages through the
/// rate-limited remote API and stores them in SQLite. Each identifier is
/// processed independently: a failure on one page never aborts the rest.
#[derive(Parser, Debug)]
#[command(name = "wall-archiver")]
#[command(version = "1.0.0")]
#[command(about = "Archive wall posts and comments into SQLite", long_about = None)]
struct Cli {
    /// Page identifiers: numeric wall owner ids or page names
    #[arg(value_name = "ID", required = true)]
    ids: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Extract posts only, without their comments
    #[arg(long)]
    skip_comments: bool,

    /// Only archive the latest N posts per wall
    #[arg(short, long)]
    limit: Option<u64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)?;

    let client = ApiClient::new(&config.api, &config.crawler)?;
    let mut store = SqliteStore::new(Path::new(&config.output.database_path))?;

    for target in &cli.ids {
        tracing::info!(page = %target, "archiving page");
        if let Err(err) = archive_page(
            &client,
            &mut store,
            &config.crawler,
            target,
            cli.limit,
            !cli.skip_comments,
        )
        .await
        {
            tracing::error!(page = %target, error = %err, "could not retrieve everything for page");
        }
    }

    println!(
        "{} posts, {} comments stored in {}",
        store.count_posts()?,
        store.count_comments()?,
        config.output.database_path
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wall_archiver=info,warn"),
            1 => EnvFilter::new("wall_archiver=debug,info"),
            2 => EnvFilter::new("wall_archiver=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
