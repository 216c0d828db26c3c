//! Command-line interface for seed-loader
//!
//! # Usage Examples
//!
//! ```bash
//! # Load the built-in datasets into database files under ./data
//! seed-loader --data-dir ./data
//!
//! # Fail the process if any record was rejected or could not be inserted
//! seed-loader --in-memory --strict
//!
//! # More detail, including generated SQL
//! RUST_LOG=debug seed-loader --dry-run
//! ```

use anyhow::Context;
use clap::Parser;
use seed_loader::{sample, Coordinator, LoaderConfig, RunReport};
use sqlite_store::StoreArgs;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "seed-loader")]
#[command(about = "Validate and load the built-in users, products and orders into SQLite")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,

    /// Validate the datasets without opening or writing any store
    #[arg(long)]
    dry_run: bool,

    /// Exit with an error if any record was rejected or failed to insert
    #[arg(long)]
    strict: bool,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    summary_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let datasets = sample::datasets();

    let report = if cli.dry_run {
        tracing::info!("[DRY-RUN] Validating built-in datasets");
        Coordinator::dry_run(&datasets)
    } else {
        let config = LoaderConfig::from(&cli.store);
        let coordinator = Coordinator::open(&config).context("Failed to initialize stores")?;
        coordinator.run(datasets).await?
    };

    log_report(&report);

    if cli.summary_json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{json}");
    }

    if cli.strict && !report.is_clean() {
        anyhow::bail!(
            "Load finished with {} rejected and {} failed record(s)",
            report.total_rejected(),
            report.total_failed()
        );
    }

    Ok(())
}

fn log_report(report: &RunReport) {
    for summary in report.summaries() {
        tracing::info!(
            "{}: {} of {} inserted ({} rejected, {} failed, {:.0} records/sec)",
            summary.kind.table_name(),
            summary.inserted,
            summary.total,
            summary.rejected,
            summary.failed,
            summary.records_per_second()
        );
    }
}
