use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use largest_banks_etl::{pipeline, EtlConfig, HttpFetcher, ProgressLog, VERSION};

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = EtlConfig::from_env();
    tracing::info!(version = VERSION, url = %config.url, "starting largest banks ETL");

    println!("🏦 Largest Banks ETL v{}", VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let progress = ProgressLog::new(&config.log_path);
    let fetcher = HttpFetcher::new(config.fetch_timeout).context("Failed to build HTTP client")?;

    // Extract, transform, load CSV + database, then reports on a fresh
    // read-only connection
    let summary = pipeline::run(&config, &fetcher, &progress).context("ETL run failed")?;

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{}", pipeline::records_table(&summary.records));
    println!("✓ Wrote {} records to {}", summary.records.len(), config.output_csv.display());
    println!(
        "✓ Loaded {} rows into {} ({})",
        summary.rows_loaded,
        config.table_name,
        config.db_path.display()
    );
    println!("✓ Ran {} diagnostic queries", summary.reports.len());
    println!("✅ Process complete (log: {})", progress.path().display());
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("largest_banks_etl=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
