// Largest Banks ETL - Core Library
// Exposes every stage for the CLI and tests

pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod progress;
pub mod query;
pub mod rates;
pub mod record;
pub mod transform;

// Re-export commonly used types
pub use config::EtlConfig;
pub use db::{
    close_database, count_rows, load_table, open_database, open_read_only, replace_table,
};
pub use error::{EtlError, Result};
pub use export::{read_csv, write_csv};
pub use extract::{extract, parse_market_cap};
pub use fetch::{HttpFetcher, PageSource, StaticPage};
pub use pipeline::{records_table, run, run_etl, run_reports, RunSummary};
pub use progress::ProgressLog;
pub use query::{diagnostic_queries, run_and_report, run_query, QueryResult};
pub use rates::{load_exchange_rates, read_exchange_rates, ExchangeRateTable};
pub use record::{BankRecord, RecordSet, COLUMNS};
pub use transform::{transform, TARGET_CURRENCIES};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
