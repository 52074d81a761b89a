// ⚙️ Run configuration
//
// Fixed constants, each overridable through a BANKS_ETL_* environment
// variable (a .env file is read by the binary). No command-line flags.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_URL: &str =
    "https://web.archive.org/web/20230908091635/https://en.wikipedia.org/wiki/List_of_largest_banks";
pub const DEFAULT_TABLE_ATTRIBS: [&str; 2] = ["Name", "MC_USD_Billion"];
pub const DEFAULT_EXCHANGE_RATE_CSV: &str = "./exchange_rate.csv";
pub const DEFAULT_OUTPUT_CSV: &str = "./Largest_banks_data.csv";
pub const DEFAULT_DB_NAME: &str = "Banks.db";
pub const DEFAULT_TABLE_NAME: &str = "Largest_banks";
pub const DEFAULT_LOG_FILE: &str = "code_log.txt";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct EtlConfig {
    pub url: String,
    pub table_attribs: Vec<String>,
    pub exchange_rate_csv: PathBuf,
    pub output_csv: PathBuf,
    pub db_path: PathBuf,
    pub table_name: String,
    pub log_path: PathBuf,
    pub fetch_timeout: Duration,
}

impl Default for EtlConfig {
    fn default() -> Self {
        EtlConfig {
            url: DEFAULT_URL.to_string(),
            table_attribs: DEFAULT_TABLE_ATTRIBS.iter().map(|s| s.to_string()).collect(),
            exchange_rate_csv: PathBuf::from(DEFAULT_EXCHANGE_RATE_CSV),
            output_csv: PathBuf::from(DEFAULT_OUTPUT_CSV),
            db_path: PathBuf::from(DEFAULT_DB_NAME),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            fetch_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl EtlConfig {
    /// Defaults with overrides from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = EtlConfig::default();

        if let Some(url) = lookup("BANKS_ETL_URL") {
            config.url = url;
        }
        if let Some(attribs) = lookup("BANKS_ETL_TABLE_ATTRIBS") {
            config.table_attribs = attribs.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Some(path) = lookup("BANKS_ETL_EXCHANGE_RATE_CSV") {
            config.exchange_rate_csv = PathBuf::from(path);
        }
        if let Some(path) = lookup("BANKS_ETL_OUTPUT_CSV") {
            config.output_csv = PathBuf::from(path);
        }
        if let Some(path) = lookup("BANKS_ETL_DB") {
            config.db_path = PathBuf::from(path);
        }
        if let Some(name) = lookup("BANKS_ETL_TABLE") {
            config.table_name = name;
        }
        if let Some(path) = lookup("BANKS_ETL_LOG") {
            config.log_path = PathBuf::from(path);
        }
        // Unparseable timeout keeps the default
        if let Some(secs) = lookup("BANKS_ETL_TIMEOUT_SECS").and_then(|s| s.parse::<u64>().ok()) {
            config.fetch_timeout = Duration::from_secs(secs);
        }

        config
    }
}
