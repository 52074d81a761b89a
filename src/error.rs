// Error taxonomy for the banks ETL run
// Only per-field market-cap parse failures are recovered (as None); every
// variant here is fatal to the run.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("unexpected page structure: {0}")]
    Structure(String),

    #[error("malformed input: {0}")]
    Format(String),

    #[error("exchange rate missing for currency: {0}")]
    MissingCurrency(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("query failed `{statement}`: {source}")]
    Query {
        statement: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("refusing to run statement that is not read-only: {0}")]
    NotReadOnly(String),
}

pub type Result<T> = std::result::Result<T, EtlError>;
