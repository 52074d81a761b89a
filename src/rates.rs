// 💱 Exchange rate table - Currency,Rate CSV → lookup
//
// Loaded once per run, read-only afterwards. Duplicate currency codes:
// the last row wins.

use crate::error::{EtlError, Result};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

const CURRENCY_COLUMN: &str = "Currency";
const RATE_COLUMN: &str = "Rate";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExchangeRateTable {
    rates: HashMap<String, f64>,
}

impl ExchangeRateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the rate for a currency code
    pub fn insert(&mut self, currency: impl Into<String>, rate: f64) {
        self.rates.insert(currency.into(), rate);
    }

    /// Rate for a currency code; a missing code is fatal for the transform
    pub fn rate(&self, currency: &str) -> Result<f64> {
        self.rates
            .get(currency)
            .copied()
            .ok_or_else(|| EtlError::MissingCurrency(currency.to_string()))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<(String, f64)> for ExchangeRateTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        ExchangeRateTable {
            rates: iter.into_iter().collect(),
        }
    }
}

/// Load the rate table from a CSV file with `Currency` and `Rate` columns
pub fn load_exchange_rates(csv_path: &Path) -> Result<ExchangeRateTable> {
    let file = std::fs::File::open(csv_path)?;
    let table = read_exchange_rates(file)?;

    info!(path = %csv_path.display(), currencies = table.len(), "exchange rates loaded");
    Ok(table)
}

/// Same as [`load_exchange_rates`], from any reader
pub fn read_exchange_rates<R: Read>(reader: R) -> Result<ExchangeRateTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let currency_idx = column_index(&headers, CURRENCY_COLUMN)?;
    let rate_idx = column_index(&headers, RATE_COLUMN)?;

    let mut table = ExchangeRateTable::new();

    for (line_num, result) in rdr.records().enumerate() {
        let record = result?;
        // +2: 1-indexed plus header row
        let line = line_num + 2;

        let currency = record.get(currency_idx).unwrap_or("").to_string();
        let raw_rate = record.get(rate_idx).unwrap_or("");
        let rate = raw_rate.parse::<f64>().map_err(|_| {
            EtlError::Format(format!(
                "line {}: rate {:?} for {} is not a number",
                line, raw_rate, currency
            ))
        })?;

        if table.rates.contains_key(&currency) {
            debug!(%currency, line, "duplicate currency, later row wins");
        }
        table.insert(currency, rate);
    }

    Ok(table)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| EtlError::Format(format!("exchange rate file has no {} column", name)))
}
