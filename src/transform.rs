// 🔁 Transformer - USD market cap → GBP / EUR / INR
//
// Pure: the input record set is not touched, the output is a new set in the
// same order. Absent USD value → all three derived values absent.

use crate::error::Result;
use crate::rates::ExchangeRateTable;
use crate::record::{BankRecord, RecordSet};
use tracing::info;

/// Currencies derived from MC_USD_Billion, in column order
pub const TARGET_CURRENCIES: [&str; 3] = ["GBP", "EUR", "INR"];

/// Convert every record with the given rate table
///
/// All three target currencies must be in the table, even when no record has
/// a USD value to convert.
pub fn transform(records: &[BankRecord], rates: &ExchangeRateTable) -> Result<RecordSet> {
    let mut factors = [0.0f64; 3];
    for (factor, code) in factors.iter_mut().zip(TARGET_CURRENCIES) {
        *factor = rates.rate(code)?;
    }
    let [gbp, eur, inr] = factors;

    let transformed: RecordSet = records
        .iter()
        .map(|record| BankRecord {
            name: record.name.clone(),
            mc_usd_billion: record.mc_usd_billion,
            mc_gbp_billion: convert(record.mc_usd_billion, gbp),
            mc_eur_billion: convert(record.mc_usd_billion, eur),
            mc_inr_billion: convert(record.mc_usd_billion, inr),
        })
        .collect();

    info!(records = transformed.len(), gbp, eur, inr, "transformation complete");
    Ok(transformed)
}

fn convert(usd: Option<f64>, rate: f64) -> Option<f64> {
    usd.map(|value| round2(value * rate))
}

/// Round to 2 decimal places, ties to even (same as numpy's `round`)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
