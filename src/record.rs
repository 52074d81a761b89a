// 🏦 Bank record - one row of the largest-banks table
//
// Created by the extractor with only Name + MC_USD_Billion; the transformer
// fills the three derived currency columns. Order of a record set is the
// source row order and must survive every stage.

use serde::{Deserialize, Serialize};

/// Column order shared by the CSV file and the database table
pub const COLUMNS: [&str; 5] = [
    "Name",
    "MC_USD_Billion",
    "MC_GBP_Billion",
    "MC_EUR_Billion",
    "MC_INR_Billion",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankRecord {
    #[serde(rename = "Name")]
    pub name: String,

    /// None when the source figure did not parse (never coerced to 0.0)
    #[serde(rename = "MC_USD_Billion")]
    pub mc_usd_billion: Option<f64>,

    // ========================================================================
    // DERIVED FIELDS (present iff mc_usd_billion is present, after transform)
    // ========================================================================
    #[serde(rename = "MC_GBP_Billion", default)]
    pub mc_gbp_billion: Option<f64>,

    #[serde(rename = "MC_EUR_Billion", default)]
    pub mc_eur_billion: Option<f64>,

    #[serde(rename = "MC_INR_Billion", default)]
    pub mc_inr_billion: Option<f64>,
}

/// Ordered sequence of records, insertion order = source row order
pub type RecordSet = Vec<BankRecord>;

impl BankRecord {
    /// Record as produced by the extractor, derived fields still empty
    pub fn extracted(name: impl Into<String>, mc_usd_billion: Option<f64>) -> Self {
        BankRecord {
            name: name.into(),
            mc_usd_billion,
            mc_gbp_billion: None,
            mc_eur_billion: None,
            mc_inr_billion: None,
        }
    }

    /// Values in COLUMNS order, formatted for console output
    pub fn display_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            format_amount(self.mc_usd_billion),
            format_amount(self.mc_gbp_billion),
            format_amount(self.mc_eur_billion),
            format_amount(self.mc_inr_billion),
        ]
    }
}

pub fn format_amount(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:?}", v),
        None => "None".to_string(),
    }
}

/// Plain-text table with a header line and left-aligned columns
pub fn render_table(columns: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let format_line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    // Leading column is the positional index, like a dataframe printout
    let mut out = format!("{:>3}  {}\n", "", format_line(columns));
    for (i, row) in rows.iter().enumerate() {
        out.push_str(&format!("{:>3}  {}\n", i, format_line(row.as_slice())));
    }
    out
}
