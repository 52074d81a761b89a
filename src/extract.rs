// 🔎 Extractor - first <tbody> of the page → ordered bank records
//
// Tolerance policy:
// - rows with fewer than 3 cells are skipped silently
// - a market cap that does not parse becomes None, the bank is kept

use crate::error::{EtlError, Result};
use crate::record::{BankRecord, RecordSet};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

/// Minimum cells for a data row: rank, name, market cap
const MIN_CELLS: usize = 3;

/// Extract records from raw page markup
///
/// `table_attribs` names the two extracted columns (name, USD market cap).
pub fn extract(html: &str, table_attribs: &[String]) -> Result<RecordSet> {
    if table_attribs.len() != 2 {
        return Err(EtlError::Format(format!(
            "expected 2 table attributes, got {}: {:?}",
            table_attribs.len(),
            table_attribs
        )));
    }

    let document = Html::parse_document(html);
    let tbody_selector = selector("tbody")?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;

    let tbody = document
        .select(&tbody_selector)
        .next()
        .ok_or_else(|| EtlError::Structure("no <tbody> element found".to_string()))?;

    let mut records = RecordSet::new();
    let mut skipped = 0usize;

    // First row is the header
    for row in tbody.select(&row_selector).skip(1) {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        if cells.len() < MIN_CELLS {
            skipped += 1;
            continue;
        }

        let name = cell_text(&cells[1]).trim().to_string();
        let raw_market_cap = cell_text(&cells[2]);
        let market_cap = parse_market_cap(&raw_market_cap);

        if market_cap.is_none() {
            warn!(bank = %name, raw = %raw_market_cap.trim(), "market cap did not parse, keeping bank with no value");
        }

        records.push(BankRecord::extracted(name, market_cap));
    }

    debug!(skipped, "short rows skipped");
    info!(
        records = records.len(),
        name_column = %table_attribs[0],
        value_column = %table_attribs[1],
        "extraction complete"
    );

    Ok(records)
}

/// Normalize a market-cap cell and parse it as billions of USD
///
/// Strips newlines, thousands separators, the currency symbol and a trailing
/// `B` unit suffix. Returns None for anything that still isn't a finite number.
///
/// ```
/// use largest_banks_etl::extract::parse_market_cap;
/// assert_eq!(parse_market_cap("$1,234.56B\n"), Some(1234.56));
/// assert_eq!(parse_market_cap("N/A"), None);
/// ```
pub fn parse_market_cap(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\n' | '\r' | ',' | '$'))
        .collect();

    let cleaned = cleaned.trim().trim_end_matches('B').trim();

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>()
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| EtlError::Structure(format!("bad selector {css}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attribs() -> Vec<String> {
        vec!["Name".to_string(), "MC_USD_Billion".to_string()]
    }

    const PAGE: &str = r#"
        <html><body>
        <table>
          <tbody>
            <tr><th>Rank</th><th>Bank name</th><th>Market cap (US$ billion)</th></tr>
            <tr><td>1</td><td><a href="/jpm">JPMorgan Chase</a>
            </td><td>432.92
            </td></tr>
            <tr><td>2</td><td>Bank of America</td><td>$231.52B</td></tr>
            <tr><td colspan="3">footnote row</td></tr>
            <tr><td>3</td><td>Industrial and Commercial Bank of China</td><td>1,194.56</td></tr>
            <tr><td>4</td><td>Mystery Bank</td><td>N/A</td></tr>
          </tbody>
        </table>
        <table>
          <tbody>
            <tr><th>Rank</th><th>Ignored</th><th>Second table</th></tr>
            <tr><td>1</td><td>Not Extracted</td><td>1.0</td></tr>
          </tbody>
        </table>
        </body></html>
    "#;

    #[test]
    fn test_extract_keeps_source_order_and_skips_short_rows() {
        let records = extract(PAGE, &attribs()).unwrap();

        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "JPMorgan Chase",
                "Bank of America",
                "Industrial and Commercial Bank of China",
                "Mystery Bank",
            ]
        );
    }

    #[test]
    fn test_extract_parses_market_caps() {
        let records = extract(PAGE, &attribs()).unwrap();

        assert_eq!(records[0].mc_usd_billion, Some(432.92));
        assert_eq!(records[1].mc_usd_billion, Some(231.52));
        assert_eq!(records[2].mc_usd_billion, Some(1194.56));
    }

    #[test]
    fn test_unparseable_market_cap_keeps_record() {
        let records = extract(PAGE, &attribs()).unwrap();

        let mystery = records.iter().find(|r| r.name == "Mystery Bank").unwrap();
        assert_eq!(mystery.mc_usd_billion, None);
        assert!(mystery.mc_eur_billion.is_none());
    }

    #[test]
    fn test_header_only_table_yields_no_records() {
        let html = "<table><tbody><tr><td>1</td><td>Header</td><td>5.0</td></tr></tbody></table>";
        let records = extract(html, &attribs()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_tbody_is_structure_error() {
        let result = extract("<html><body><p>no tables here</p></body></html>", &attribs());
        assert!(matches!(result, Err(EtlError::Structure(_))));
    }

    #[test]
    fn test_wrong_attribute_count_rejected() {
        let result = extract(PAGE, &["Name".to_string()]);
        assert!(matches!(result, Err(EtlError::Format(_))));
    }

    #[test]
    fn test_parse_market_cap_normalization() {
        assert_eq!(parse_market_cap("$1,234.56B\n"), Some(1234.56));
        assert_eq!(parse_market_cap("  432.92\n"), Some(432.92));
        assert_eq!(parse_market_cap("1,000"), Some(1000.0));
        assert_eq!(parse_market_cap("N/A"), None);
        assert_eq!(parse_market_cap(""), None);
        assert_eq!(parse_market_cap("NaN"), None);
    }
}
