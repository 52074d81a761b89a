// 🚚 Pipeline - fetch → extract → transform → load, then reports
//
// Strictly sequential. Every stage error aborts the run; sinks already
// written are left as they are.

use crate::config::EtlConfig;
use crate::db::{close_database, open_database, open_read_only, replace_table};
use crate::error::Result;
use crate::export::write_csv;
use crate::extract::extract;
use crate::fetch::PageSource;
use crate::progress::ProgressLog;
use crate::query::{diagnostic_queries, run_and_report, QueryResult};
use crate::rates::load_exchange_rates;
use crate::record::{format_amount, render_table, BankRecord, RecordSet, COLUMNS};
use crate::transform::transform;
use tracing::info;

/// Full record table, one line per bank in source order
pub fn records_table(records: &[BankRecord]) -> String {
    let columns: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    let rows: Vec<Vec<String>> = records.iter().map(BankRecord::display_row).collect();

    render_table(&columns, &rows)
}

/// What one full run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub records: RecordSet,
    pub rows_loaded: usize,
    pub reports: Vec<QueryResult>,
}

/// Extract, transform and load both sinks; returns the transformed set
pub fn run_etl(config: &EtlConfig, source: &dyn PageSource, progress: &ProgressLog) -> Result<(RecordSet, usize)> {
    progress.log("Initiating ETL process")?;

    // 1. Extract
    let html = source.fetch(&config.url)?;
    let extracted = extract(&html, &config.table_attribs)?;
    println!("{}", extracted_table(&extracted, &config.table_attribs));
    progress.log("Data extraction complete. Initiating Transformation process")?;

    // 2. Transform
    let rates = load_exchange_rates(&config.exchange_rate_csv)?;
    let records = transform(&extracted, &rates)?;
    println!(
        "Market capitalization of the 5th largest bank in billion EUR: {}",
        format_amount(fifth_eur(&records))
    );
    progress.log("Data transformation complete. Initiating Loading process")?;

    // 3. Load: flat file
    write_csv(&records, &config.output_csv)?;
    progress.log("Data saved to CSV file")?;

    // 4. Load: database, connection scoped to the write
    let conn = open_database(&config.db_path)?;
    progress.log("SQL Connection initiated")?;
    let rows_loaded = replace_table(&conn, &config.table_name, &records)?;
    close_database(conn)?;
    progress.log("Data loaded to Database as a table, Executing queries")?;

    info!(records = records.len(), rows_loaded, "load complete");
    Ok((records, rows_loaded))
}

/// Run the diagnostic queries on a fresh read-only connection
pub fn run_reports(config: &EtlConfig, progress: &ProgressLog) -> Result<Vec<QueryResult>> {
    let conn = open_read_only(&config.db_path)?;

    let mut reports = Vec::new();
    for statement in diagnostic_queries(&config.table_name) {
        reports.push(run_and_report(&conn, &statement, progress)?);
    }

    close_database(conn)?;
    progress.log("Database connection closed")?;
    Ok(reports)
}

/// Full run: ETL followed by the reports
pub fn run(config: &EtlConfig, source: &dyn PageSource, progress: &ProgressLog) -> Result<RunSummary> {
    let (records, rows_loaded) = run_etl(config, source, progress)?;
    let reports = run_reports(config, progress)?;
    progress.log("Process Complete")?;

    Ok(RunSummary {
        records,
        rows_loaded,
        reports,
    })
}

/// EUR market cap of the record at position 4, if there is one
pub fn fifth_eur(records: &[BankRecord]) -> Option<f64> {
    records.get(4).and_then(|r| r.mc_eur_billion)
}

fn extracted_table(records: &[BankRecord], table_attribs: &[String]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| vec![r.name.clone(), format_amount(r.mc_usd_billion)])
        .collect();

    render_table(table_attribs, &rows)
}
