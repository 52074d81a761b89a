// 📄 Flat-file sink - record set → CSV
//
// Header row in COLUMNS order, no index column, existing file overwritten.
// Absent values are written as empty fields.

use crate::error::Result;
use crate::record::{BankRecord, RecordSet, COLUMNS};
use std::path::Path;
use tracing::info;

pub fn write_csv(records: &[BankRecord], output_path: &Path) -> Result<()> {
    // Header written explicitly so an empty record set still gets one
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(output_path)?;
    wtr.write_record(COLUMNS)?;

    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;

    info!(path = %output_path.display(), rows = records.len(), "CSV written");
    Ok(())
}

/// Read a file written by [`write_csv`] back into a record set
pub fn read_csv(path: &Path) -> Result<RecordSet> {
    let mut rdr = csv::Reader::from_path(path)?;

    let mut records = RecordSet::new();
    for result in rdr.deserialize() {
        let record: BankRecord = result?;
        records.push(record);
    }

    Ok(records)
}
