use crate::error::Result;
use crate::record::{BankRecord, RecordSet, COLUMNS};
use rusqlite::{params, Connection, OpenFlags};
use std::path::Path;
use tracing::{debug, info};

// ============================================================================
// CONNECTIONS
// Handles are passed explicitly to every operation; nothing is global.
// ============================================================================

/// Open (or create) the database file for writing
pub fn open_database(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    debug!(path = %db_path.display(), "database opened read-write");
    Ok(conn)
}

/// Open an existing database file for read-only queries
pub fn open_read_only(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    debug!(path = %db_path.display(), "database opened read-only");
    Ok(conn)
}

/// Close a connection, surfacing any error SQLite reports on close
pub fn close_database(conn: Connection) -> Result<()> {
    conn.close().map_err(|(_, e)| e)?;
    Ok(())
}

// ============================================================================
// RELATIONAL SINK
// ============================================================================

/// Replace the whole table with `records` (drop, recreate, insert)
///
/// Column types follow the field types: Name is TEXT, the amounts REAL
/// (nullable). Rows are inserted in record-set order. The three steps run
/// in one transaction, so a failed insert leaves the previous table intact.
pub fn replace_table(conn: &Connection, table_name: &str, records: &[BankRecord]) -> Result<usize> {
    let table = quote_ident(table_name);
    let tx = conn.unchecked_transaction()?;

    tx.execute(&format!("DROP TABLE IF EXISTS {}", table), [])?;
    tx.execute(
        &format!(
            "CREATE TABLE {} (
                \"{}\" TEXT,
                \"{}\" REAL,
                \"{}\" REAL,
                \"{}\" REAL,
                \"{}\" REAL
            )",
            table, COLUMNS[0], COLUMNS[1], COLUMNS[2], COLUMNS[3], COLUMNS[4]
        ),
        [],
    )?;

    let mut inserted = 0;
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {} VALUES (?1, ?2, ?3, ?4, ?5)",
            table
        ))?;

        for record in records {
            stmt.execute(params![
                record.name,
                record.mc_usd_billion,
                record.mc_gbp_billion,
                record.mc_eur_billion,
                record.mc_inr_billion,
            ])?;
            inserted += 1;
        }
    }

    tx.commit()?;

    info!(table = table_name, rows = inserted, "table replaced");
    Ok(inserted)
}

pub fn count_rows(conn: &Connection, table_name: &str) -> Result<i64> {
    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", quote_ident(table_name)),
        [],
        |row| row.get(0),
    )?;

    Ok(count)
}

/// Read the table back in insertion (rowid) order
pub fn load_table(conn: &Connection, table_name: &str) -> Result<RecordSet> {
    let mut stmt = conn.prepare(&format!(
        "SELECT \"{}\", \"{}\", \"{}\", \"{}\", \"{}\" FROM {} ORDER BY rowid",
        COLUMNS[0],
        COLUMNS[1],
        COLUMNS[2],
        COLUMNS[3],
        COLUMNS[4],
        quote_ident(table_name)
    ))?;

    let records = stmt
        .query_map([], |row| {
            Ok(BankRecord {
                name: row.get(0)?,
                mc_usd_billion: row.get(1)?,
                mc_gbp_billion: row.get(2)?,
                mc_eur_billion: row.get(3)?,
                mc_inr_billion: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(records)
}

/// Quote an SQL identifier, doubling embedded quotes
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Table name as it should appear in a hand-written statement: bare when it
/// is a plain identifier, quoted otherwise
pub(crate) fn table_ref(name: &str) -> String {
    let mut chars = name.chars();
    let plain = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if plain {
        name.to_string()
    } else {
        quote_ident(name)
    }
}
