// 📊 Query runner - read-only diagnostic statements
//
// Runs against a connection the caller owns; statements that would write
// are rejected before execution.

use crate::db::table_ref;
use crate::error::{EtlError, Result};
use crate::progress::ProgressLog;
use crate::record::render_table;
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

/// Reporting queries run after the load, in order
pub fn diagnostic_queries(table_name: &str) -> Vec<String> {
    let table_name = table_ref(table_name);
    vec![
        format!("SELECT * FROM {}", table_name),
        format!("SELECT AVG(MC_GBP_Billion) AS Avg_Market_Cap_GBP FROM {}", table_name),
        // No ORDER BY: relies on SQLite's rowid scan order, which is insertion order
        format!("SELECT Name FROM {} LIMIT 5", table_name),
    ]
}

/// Result set of one statement, cells as JSON values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    /// Console table, NULL shown as None
    pub fn to_table(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(display_cell).collect())
            .collect();

        render_table(&self.columns, &rows)
    }
}

/// Execute one read-only statement and collect its rows
pub fn run_query(conn: &Connection, statement: &str) -> Result<QueryResult> {
    let query_err = |source: rusqlite::Error| EtlError::Query {
        statement: statement.to_string(),
        source,
    };

    let mut stmt = conn.prepare(statement).map_err(query_err)?;
    if !stmt.readonly() {
        return Err(EtlError::NotReadOnly(statement.to_string()));
    }

    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    let width = columns.len();

    let mut rows = Vec::new();
    let mut cursor = stmt.query([]).map_err(query_err)?;
    while let Some(row) = cursor.next().map_err(query_err)? {
        let mut cells = Vec::with_capacity(width);
        for i in 0..width {
            let cell = row.get_ref(i).map_err(query_err)?;
            cells.push(to_json(cell));
        }
        rows.push(cells);
    }

    Ok(QueryResult { columns, rows })
}

/// Run a statement, print it with its results, and log the execution
pub fn run_and_report(conn: &Connection, statement: &str, progress: &ProgressLog) -> Result<QueryResult> {
    println!("Executing Query: {}", statement);

    let result = run_query(conn, statement)?;
    println!("{}", result.to_table());

    info!(statement, rows = result.rows.len(), "query executed");
    progress.log(&format!("Executed query: {}", statement))?;

    Ok(result)
}

fn to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Value::from(f),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::String(format!("<{} bytes>", b.len())),
    }
}

fn display_cell(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if !n.is_i64() && !n.is_u64() => format!("{:?}", f),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
