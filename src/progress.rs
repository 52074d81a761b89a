// 📝 Progress log - one `<timestamp> : <message>` line per stage boundary
//
// Append-only. Failure to open or write the file is fatal: there is no
// fallback location.

use crate::error::Result;
use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// e.g. `2023-Sep-08-09:16:35`
pub const TIMESTAMP_FORMAT: &str = "%Y-%h-%d-%H:%M:%S";

#[derive(Debug, Clone)]
pub struct ProgressLog {
    path: PathBuf,
}

impl ProgressLog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        ProgressLog {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a line stamped with the current local time
    pub fn log(&self, message: &str) -> Result<()> {
        self.log_at(Local::now(), message)
    }

    pub fn log_at(&self, now: DateTime<Local>, message: &str) -> Result<()> {
        let line = format_line(now, message);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;

        info!(target: "progress", "{}", message);
        Ok(())
    }
}

pub fn format_line(now: DateTime<Local>, message: &str) -> String {
    format!("{} : {}", now.format(TIMESTAMP_FORMAT), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2023, 9, 8, 9, 16, 35).unwrap()
    }

    #[test]
    fn test_format_line() {
        assert_eq!(
            format_line(fixed_time(), "Initiating ETL process"),
            "2023-Sep-08-09:16:35 : Initiating ETL process"
        );
    }

    #[test]
    fn test_log_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("code_log.txt");
        let progress = ProgressLog::new(&path);

        progress.log_at(fixed_time(), "first").unwrap();
        progress.log_at(fixed_time(), "second").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "2023-Sep-08-09:16:35 : first\n2023-Sep-08-09:16:35 : second\n"
        );
    }

    #[test]
    fn test_log_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("code_log.txt");
        std::fs::write(&path, "earlier run\n").unwrap();

        ProgressLog::new(&path).log("again").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("earlier run\n"));
        assert!(content.trim_end().ends_with(" : again"));
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_unwritable_path_is_error() {
        let progress = ProgressLog::new("/nonexistent-dir/code_log.txt");
        assert!(progress.log("lost").is_err());
    }
}
