//! CSV export of journal entries.
//!
//! The file is written to a temp file in the target directory, synced and
//! then renamed over the destination, so a failed export never leaves a
//! half-written CSV behind.

use crate::{JournalEntry, Result};
use std::path::Path;
use tempfile::NamedTempFile;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    id: String,
    user_id: u32,
    recorded_at: String,
    mood: i32,
    stress: i32,
    sleep_hours: f64,
    content: &'a str,
}

impl<'a> From<&'a JournalEntry> for CsvRow<'a> {
    fn from(entry: &'a JournalEntry) -> Self {
        CsvRow {
            id: entry.id.to_string(),
            user_id: entry.user_id.0,
            recorded_at: entry.recorded_at.to_rfc3339(),
            mood: entry.mood,
            stress: entry.stress,
            sleep_hours: entry.sleep_hours,
            content: &entry.content,
        }
    }
}

/// Write entries (oldest first) to `path`, replacing any existing file
///
/// Returns the number of rows written.
pub fn export_journal_csv(entries: &[JournalEntry], path: &Path) -> Result<usize> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut ordered: Vec<&JournalEntry> = entries.iter().collect();
    ordered.sort_by_key(|e| e.recorded_at);

    let temp = NamedTempFile::new_in(dir)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(temp.as_file());

    for entry in &ordered {
        writer.serialize(CsvRow::from(*entry))?;
    }
    writer.flush()?;
    drop(writer);

    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    tracing::info!("Exported {} journal entries to {:?}", ordered.len(), path);
    Ok(ordered.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserId;
    use chrono::{Duration, Utc};

    #[test]
    fn test_export_writes_header_and_rows_oldest_first() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out").join("journal.csv");
        let now = Utc::now();

        let entries = vec![
            JournalEntry::new(UserId(1), now, "today, calm", 8, 2, 8.0).unwrap(),
            JournalEntry::new(UserId(1), now - Duration::days(1), "tired", 4, 7, 5.5).unwrap(),
        ];

        let count = export_journal_csv(&entries, &path).unwrap();
        assert_eq!(count, 2);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["id", "user_id", "recorded_at", "mood", "stress", "sleep_hours", "content"]
        );

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][6], "tired");
        assert_eq!(&rows[1][6], "today, calm");
        assert_eq!(&rows[0][5], "5.5");
    }

    #[test]
    fn test_export_replaces_existing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("journal.csv");
        std::fs::write(&path, "stale").unwrap();

        let count = export_journal_csv(&[], &path).unwrap();
        assert_eq!(count, 0);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("stale"));
    }
}
