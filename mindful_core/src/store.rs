//! Entry repository contract and a JSON Lines store behind it.
//!
//! Records are appended to `journal.jsonl` and `meditation.jsonl` under the
//! data directory with file locking to ensure safe concurrent access. Every
//! record carries its user id; reads filter by user.

use crate::{Error, JournalEntry, MeditationSession, Result, UserId};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

const JOURNAL_FILE: &str = "journal.jsonl";
const MEDITATION_FILE: &str = "meditation.jsonl";

/// Read access to a user's recorded entries
///
/// No ordering is promised; consumers sort as needed. Implementations map
/// their storage failures to [`Error::RepositoryUnavailable`].
pub trait EntryRepository: Send + Sync {
    fn journal_entries(&self, user: UserId) -> Result<Vec<JournalEntry>>;

    fn meditation_sessions(&self, user: UserId) -> Result<Vec<MeditationSession>>;

    fn journal_entry_dates(&self, user: UserId) -> Result<Vec<DateTime<Utc>>> {
        Ok(self
            .journal_entries(user)?
            .into_iter()
            .map(|e| e.recorded_at)
            .collect())
    }

    fn meditation_session_dates(&self, user: UserId) -> Result<Vec<DateTime<Utc>>> {
        Ok(self
            .meditation_sessions(user)?
            .into_iter()
            .map(|s| s.performed_at)
            .collect())
    }
}

/// JSONL-backed entry store with file locking
#[derive(Clone, Debug)]
pub struct JsonlStore {
    dir: PathBuf,
}

impl JsonlStore {
    /// Create a store rooted at the given data directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn journal_path(&self) -> PathBuf {
        self.dir.join(JOURNAL_FILE)
    }

    pub fn meditation_path(&self) -> PathBuf {
        self.dir.join(MEDITATION_FILE)
    }

    pub fn append_journal_entry(&self, entry: &JournalEntry) -> Result<()> {
        append_line(&self.journal_path(), entry)?;
        tracing::debug!("Appended journal entry {} for user {}", entry.id, entry.user_id);
        Ok(())
    }

    pub fn append_meditation_session(&self, session: &MeditationSession) -> Result<()> {
        append_line(&self.meditation_path(), session)?;
        tracing::debug!(
            "Appended meditation session {} for user {}",
            session.id,
            session.user_id
        );
        Ok(())
    }
}

impl EntryRepository for JsonlStore {
    fn journal_entries(&self, user: UserId) -> Result<Vec<JournalEntry>> {
        let path = self.journal_path();
        let entries: Vec<JournalEntry> = read_lines::<JournalEntry>(&path)
            .map_err(|e| unavailable(&path, e))?
            .into_iter()
            .filter(|e| e.user_id == user)
            .collect();
        tracing::debug!("Read {} journal entries for user {}", entries.len(), user);
        Ok(entries)
    }

    fn meditation_sessions(&self, user: UserId) -> Result<Vec<MeditationSession>> {
        let path = self.meditation_path();
        let sessions: Vec<MeditationSession> = read_lines::<MeditationSession>(&path)
            .map_err(|e| unavailable(&path, e))?
            .into_iter()
            .filter(|s| s.user_id == user)
            .collect();
        tracing::debug!("Read {} meditation sessions for user {}", sessions.len(), user);
        Ok(sessions)
    }
}

fn unavailable(path: &Path, err: Error) -> Error {
    Error::RepositoryUnavailable(format!("{}: {}", path.display(), err))
}

fn append_line<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    file.lock_exclusive()?;

    let mut writer = std::io::BufWriter::new(&file);
    let line = serde_json::to_string(record)?;
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    drop(writer);

    file.unlock()?;
    Ok(())
}

/// Read every parseable record; a missing file reads as empty
fn read_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut records = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = match line_result {
            Ok(line) => line,
            Err(e) => {
                let _ = file.unlock();
                return Err(e.into());
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<T>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(
                    "Skipping corrupt record at {:?} line {}: {}",
                    path,
                    line_num + 1,
                    e
                );
            }
        }
    }

    file.unlock()?;
    Ok(records)
}
