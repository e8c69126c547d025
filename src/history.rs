use crate::error::HistoryError;
use crate::session::{GameSession, SessionStatus};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// One finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub date: DateTime<Local>,
    pub secret: String,
    pub outcome: String,
    /// Rows used, including the winning one
    pub guesses: usize,
    pub hints_used: u32,
}

impl GameRecord {
    /// Summarize a finished session; `None` while it is still in progress
    pub fn from_session(session: &GameSession) -> Option<Self> {
        let result = session.result()?;
        let outcome = match result.status {
            SessionStatus::Won { .. } => "won",
            SessionStatus::Lost => "lost",
            SessionStatus::InProgress => return None,
        };
        Some(Self {
            date: Local::now(),
            secret: result.secret.to_string(),
            outcome: outcome.to_string(),
            guesses: session.attempts_used(),
            hints_used: session.hints_used(),
        })
    }
}

/// Append-only CSV log of finished sessions
#[derive(Debug, Clone)]
pub struct GameLog {
    path: PathBuf,
}

impl GameLog {
    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &GameRecord) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // If the log doesn't exist yet, emit a header
        let needs_header = !self.path.exists();

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }

    /// All records, oldest first; an absent log is empty
    pub fn records(&self) -> Result<Vec<GameRecord>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let records = reader.deserialize().collect::<Result<Vec<GameRecord>, _>>()?;
        Ok(records)
    }
}
