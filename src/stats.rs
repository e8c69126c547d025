use crate::error::StatsError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Aggregate results across all played sessions
///
/// Persisted as a single JSON object with camelCase keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub played: u32,
    pub won: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    /// Wins indexed by the 0-based row they were won on
    pub guess_distribution: Vec<u32>,
}

impl Stats {
    /// All-zero stats for a game with `max_attempts` rows
    pub fn new(max_attempts: usize) -> Self {
        Self {
            played: 0,
            won: 0,
            current_streak: 0,
            max_streak: 0,
            guess_distribution: vec![0; max_attempts],
        }
    }

    pub fn record_win(&mut self, row: usize) {
        self.played += 1;
        self.won += 1;
        self.current_streak += 1;
        self.max_streak = self.max_streak.max(self.current_streak);
        if row >= self.guess_distribution.len() {
            self.guess_distribution.resize(row + 1, 0);
        }
        self.guess_distribution[row] += 1;
    }

    pub fn record_loss(&mut self) {
        self.played += 1;
        self.current_streak = 0;
    }

    /// Whole-number win rate, 0 before any game
    pub fn win_percentage(&self) -> u32 {
        if self.played == 0 {
            return 0;
        }
        ((f64::from(self.won) / f64::from(self.played)) * 100.0).round() as u32
    }

    /// Whether the counters agree with each other
    pub fn is_consistent(&self) -> bool {
        self.won <= self.played
            && self.current_streak <= self.max_streak
            && self.guess_distribution.iter().sum::<u32>() == self.won
    }

    /// Resize the distribution to `max_attempts` rows.
    ///
    /// New rows start at zero. When shrinking, wins from the dropped rows are
    /// counted on the last remaining row so the distribution still sums to `won`.
    pub fn fit_rows(&mut self, max_attempts: usize) {
        let len = self.guess_distribution.len();
        if max_attempts == 0 || len == max_attempts {
            return;
        }
        if len < max_attempts {
            self.guess_distribution.resize(max_attempts, 0);
            return;
        }
        let tail: u32 = self.guess_distribution.drain(max_attempts..).sum();
        self.guess_distribution[max_attempts - 1] += tail;
    }
}

pub trait StatsStore: Send + Sync {
    /// Stored stats, or zeroed defaults when nothing usable is stored
    fn load(&self) -> Stats;

    fn save(&self, stats: &Stats) -> Result<(), StatsError>;

    /// Load, apply `f`, and save as one step; returns the saved value
    fn update(&self, f: &mut dyn FnMut(&mut Stats)) -> Result<Stats, StatsError> {
        let mut stats = self.load();
        f(&mut stats);
        self.save(&stats)?;
        Ok(stats)
    }
}

/// Stats kept in a JSON file
#[derive(Debug)]
pub struct FileStatsStore {
    path: PathBuf,
    max_attempts: usize,
    lock: Mutex<()>,
}

impl FileStatsStore {
    pub fn with_path<P: AsRef<Path>>(p: P, max_attempts: usize) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
            max_attempts,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Stats {
        let Ok(bytes) = fs::read(&self.path) else {
            return Stats::new(self.max_attempts);
        };
        match serde_json::from_slice::<Stats>(&bytes) {
            Ok(mut stats) if stats.is_consistent() => {
                if stats.guess_distribution.len() != self.max_attempts {
                    tracing::info!(
                        from = stats.guess_distribution.len(),
                        to = self.max_attempts,
                        "resizing stored guess distribution"
                    );
                    stats.fit_rows(self.max_attempts);
                }
                stats
            }
            Ok(_) => {
                tracing::warn!(path = %self.path.display(), "ignoring inconsistent stats record");
                Stats::new(self.max_attempts)
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring malformed stats record");
                Stats::new(self.max_attempts)
            }
        }
    }

    fn write(&self, stats: &Stats) -> Result<(), StatsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(stats)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

impl StatsStore for FileStatsStore {
    fn load(&self) -> Stats {
        self.read()
    }

    fn save(&self, stats: &Stats) -> Result<(), StatsError> {
        let _guard = self.lock.lock().map_err(|_| StatsError::Poisoned)?;
        self.write(stats)
    }

    fn update(&self, f: &mut dyn FnMut(&mut Stats)) -> Result<Stats, StatsError> {
        let _guard = self.lock.lock().map_err(|_| StatsError::Poisoned)?;
        let mut stats = self.read();
        f(&mut stats);
        self.write(&stats)?;
        Ok(stats)
    }
}

/// In-process store, used by tests and embedders that persist elsewhere
#[derive(Debug)]
pub struct MemoryStatsStore {
    max_attempts: usize,
    stats: Mutex<Option<Stats>>,
}

impl MemoryStatsStore {
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts,
            stats: Mutex::new(None),
        }
    }

    pub fn with_stats(stats: Stats) -> Self {
        Self {
            max_attempts: stats.guess_distribution.len(),
            stats: Mutex::new(Some(stats)),
        }
    }
}

impl StatsStore for MemoryStatsStore {
    fn load(&self) -> Stats {
        let mut stats = self
            .stats
            .lock()
            .ok()
            .and_then(|s| s.clone())
            .unwrap_or_else(|| Stats::new(self.max_attempts));
        stats.fit_rows(self.max_attempts);
        stats
    }

    fn save(&self, stats: &Stats) -> Result<(), StatsError> {
        let mut slot = self.stats.lock().map_err(|_| StatsError::Poisoned)?;
        *slot = Some(stats.clone());
        Ok(())
    }

    fn update(&self, f: &mut dyn FnMut(&mut Stats)) -> Result<Stats, StatsError> {
        let mut slot = self.stats.lock().map_err(|_| StatsError::Poisoned)?;
        let mut stats = slot
            .clone()
            .unwrap_or_else(|| Stats::new(self.max_attempts));
        stats.fit_rows(self.max_attempts);
        f(&mut stats);
        *slot = Some(stats.clone());
        Ok(stats)
    }
}
