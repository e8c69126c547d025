//! One play-through: the board, the cursor, hints, and the result
//!
//! Every intent is handled synchronously. Verdicts and stats are final the
//! moment `submit` returns; any staged reveal is up to the view.

use crate::board::{Board, Tile};
use crate::config::Config;
use crate::evaluator::{evaluate, is_solved, Verdict};
use crate::hint::{HintEffect, HintEngine, HintKind};
use crate::keyboard::KeyboardState;
use crate::stats::{Stats, StatsStore};
use crate::word::Word;
use crate::word_source::WordSource;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Sizing of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub word_length: usize,
    pub max_attempts: usize,
    pub max_hints: u32,
    pub eliminate_count: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            word_length: 5,
            max_attempts: 6,
            max_hints: 2,
            eliminate_count: 3,
        }
    }
}

impl From<&Config> for SessionConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            word_length: cfg.word_length,
            max_attempts: cfg.max_attempts,
            max_hints: cfg.max_hints,
            eliminate_count: cfg.eliminate_count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionStatus {
    InProgress,
    Won { row: usize },
    Lost,
}

/// Terminal outcome plus the secret, so a view can show it after a loss
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResult {
    pub status: SessionStatus,
    pub secret: Word,
}

/// User intents a view can send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Append(char),
    Delete,
    Submit,
    Hint(HintKind),
}

/// Outcome of a submitted row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The session is already over
    Ignored,
    Continue { row: usize, verdicts: Vec<Verdict> },
    Won { row: usize, verdicts: Vec<Verdict> },
    Lost { verdicts: Vec<Verdict>, secret: Word },
}

/// A submission the player has to fix before it counts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("not enough letters: {filled} of {required}")]
    RowIncomplete { filled: usize, required: usize },
}

/// Result of [`GameSession::send_intent`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    Ignored,
    Edited,
    Submitted(Submission),
    Rejected(SubmitError),
    Hint(HintEffect),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowSnapshot {
    pub tiles: Vec<Tile>,
    pub verdicts: Option<Vec<Verdict>>,
}

/// Read-only view of a session for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub rows: Vec<RowSnapshot>,
    pub keyboard: BTreeMap<char, Verdict>,
    pub hints_remaining: u32,
    pub current_row: usize,
    pub current_col: usize,
    pub result: Option<SessionResult>,
}

impl Snapshot {
    /// Emoji grid of the submitted rows
    pub fn share_grid(&self) -> String {
        self.rows
            .iter()
            .filter_map(|r| r.verdicts.as_ref())
            .map(|verdicts| {
                verdicts
                    .iter()
                    .map(|v| match v {
                        Verdict::Correct => '🟩',
                        Verdict::Present => '🟨',
                        Verdict::Absent => '⬛',
                    })
                    .collect::<String>()
            })
            .join("\n")
    }
}

type SnapshotObserver = Box<dyn FnMut(&Snapshot)>;

pub struct GameSession {
    config: SessionConfig,
    secret: Word,
    board: Board,
    keyboard: KeyboardState,
    hints: HintEngine,
    current_row: usize,
    current_col: usize,
    status: SessionStatus,
    store: Arc<dyn StatsStore>,
    stats: Stats,
    observers: Vec<SnapshotObserver>,
}

impl GameSession {
    /// Start a session with a secret drawn from `source`
    pub fn new(
        config: SessionConfig,
        source: &mut dyn WordSource,
        store: Arc<dyn StatsStore>,
    ) -> Self {
        Self::with_rng(config, source.next_word(), store, StdRng::from_entropy())
    }

    /// Start a session with a known secret and hint randomness
    ///
    /// # Panics
    /// Panics if the secret's length differs from `config.word_length`.
    pub fn with_rng(
        config: SessionConfig,
        secret: Word,
        store: Arc<dyn StatsStore>,
        rng: StdRng,
    ) -> Self {
        assert_eq!(
            secret.len(),
            config.word_length,
            "secret length must match the configured word length"
        );
        let stats = store.load();
        tracing::info!(
            word_length = config.word_length,
            max_attempts = config.max_attempts,
            "session started"
        );
        Self {
            config,
            secret,
            board: Board::new(config.max_attempts, config.word_length),
            keyboard: KeyboardState::new(),
            hints: HintEngine::with_rng(config.max_hints, config.eliminate_count, rng),
            current_row: 0,
            current_col: 0,
            status: SessionStatus::InProgress,
            store,
            stats,
            observers: Vec::new(),
        }
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != SessionStatus::InProgress
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.current_row, self.current_col)
    }

    pub fn hints_remaining(&self) -> u32 {
        self.hints.budget().remaining()
    }

    pub fn hints_used(&self) -> u32 {
        self.hints.budget().used()
    }

    /// Rows submitted so far
    pub fn attempts_used(&self) -> usize {
        self.board.rows().iter().filter(|r| r.is_submitted()).count()
    }

    /// Stats as loaded at start, or as saved once the session ended
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn result(&self) -> Option<SessionResult> {
        self.is_over().then(|| SessionResult {
            status: self.status,
            secret: self.secret.clone(),
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            rows: self
                .board
                .rows()
                .iter()
                .map(|r| RowSnapshot {
                    tiles: r.tiles().to_vec(),
                    verdicts: r.verdicts().map(<[Verdict]>::to_vec),
                })
                .collect(),
            keyboard: self.keyboard.snapshot(),
            hints_remaining: self.hints_remaining(),
            current_row: self.current_row,
            current_col: self.current_col,
            result: self.result(),
        }
    }

    /// Register a callback run with a fresh snapshot after every state change
    pub fn on_snapshot<F>(&mut self, callback: F)
    where
        F: FnMut(&Snapshot) + 'static,
    {
        self.observers.push(Box::new(callback));
    }

    pub fn send_intent(&mut self, intent: Intent) -> IntentOutcome {
        match intent {
            Intent::Append(letter) => edited(self.append(letter)),
            Intent::Delete => edited(self.delete()),
            Intent::Submit => match self.submit() {
                Ok(Submission::Ignored) => IntentOutcome::Ignored,
                Ok(submission) => IntentOutcome::Submitted(submission),
                Err(e) => IntentOutcome::Rejected(e),
            },
            Intent::Hint(kind) => match self.request_hint(kind) {
                HintEffect::None => IntentOutcome::Ignored,
                effect => IntentOutcome::Hint(effect),
            },
        }
    }

    /// Type a letter into the current row; returns false when ignored
    pub fn append(&mut self, letter: char) -> bool {
        let letter = letter.to_ascii_uppercase();
        if self.is_over() || self.current_col >= self.config.word_length {
            return false;
        }
        if !letter.is_ascii_uppercase() {
            return false;
        }
        self.board
            .set_letter(self.current_row, self.current_col, letter, false);
        self.current_col += 1;
        tracing::debug!(letter = %letter, col = self.current_col, "append");
        self.notify();
        true
    }

    /// Clear the last filled tile of the current row; returns false when ignored
    pub fn delete(&mut self) -> bool {
        if self.is_over() || self.current_col == 0 {
            return false;
        }
        self.current_col -= 1;
        self.board.clear(self.current_row, self.current_col);
        tracing::debug!(col = self.current_col, "delete");
        self.notify();
        true
    }

    /// Score the current row and advance, win, or lose
    pub fn submit(&mut self) -> Result<Submission, SubmitError> {
        if self.is_over() {
            return Ok(Submission::Ignored);
        }

        let row = self.current_row;
        let guess = match self.board.row(row).word() {
            Some(word) if self.current_col == self.config.word_length => word,
            _ => {
                tracing::debug!(row, filled = self.current_col, "row incomplete");
                return Err(SubmitError::RowIncomplete {
                    filled: self.current_col,
                    required: self.config.word_length,
                });
            }
        };

        let verdicts = evaluate(&self.secret, &guess);
        self.board.seal(row, verdicts.clone());
        self.keyboard.observe_row(guess.letters(), &verdicts);
        tracing::debug!(row, guess = %guess, verdicts = ?verdicts, "row scored");

        let submission = if is_solved(&verdicts) {
            self.status = SessionStatus::Won { row };
            self.finish(&mut |s| s.record_win(row));
            Submission::Won { row, verdicts }
        } else if row + 1 == self.config.max_attempts {
            self.status = SessionStatus::Lost;
            self.finish(&mut |s| s.record_loss());
            Submission::Lost {
                verdicts,
                secret: self.secret.clone(),
            }
        } else {
            self.current_row += 1;
            self.current_col = 0;
            Submission::Continue { row, verdicts }
        };

        self.notify();
        Ok(submission)
    }

    /// Spend a hint; `HintEffect::None` means nothing changed
    pub fn request_hint(&mut self, kind: HintKind) -> HintEffect {
        if self.is_over() {
            return HintEffect::None;
        }
        let effect = match kind {
            HintKind::RevealLetter => self.hints.reveal_letter(
                &self.secret,
                &mut self.board,
                self.current_row,
                &mut self.current_col,
            ),
            HintKind::EliminateLetters => {
                self.hints.eliminate_letters(&self.secret, &mut self.keyboard)
            }
        };
        if effect != HintEffect::None {
            self.notify();
        }
        effect
    }

    fn finish(&mut self, apply: &mut dyn FnMut(&mut Stats)) {
        tracing::info!(status = ?self.status, secret = %self.secret, "session finished");
        match self.store.update(apply) {
            Ok(saved) => self.stats = saved,
            Err(e) => {
                tracing::warn!(error = %e, "failed to persist stats");
                apply(&mut self.stats);
            }
        }
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer(&snapshot);
        }
    }
}

fn edited(applied: bool) -> IntentOutcome {
    if applied {
        IntentOutcome::Edited
    } else {
        IntentOutcome::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::MemoryStatsStore;
    use assert_matches::assert_matches;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session(secret: &str) -> (GameSession, Arc<MemoryStatsStore>) {
        let store = Arc::new(MemoryStatsStore::new(6));
        let session = GameSession::with_rng(
            SessionConfig::default(),
            Word::parse(secret, 5).unwrap(),
            store.clone(),
            StdRng::seed_from_u64(3),
        );
        (session, store)
    }

    fn type_word(session: &mut GameSession, word: &str) {
        for c in word.chars() {
            session.append(c);
        }
    }

    #[test]
    fn test_new_session() {
        let (session, _) = session("REACT");
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert_eq!(session.cursor(), (0, 0));
        assert_eq!(session.hints_remaining(), 2);
        assert_eq!(session.attempts_used(), 0);
        assert!(session.result().is_none());
        assert_eq!(session.stats(), &Stats::new(6));
    }

    #[test]
    fn test_append_and_delete() {
        let (mut session, _) = session("REACT");
        assert!(session.append('c'));
        assert!(session.append('R'));
        assert_eq!(session.cursor(), (0, 2));
        assert_eq!(session.board().row(0).tiles()[0].letter, Some('C'));

        assert!(session.delete());
        assert_eq!(session.cursor(), (0, 1));
        assert!(session.board().row(0).tiles()[1].letter.is_none());
    }

    #[test]
    fn test_extra_input_is_ignored() {
        let (mut session, _) = session("REACT");
        type_word(&mut session, "CRATE");
        assert!(!session.append('X'));
        assert_eq!(session.cursor(), (0, 5));
        assert_eq!(session.board().row(0).word().unwrap().as_str(), "CRATE");
    }

    #[test]
    fn test_non_letters_are_ignored() {
        let (mut session, _) = session("REACT");
        assert!(!session.append('1'));
        assert!(!session.append('é'));
        assert_eq!(session.cursor(), (0, 0));
    }

    #[test]
    fn test_delete_at_start_is_ignored() {
        let (mut session, _) = session("REACT");
        assert!(!session.delete());
        assert_eq!(session.cursor(), (0, 0));
    }

    #[test]
    fn test_incomplete_row_rejected_without_change() {
        let (mut session, store) = session("REACT");
        type_word(&mut session, "CRA");
        let before = session.snapshot();

        assert_eq!(
            session.submit(),
            Err(SubmitError::RowIncomplete {
                filled: 3,
                required: 5
            })
        );
        assert_eq!(session.snapshot(), before);
        assert_eq!(store.load(), Stats::new(6));
    }

    #[test]
    fn test_wrong_guess_advances_row() {
        let (mut session, _) = session("REACT");
        type_word(&mut session, "CRATE");
        assert_matches!(
            session.submit(),
            Ok(Submission::Continue { row: 0, .. })
        );
        assert_eq!(session.cursor(), (1, 0));
        assert_eq!(session.keyboard().get('A'), Some(Verdict::Correct));
        assert_eq!(session.keyboard().get('C'), Some(Verdict::Present));
        assert_eq!(session.attempts_used(), 1);
    }

    #[test]
    fn test_win_updates_stats_once() {
        let (mut session, store) = session("REACT");
        type_word(&mut session, "CRATE");
        session.submit().unwrap();
        type_word(&mut session, "REACT");

        assert_matches!(session.submit(), Ok(Submission::Won { row: 1, .. }));
        assert_eq!(session.status(), SessionStatus::Won { row: 1 });

        let stats = store.load();
        assert_eq!(stats.played, 1);
        assert_eq!(stats.won, 1);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.max_streak, 1);
        assert_eq!(stats.guess_distribution, vec![0, 1, 0, 0, 0, 0]);
        assert_eq!(session.stats(), &stats);

        // Game over: everything is ignored and stats stay put
        assert!(!session.append('A'));
        assert!(!session.delete());
        assert_eq!(session.submit(), Ok(Submission::Ignored));
        assert_eq!(
            session.request_hint(HintKind::RevealLetter),
            HintEffect::None
        );
        assert_eq!(store.load(), stats);
    }

    #[test]
    fn test_loss_after_last_row() {
        let (mut session, store) = session("ZEBRA");
        for i in 0..6 {
            assert!(!session.is_over(), "ended early at row {i}");
            type_word(&mut session, "CRANE");
            let submission = session.submit().unwrap();
            if i < 5 {
                assert_matches!(submission, Submission::Continue { .. });
            } else {
                assert_matches!(submission, Submission::Lost { ref secret, .. } if secret.as_str() == "ZEBRA");
            }
        }
        assert_eq!(session.status(), SessionStatus::Lost);
        assert_eq!(session.result().unwrap().secret.as_str(), "ZEBRA");

        let stats = store.load();
        assert_eq!(stats.played, 1);
        assert_eq!(stats.won, 0);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.guess_distribution, vec![0; 6]);
    }

    #[test]
    fn test_loss_resets_existing_streak() {
        let mut prior = Stats::new(6);
        prior.record_win(2);
        prior.record_win(3);
        let store = Arc::new(MemoryStatsStore::with_stats(prior.clone()));
        let mut session = GameSession::with_rng(
            SessionConfig::default(),
            Word::parse("ZEBRA", 5).unwrap(),
            store.clone(),
            StdRng::seed_from_u64(0),
        );
        assert_eq!(session.stats(), &prior);

        for _ in 0..6 {
            type_word(&mut session, "QUILT");
            session.submit().unwrap();
        }
        let stats = store.load();
        assert_eq!(stats.played, 3);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.max_streak, 2);
        assert_eq!(stats.guess_distribution, prior.guess_distribution);
    }

    #[test]
    fn test_reveal_hint_advances_cursor() {
        let (mut session, _) = session("REACT");
        assert_eq!(
            session.request_hint(HintKind::RevealLetter),
            HintEffect::Revealed {
                index: 0,
                letter: 'R'
            }
        );
        assert_eq!(session.cursor(), (0, 1));
        assert!(session.board().row(0).tiles()[0].hinted);

        type_word(&mut session, "EACT");
        assert_matches!(session.submit(), Ok(Submission::Won { row: 0, .. }));
    }

    #[test]
    fn test_hint_budget_never_negative() {
        let (mut session, _) = session("REACT");
        session.request_hint(HintKind::EliminateLetters);
        session.request_hint(HintKind::RevealLetter);
        assert_eq!(session.hints_remaining(), 0);
        assert_eq!(session.hints_used(), 2);

        let before = session.snapshot();
        assert_eq!(
            session.request_hint(HintKind::EliminateLetters),
            HintEffect::None
        );
        assert_eq!(
            session.request_hint(HintKind::RevealLetter),
            HintEffect::None
        );
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_send_intent_dispatch() {
        let (mut session, _) = session("REACT");
        assert_eq!(session.send_intent(Intent::Delete), IntentOutcome::Ignored);
        assert_eq!(
            session.send_intent(Intent::Append('R')),
            IntentOutcome::Edited
        );
        assert_matches!(
            session.send_intent(Intent::Submit),
            IntentOutcome::Rejected(SubmitError::RowIncomplete { filled: 1, .. })
        );
        assert_matches!(
            session.send_intent(Intent::Hint(HintKind::EliminateLetters)),
            IntentOutcome::Hint(HintEffect::Eliminated(_))
        );
        for c in "EACT".chars() {
            session.send_intent(Intent::Append(c));
        }
        assert_matches!(
            session.send_intent(Intent::Submit),
            IntentOutcome::Submitted(Submission::Won { row: 0, .. })
        );
        assert_eq!(session.send_intent(Intent::Submit), IntentOutcome::Ignored);
    }

    #[test]
    fn test_observers_see_each_change() {
        let (mut session, _) = session("REACT");
        let seen: Rc<RefCell<Vec<Snapshot>>> = Rc::default();
        let sink = Rc::clone(&seen);
        session.on_snapshot(move |s| sink.borrow_mut().push(s.clone()));

        session.append('R');
        session.delete();
        session.delete(); // ignored, no snapshot
        type_word(&mut session, "REACT");
        session.submit().unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 8);
        let last = seen.last().unwrap();
        assert_eq!(
            last.result.as_ref().map(|r| r.status),
            Some(SessionStatus::Won { row: 0 })
        );
        assert_eq!(last.share_grid(), "🟩🟩🟩🟩🟩");
    }

    #[test]
    fn test_share_grid_lists_submitted_rows() {
        let (mut session, _) = session("REACT");
        type_word(&mut session, "CRATE");
        session.submit().unwrap();
        type_word(&mut session, "RE");
        assert_eq!(session.snapshot().share_grid(), "🟨🟨🟩🟨🟨");
    }
}
