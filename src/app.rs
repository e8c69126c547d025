use crate::hint::{HintEffect, HintKind};
use crate::history::{GameLog, GameRecord};
use crate::runtime::{Command, CommandSource, Runner};
use crate::session::{GameSession, Intent, IntentOutcome, SessionConfig, Submission};
use crate::stats::StatsStore;
use crate::ui::{self, Theme};
use crate::word_source::WordSource;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Plays rounds back to back, one [`GameSession`] per round
pub struct App {
    config: SessionConfig,
    theme: Theme,
    words: Box<dyn WordSource>,
    store: Arc<dyn StatsStore>,
    log: Option<GameLog>,
    seed: Option<u64>,
    round: u64,
    session: GameSession,
}

impl App {
    pub fn new(
        config: SessionConfig,
        theme: Theme,
        mut words: Box<dyn WordSource>,
        store: Arc<dyn StatsStore>,
        log: Option<GameLog>,
        seed: Option<u64>,
    ) -> Self {
        let session = Self::start_round(config, words.as_mut(), &store, seed, 0);
        Self {
            config,
            theme,
            words,
            store,
            log,
            seed,
            round: 0,
            session,
        }
    }

    fn start_round(
        config: SessionConfig,
        words: &mut dyn WordSource,
        store: &Arc<dyn StatsStore>,
        seed: Option<u64>,
        round: u64,
    ) -> GameSession {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(round)),
            None => StdRng::from_entropy(),
        };
        GameSession::with_rng(config, words.next_word(), Arc::clone(store), rng)
    }

    /// Throw away the current round and start a fresh one
    pub fn reset(&mut self) {
        self.round += 1;
        self.session = Self::start_round(
            self.config,
            self.words.as_mut(),
            &self.store,
            self.seed,
            self.round,
        );
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn run<S: CommandSource, W: Write>(&mut self, runner: &Runner<S>, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}\n", ui::HELP)?;
        writeln!(out, "{}", self.theme.screen(&self.session.snapshot()))?;
        while let Some(command) = runner.step() {
            if self.handle(command, out)? == Flow::Quit {
                break;
            }
        }
        out.flush()
    }

    pub fn handle<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<Flow> {
        tracing::debug!(?command, "command");
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => {
                writeln!(out, "{}", ui::HELP)?;
                return Ok(Flow::Continue);
            }
            Command::Stats => {
                writeln!(out, "{}", ui::render_stats(&self.store.load()))?;
                return Ok(Flow::Continue);
            }
            Command::NewRound => self.reset(),
            Command::Unknown(input) => {
                writeln!(out, "Unrecognized input {input:?}; type :h for help")?;
                return Ok(Flow::Continue);
            }
            Command::Guess(word) => self.guess(&word, out)?,
            Command::Submit => {
                let outcome = self.session.send_intent(Intent::Submit);
                self.report(outcome, out)?;
            }
            Command::Delete => {
                self.session.send_intent(Intent::Delete);
            }
            Command::Hint(kind) => {
                let outcome = self.session.send_intent(Intent::Hint(kind));
                if outcome == IntentOutcome::Ignored {
                    writeln!(out, "{}", no_hint_reason(&self.session, kind))?;
                }
                self.report(outcome, out)?;
            }
        }

        writeln!(out, "{}", self.theme.screen(&self.session.snapshot()))?;
        if self.session.is_over() {
            writeln!(out, "Game over. :n for a new round, :q to quit")?;
        }
        Ok(Flow::Continue)
    }

    fn guess<W: Write>(&mut self, word: &str, out: &mut W) -> io::Result<()> {
        if self.session.is_over() {
            return Ok(());
        }
        let length = self.config.word_length;
        if word.chars().count() != length {
            return writeln!(out, "Guesses must be {length} letters");
        }
        let (row, _) = self.session.cursor();
        let revealed: Vec<char> = self
            .session
            .board()
            .row(row)
            .tiles()
            .iter()
            .take_while(|tile| tile.hinted)
            .filter_map(|tile| tile.letter)
            .collect();
        let typed: Vec<char> = word.chars().map(|c| c.to_ascii_uppercase()).collect();
        let keep = if typed.starts_with(&revealed) {
            revealed.len()
        } else {
            writeln!(
                out,
                "Your guess replaces the revealed {}",
                revealed.iter().join("")
            )?;
            0
        };
        while self.session.cursor().1 > keep && self.session.delete() {}
        for &letter in &typed[keep..] {
            self.session.send_intent(Intent::Append(letter));
        }
        let outcome = self.session.send_intent(Intent::Submit);
        self.report(outcome, out)
    }

    fn report<W: Write>(&mut self, outcome: IntentOutcome, out: &mut W) -> io::Result<()> {
        match outcome {
            IntentOutcome::Rejected(e) => writeln!(out, "{e}"),
            IntentOutcome::Hint(HintEffect::Revealed { index, letter }) => {
                writeln!(out, "Letter {} is {letter}", index + 1)
            }
            IntentOutcome::Hint(HintEffect::Eliminated(letters)) => {
                writeln!(out, "Not in the word: {}", letters.iter().join(" "))
            }
            IntentOutcome::Submitted(Submission::Won { .. } | Submission::Lost { .. }) => {
                self.finish_round(out)
            }
            _ => Ok(()),
        }
    }

    fn finish_round<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let snapshot = self.session.snapshot();
        if let Some(message) = ui::result_message(&snapshot) {
            writeln!(out, "{message}")?;
        }
        writeln!(out, "{}", ui::render_stats(self.session.stats()))?;

        if let (Some(log), Some(record)) = (&self.log, GameRecord::from_session(&self.session)) {
            if let Err(e) = log.append(&record) {
                tracing::warn!(error = %e, path = %log.path().display(), "failed to write history");
            }
        }
        Ok(())
    }
}

fn no_hint_reason(session: &GameSession, kind: HintKind) -> String {
    if session.is_over() {
        "The round is over".to_string()
    } else if session.hints_remaining() == 0 {
        "No hints left".to_string()
    } else {
        match kind {
            HintKind::RevealLetter => "Every letter in this row is already revealed".to_string(),
            HintKind::EliminateLetters => "Nothing left to eliminate".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::MemoryStatsStore;
    use crate::word_source::{FixedWordSource, WordList};

    fn app(words: &[&str]) -> (App, Arc<MemoryStatsStore>) {
        let store = Arc::new(MemoryStatsStore::new(6));
        let list = WordList::new(words.iter().copied(), 5).unwrap();
        let app = App::new(
            SessionConfig::default(),
            Theme { color: false },
            Box::new(FixedWordSource::new(list)),
            store.clone(),
            None,
            Some(1),
        );
        (app, store)
    }

    fn run(app: &mut App, commands: &[&str]) -> String {
        let mut out = Vec::new();
        for line in commands {
            let command = Command::parse(line).unwrap();
            if app.handle(command, &mut out).unwrap() == Flow::Quit {
                break;
            }
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_guess_wins_round() {
        let (mut app, store) = app(&["react"]);
        let out = run(&mut app, &["crate", "react"]);
        assert!(out.contains("(C)(R)[A](T)(E)"));
        assert!(out.contains("Solved in 2/6!"));
        assert!(out.contains("Game over"));
        assert_eq!(store.load().guess_distribution[1], 1);
    }

    #[test]
    fn test_wrong_length_guess_is_reported() {
        let (mut app, _) = app(&["react"]);
        let out = run(&mut app, &["cat"]);
        assert!(out.contains("Guesses must be 5 letters"));
        assert_eq!(app.session().cursor(), (0, 0));
    }

    #[test]
    fn test_partial_row_submit_is_rejected() {
        let (mut app, _) = app(&["react"]);
        let out = run(&mut app, &[":r", ":submit"]);
        assert!(out.contains("Letter 1 is R"));
        assert!(out.contains("not enough letters: 1 of 5"));
    }

    #[test]
    fn test_guess_keeps_matching_revealed_letters() {
        let (mut app, _) = app(&["react"]);
        run(&mut app, &[":r", ":r"]);
        assert_eq!(app.session().cursor(), (0, 2));
        let out = run(&mut app, &["reach"]);
        assert!(!out.contains("replaces the revealed"));
        let tiles = app.session().board().row(0).tiles();
        assert!(tiles[0].hinted && tiles[1].hinted);
        assert!(!tiles[2].hinted);
        assert_eq!(app.session().cursor(), (1, 0));
    }

    #[test]
    fn test_guess_over_revealed_letters_is_noted() {
        let (mut app, _) = app(&["react"]);
        run(&mut app, &[":r"]);
        let out = run(&mut app, &["crate"]);
        assert!(out.contains("Your guess replaces the revealed R"));
        assert!(out.contains("(C)(R)[A](T)(E)"));
    }

    #[test]
    fn test_hints_run_out() {
        let (mut app, _) = app(&["react"]);
        let out = run(&mut app, &[":e", ":r", ":r"]);
        assert!(out.contains("Not in the word:"));
        assert!(out.contains("No hints left"));
        assert_eq!(app.session().hints_remaining(), 0);
    }

    #[test]
    fn test_new_round_draws_next_word() {
        let (mut app, store) = app(&["react", "zebra"]);
        run(&mut app, &["react", ":n"]);
        assert!(!app.session().is_over());
        let out = run(&mut app, &["zebra"]);
        assert!(out.contains("Solved in 1/6!"));
        let stats = store.load();
        assert_eq!(stats.won, 2);
        assert_eq!(stats.current_streak, 2);
    }

    #[test]
    fn test_quit_stops() {
        let (mut app, _) = app(&["react"]);
        let mut out = Vec::new();
        assert_eq!(app.handle(Command::Quit, &mut out).unwrap(), Flow::Quit);
        assert!(out.is_empty());
    }
}
