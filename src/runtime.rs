use crate::hint::HintKind;
use std::io::BufRead;
use std::sync::mpsc::{self, Receiver};

/// A line of player input, parsed
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replace the current row with these letters and submit it
    Guess(String),
    /// Submit the current row as it stands
    Submit,
    Delete,
    Hint(HintKind),
    NewRound,
    Stats,
    Help,
    Quit,
    /// Input that matched nothing
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let command = match line.to_ascii_lowercase().as_str() {
            ":r" | ":reveal" => Self::Hint(HintKind::RevealLetter),
            ":e" | ":eliminate" => Self::Hint(HintKind::EliminateLetters),
            ":d" | ":del" => Self::Delete,
            ":enter" | ":submit" => Self::Submit,
            ":n" | ":new" => Self::NewRound,
            ":s" | ":stats" => Self::Stats,
            ":h" | ":help" | "?" => Self::Help,
            ":q" | ":quit" => Self::Quit,
            word if word.chars().all(|c| c.is_ascii_alphabetic()) => {
                Self::Guess(word.to_ascii_uppercase())
            }
            _ => Self::Unknown(line.to_string()),
        };
        Some(command)
    }
}

/// Source of player commands
pub trait CommandSource: Send + 'static {
    /// Block until the next command; `None` once input is exhausted
    fn recv(&self) -> Option<Command>;
}

/// Production source reading lines from stdin on a background thread
pub struct StdinCommandSource {
    rx: Receiver<Command>,
}

impl StdinCommandSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if let Some(command) = Command::parse(&line) {
                    if tx.send(command).is_err() {
                        break;
                    }
                }
            }
        });

        Self { rx }
    }
}

impl Default for StdinCommandSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandSource for StdinCommandSource {
    fn recv(&self) -> Option<Command> {
        self.rx.recv().ok()
    }
}

/// Test command source for unit tests
pub struct TestCommandSource {
    rx: Receiver<Command>,
}

impl TestCommandSource {
    pub fn new(rx: Receiver<Command>) -> Self {
        Self { rx }
    }
}

impl CommandSource for TestCommandSource {
    fn recv(&self) -> Option<Command> {
        self.rx.recv().ok()
    }
}

/// Runner that advances the application one command at a time
pub struct Runner<S: CommandSource> {
    source: S,
}

impl<S: CommandSource> Runner<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn step(&self) -> Option<Command> {
        self.source.recv()
    }
}
