//! Text rendering of session snapshots
//!
//! Colored output uses ANSI styling; plain output marks verdicts with
//! brackets so it stays readable in logs and tests:
//! `[A]` correct, `(A)` present, ` a ` absent, `<A>` revealed by a hint.

use crate::board::Tile;
use crate::evaluator::Verdict;
use crate::session::{SessionStatus, Snapshot};
use crate::stats::Stats;
use crossterm::style::Stylize;
use itertools::Itertools;

const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

pub const HELP: &str = "\
Type a word and press enter to guess it.
Commands:
  :r, :reveal      reveal a letter of the secret (uses a hint)
  :e, :eliminate   rule out letters not in the secret (uses a hint)
  :d, :del         delete the last letter of the current row
  :submit          submit the current row as it stands
  :n, :new         start a new round
  :s, :stats       show statistics
  :q, :quit        quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub color: bool,
}

impl Theme {
    fn cell(&self, letter: char, verdict: Option<Verdict>, hinted: bool) -> String {
        if !self.color {
            return match (verdict, hinted) {
                (Some(Verdict::Correct), _) => format!("[{letter}]"),
                (Some(Verdict::Present), _) => format!("({letter})"),
                (Some(Verdict::Absent), _) => format!(" {} ", letter.to_ascii_lowercase()),
                (None, true) => format!("<{letter}>"),
                (None, false) => format!(" {letter} "),
            };
        }
        let text = format!(" {letter} ");
        match (verdict, hinted) {
            (Some(Verdict::Correct), _) => text.black().on_green().to_string(),
            (Some(Verdict::Present), _) => text.black().on_yellow().to_string(),
            (Some(Verdict::Absent), _) => text.white().on_dark_grey().to_string(),
            (None, true) => text.green().bold().to_string(),
            (None, false) => text.bold().to_string(),
        }
    }

    fn tile(&self, tile: &Tile, verdict: Option<Verdict>) -> String {
        match tile.letter {
            Some(letter) => self.cell(letter, verdict, tile.hinted),
            None => " _ ".to_string(),
        }
    }

    pub fn board(&self, snapshot: &Snapshot) -> String {
        snapshot
            .rows
            .iter()
            .map(|row| {
                row.tiles
                    .iter()
                    .enumerate()
                    .map(|(i, tile)| {
                        let verdict = row.verdicts.as_ref().map(|v| v[i]);
                        self.tile(tile, verdict)
                    })
                    .join("")
            })
            .join("\n")
    }

    pub fn keyboard(&self, snapshot: &Snapshot) -> String {
        KEYBOARD_ROWS
            .iter()
            .enumerate()
            .map(|(indent, keys)| {
                let keys = keys
                    .chars()
                    .map(|c| match snapshot.keyboard.get(&c) {
                        Some(&verdict) => self.cell(c, Some(verdict), false),
                        None => format!(" {c} "),
                    })
                    .join("");
                format!("{}{keys}", " ".repeat(indent))
            })
            .join("\n")
    }

    pub fn screen(&self, snapshot: &Snapshot) -> String {
        format!(
            "{}\n\n{}\nhints left: {}",
            self.board(snapshot),
            self.keyboard(snapshot),
            snapshot.hints_remaining
        )
    }
}

/// Message shown once a session ends
pub fn result_message(snapshot: &Snapshot) -> Option<String> {
    let result = snapshot.result.as_ref()?;
    match result.status {
        SessionStatus::Won { row } => Some(format!(
            "Solved in {}/{}!\n{}",
            row + 1,
            snapshot.rows.len(),
            snapshot.share_grid()
        )),
        SessionStatus::Lost => Some(format!("Out of guesses. The word was {}.", result.secret)),
        SessionStatus::InProgress => None,
    }
}

pub fn render_stats(stats: &Stats) -> String {
    let widest = stats.guess_distribution.iter().copied().max().unwrap_or(0).max(1);
    let bars = stats
        .guess_distribution
        .iter()
        .enumerate()
        .map(|(row, &count)| {
            let width = (count as usize * 20).div_ceil(widest as usize);
            format!("{}: {} {count}", row + 1, "#".repeat(width))
        })
        .join("\n");
    format!(
        "played {} | win % {} | streak {} | best {}\n{bars}",
        stats.played,
        stats.win_percentage(),
        stats.current_streak,
        stats.max_streak
    )
}
