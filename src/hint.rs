//! Hints: revealing a letter of the secret or ruling out absent letters
//!
//! Each hint spends one unit of a per-session budget. A hint that cannot do
//! anything leaves the budget untouched.

use crate::board::Board;
use crate::evaluator::Verdict;
use crate::keyboard::KeyboardState;
use crate::word::Word;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum HintKind {
    RevealLetter,
    EliminateLetters,
}

/// What a hint request changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum HintEffect {
    /// Nothing changed and no budget was spent
    None,
    Revealed { index: usize, letter: char },
    Eliminated(Vec<char>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HintBudget {
    remaining: u32,
    max: u32,
}

impl HintBudget {
    pub fn new(max: u32) -> Self {
        Self {
            remaining: max,
            max,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn used(&self) -> u32 {
        self.max - self.remaining
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    fn consume(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

pub struct HintEngine {
    budget: HintBudget,
    eliminate_count: usize,
    rng: StdRng,
}

impl HintEngine {
    pub fn new(max_hints: u32, eliminate_count: usize) -> Self {
        Self::with_rng(max_hints, eliminate_count, StdRng::from_entropy())
    }

    pub fn with_rng(max_hints: u32, eliminate_count: usize, rng: StdRng) -> Self {
        Self {
            budget: HintBudget::new(max_hints),
            eliminate_count,
            rng,
        }
    }

    pub fn budget(&self) -> HintBudget {
        self.budget
    }

    /// Write the secret's letter into the first tile of `row` that is not
    /// already locked in, moving the column cursor past it
    pub fn reveal_letter(
        &mut self,
        secret: &Word,
        board: &mut Board,
        row: usize,
        col: &mut usize,
    ) -> HintEffect {
        if self.budget.is_exhausted() {
            return HintEffect::None;
        }
        let Some(index) = reveal_position(board, row) else {
            return HintEffect::None;
        };

        let letter = secret.letter_at(index);
        board.set_letter(row, index, letter, true);
        *col = (*col).max(index + 1);
        self.budget.consume();
        tracing::debug!(row, index, "revealed letter");
        HintEffect::Revealed { index, letter }
    }

    /// Mark up to `eliminate_count` random letters missing from the secret as Absent
    pub fn eliminate_letters(&mut self, secret: &Word, keyboard: &mut KeyboardState) -> HintEffect {
        if self.budget.is_exhausted() {
            return HintEffect::None;
        }

        let candidates = elimination_candidates(secret, keyboard);
        let mut picked: Vec<char> = candidates
            .choose_multiple(&mut self.rng, self.eliminate_count)
            .copied()
            .collect();
        picked.sort_unstable();
        for &letter in &picked {
            keyboard.observe(letter, Verdict::Absent);
        }
        self.budget.consume();
        tracing::debug!(letters = ?picked, "eliminated letters");
        HintEffect::Eliminated(picked)
    }
}

/// Lowest column of `row` not already locked in by an earlier reveal
pub fn reveal_position(board: &Board, row: usize) -> Option<usize> {
    let row = board.row(row);
    (0..row.tiles().len()).find(|&col| !row.is_locked(col))
}

/// Letters A-Z that are not in the secret and not already shown as in the word
pub fn elimination_candidates(secret: &Word, keyboard: &KeyboardState) -> Vec<char> {
    ('A'..='Z')
        .filter(|&c| !secret.contains(c) && !keyboard.is_known_present(c))
        .collect()
}
