//! Guess scoring
//!
//! Scoring runs in two passes so duplicate letters are never over-counted:
//! - First pass: exact position matches become `Correct` and consume that
//!   secret position
//! - Second pass: every remaining guess letter claims the leftmost unconsumed
//!   secret position holding the same letter (`Present`), or is `Absent`

use crate::word::Word;
use serde::Serialize;

/// Per-position feedback for a guessed letter
///
/// Variants are ordered by precedence, so `Correct > Present > Absent`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Verdict {
    Absent,
    Present,
    Correct,
}

/// Score `guess` against `secret`
///
/// # Panics
/// Panics if the words differ in length. The session only evaluates complete
/// rows, so a mismatch is a caller bug.
pub fn evaluate(secret: &Word, guess: &Word) -> Vec<Verdict> {
    assert_eq!(
        secret.len(),
        guess.len(),
        "guess length must match secret length"
    );

    let secret: Vec<char> = secret.letters().collect();
    let guess: Vec<char> = guess.letters().collect();
    let mut verdicts = vec![Verdict::Absent; guess.len()];
    let mut consumed = vec![false; secret.len()];

    for (i, (&g, &s)) in guess.iter().zip(&secret).enumerate() {
        if g == s {
            verdicts[i] = Verdict::Correct;
            consumed[i] = true;
        }
    }

    for (i, &g) in guess.iter().enumerate() {
        if verdicts[i] == Verdict::Correct {
            continue;
        }
        let unclaimed = secret
            .iter()
            .enumerate()
            .position(|(j, &s)| !consumed[j] && s == g);
        if let Some(j) = unclaimed {
            verdicts[i] = Verdict::Present;
            consumed[j] = true;
        }
    }

    verdicts
}

/// True when every verdict is `Correct`
pub fn is_solved(verdicts: &[Verdict]) -> bool {
    verdicts.iter().all(|v| *v == Verdict::Correct)
}
