use crate::evaluator::Verdict;
use std::collections::BTreeMap;

/// Best verdict seen per letter across all submitted rows
///
/// Entries only ever move up in precedence (`Absent -> Present -> Correct`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    letters: BTreeMap<char, Verdict>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `verdict` for `letter`; returns true if the stored state changed
    pub fn observe(&mut self, letter: char, verdict: Verdict) -> bool {
        let stored = self.letters.get(&letter).copied();
        let upgrade = match verdict {
            Verdict::Correct => stored != Some(Verdict::Correct),
            Verdict::Present => stored.map_or(true, |s| s == Verdict::Absent),
            Verdict::Absent => stored.is_none(),
        };
        if upgrade {
            self.letters.insert(letter, verdict);
        }
        upgrade
    }

    /// Apply one scored row, letter by letter in position order
    pub fn observe_row(&mut self, letters: impl IntoIterator<Item = char>, verdicts: &[Verdict]) {
        for (letter, &verdict) in letters.into_iter().zip(verdicts) {
            self.observe(letter, verdict);
        }
    }

    pub fn get(&self, letter: char) -> Option<Verdict> {
        self.letters.get(&letter).copied()
    }

    /// Letters known to be in the word (Correct or Present somewhere)
    pub fn is_known_present(&self, letter: char) -> bool {
        matches!(
            self.get(letter),
            Some(Verdict::Correct) | Some(Verdict::Present)
        )
    }

    pub fn snapshot(&self) -> BTreeMap<char, Verdict> {
        self.letters.clone()
    }
}
