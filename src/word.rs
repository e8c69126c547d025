//! Fixed-length uppercase words

use crate::error::WordError;
use serde::Serialize;
use std::fmt;

/// An uppercase A-Z word of a known length
///
/// Both the secret and every accepted guess are `Word`s, so the evaluator
/// can rely on them being normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Word(String);

impl Word {
    /// Normalize `text` to uppercase and check it has exactly `length` letters
    pub fn parse(text: &str, length: usize) -> Result<Self, WordError> {
        let text = text.trim().to_ascii_uppercase();

        if !text.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(WordError::InvalidCharacters(text));
        }

        if text.len() != length {
            return Err(WordError::InvalidLength {
                expected: length,
                actual: text.len(),
            });
        }

        Ok(Self(text))
    }

    /// Build a word from letters already known to be A-Z
    pub(crate) fn from_letters(letters: &[char]) -> Self {
        Self(letters.iter().collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Letter at `index`
    ///
    /// # Panics
    /// Panics if `index >= self.len()`
    pub fn letter_at(&self, index: usize) -> char {
        self.0.as_bytes()[index] as char
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.0.contains(letter)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
