use crate::evaluator::Verdict;
use crate::word::Word;
use serde::Serialize;

/// One letter slot of an attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub letter: Option<char>,
    /// Filled by a reveal hint rather than typed
    pub hinted: bool,
}

/// One attempt; verdicts are set once on submission and never recomputed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    tiles: Vec<Tile>,
    verdicts: Option<Vec<Verdict>>,
}

impl Row {
    fn new(width: usize) -> Self {
        Self {
            tiles: vec![Tile::default(); width],
            verdicts: None,
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn verdicts(&self) -> Option<&[Verdict]> {
        self.verdicts.as_deref()
    }

    pub fn is_submitted(&self) -> bool {
        self.verdicts.is_some()
    }

    /// The typed word, if every tile is filled
    pub fn word(&self) -> Option<Word> {
        let letters: Option<Vec<char>> = self.tiles.iter().map(|t| t.letter).collect();
        letters.map(|l| Word::from_letters(&l))
    }

    /// A hint-revealed tile is locked in: it already holds the secret's letter
    pub fn is_locked(&self, col: usize) -> bool {
        self.tiles[col].hinted && self.tiles[col].letter.is_some()
    }
}

/// The fixed grid of attempts for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: Vec<Row>,
}

impl Board {
    pub fn new(max_attempts: usize, word_length: usize) -> Self {
        Self {
            rows: (0..max_attempts).map(|_| Row::new(word_length)).collect(),
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> &Row {
        &self.rows[row]
    }

    pub(crate) fn set_letter(&mut self, row: usize, col: usize, letter: char, hinted: bool) {
        debug_assert!(!self.rows[row].is_submitted(), "submitted rows are immutable");
        let tile = &mut self.rows[row].tiles[col];
        tile.letter = Some(letter);
        tile.hinted = hinted;
    }

    pub(crate) fn clear(&mut self, row: usize, col: usize) {
        self.rows[row].tiles[col] = Tile::default();
    }

    pub(crate) fn seal(&mut self, row: usize, verdicts: Vec<Verdict>) {
        debug_assert!(self.rows[row].verdicts.is_none(), "row scored twice");
        self.rows[row].verdicts = Some(verdicts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(6, 5);
        assert_eq!(board.rows().len(), 6);
        for row in board.rows() {
            assert_eq!(row.tiles().len(), 5);
            assert!(!row.is_submitted());
            assert!(row.word().is_none());
        }
    }

    #[test]
    fn test_word_requires_full_row() {
        let mut board = Board::new(6, 3);
        board.set_letter(0, 0, 'C', false);
        board.set_letter(0, 1, 'A', false);
        assert!(board.row(0).word().is_none());
        board.set_letter(0, 2, 'T', false);
        assert_eq!(board.row(0).word().unwrap().as_str(), "CAT");
    }

    #[test]
    fn test_clear_drops_hint_lock() {
        let mut board = Board::new(1, 5);
        board.set_letter(0, 0, 'Z', true);
        assert!(board.row(0).is_locked(0));
        board.clear(0, 0);
        assert!(!board.row(0).is_locked(0));
        assert_eq!(board.row(0).tiles()[0], Tile::default());
    }

    #[test]
    fn test_seal_stores_verdicts() {
        let mut board = Board::new(2, 1);
        board.set_letter(0, 0, 'A', false);
        board.seal(0, vec![Verdict::Present]);
        assert!(board.row(0).is_submitted());
        assert_eq!(board.row(0).verdicts(), Some(&[Verdict::Present][..]));
        assert!(!board.row(1).is_submitted());
    }
}
