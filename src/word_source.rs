use crate::error::WordListError;
use crate::word::Word;
use include_dir::{include_dir, Dir};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;
use std::path::Path;

static WORDS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/words");

/// Name of the word list bundled with the binary
pub const DEFAULT_LIST: &str = "english";

#[derive(Deserialize, Clone, Debug)]
struct WordListFile {
    #[allow(dead_code)]
    name: String,
    words: Vec<String>,
}

/// A non-empty list of candidate secrets, all of the same length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    length: usize,
    words: Vec<Word>,
}

impl WordList {
    /// Keep the entries that are valid `length`-letter words
    pub fn new<I, S>(entries: I, length: usize) -> Result<Self, WordListError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<Word> = entries
            .into_iter()
            .filter_map(|entry| match Word::parse(entry.as_ref(), length) {
                Ok(word) => Some(word),
                Err(e) => {
                    tracing::debug!(entry = entry.as_ref(), error = %e, "skipping word list entry");
                    None
                }
            })
            .collect();

        if words.is_empty() {
            return Err(WordListError::Empty { length });
        }

        Ok(Self { length, words })
    }

    /// The list compiled into the crate
    pub fn embedded(name: &str, length: usize) -> Result<Self, WordListError> {
        let file_name = format!("{name}.json");
        let contents = WORDS_DIR
            .get_file(&file_name)
            .and_then(|f| f.contents_utf8())
            .ok_or(WordListError::MissingEmbedded(file_name))?;
        Self::from_json(contents, length)
    }

    /// A JSON file of the form `{ "name": .., "size": .., "words": [..] }`
    pub fn from_file<P: AsRef<Path>>(path: P, length: usize) -> Result<Self, WordListError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| WordListError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents, length)
    }

    fn from_json(contents: &str, length: usize) -> Result<Self, WordListError> {
        let file: WordListFile = serde_json::from_str(contents)?;
        Self::new(file.words, length)
    }

    pub fn word_length(&self) -> usize {
        self.length
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Supplies the secret for each new session
pub trait WordSource {
    fn next_word(&mut self) -> Word;
}

/// Uniform random choice from a word list; repeats across sessions are allowed
pub struct RandomWordSource {
    list: WordList,
    rng: StdRng,
}

impl RandomWordSource {
    pub fn new(list: WordList) -> Self {
        Self {
            list,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(list: WordList, seed: u64) -> Self {
        Self {
            list,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn list(&self) -> &WordList {
        &self.list
    }
}

impl WordSource for RandomWordSource {
    fn next_word(&mut self) -> Word {
        // WordList is never empty
        self.list.words[..]
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| self.list.words[0].clone())
    }
}

/// Hands out the words of a list in order, wrapping around
pub struct FixedWordSource {
    list: WordList,
    next: usize,
}

impl FixedWordSource {
    pub fn new(list: WordList) -> Self {
        Self { list, next: 0 }
    }
}

impl WordSource for FixedWordSource {
    fn next_word(&mut self) -> Word {
        let word = self.list.words[self.next].clone();
        self.next = (self.next + 1) % self.list.words.len();
        word
    }
}
