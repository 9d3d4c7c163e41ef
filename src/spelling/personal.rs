//! Words learned from the user's own typing.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Minimum length, in characters, of a word worth learning.
pub const MIN_LEARNED_WORD_LEN: usize = 2;

/// A word learned from user typing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserWord {
    /// The word, lowercase.
    pub word: String,
    /// How many times the user has typed it.
    pub frequency: u32,
    /// Logical timestamp of the last time it was typed.
    pub last_used: u64,
}

/// The user's personal dictionary.
///
/// Learned words never make a word "valid" for correction purposes; they
/// only boost ranked suggestions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalDictionary {
    words: BTreeMap<String, UserWord>,
    clock: u64,
}

impl PersonalDictionary {
    /// Create an empty personal dictionary.
    pub fn new() -> Self {
        PersonalDictionary::default()
    }

    /// Record that the user typed `word`.
    ///
    /// Returns false when the word is too short or not a single token.
    pub fn learn(&mut self, word: &str) -> bool {
        let trimmed = word.trim();
        if trimmed.chars().count() < MIN_LEARNED_WORD_LEN
            || trimmed.chars().any(char::is_whitespace)
        {
            return false;
        }

        let normalized = trimmed.to_lowercase();
        self.clock += 1;
        let clock = self.clock;

        let entry = self
            .words
            .entry(normalized.clone())
            .or_insert_with(|| UserWord {
                word: normalized,
                frequency: 0,
                last_used: 0,
            });
        entry.frequency = entry.frequency.saturating_add(1);
        entry.last_used = clock;
        true
    }

    /// Look up a learned word, ignoring case.
    pub fn get(&self, word: &str) -> Option<&UserWord> {
        self.words.get(word.to_lowercase().as_str())
    }

    /// Check whether a word has been learned, ignoring case.
    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    /// How many times a word has been typed, 0 when never.
    pub fn frequency(&self, word: &str) -> u32 {
        self.get(word).map_or(0, |w| w.frequency)
    }

    /// Number of learned words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check whether nothing has been learned.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The most often typed words; ties go to the most recently used.
    pub fn most_frequent(&self, limit: usize) -> Vec<&UserWord> {
        let mut words: Vec<&UserWord> = self.words.values().collect();
        words.sort_by(|a, b| {
            b.frequency
                .cmp(&a.frequency)
                .then_with(|| b.last_used.cmp(&a.last_used))
        });
        words.truncate(limit);
        words
    }

    /// Forget every learned word.
    pub fn clear(&mut self) {
        self.words.clear();
        self.clock = 0;
    }

    /// Load a personal dictionary from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Save the personal dictionary to a JSON file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}
