//! Lexicon storage for word correction.
//!
//! A [`Lexicon`] is the immutable set of words considered correctly spelled.
//! It is assembled once through a [`LexiconBuilder`] (or one of the loading
//! helpers) and is read-only afterwards, so it can be shared between threads
//! behind an [`Arc`] without any locking.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;
use lazy_static::lazy_static;

use crate::error::{Result, TypofixError};

/// Immutable, case-normalized set of known words with their frequencies.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    /// Lowercase words in ascending lexicographic order, without duplicates
    words: Vec<String>,
    /// Word frequencies keyed by the lowercase word
    frequencies: AHashMap<String, u32>,
    /// Sum of all frequencies
    total_count: u64,
}

impl Lexicon {
    /// Create an empty lexicon. Lookups always miss and corrections never apply.
    pub fn empty() -> Self {
        Lexicon::default()
    }

    /// Create a lexicon from a list of words, each with frequency 1.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = LexiconBuilder::new();
        builder.extend(words);
        builder.build()
    }

    /// Check if a word exists in the lexicon, ignoring case.
    pub fn contains(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        self.frequencies.contains_key(word.to_lowercase().as_str())
    }

    /// Iterate over all words in ascending lexicographic order.
    ///
    /// Each call starts a fresh iteration.
    pub fn entries(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str)
    }

    /// All words as a sorted slice.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Get the frequency of a word, 0 when absent.
    pub fn frequency(&self, word: &str) -> u32 {
        self.frequencies
            .get(word.to_lowercase().as_str())
            .copied()
            .unwrap_or(0)
    }

    /// Get the number of unique words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check whether the lexicon holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Get the total frequency count.
    pub fn total_frequency(&self) -> u64 {
        self.total_count
    }

    /// Get the most frequent words, ties broken alphabetically.
    pub fn most_frequent_words(&self, limit: usize) -> Vec<(&str, u32)> {
        let mut word_freq: Vec<(&str, u32)> = self
            .words
            .iter()
            .map(|word| (word.as_str(), self.frequency(word)))
            .collect();

        word_freq.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        word_freq.truncate(limit);
        word_freq
    }

    /// Load a lexicon from a text file with one word per line.
    ///
    /// Blank lines and lines starting with `#` are skipped. A word listed
    /// several times gets one frequency unit per occurrence.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let mut builder = LexiconBuilder::new();

        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            builder.increment_word(word);
        }

        let lexicon = builder.build();
        log::debug!(
            "loaded {} words from word list {}",
            lexicon.len(),
            path.display()
        );
        Ok(lexicon)
    }

    /// Load a lexicon from a frequency file with format "word frequency" per line.
    pub fn load_from_frequency_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let mut builder = LexiconBuilder::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = trimmed.split_whitespace().collect();
            let [word, frequency] = parts[..] else {
                return Err(TypofixError::lexicon(format!(
                    "{}:{}: expected \"word frequency\", got {trimmed:?}",
                    path.display(),
                    line_num + 1
                )));
            };
            let frequency = frequency.parse::<u32>().map_err(|_| {
                TypofixError::lexicon(format!(
                    "{}:{}: invalid frequency {frequency:?}",
                    path.display(),
                    line_num + 1
                ))
            })?;

            builder.add_word_with_frequency(word, frequency);
        }

        let lexicon = builder.build();
        log::debug!(
            "loaded {} words from frequency list {}",
            lexicon.len(),
            path.display()
        );
        Ok(lexicon)
    }

    /// Load a lexicon from a JSON object mapping words to frequencies,
    /// e.g. `{"hello": 7200, "world": 6800}`.
    ///
    /// Keys that are blank or contain whitespace are rejected.
    pub fn load_from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let entries: BTreeMap<String, u32> = serde_json::from_reader(reader)?;

        let mut builder = LexiconBuilder::new();
        for (word, frequency) in entries {
            if !builder.add_word_with_frequency(&word, frequency) {
                return Err(TypofixError::lexicon(format!(
                    "{}: invalid word {word:?}",
                    path.display()
                )));
            }
        }

        let lexicon = builder.build();
        log::debug!(
            "loaded {} words from JSON dictionary {}",
            lexicon.len(),
            path.display()
        );
        Ok(lexicon)
    }

    /// Create a lexicon from a corpus of text, counting alphabetic tokens.
    pub fn from_corpus(text: &str) -> Self {
        let mut builder = LexiconBuilder::new();

        for word in text
            .split(|c: char| !c.is_alphabetic())
            .filter(|word| !word.is_empty())
        {
            builder.increment_word(word);
        }

        builder.build()
    }

    /// Save the lexicon to a frequency file, most frequent words first.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);

        for (word, frequency) in self.most_frequent_words(self.len()) {
            writeln!(writer, "{word} {frequency}")?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// Append-only builder for a [`Lexicon`].
#[derive(Debug, Clone, Default)]
pub struct LexiconBuilder {
    frequencies: AHashMap<String, u32>,
}

impl LexiconBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        LexiconBuilder::default()
    }

    /// Add a word with frequency 1, keeping any existing frequency.
    ///
    /// Returns false when the word was rejected (blank or containing whitespace).
    pub fn add_word(&mut self, word: &str) -> bool {
        match Self::normalize(word) {
            Some(normalized) => {
                self.frequencies.entry(normalized).or_insert(1);
                true
            }
            None => false,
        }
    }

    /// Add a word with the given frequency. If the word already exists,
    /// the higher frequency is retained.
    pub fn add_word_with_frequency(&mut self, word: &str, frequency: u32) -> bool {
        match Self::normalize(word) {
            Some(normalized) => {
                let entry = self.frequencies.entry(normalized).or_insert(0);
                *entry = (*entry).max(frequency);
                true
            }
            None => false,
        }
    }

    /// Increment the frequency of a word by 1, adding it if absent.
    pub fn increment_word(&mut self, word: &str) -> bool {
        match Self::normalize(word) {
            Some(normalized) => {
                let entry = self.frequencies.entry(normalized).or_insert(0);
                *entry = entry.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Add every word from an iterator with frequency 1.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.add_word(word.as_ref());
        }
    }

    /// Number of unique words added so far.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Check whether nothing has been added yet.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Freeze the builder into an immutable lexicon.
    pub fn build(self) -> Lexicon {
        let mut words: Vec<String> = self.frequencies.keys().cloned().collect();
        words.sort_unstable();
        let total_count = self.frequencies.values().map(|&f| f as u64).sum();

        Lexicon {
            words,
            frequencies: self.frequencies,
            total_count,
        }
    }

    fn normalize(word: &str) -> Option<String> {
        let trimmed = word.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            log::debug!("rejecting lexicon entry {word:?}");
            return None;
        }
        Some(trimmed.to_lowercase())
    }
}

impl<S: AsRef<str>> FromIterator<S> for Lexicon {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Lexicon::from_words(iter)
    }
}

/// Common English words with estimated frequencies, the seed list of the
/// builtin lexicon.
const ENGLISH_WORDS: &[(&str, u32)] = &[
    ("the", 1000000),
    ("be", 500000),
    ("to", 450000),
    ("of", 400000),
    ("and", 380000),
    ("a", 350000),
    ("in", 300000),
    ("that", 250000),
    ("have", 200000),
    ("i", 180000),
    ("it", 170000),
    ("for", 160000),
    ("not", 150000),
    ("on", 140000),
    ("with", 130000),
    ("he", 120000),
    ("as", 110000),
    ("you", 100000),
    ("do", 95000),
    ("at", 90000),
    ("this", 85000),
    ("but", 80000),
    ("his", 75000),
    ("by", 70000),
    ("from", 65000),
    ("they", 60000),
    ("we", 55000),
    ("say", 50000),
    ("her", 48000),
    ("she", 46000),
    ("or", 44000),
    ("an", 42000),
    ("will", 40000),
    ("my", 38000),
    ("one", 36000),
    ("all", 34000),
    ("would", 32000),
    ("there", 30000),
    ("their", 28000),
    ("what", 26000),
    ("so", 24000),
    ("up", 22000),
    ("out", 20000),
    ("if", 19000),
    ("about", 18000),
    ("who", 17000),
    ("get", 16000),
    ("which", 15000),
    ("go", 14000),
    ("me", 13000),
    ("when", 12000),
    ("make", 11000),
    ("can", 10000),
    ("like", 9500),
    ("time", 9000),
    ("no", 8500),
    ("just", 8000),
    ("him", 7500),
    ("know", 7000),
    ("take", 6500),
    ("people", 6000),
    ("into", 5500),
    ("year", 5000),
    ("your", 4800),
    ("good", 4600),
    ("some", 4400),
    ("could", 4200),
    ("them", 4000),
    ("see", 3800),
    ("other", 3600),
    ("than", 3400),
    ("then", 3200),
    ("now", 3000),
    ("look", 2800),
    ("only", 2600),
    ("come", 2400),
    ("its", 2200),
    ("over", 2000),
    ("think", 1900),
    ("also", 1800),
    ("back", 1700),
    ("after", 1600),
    ("use", 1500),
    ("two", 1400),
    ("how", 1300),
    ("our", 1200),
    ("work", 1100),
    ("first", 1000),
    ("well", 950),
    ("way", 900),
    ("even", 850),
    ("new", 800),
    ("want", 750),
    ("because", 700),
    ("any", 650),
    ("these", 600),
    ("give", 550),
    ("day", 500),
    ("most", 480),
    ("us", 460),
    ("is", 8200),
    ("was", 420),
    ("are", 400),
    ("been", 380),
    ("has", 360),
    ("had", 340),
    ("were", 320),
    ("said", 300),
    ("did", 200),
    ("having", 150),
    ("hello", 7200),
    ("world", 6800),
    ("test", 120),
    ("android", 60),
    ("keyboard", 90),
    ("auto", 70),
    ("correct", 110),
    ("spell", 80),
    ("check", 130),
    ("word", 75),
    ("text", 140),
    ("type", 160),
    ("typing", 85),
    ("input", 100),
    ("method", 95),
    ("service", 105),
];

lazy_static! {
    static ref SHARED_ENGLISH: Arc<Lexicon> = Arc::new(BuiltinLexicon::english());
}

/// Lexicons compiled into the library.
pub struct BuiltinLexicon;

impl BuiltinLexicon {
    /// Create a lexicon with common English words.
    pub fn english() -> Lexicon {
        let mut builder = LexiconBuilder::new();
        for &(word, frequency) in ENGLISH_WORDS {
            builder.add_word_with_frequency(word, frequency);
        }
        builder.build()
    }

    /// The process-wide English lexicon, built on first use.
    pub fn shared_english() -> Arc<Lexicon> {
        Arc::clone(&SHARED_ENGLISH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_lexicon_basic_operations() {
        let lexicon = Lexicon::from_words(["hello", "world"]);

        assert!(lexicon.contains("hello"));
        assert!(lexicon.contains("world"));
        assert!(!lexicon.contains("helo"));
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.frequency("hello"), 1);
        assert_eq!(lexicon.frequency("missing"), 0);
        assert_eq!(lexicon.total_frequency(), 2);
    }

    #[test]
    fn test_lexicon_case_insensitive() {
        let lexicon = Lexicon::from_words(["Hello"]);

        assert!(lexicon.contains("hello"));
        assert!(lexicon.contains("HELLO"));
        assert!(lexicon.contains("Hello"));
        assert_eq!(lexicon.entries().collect::<Vec<_>>(), vec!["hello"]);
    }

    #[test]
    fn test_empty_word_is_never_contained() {
        let lexicon = BuiltinLexicon::english();
        assert!(!lexicon.contains(""));

        let empty = Lexicon::empty();
        assert!(!empty.contains(""));
        assert!(!empty.contains("the"));
        assert!(empty.is_empty());
        assert_eq!(empty.entries().count(), 0);
    }

    #[test]
    fn test_entries_sorted_unique_and_restartable() {
        let lexicon = Lexicon::from_words(["world", "Apple", "hello", "apple", "HELLO"]);

        let first: Vec<&str> = lexicon.entries().collect();
        let second: Vec<&str> = lexicon.entries().collect();
        assert_eq!(first, vec!["apple", "hello", "world"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_builder_rejects_blank_and_whitespace() {
        let mut builder = LexiconBuilder::new();
        assert!(builder.add_word("  padded  "));
        assert!(!builder.add_word(""));
        assert!(!builder.add_word("   "));
        assert!(!builder.add_word("two words"));
        assert_eq!(builder.len(), 1);

        let lexicon = builder.build();
        assert!(lexicon.contains("padded"));
    }

    #[test]
    fn test_builder_frequencies() {
        let mut builder = LexiconBuilder::new();
        builder.add_word_with_frequency("hello", 5);
        builder.add_word_with_frequency("hello", 20);
        builder.add_word_with_frequency("hello", 10);
        builder.increment_word("world");
        builder.increment_word("World");
        builder.add_word("world");

        let lexicon = builder.build();
        assert_eq!(lexicon.frequency("hello"), 20);
        assert_eq!(lexicon.frequency("world"), 2);
        assert_eq!(lexicon.total_frequency(), 22);
    }

    #[test]
    fn test_from_corpus() {
        let corpus = "The quick brown fox jumps over the lazy dog. The dog was lazy.";
        let lexicon = Lexicon::from_corpus(corpus);

        assert!(lexicon.contains("the"));
        assert!(lexicon.contains("quick"));
        assert_eq!(lexicon.frequency("the"), 3);
        assert_eq!(lexicon.frequency("dog"), 2);
        assert_eq!(lexicon.frequency("quick"), 1);
    }

    #[test]
    fn test_most_frequent_words() {
        let mut builder = LexiconBuilder::new();
        builder.add_word_with_frequency("common", 100);
        builder.add_word_with_frequency("rare", 1);
        builder.add_word_with_frequency("medium", 50);
        builder.add_word_with_frequency("also", 50);
        let lexicon = builder.build();

        let top = lexicon.most_frequent_words(3);
        assert_eq!(top, vec![("common", 100), ("also", 50), ("medium", 50)]);
    }

    #[test]
    fn test_file_round_trip() {
        let mut builder = LexiconBuilder::new();
        builder.add_word_with_frequency("hello", 5);
        builder.add_word_with_frequency("world", 3);
        let lexicon = builder.build();

        let temp_file = NamedTempFile::new().unwrap();
        lexicon.save_to_file(temp_file.path()).unwrap();

        let loaded = Lexicon::load_from_frequency_file(temp_file.path()).unwrap();
        assert_eq!(loaded.frequency("hello"), 5);
        assert_eq!(loaded.frequency("world"), 3);
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn test_load_from_word_list() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "# common words").unwrap();
        writeln!(temp_file, "hello").unwrap();
        writeln!(temp_file).unwrap();
        writeln!(temp_file, "World").unwrap();
        writeln!(temp_file, "hello").unwrap();
        temp_file.flush().unwrap();

        let lexicon = Lexicon::load_from_file(temp_file.path()).unwrap();
        assert_eq!(lexicon.frequency("hello"), 2);
        assert_eq!(lexicon.frequency("world"), 1);
        assert_eq!(lexicon.len(), 2);
    }

    #[test]
    fn test_load_frequency_file_rejects_malformed_lines() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "hello 5").unwrap();
        writeln!(temp_file, "world lots").unwrap();
        temp_file.flush().unwrap();

        let err = Lexicon::load_from_frequency_file(temp_file.path()).unwrap_err();
        assert!(matches!(err, TypofixError::Lexicon(_)));
        assert!(err.to_string().contains(":2:"));
    }

    #[test]
    fn test_load_from_json_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"Hello": 7200, "world": 6800, "would": 32000}}"#).unwrap();
        temp_file.flush().unwrap();

        let lexicon = Lexicon::load_from_json_file(temp_file.path()).unwrap();
        assert_eq!(lexicon.len(), 3);
        assert!(lexicon.contains("hello"));
        assert_eq!(lexicon.frequency("would"), 32000);
        assert_eq!(lexicon.total_frequency(), 46000);
    }

    #[test]
    fn test_load_json_file_rejects_bad_entries() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"hello": 5, "two words": 3}}"#).unwrap();
        temp_file.flush().unwrap();
        let err = Lexicon::load_from_json_file(temp_file.path()).unwrap_err();
        assert!(matches!(err, TypofixError::Lexicon(_)));

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"hello": -1}}"#).unwrap();
        temp_file.flush().unwrap();
        let err = Lexicon::load_from_json_file(temp_file.path()).unwrap_err();
        assert!(matches!(err, TypofixError::Json(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Lexicon::load_from_file("/nonexistent/typofix/words.txt").unwrap_err();
        assert!(matches!(err, TypofixError::Io(_)));
    }

    #[test]
    fn test_builtin_english() {
        let lexicon = BuiltinLexicon::english();
        assert!(lexicon.contains("the"));
        assert!(lexicon.contains("hello"));
        assert!(lexicon.contains("keyboard"));
        assert_eq!(lexicon.len(), 126);
        assert!(lexicon.entries().all(|w| w == w.to_lowercase()));

        let shared = BuiltinLexicon::shared_english();
        let again = BuiltinLexicon::shared_english();
        assert!(Arc::ptr_eq(&shared, &again));
        assert_eq!(shared.len(), lexicon.len());
    }
}
