//! Nearest-word matcher: the core of word correction.
//!
//! A [`Matcher`] answers two questions about a typed word: is it a known
//! word, and if not, which known word is closest to it within a bounded edit
//! distance. Lookups are case-insensitive; a word that is already valid is
//! returned with the caller's casing untouched.

use std::cmp::Reverse;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TypofixError};
use crate::spelling::bk_tree::BkTree;
use crate::spelling::levenshtein::{DistanceMetric, max_allowed_distance};
use crate::spelling::lexicon::{BuiltinLexicon, Lexicon};

/// Edit distance beyond which no correction is offered.
pub const DEFAULT_MAX_DISTANCE: usize = 2;

/// Lexicon size from which a linear scan is split across the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 10_000;

/// How the lexicon is searched for the closest entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Compare against every entry.
    #[default]
    Linear,
    /// Walk a BK-tree built at construction time. Requires a metric distance.
    BkTree,
}

impl SearchStrategy {
    /// Get the strategy name.
    pub fn name(&self) -> &'static str {
        match self {
            SearchStrategy::Linear => "linear",
            SearchStrategy::BkTree => "bk_tree",
        }
    }
}

/// Configuration for the matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Maximum edit distance for an entry to be accepted as a correction.
    pub max_distance: usize,
    /// Distance used to compare the typed word against entries.
    pub metric: DistanceMetric,
    /// Search strategy over the lexicon.
    pub strategy: SearchStrategy,
    /// Lower the threshold for short words (see [`max_allowed_distance`]).
    pub adaptive_threshold: bool,
    /// Lexicon size from which the linear scan runs in parallel.
    pub parallel_threshold: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        MatcherConfig {
            max_distance: DEFAULT_MAX_DISTANCE,
            metric: DistanceMetric::Levenshtein,
            strategy: SearchStrategy::Linear,
            adaptive_threshold: false,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl MatcherConfig {
    /// Check that the configuration can be used to build a matcher.
    pub fn validate(&self) -> Result<()> {
        if self.strategy == SearchStrategy::BkTree && !self.metric.is_metric_space() {
            return Err(TypofixError::config(format!(
                "the bk_tree strategy needs a metric distance, {} is not one",
                self.metric.name()
            )));
        }
        Ok(())
    }
}

/// The closest lexicon entry found for a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    /// The lexicon entry, lowercase.
    pub word: &'a str,
    /// Edit distance between the folded input and the entry.
    pub distance: usize,
}

/// Resolves typed words to themselves or to the closest lexicon entry.
///
/// The matcher holds no mutable state; it is `Send + Sync` and every call is
/// independent of the previous ones.
#[derive(Debug, Clone)]
pub struct Matcher {
    lexicon: Arc<Lexicon>,
    config: MatcherConfig,
    index: Option<BkTree>,
}

impl Matcher {
    /// Create a matcher over the builtin English lexicon.
    pub fn new() -> Self {
        Self::with_lexicon(BuiltinLexicon::shared_english())
    }

    /// Create a matcher over a custom lexicon with the default configuration.
    pub fn with_lexicon(lexicon: Arc<Lexicon>) -> Self {
        Matcher {
            lexicon,
            config: MatcherConfig::default(),
            index: None,
        }
    }

    /// Create a matcher with a custom configuration.
    pub fn with_config(lexicon: Arc<Lexicon>, config: MatcherConfig) -> Result<Self> {
        config.validate()?;

        let index = match config.strategy {
            SearchStrategy::Linear => None,
            SearchStrategy::BkTree => Some(BkTree::from_lexicon(&lexicon)),
        };

        Ok(Matcher {
            lexicon,
            config,
            index,
        })
    }

    /// The lexicon this matcher searches.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// A shared handle to the lexicon.
    pub fn shared_lexicon(&self) -> Arc<Lexicon> {
        Arc::clone(&self.lexicon)
    }

    /// The matcher configuration.
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Check whether a word is known, ignoring case. The empty string never is.
    pub fn is_valid_word(&self, word: &str) -> bool {
        self.lexicon.contains(word)
    }

    /// Correct a typed word.
    ///
    /// Returns the input unchanged when it is empty, already valid (in any
    /// casing) or has no lexicon entry within the threshold. Otherwise returns
    /// the closest entry as stored, lowercase. Among equally close entries the
    /// most frequent wins, then the alphabetically first.
    pub fn correct_word(&self, word: &str) -> String {
        if word.is_empty() {
            return String::new();
        }

        let folded = word.to_lowercase();
        if self.lexicon.contains(&folded) {
            return word.to_string();
        }

        match self.nearest(&folded) {
            Some(found) => {
                log::debug!(
                    "corrected {word:?} to {:?} (distance {})",
                    found.word,
                    found.distance
                );
                found.word.to_string()
            }
            None => {
                log::trace!("no correction for {word:?}");
                word.to_string()
            }
        }
    }

    /// Correct a word that may be absent. An absent word behaves like the
    /// empty string.
    pub fn correct_word_opt(&self, word: Option<&str>) -> String {
        self.correct_word(word.unwrap_or_default())
    }

    /// Find the closest lexicon entry within the threshold, ignoring case.
    ///
    /// Unlike [`correct_word`](Self::correct_word) this also reports exact
    /// matches (distance 0).
    pub fn best_match(&self, word: &str) -> Option<Match<'_>> {
        if word.is_empty() {
            return None;
        }
        self.nearest(&word.to_lowercase())
    }

    /// The threshold applied to a word of the given length in characters.
    pub fn effective_threshold(&self, word_length: usize) -> usize {
        if self.config.adaptive_threshold {
            self.config
                .max_distance
                .min(max_allowed_distance(word_length))
        } else {
            self.config.max_distance
        }
    }

    fn nearest(&self, folded: &str) -> Option<Match<'_>> {
        let threshold = self.effective_threshold(folded.chars().count());

        let best = match &self.index {
            Some(tree) => tree
                .find_within(folded, threshold)
                .into_iter()
                .map(|(distance, word)| self.rank(distance, word))
                .min(),
            None => self.scan(folded, threshold),
        };

        best.map(|(distance, _, word)| Match { word, distance })
    }

    /// Ordering key of a candidate: closer first, then more frequent, then
    /// alphabetical.
    fn rank<'a>(&self, distance: usize, word: &'a str) -> (usize, Reverse<u32>, &'a str) {
        (distance, Reverse(self.lexicon.frequency(word)), word)
    }

    fn scan(&self, folded: &str, threshold: usize) -> Option<(usize, Reverse<u32>, &str)> {
        let metric = self.config.metric;
        let words = self.lexicon.words();

        if words.len() >= self.config.parallel_threshold {
            words
                .par_iter()
                .filter_map(|entry| {
                    metric
                        .distance_within(folded, entry, threshold)
                        .map(|distance| self.rank(distance, entry))
                })
                .min()
        } else {
            words
                .iter()
                .filter_map(|entry| {
                    metric
                        .distance_within(folded, entry, threshold)
                        .map(|distance| self.rank(distance, entry))
                })
                .min()
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}
