//! Ranked suggestions for the word being typed.
//!
//! Where [`Matcher`](crate::spelling::matcher::Matcher) picks one correction,
//! the [`SuggestionEngine`] produces a short ranked list mixing exact hits,
//! learned words, prefix completions, close corrections and next-word
//! predictions, the way a suggestion strip above a keyboard would show them.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::spelling::bigram::BigramModel;
use crate::spelling::levenshtein::{DistanceMetric, max_allowed_distance};
use crate::spelling::lexicon::Lexicon;
use crate::spelling::personal::PersonalDictionary;
use crate::spelling::trie::Trie;

/// Base score of an exact lexicon hit.
const EXACT_BASE_SCORE: f64 = 100.0;
/// Base score of a word from the personal dictionary.
const PERSONAL_BASE_SCORE: f64 = 80.0;
/// Base score of a prefix completion.
const COMPLETION_BASE_SCORE: f64 = 70.0;
/// Score per unit of remaining edit budget for corrections.
const CORRECTION_SCORE_MULTIPLIER: f64 = 10.0;
/// Weight applied to lexicon frequencies.
const FREQUENCY_WEIGHT: f64 = 0.001;
/// Weight applied to bigram probabilities mixed into suggestions for a
/// typed word. Predictions for an empty word are scored by probability alone.
const PREDICTION_WEIGHT: f64 = 30.0;

/// Where a suggestion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    /// The typed word itself is in the lexicon.
    Exact,
    /// The typed word was learned from the user.
    Personal,
    /// A lexicon word starting with the typed text.
    Completion,
    /// A lexicon word within a small edit distance.
    Correction,
    /// A word predicted to follow the previous word.
    Prediction,
}

/// A suggestion with a relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The suggested word.
    pub word: String,
    /// Relevance score (higher is better).
    pub score: f64,
    /// Edit distance from the typed word (0 for non-corrections).
    pub distance: usize,
    /// Frequency of the word in its source.
    pub frequency: u32,
    /// Where the suggestion came from.
    pub source: SuggestionSource,
    /// Whether the suggestion is confident enough to replace the typed word.
    pub is_autocorrect: bool,
}

impl Suggestion {
    fn new(word: String, score: f64, source: SuggestionSource) -> Self {
        Suggestion {
            word,
            score,
            distance: 0,
            frequency: 0,
            source,
            is_autocorrect: false,
        }
    }

    fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency;
        self
    }

    /// Higher scores first, then alphabetical.
    fn rank(a: &Suggestion, b: &Suggestion) -> Ordering {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.word.cmp(&b.word))
    }
}

/// Configuration for suggestion generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Maximum number of suggestions to return.
    pub max_suggestions: usize,
    /// Maximum number of prefix completions considered.
    pub max_completions: usize,
    /// Maximum number of corrections considered.
    pub max_corrections: usize,
    /// Maximum number of next-word predictions considered.
    pub max_predictions: usize,
    /// Minimum typed length, in characters, before completions are offered.
    pub min_completion_prefix: usize,
    /// Distance used to find corrections.
    pub metric: DistanceMetric,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        SuggestionConfig {
            max_suggestions: 3,
            max_completions: 3,
            max_corrections: 3,
            max_predictions: 3,
            min_completion_prefix: 2,
            metric: DistanceMetric::DamerauLevenshtein,
        }
    }
}

/// What is known about the typing context beyond the current word.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestionContext<'a> {
    /// The word typed before the current one.
    pub previous_word: Option<&'a str>,
    /// Words learned from the user.
    pub personal: Option<&'a PersonalDictionary>,
    /// Next-word statistics.
    pub bigrams: Option<&'a BigramModel>,
}

/// Suggestion generator over a lexicon.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    lexicon: Arc<Lexicon>,
    trie: Trie,
    config: SuggestionConfig,
}

impl SuggestionEngine {
    /// Create a new suggestion engine over the given lexicon.
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self::with_config(lexicon, SuggestionConfig::default())
    }

    /// Create a new suggestion engine with custom configuration.
    pub fn with_config(lexicon: Arc<Lexicon>, config: SuggestionConfig) -> Self {
        let trie = Trie::from_lexicon(&lexicon);
        SuggestionEngine {
            lexicon,
            trie,
            config,
        }
    }

    /// The engine configuration.
    pub fn config(&self) -> &SuggestionConfig {
        &self.config
    }

    /// Suggestions for a word without any typing context.
    pub fn suggest_word(&self, word: &str) -> Vec<Suggestion> {
        self.suggest(word, &SuggestionContext::default())
    }

    /// Get ranked suggestions for the word being typed.
    pub fn suggest(&self, word: &str, context: &SuggestionContext<'_>) -> Vec<Suggestion> {
        let lower = word.trim().to_lowercase();

        let mut suggestions = Vec::new();
        if !lower.is_empty() {
            self.push_exact(&lower, &mut suggestions);
            if let Some(personal) = context.personal {
                Self::push_personal(&lower, personal, &mut suggestions);
            }
            self.push_completions(&lower, &mut suggestions);
            self.push_corrections(&lower, &mut suggestions);
        }
        if let (Some(previous), Some(bigrams)) = (context.previous_word, context.bigrams) {
            let weight = if lower.is_empty() {
                1.0
            } else {
                PREDICTION_WEIGHT
            };
            self.push_predictions(previous, bigrams, weight, &mut suggestions);
        }

        Self::finish(suggestions, self.config.max_suggestions)
    }

    fn push_exact(&self, lower: &str, out: &mut Vec<Suggestion>) {
        if self.lexicon.contains(lower) {
            let frequency = self.lexicon.frequency(lower);
            out.push(
                Suggestion::new(
                    lower.to_string(),
                    EXACT_BASE_SCORE + frequency as f64,
                    SuggestionSource::Exact,
                )
                .with_frequency(frequency),
            );
        }
    }

    fn push_personal(lower: &str, personal: &PersonalDictionary, out: &mut Vec<Suggestion>) {
        if let Some(user_word) = personal.get(lower) {
            out.push(
                Suggestion::new(
                    user_word.word.clone(),
                    PERSONAL_BASE_SCORE + user_word.frequency as f64,
                    SuggestionSource::Personal,
                )
                .with_frequency(user_word.frequency),
            );
        }
    }

    fn push_completions(&self, lower: &str, out: &mut Vec<Suggestion>) {
        if lower.chars().count() < self.config.min_completion_prefix {
            return;
        }

        let completions = self
            .trie
            .words_with_prefix(lower, self.config.max_completions.saturating_add(1))
            .into_iter()
            .filter(|(word, _)| word != lower)
            .take(self.config.max_completions);

        for (word, frequency) in completions {
            if out.iter().any(|s| s.word == word) {
                continue;
            }
            let score = COMPLETION_BASE_SCORE + frequency as f64 * FREQUENCY_WEIGHT;
            out.push(
                Suggestion::new(word, score, SuggestionSource::Completion)
                    .with_frequency(frequency),
            );
        }
    }

    fn push_corrections(&self, lower: &str, out: &mut Vec<Suggestion>) {
        let length = lower.chars().count();
        let max_distance = max_allowed_distance(length);
        if max_distance == 0 {
            return;
        }

        let mut candidates: Vec<Suggestion> = self
            .lexicon
            .entries()
            .filter_map(|entry| {
                let distance = self
                    .config
                    .metric
                    .distance_within(lower, entry, max_distance)?;
                if distance == 0 {
                    return None;
                }

                let frequency = self.lexicon.frequency(entry);
                let score = (max_distance - distance + 1) as f64 * CORRECTION_SCORE_MULTIPLIER
                    + frequency as f64 * FREQUENCY_WEIGHT;
                let mut suggestion =
                    Suggestion::new(entry.to_string(), score, SuggestionSource::Correction)
                        .with_frequency(frequency);
                suggestion.distance = distance;
                suggestion.is_autocorrect = distance == 1 && length > 3;
                Some(suggestion)
            })
            .collect();

        candidates.sort_by(Suggestion::rank);
        candidates.truncate(self.config.max_corrections);
        out.extend(candidates);
    }

    fn push_predictions(
        &self,
        previous: &str,
        bigrams: &BigramModel,
        weight: f64,
        out: &mut Vec<Suggestion>,
    ) {
        for (word, probability) in bigrams.predict(previous, self.config.max_predictions) {
            if out.iter().any(|s| s.word == word) {
                continue;
            }
            out.push(Suggestion::new(
                word,
                probability * weight,
                SuggestionSource::Prediction,
            ));
        }
    }

    /// Drop duplicates (first occurrence wins), rank, and cut to `limit`.
    fn finish(suggestions: Vec<Suggestion>, limit: usize) -> Vec<Suggestion> {
        let mut unique: Vec<Suggestion> = Vec::with_capacity(suggestions.len());
        for suggestion in suggestions {
            if !unique.iter().any(|s| s.word == suggestion.word) {
                unique.push(suggestion);
            }
        }

        unique.sort_by(Suggestion::rank);
        unique.truncate(limit);
        unique
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spelling::lexicon::BuiltinLexicon;

    fn engine() -> SuggestionEngine {
        SuggestionEngine::new(BuiltinLexicon::shared_english())
    }

    #[test]
    fn test_exact_match_ranks_first() {
        let suggestions = engine().suggest_word("Hello");

        assert_eq!(suggestions[0].word, "hello");
        assert_eq!(suggestions[0].source, SuggestionSource::Exact);
        assert_eq!(suggestions[0].distance, 0);
        assert!((suggestions[0].score - 7300.0).abs() < 1e-6);
    }

    #[test]
    fn test_correction_for_typo() {
        let suggestions = engine().suggest_word("helo");

        let hello = suggestions.iter().find(|s| s.word == "hello").unwrap();
        assert_eq!(hello.source, SuggestionSource::Correction);
        assert_eq!(hello.distance, 1);
        assert!(hello.is_autocorrect);
    }

    #[test]
    fn test_transposition_counts_as_one_edit() {
        let suggestions = engine().suggest_word("wrold");

        assert_eq!(suggestions[0].word, "world");
        assert_eq!(suggestions[0].distance, 1);
    }

    #[test]
    fn test_completions_ranked_by_frequency() {
        let suggestions = engine().suggest_word("th");
        let words: Vec<&str> = suggestions.iter().map(|s| s.word.as_str()).collect();

        assert_eq!(words, vec!["the", "that", "this"]);
        assert!(
            suggestions
                .iter()
                .all(|s| s.source == SuggestionSource::Completion)
        );
    }

    #[test]
    fn test_short_words_get_no_corrections() {
        let suggestions = engine().suggest_word("teh");
        assert!(
            suggestions
                .iter()
                .all(|s| s.source != SuggestionSource::Correction)
        );
    }

    #[test]
    fn test_personal_dictionary_boost() {
        let mut personal = PersonalDictionary::new();
        personal.learn("rustacean");
        personal.learn("rustacean");

        let context = SuggestionContext {
            personal: Some(&personal),
            ..Default::default()
        };
        let suggestions = engine().suggest("Rustacean", &context);

        assert_eq!(suggestions[0].word, "rustacean");
        assert_eq!(suggestions[0].source, SuggestionSource::Personal);
        assert!((suggestions[0].score - 82.0).abs() < 1e-6);
    }

    #[test]
    fn test_predictions_for_empty_word() {
        let mut bigrams = BigramModel::new();
        bigrams.record("good", "morning");
        bigrams.record("good", "morning");
        bigrams.record("good", "night");

        let context = SuggestionContext {
            previous_word: Some("good"),
            bigrams: Some(&bigrams),
            ..Default::default()
        };
        let suggestions = engine().suggest("", &context);

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].word, "morning");
        assert_eq!(suggestions[0].source, SuggestionSource::Prediction);
        assert!((suggestions[0].score - 2.0 / 3.0).abs() < 1e-6);
        assert!((suggestions[1].score - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_predictions_weighted_next_to_typed_word() {
        let mut bigrams = BigramModel::new();
        bigrams.record("good", "morning");
        bigrams.record("good", "night");

        let context = SuggestionContext {
            previous_word: Some("good"),
            bigrams: Some(&bigrams),
            ..Default::default()
        };
        // no completion or correction exists for "zq"
        let suggestions = engine().suggest("zq", &context);

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].word, "morning");
        assert_eq!(suggestions[0].source, SuggestionSource::Prediction);
        assert!((suggestions[0].score - 15.0).abs() < 1e-6);
    }

    #[test]
    fn test_unbounded_limits() {
        let config = SuggestionConfig {
            max_suggestions: usize::MAX,
            max_completions: usize::MAX,
            max_corrections: usize::MAX,
            max_predictions: usize::MAX,
            ..Default::default()
        };
        let engine = SuggestionEngine::with_config(BuiltinLexicon::shared_english(), config);
        let suggestions = engine.suggest_word("th");

        assert_eq!(suggestions[0].word, "the");
        assert!(suggestions.iter().all(|s| s.word.starts_with("th")));
        assert!(suggestions.len() > 3);
    }

    #[test]
    fn test_empty_word_without_context() {
        assert!(engine().suggest_word("").is_empty());
        assert!(engine().suggest_word("   ").is_empty());
    }

    #[test]
    fn test_results_are_unique_and_limited() {
        let config = SuggestionConfig {
            max_suggestions: 5,
            ..Default::default()
        };
        let engine = SuggestionEngine::with_config(BuiltinLexicon::shared_english(), config);
        let suggestions = engine.suggest_word("the");

        assert!(suggestions.len() <= 5);
        for (i, a) in suggestions.iter().enumerate() {
            for b in &suggestions[i + 1..] {
                assert_ne!(a.word, b.word);
                assert!(a.score >= b.score);
            }
        }
    }
}
