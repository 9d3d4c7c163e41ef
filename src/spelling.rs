//! Spelling correction and suggestion utilities for Typofix.
//!
//! This module holds the lexicon, the edit-distance toolkit and the nearest
//! word matcher that make up word correction, plus the prefix trie,
//! BK-tree index, personal dictionary and bigram model behind ranked
//! suggestions.

pub mod bigram;
pub mod bk_tree;
pub mod corrector;
pub mod levenshtein;
pub mod lexicon;
pub mod matcher;
pub mod personal;
pub mod suggest;
pub mod trie;

// Re-export commonly used types
pub use corrector::{AutoCorrector, CorrectorStats};
pub use levenshtein::{DistanceMetric, damerau_levenshtein_distance, levenshtein_distance};
pub use lexicon::{BuiltinLexicon, Lexicon, LexiconBuilder};
pub use matcher::{Match, Matcher, MatcherConfig, SearchStrategy};
pub use suggest::{Suggestion, SuggestionConfig, SuggestionEngine, SuggestionSource};
