//! # Typofix
//!
//! Dictionary-backed word correction for text input.
//!
//! ## Features
//!
//! - Case-insensitive validity checks against an immutable lexicon
//! - Nearest-word correction within a bounded edit distance
//! - Deterministic tie-breaking by frequency, then alphabetical order
//! - Linear, parallel (rayon) and BK-tree search strategies
//! - Ranked suggestions with prefix completions, learned words and
//!   next-word predictions
//!
//! ## Example
//!
//! ```
//! use typofix::spelling::Matcher;
//!
//! let matcher = Matcher::new();
//! assert_eq!(matcher.correct_word("helo"), "hello");
//! assert_eq!(matcher.correct_word("Hello"), "Hello");
//! assert_eq!(matcher.correct_word("xyzxyzxyz"), "xyzxyzxyz");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod spelling;

pub mod prelude {
    pub use crate::config::{LexiconSource, TypofixConfig};
    pub use crate::error::{Result, TypofixError};
    pub use crate::spelling::{
        AutoCorrector, BuiltinLexicon, DistanceMetric, Lexicon, LexiconBuilder, Matcher,
        MatcherConfig, SearchStrategy, Suggestion, SuggestionConfig, SuggestionEngine,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
