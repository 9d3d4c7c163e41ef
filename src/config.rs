//! Typofix configuration.
//!
//! A configuration names the lexicon to load and tunes the matcher and the
//! suggestion engine. Every field has a default, so a configuration file
//! only needs to mention what it changes:
//!
//! ```
//! use typofix::config::{LexiconSource, TypofixConfig};
//!
//! let config: TypofixConfig = serde_json::from_str(
//!     r#"{ "matcher": { "max_distance": 1, "strategy": "bk_tree" } }"#,
//! ).unwrap();
//!
//! assert_eq!(config.lexicon, LexiconSource::Builtin);
//! assert_eq!(config.matcher.max_distance, 1);
//! assert!(config.validate().is_ok());
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TypofixError};
use crate::spelling::lexicon::{BuiltinLexicon, Lexicon};
use crate::spelling::matcher::MatcherConfig;
use crate::spelling::suggest::SuggestionConfig;

/// Where the lexicon comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LexiconSource {
    /// The builtin English word list.
    #[default]
    Builtin,
    /// A file with one word per line.
    WordList {
        /// Path to the word list.
        path: PathBuf,
    },
    /// A file with `word frequency` per line.
    FrequencyList {
        /// Path to the frequency list.
        path: PathBuf,
    },
    /// A JSON object mapping each word to its frequency.
    Json {
        /// Path to the JSON dictionary.
        path: PathBuf,
    },
}

impl LexiconSource {
    /// Load the lexicon this source names.
    ///
    /// The builtin source shares the process-wide instance.
    pub fn load(&self) -> Result<Arc<Lexicon>> {
        match self {
            LexiconSource::Builtin => Ok(BuiltinLexicon::shared_english()),
            LexiconSource::WordList { path } => Ok(Arc::new(Lexicon::load_from_file(path)?)),
            LexiconSource::FrequencyList { path } => {
                Ok(Arc::new(Lexicon::load_from_frequency_file(path)?))
            }
            LexiconSource::Json { path } => Ok(Arc::new(Lexicon::load_from_json_file(path)?)),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypofixConfig {
    /// Lexicon to correct against.
    pub lexicon: LexiconSource,
    /// Matcher settings.
    pub matcher: MatcherConfig,
    /// Suggestion settings.
    pub suggestion: SuggestionConfig,
    /// Optional JSON bigram model seeding next-word predictions.
    pub bigrams: Option<PathBuf>,
}

impl TypofixConfig {
    /// Read a configuration from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let config: TypofixConfig = serde_json::from_reader(reader)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Reject combinations that cannot be used.
    pub fn validate(&self) -> Result<()> {
        self.matcher.validate()?;

        if self.suggestion.max_suggestions == 0 {
            return Err(TypofixError::config(
                "suggestion.max_suggestions must be at least 1",
            ));
        }

        Ok(())
    }
}
