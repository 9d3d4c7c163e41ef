//! Auto-correction facade tying the matcher, suggestions and learning together.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::config::TypofixConfig;
use crate::error::Result;
use crate::spelling::bigram::BigramModel;
use crate::spelling::lexicon::Lexicon;
use crate::spelling::matcher::{Matcher, MatcherConfig};
use crate::spelling::personal::PersonalDictionary;
use crate::spelling::suggest::{
    Suggestion, SuggestionConfig, SuggestionContext, SuggestionEngine,
};

/// Auto-corrector for typed words and text.
///
/// Correction goes through an immutable [`Matcher`]; the personal dictionary
/// and bigram model are behind read-write locks so that one corrector can be
/// shared between threads while it learns from the user.
#[derive(Debug)]
pub struct AutoCorrector {
    matcher: Matcher,
    engine: SuggestionEngine,
    personal: RwLock<PersonalDictionary>,
    bigrams: RwLock<BigramModel>,
}

impl AutoCorrector {
    /// Create a corrector over the builtin English lexicon.
    pub fn new() -> Self {
        let matcher = Matcher::new();
        let engine = SuggestionEngine::new(matcher.shared_lexicon());
        Self::from_parts(matcher, engine)
    }

    /// Create a corrector over a custom lexicon with default settings.
    pub fn with_lexicon(lexicon: Arc<Lexicon>) -> Self {
        let engine = SuggestionEngine::new(Arc::clone(&lexicon));
        Self::from_parts(Matcher::with_lexicon(lexicon), engine)
    }

    /// Create a corrector with custom matcher and suggestion settings.
    pub fn with_config(
        lexicon: Arc<Lexicon>,
        matcher_config: MatcherConfig,
        suggestion_config: SuggestionConfig,
    ) -> Result<Self> {
        let engine = SuggestionEngine::with_config(Arc::clone(&lexicon), suggestion_config);
        let matcher = Matcher::with_config(lexicon, matcher_config)?;
        Ok(Self::from_parts(matcher, engine))
    }

    /// Create a corrector from a full configuration, loading its lexicon.
    pub fn from_config(config: &TypofixConfig) -> Result<Self> {
        config.validate()?;
        let lexicon = config.lexicon.load()?;
        log::info!(
            "auto-corrector ready: {} words, {} strategy",
            lexicon.len(),
            config.matcher.strategy.name()
        );
        let corrector =
            Self::with_config(lexicon, config.matcher.clone(), config.suggestion.clone())?;
        if let Some(path) = &config.bigrams {
            corrector.load_bigrams(path)?;
        }
        Ok(corrector)
    }

    fn from_parts(matcher: Matcher, engine: SuggestionEngine) -> Self {
        AutoCorrector {
            matcher,
            engine,
            personal: RwLock::new(PersonalDictionary::new()),
            bigrams: RwLock::new(BigramModel::new()),
        }
    }

    /// The underlying matcher.
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// The lexicon words are corrected against.
    pub fn lexicon(&self) -> &Lexicon {
        self.matcher.lexicon()
    }

    /// Check whether a word is in the lexicon, ignoring case.
    pub fn is_valid_word(&self, word: &str) -> bool {
        self.matcher.is_valid_word(word)
    }

    /// Correct a single word. See [`Matcher::correct_word`].
    pub fn correct_word(&self, word: &str) -> String {
        self.matcher.correct_word(word)
    }

    /// Correct a word that may be absent.
    pub fn correct_word_opt(&self, word: Option<&str>) -> String {
        self.matcher.correct_word_opt(word)
    }

    /// Correct every word of a text.
    ///
    /// The text is split on Unicode word boundaries; segments without a
    /// letter (whitespace, punctuation, numbers) are copied through.
    pub fn correct_text(&self, text: &str) -> String {
        text.split_word_bounds()
            .map(|segment| {
                if segment.chars().any(char::is_alphabetic) {
                    self.correct_word(segment)
                } else {
                    segment.to_string()
                }
            })
            .collect()
    }

    /// Ranked suggestions for a word, using what has been learned so far.
    pub fn suggestions(&self, word: &str, previous_word: Option<&str>) -> Vec<Suggestion> {
        let personal = self.personal.read();
        let bigrams = self.bigrams.read();
        let context = SuggestionContext {
            previous_word,
            personal: Some(&*personal),
            bigrams: Some(&*bigrams),
        };
        self.engine.suggest(word, &context)
    }

    /// Record that the user typed `word`. Returns false if it was ignored.
    pub fn learn_word(&self, word: &str) -> bool {
        self.personal.write().learn(word)
    }

    /// Record that `next` was typed right after `previous`.
    pub fn record_bigram(&self, previous: &str, next: &str) {
        self.bigrams.write().record(previous, next);
    }

    /// Learn every word of a text and the pairs of consecutive words.
    pub fn learn_text(&self, text: &str) {
        let words: Vec<&str> = text
            .unicode_words()
            .filter(|w| w.chars().any(char::is_alphabetic))
            .collect();

        let mut personal = self.personal.write();
        for word in &words {
            personal.learn(word);
        }
        drop(personal);

        let mut bigrams = self.bigrams.write();
        for pair in words.windows(2) {
            bigrams.record(pair[0], pair[1]);
        }
    }

    /// A copy of the personal dictionary.
    pub fn personal_dictionary(&self) -> PersonalDictionary {
        self.personal.read().clone()
    }

    /// Replace the personal dictionary with one read from a JSON file.
    pub fn load_personal_dictionary<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let dictionary = PersonalDictionary::load_from_file(path)?;
        log::debug!("loaded {} learned words", dictionary.len());
        *self.personal.write() = dictionary;
        Ok(())
    }

    /// Write the personal dictionary to a JSON file.
    pub fn save_personal_dictionary<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.personal.read().save_to_file(path)
    }

    /// A copy of the bigram model.
    pub fn bigram_model(&self) -> BigramModel {
        self.bigrams.read().clone()
    }

    /// Replace the bigram model with one read from a JSON file.
    pub fn load_bigrams<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let model = BigramModel::load_from_file(path)?;
        *self.bigrams.write() = model;
        Ok(())
    }

    /// Write the bigram model to a JSON file.
    pub fn save_bigrams<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.bigrams.read().save_to_file(path)
    }

    /// Summary of what the corrector holds.
    pub fn stats(&self) -> CorrectorStats {
        let lexicon = self.matcher.lexicon();
        let config = self.matcher.config();
        CorrectorStats {
            lexicon_words: lexicon.len(),
            total_frequency: lexicon.total_frequency(),
            learned_words: self.personal.read().len(),
            bigram_contexts: self.bigrams.read().len(),
            max_distance: config.max_distance,
            metric: config.metric.name().to_string(),
            strategy: config.strategy.name().to_string(),
        }
    }
}

impl Default for AutoCorrector {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about an auto-corrector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectorStats {
    /// Number of lexicon entries.
    pub lexicon_words: usize,
    /// Sum of lexicon frequencies.
    pub total_frequency: u64,
    /// Number of words in the personal dictionary.
    pub learned_words: usize,
    /// Number of distinct previous words in the bigram model.
    pub bigram_contexts: usize,
    /// Correction threshold.
    pub max_distance: usize,
    /// Distance metric name.
    pub metric: String,
    /// Search strategy name.
    pub strategy: String,
}
