//! Error types for the Typofix library.
//!
//! Word lookups and corrections never fail; errors only arise at the edges of
//! the library, when lexicons, personal dictionaries or configuration files are
//! read from disk. All of them are represented by the [`TypofixError`] enum.
//!
//! # Examples
//!
//! ```
//! use typofix::error::{TypofixError, Result};
//! use typofix::spelling::Lexicon;
//!
//! fn load_words() -> Result<Lexicon> {
//!     Lexicon::load_from_file("/nonexistent/words.txt")
//! }
//!
//! match load_words() {
//!     Ok(lexicon) => println!("{} words", lexicon.len()),
//!     Err(TypofixError::Io(e)) => eprintln!("cannot read word list: {e}"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Typofix operations.
#[derive(Error, Debug)]
pub enum TypofixError {
    /// I/O errors (reading or writing word lists, dictionaries, config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors (invalid values or combinations)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Lexicon construction errors (malformed word list lines, etc.)
    #[error("Lexicon error: {0}")]
    Lexicon(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with TypofixError.
pub type Result<T> = std::result::Result<T, TypofixError>;

impl TypofixError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        TypofixError::Config(msg.into())
    }

    /// Create a new lexicon error.
    pub fn lexicon<S: Into<String>>(msg: S) -> Self {
        TypofixError::Lexicon(msg.into())
    }
}
