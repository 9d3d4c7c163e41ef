//! Command line argument parsing for the Typofix CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::spelling::levenshtein::DistanceMetric;

/// Typofix - typo correction against a word list
#[derive(Parser, Debug, Clone)]
#[command(name = "typofix")]
#[command(about = "Correct typos against a word list by edit distance")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Typofix Contributors")]
#[command(long_about = None)]
pub struct TypofixArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "TYPOFIX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Word list to use instead of the configured lexicon (one word per line)
    #[arg(short, long, value_name = "WORD_LIST")]
    pub lexicon: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TypofixArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check whether words are in the lexicon
    Check(CheckArgs),

    /// Correct every word of a text
    Correct(CorrectArgs),

    /// Show ranked suggestions for a word
    Suggest(SuggestArgs),

    /// Compute the edit distance between two words
    Distance(DistanceArgs),

    /// Show lexicon and matcher statistics
    Stats,
}

/// Arguments for checking words
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Words to check
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,
}

/// Arguments for correcting text
#[derive(Parser, Debug, Clone)]
pub struct CorrectArgs {
    /// Text to correct (read from stdin when omitted)
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,
}

/// Arguments for suggestions
#[derive(Parser, Debug, Clone)]
pub struct SuggestArgs {
    /// Word being typed
    #[arg(value_name = "WORD")]
    pub word: String,

    /// Word typed before it, for next-word predictions
    #[arg(short, long)]
    pub previous: Option<String>,

    /// Maximum number of suggestions (default: from configuration)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Arguments for distance computation
#[derive(Parser, Debug, Clone)]
pub struct DistanceArgs {
    /// First word
    #[arg(value_name = "A")]
    pub a: String,

    /// Second word
    #[arg(value_name = "B")]
    pub b: String,

    /// Distance metric
    #[arg(short, long, default_value = "levenshtein")]
    pub metric: MetricArg,
}

/// Distance metrics available in CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricArg {
    /// Insertions, deletions and substitutions
    Levenshtein,
    /// Levenshtein plus adjacent transpositions
    Damerau,
}

impl From<MetricArg> for DistanceMetric {
    fn from(metric: MetricArg) -> Self {
        match metric {
            MetricArg::Levenshtein => DistanceMetric::Levenshtein,
            MetricArg::Damerau => DistanceMetric::DamerauLevenshtein,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
