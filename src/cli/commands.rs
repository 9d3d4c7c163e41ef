//! Command implementations for the Typofix CLI.

use std::io::{self, IsTerminal};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::{LexiconSource, TypofixConfig};
use crate::error::Result;
use crate::spelling::corrector::AutoCorrector;
use crate::spelling::levenshtein::{DistanceMetric, similarity};

/// Execute a CLI command.
pub fn execute_command(args: TypofixArgs) -> Result<()> {
    match &args.command {
        Command::Check(check_args) => {
            check_words(check_args.clone(), &build_corrector(&args, None)?, &args)
        }
        Command::Correct(correct_args) => {
            correct_text(correct_args.clone(), &build_corrector(&args, None)?, &args)
        }
        Command::Suggest(suggest_args) => suggest_words(
            suggest_args.clone(),
            &build_corrector(&args, suggest_args.limit)?,
            &args,
        ),
        Command::Distance(distance_args) => compute_distance(distance_args.clone(), &args),
        Command::Stats => show_stats(&build_corrector(&args, None)?, &args),
    }
}

/// Build the corrector, optionally overriding the suggestion limit.
fn build_corrector(args: &TypofixArgs, limit: Option<usize>) -> Result<AutoCorrector> {
    let mut config = load_config(args)?;
    if let Some(limit) = limit {
        config.suggestion.max_suggestions = limit;
    }
    AutoCorrector::from_config(&config)
}

/// Build the effective configuration from the config file and flags.
fn load_config(args: &TypofixArgs) -> Result<TypofixConfig> {
    let mut config = match &args.config {
        Some(path) => TypofixConfig::load_from_file(path).map_err(|e| {
            anyhow::anyhow!("failed to load configuration {}: {e}", path.display())
        })?,
        None => TypofixConfig::default(),
    };

    if let Some(path) = &args.lexicon {
        config.lexicon = LexiconSource::WordList { path: path.clone() };
    }

    log::debug!("effective configuration: {config:?}");
    Ok(config)
}

/// Check whether words are in the lexicon.
fn check_words(args: CheckArgs, corrector: &AutoCorrector, cli_args: &TypofixArgs) -> Result<()> {
    let words = args
        .words
        .into_iter()
        .map(|word| {
            let valid = corrector.is_valid_word(&word);
            let correction = if valid {
                None
            } else {
                Some(corrector.correct_word(&word)).filter(|corrected| *corrected != word)
            };
            WordCheck {
                word,
                valid,
                correction,
            }
        })
        .collect();

    output_result("Word check", &CheckResults { words }, cli_args)
}

/// Correct a text given on the command line or on stdin.
fn correct_text(
    args: CorrectArgs,
    corrector: &AutoCorrector,
    cli_args: &TypofixArgs,
) -> Result<()> {
    let original = if args.text.is_empty() {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            log::info!("reading text from stdin");
        }
        let text = io::read_to_string(stdin.lock())?;
        text.trim_end_matches(['\r', '\n']).to_string()
    } else {
        args.text.join(" ")
    };

    let corrected = corrector.correct_text(&original);
    let result = CorrectionResults {
        changed: corrected != original,
        original,
        corrected,
    };

    output_result("Corrected text", &result, cli_args)
}

/// Show ranked suggestions for a word.
fn suggest_words(
    args: SuggestArgs,
    corrector: &AutoCorrector,
    cli_args: &TypofixArgs,
) -> Result<()> {
    let suggestions = corrector.suggestions(&args.word, args.previous.as_deref());
    let result = SuggestionResults {
        word: args.word,
        previous: args.previous,
        suggestions,
    };

    output_result("Suggestions", &result, cli_args)
}

/// Compute the distance between two words.
fn compute_distance(args: DistanceArgs, cli_args: &TypofixArgs) -> Result<()> {
    let metric = DistanceMetric::from(args.metric);
    let a = args.a.to_lowercase();
    let b = args.b.to_lowercase();

    let result = DistanceResult {
        distance: metric.distance(&a, &b),
        similarity: similarity(&a, &b),
        metric: metric.name().to_string(),
        a: args.a,
        b: args.b,
    };

    output_result("Edit distance", &result, cli_args)
}

/// Show lexicon and matcher statistics.
fn show_stats(corrector: &AutoCorrector, cli_args: &TypofixArgs) -> Result<()> {
    output_result("Corrector statistics", &corrector.stats(), cli_args)
}
