//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, TypofixArgs};
use crate::error::Result;
use crate::spelling::suggest::Suggestion;

/// Validity of a single word.
#[derive(Debug, Serialize, Deserialize)]
pub struct WordCheck {
    pub word: String,
    pub valid: bool,
    pub correction: Option<String>,
}

/// Result structure for the check command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResults {
    pub words: Vec<WordCheck>,
}

/// Result structure for the correct command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CorrectionResults {
    pub original: String,
    pub corrected: String,
    pub changed: bool,
}

/// Result structure for the suggest command.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionResults {
    pub word: String,
    pub previous: Option<String>,
    pub suggestions: Vec<Suggestion>,
}

/// Result structure for the distance command.
#[derive(Debug, Serialize, Deserialize)]
pub struct DistanceResult {
    pub a: String,
    pub b: String,
    pub metric: String,
    pub distance: usize,
    pub similarity: f64,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &TypofixArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &TypofixArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;

    match result {
        _ if std::any::type_name::<T>().ends_with("CheckResults") => {
            output_check_results_human(&value)
        }
        _ if std::any::type_name::<T>().ends_with("CorrectionResults") => {
            output_correction_human(&value)
        }
        _ if std::any::type_name::<T>().ends_with("SuggestionResults") => {
            output_suggestions_human(&value)
        }
        _ => output_generic_human(&value),
    }
}

/// Output word checks in human format.
fn output_check_results_human(value: &serde_json::Value) -> Result<()> {
    if let Some(words) = value.get("words").and_then(|w| w.as_array()) {
        for check in words {
            let word = check.get("word").and_then(|w| w.as_str()).unwrap_or("");
            let valid = check.get("valid").and_then(|v| v.as_bool()).unwrap_or(false);
            match check.get("correction").and_then(|c| c.as_str()) {
                _ if valid => println!("{word}: ok"),
                Some(correction) => println!("{word}: unknown (did you mean \"{correction}\"?)"),
                None => println!("{word}: unknown"),
            }
        }
    }
    Ok(())
}

/// Output a corrected text in human format.
fn output_correction_human(value: &serde_json::Value) -> Result<()> {
    if let Some(corrected) = value.get("corrected").and_then(|c| c.as_str()) {
        println!("{corrected}");
    }
    Ok(())
}

/// Output suggestions in human format.
fn output_suggestions_human(value: &serde_json::Value) -> Result<()> {
    let suggestions = value
        .get("suggestions")
        .and_then(|s| s.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default();

    if suggestions.is_empty() {
        println!("No suggestions.");
        return Ok(());
    }

    for (i, suggestion) in suggestions.iter().enumerate() {
        let word = suggestion.get("word").and_then(|w| w.as_str()).unwrap_or("");
        let score = suggestion
            .get("score")
            .and_then(|s| s.as_f64())
            .unwrap_or(0.0);
        let source = suggestion
            .get("source")
            .and_then(|s| s.as_str())
            .unwrap_or("unknown");
        let marker = if suggestion
            .get("is_autocorrect")
            .and_then(|a| a.as_bool())
            .unwrap_or(false)
        {
            " *"
        } else {
            ""
        };
        println!("{}. {word} ({source}, score {score:.3}){marker}", i + 1);
    }
    Ok(())
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &TypofixArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format!("{f:.3}"),
            _ => n.to_string(),
        },
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}
