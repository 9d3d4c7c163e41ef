//! Edit distance calculation for word correction.

use std::cmp::min;

use serde::{Deserialize, Serialize};

/// Calculate the Levenshtein distance between two strings.
/// This is the minimum number of single-character edits (insertions, deletions, or substitutions)
/// required to change one word into another.
#[allow(clippy::needless_range_loop)]
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];

    for i in 0..=len1 {
        matrix[i][0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    for i in 1..=len1 {
        for j in 1..=len2 {
            let cost = if s1_chars[i - 1] == s2_chars[j - 1] {
                0
            } else {
                1
            };

            matrix[i][j] = min(
                min(
                    matrix[i - 1][j] + 1, // deletion
                    matrix[i][j - 1] + 1, // insertion
                ),
                matrix[i - 1][j - 1] + cost, // substitution
            );
        }
    }

    matrix[len1][len2]
}

/// Calculate Levenshtein distance with a maximum threshold for early termination.
/// Returns None if the distance exceeds the threshold, which is cheaper than
/// computing the full distance when most candidates are far away.
#[allow(clippy::needless_range_loop)]
pub fn levenshtein_distance_threshold(s1: &str, s2: &str, threshold: usize) -> Option<usize> {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();

    // The length difference is a lower bound on the distance
    if len1.abs_diff(len2) > threshold {
        return None;
    }

    if len1 == 0 {
        return Some(len2);
    }
    if len2 == 0 {
        return Some(len1);
    }

    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for i in 1..=len1 {
        curr_row[0] = i;
        let mut min_in_row = i;

        for j in 1..=len2 {
            let cost = if s1_chars[i - 1] == s2_chars[j - 1] {
                0
            } else {
                1
            };

            curr_row[j] = min(
                min(
                    prev_row[j] + 1,     // deletion
                    curr_row[j - 1] + 1, // insertion
                ),
                prev_row[j - 1] + cost, // substitution
            );

            min_in_row = min(min_in_row, curr_row[j]);
        }

        // Row minima never decrease, so the final distance is at least this
        if min_in_row > threshold {
            return None;
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    let distance = prev_row[len2];
    if distance <= threshold {
        Some(distance)
    } else {
        None
    }
}

/// Calculate Damerau-Levenshtein distance (optimal string alignment variant),
/// which also counts a swap of two adjacent characters as a single edit.
///
/// This matches real-world typing errors better than plain Levenshtein
/// (`"teh"` is one edit away from `"the"`), but it is not a true metric:
/// the triangle inequality does not always hold.
#[allow(clippy::needless_range_loop)]
pub fn damerau_levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];

    for i in 0..=len1 {
        matrix[i][0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    for i in 1..=len1 {
        for j in 1..=len2 {
            let cost = if s1_chars[i - 1] == s2_chars[j - 1] {
                0
            } else {
                1
            };

            matrix[i][j] = min(
                min(
                    matrix[i - 1][j] + 1, // deletion
                    matrix[i][j - 1] + 1, // insertion
                ),
                matrix[i - 1][j - 1] + cost, // substitution
            );

            if i > 1
                && j > 1
                && s1_chars[i - 1] == s2_chars[j - 2]
                && s1_chars[i - 2] == s2_chars[j - 1]
            {
                matrix[i][j] = min(
                    matrix[i][j],
                    matrix[i - 2][j - 2] + cost, // transposition
                );
            }
        }
    }

    matrix[len1][len2]
}

/// Calculate a normalized similarity between 0.0 (completely different)
/// and 1.0 (identical). Two empty strings are identical.
pub fn similarity(s1: &str, s2: &str) -> f64 {
    let max_len = s1.chars().count().max(s2.chars().count());

    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(s1, s2);
    1.0 - (distance as f64 / max_len as f64)
}

/// Maximum edit distance worth tolerating for a word of the given length
/// (in characters). Short words get less tolerance to avoid spurious
/// corrections.
pub fn max_allowed_distance(word_length: usize) -> usize {
    match word_length {
        0..=3 => 0,
        4..=5 => 1,
        6..=8 => 2,
        _ => 3,
    }
}

/// The edit distance used to compare a typed word against lexicon entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Insertions, deletions and substitutions.
    #[default]
    Levenshtein,
    /// Levenshtein plus adjacent transpositions.
    DamerauLevenshtein,
}

impl DistanceMetric {
    /// Get the name of the metric.
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Levenshtein => "levenshtein",
            DistanceMetric::DamerauLevenshtein => "damerau_levenshtein",
        }
    }

    /// Whether the metric satisfies the triangle inequality.
    pub fn is_metric_space(&self) -> bool {
        matches!(self, DistanceMetric::Levenshtein)
    }

    /// Calculate the distance between two strings.
    pub fn distance(&self, s1: &str, s2: &str) -> usize {
        match self {
            DistanceMetric::Levenshtein => levenshtein_distance(s1, s2),
            DistanceMetric::DamerauLevenshtein => damerau_levenshtein_distance(s1, s2),
        }
    }

    /// Calculate the distance, returning None when it exceeds `threshold`.
    pub fn distance_within(&self, s1: &str, s2: &str, threshold: usize) -> Option<usize> {
        match self {
            DistanceMetric::Levenshtein => levenshtein_distance_threshold(s1, s2, threshold),
            DistanceMetric::DamerauLevenshtein => {
                if s1.chars().count().abs_diff(s2.chars().count()) > threshold {
                    return None;
                }
                let distance = damerau_levenshtein_distance(s1, s2);
                (distance <= threshold).then_some(distance)
            }
        }
    }
}
