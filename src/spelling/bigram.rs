//! Next-word prediction from bigram counts.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use ahash::AHashMap;

use crate::error::Result;

/// In-memory bigram model trained from user input.
#[derive(Debug, Clone, Default)]
pub struct BigramModel {
    counts: AHashMap<String, AHashMap<String, u32>>,
}

impl BigramModel {
    /// Create an empty model.
    pub fn new() -> Self {
        BigramModel::default()
    }

    /// Record that `next` followed `prev`. Empty words are ignored.
    pub fn record(&mut self, prev: &str, next: &str) {
        let prev = prev.trim().to_lowercase();
        let next = next.trim().to_lowercase();
        if prev.is_empty() || next.is_empty() {
            return;
        }

        let count = self.counts.entry(prev).or_default().entry(next).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Predict at most `limit` words likely to follow `prev`, as
    /// `(word, probability)` pairs, most likely first (ties alphabetical).
    pub fn predict(&self, prev: &str, limit: usize) -> Vec<(String, f64)> {
        let Some(next_counts) = self.counts.get(prev.trim().to_lowercase().as_str()) else {
            return Vec::new();
        };

        let total: u64 = next_counts.values().map(|&c| c as u64).sum();
        if total == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<(&String, u32)> =
            next_counts.iter().map(|(word, &count)| (word, count)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        ranked
            .into_iter()
            .take(limit)
            .map(|(word, count)| (word.clone(), count as f64 / total as f64))
            .collect()
    }

    /// Replace the model with previously exported counts.
    ///
    /// Words are case-folded like recorded ones; entries that fold to the
    /// same pair have their counts added.
    pub fn load(&mut self, data: BTreeMap<String, BTreeMap<String, u32>>) {
        self.counts.clear();
        for (prev, nexts) in data {
            let prev = prev.trim().to_lowercase();
            if prev.is_empty() {
                continue;
            }
            for (next, count) in nexts {
                let next = next.trim().to_lowercase();
                if next.is_empty() || count == 0 {
                    continue;
                }
                let total = self
                    .counts
                    .entry(prev.clone())
                    .or_default()
                    .entry(next)
                    .or_insert(0);
                *total = total.saturating_add(count);
            }
        }
    }

    /// Load a model from a JSON file of `{"prev": {"next": count}}` objects.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let data: BTreeMap<String, BTreeMap<String, u32>> = serde_json::from_reader(reader)?;

        let mut model = BigramModel::new();
        model.load(data);
        log::debug!(
            "loaded bigrams for {} words from {}",
            model.len(),
            path.display()
        );
        Ok(model)
    }

    /// Save the model as JSON, in the format read by
    /// [`load_from_file`](Self::load_from_file).
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &self.to_map())?;
        writer.flush()?;
        Ok(())
    }

    /// Export the counts in a stable order.
    pub fn to_map(&self) -> BTreeMap<String, BTreeMap<String, u32>> {
        self.counts
            .iter()
            .map(|(prev, nexts)| {
                (
                    prev.clone(),
                    nexts.iter().map(|(w, &c)| (w.clone(), c)).collect(),
                )
            })
            .collect()
    }

    /// Number of distinct previous words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
