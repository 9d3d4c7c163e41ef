//! Prefix tree for word completion.

use std::collections::BTreeMap;

use crate::spelling::lexicon::Lexicon;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    is_end_of_word: bool,
    frequency: u32,
}

/// Prefix tree over words and their frequencies.
///
/// Finding all words under a prefix costs O(k + m) where k is the prefix
/// length and m the number of words below it.
#[derive(Debug, Clone, Default)]
pub struct Trie {
    root: TrieNode,
    len: usize,
}

impl Trie {
    /// Create an empty trie.
    pub fn new() -> Self {
        Trie::default()
    }

    /// Build a trie holding every entry of a lexicon.
    pub fn from_lexicon(lexicon: &Lexicon) -> Self {
        let mut trie = Trie::new();
        for word in lexicon.entries() {
            trie.insert(word, lexicon.frequency(word));
        }
        trie
    }

    /// Insert a word with its frequency. If the word already exists, the
    /// higher frequency is retained.
    pub fn insert(&mut self, word: &str, frequency: u32) {
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
        if !node.is_end_of_word {
            node.is_end_of_word = true;
            self.len += 1;
        }
        node.frequency = node.frequency.max(frequency);
    }

    /// Check whether `word` is stored as a complete word.
    pub fn contains(&self, word: &str) -> bool {
        self.find_node(word).is_some_and(|node| node.is_end_of_word)
    }

    /// Get the frequency of a word, 0 when it is absent or only a prefix.
    pub fn frequency(&self, word: &str) -> u32 {
        match self.find_node(word) {
            Some(node) if node.is_end_of_word => node.frequency,
            _ => 0,
        }
    }

    /// Number of complete words stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check whether the trie holds no words.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get at most `limit` words starting with `prefix`, most frequent first
    /// (ties in alphabetical order).
    pub fn words_with_prefix(&self, prefix: &str, limit: usize) -> Vec<(String, u32)> {
        let Some(prefix_node) = self.find_node(prefix) else {
            return Vec::new();
        };

        let mut results = Vec::new();
        let mut current = prefix.to_string();
        Self::collect_words(prefix_node, &mut current, &mut results);

        results.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        results.truncate(limit);
        results
    }

    fn find_node(&self, s: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for ch in s.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    fn collect_words(node: &TrieNode, current: &mut String, results: &mut Vec<(String, u32)>) {
        if node.is_end_of_word {
            results.push((current.clone(), node.frequency));
        }
        for (&ch, child) in &node.children {
            current.push(ch);
            Self::collect_words(child, current, results);
            current.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_trie() {
        let trie = Trie::new();
        assert!(!trie.contains("hello"));
        assert!(trie.is_empty());
        assert!(trie.words_with_prefix("", 10).is_empty());
    }

    #[test]
    fn test_insert_and_contains() {
        let mut trie = Trie::new();
        trie.insert("hello", 10);

        assert!(trie.contains("hello"));
        assert!(!trie.contains("hell")); // prefix alone is not a word
        assert_eq!(trie.frequency("hell"), 0);

        trie.insert("hell", 5);
        assert!(trie.contains("hell"));
        assert!(trie.contains("hello"));
        assert_eq!(trie.len(), 2);
    }

    #[test]
    fn test_frequency_keeps_highest() {
        let mut trie = Trie::new();
        trie.insert("hello", 5);
        trie.insert("hello", 20);
        trie.insert("hello", 10);

        assert_eq!(trie.frequency("hello"), 20);
        assert_eq!(trie.frequency("unknown"), 0);
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_words_with_prefix() {
        let mut trie = Trie::new();
        trie.insert("hello", 10);
        trie.insert("help", 30);
        trie.insert("helm", 20);
        trie.insert("world", 5);

        let results = trie.words_with_prefix("hel", 10);
        assert_eq!(
            results,
            vec![
                ("help".to_string(), 30),
                ("helm".to_string(), 20),
                ("hello".to_string(), 10),
            ]
        );
        assert!(trie.words_with_prefix("xyz", 10).is_empty());
    }

    #[test]
    fn test_words_with_prefix_limit_and_ties() {
        let mut trie = Trie::new();
        for word in ["ae", "ad", "ac", "ab", "aa"] {
            trie.insert(word, 1);
        }

        let results = trie.words_with_prefix("a", 3);
        let words: Vec<&str> = results.iter().map(|(w, _)| w.as_str()).collect();
        assert_eq!(words, vec!["aa", "ab", "ac"]);
    }

    #[test]
    fn test_from_lexicon() {
        let lexicon = Lexicon::from_words(["type", "typing", "text"]);
        let trie = Trie::from_lexicon(&lexicon);

        assert_eq!(trie.len(), 3);
        assert_eq!(trie.words_with_prefix("typ", 5).len(), 2);
    }
}
