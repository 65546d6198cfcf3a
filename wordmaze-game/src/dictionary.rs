//! Word membership and prefix lookups backed by a trie.
//!
//! The dictionary is immutable after construction and shared read-only by
//! the path engine and the session state machine. Both lookup operations
//! cost one trie walk over the query, independent of dictionary size.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    terminal: bool,
}

/// Immutable set of playable words.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    root: TrieNode,
    len: usize,
}

impl Dictionary {
    /// Create a dictionary with no words. Degenerate but legal: no prefix is
    /// ever viable and no word ever completes.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a dictionary from raw entries. Entries are trimmed and
    /// lowercased; blanks and duplicates are dropped.
    #[must_use]
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = Self::default();
        for word in words {
            dictionary.insert(word.as_ref());
        }
        dictionary
    }

    fn insert(&mut self, raw: &str) {
        let word = normalize(raw);
        if word.is_empty() {
            return;
        }
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
        if !node.terminal {
            node.terminal = true;
            self.len += 1;
        }
    }

    fn walk(&self, query: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for ch in query.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    /// Exact membership, case-normalized.
    #[must_use]
    pub fn contains_word(&self, word: &str) -> bool {
        self.walk(&normalize(word)).is_some_and(|node| node.terminal)
    }

    /// True when at least one word starts with `prefix`, counting a word as
    /// a prefix of itself. The empty prefix is always viable.
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        let prefix = normalize(prefix);
        if prefix.is_empty() {
            return true;
        }
        self.walk(&prefix).is_some()
    }

    /// Number of distinct words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the dictionary holds no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}
