//! Word dictionary used for segmentation.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::trie::Trie;

/// A set of words indexed for prefix lookups
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    trie: Trie,
}

impl Dictionary {
    /// Create a new empty dictionary
    pub fn new() -> Self {
        Dictionary::default()
    }

    /// Load a dictionary from a file with one word per line.
    ///
    /// Lines are trimmed and blank lines skipped.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::DictionaryIo {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    /// Build a dictionary from file content (one word per line)
    pub fn parse(content: &str) -> Self {
        Self::from_words(content.lines())
    }

    /// Build a dictionary from a list of words
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::new();
        for word in words {
            dict.add_word(word.as_ref());
        }
        dict
    }

    /// Add a word (trimmed). Returns `false` if it was blank or already present.
    pub fn add_word(&mut self, word: &str) -> bool {
        self.trie.add(word.trim())
    }

    /// Remove a word. Returns `false` if it was not present.
    pub fn remove_word(&mut self, word: &str) -> bool {
        self.trie.remove(word.trim())
    }

    /// Check whether `word` is in the dictionary
    pub fn contains(&self, word: &str) -> bool {
        self.trie.has_word(word)
    }

    /// Byte length of the longest word that `text` starts with
    pub fn longest_match(&self, text: &str) -> Option<usize> {
        self.trie.prefix_lens(text).last().copied()
    }

    /// Byte lengths of all words that `text` starts with, shortest first
    pub fn prefix_lens(&self, text: &str) -> Vec<usize> {
        self.trie.prefix_lens(text)
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    /// Check if the dictionary has no words
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// Upper bound on the length of any word, in chars
    pub fn max_word_len(&self) -> usize {
        self.trie.max_word_len()
    }

    /// The underlying trie, for incremental walks
    pub fn trie(&self) -> &Trie {
        &self.trie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_skips_blank_lines() {
        let dict = Dictionary::parse("ค่าจ้าง\n\n  แรงงาน  \r\n\t\nครอบครัว\nแรงงาน\n");
        assert_eq!(dict.len(), 3);
        assert!(dict.contains("แรงงาน"));
        assert!(!dict.contains(""));
        assert!(!dict.contains("  แรงงาน  "));
    }

    #[test]
    fn test_longest_match() {
        let dict = Dictionary::from_words(["ได้", "ได้รับ", "รับ"]);
        assert_eq!(dict.longest_match("ได้รับเงิน"), Some("ได้รับ".len()));
        assert_eq!(dict.prefix_lens("ได้รับ"), vec!["ได้".len(), "ได้รับ".len()]);
        assert_eq!(dict.longest_match("เงิน"), None);
    }

    #[test]
    fn test_add_remove() {
        let mut dict = Dictionary::new();
        assert!(dict.is_empty());
        assert!(dict.add_word(" คน "));
        assert!(!dict.add_word("คน"));
        assert!(!dict.add_word("   "));
        assert!(dict.contains("คน"));
        assert!(dict.remove_word("คน"));
        assert!(!dict.remove_word("คน"));
        assert!(dict.is_empty());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "สวัสดี\nชาว\nโลก").unwrap();

        let dict = Dictionary::from_file(file.path()).unwrap();
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.max_word_len(), 6);
    }

    #[test]
    fn test_from_missing_file() {
        let err = Dictionary::from_file("/nonexistent/thongna/words.txt").unwrap_err();
        assert!(matches!(err, Error::DictionaryIo { .. }));
    }
}
