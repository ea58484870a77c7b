//! Character trie backing a dictionary.
//!
//! Words are stored one character per edge, so the boundary graph builder can
//! walk the trie cluster by cluster and stop as soon as no word continues.

use std::collections::HashMap;

/// A node in the Trie
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    /// Children nodes, keyed by character
    pub children: HashMap<char, TrieNode>,
    /// Whether this node marks the end of a valid word
    pub is_leaf: bool,
}

impl TrieNode {
    /// Create a new empty node
    pub fn new() -> Self {
        TrieNode::default()
    }

    /// Check if this node has any children
    pub fn can_walk(&self) -> bool {
        !self.children.is_empty()
    }

    /// Check if this node is a valid word ending
    pub fn is_match(&self) -> bool {
        self.is_leaf
    }
}

/// A Trie for storing and looking up words
#[derive(Debug, Default, Clone)]
pub struct Trie {
    /// The root node
    root: TrieNode,
    /// Number of words in the trie
    word_count: usize,
    /// Length in chars of the longest word ever added
    max_word_len: usize,
}

impl Trie {
    /// Create a new empty Trie
    pub fn new() -> Self {
        Trie::default()
    }

    /// Get the number of words in the trie
    pub fn len(&self) -> usize {
        self.word_count
    }

    /// Check if the trie is empty
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Upper bound on the length of any stored word, in chars.
    /// Not lowered by `remove`.
    pub fn max_word_len(&self) -> usize {
        self.max_word_len
    }

    /// Add a word, returning `true` if it was not already present
    pub fn add(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }

        let mut current = &mut self.root;
        let mut len = 0;
        for c in word.chars() {
            current = current.children.entry(c).or_insert_with(TrieNode::new);
            len += 1;
        }

        if current.is_leaf {
            return false;
        }
        current.is_leaf = true;
        self.word_count += 1;
        self.max_word_len = self.max_word_len.max(len);
        true
    }

    /// Remove a word, pruning branches that no longer lead to any word.
    /// Returns `true` if the word was present.
    pub fn remove(&mut self, word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        if chars.is_empty() {
            return false;
        }
        let removed = Self::remove_from(&mut self.root, &chars);
        if removed {
            self.word_count -= 1;
        }
        removed
    }

    fn remove_from(node: &mut TrieNode, chars: &[char]) -> bool {
        let Some((first, rest)) = chars.split_first() else {
            let was_leaf = node.is_leaf;
            node.is_leaf = false;
            return was_leaf;
        };

        let Some(child) = node.children.get_mut(first) else {
            return false;
        };
        let removed = Self::remove_from(child, rest);
        if removed && !child.is_leaf && !child.can_walk() {
            node.children.remove(first);
        }
        removed
    }

    /// Walk the trie by one character, returning the next node if it exists
    pub fn walk<'a>(&'a self, c: char, current: Option<&'a TrieNode>) -> Option<&'a TrieNode> {
        let node = current.unwrap_or(&self.root);
        node.children.get(&c)
    }

    /// Walk the trie through every character of `s`
    pub fn walk_str<'a>(&'a self, s: &str, current: Option<&'a TrieNode>) -> Option<&'a TrieNode> {
        let mut node = current.unwrap_or(&self.root);
        for c in s.chars() {
            node = node.children.get(&c)?;
        }
        Some(node)
    }

    /// Check if a word exists in the trie
    pub fn has_word(&self, word: &str) -> bool {
        !word.is_empty() && self.walk_str(word, None).map_or(false, TrieNode::is_match)
    }

    /// Byte lengths of every stored word that is a prefix of `text`, shortest first
    pub fn prefix_lens(&self, text: &str) -> Vec<usize> {
        let mut lens = Vec::new();
        let mut node = &self.root;
        for (i, c) in text.char_indices() {
            match node.children.get(&c) {
                Some(next) => node = next,
                None => break,
            }
            if node.is_leaf {
                lens.push(i + c.len_utf8());
            }
        }
        lens
    }

    /// Get a reference to the root node (for external traversal)
    pub fn root(&self) -> &TrieNode {
        &self.root
    }
}
