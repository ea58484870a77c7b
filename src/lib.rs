//! # thongna
//!
//! A fast dictionary-based Thai word segmenter written in Rust.
//!
//! Text is split into Thai Character Clusters, the clusters are linked into a
//! graph of candidate words using a dictionary, and the path with the fewest
//! unknown clusters and then the fewest tokens is chosen ("newmm", maximal
//! matching). Long or pathological inputs can be bounded with safe mode and
//! split across threads with parallel mode; both give the same tokens as a
//! plain run, except at the cuts safe mode is forced to make.
//!
//! ## Quick Start
//!
//! ```rust
//! use thongna::{Dictionary, Newmm, Segmenter};
//!
//! let dict = Dictionary::from_words(["ค่าจ้าง", "แรงงาน", "ครอบครัว"]);
//! let newmm = Newmm::new(dict);
//!
//! let words = newmm.segment("ค่าจ้างแรงงาน", false, false).unwrap();
//! assert_eq!(words, vec!["ค่าจ้าง", "แรงงาน"]);
//! ```
//!
//! ## Named dictionaries
//!
//! Dictionaries loaded with [`load_dict`] live in a process-wide registry and
//! are referred to by name:
//!
//! ```rust,no_run
//! let (message, ok) = thongna::load_dict("words_th.txt", "default");
//! println!("{message}");
//! if ok {
//!     let words = thongna::tokenize("ไข่คน2021", "default", false, false).unwrap();
//!     println!("{words:?}");
//! }
//! ```
//!
//! ## Python Bindings
//!
//! This library can be compiled as a Python extension module with the
//! `python` feature.

pub mod char_categories;
pub mod dictionary;
pub mod error;
pub mod graph;
pub mod normalizer;
pub mod parallel;
pub mod registry;
pub mod resolver;
pub mod safe_mode;
pub mod tcc;
pub mod token;
pub mod tokenizer;
pub mod trie;

// Python bindings (only compiled when the "python" feature is enabled)
#[cfg(feature = "python")]
pub mod python;

use std::path::Path;

// Re-export main types for convenience
pub use char_categories::{get_char_category, CharCategory};
pub use dictionary::Dictionary;
pub use error::{Error, Result};
pub use graph::{BoundaryGraph, Edge};
pub use normalizer::{normalize, reverse_text};
pub use parallel::ParallelConfig;
pub use registry::DictionaryRegistry;
pub use safe_mode::{SafeModeConfig, SegmentPlan};
pub use tcc::{Cluster, ClusterKind};
pub use token::{Token, TokenKind};
pub use tokenizer::{Newmm, NewmmConfig, Segmenter, SimpleTokenizer};
pub use trie::{Trie, TrieNode};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Load a word list (one word per line) into the global registry under
/// `dict_name`. Returns a status message and whether the load succeeded.
/// An existing dictionary is never replaced.
pub fn load_dict<P: AsRef<Path>>(file_path: P, dict_name: &str) -> (String, bool) {
    DictionaryRegistry::global().load(file_path, dict_name)
}

/// Segment `text` with the registered dictionary `dict_name`.
///
/// Empty text gives an empty list without looking up the dictionary.
pub fn tokenize(text: &str, dict_name: &str, safe: bool, parallel: bool) -> Result<Vec<String>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    Newmm::from_registry(dict_name)?.segment(text, safe, parallel)
}

/// Alias of [`tokenize`]
pub fn newmm(text: &str, dict_name: &str, safe: bool, parallel: bool) -> Result<Vec<String>> {
    tokenize(text, dict_name, safe, parallel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_pipeline() {
        let dict = Dictionary::from_words(["ราคา", "บาท"]);
        DictionaryRegistry::global()
            .insert("lib-test-prices", dict)
            .unwrap();

        let words = tokenize("ราคา ฿550.75 บาท", "lib-test-prices", false, false).unwrap();
        assert_eq!(words, vec!["ราคา", " ", "฿", "550.75", " ", "บาท"]);
        assert_eq!(newmm("ราคา", "lib-test-prices", true, true).unwrap(), vec!["ราคา"]);
    }

    #[test]
    fn test_empty_text_skips_lookup() {
        assert!(tokenize("", "never-registered", false, false).unwrap().is_empty());
        assert!(matches!(
            tokenize("ก", "never-registered", false, false),
            Err(Error::DictionaryNotFound(_))
        ));
    }
}
