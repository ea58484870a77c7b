//! The newmm tokenizer.
//!
//! Text is split into clusters, the clusters are linked into a boundary graph
//! using the dictionary, and the best path through the graph gives the tokens.
//! Neighbouring unknown clusters are then joined into a single token.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::char_categories::{get_char_category, CharCategory};
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::graph::{push_edges, BoundaryGraph};
use crate::parallel::{tokenize_parallel, ParallelConfig};
use crate::registry::DictionaryRegistry;
use crate::resolver::resolve;
use crate::safe_mode::{self, SafeModeConfig, SegmentPlan};
use crate::tcc::{self, Cluster};
use crate::token::{Token, TokenKind};

/// Tuning knobs of the tokenizer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewmmConfig {
    /// Limits used when safe mode is requested
    pub safe_mode: SafeModeConfig,
    /// Chunking used when parallel mode is requested
    pub parallel: ParallelConfig,
}

impl NewmmConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Segment a run of clusters of `text`.
///
/// Token offsets are taken from the clusters, so they are relative to `text`
/// even when `clusters` is only a slice of its clusters.
pub(crate) fn tokenize_clusters(
    text: &str,
    clusters: &[Cluster],
    dict: &Dictionary,
    safe: Option<&SafeModeConfig>,
) -> Result<Vec<Token>> {
    let graph = BoundaryGraph::build(text, clusters, dict);
    let plan = match safe {
        Some(config) => safe_mode::plan(&graph, config),
        None => SegmentPlan::whole(&graph),
    };

    let mut tokens = Vec::new();
    for (start, end) in plan.segments() {
        for span in resolve(&graph, start, end)? {
            let from = clusters[span.start].start;
            let to = clusters[span.end - 1].end();
            tokens.push(Token::with_text(
                text[from..to].to_string(),
                from,
                to - from,
                span.kind,
            ));
        }
    }

    Ok(tokens)
}

/// Bare one- or two-consonant entries do not end an unknown run
fn is_short_consonant_word(word: &str) -> bool {
    word.chars().count() <= 2
        && word
            .chars()
            .all(|c| get_char_category(c) == CharCategory::Cons)
}

/// Whether a dictionary word other than a short consonant word starts at cluster `i`
fn starts_known_word(text: &str, clusters: &[Cluster], i: usize, dict: &Dictionary) -> bool {
    let mut edges = Vec::new();
    push_edges(text, clusters, i, dict, &mut edges);
    edges
        .iter()
        .filter(|e| e.kind == TokenKind::Word)
        .any(|e| {
            let word = &text[clusters[i].start..clusters[e.end - 1].end()];
            !is_short_consonant_word(word)
        })
}

/// Join adjacent unknown tokens, unless a known word starts at the join.
///
/// Runs over the tokens of the whole text, so chunk and segment cuts do not
/// show in the result.
fn merge_unknown_runs(
    text: &str,
    clusters: &[Cluster],
    dict: &Dictionary,
    tokens: Vec<Token>,
) -> Vec<Token> {
    let mut merged: Vec<Token> = Vec::with_capacity(tokens.len());

    for token in tokens {
        if let Some(prev) = merged.last_mut() {
            if prev.kind == TokenKind::Unknown
                && token.kind == TokenKind::Unknown
                && prev.end() == token.start
            {
                let i = clusters.partition_point(|c| c.start < token.start);
                if !starts_known_word(text, clusters, i, dict) {
                    prev.text.push_str(&token.text);
                    prev.len += token.len;
                    continue;
                }
            }
        }
        merged.push(token);
    }

    merged
}

/// Dictionary-based maximal matching tokenizer
#[derive(Debug, Clone)]
pub struct Newmm {
    /// The dictionary (shared reference)
    dict: Arc<Dictionary>,
    config: NewmmConfig,
}

impl Newmm {
    /// Create a new tokenizer with the given dictionary
    pub fn new(dict: Dictionary) -> Self {
        Self::with_arc(Arc::new(dict))
    }

    /// Create a new tokenizer with a shared dictionary reference
    pub fn with_arc(dict: Arc<Dictionary>) -> Self {
        Newmm {
            dict,
            config: NewmmConfig::default(),
        }
    }

    /// Create a tokenizer over a dictionary of the global registry
    pub fn from_registry(name: &str) -> Result<Self> {
        Ok(Self::with_arc(DictionaryRegistry::global().get(name)?))
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: NewmmConfig) -> Self {
        self.config = config;
        self
    }

    /// Get a reference to the dictionary
    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// Current configuration
    pub fn config(&self) -> &NewmmConfig {
        &self.config
    }

    /// Add words to this tokenizer's dictionary.
    ///
    /// The dictionary is copied first if it is shared, so registered
    /// dictionaries and other tokenizers are not affected.
    pub fn add_words<I, S>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dict = Arc::make_mut(&mut self.dict);
        words
            .into_iter()
            .filter(|w| dict.add_word(w.as_ref()))
            .count()
    }

    /// Remove words from this tokenizer's dictionary (copy-on-write)
    pub fn remove_words<I, S>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dict = Arc::make_mut(&mut self.dict);
        words
            .into_iter()
            .filter(|w| dict.remove_word(w.as_ref()))
            .count()
    }

    /// Tokenize a string.
    ///
    /// # Arguments
    /// * `text` - The text to tokenize
    /// * `safe` - Bound the work on highly ambiguous text
    /// * `parallel` - Split long text into chunks segmented on a worker pool
    pub fn tokenize(&self, text: &str, safe: bool, parallel: bool) -> Result<Vec<Token>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let clusters = tcc::clusters(text);
        let safe_config = safe.then_some(&self.config.safe_mode);

        let tokens = if parallel {
            tokenize_parallel(
                text,
                &clusters,
                &self.dict,
                safe_config,
                &self.config.parallel,
            )?
        } else {
            tokenize_clusters(text, &clusters, &self.dict, safe_config)?
        };

        Ok(merge_unknown_runs(text, &clusters, &self.dict, tokens))
    }
}

/// Anything that splits text into token strings
pub trait Segmenter {
    /// Split `text` into token strings
    fn segment(&self, text: &str, safe: bool, parallel: bool) -> Result<Vec<String>>;

    /// Like `segment`, but reports failure as an empty list
    fn segment_to_string(&self, text: &str, safe: bool, parallel: bool) -> Vec<String> {
        self.segment(text, safe, parallel).unwrap_or_else(|e| {
            log::warn!("segmentation failed: {e}");
            Vec::new()
        })
    }
}

impl Segmenter for Newmm {
    fn segment(&self, text: &str, safe: bool, parallel: bool) -> Result<Vec<String>> {
        Ok(self
            .tokenize(text, safe, parallel)?
            .into_iter()
            .map(|t| t.text)
            .collect())
    }
}

/// A tokenizer that doesn't use a dictionary (one token per cluster)
pub struct SimpleTokenizer;

impl SimpleTokenizer {
    /// Tokenize text into clusters (no dictionary lookup)
    pub fn tokenize(text: &str) -> Vec<Token> {
        tcc::clusters(text)
            .into_iter()
            .map(|c| {
                Token::with_text(
                    c.as_str(text).to_string(),
                    c.start,
                    c.len,
                    TokenKind::for_cluster(c.kind),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_dict() -> Dictionary {
        Dictionary::from_words([
            "ค่า", "จ้าง", "ค่าจ้าง", "ที่", "ได้", "รับ", "ได้รับ", "แรง", "งาน", "แรงงาน",
            "เขา", "ชอบ", "มาก", "ไข่", "คน",
        ])
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_simple_tokenization() {
        let newmm = Newmm::new(make_test_dict());
        let tokens = newmm.tokenize("ค่าจ้างที่ได้รับ", false, false).unwrap();

        assert_eq!(texts(&tokens), vec!["ค่าจ้าง", "ที่", "ได้รับ"]);
        assert!(tokens.iter().all(Token::is_word));
        assert_eq!(tokens[1].start, "ค่าจ้าง".len());
    }

    #[test]
    fn test_mixed_scripts() {
        let newmm = Newmm::new(make_test_dict());
        let tokens = newmm.tokenize("เขาชอบ pizza มาก", false, false).unwrap();

        assert_eq!(texts(&tokens), vec!["เขา", "ชอบ", " ", "pizza", " ", "มาก"]);
        assert_eq!(tokens[3].kind, TokenKind::Latin);
        assert_eq!(tokens[2].kind, TokenKind::Space);
    }

    #[test]
    fn test_empty_and_space() {
        let newmm = Newmm::new(make_test_dict());
        assert!(newmm.tokenize("", false, false).unwrap().is_empty());
        assert_eq!(newmm.segment(" ", false, false).unwrap(), vec![" "]);
    }

    #[test]
    fn test_add_words_is_copy_on_write() {
        let shared = Arc::new(make_test_dict());
        let mut custom = Newmm::with_arc(Arc::clone(&shared));
        let plain = Newmm::with_arc(shared);

        assert_eq!(custom.add_words(["ไข่คน", "ไข่"]), 1);
        assert_eq!(custom.segment("ไข่คน", false, false).unwrap(), vec!["ไข่คน"]);
        assert_eq!(plain.segment("ไข่คน", false, false).unwrap(), vec!["ไข่", "คน"]);

        assert_eq!(custom.remove_words(["ไข่คน"]), 1);
        assert_eq!(custom.segment("ไข่คน", false, false).unwrap(), vec!["ไข่", "คน"]);
    }

    #[test]
    fn test_config_from_json() {
        let config = NewmmConfig::from_json(r#"{"parallel": {"chunk_clusters": 64}}"#).unwrap();
        assert_eq!(config.parallel.chunk_clusters, 64);
        assert_eq!(config.safe_mode, SafeModeConfig::default());

        assert!(NewmmConfig::from_json("{not json").is_err());
    }

    #[test]
    fn test_modes_agree_on_plain_text() {
        let newmm = Newmm::new(make_test_dict()).with_config(NewmmConfig {
            parallel: ParallelConfig { chunk_clusters: 4 },
            ..Default::default()
        });
        let text = "ค่าจ้างที่ได้รับ แรงงาน ไข่คน2021 ".repeat(8);
        let base = newmm.segment(&text, false, false).unwrap();

        for (safe, parallel) in [(true, false), (false, true), (true, true)] {
            assert_eq!(newmm.segment(&text, safe, parallel).unwrap(), base);
        }
    }

    #[test]
    fn test_unknown_run_is_one_token() {
        let newmm = Newmm::new(Dictionary::from_words(["ไป", "ก"]));
        let tokens = newmm.tokenize("ขขขขไป", false, false).unwrap();

        assert_eq!(texts(&tokens), vec!["ขขขข", "ไป"]);
        assert_eq!(tokens[0].kind, TokenKind::Unknown);
        assert_eq!(tokens[0].len, "ขขขข".len());
    }

    #[test]
    fn test_unknown_run_stops_at_word() {
        let newmm = Newmm::new(Dictionary::from_words(["สวัสดี", "รับ"]));
        assert_eq!(
            newmm.segment("สวัสดีครับ", false, false).unwrap(),
            vec!["สวัสดี", "ค", "รับ"]
        );

        // ขคช is not on the best path, but the run still ends where it starts
        let newmm = Newmm::new(Dictionary::from_words(["ขคช", "คชงจ"]));
        assert_eq!(
            newmm.segment("กขคชงจ", false, false).unwrap(),
            vec!["ก", "ข", "คชงจ"]
        );
    }

    #[test]
    fn test_short_consonant_word_does_not_end_run() {
        let newmm = Newmm::new(Dictionary::from_words(["ขค", "คงจ"]));
        assert_eq!(
            newmm.segment("กขคงจ", false, false).unwrap(),
            vec!["กข", "คงจ"]
        );
        assert!(is_short_consonant_word("ขค"));
        assert!(!is_short_consonant_word("ไป"));
        assert!(!is_short_consonant_word("ขคช"));
    }

    #[test]
    fn test_unknown_run_across_chunks() {
        let newmm = Newmm::new(Dictionary::from_words(["ไป"])).with_config(NewmmConfig {
            parallel: ParallelConfig { chunk_clusters: 2 },
            ..Default::default()
        });
        let text = "ข".repeat(20) + "ไป";

        for safe in [false, true] {
            assert_eq!(
                newmm.segment(&text, safe, true).unwrap(),
                vec!["ข".repeat(20), "ไป".to_string()]
            );
        }
    }

    #[test]
    fn test_segment_to_string() {
        let newmm = Newmm::new(make_test_dict());
        assert_eq!(newmm.segment_to_string("ไข่", false, false), vec!["ไข่"]);
    }

    #[test]
    fn test_simple_tokenizer() {
        let tokens = SimpleTokenizer::tokenize("ไข่คน 2021");

        assert_eq!(texts(&tokens), vec!["ไข่", "ค", "น", " ", "2021"]);
        assert_eq!(tokens[4].kind, TokenKind::Number);
        assert_eq!(tokens[1].kind, TokenKind::Unknown);
    }
}
