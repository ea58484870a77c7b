//! Thai Character Cluster (TCC) segmentation.
//!
//! Splits raw text into clusters that can never be split by a word boundary.
//! Runs of Thai letters go through a table of orthographic patterns; every
//! other class of character (digits, Latin, whitespace, punctuation, other
//! scripts) forms one cluster per maximal run.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::char_categories::{get_char_category, CharCategory};

/// The class of a cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClusterKind {
    /// Thai orthographic cluster
    Thai,
    /// Digits with optional `.`/`,` group separators
    Number,
    /// Latin letters
    Latin,
    /// Whitespace
    Whitespace,
    /// Punctuation and symbols
    Punct,
    /// Letters of another script
    Foreign,
}

/// A cluster: a byte span of the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cluster {
    /// Starting byte offset
    pub start: usize,
    /// Length in bytes
    pub len: usize,
    /// Class of the cluster
    pub kind: ClusterKind,
}

impl Cluster {
    /// Byte offset one past the end of the cluster
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// The text of this cluster
    pub fn as_str<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end()]
    }
}

// Pattern shorthands: c = consonant, t = optional tone mark,
// k = optional karan-silenced tail, d = lower vowels (inside k only).
const TAIL: &str = "(?:cc?[dิ]?[์])?";
const CONSONANT: &str = "[ก-ฮ]";
const TONE: &str = "[่-๋]?";
const LOWER_VOWELS: &str = "ุู";

/// Cluster patterns, tried in order at each position
const TCC_RULES: &[&str] = &[
    "เc็ck",
    "เcctาะk",
    "เccีtยะk",
    "เcc็ck",
    "เcิc์ck",
    "เcิtck",
    "เcีtยะ?k",
    "เcืtอะ?k",
    "เctา?ะ?k",
    "cัtวะk",
    "c[ัื]tc[ุิะ]?k",
    "c[ิุู]์k",
    "c[ะ-ู]tk",
    "cรรc์",
    "c็",
    "ct[ะาำ]?k",
    "ck",
    "แc็c",
    "แcc์",
    "แctะ",
    "แcc็c",
    "แccc์",
    "โctะ",
    "[เ-ไ]ct",
    "ก็",
    "อึ",
    "หึ",
    "(?:เccีtย)[เ-ไก-ฮ]k",
    "(?:เc[ิีุู]tย)[เ-ไก-ฮ]k",
];

fn expand(rule: &str) -> String {
    rule.replace('k', TAIL)
        .replace('c', CONSONANT)
        .replace('t', TONE)
        .replace('d', LOWER_VOWELS)
}

static TCC: Lazy<Regex> = Lazy::new(|| {
    let alternation: Vec<String> = TCC_RULES.iter().map(|r| expand(r)).collect();
    Regex::new(&format!("^(?:{})", alternation.join("|"))).expect("Invalid TCC pattern table")
});

// Forms ending in -ีย/-ิย followed by a consonant: the consonant opens the next cluster.
static LOOKAHEAD: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        "^(?P<cluster>{}|{})[เ-ไก-ฮ]{}",
        expand("เccีtย"),
        expand("เc[ิีุู]tย"),
        expand("k")
    );
    Regex::new(&pattern).expect("Invalid TCC look-ahead pattern")
});

/// Byte length of the Thai cluster at the start of `rest`
fn thai_cluster_len(rest: &str) -> usize {
    if let Some(m) = TCC.find(rest) {
        let matched = m.as_str();
        if let Some(caps) = LOOKAHEAD.captures(matched) {
            if let Some(cluster) = caps.name("cluster") {
                return cluster.end();
            }
        }
        if !matched.is_empty() {
            return matched.len();
        }
    }
    rest.chars().next().map_or(0, char::len_utf8)
}

fn run_kind(category: CharCategory) -> ClusterKind {
    match category {
        c if c.is_thai_letter() => ClusterKind::Thai,
        c if c.is_digit() => ClusterKind::Number,
        CharCategory::Latin => ClusterKind::Latin,
        CharCategory::Space => ClusterKind::Whitespace,
        CharCategory::Punct | CharCategory::ThaiPunct => ClusterKind::Punct,
        _ => ClusterKind::Foreign,
    }
}

/// Split `text` into clusters.
///
/// The clusters are contiguous and cover the whole text, so concatenating
/// them gives back the input. Empty input yields no clusters.
pub fn clusters(text: &str) -> Vec<Cluster> {
    let mut out = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        let kind = run_kind(get_char_category(c));
        let end = match kind {
            ClusterKind::Thai => {
                // Stay inside the Thai run so patterns never reach past it
                let mut run_end = text.len();
                for (i, c) in text[start..].char_indices() {
                    if !get_char_category(c).is_thai_letter() {
                        run_end = start + i;
                        break;
                    }
                }
                let run = &text[start..run_end];
                let mut pos = 0;
                while pos < run.len() {
                    let len = thai_cluster_len(&run[pos..]);
                    out.push(Cluster {
                        start: start + pos,
                        len,
                        kind: ClusterKind::Thai,
                    });
                    pos += len;
                }
                while chars.peek().map_or(false, |&(i, _)| i < run_end) {
                    chars.next();
                }
                continue;
            }
            ClusterKind::Number => read_number(text, start),
            _ => {
                let mut end = text.len();
                for (i, c) in text[start..].char_indices() {
                    if run_kind(get_char_category(c)) != kind {
                        end = start + i;
                        break;
                    }
                }
                end
            }
        };

        out.push(Cluster {
            start,
            len: end - start,
            kind,
        });
        while chars.peek().map_or(false, |&(i, _)| i < end) {
            chars.next();
        }
    }

    out
}

/// End offset of the number starting at `start`: digits, then any number of
/// `.`/`,` separators that are directly followed by another digit.
fn read_number(text: &str, start: usize) -> usize {
    let is_digit = |c: char| get_char_category(c).is_digit();
    let mut end = start;
    let mut iter = text[start..].char_indices().peekable();

    while let Some((i, c)) = iter.next() {
        if is_digit(c) {
            end = start + i + c.len_utf8();
            continue;
        }
        if c == '.' || c == ',' {
            if let Some(&(_, next)) = iter.peek() {
                if is_digit(next) {
                    continue;
                }
            }
        }
        break;
    }

    end
}

/// The cluster texts, mainly for inspection and tests
pub fn cluster_strings(text: &str) -> Vec<&str> {
    clusters(text).iter().map(|c| c.as_str(text)).collect()
}
