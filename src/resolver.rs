//! Shortest-path resolution of a boundary graph.
//!
//! Costs are compared lexicographically: first the number of clusters left to
//! unknown fallback edges, then the number of tokens. Costs are accumulated from
//! the end of the segment, so when the path is read back from the start every
//! node can take the longest edge that is still optimal.

use std::ops::Add;

use crate::error::{Error, Result};
use crate::graph::{BoundaryGraph, Edge};
use crate::token::TokenKind;

/// Cost of a (partial) path
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct PathCost {
    /// Clusters covered by `Unknown` edges
    pub unknown: usize,
    /// Tokens on the path
    pub tokens: usize,
}

impl PathCost {
    fn of(edge: &Edge) -> Self {
        PathCost {
            unknown: usize::from(edge.kind == TokenKind::Unknown),
            tokens: 1,
        }
    }
}

impl Add for PathCost {
    type Output = PathCost;

    fn add(self, rhs: PathCost) -> PathCost {
        PathCost {
            unknown: self.unknown + rhs.unknown,
            tokens: self.tokens + rhs.tokens,
        }
    }
}

/// One step of a resolved path, in cluster indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub kind: TokenKind,
}

/// Find the optimal path from node `start` to node `end`.
///
/// Edges leaving the segment are ignored.
pub fn resolve(graph: &BoundaryGraph, start: usize, end: usize) -> Result<Vec<Span>> {
    if start >= end {
        return Ok(Vec::new());
    }

    let len = end - start;
    let mut best: Vec<Option<PathCost>> = vec![None; len + 1];
    best[len] = Some(PathCost::default());

    for i in (start..end).rev() {
        let mut best_here: Option<PathCost> = None;
        for edge in graph.edges(i).iter().filter(|e| e.end <= end) {
            if let Some(rest) = best[edge.end - start] {
                let cost = PathCost::of(edge) + rest;
                if best_here.map_or(true, |current| cost < current) {
                    best_here = Some(cost);
                }
            }
        }
        best[i - start] = best_here;
    }

    let mut path = Vec::new();
    let mut i = start;
    while i < end {
        let target = best[i - start].ok_or(Error::Unreachable { node: i })?;
        let step = graph
            .edges(i)
            .iter()
            .rev()
            .filter(|e| e.end <= end)
            .find(|e| best[e.end - start].map(|rest| PathCost::of(e) + rest) == Some(target))
            .ok_or(Error::Unreachable { node: i })?;

        path.push(Span {
            start: i,
            end: step.end,
            kind: step.kind,
        });
        i = step.end;
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;
    use crate::tcc::clusters;

    fn segment(words: &[&str], text: &str) -> Vec<String> {
        let dict = Dictionary::from_words(words);
        let cs = clusters(text);
        let graph = BoundaryGraph::build(text, &cs, &dict);
        resolve(&graph, 0, cs.len())
            .unwrap()
            .iter()
            .map(|s| text[cs[s.start].start..cs[s.end - 1].end()].to_string())
            .collect()
    }

    #[test]
    fn test_prefers_dictionary_words() {
        let words = ["ค่า", "จ้าง", "ค่าจ้าง", "แรง", "งาน", "แรงงาน"];
        assert_eq!(segment(&words, "ค่าจ้างแรงงาน"), vec!["ค่าจ้าง", "แรงงาน"]);
    }

    #[test]
    fn test_leftmost_longest_tie_break() {
        // ด้านหน้า|ที่ and ด้าน|หน้าที่ both have two known tokens
        let words = ["ด้าน", "หน้า", "ด้านหน้า", "หน้าที่", "ที่"];
        assert_eq!(segment(&words, "ด้านหน้าที่"), vec!["ด้านหน้า", "ที่"]);
    }

    #[test]
    fn test_unknown_clusters_are_minimized() {
        // ครับ is unknown: ค stays alone so that รับ is still a word
        let words = ["สวัสดี", "รับ"];
        assert_eq!(segment(&words, "สวัสดีครับ"), vec!["สวัสดี", "ค", "รับ"]);
    }

    #[test]
    fn test_fewer_tokens_win() {
        let words = ["ยาว", "ยาวยาว"];
        assert_eq!(segment(&words, "ยาวยาวยาว"), vec!["ยาวยาว", "ยาว"]);
    }

    #[test]
    fn test_sub_segment_ignores_outgoing_edges() {
        let dict = Dictionary::from_words(["แรงงาน"]);
        let text = "แรงงาน";
        let cs = clusters(text);
        let graph = BoundaryGraph::build(text, &cs, &dict);

        let path = resolve(&graph, 0, 2).unwrap();
        assert_eq!(path.len(), 2);
        assert!(path.iter().all(|s| s.kind == TokenKind::Unknown));
        let whole = resolve(&graph, 0, 4).unwrap();
        assert_eq!(whole, vec![Span { start: 0, end: 4, kind: TokenKind::Word }]);
    }

    #[test]
    fn test_empty_segment() {
        let graph = BoundaryGraph::default();
        assert!(resolve(&graph, 0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_cost_ordering() {
        let a = PathCost { unknown: 0, tokens: 9 };
        let b = PathCost { unknown: 1, tokens: 1 };
        assert!(a < b);
    }
}
