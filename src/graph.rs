//! Boundary graph over cluster positions.
//!
//! Node `i` is the boundary before cluster `i`; an edge `i -> j` says that
//! clusters `i..j` can form one token. Every node has a one-cluster fallback
//! edge, so a path from the first to the last node always exists.

use crate::dictionary::Dictionary;
use crate::tcc::{Cluster, ClusterKind};
use crate::token::TokenKind;
use crate::trie::TrieNode;

/// An outgoing edge of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Node the edge leads to (exclusive cluster index)
    pub end: usize,
    /// Kind of the token this edge produces
    pub kind: TokenKind,
}

/// Append the outgoing edges of node `i` to `out`, sorted by `end`.
///
/// Only clusters inside `clusters` are considered, so callers working on a
/// window get edges truncated at the window end.
pub(crate) fn push_edges(
    text: &str,
    clusters: &[Cluster],
    i: usize,
    dict: &Dictionary,
    out: &mut Vec<Edge>,
) {
    let first = clusters[i];
    if first.kind != ClusterKind::Thai {
        out.push(Edge {
            end: i + 1,
            kind: TokenKind::for_cluster(first.kind),
        });
        return;
    }

    let fallback = out.len();
    out.push(Edge {
        end: i + 1,
        kind: TokenKind::Unknown,
    });

    let trie = dict.trie();
    let mut node: &TrieNode = trie.root();
    for (j, cluster) in clusters.iter().enumerate().skip(i) {
        if cluster.kind == ClusterKind::Whitespace {
            break;
        }
        match trie.walk_str(cluster.as_str(text), Some(node)) {
            Some(next) => node = next,
            None => break,
        }
        if node.is_match() {
            if j == i {
                out[fallback].kind = TokenKind::Word;
            } else {
                out.push(Edge {
                    end: j + 1,
                    kind: TokenKind::Word,
                });
            }
        }
        if !node.can_walk() {
            break;
        }
    }
}

/// Farthest node reachable from `i` with a single edge
pub(crate) fn reach_from(text: &str, clusters: &[Cluster], i: usize, dict: &Dictionary) -> usize {
    let mut scratch = Vec::new();
    push_edges(text, clusters, i, dict, &mut scratch);
    scratch.last().map_or(i + 1, |e| e.end)
}

/// Directed acyclic graph of candidate token spans
#[derive(Debug, Clone, Default)]
pub struct BoundaryGraph {
    /// `edges[offsets[i]..offsets[i + 1]]` are the edges out of node `i`
    offsets: Vec<usize>,
    edges: Vec<Edge>,
}

impl BoundaryGraph {
    /// Build the graph for a run of clusters of `text`
    pub fn build(text: &str, clusters: &[Cluster], dict: &Dictionary) -> Self {
        let mut offsets = Vec::with_capacity(clusters.len() + 1);
        let mut edges = Vec::with_capacity(clusters.len() * 2);

        for i in 0..clusters.len() {
            offsets.push(edges.len());
            push_edges(text, clusters, i, dict, &mut edges);
        }
        offsets.push(edges.len());

        BoundaryGraph { offsets, edges }
    }

    /// Number of clusters covered
    pub fn cluster_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Number of nodes (clusters + 1)
    pub fn node_count(&self) -> usize {
        self.offsets.len()
    }

    /// Total number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Outgoing edges of node `i`, shortest first. The last node has none.
    pub fn edges(&self, i: usize) -> &[Edge] {
        if i + 1 >= self.offsets.len() {
            return &[];
        }
        &self.edges[self.offsets[i]..self.offsets[i + 1]]
    }

    /// Number of outgoing edges of node `i`
    pub fn out_degree(&self, i: usize) -> usize {
        self.edges(i).len()
    }

    /// Farthest node reachable from `i` with a single edge
    pub fn reach(&self, i: usize) -> usize {
        self.edges(i).last().map_or(i, |e| e.end)
    }

    /// Number of edges out of nodes in `start..end` that stay within `end`
    pub fn edges_within(&self, start: usize, end: usize) -> usize {
        (start..end)
            .map(|i| self.edges(i).iter().filter(|e| e.end <= end).count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tcc::clusters;

    fn ends(graph: &BoundaryGraph, i: usize) -> Vec<usize> {
        graph.edges(i).iter().map(|e| e.end).collect()
    }

    #[test]
    fn test_dictionary_edges() {
        let dict = Dictionary::from_words(["ค่า", "จ้าง", "ค่าจ้าง"]);
        let text = "ค่าจ้าง";
        let cs = clusters(text); // ค่า | จ้า | ง
        let graph = BoundaryGraph::build(text, &cs, &dict);

        assert_eq!(graph.cluster_count(), 3);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(ends(&graph, 0), vec![1, 3]);
        assert_eq!(graph.edges(0)[0].kind, TokenKind::Word);
        assert_eq!(ends(&graph, 1), vec![2, 3]);
        assert_eq!(graph.edges(1)[0].kind, TokenKind::Unknown);
        assert_eq!(graph.edges(1)[1].kind, TokenKind::Word);
        assert_eq!(ends(&graph, 2), vec![3]);
        assert_eq!(graph.reach(0), 3);
        assert!(graph.edges(3).is_empty());
    }

    #[test]
    fn test_no_edge_crosses_whitespace() {
        let dict = Dictionary::from_words(["ไข่ คน", "ไข่"]);
        let text = "ไข่ คน";
        let cs = clusters(text);
        let graph = BoundaryGraph::build(text, &cs, &dict);

        assert_eq!(ends(&graph, 0), vec![1]);
        assert_eq!(graph.edges(1)[0].kind, TokenKind::Space);
        assert_eq!(graph.edge_count(), cs.len());
    }

    #[test]
    fn test_non_thai_single_edge() {
        let dict = Dictionary::from_words(["pizza"]);
        let text = "pizza 2021";
        let cs = clusters(text);
        let graph = BoundaryGraph::build(text, &cs, &dict);

        assert_eq!(graph.edges(0), &[Edge { end: 1, kind: TokenKind::Latin }]);
        assert_eq!(graph.edges(2), &[Edge { end: 3, kind: TokenKind::Number }]);
    }

    #[test]
    fn test_window_truncates_edges() {
        let dict = Dictionary::from_words(["แรงงาน"]);
        let text = "แรงงาน";
        let cs = clusters(text); // แร | ง | งา | น
        assert_eq!(reach_from(text, &cs, 0, &dict), 4);
        assert_eq!(reach_from(text, &cs[..3], 0, &dict), 1);

        let graph = BoundaryGraph::build(text, &cs, &dict);
        assert_eq!(graph.edges_within(0, 4), 5);
        assert_eq!(graph.edges_within(0, 2), 2);
    }
}
