//! Safe mode: bounding the work spent on highly ambiguous text.
//!
//! The graph is split into segments that are resolved independently. A
//! segment ends for free at every node that no edge crosses. When a run of
//! ambiguous text grows past the configured limits, a cut is forced at the
//! recent node crossed by the fewest edges; tokens spanning a forced cut are
//! lost, which is the price of the bound.

use serde::{Deserialize, Serialize};

use crate::graph::BoundaryGraph;

/// Limits applied in safe mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafeModeConfig {
    /// Edges a segment may accumulate before a cut is forced
    pub max_segment_edges: usize,
    /// Clusters a segment may span before a cut is forced
    pub max_segment_clusters: usize,
    /// How many trailing nodes are considered for a forced cut
    pub cut_lookback: usize,
}

impl Default for SafeModeConfig {
    fn default() -> Self {
        SafeModeConfig {
            max_segment_edges: 120,
            max_segment_clusters: 60,
            cut_lookback: 12,
        }
    }
}

/// Segment boundaries chosen for a graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentPlan {
    /// Node indices, starting with 0 and ending with the last node
    pub cuts: Vec<usize>,
    /// How many of the cuts were forced
    pub forced: usize,
}

impl SegmentPlan {
    /// The plan for a graph resolved in one piece
    pub fn whole(graph: &BoundaryGraph) -> Self {
        let n = graph.cluster_count();
        let cuts = if n == 0 { vec![0] } else { vec![0, n] };
        SegmentPlan { cuts, forced: 0 }
    }

    /// Consecutive `(start, end)` node pairs
    pub fn segments(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cuts.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Number of edges out of `start..cut` that end beyond `cut`
fn crossing(graph: &BoundaryGraph, start: usize, cut: usize) -> usize {
    (start..cut)
        .map(|i| graph.edges(i).iter().filter(|e| e.end > cut).count())
        .sum()
}

/// Split `graph` into segments that respect the limits in `config`.
///
/// The result depends only on the graph: planning a piece that starts and ends
/// at uncrossed nodes gives the same cuts as planning the whole graph.
pub fn plan(graph: &BoundaryGraph, config: &SafeModeConfig) -> SegmentPlan {
    let n = graph.cluster_count();
    let max_edges = config.max_segment_edges.max(1);
    let max_clusters = config.max_segment_clusters.max(1);
    let lookback = config.cut_lookback.max(1);

    let mut cuts = vec![0];
    let mut forced = 0;
    let mut seg_start = 0;
    let mut seg_edges = 0;
    let mut max_reach = 0;
    let mut i = 0;

    while i < n {
        if i > seg_start && max_reach <= i {
            cuts.push(i);
            seg_start = i;
            seg_edges = 0;
        }

        seg_edges += graph.out_degree(i);
        max_reach = max_reach.max(graph.reach(i));

        if seg_edges > max_edges || i + 1 - seg_start >= max_clusters {
            let hi = i + 1;
            if hi >= n || max_reach <= hi {
                // The next node is a free boundary anyway
                i += 1;
                continue;
            }

            let lo = (seg_start + 1).max(hi.saturating_sub(lookback));
            let mut cut = hi;
            let mut fewest = usize::MAX;
            for candidate in lo..=hi {
                let count = crossing(graph, seg_start, candidate);
                if count <= fewest {
                    fewest = count;
                    cut = candidate;
                }
            }

            cuts.push(cut);
            forced += 1;
            seg_start = cut;
            seg_edges = 0;
            max_reach = 0;
            i = cut;
            continue;
        }

        i += 1;
    }

    if n > 0 {
        cuts.push(n);
    }

    log::debug!(
        "safe mode: {} clusters in {} segments ({} forced cuts)",
        n,
        cuts.len().saturating_sub(1),
        forced
    );

    SegmentPlan { cuts, forced }
}
