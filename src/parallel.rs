//! Parallel segmentation over independent chunks.
//!
//! The cluster sequence is cut only at nodes that no boundary-graph edge
//! crosses. Resolving the pieces separately then gives exactly the tokens of a
//! sequential run, with or without safe mode.

use std::ops::Range;

use once_cell::sync::OnceCell;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::graph::reach_from;
use crate::safe_mode::SafeModeConfig;
use crate::tcc::Cluster;
use crate::token::Token;
use crate::tokenizer::tokenize_clusters;

static POOL: OnceCell<ThreadPool> = OnceCell::new();

/// Settings for parallel segmentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Minimum number of clusters per chunk
    pub chunk_clusters: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        ParallelConfig {
            chunk_clusters: 512,
        }
    }
}

/// The shared worker pool, started on first use
fn worker_pool() -> Result<&'static ThreadPool> {
    POOL.get_or_try_init(|| -> Result<ThreadPool> {
        let threads = num_cpus::get();
        log::debug!("starting segmentation pool with {threads} threads");
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("thongna-worker-{i}"))
            .build()?;
        Ok(pool)
    })
}

/// Split `clusters` into ranges of at least `chunk_clusters` clusters (except
/// the last) whose boundaries no dictionary word crosses.
pub fn partition(
    text: &str,
    clusters: &[Cluster],
    dict: &Dictionary,
    chunk_clusters: usize,
) -> Vec<Range<usize>> {
    let n = clusters.len();
    let target = chunk_clusters.max(1);
    // A word spans at most this many clusters, so earlier nodes cannot reach a candidate cut
    let window = dict.max_word_len().max(1);

    let mut ranges = Vec::new();
    let mut start = 0;
    let mut max_reach = 0;

    for i in 0..n {
        if i - start >= target && max_reach <= i {
            ranges.push(start..i);
            start = i;
        }
        if i + window >= start + target {
            max_reach = max_reach.max(reach_from(text, clusters, i, dict));
        }
    }
    if start < n {
        ranges.push(start..n);
    }

    ranges
}

/// Segment the clusters of `text` on the worker pool
pub fn tokenize_parallel(
    text: &str,
    clusters: &[Cluster],
    dict: &Dictionary,
    safe: Option<&SafeModeConfig>,
    config: &ParallelConfig,
) -> Result<Vec<Token>> {
    let chunks = partition(text, clusters, dict, config.chunk_clusters);
    log::debug!(
        "parallel segmentation: {} clusters in {} chunks",
        clusters.len(),
        chunks.len()
    );
    if chunks.len() <= 1 {
        return tokenize_clusters(text, clusters, dict, safe);
    }

    let pool = worker_pool()?;
    let results: Vec<Vec<Token>> = pool.install(|| {
        chunks
            .into_par_iter()
            .map(|range| tokenize_clusters(text, &clusters[range], dict, safe))
            .collect::<Result<Vec<_>>>()
    })?;

    Ok(results.into_iter().flatten().collect())
}
