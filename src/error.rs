//! Error type shared by every stage of the segmenter.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading dictionaries or segmenting text
#[derive(Debug, Error)]
pub enum Error {
    /// The dictionary file could not be read
    #[error("cannot read dictionary file {}: {source}", path.display())]
    DictionaryIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A dictionary with this name is already registered
    #[error("dictionary name {0} already exists, please use another name")]
    DictionaryExists(String),

    /// No dictionary is registered under this name
    #[error("Dictionary name {0} does not exist.")]
    DictionaryNotFound(String),

    /// The worker pool for parallel segmentation could not be started
    #[error("cannot start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// A node of the boundary graph has no path to the end.
    /// Edge generation always adds a one-cluster fallback, so this is a bug.
    #[error("boundary graph node {node} cannot reach the end of the segment")]
    Unreachable { node: usize },

    /// A tuning file is not valid JSON for `NewmmConfig`
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;
