use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::crypto::KdfError;
use crate::search::config::ConfigError;

/// Worker-level resource failure: file, thread, or buffer.
///
/// Fatal to the worker that hit it, never to its siblings.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("cannot open {path}: {source}")]
    Open { path: PathBuf, #[source] source: io::Error },

    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, #[source] source: io::Error },

    #[error("cannot seek {path} to offset {offset}: {source}")]
    Seek { path: PathBuf, offset: u64, #[source] source: io::Error },

    #[error("cannot spawn worker {worker_id}: {source}")]
    Spawn { worker_id: usize, #[source] source: io::Error },

    #[error("worker {worker_id} panicked")]
    Panicked { worker_id: usize },
}

/// Worker failure carried in a `WorkerOutcome::Failed`.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// The derivation primitive itself broke. Aborts the whole run.
    #[error("key derivation failed: {0}")]
    Kdf(#[from] KdfError),
}

/// Unified search error covering configuration, key derivation and resources.
/// - `From<T>` impls let `?` cross the layers.
/// - A wrong candidate is never an error; see `SearchOutcome::NotFound`.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("key derivation aborted the search: {0}")]
    Kdf(#[from] KdfError),

    #[error("resource error: {0}")]
    Resource(#[from] ResourceError),

    /// Every worker failed before it could search.
    #[error("no worker made progress ({failed} failed)")]
    NoProgress { failed: usize },
}
