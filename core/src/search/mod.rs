//! search/mod.rs
//! Parallel Broadcast Code search.
//!
//! Flow:
//! - `SearchEngine::new` validates the config, decodes the BIGInfo, checks
//!   the PDU layout and computes IV + nonce once (`SearchContext`).
//! - `run` splits the candidate space (`partition_space`), starts one
//!   `SearchWorker` per partition inside a thread scope and drains their
//!   `SearchEvent`s until the last worker exits.
//! - The first worker to verify a candidate claims the `SuccessFlag`;
//!   the rest see it at their next check and stop.

pub mod candidate;
pub mod config;
pub mod context;
pub mod engine;
pub mod flag;
pub mod partition;
pub mod types;
pub mod worker;

pub use candidate::{format_numeric, CandidateSource, Next, NumericSource, WordlistSource};
pub use config::{ConfigError, SearchConfig, SearchMode, MAX_BIS_INDEX};
pub use context::SearchContext;
pub use engine::SearchEngine;
pub use flag::{StopSignal, SuccessFlag};
pub use partition::{partition_space, Partition};
pub use types::*;
pub use worker::SearchWorker;
