//! telemetry/mod.rs
//! Search telemetry: per-worker counters, stage timers, immutable snapshot.
//!
//! Notes:
//! - Workers keep private counters and return them in their report, so the
//!   hot loop never touches shared memory for bookkeeping.
//! - The snapshot serializes with serde for the CLI's JSON report.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
