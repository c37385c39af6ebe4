// ### `src/telemetry/counters.rs`

//! telemetry/counters.rs
//! Per-worker counters collected during a search.
//!
//! Summary: each worker owns one `SearchCounters` and hands it back in its
//! report; the orchestrator merges them after the join. No atomics, no
//! sharing in the hot loop.
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCounters {
    /// Candidates pushed through derive + decrypt.
    pub candidates_tried: u64,
    /// Wordlist lines that cannot be Broadcast Codes (empty or > 16 bytes).
    pub candidates_skipped: u64,
    /// Dictionary bytes consumed (wordlist mode).
    pub bytes_read: u64,
    /// Times the worker looked at the success flag.
    pub flag_checks: u64,
    /// Progress events emitted.
    pub progress_events: u64,
}

impl SearchCounters {
    #[inline]
    pub fn add_tried(&mut self) {
        self.candidates_tried += 1;
    }

    #[inline]
    pub fn add_skipped(&mut self) {
        self.candidates_skipped += 1;
    }

    #[inline]
    pub fn add_bytes(&mut self, n: u64) {
        self.bytes_read += n;
    }

    pub fn add_checkpoint(&mut self) {
        self.flag_checks += 1;
    }

    pub fn add_progress(&mut self) {
        self.progress_events += 1;
    }

    /// Lines or indices consumed, whether tried or skipped.
    pub fn consumed(&self) -> u64 {
        self.candidates_tried + self.candidates_skipped
    }

    pub fn merge(&mut self, other: &SearchCounters) {
        self.candidates_tried += other.candidates_tried;
        self.candidates_skipped += other.candidates_skipped;
        self.bytes_read += other.bytes_read;
        self.flag_checks += other.flag_checks;
        self.progress_events += other.progress_events;
    }
}

impl AddAssign for SearchCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
