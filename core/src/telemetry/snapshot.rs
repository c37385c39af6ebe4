// ## src/telemetry/snapshot.rs

use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::telemetry::counters::SearchCounters;
use crate::telemetry::timers::{Stage, StageTimes, TelemetryTimer};

/// Immutable summary of one search run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSnapshot {
    pub workers: usize,
    pub candidates_tried: u64,
    pub candidates_skipped: u64,
    pub bytes_read: u64,
    pub flag_checks: u64,
    pub candidates_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl SearchSnapshot {
    pub fn from(counters: &SearchCounters, timer: &TelemetryTimer, workers: usize) -> Self {
        let elapsed = timer.elapsed();

        // Rate over the search stage only; setup is not candidate work.
        let search = timer.stage_times.get(Stage::Search);
        let window = if search > Duration::ZERO { search } else { elapsed };
        let rate = if window.as_secs_f64() > 0.0 {
            counters.candidates_tried as f64 / window.as_secs_f64()
        } else {
            0.0
        };

        Self {
            workers,
            candidates_tried: counters.candidates_tried,
            candidates_skipped: counters.candidates_skipped,
            bytes_read: counters.bytes_read,
            flag_checks: counters.flag_checks,
            candidates_per_sec: rate,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    /// Stage times must fit inside the wall clock.
    pub fn sanity_check(&self) -> bool {
        self.total_stage_time() <= self.elapsed && self.candidates_per_sec >= 0.0
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
