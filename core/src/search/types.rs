// ## 📂 File: `src/search/types.rs`

use std::fmt;

use bytes::Bytes;

use crate::constants::BROADCAST_CODE_LEN;
use crate::crypto::BroadcastCode;
use crate::search::partition::Partition;
use crate::telemetry::{SearchCounters, SearchSnapshot};
use crate::types::WorkerError;
use crate::utils::{hex_lower, printable};

/// How a worker ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerState {
    Succeeded,
    Exhausted,
    Aborted,
    Failed,
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WorkerState::Succeeded => "succeeded",
            WorkerState::Exhausted => "exhausted",
            WorkerState::Aborted   => "aborted",
            WorkerState::Failed    => "failed",
        };
        f.write_str(s)
    }
}

/// A verified Broadcast Code and what it unlocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery {
    pub worker_id: usize,
    /// Candidate text exactly as generated or read (terminator stripped).
    pub candidate: Vec<u8>,
    /// Zero-padded code as it sits in memory.
    pub code: BroadcastCode,
    pub plaintext: Bytes,
    /// The PDU that verified.
    pub pdu: Bytes,
}

impl Recovery {
    pub fn code_hex(&self) -> String {
        hex_lower(self.code.as_bytes())
    }

    /// The captured PDU as it was verified, for audit.
    pub fn pdu_hex(&self) -> String {
        hex_lower(&self.pdu)
    }

    pub fn reversed_code(&self) -> [u8; BROADCAST_CODE_LEN] {
        self.code.reversed()
    }

    /// Byte-reversed code rendered as text, zero octets dropped.
    pub fn code_text(&self) -> String {
        printable(&self.reversed_code())
    }

    pub fn candidate_text(&self) -> String {
        printable(&self.candidate)
    }

    pub fn plaintext_hex(&self) -> String {
        hex_lower(&self.plaintext)
    }
}

#[derive(Debug)]
pub enum WorkerOutcome {
    Succeeded(Recovery),
    Exhausted,
    Aborted,
    Failed(WorkerError),
}

impl WorkerOutcome {
    pub fn state(&self) -> WorkerState {
        match self {
            WorkerOutcome::Succeeded(_) => WorkerState::Succeeded,
            WorkerOutcome::Exhausted    => WorkerState::Exhausted,
            WorkerOutcome::Aborted      => WorkerState::Aborted,
            WorkerOutcome::Failed(_)    => WorkerState::Failed,
        }
    }
}

#[derive(Debug)]
pub struct WorkerReport {
    pub partition: Partition,
    pub outcome: WorkerOutcome,
    pub counters: SearchCounters,
}

impl WorkerReport {
    pub fn failed(partition: Partition, err: impl Into<WorkerError>) -> Self {
        Self {
            partition,
            outcome: WorkerOutcome::Failed(err.into()),
            counters: SearchCounters::default(),
        }
    }

    pub fn worker_id(&self) -> usize {
        self.partition.worker_id
    }

    pub fn state(&self) -> WorkerState {
        self.outcome.state()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Recovery),
    NotFound,
}

impl SearchOutcome {
    pub fn recovery(&self) -> Option<&Recovery> {
        match self {
            SearchOutcome::Found(r) => Some(r),
            SearchOutcome::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }
}

/// Everything a finished run hands back.
#[derive(Debug)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    /// Sorted by worker id.
    pub workers: Vec<WorkerReport>,
    pub counters: SearchCounters,
    pub snapshot: SearchSnapshot,
}

impl SearchReport {
    pub fn count_in(&self, state: WorkerState) -> usize {
        self.workers.iter().filter(|w| w.state() == state).count()
    }
}

/// Worker -> orchestrator notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    Started { worker_id: usize, partition: Partition },
    Progress { worker_id: usize, done: u64, span: u64, tried: u64 },
    Finished { worker_id: usize, state: WorkerState },
}

impl SearchEvent {
    pub fn worker_id(&self) -> usize {
        match self {
            SearchEvent::Started { worker_id, .. }
            | SearchEvent::Progress { worker_id, .. }
            | SearchEvent::Finished { worker_id, .. } => *worker_id,
        }
    }

    /// Share of the partition consumed, for `Progress` events.
    pub fn percent(&self) -> Option<f64> {
        match self {
            SearchEvent::Progress { done, span, .. } if *span > 0 => {
                Some(*done as f64 * 100.0 / *span as f64)
            }
            _ => None,
        }
    }
}

/// Receives every event on the orchestrator thread, in arrival order.
pub trait ProgressObserver {
    fn on_event(&self, event: &SearchEvent);
}

impl<F: Fn(&SearchEvent)> ProgressObserver for F {
    fn on_event(&self, event: &SearchEvent) {
        self(event)
    }
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_event(&self, _event: &SearchEvent) {}
}
