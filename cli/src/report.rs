//! JSON report printed by `crack --json`.

use serde::Serialize;

use bigcrack_core::search::{Recovery, SearchConfig, SearchReport};
use bigcrack_core::telemetry::SearchSnapshot;

#[derive(Debug, Serialize)]
pub struct RecoveredCode {
    pub worker_id: usize,
    pub candidate: String,
    pub code_hex: String,
    pub code_text: String,
    pub plaintext_hex: String,
    /// Audit trail: the PDU that verified and its payload counter.
    pub payload_count: u64,
    pub pdu_hex: String,
}

impl RecoveredCode {
    pub fn new(r: &Recovery, payload_count: u64) -> Self {
        Self {
            worker_id: r.worker_id,
            candidate: r.candidate_text(),
            code_hex: r.code_hex(),
            code_text: r.code_text(),
            plaintext_hex: r.plaintext_hex(),
            payload_count,
            pdu_hex: r.pdu_hex(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WorkerLine {
    pub worker_id: usize,
    pub start: u64,
    pub end: u64,
    pub state: String,
    pub tried: u64,
    pub skipped: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CrackReport<'a> {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery: Option<RecoveredCode>,
    pub config: &'a SearchConfig,
    pub workers: Vec<WorkerLine>,
    pub telemetry: &'a SearchSnapshot,
}

impl<'a> CrackReport<'a> {
    pub fn new(config: &'a SearchConfig, report: &'a SearchReport) -> Self {
        use bigcrack_core::search::WorkerOutcome;

        let workers = report
            .workers
            .iter()
            .map(|w| WorkerLine {
                worker_id: w.worker_id(),
                start: w.partition.start,
                end: w.partition.end,
                state: w.state().to_string(),
                tried: w.counters.candidates_tried,
                skipped: w.counters.candidates_skipped,
                error: match &w.outcome {
                    WorkerOutcome::Failed(e) => Some(e.to_string()),
                    _ => None,
                },
            })
            .collect();

        Self {
            found: report.outcome.is_found(),
            recovery: report
                .outcome
                .recovery()
                .map(|r| RecoveredCode::new(r, config.payload_count)),
            config,
            workers,
            telemetry: &report.snapshot,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
