// ## 📂 File: `src/search/worker.rs`

//! One search worker: walks its partition, derives a GSK per candidate and
//! tries to open the PDU with it.
//!
//! Notes:
//! - Scratch buffers (candidate, code, plaintext) live for the whole
//!   partition; nothing in the loop allocates.
//! - The stop signal and the progress event share one cadence, every
//!   `check_interval` consumed units, starting before the first candidate.
//! - A wrong candidate is `TagMismatch`, which only moves the loop on.

use std::sync::Arc;

use bytes::Bytes;
use crossbeam::channel::Sender;
use tracing::{debug, error, warn};

use crate::constants::BROADCAST_CODE_LEN;
use crate::crypto::{derive_gsk, BroadcastCode};
use crate::search::candidate::{CandidateSource, Next, NumericSource, WordlistSource};
use crate::search::config::SearchMode;
use crate::search::context::SearchContext;
use crate::search::flag::StopSignal;
use crate::search::partition::Partition;
use crate::search::types::{Recovery, SearchEvent, WorkerOutcome, WorkerReport};
use crate::telemetry::SearchCounters;
use crate::types::WorkerError;

pub struct SearchWorker {
    partition: Partition,
    shared: Arc<SearchContext>,
    signal: StopSignal,
    events: Sender<SearchEvent>,
}

impl SearchWorker {
    pub fn new(
        partition: Partition,
        shared: Arc<SearchContext>,
        signal: StopSignal,
        events: Sender<SearchEvent>,
    ) -> Self {
        Self { partition, shared, signal, events }
    }

    pub fn id(&self) -> usize {
        self.partition.worker_id
    }

    /// Run to a terminal state. Consumes the worker so its event sender is
    /// dropped when the thread ends.
    pub fn run(self) -> WorkerReport {
        let report = match &self.shared.mode {
            SearchMode::Numeric { code_len } => {
                let source = NumericSource::new(&self.partition, *code_len);
                self.search(source)
            }
            SearchMode::Wordlist { path } => match WordlistSource::open(path, &self.partition) {
                Ok(source) => self.search(source),
                Err(e) => {
                    warn!(worker_id = self.id(), error = %e, "wordlist unavailable");
                    WorkerReport::failed(self.partition, e)
                }
            },
        };

        self.emit(SearchEvent::Finished { worker_id: self.id(), state: report.state() });
        report
    }

    fn search<S: CandidateSource>(&self, mut source: S) -> WorkerReport {
        let id = self.id();
        let interval = self.shared.check_interval;
        let pdu = &self.shared.pdu;

        self.emit(SearchEvent::Started { worker_id: id, partition: self.partition });
        debug!(worker_id = id, start = self.partition.start, end = self.partition.end, "worker running");

        let mut counters = SearchCounters::default();
        let mut candidate = Vec::with_capacity(BROADCAST_CODE_LEN + 2);
        let mut code = BroadcastCode::default();
        let mut plaintext = Vec::with_capacity(pdu.plaintext_len());

        let outcome = loop {
            if counters.consumed() % interval == 0 {
                counters.add_checkpoint();
                if counters.consumed() > 0 {
                    counters.add_progress();
                    self.emit(SearchEvent::Progress {
                        worker_id: id,
                        done: source.progress(),
                        span: self.partition.span(),
                        tried: counters.candidates_tried,
                    });
                }
                if self.signal.should_stop() {
                    break WorkerOutcome::Aborted;
                }
            }

            match source.next_into(&mut candidate) {
                Ok(Next::Candidate) => {}
                Ok(Next::Skip) => {
                    counters.add_skipped();
                    continue;
                }
                Ok(Next::Done) => break WorkerOutcome::Exhausted,
                Err(e) => {
                    warn!(worker_id = id, error = %e, "candidate source failed");
                    break WorkerOutcome::Failed(e.into());
                }
            }

            if code.load(&candidate).is_err() {
                counters.add_skipped();
                continue;
            }

            let gsk = match derive_gsk(&code, &self.shared.gskd) {
                Ok(gsk) => gsk,
                Err(e) => {
                    error!(worker_id = id, error = %e, "key derivation failed, aborting search");
                    self.signal.abort();
                    break WorkerOutcome::Failed(WorkerError::Kdf(e));
                }
            };
            counters.add_tried();

            if pdu.open_into(&gsk, &self.shared.nonce, &mut plaintext).is_ok() {
                if self.signal.found().try_claim() {
                    debug!(worker_id = id, tried = counters.candidates_tried, "candidate verified");
                    break WorkerOutcome::Succeeded(Recovery {
                        worker_id: id,
                        candidate: candidate.clone(),
                        code,
                        plaintext: Bytes::copy_from_slice(&plaintext),
                        pdu: pdu.bytes(),
                    });
                }
                // Someone else won the race.
                break WorkerOutcome::Aborted;
            }
        };

        counters.add_bytes(source.bytes_read());
        WorkerReport { partition: self.partition, outcome, counters }
    }

    fn emit(&self, event: SearchEvent) {
        // The orchestrator drains until every sender is gone; a send error
        // only means nobody listens any more.
        let _ = self.events.send(event);
    }
}

