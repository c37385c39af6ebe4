// ## 📂 File: `src/search/engine.rs`
// ## Orchestration: partition, spawn, drain events, join, fold

use std::sync::Arc;
use std::thread;

use bytes::Bytes;
use crossbeam::channel::bounded;
use tracing::{debug, info, warn};

use crate::constants::EVENTS_PER_WORKER;
use crate::search::config::{ConfigError, SearchConfig, SearchMode};
use crate::search::context::SearchContext;
use crate::search::flag::{StopSignal, SuccessFlag};
use crate::search::partition::{partition_space, Partition};
use crate::search::types::{
    ProgressObserver, SearchEvent, SearchOutcome, SearchReport, WorkerOutcome, WorkerReport,
};
use crate::search::worker::SearchWorker;
use crate::telemetry::{SearchCounters, SearchSnapshot, Stage, TelemetryTimer};
use crate::types::{ResourceError, SearchError, WorkerError};

pub struct SearchEngine {
    config: SearchConfig,
    shared: Arc<SearchContext>,
    flag: SuccessFlag,
    setup: std::time::Duration,
}

impl SearchEngine {
    /// Validate inputs and prepare the shared session material.
    ///
    /// Every input problem surfaces here, before a thread exists.
    pub fn new(
        config: SearchConfig,
        pdu: impl Into<Bytes>,
        big_info: &[u8],
    ) -> Result<Self, SearchError> {
        let t = std::time::Instant::now();
        let shared = SearchContext::build(&config, pdu, big_info)?;
        Ok(Self {
            config,
            shared: Arc::new(shared),
            flag: SuccessFlag::new(),
            setup: t.elapsed(),
        })
    }

    /// Use an externally owned success flag (tests pre-set it).
    pub fn with_success_flag(mut self, flag: SuccessFlag) -> Self {
        self.flag = flag;
        self
    }

    pub fn success_flag(&self) -> SuccessFlag {
        self.flag.clone()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn context(&self) -> &SearchContext {
        &self.shared
    }

    /// Size of the candidate space: indices (numeric) or bytes (wordlist).
    pub fn space_size(&self) -> Result<u64, SearchError> {
        match &self.config.mode {
            SearchMode::Numeric { code_len } => Ok(1u64 << (8 * u32::from(*code_len))),
            SearchMode::Wordlist { path } => std::fs::metadata(path)
                .map(|m| m.len())
                .map_err(|e| {
                    SearchError::Config(ConfigError::Wordlist {
                        path: path.clone(),
                        reason: e.to_string(),
                    })
                }),
        }
    }

    pub fn partitions(&self) -> Result<Vec<Partition>, SearchError> {
        Ok(partition_space(self.space_size()?, self.config.num_threads))
    }

    /// Run the search to completion.
    ///
    /// Returns `Found` as soon as one worker verifies a candidate and every
    /// other worker has stopped; `NotFound` once all partitions are
    /// exhausted. Errors only for a broken KDF or when no worker ran.
    pub fn run(&self, observer: &dyn ProgressObserver) -> Result<SearchReport, SearchError> {
        let mut timer = TelemetryTimer::resumed(Stage::Setup, self.setup);

        let partitions = timer.time(Stage::Partition, || self.partitions())?;
        info!(
            mode = self.config.mode.name(),
            workers = partitions.len(),
            check_interval = self.config.check_interval,
            "search starting"
        );

        let signal = StopSignal::new(self.flag.clone());
        let capacity = EVENTS_PER_WORKER * partitions.len().max(1);
        let (tx, rx) = bounded::<SearchEvent>(capacity);

        let search_start = std::time::Instant::now();
        let mut reports = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(partitions.len());
            let mut reports = Vec::with_capacity(partitions.len());

            for p in &partitions {
                let worker =
                    SearchWorker::new(*p, Arc::clone(&self.shared), signal.clone(), tx.clone());
                let spawned = thread::Builder::new()
                    .name(format!("bigcrack-w{}", p.worker_id))
                    .spawn_scoped(scope, move || worker.run());
                match spawned {
                    Ok(h) => handles.push((*p, h)),
                    Err(source) => {
                        warn!(worker_id = p.worker_id, error = %source, "spawn failed");
                        reports.push(WorkerReport::failed(
                            *p,
                            ResourceError::Spawn { worker_id: p.worker_id, source },
                        ));
                    }
                }
            }

            // Only workers hold senders now; the loop ends when the last one exits.
            drop(tx);
            for event in rx.iter() {
                log_event(&event);
                observer.on_event(&event);
            }

            for (p, h) in handles {
                match h.join() {
                    Ok(report) => reports.push(report),
                    Err(_) => reports.push(WorkerReport::failed(
                        p,
                        ResourceError::Panicked { worker_id: p.worker_id },
                    )),
                }
            }
            reports
        });
        timer.add_stage_time(Stage::Search, search_start.elapsed());
        if signal.is_aborted() {
            warn!("search aborted after a key derivation failure");
        }

        let report = timer.time(Stage::Join, || {
            reports.sort_by_key(|r| r.worker_id());
            fold_reports(reports)
        });
        timer.finish();

        let (outcome, workers, counters) = report?;
        let snapshot = SearchSnapshot::from(&counters, &timer, workers.len());
        info!(
            found = outcome.is_found(),
            tried = counters.candidates_tried,
            skipped = counters.candidates_skipped,
            rate = snapshot.candidates_per_sec,
            elapsed_ms = snapshot.elapsed.as_millis() as u64,
            "search finished"
        );

        Ok(SearchReport { outcome, workers, counters, snapshot })
    }
}

type Folded = (SearchOutcome, Vec<WorkerReport>, SearchCounters);

/// Merge worker reports into one outcome.
fn fold_reports(reports: Vec<WorkerReport>) -> Result<Folded, SearchError> {
    let mut counters = SearchCounters::default();
    for r in &reports {
        counters.merge(&r.counters);
    }

    let winner = reports.iter().find_map(|r| match &r.outcome {
        WorkerOutcome::Succeeded(rec) => Some(rec.clone()),
        _ => None,
    });
    if let Some(rec) = winner {
        return Ok((SearchOutcome::Found(rec), reports, counters));
    }

    if let Some(e) = reports.iter().find_map(|r| match &r.outcome {
        WorkerOutcome::Failed(WorkerError::Kdf(e)) => Some(e.clone()),
        _ => None,
    }) {
        return Err(SearchError::Kdf(e));
    }

    let failed = reports
        .iter()
        .filter(|r| matches!(r.outcome, WorkerOutcome::Failed(_)))
        .count();
    if !reports.is_empty() && failed == reports.len() {
        return Err(SearchError::NoProgress { failed });
    }

    Ok((SearchOutcome::NotFound, reports, counters))
}

fn log_event(event: &SearchEvent) {
    match event {
        SearchEvent::Started { worker_id, partition } => {
            debug!(worker_id, start = partition.start, end = partition.end, "worker started");
        }
        SearchEvent::Progress { worker_id, done, span, tried } => {
            debug!(worker_id, done, span, tried, "worker progress");
        }
        SearchEvent::Finished { worker_id, state } => {
            debug!(worker_id, state = %state, "worker finished");
        }
    }
}
