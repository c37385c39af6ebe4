// ## 📂 File: `cli/src/commands/crack.rs`

use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::info;

use bigcrack_core::search::{SearchConfig, SearchEngine, SearchEvent, SearchOutcome, SearchReport};

use crate::args::{CrackArgs, ModeArg};
use crate::commands::{EXIT_FOUND, EXIT_NOT_FOUND};
use crate::report::CrackReport;

pub fn build_config(args: &CrackArgs) -> Result<SearchConfig> {
    let threads = args.threads.unwrap_or_else(SearchConfig::default_threads);
    let config = match args.mode {
        ModeArg::Numeric => SearchConfig::numeric(args.bc_length, args.payload_count, threads),
        ModeArg::Wordlist => {
            let path = args
                .wordlist
                .clone()
                .context("--wordlist is required in wordlist mode")?;
            SearchConfig::wordlist(path, args.payload_count, threads)
        }
    };
    Ok(config
        .check_interval(args.check_interval)
        .hw_offset(args.hw_offset)
        .bis_index(args.bis))
}

fn log_progress(event: &SearchEvent) {
    if let (SearchEvent::Progress { worker_id, tried, .. }, Some(pct)) = (event, event.percent()) {
        info!(worker_id, tried, "progress {:.1}%", pct);
    }
}

/// Load the capture files and run the search they describe.
pub fn search(args: &CrackArgs) -> Result<(SearchConfig, SearchReport)> {
    let pdu = std::fs::read(&args.pdu)
        .with_context(|| format!("reading PDU {}", args.pdu.display()))?;
    let big_info = std::fs::read(&args.biginfo)
        .with_context(|| format!("reading BIGInfo {}", args.biginfo.display()))?;

    let config = build_config(args)?;
    let engine = SearchEngine::new(config.clone(), pdu, &big_info).context("search setup failed")?;

    let report = engine.run(&log_progress).context("search failed")?;
    Ok((config, report))
}

pub fn run(args: CrackArgs) -> Result<ExitCode> {
    let (config, report) = search(&args)?;

    if args.json {
        println!("{}", CrackReport::new(&config, &report).to_json()?);
    }

    match &report.outcome {
        SearchOutcome::Found(rec) => {
            info!(
                worker_id = rec.worker_id,
                code_hex = %rec.code_hex(),
                plaintext = %rec.plaintext_hex(),
                "Broadcast Code found"
            );
            if !args.json {
                println!("Broadcast Code: {}", rec.candidate_text());
                println!("  hex (memory order): {}", rec.code_hex());
                println!("  text (reversed):    {}", rec.code_text());
                println!("  plaintext:          {}", rec.plaintext_hex());
                println!("  payload count:      {}", config.payload_count);
                println!("  encrypted PDU:      {}", rec.pdu_hex());
            }
            Ok(ExitCode::from(EXIT_FOUND))
        }
        SearchOutcome::NotFound => {
            info!(tried = report.counters.candidates_tried, "Broadcast Code not found");
            if !args.json {
                println!("Broadcast Code not found");
            }
            Ok(ExitCode::from(EXIT_NOT_FOUND))
        }
    }
}
