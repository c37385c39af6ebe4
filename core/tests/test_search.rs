// End-to-end search tests over forged captures.

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io::Write;

    use rand::distributions::Alphanumeric;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use tempfile::NamedTempFile;

    use bigcrack_core::capture::{forge_capture, CaptureSpec, ForgedCapture};
    use bigcrack_core::crypto::VerifyError;
    use bigcrack_core::headers::{BigInfo, BigInfoError};
    use bigcrack_core::search::{
        ConfigError, NoopObserver, SearchConfig, SearchEngine, SearchEvent, SearchOutcome,
        StopSignal, SuccessFlag, WorkerState,
    };
    use bigcrack_core::types::SearchError;

    const PAYLOAD_COUNT: u64 = 0x1234;
    const PLAINTEXT: &[u8] = b"\x01\x02\x03 LC3 audio frame";

    fn big_info() -> BigInfo {
        BigInfo {
            num_bis: 1,
            seed_access_addr: [0x9A, 0x4C, 0x27, 0x6B],
            giv: [0xB0, 0xB1, 0xB2, 0xB3, 0xB4, 0xB5, 0xB6, 0xB7],
            gskd: [0x5A; 16],
            ..Default::default()
        }
    }

    fn forge(code: &[u8], hw_offset: u8) -> ForgedCapture {
        let info = big_info();
        forge_capture(&CaptureSpec {
            code,
            big_info: &info,
            payload_count: PAYLOAD_COUNT,
            plaintext: PLAINTEXT,
            header: 0x00,
            hw_offset,
            bis_index: 1,
        })
        .unwrap()
    }

    fn wordlist(lines: &[Vec<u8>]) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        for l in lines {
            f.write_all(l).unwrap();
            f.write_all(b"\n").unwrap();
        }
        f.flush().unwrap();
        f
    }

    fn decoys(rng: &mut StdRng, n: usize, avoid: &[u8]) -> Vec<Vec<u8>> {
        let mut out = Vec::with_capacity(n);
        while out.len() < n {
            let len = rng.gen_range(1..=16);
            let w: Vec<u8> = (0..len).map(|_| rng.sample(Alphanumeric)).collect();
            if w != avoid {
                out.push(w);
            }
        }
        out
    }

    fn run(config: SearchConfig, cap: &ForgedCapture) -> Result<bigcrack_core::search::SearchReport, SearchError> {
        SearchEngine::new(config, cap.pdu.clone(), &cap.big_info)?.run(&NoopObserver)
    }

    // ------------------------------------------------------------
    // Numeric mode
    // ------------------------------------------------------------

    #[test]
    fn numeric_finds_two_byte_code() {
        let cap = forge(b"1a2b", 0);
        let report = run(SearchConfig::numeric(2, PAYLOAD_COUNT, 4), &cap).unwrap();

        let rec = report.outcome.recovery().expect("code should be found");
        assert_eq!(rec.candidate, b"1a2b");
        assert_eq!(rec.candidate_text(), "1a2b");
        assert_eq!(rec.code_text(), "b2a1");
        assert_eq!(&rec.plaintext[..], PLAINTEXT);
        assert_eq!(&rec.pdu[..], &cap.pdu[..]);
        assert_eq!(rec.pdu_hex(), hex::encode(&cap.pdu));
        assert_eq!(report.count_in(WorkerState::Succeeded), 1);
        assert!(report.snapshot.sanity_check());
    }

    #[test]
    fn numeric_exhausts_whole_space_when_absent() {
        // Not a hex string, so never generated.
        let cap = forge(b"zz", 0);
        let report = run(SearchConfig::numeric(2, PAYLOAD_COUNT, 3), &cap).unwrap();

        assert_eq!(report.outcome, SearchOutcome::NotFound);
        assert_eq!(report.counters.candidates_tried, 65536);
        assert_eq!(report.workers.len(), 4);
        assert!(report.workers.iter().all(|w| w.state() == WorkerState::Exhausted));
        assert!(report.snapshot.sanity_check());
    }

    #[test]
    fn wrong_payload_count_never_verifies() {
        let cap = forge(b"0f", 0);
        let report = run(SearchConfig::numeric(1, PAYLOAD_COUNT + 1, 2), &cap).unwrap();
        assert_eq!(report.outcome, SearchOutcome::NotFound);
        assert_eq!(report.counters.candidates_tried, 256);
    }

    #[test]
    fn preset_flag_stops_every_worker_before_any_candidate() {
        let cap = forge(b"00", 0);
        let flag = SuccessFlag::new();
        assert!(flag.try_claim());

        let engine = SearchEngine::new(SearchConfig::numeric(2, PAYLOAD_COUNT, 4), cap.pdu.clone(), &cap.big_info)
            .unwrap()
            .with_success_flag(flag);
        let report = engine.run(&NoopObserver).unwrap();

        assert_eq!(report.outcome, SearchOutcome::NotFound);
        assert_eq!(report.counters.candidates_tried, 0);
        assert!(report.workers.iter().all(|w| w.state() == WorkerState::Aborted));
    }

    #[test]
    fn success_flag_claims_once() {
        let flag = SuccessFlag::new();
        let other = flag.clone();
        assert!(!flag.is_set());
        assert!(flag.try_claim());
        assert!(!other.try_claim());
        assert!(other.is_set());
    }

    #[test]
    fn abort_stops_without_claiming() {
        let flag = SuccessFlag::new();
        let signal = StopSignal::new(flag.clone());
        assert!(!signal.should_stop());
        signal.clone().abort();
        assert!(signal.should_stop());
        assert!(signal.is_aborted());
        assert!(!flag.is_set());
    }

    #[test]
    fn hw_offset_capture_is_cracked() {
        let cap = forge(b"c3", 1);
        let config = SearchConfig::numeric(1, PAYLOAD_COUNT, 2).hw_offset(1);
        let report = run(config, &cap).unwrap();
        assert_eq!(report.outcome.recovery().unwrap().candidate, b"c3");
    }

    // ------------------------------------------------------------
    // Wordlist mode
    // ------------------------------------------------------------

    #[test]
    fn wordlist_finds_code_among_decoys() {
        let code = b"Sup3rS3cret".to_vec();
        let cap = forge(&code, 0);

        let mut rng = StdRng::seed_from_u64(7);
        let mut lines = decoys(&mut rng, 10_000, &code);
        let at = rng.gen_range(0..lines.len());
        lines.insert(at, code.clone());
        let f = wordlist(&lines);

        let config = SearchConfig::wordlist(f.path(), PAYLOAD_COUNT, 4).check_interval(500);
        let report = run(config, &cap).unwrap();

        let rec = report.outcome.recovery().expect("code should be found");
        assert_eq!(rec.candidate, code);
        assert_eq!(rec.candidate_text(), "Sup3rS3cret");
        assert_eq!(&rec.plaintext[..], PLAINTEXT);
        assert_eq!(report.count_in(WorkerState::Succeeded), 1);
    }

    #[test]
    fn wordlist_tries_every_line_once_when_absent() {
        let mut rng = StdRng::seed_from_u64(11);
        let lines = decoys(&mut rng, 2_000, b"absent-code");
        let f = wordlist(&lines);
        let cap = forge(b"absent-code", 0);

        let report = run(SearchConfig::wordlist(f.path(), PAYLOAD_COUNT, 7), &cap).unwrap();
        assert_eq!(report.outcome, SearchOutcome::NotFound);
        assert_eq!(report.counters.candidates_tried, 2_000);
        assert_eq!(report.counters.candidates_skipped, 0);
        let file_len = std::fs::metadata(f.path()).unwrap().len();
        assert!(report.counters.bytes_read >= file_len);
    }

    #[test]
    fn wordlist_last_line_without_newline() {
        let cap = forge(b"tail", 0);
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(b"one\ntwo\r\nthree\ntail").unwrap();
        f.flush().unwrap();

        let report = run(SearchConfig::wordlist(f.path(), PAYLOAD_COUNT, 2), &cap).unwrap();
        assert_eq!(report.outcome.recovery().unwrap().candidate, b"tail");
    }

    #[test]
    fn wordlist_counts_skipped_lines() {
        let cap = forge(b"nope", 0);
        let f = wordlist(&[b"".to_vec(), b"x".repeat(17), b"fine".to_vec()]);
        let report = run(SearchConfig::wordlist(f.path(), PAYLOAD_COUNT, 1), &cap).unwrap();
        assert_eq!(report.counters.candidates_tried, 1);
        assert_eq!(report.counters.candidates_skipped, 2);
    }

    #[test]
    fn duplicated_code_has_one_winner() {
        let cap = forge(b"dup", 0);
        let lines = vec![b"dup".to_vec(); 64];
        let f = wordlist(&lines);
        let report = run(SearchConfig::wordlist(f.path(), PAYLOAD_COUNT, 8).check_interval(1), &cap).unwrap();

        assert!(report.outcome.is_found());
        assert_eq!(report.count_in(WorkerState::Succeeded), 1);
    }

    #[test]
    fn empty_wordlist_is_not_found() {
        let cap = forge(b"any", 0);
        let f = NamedTempFile::new().unwrap();
        let report = run(SearchConfig::wordlist(f.path(), PAYLOAD_COUNT, 4), &cap).unwrap();
        assert_eq!(report.outcome, SearchOutcome::NotFound);
        assert!(report.workers.is_empty());
    }

    // ------------------------------------------------------------
    // Events
    // ------------------------------------------------------------

    #[test]
    fn observer_sees_start_progress_finish() {
        let cap = forge(b"zz", 0);
        let events = RefCell::new(Vec::new());
        let observer = |e: &SearchEvent| events.borrow_mut().push(e.clone());

        let config = SearchConfig::numeric(1, PAYLOAD_COUNT, 2).check_interval(16);
        SearchEngine::new(config, cap.pdu.clone(), &cap.big_info)
            .unwrap()
            .run(&observer)
            .unwrap();

        let events = events.into_inner();
        for id in 0..2 {
            let mine: Vec<_> = events.iter().filter(|e| e.worker_id() == id).collect();
            assert!(matches!(mine.first(), Some(SearchEvent::Started { .. })));
            assert!(matches!(
                mine.last(),
                Some(SearchEvent::Finished { state: WorkerState::Exhausted, .. })
            ));
            let progress = mine.iter().filter(|e| e.percent().is_some()).count();
            // 128 candidates at an interval of 16, the last check lands on the end.
            assert_eq!(progress, 8);
        }
    }

    // ------------------------------------------------------------
    // Setup errors
    // ------------------------------------------------------------

    fn setup_err(config: SearchConfig, pdu: Vec<u8>, info: &[u8]) -> ConfigError {
        match SearchEngine::new(config, pdu, info) {
            Err(SearchError::Config(e)) => e,
            Err(other) => panic!("expected config error, got {other:?}"),
            Ok(_) => panic!("expected config error"),
        }
    }

    #[test]
    fn invalid_configs_rejected() {
        let cap = forge(b"x", 0);
        let cases = [
            (SearchConfig::numeric(0, PAYLOAD_COUNT, 1), ConfigError::InvalidCodeLen { value: 0 }),
            (SearchConfig::numeric(8, PAYLOAD_COUNT, 1), ConfigError::InvalidCodeLen { value: 8 }),
            (SearchConfig::numeric(2, PAYLOAD_COUNT, 0), ConfigError::InvalidThreads),
            (SearchConfig::numeric(2, 0, 1), ConfigError::InvalidPayloadCount { value: 0 }),
            (SearchConfig::numeric(2, 1 << 39, 1), ConfigError::InvalidPayloadCount { value: 1 << 39 }),
            (SearchConfig::numeric(2, PAYLOAD_COUNT, 1).hw_offset(2), ConfigError::InvalidHwOffset { value: 2 }),
            (SearchConfig::numeric(2, PAYLOAD_COUNT, 1).check_interval(0), ConfigError::InvalidCheckInterval),
            (SearchConfig::numeric(2, PAYLOAD_COUNT, 1).bis_index(0), ConfigError::InvalidBisIndex { value: 0 }),
        ];
        for (config, expected) in cases {
            assert_eq!(setup_err(config, cap.pdu.clone(), &cap.big_info), expected);
        }
    }

    #[test]
    fn missing_wordlist_rejected_at_setup() {
        let cap = forge(b"x", 0);
        let config = SearchConfig::wordlist("/nonexistent/words.txt", PAYLOAD_COUNT, 1);
        assert!(matches!(
            setup_err(config, cap.pdu.clone(), &cap.big_info),
            ConfigError::Wordlist { .. }
        ));
    }

    #[test]
    fn short_big_info_rejected_at_setup() {
        let cap = forge(b"x", 0);
        let err = setup_err(SearchConfig::numeric(1, PAYLOAD_COUNT, 1), cap.pdu.clone(), &cap.big_info[..40]);
        assert_eq!(err, ConfigError::BigInfo(BigInfoError::BufferTooShort { have: 40, need: 57 }));
    }

    #[test]
    fn malformed_pdu_rejected_at_setup() {
        let cap = forge(b"x", 0);
        let mut pdu = cap.pdu.clone();
        pdu.pop();
        let err = setup_err(SearchConfig::numeric(1, PAYLOAD_COUNT, 1), pdu, &cap.big_info);
        assert!(matches!(err, ConfigError::Pdu(VerifyError::Malformed(_))));
    }
}
