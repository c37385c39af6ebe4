use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use bigcrack_core::capture::{forge_capture, CaptureSpec, DEFAULT_PDU_HEADER};
use bigcrack_core::crypto::{derive_gsk, BroadcastCode, EncryptedPdu};
use bigcrack_core::headers::BigInfo;
use bigcrack_core::search::{NoopObserver, SearchConfig, SearchEngine};

fn fixture_big_info() -> BigInfo {
    BigInfo {
        seed_access_addr: [0x9A, 0x4C, 0x27, 0x6B],
        giv: [0x11; 8],
        gskd: [0x22; 16],
        ..Default::default()
    }
}

// Per-candidate cost: GSK derivation alone.
fn bench_derive(c: &mut Criterion) {
    let gskd = [0x22u8; 16];
    let code = BroadcastCode::from_candidate(b"0000").unwrap();
    c.bench_function("derive_gsk", |b| {
        b.iter(|| derive_gsk(black_box(&code), black_box(&gskd)).unwrap());
    });
}

// Derivation + failed open, the path every wrong candidate takes.
fn bench_candidate(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidate");
    let info = fixture_big_info();

    for pt_len in [16usize, 40, 120].iter() {
        let plaintext = vec![0xA5u8; *pt_len];
        let cap = forge_capture(&CaptureSpec {
            code: b"real",
            big_info: &info,
            payload_count: 1,
            plaintext: &plaintext,
            header: DEFAULT_PDU_HEADER,
            hw_offset: 0,
            bis_index: 1,
        })
        .unwrap();
        let pdu = EncryptedPdu::parse(cap.pdu.clone(), 0).unwrap();
        let code = BroadcastCode::from_candidate(b"fake").unwrap();
        let mut out = Vec::with_capacity(*pt_len);

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(pt_len), pt_len, |b, _| {
            b.iter(|| {
                let gsk = derive_gsk(&code, &info.gskd).unwrap();
                let _ = black_box(pdu.open_into(&gsk, &cap.nonce, &mut out));
            });
        });
    }
    group.finish();
}

// Whole engine over a one-byte numeric space.
fn bench_numeric_search(c: &mut Criterion) {
    let info = fixture_big_info();
    let cap = forge_capture(&CaptureSpec {
        code: b"zz",
        big_info: &info,
        payload_count: 1,
        plaintext: b"never found",
        header: DEFAULT_PDU_HEADER,
        hw_offset: 0,
        bis_index: 1,
    })
    .unwrap();

    let mut group = c.benchmark_group("numeric_search");
    group.throughput(Throughput::Elements(256));
    for threads in [1usize, 4].iter() {
        let engine = SearchEngine::new(SearchConfig::numeric(1, 1, *threads), cap.pdu.clone(), &cap.big_info).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(threads), threads, |b, _| {
            b.iter(|| engine.run(&NoopObserver).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_derive, bench_candidate, bench_numeric_search);
criterion_main!(benches);
