// Criterion benchmark suite for the luapat engine.
//
// Run: cargo bench
// Specific group: cargo bench -- search
// HTML report: target/criterion/report/index.html

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use luapat::exec::{MatchState, Status};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn run(hay: &[u8], pat: &[u8]) -> Status {
    let mut state = MatchState::new(hay, pat);
    state.search(0)
}

fn make_haystack(len: usize) -> Vec<u8> {
    // Repeating lowercase filler with a sentinel word at the end.
    let mut hay: Vec<u8> = b"lorem ipsum dolor sit amet "
        .iter()
        .cycle()
        .take(len)
        .copied()
        .collect();
    hay.extend_from_slice(b"zebra");
    hay
}

// ---------------------------------------------------------------------------
// 1. search -- unanchored scans over a large haystack
// ---------------------------------------------------------------------------

fn bench_search(c: &mut Criterion) {
    let hay = make_haystack(64 * 1024);

    let patterns: &[(&str, &[u8])] = &[
        ("literal_tail", b"zebra"),
        ("class_run", b"z%a+"),
        ("wildcard_greedy", b"z.*a"),
        ("bracket_set", b"[xyz]ebra"),
    ];

    let mut group = c.benchmark_group("search");
    for (name, pat) in patterns {
        group.bench_with_input(BenchmarkId::from_parameter(name), pat, |b, pat| {
            b.iter(|| {
                let status = run(black_box(&hay), black_box(pat));
                assert_eq!(status, Status::Match);
            });
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// 2. backtrack -- greedy and lazy repetition with forced retries
// ---------------------------------------------------------------------------

fn bench_backtrack(c: &mut Criterion) {
    let mut hay = vec![b'a'; 4096];
    hay.push(b'b');

    let mut group = c.benchmark_group("backtrack");
    group.bench_function("greedy_long_run", |b| {
        b.iter(|| run(black_box(&hay), black_box(b"a*b")));
    });
    group.bench_function("lazy_long_run", |b| {
        b.iter(|| run(black_box(&hay), black_box(b"a-b")));
    });
    group.bench_function("greedy_retreat", |b| {
        // The star overshoots past the final `ab` and must back off.
        b.iter(|| run(black_box(&hay), black_box(b".*ab")));
    });
    group.finish();
}

// ---------------------------------------------------------------------------
// 3. constructs -- captures, backreferences, balanced, frontier
// ---------------------------------------------------------------------------

fn bench_constructs(c: &mut Criterion) {
    let words = make_haystack(16 * 1024);
    let mut nested = vec![b'('; 256];
    nested.extend_from_slice(b"payload");
    nested.extend(std::iter::repeat(b')').take(256));

    let mut group = c.benchmark_group("constructs");
    group.bench_function("captures", |b| {
        b.iter(|| run(black_box(&words), black_box(b"(%a+) (%a+) (%a+)")));
    });
    group.bench_function("backref", |b| {
        b.iter(|| run(black_box(&words), black_box(b"(%a+) ipsum %1")));
    });
    group.bench_function("balanced_deep", |b| {
        b.iter(|| run(black_box(&nested), black_box(b"%b()")));
    });
    group.bench_function("frontier_words", |b| {
        b.iter(|| run(black_box(&words), black_box(b"%f[%a]zebra")));
    });
    group.finish();
}

criterion_group!(benches, bench_search, bench_backtrack, bench_constructs);
criterion_main!(benches);
