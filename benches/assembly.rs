//! Performance benchmarks for parsing, searching and assembly.
//!
//! Run with: `cargo bench --bench assembly`
//!
//! ## Scenarios
//!
//! | Benchmark | Input | Notes |
//! |-----------|-------|-------|
//! | parse | synthetic text | Parallel record normalization |
//! | assemble_sequential | synthetic registry | Lowest-index scans |
//! | assemble_parallel | synthetic registry | First-match rayon scans |
//! | intersection | sorted tag sets | Two-cursor merge |

use criterion::{
    black_box, criterion_group, criterion_main,
    BenchmarkId, Criterion, Throughput,
};

use slideshow_kernel::{
    intersection_count, parse_dataset, AssemblyPolicy, PhotoRegistry, SlideAssembler, TagSet,
};

/// Deterministic dataset text: xorshift-driven orientations and tags.
fn make_dataset(photos: usize) -> String {
    let mut out = format!("{}\n", photos);
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    for _ in 0..photos {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let orientation = if state % 4 == 0 { "V" } else { "H" };
        let count = 3 + (state >> 16) as usize % 12;
        let tags: Vec<String> = (0..count)
            .map(|k| format!("tag{}", (state.rotate_left(k as u32 * 7)) % 500))
            .collect();
        out.push_str(&format!("{} {} {}\n", orientation, count, tags.join(" ")));
    }
    out
}

fn make_registry(photos: usize) -> PhotoRegistry {
    parse_dataset(&make_dataset(photos)).expect("synthetic dataset parses")
}

/// Benchmark dataset parsing.
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for photos in [1_000, 10_000] {
        let text = make_dataset(photos);

        group.throughput(Throughput::Elements(photos as u64));
        group.bench_with_input(BenchmarkId::new("photos", photos), &text, |b, text| {
            b.iter(|| parse_dataset(black_box(text)).expect("parses"))
        });
    }

    group.finish();
}

/// Benchmark sequential assembly.
fn bench_assemble_sequential(c: &mut Criterion) {
    let assembler = SlideAssembler::new(AssemblyPolicy::sequential()).expect("valid policy");
    let mut group = c.benchmark_group("assemble_sequential");
    group.sample_size(10);

    for photos in [500, 2_000] {
        let registry = make_registry(photos);

        group.throughput(Throughput::Elements(photos as u64));
        group.bench_with_input(BenchmarkId::new("photos", photos), &registry, |b, registry| {
            b.iter(|| assembler.assemble(black_box(registry)).expect("assembles"))
        });
    }

    group.finish();
}

/// Benchmark parallel assembly on the global pool.
fn bench_assemble_parallel(c: &mut Criterion) {
    let assembler = SlideAssembler::new(AssemblyPolicy::default()).expect("valid policy");
    let mut group = c.benchmark_group("assemble_parallel");
    group.sample_size(10);

    for photos in [2_000, 8_000] {
        let registry = make_registry(photos);

        group.throughput(Throughput::Elements(photos as u64));
        group.bench_with_input(BenchmarkId::new("photos", photos), &registry, |b, registry| {
            b.iter(|| assembler.assemble(black_box(registry)).expect("assembles"))
        });
    }

    group.finish();
}

/// Benchmark tag intersection.
fn bench_intersection(c: &mut Criterion) {
    let mut group = c.benchmark_group("intersection");

    for len in [4u64, 16, 64] {
        let a = TagSet::new((0..len).map(|i| i * 3));
        let b = TagSet::new((0..len).map(|i| i * 2));

        group.bench_with_input(BenchmarkId::new("len", len), &(a, b), |bench, (a, b)| {
            bench.iter(|| intersection_count(black_box(a.as_slice()), black_box(b.as_slice())))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_assemble_sequential,
    bench_assemble_parallel,
    bench_intersection,
);

criterion_main!(benches);
