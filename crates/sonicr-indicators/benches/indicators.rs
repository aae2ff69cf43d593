//! Benchmarks for indicator implementations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sonicr_core::traits::{CandlePattern, Indicator};
use sonicr_indicators::{crossed_above_value, Doji, Ema, InvertedHammer, Rsi};

fn generate_closes(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn generate_ohlc(size: usize) -> [Vec<f64>; 4] {
    let close = generate_closes(size);
    let open: Vec<f64> = close.iter().map(|c| c - (c * 0.37).sin()).collect();
    let high = open.iter().zip(&close).map(|(o, c)| o.max(*c) + 1.0).collect();
    let low = open.iter().zip(&close).map(|(o, c)| o.min(*c) - 1.0).collect();
    [open, high, low, close]
}

fn benchmark_ema(c: &mut Criterion) {
    let mut group = c.benchmark_group("EMA");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_closes(*size);

        group.bench_with_input(BenchmarkId::new("ema34", size), &data, |b, data| {
            let ema = Ema::new(34);
            b.iter(|| ema.calculate_aligned(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_rsi(c: &mut Criterion) {
    let mut group = c.benchmark_group("RSI");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_closes(*size);

        group.bench_with_input(BenchmarkId::new("rsi14", size), &data, |b, data| {
            let rsi = Rsi::new(14);
            b.iter(|| {
                let values = rsi.calculate_aligned(black_box(data));
                crossed_above_value(&values, 80.0)
            })
        });
    }

    group.finish();
}

fn benchmark_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("Patterns");

    for size in [1000, 10000, 100000].iter() {
        let [open, high, low, close] = generate_ohlc(*size);

        group.bench_function(BenchmarkId::new("doji", size), |b| {
            let doji = Doji::default();
            b.iter(|| doji.recognize(black_box(&open), &high, &low, &close))
        });

        group.bench_function(BenchmarkId::new("inverted_hammer", size), |b| {
            let pattern = InvertedHammer::default();
            b.iter(|| pattern.recognize(black_box(&open), &high, &low, &close))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_ema, benchmark_rsi, benchmark_patterns);
criterion_main!(benches);
