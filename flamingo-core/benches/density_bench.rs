//! Criterion benchmarks for the returns-distribution path.
//!
//! Benchmarks:
//! 1. Daily returns over one and five years of closes
//! 2. Gaussian KDE at several evaluation resolutions
//! 3. Full snapshot assembly from a fetched history

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use flamingo_core::analytics::{compute_returns, estimate_density_with, histogram, Bandwidth};
use flamingo_core::data::{History, Metadata};
use flamingo_core::domain::{LookbackPeriod, PriceBar, PriceSeries};
use flamingo_core::{AnalyticsSettings, DashboardSnapshot};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_closes(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 1_500.0 + (i as f64 * 0.1).sin() * 60.0 + i as f64 * 0.2)
        .collect()
}

fn make_history(n: usize) -> History {
    let start = chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let bars = make_closes(n)
        .into_iter()
        .enumerate()
        .map(|(i, close)| PriceBar {
            date: start + chrono::Duration::days(i as i64),
            open: close - 2.0,
            high: close + 8.0,
            low: close - 8.0,
            close,
            volume: 2_000_000 + (i as u64 % 400_000),
        })
        .collect();
    History {
        series: PriceSeries::new("RELIANCE", LookbackPeriod::FiveYears, bars).unwrap(),
        metadata: Metadata::new(),
    }
}

// ── 1. Returns ───────────────────────────────────────────────────────

fn bench_returns(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_returns");
    for n in [250usize, 1_250] {
        let closes = make_closes(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &closes, |b, closes| {
            b.iter(|| compute_returns(black_box(closes)))
        });
    }
    group.finish();
}

// ── 2. Density ───────────────────────────────────────────────────────

fn bench_density(c: &mut Criterion) {
    let returns = compute_returns(&make_closes(1_250));
    let mut group = c.benchmark_group("estimate_density");
    for samples in [100usize, 400] {
        for bandwidth in [Bandwidth::Scott, Bandwidth::Silverman] {
            let id = BenchmarkId::new(bandwidth.to_string(), samples);
            group.bench_with_input(id, &samples, |b, &samples| {
                b.iter(|| estimate_density_with(black_box(returns.values()), samples, bandwidth))
            });
        }
    }
    group.finish();

    c.bench_function("histogram_sturges_1250", |b| {
        b.iter(|| histogram(black_box(returns.values()), 12))
    });
}

// ── 3. Snapshot ──────────────────────────────────────────────────────

fn bench_snapshot(c: &mut Criterion) {
    let history = make_history(1_250);
    let settings = AnalyticsSettings::default();
    c.bench_function("snapshot_build_5y", |b| {
        b.iter(|| {
            DashboardSnapshot::build(
                "RELIANCE",
                LookbackPeriod::FiveYears,
                black_box(history.clone()),
                &settings,
            )
        })
    });
}

criterion_group!(benches, bench_returns, bench_density, bench_snapshot);
criterion_main!(benches);
