//! Criterion benchmarks for the engine hot path.
//!
//! Benchmarks:
//! 1. Bar event loop (full multi-signal run over a synthetic stream)
//! 2. Rolling series indicator queries (Donchian + ATR per bar)

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use chrono::NaiveDate;
use turtle_core::domain::Bar;
use turtle_core::indicators::RollingSeries;
use turtle_core::{EngineConfig, InstrumentConfig, NoOpSink, TurtleEngine};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_bars(n: usize) -> Vec<Bar> {
    let base = NaiveDate::from_ymd_opt(2020, 1, 2)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            let open = close - 0.3;
            Bar::new(
                "cu",
                base + chrono::Duration::days(i as i64),
                open,
                close + 1.5,
                open - 1.5,
                close,
            )
        })
        .collect()
}

fn bench_bar_loop(c: &mut Criterion) {
    let bars = make_bars(5_000);
    let config = EngineConfig::new(10_000_000.0, vec![InstrumentConfig::reference("cu", 10.0)]);

    let mut group = c.benchmark_group("engine");
    group.throughput(Throughput::Elements(bars.len() as u64));
    group.bench_function("on_bar_5k", |b| {
        b.iter(|| {
            let mut engine = TurtleEngine::new(config.clone(), NoOpSink).unwrap();
            for bar in &bars {
                engine.on_bar(black_box(bar));
            }
            black_box(engine.bars_processed())
        })
    });
    group.finish();
}

fn bench_indicators(c: &mut Criterion) {
    let bars = make_bars(5_000);

    let mut group = c.benchmark_group("indicators");
    group.throughput(Throughput::Elements(bars.len() as u64));
    group.bench_function("donchian_atr_per_bar", |b| {
        b.iter(|| {
            let mut series = RollingSeries::new(60);
            let mut acc = 0.0;
            for bar in &bars {
                series.update(bar.clone());
                if let Some((up, down)) = series.donchian(20) {
                    acc += up - down;
                }
                if let Some(atr) = series.atr(20) {
                    acc += atr;
                }
            }
            black_box(acc)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_bar_loop, bench_indicators);
criterion_main!(benches);
