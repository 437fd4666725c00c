//! Criterion benchmarks for the P/L replay path.
//!
//! net_pnl is recomputed from the full trade log on every refresh tick,
//! so its cost per call bounds how large a session's trade log can grow
//! before the tick budget is felt.

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tickerdeck_core::domain::{TradeRecord, TradeSide};
use tickerdeck_core::evaluation::judge_trade;
use tickerdeck_core::pnl::{net_pnl, trade_pnl};

fn make_trades(n: usize) -> Vec<TradeRecord> {
    (0..n)
        .map(|i| TradeRecord {
            side: if i % 3 == 2 {
                TradeSide::Sell
            } else {
                TradeSide::Buy
            },
            quantity: 1 + (i as u32 % 20),
            price: 100.0 + (i as f64 * 0.7).sin() * 10.0,
            timestamp: Utc.timestamp_opt(1_700_000_000 + i as i64 * 60, 0).unwrap(),
        })
        .collect()
}

fn bench_net_pnl(c: &mut Criterion) {
    let mut group = c.benchmark_group("net_pnl_replay");
    for n in [10usize, 100, 1_000] {
        let trades = make_trades(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &trades, |b, trades| {
            b.iter(|| net_pnl(black_box(trades), black_box(104.5)))
        });
    }
    group.finish();
}

fn bench_per_trade_verdicts(c: &mut Criterion) {
    let trades = make_trades(1_000);
    c.bench_function("per_trade_verdicts_1000", |b| {
        b.iter(|| {
            trades
                .iter()
                .map(|t| judge_trade(trade_pnl(black_box(t), 104.5)))
                .filter(|v| *v == tickerdeck_core::evaluation::Verdict::Good)
                .count()
        })
    });
}

criterion_group!(benches, bench_net_pnl, bench_per_trade_verdicts);
criterion_main!(benches);
