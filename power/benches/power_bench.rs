use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pulse_power::PowerCalculator;
use pulse_types::UserStats;

fn bench_voting_power(c: &mut Criterion) {
    let mut group = c.benchmark_group("voting_power");
    let calc = PowerCalculator::default();

    for (xp, streak) in [(0u64, 0u32), (450, 9), (5_000, 365)] {
        let stats = UserStats {
            xp,
            consecutive_engage_days: streak,
            ..Default::default()
        };
        group.bench_with_input(
            BenchmarkId::new("voting_power", format!("xp{xp}_streak{streak}")),
            &stats,
            |b, stats| {
                b.iter(|| black_box(calc.voting_power(black_box(stats))));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_voting_power);
criterion_main!(benches);
