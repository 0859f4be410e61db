use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use secret_hitler_rs::{RandomStrategy, SecretHitler};

fn complete_game(seed: u64, baseline: bool) {
    let mut game = if baseline {
        black_box(SecretHitler::with_strategies(seed, |_, _| {
            Box::new(RandomStrategy)
        }))
    } else {
        black_box(SecretHitler::new(seed))
    };

    game.run_to_completion()
        .expect("game finished without contract violations");
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("complete_game");
    for mode in ["heuristic", "baseline"] {
        group.bench_with_input(BenchmarkId::from_parameter(mode), &mode, |b, &mode| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                complete_game(seed, mode == "baseline");
            })
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
