use basketmine::{apriori, fp, CancelToken, MiningConfig, RuleGenerator, TransactionDatabase};
use basketmine::Algorithm;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;

/// Generate synthetic transaction data.
///
/// Parameters:
/// - num_transactions: number of transactions
/// - num_items: size of the item universe
/// - avg_transaction_size: average items per transaction
fn generate_transactions(
    num_transactions: usize,
    num_items: u32,
    avg_transaction_size: usize,
) -> TransactionDatabase {
    let mut rng = rand::thread_rng();
    let mut rows = Vec::with_capacity(num_transactions);

    for _ in 0..num_transactions {
        let jitter: f64 = rng.gen();
        let size = ((avg_transaction_size as f64 * (0.5 + jitter)).round() as usize).max(1);

        let mut row = Vec::with_capacity(size);
        for _ in 0..size {
            // Skewed toward low item ids so co-occurring patterns exist.
            let a = rng.gen_range(0..num_items);
            let b = rng.gen_range(0..num_items);
            row.push(a.min(b));
        }
        rows.push(row);
    }

    TransactionDatabase::from_items(rows).expect("generated rows are non-empty")
}

fn config(min_support: f64, algorithm: Algorithm) -> MiningConfig {
    MiningConfig::new(min_support, algorithm)
}

fn bench_miner_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("miner_scaling");

    let configs = vec![
        ("small_100tx", 100, 20, 5),
        ("medium_500tx", 500, 50, 8),
        ("large_1000tx", 1000, 80, 10),
    ];

    for (name, num_tx, num_items, avg_size) in configs {
        let db = generate_transactions(num_tx, num_items, avg_size);

        group.bench_with_input(BenchmarkId::new("fp_growth", name), &db, |b, db| {
            b.iter(|| {
                fp::mine(
                    black_box(db),
                    &config(0.1, Algorithm::FpGrowth),
                    &CancelToken::new(),
                )
                .unwrap()
            });
        });

        group.bench_with_input(BenchmarkId::new("apriori", name), &db, |b, db| {
            b.iter(|| {
                apriori::mine(
                    black_box(db),
                    &config(0.1, Algorithm::Apriori),
                    &CancelToken::new(),
                )
                .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_min_support(c: &mut Criterion) {
    let mut group = c.benchmark_group("fp_growth_min_support");

    let db = generate_transactions(1000, 50, 8);

    for &min_support in &[0.05, 0.1, 0.2, 0.3, 0.5] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{min_support:.2}")),
            &min_support,
            |b, &support| {
                b.iter(|| {
                    fp::mine(
                        black_box(&db),
                        &config(support, Algorithm::FpGrowth),
                        &CancelToken::new(),
                    )
                    .unwrap()
                });
            },
        );
    }

    group.finish();
}

fn bench_rule_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_generation");

    let db = generate_transactions(1000, 30, 8);
    let table = fp::mine(&db, &config(0.05, Algorithm::FpGrowth), &CancelToken::new()).unwrap();

    for &min_confidence in &[0.3, 0.6, 0.9] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{min_confidence:.1}")),
            &min_confidence,
            |b, &confidence| {
                b.iter(|| {
                    RuleGenerator::new(black_box(&table), confidence)
                        .generate()
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_miner_scaling,
    bench_min_support,
    bench_rule_generation
);
criterion_main!(benches);
