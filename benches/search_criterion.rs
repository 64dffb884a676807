use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use gametree_chess::board::move_rules::ChessRules;
use gametree_chess::evaluation::heuristic::HeuristicEvaluator;
use gametree_chess::search::alpha_beta::alpha_beta;
use gametree_chess::search::minimax::minimax;
use gametree_chess::tree::builder::TreeBuilder;
use gametree_chess::tree::game_tree::{GameTree, NodeId};
use gametree_chess::tree::move_sampler::RandomSampler;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    opening: &'static [&'static str],
    depths: &'static [usize],
}

const CASES_QUICK: &[BenchCase] = &[
    BenchCase {
        name: "queens_gambit_declined",
        opening: &["d2d4", "d7d5", "c2c4", "e7e6"],
        depths: &[2, 4, 6],
    },
    BenchCase {
        name: "sicilian",
        opening: &["e2e4", "c7c5"],
        depths: &[3, 5],
    },
];

const CASES_STANDARD: &[BenchCase] = &[
    BenchCase {
        name: "queens_gambit_declined",
        opening: &["d2d4", "d7d5", "c2c4", "e7e6"],
        depths: &[2, 4, 6, 8],
    },
    BenchCase {
        name: "sicilian",
        opening: &["e2e4", "c7c5"],
        depths: &[3, 5, 7],
    },
    BenchCase {
        name: "ruy_lopez",
        opening: &["e2e4", "e7e5", "g1f3", "b8c6"],
        depths: &[4, 6, 8],
    },
];

const SEED: u64 = 2024;

fn suite() -> (&'static str, &'static [BenchCase]) {
    match std::env::var("GAMETREE_BENCH_SUITE") {
        Ok(value) if value.eq_ignore_ascii_case("standard") => ("standard", CASES_STANDARD),
        _ => ("quick", CASES_QUICK),
    }
}

fn build(case: &BenchCase, depth: usize) -> GameTree {
    TreeBuilder::new(ChessRules, HeuristicEvaluator, RandomSampler::seeded(SEED))
        .build(case.opening, depth)
        .expect("benchmark opening should be legal")
}

fn bench_search(c: &mut Criterion) {
    let (suite_name, cases) = suite();

    let mut group = c.benchmark_group(format!("build_and_search_{suite_name}"));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in cases {
        for &depth in case.depths {
            let reference = build(case, depth);

            // Correctness guard before benchmarking.
            let mut minimax_tree = reference.clone();
            let mut alpha_beta_tree = reference.clone();
            let expected = minimax(&mut minimax_tree, NodeId::ROOT, depth, true);
            let pruned = alpha_beta(
                &mut alpha_beta_tree,
                NodeId::ROOT,
                depth,
                f64::NEG_INFINITY,
                f64::INFINITY,
                true,
            );
            assert_eq!(
                expected, pruned,
                "root value mismatch for {} depth {}",
                case.name, depth
            );

            group.throughput(Throughput::Elements(reference.len() as u64));
            let bench_name = format!("{}_d{}", case.name, depth);

            group.bench_with_input(
                BenchmarkId::new("minimax", &bench_name),
                &depth,
                |b, &depth| {
                    b.iter(|| {
                        let mut tree = build(case, depth);
                        let root = tree.root();
                        black_box(minimax(&mut tree, root, black_box(depth), true))
                    });
                },
            );

            group.bench_with_input(
                BenchmarkId::new("alpha_beta", &bench_name),
                &depth,
                |b, &depth| {
                    b.iter(|| {
                        let mut tree = build(case, depth);
                        let root = tree.root();
                        black_box(alpha_beta(
                            &mut tree,
                            root,
                            black_box(depth),
                            f64::NEG_INFINITY,
                            f64::INFINITY,
                            true,
                        ))
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
