use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use consat::{
    problems::{map_coloring::australia, n_queens::n_queens},
    solver::{
        heuristics::variable::MinimumRemainingValuesHeuristic,
        inference::Inference,
        search::{
            backtracking::BacktrackingSolver, min_conflicts::MinConflictsSolver, SearchStrategy,
        },
    },
};

fn inference_label(inference: Inference) -> &'static str {
    match inference {
        Inference::None => "none",
        Inference::ForwardChecking => "forward-checking",
        Inference::Ac3 => "ac3",
    }
}

fn backtracking_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("backtracking");

    for inference in [Inference::None, Inference::ForwardChecking, Inference::Ac3] {
        group.bench_with_input(
            BenchmarkId::new("australia", inference_label(inference)),
            &inference,
            |b, &inference| {
                b.iter(|| {
                    let mut csp = australia();
                    let solver = BacktrackingSolver::new().with_inference(inference);
                    black_box(solver.solve(&mut csp))
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("n_queens_8", inference_label(inference)),
            &inference,
            |b, &inference| {
                b.iter(|| {
                    let mut csp = n_queens(8);
                    let solver = BacktrackingSolver::new()
                        .with_variable_heuristic(Box::new(MinimumRemainingValuesHeuristic))
                        .with_inference(inference);
                    black_box(solver.solve(&mut csp))
                })
            },
        );
    }

    group.finish();
}

fn min_conflicts_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("min_conflicts");

    for n in [8usize, 16] {
        group.bench_with_input(BenchmarkId::new("n_queens", n), &n, |b, &n| {
            b.iter(|| {
                let mut csp = n_queens(n);
                let solver = MinConflictsSolver::new(10_000).with_seed(42);
                black_box(solver.solve(&mut csp))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, backtracking_benchmarks, min_conflicts_benchmarks);
criterion_main!(benches);
