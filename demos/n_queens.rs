use clap::{Parser, ValueEnum};
use consat::{
    problems::n_queens::{n_queens, rows},
    solver::{
        heuristics::{
            value::LeastConstrainingValueHeuristic, variable::MinimumRemainingValuesHeuristic,
        },
        inference::Inference,
        search::{backtracking::BacktrackingSolver, SearchStrategy},
        stats::render_stats_table,
    },
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InferenceArg {
    None,
    ForwardChecking,
    Ac3,
}

impl From<InferenceArg> for Inference {
    fn from(arg: InferenceArg) -> Self {
        match arg {
            InferenceArg::None => Inference::None,
            InferenceArg::ForwardChecking => Inference::ForwardChecking,
            InferenceArg::Ac3 => Inference::Ac3,
        }
    }
}

/// Places N queens on an N x N board so that none attack each other.
#[derive(Debug, Parser)]
struct Args {
    /// Board size.
    #[arg(default_value_t = 8)]
    n: usize,

    /// Propagation strategy for the backtracking search.
    #[arg(long, value_enum, default_value = "ac3")]
    inference: InferenceArg,

    /// Branch on the most constrained column first.
    #[arg(long)]
    mrv: bool,

    /// Try the least constraining row first.
    #[arg(long)]
    lcv: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let mut csp = n_queens(args.n);
    let mut solver = BacktrackingSolver::new().with_inference(args.inference.into());
    if args.mrv {
        solver = solver.with_variable_heuristic(Box::new(MinimumRemainingValuesHeuristic));
    }
    if args.lcv {
        solver = solver.with_value_heuristic(Box::new(LeastConstrainingValueHeuristic));
    }

    println!("Solving N-Queens for N={}", args.n);
    let (solution, stats) = solver.solve(&mut csp);

    match solution.as_ref().and_then(|solution| rows(&csp, solution)) {
        Some(placement) => {
            println!("\nFound a solution:");
            for row in 0..args.n as i64 {
                let line: String = placement
                    .iter()
                    .map(|&queen_row| if queen_row == row { 'Q' } else { '.' })
                    .collect();
                println!("{line}");
            }
        }
        None => println!("\nNo solution found."),
    }

    println!("\n{}", render_stats_table(&stats, &csp));
}
