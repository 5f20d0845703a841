use clap::{Parser, ValueEnum};
use consat::{
    problems::map_coloring::australia,
    solver::{
        inference::Inference,
        search::{
            backtracking::BacktrackingSolver, min_conflicts::MinConflictsSolver, SearchStrategy,
        },
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

/// Colors the mainland states of Australia with three colors.
#[derive(Debug, Parser)]
struct Args {
    /// Propagation strategy for the backtracking search.
    #[arg(long, value_enum, default_value = "ac3")]
    inference: InferenceArg,

    /// Solve by local repair instead of backtracking, with this step bound.
    #[arg(long)]
    min_conflicts: Option<u64>,

    /// RNG seed for --min-conflicts.
    #[arg(long)]
    seed: Option<u64>,

    /// Print solver statistics as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let mut csp = australia();
    let (solution, stats) = match args.min_conflicts {
        Some(steps) => {
            let mut solver = MinConflictsSolver::new(steps);
            if let Some(seed) = args.seed {
                solver = solver.with_seed(seed);
            }
            solver.solve(&mut csp)
        }
        None => BacktrackingSolver::new()
            .with_inference(args.inference.into())
            .solve(&mut csp),
    };

    match solution {
        Some(assignment) => {
            for region in csp.variables() {
                match assignment.get(region) {
                    Some(color) => println!("{region}: {color:?}"),
                    None => println!("{region}: ?"),
                }
            }
        }
        None => println!("no solution found"),
    }

    if args.json {
        match serde_json::to_string_pretty(&stats) {
            Ok(json) => println!("{json}"),
            Err(error) => eprintln!("failed to serialize statistics: {error}"),
        }
    } else {
        println!("{}", render_stats_table(&stats, &csp));
    }
}
