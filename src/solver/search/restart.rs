use tracing::debug;

use crate::solver::{
    assignment::Assignment,
    csp::Csp,
    search::SearchStrategy,
    stats::SearchStats,
    value::ValueEquality,
};

/// A trait for policies that decide when to restart the search.
pub trait RestartPolicy {
    /// Given the statistics of the most recent attempt, decides whether to
    /// run another one.
    fn should_restart(&self, stats: &SearchStats) -> bool;
}

/// A policy that never triggers a restart.
pub struct NoRestartPolicy;

impl RestartPolicy for NoRestartPolicy {
    fn should_restart(&self, _stats: &SearchStats) -> bool {
        false
    }
}

/// A policy that restarts the search after a fixed number of backtracks.
pub struct RestartAfterNBacktracks {
    pub max_backtracks: u64,
}

impl RestartPolicy for RestartAfterNBacktracks {
    fn should_restart(&self, stats: &SearchStats) -> bool {
        stats.backtracks >= self.max_backtracks
    }
}

/// Re-runs an inner strategy until it succeeds or its restart policy gives
/// up, accumulating statistics across attempts.
///
/// Restarting only helps when the inner strategy is randomized (for example
/// a [`RandomVariableHeuristic`]) so that attempts explore different parts
/// of the search space; with a deterministic inner strategy every attempt
/// repeats the last, and a policy that keeps asking for restarts will loop.
///
/// [`RandomVariableHeuristic`]: crate::solver::heuristics::variable::RandomVariableHeuristic
pub struct RestartingSearch<V: ValueEquality> {
    inner: Box<dyn SearchStrategy<V>>,
    policy: Box<dyn RestartPolicy>,
}

impl<V: ValueEquality> RestartingSearch<V> {
    pub fn new(inner: Box<dyn SearchStrategy<V>>, policy: Box<dyn RestartPolicy>) -> Self {
        Self { inner, policy }
    }
}

impl<V: ValueEquality> SearchStrategy<V> for RestartingSearch<V> {
    fn solve(&self, csp: &mut Csp<V>) -> (Option<Assignment<V>>, SearchStats) {
        let mut cumulative = SearchStats::default();

        loop {
            let (solution, attempt) = self.inner.solve(csp);
            cumulative.merge(&attempt);

            if solution.is_some() || !self.policy.should_restart(&attempt) {
                return (solution, cumulative);
            }
            debug!(backtracks = attempt.backtracks, "restarting search");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NoRestartPolicy, RestartAfterNBacktracks, RestartPolicy, RestartingSearch};
    use crate::solver::{
        constraints::not_equal::NotEqualConstraint,
        csp::Csp,
        domain::Domain,
        heuristics::variable::RandomVariableHeuristic,
        inference::Inference,
        search::{backtracking::BacktrackingSolver, SearchStrategy},
        stats::SearchStats,
        variable::Variable,
    };

    #[test]
    fn policies_inspect_backtrack_counts() {
        let stats = SearchStats {
            backtracks: 5,
            ..Default::default()
        };
        assert!(!NoRestartPolicy.should_restart(&stats));
        assert!(RestartAfterNBacktracks { max_backtracks: 5 }.should_restart(&stats));
        assert!(!RestartAfterNBacktracks { max_backtracks: 6 }.should_restart(&stats));
    }

    #[test]
    fn randomized_restarting_search_still_solves() {
        let variables: Vec<Variable> = ["A", "B", "C"].iter().map(|n| Variable::new(*n)).collect();
        let mut csp = Csp::new();
        for variable in &variables {
            csp.add_variable(variable.clone(), Domain::new([0, 1, 2]))
                .unwrap();
        }
        for (i, j) in [(0, 1), (1, 2), (0, 2)] {
            csp.add_constraint(NotEqualConstraint::new(
                variables[i].clone(),
                variables[j].clone(),
            ))
            .unwrap();
        }

        let inner = BacktrackingSolver::new()
            .with_variable_heuristic(Box::new(RandomVariableHeuristic))
            .with_inference(Inference::ForwardChecking);
        let search = RestartingSearch::new(
            Box::new(inner),
            Box::new(RestartAfterNBacktracks { max_backtracks: 1_000 }),
        );

        let (solution, _stats) = search.solve(&mut csp);
        assert!(solution.expect("a triangle is 3-colorable").is_solution(&csp));
    }
}
