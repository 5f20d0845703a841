pub mod backtracking;
pub mod min_conflicts;
pub mod restart;
pub mod tree;

use crate::solver::{
    assignment::Assignment, csp::Csp, stats::SearchStats, value::ValueEquality,
};

/// A complete solving strategy over a CSP.
///
/// `solve` drives the shared, mutable domain store of `csp` for the duration
/// of one invocation. On every exit path except a successful one, the CSP is
/// left exactly as the caller handed it over; a success may legitimately
/// leave domains narrowed along the solution path.
///
/// A `None` result means no solution was found. For systematic strategies
/// that is a proof of unsatisfiability; for bounded local search it only
/// means the step budget ran out.
pub trait SearchStrategy<V: ValueEquality> {
    fn solve(&self, csp: &mut Csp<V>) -> (Option<Assignment<V>>, SearchStats);
}
