//! Defines a collection of standard heuristics for selecting which variable
//! to branch on next during the search process.

use crate::solver::{
    assignment::Assignment, csp::Csp, value::ValueEquality, variable::Variable,
};

/// A trait for variable-selection heuristics.
///
/// Implementors of this trait define a strategy for choosing which unassigned
/// variable the solver should branch on next. A good heuristic can
/// dramatically improve solver performance.
pub trait VariableSelectionHeuristic<V: ValueEquality> {
    /// Selects the next variable to be assigned, or `None` when every
    /// variable is already bound.
    fn select_variable(&self, csp: &Csp<V>, assignment: &Assignment<V>) -> Option<Variable>;
}

/// Selects the first unassigned variable in declaration order.
///
/// This provides a basic, deterministic way to select variables.
pub struct SelectFirstHeuristic;

impl<V: ValueEquality> VariableSelectionHeuristic<V> for SelectFirstHeuristic {
    fn select_variable(&self, csp: &Csp<V>, assignment: &Assignment<V>) -> Option<Variable> {
        csp.variables()
            .iter()
            .find(|variable| !assignment.contains(variable))
            .cloned()
    }
}

/// Selects an unassigned variable at random.
/// This is particularly useful for restart strategies.
pub struct RandomVariableHeuristic;

impl<V: ValueEquality> VariableSelectionHeuristic<V> for RandomVariableHeuristic {
    fn select_variable(&self, csp: &Csp<V>, assignment: &Assignment<V>) -> Option<Variable> {
        use rand::seq::IteratorRandom;

        csp.variables()
            .iter()
            .filter(|variable| !assignment.contains(variable))
            .choose(&mut rand::thread_rng())
            .cloned()
    }
}

/// Selects the unassigned variable with the minimum remaining values in its
/// current domain.
///
/// This is a "fail-first" strategy that prioritizes the most constrained
/// variable, tackling the most difficult parts of the problem early. Ties go
/// to the variable declared first, which keeps the search deterministic.
pub struct MinimumRemainingValuesHeuristic;

impl<V: ValueEquality> VariableSelectionHeuristic<V> for MinimumRemainingValuesHeuristic {
    fn select_variable(&self, csp: &Csp<V>, assignment: &Assignment<V>) -> Option<Variable> {
        csp.variables()
            .iter()
            .filter(|variable| !assignment.contains(variable))
            .min_by_key(|variable| csp.domain(variable).len())
            .cloned()
    }
}

/// Minimum remaining values with the degree heuristic as tie-break: among
/// equally constrained variables, prefer the one involved with the most
/// unassigned, still-undecided neighbors.
pub struct MrvDegreeHeuristic;

impl<V: ValueEquality> VariableSelectionHeuristic<V> for MrvDegreeHeuristic {
    fn select_variable(&self, csp: &Csp<V>, assignment: &Assignment<V>) -> Option<Variable> {
        let unassigned: Vec<&Variable> = csp
            .variables()
            .iter()
            .filter(|variable| !assignment.contains(variable))
            .collect();
        let fewest = unassigned
            .iter()
            .map(|variable| csp.domain(variable).len())
            .min()?;

        unassigned
            .into_iter()
            .filter(|variable| csp.domain(variable).len() == fewest)
            .max_by_key(|variable| degree(variable, csp, assignment))
            .cloned()
    }
}

fn degree<V: ValueEquality>(
    variable: &Variable,
    csp: &Csp<V>,
    assignment: &Assignment<V>,
) -> usize {
    csp.constraints_on(variable)
        .filter_map(|constraint| csp.neighbor(variable, constraint))
        .filter(|neighbor| !assignment.contains(neighbor) && csp.domain(neighbor).len() > 1)
        .count()
}
