use tracing::debug;

use crate::solver::{
    assignment::Assignment,
    csp::Csp,
    heuristics::{
        value::{IdentityValueHeuristic, ValueOrderingHeuristic},
        variable::{SelectFirstHeuristic, VariableSelectionHeuristic},
    },
    inference::{Inference, InferenceStrategy},
    listener::{ListenerId, ListenerSet},
    search::SearchStrategy,
    stats::SearchStats,
    value::ValueEquality,
    variable::Variable,
};

/// Systematic backtracking search with pluggable inference.
///
/// The search repeatedly selects an unassigned variable (variable-selection
/// heuristic), tries the candidate values of its current domain in order
/// (value-ordering heuristic), and after each tentative assignment runs the
/// configured inference strategy. A branch whose inference reports a
/// contradiction is abandoned: the inference pass is undone, the assignment
/// retracted, and the next candidate tried. When the candidates are
/// exhausted the search backtracks to the caller.
///
/// Every branch undoes its own domain narrowing on the way out, so the CSP
/// outside the current recursion path always looks exactly as its caller
/// left it. Only the final successful leaf keeps its narrowing.
pub struct BacktrackingSolver<V: ValueEquality> {
    variable_heuristic: Box<dyn VariableSelectionHeuristic<V>>,
    value_heuristic: Box<dyn ValueOrderingHeuristic<V>>,
    inference: Box<dyn InferenceStrategy<V>>,
    listeners: ListenerSet<V>,
}

impl<V: ValueEquality> BacktrackingSolver<V> {
    /// Creates a solver with first-unassigned variable selection, natural
    /// value order, and no inference, i.e. plain chronological backtracking.
    pub fn new() -> Self {
        Self {
            variable_heuristic: Box::new(SelectFirstHeuristic),
            value_heuristic: Box::new(IdentityValueHeuristic),
            inference: Inference::None.strategy(),
            listeners: ListenerSet::new(),
        }
    }

    pub fn with_variable_heuristic(
        mut self,
        heuristic: Box<dyn VariableSelectionHeuristic<V>>,
    ) -> Self {
        self.variable_heuristic = heuristic;
        self
    }

    pub fn with_value_heuristic(mut self, heuristic: Box<dyn ValueOrderingHeuristic<V>>) -> Self {
        self.value_heuristic = heuristic;
        self
    }

    /// Selects the propagation run after every tentative assignment.
    pub fn with_inference(mut self, inference: Inference) -> Self {
        self.inference = inference.strategy();
        self
    }

    pub fn add_listener(
        &mut self,
        callback: impl Fn(&Csp<V>, Option<&Assignment<V>>, Option<&Variable>) + 'static,
    ) -> ListenerId {
        self.listeners.add(callback)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    fn backtrack(
        &self,
        csp: &mut Csp<V>,
        assignment: &mut Assignment<V>,
        stats: &mut SearchStats,
    ) -> bool {
        stats.nodes_visited += 1;

        if assignment.is_complete(csp.variables()) {
            // The consistency checks along the path make this redundant for
            // binary constraints, but higher-arity constraints are only
            // guaranteed here.
            return assignment.is_solution(csp);
        }

        let Some(variable) = self.variable_heuristic.select_variable(csp, assignment) else {
            return assignment.is_solution(csp);
        };

        for value in self.value_heuristic.order_values(csp, &variable) {
            assignment.add(variable.clone(), value);
            self.listeners.notify(csp, Some(assignment), Some(&variable));

            if assignment.is_consistent(csp.constraints_on(&variable)) {
                let log = self
                    .inference
                    .apply_assigned(&variable, assignment, csp, stats);
                if !log.is_empty() {
                    self.listeners.notify(csp, Some(assignment), Some(&variable));
                }
                if !log.inconsistency_found() && self.backtrack(csp, assignment, stats) {
                    return true;
                }
                log.undo(csp);
            }

            assignment.remove(&variable);
            stats.backtracks += 1;
        }

        debug!(variable = %variable, "exhausted candidate values");
        false
    }
}

impl<V: ValueEquality> Default for BacktrackingSolver<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ValueEquality> SearchStrategy<V> for BacktrackingSolver<V> {
    fn solve(&self, csp: &mut Csp<V>) -> (Option<Assignment<V>>, SearchStats) {
        let mut stats = SearchStats::default();

        let root_log = self.inference.apply(csp, &mut stats);
        if !root_log.is_empty() {
            self.listeners.notify(csp, None, None);
        }
        if root_log.inconsistency_found() {
            root_log.undo(csp);
            return (None, stats);
        }

        let mut assignment = Assignment::new();
        if self.backtrack(csp, &mut assignment, &mut stats) {
            debug!(nodes = stats.nodes_visited, "search found a solution");
            (Some(assignment), stats)
        } else {
            debug!(nodes = stats.nodes_visited, "search space exhausted");
            root_log.undo(csp);
            (None, stats)
        }
    }
}
