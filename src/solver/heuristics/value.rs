use crate::solver::{
    assignment::Assignment, constraint::Constraint, csp::Csp, value::ValueEquality,
    variable::Variable,
};

/// A trait for strategies that determine the order of values to try for a
/// variable.
pub trait ValueOrderingHeuristic<V: ValueEquality> {
    /// The values of `variable`'s *current* domain, in the order the search
    /// should try them.
    fn order_values(&self, csp: &Csp<V>, variable: &Variable) -> Vec<V>;
}

/// A simple heuristic that returns values in their natural domain order.
pub struct IdentityValueHeuristic;

impl<V: ValueEquality> ValueOrderingHeuristic<V> for IdentityValueHeuristic {
    fn order_values(&self, csp: &Csp<V>, variable: &Variable) -> Vec<V> {
        csp.domain(variable).iter().cloned().collect()
    }
}

/// The least-constraining-value heuristic: try first the value that rules
/// out the fewest choices for the variable's binary neighbors.
///
/// Ties keep the domain order, so the ordering stays deterministic.
pub struct LeastConstrainingValueHeuristic;

impl<V: ValueEquality> ValueOrderingHeuristic<V> for LeastConstrainingValueHeuristic {
    fn order_values(&self, csp: &Csp<V>, variable: &Variable) -> Vec<V> {
        let mut scored: Vec<(V, usize)> = csp
            .domain(variable)
            .iter()
            .map(|value| (value.clone(), lost_values(variable, value, csp)))
            .collect();
        scored.sort_by_key(|(_, lost)| *lost);
        scored.into_iter().map(|(value, _)| value).collect()
    }
}

/// Counts how many neighbor-domain values become unusable when `variable`
/// takes `value`.
fn lost_values<V: ValueEquality>(variable: &Variable, value: &V, csp: &Csp<V>) -> usize {
    let mut pair = Assignment::new();
    pair.add(variable.clone(), value.clone());

    let mut lost = 0;
    for constraint in csp.constraints_on(variable) {
        if !constraint.is_binary() {
            continue;
        }
        let Some(neighbor) = csp.neighbor(variable, constraint) else {
            continue;
        };
        for candidate in csp.domain(neighbor).iter() {
            pair.add(neighbor.clone(), candidate.clone());
            if !constraint.is_satisfied_with(&pair) {
                lost += 1;
            }
        }
        pair.remove(neighbor);
    }
    lost
}
