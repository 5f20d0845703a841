use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::debug;

use crate::solver::{
    assignment::Assignment,
    constraint::Constraint,
    csp::{ConstraintId, Csp},
    inference::{ac3, log::DomainLog},
    listener::{ListenerId, ListenerSet},
    search::SearchStrategy,
    stats::SearchStats,
    value::ValueEquality,
    variable::Variable,
};

/// A linear-time solver for tree-structured binary CSPs.
///
/// The variables are ordered topologically from a root, arc consistency is
/// established bottom-up along every parent arc, and a solution is then read
/// off top-down by greedily picking a consistent value per variable. If the
/// problem has a solution this finds one; if not, a contradiction surfaces
/// during the bottom-up sweep. Domain pruning happens on the shared CSP and
/// is undone on failure.
///
/// # Panics
///
/// Requires a connected, acyclic constraint graph built from binary
/// constraints only. Violating any of these is an invariant violation and
/// panics.
pub struct TreeCspSolver<V: ValueEquality> {
    use_random_root: bool,
    listeners: ListenerSet<V>,
}

impl<V: ValueEquality> TreeCspSolver<V> {
    pub fn new() -> Self {
        Self {
            use_random_root: false,
            listeners: ListenerSet::new(),
        }
    }

    /// Picks the topological-sort root at random instead of using the first
    /// declared variable.
    pub fn use_random_root(mut self, enabled: bool) -> Self {
        self.use_random_root = enabled;
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
}

impl<V: ValueEquality> Default for TreeCspSolver<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ValueEquality> SearchStrategy<V> for TreeCspSolver<V> {
    fn solve(&self, csp: &mut Csp<V>) -> (Option<Assignment<V>>, SearchStats) {
        let mut stats = SearchStats::default();
        if csp.variables().is_empty() {
            return (Some(Assignment::new()), stats);
        }

        let root = if self.use_random_root {
            csp.variables()
                .choose(&mut rand::thread_rng())
                .expect("variables are non-empty")
                .clone()
        } else {
            csp.variables()[0].clone()
        };
        if csp.domain(&root).is_empty() {
            return (None, stats);
        }

        let (ordered, parent_constraints) = topological_sort(csp, &root);

        // Bottom-up: make every parent arc-consistent with its child.
        let mut log = DomainLog::new();
        for variable in ordered.iter().skip(1).rev() {
            let id = parent_constraints[variable];
            let constraint = Arc::clone(csp.constraint(id));
            let parent = csp
                .neighbor(variable, constraint.as_ref())
                .expect("parent arcs are binary")
                .clone();
            if ac3::revise(
                &parent,
                variable,
                constraint.as_ref(),
                id,
                csp,
                &mut log,
                &mut stats,
            ) {
                self.listeners.notify(csp, None, Some(&parent));
                if csp.domain(&parent).is_empty() {
                    debug!(variable = %parent, "tree is unsatisfiable");
                    log.undo(csp);
                    return (None, stats);
                }
            }
        }

        // Top-down: greedily pick a value consistent with the parent.
        let mut assignment = Assignment::new();
        for variable in &ordered {
            stats.nodes_visited += 1;
            let values: Vec<V> = csp.domain(variable).iter().cloned().collect();
            let mut assigned = false;
            for value in values {
                assignment.add(variable.clone(), value);
                if assignment.is_consistent(csp.constraints_on(variable)) {
                    self.listeners.notify(csp, Some(&assignment), Some(variable));
                    assigned = true;
                    break;
                }
            }
            if !assigned {
                assignment.remove(variable);
                log.undo(csp);
                return (None, stats);
            }
        }
        (Some(assignment), stats)
    }
}

/// Orders the variables so that every variable appears after its parent,
/// and maps each non-root variable to the constraint linking it to its
/// parent.
///
/// # Panics
///
/// Panics if a constraint is not binary, the graph has a cycle, or the
/// graph is not connected.
fn topological_sort<V: ValueEquality>(
    csp: &Csp<V>,
    root: &Variable,
) -> (Vec<Variable>, HashMap<Variable, ConstraintId>) {
    let mut ordered = vec![root.clone()];
    let mut visited: HashSet<Variable> = HashSet::from([root.clone()]);
    let mut parent_constraints: HashMap<Variable, ConstraintId> = HashMap::new();

    let mut next = 0;
    while next < ordered.len() {
        let parent = ordered[next].clone();
        next += 1;

        let mut arcs_pointing_upwards = 0;
        for &id in csp.constraint_ids_on(&parent) {
            let constraint = csp.constraint(id);
            let Some(neighbor) = csp.neighbor(&parent, constraint.as_ref()) else {
                panic!(
                    "constraint `{}` is not binary",
                    constraint.descriptor().description
                );
            };
            if visited.contains(neighbor) {
                arcs_pointing_upwards += 1;
                assert!(
                    arcs_pointing_upwards <= 1,
                    "constraint graph contains a cycle"
                );
            } else {
                let neighbor = neighbor.clone();
                visited.insert(neighbor.clone());
                parent_constraints.insert(neighbor.clone(), id);
                ordered.push(neighbor);
            }
        }
    }

    assert_eq!(
        ordered.len(),
        csp.variables().len(),
        "constraint graph is not connected"
    );
    (ordered, parent_constraints)
}
