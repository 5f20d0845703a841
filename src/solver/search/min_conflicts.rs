use std::collections::HashSet;

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_core::RngCore;
use tracing::debug;

use crate::solver::{
    assignment::Assignment,
    constraint::Constraint,
    csp::Csp,
    listener::{ListenerId, ListenerSet},
    search::SearchStrategy,
    stats::SearchStats,
    value::ValueEquality,
    variable::Variable,
};

/// Min-conflicts local repair.
///
/// Starting from a complete assignment built greedily (each variable takes a
/// least-conflicting value, ties broken at random), the solver repeatedly
/// picks a uniformly random variable that participates in a violated
/// constraint and reassigns it to the value of its domain that violates the
/// fewest constraints, again breaking ties at random. It stops as soon as
/// the assignment satisfies every constraint, or gives up once the step
/// bound is spent.
///
/// The algorithm is incomplete: exhausting the step bound does *not* prove
/// the problem unsatisfiable, it only means no solution was found within the
/// budget. Domains are never modified.
pub struct MinConflictsSolver<V: ValueEquality> {
    max_steps: u64,
    seed: Option<u64>,
    listeners: ListenerSet<V>,
}

impl<V: ValueEquality> MinConflictsSolver<V> {
    pub fn new(max_steps: u64) -> Self {
        Self {
            max_steps,
            seed: None,
            listeners: ListenerSet::new(),
        }
    }

    /// Fixes the RNG seed, making repair runs reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
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

    /// Runs the repair loop with a caller-provided RNG.
    pub fn solve_with_rng(
        &self,
        csp: &mut Csp<V>,
        rng: &mut dyn RngCore,
    ) -> (Option<Assignment<V>>, SearchStats) {
        let mut stats = SearchStats::default();

        // An empty domain admits no complete assignment at all.
        if csp
            .variables()
            .iter()
            .any(|variable| csp.domain(variable).is_empty())
        {
            return (None, stats);
        }

        let mut current = initial_assignment(csp, rng);
        self.listeners.notify(csp, Some(&current), None);

        for _ in 0..self.max_steps {
            if current.is_solution(csp) {
                return (Some(current), stats);
            }
            stats.repair_steps += 1;

            let variable = choose_conflicted_variable(csp, &current, rng);
            let value = min_conflict_value(&variable, &current, csp, rng);
            current.add(variable.clone(), value);
            self.listeners.notify(csp, Some(&current), Some(&variable));
        }

        if current.is_solution(csp) {
            return (Some(current), stats);
        }
        debug!(steps = self.max_steps, "step bound spent without reaching zero conflicts");
        (None, stats)
    }
}

impl<V: ValueEquality> SearchStrategy<V> for MinConflictsSolver<V> {
    fn solve(&self, csp: &mut Csp<V>) -> (Option<Assignment<V>>, SearchStats) {
        let mut rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        self.solve_with_rng(csp, &mut rng)
    }
}

/// Builds a complete assignment greedily, giving each variable in turn a
/// least-conflicting value with respect to the bindings made so far.
fn initial_assignment<V: ValueEquality>(csp: &Csp<V>, rng: &mut dyn RngCore) -> Assignment<V> {
    let mut assignment = Assignment::new();
    for variable in csp.variables() {
        let value = min_conflict_value(variable, &assignment, csp, rng);
        assignment.add(variable.clone(), value);
    }
    assignment
}

/// A uniformly random variable among those involved in a violated
/// constraint.
fn choose_conflicted_variable<V: ValueEquality>(
    csp: &Csp<V>,
    assignment: &Assignment<V>,
    rng: &mut dyn RngCore,
) -> Variable {
    let mut conflicted = HashSet::new();
    for constraint in csp.constraints() {
        if !constraint.is_satisfied_with(assignment) {
            conflicted.extend(constraint.scope().iter().cloned());
        }
    }
    let ordered: Vec<&Variable> = csp
        .variables()
        .iter()
        .filter(|variable| conflicted.contains(*variable))
        .collect();
    let choice = ordered
        .choose(rng)
        .expect("a complete non-solution assignment has a conflicted variable");
    (*choice).clone()
}

/// The domain value of `variable` violating the fewest incident constraints
/// under `assignment`; ties are broken at random.
fn min_conflict_value<V: ValueEquality>(
    variable: &Variable,
    assignment: &Assignment<V>,
    csp: &Csp<V>,
    rng: &mut dyn RngCore,
) -> V {
    let mut candidates: Vec<V> = csp.domain(variable).iter().cloned().collect();
    candidates.shuffle(rng);
    candidates
        .into_iter()
        .min_by_key(|value| conflicts(variable, value, assignment, csp))
        .expect("domains were checked non-empty before repair")
}

/// Counts the incident constraints violated when `variable` takes `value`,
/// the other variables keeping their bindings in `assignment`.
fn conflicts<V: ValueEquality>(
    variable: &Variable,
    value: &V,
    assignment: &Assignment<V>,
    csp: &Csp<V>,
) -> usize {
    let mut probe = assignment.clone();
    probe.add(variable.clone(), value.clone());
    csp.constraints_on(variable)
        .filter(|constraint| !constraint.is_satisfied_with(&probe))
        .count()
}
