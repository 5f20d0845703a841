use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::solver::{
    assignment::Assignment,
    constraint::Constraint,
    csp::{ConstraintId, Csp},
    inference::{log::DomainLog, InferenceStrategy},
    stats::SearchStats,
    value::ValueEquality,
    variable::Variable,
};

/// The forward-checking strategy.
///
/// Forward checking acts only reactively: the full
/// [`apply`](InferenceStrategy::apply) pass is the identity, and the
/// incremental pass prunes, for every binary constraint on the just-assigned
/// variable, the values of the still-unassigned neighbor that conflict with
/// the assigned value. No further propagation is performed, which makes this
/// strictly weaker, and cheaper per call, than AC-3.
///
/// Constraints of arity greater than two are ignored by this strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardChecking;

impl<V: ValueEquality> InferenceStrategy<V> for ForwardChecking {
    fn apply(&self, _csp: &mut Csp<V>, _stats: &mut SearchStats) -> DomainLog<V> {
        DomainLog::new()
    }

    fn apply_assigned(
        &self,
        variable: &Variable,
        assignment: &Assignment<V>,
        csp: &mut Csp<V>,
        stats: &mut SearchStats,
    ) -> DomainLog<V> {
        let Some(value) = assignment.get(variable) else {
            panic!("variable {variable} has no assigned value to check against");
        };

        let mut log = DomainLog::new();
        let incident: Vec<ConstraintId> = csp.constraint_ids_on(variable).to_vec();
        for id in incident {
            let constraint = Arc::clone(csp.constraint(id));
            if !constraint.is_binary() {
                continue;
            }
            let Some(neighbor) = csp.neighbor(variable, constraint.as_ref()) else {
                continue;
            };
            let neighbor = neighbor.clone();
            if assignment.contains(&neighbor) {
                continue;
            }

            let started = Instant::now();
            let counters = stats.constraint_stats.entry(id).or_default();
            counters.revisions += 1;

            let mut pair = Assignment::new();
            pair.add(variable.clone(), value.clone());
            let mut conflicting = Vec::new();
            for candidate in csp.domain(&neighbor).iter() {
                pair.add(neighbor.clone(), candidate.clone());
                if !constraint.is_satisfied_with(&pair) {
                    conflicting.push(candidate.clone());
                }
            }

            if !conflicting.is_empty() {
                counters.prunings += 1;
                log.store(&neighbor, csp.domain(&neighbor).clone());
                for candidate in &conflicting {
                    csp.remove_value(&neighbor, candidate);
                }
                debug!(variable = %neighbor, removed = conflicting.len(), "forward check pruned domain");
            }
            counters.time_spent_micros += started.elapsed().as_micros() as u64;

            if csp.domain(&neighbor).is_empty() {
                log.set_empty_domain_found();
                return log.compact();
            }
        }
        log.compact()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::ForwardChecking;
    use crate::solver::{
        assignment::Assignment,
        constraints::{all_different::AllDifferentConstraint, not_equal::NotEqualConstraint},
        csp::Csp,
        domain::Domain,
        inference::InferenceStrategy,
        stats::SearchStats,
        variable::Variable,
    };

    fn chain() -> (Csp<i32>, Vec<Variable>) {
        // A - B - C, all pairwise-adjacent values in {1, 2}.
        let variables: Vec<Variable> = ["A", "B", "C"].iter().map(|n| Variable::new(*n)).collect();
        let mut csp = Csp::new();
        for variable in &variables {
            csp.add_variable(variable.clone(), Domain::new([1, 2]))
                .unwrap();
        }
        csp.add_constraint(NotEqualConstraint::new(
            variables[0].clone(),
            variables[1].clone(),
        ))
        .unwrap();
        csp.add_constraint(NotEqualConstraint::new(
            variables[1].clone(),
            variables[2].clone(),
        ))
        .unwrap();
        (csp, variables)
    }

    #[test]
    fn full_pass_is_the_identity() {
        let (mut csp, variables) = chain();
        let log = ForwardChecking.apply(&mut csp, &mut SearchStats::default());

        assert!(log.is_empty());
        for variable in &variables {
            assert_eq!(csp.domain(variable).len(), 2);
        }
    }

    #[test]
    fn prunes_unassigned_neighbors_only() {
        let (mut csp, variables) = chain();
        let (a, b, c) = (&variables[0], &variables[1], &variables[2]);

        let mut assignment = Assignment::new();
        assignment.add(b.clone(), 1);

        let log =
            ForwardChecking.apply_assigned(b, &assignment, &mut csp, &mut SearchStats::default());
        assert!(!log.inconsistency_found());
        // Both neighbors of B lose the assigned value; B itself is untouched.
        assert_eq!(csp.domain(a).values(), &[2]);
        assert_eq!(csp.domain(c).values(), &[2]);
        assert_eq!(csp.domain(b).values(), &[1, 2]);

        log.undo(&mut csp);
        assert_eq!(csp.domain(a).values(), &[1, 2]);
        assert_eq!(csp.domain(c).values(), &[1, 2]);
    }

    #[test]
    fn assigned_neighbors_are_skipped() {
        let (mut csp, variables) = chain();
        let (a, b) = (&variables[0], &variables[1]);

        let mut assignment = Assignment::new();
        assignment.add(a.clone(), 1);
        assignment.add(b.clone(), 2);

        let log =
            ForwardChecking.apply_assigned(b, &assignment, &mut csp, &mut SearchStats::default());
        // A is already assigned, so its domain is left alone.
        assert_eq!(csp.domain(a).values(), &[1, 2]);
        assert_eq!(csp.domain(&variables[2]).values(), &[1]);
        log.undo(&mut csp);
    }

    #[test]
    fn wiping_out_a_neighbor_is_flagged() {
        let x = Variable::new("X");
        let y = Variable::new("Y");
        let mut csp = Csp::new();
        csp.add_variable(x.clone(), Domain::new([1])).unwrap();
        csp.add_variable(y.clone(), Domain::new([1])).unwrap();
        csp.add_constraint(NotEqualConstraint::new(x.clone(), y.clone()))
            .unwrap();

        let mut assignment = Assignment::new();
        assignment.add(x.clone(), 1);

        let log =
            ForwardChecking.apply_assigned(&x, &assignment, &mut csp, &mut SearchStats::default());
        assert!(log.inconsistency_found());
        assert!(csp.domain(&y).is_empty());

        log.undo(&mut csp);
        assert_eq!(csp.domain(&y).values(), &[1]);
    }

    #[test]
    fn ignores_non_binary_constraints() {
        let variables: Vec<Variable> = ["A", "B", "C"].iter().map(|n| Variable::new(*n)).collect();
        let mut csp = Csp::new();
        for variable in &variables {
            csp.add_variable(variable.clone(), Domain::new([1, 2, 3]))
                .unwrap();
        }
        csp.add_constraint(AllDifferentConstraint::new(variables.clone()))
            .unwrap();

        let mut assignment = Assignment::new();
        assignment.add(variables[0].clone(), 1);

        let log = ForwardChecking.apply_assigned(
            &variables[0],
            &assignment,
            &mut csp,
            &mut SearchStats::default(),
        );
        assert!(log.is_empty());
        assert_eq!(csp.domain(&variables[1]).len(), 3);
    }
}
