use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::solver::{
    assignment::Assignment,
    constraint::Constraint,
    csp::{ConstraintId, Csp},
    domain::Domain,
    inference::{log::DomainLog, InferenceStrategy},
    stats::SearchStats,
    value::ValueEquality,
    variable::Variable,
    work_list::WorkList,
};

/// The AC-3 arc-consistency strategy.
///
/// A full [`apply`](InferenceStrategy::apply) establishes arc consistency
/// over every binary constraint of the CSP. The incremental
/// [`apply_assigned`](InferenceStrategy::apply_assigned) assumes the CSP is
/// *already* arc-consistent, collapses the just-assigned variable's domain to
/// the assigned value, and re-propagates only the affected region of the
/// constraint graph, which is strictly cheaper than a full pass. Calling the
/// incremental form on a CSP that is not arc-consistent violates its
/// precondition; debug builds assert it.
///
/// Unsatisfiability is never an error: it is reported through the returned
/// log's [`inconsistency_found`](DomainLog::inconsistency_found) flag, and
/// propagation stops as soon as a domain is wiped out.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ac3;

impl Ac3 {
    /// Whether every value in every domain has, for every binary constraint
    /// on its variable, at least one supporting value in the neighbor's
    /// domain.
    pub fn is_arc_consistent<V: ValueEquality>(csp: &Csp<V>) -> bool {
        csp.constraints().filter(|c| c.is_binary()).all(|constraint| {
            let scope = constraint.scope();
            [(&scope[0], &scope[1]), (&scope[1], &scope[0])]
                .into_iter()
                .all(|(target, source)| {
                    csp.domain(target)
                        .iter()
                        .all(|value| has_support(target, value, source, constraint, csp))
                })
        })
    }

    fn propagate<V: ValueEquality>(
        &self,
        mut work_list: WorkList,
        csp: &mut Csp<V>,
        log: &mut DomainLog<V>,
        stats: &mut SearchStats,
    ) {
        while let Some(variable) = work_list.pop_front() {
            let incident: Vec<ConstraintId> = csp.constraint_ids_on(&variable).to_vec();
            for id in incident {
                let constraint = Arc::clone(csp.constraint(id));
                if !constraint.is_binary() {
                    continue;
                }
                let Some(neighbor) = csp.neighbor(&variable, constraint.as_ref()) else {
                    continue;
                };
                let neighbor = neighbor.clone();
                if revise(&neighbor, &variable, constraint.as_ref(), id, csp, log, stats) {
                    if csp.domain(&neighbor).is_empty() {
                        debug!(variable = %neighbor, "domain wiped out during propagation");
                        log.set_empty_domain_found();
                        return;
                    }
                    // The neighbor's domain shrank, so every arc into it must
                    // be re-examined.
                    work_list.push_back(neighbor);
                }
            }
        }
    }
}

impl<V: ValueEquality> InferenceStrategy<V> for Ac3 {
    fn apply(&self, csp: &mut Csp<V>, stats: &mut SearchStats) -> DomainLog<V> {
        let mut log = DomainLog::new();
        let work_list: WorkList = csp.variables().iter().cloned().collect();
        self.propagate(work_list, csp, &mut log, stats);
        log.compact()
    }

    fn apply_assigned(
        &self,
        variable: &Variable,
        assignment: &Assignment<V>,
        csp: &mut Csp<V>,
        stats: &mut SearchStats,
    ) -> DomainLog<V> {
        debug_assert!(
            Ac3::is_arc_consistent(csp),
            "incremental propagation requires an arc-consistent starting point"
        );
        let Some(value) = assignment.get(variable) else {
            panic!("variable {variable} has no assigned value to propagate");
        };

        let mut log = DomainLog::new();
        let domain = csp.domain(variable);
        if !domain.contains(value) {
            log.set_empty_domain_found();
            return log.compact();
        }
        if domain.len() > 1 {
            log.store(variable, domain.clone());
            csp.set_domain(variable, Domain::new([value.clone()]));

            let mut work_list = WorkList::new();
            work_list.push_back(variable.clone());
            self.propagate(work_list, csp, &mut log, stats);
        }
        log.compact()
    }
}

/// Prunes from `target`'s domain every value with no supporting value in
/// `source`'s domain under `constraint`. The pre-pass domain is snapshotted
/// into `log` before the first removal. Returns whether the domain shrank.
pub(crate) fn revise<V: ValueEquality>(
    target: &Variable,
    source: &Variable,
    constraint: &dyn Constraint<V>,
    id: ConstraintId,
    csp: &mut Csp<V>,
    log: &mut DomainLog<V>,
    stats: &mut SearchStats,
) -> bool {
    let started = Instant::now();
    let counters = stats.constraint_stats.entry(id).or_default();
    counters.revisions += 1;

    let mut unsupported = Vec::new();
    for value in csp.domain(target).iter() {
        if !has_support(target, value, source, constraint, csp) {
            unsupported.push(value.clone());
        }
    }

    let revised = !unsupported.is_empty();
    if revised {
        counters.prunings += 1;
        log.store(target, csp.domain(target).clone());
        for value in &unsupported {
            csp.remove_value(target, value);
        }
        debug!(variable = %target, removed = unsupported.len(), "revised domain");
    }
    counters.time_spent_micros += started.elapsed().as_micros() as u64;
    revised
}

fn has_support<V: ValueEquality>(
    target: &Variable,
    value: &V,
    source: &Variable,
    constraint: &dyn Constraint<V>,
    csp: &Csp<V>,
) -> bool {
    let mut pair = Assignment::new();
    pair.add(target.clone(), value.clone());
    csp.domain(source).iter().any(|candidate| {
        pair.add(source.clone(), candidate.clone());
        constraint.is_satisfied_with(&pair)
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Ac3;
    use crate::solver::{
        assignment::Assignment,
        constraints::{
            all_different::AllDifferentConstraint, equal::EqualConstraint,
            not_equal::NotEqualConstraint,
        },
        csp::Csp,
        domain::Domain,
        inference::InferenceStrategy,
        stats::SearchStats,
        variable::Variable,
    };

    fn not_equal_pair(x_values: &[i32], y_values: &[i32]) -> (Csp<i32>, Variable, Variable) {
        let x = Variable::new("X");
        let y = Variable::new("Y");
        let mut csp = Csp::new();
        csp.add_variable(x.clone(), Domain::new(x_values.iter().copied()))
            .unwrap();
        csp.add_variable(y.clone(), Domain::new(y_values.iter().copied()))
            .unwrap();
        csp.add_constraint(NotEqualConstraint::new(x.clone(), y.clone()))
            .unwrap();
        (csp, x, y)
    }

    #[test]
    fn already_consistent_csp_is_untouched() {
        let (mut csp, x, y) = not_equal_pair(&[1, 2], &[1, 2]);
        let log = Ac3.apply(&mut csp, &mut SearchStats::default());

        assert!(log.is_empty());
        assert!(!log.inconsistency_found());
        assert_eq!(csp.domain(&x).values(), &[1, 2]);
        assert_eq!(csp.domain(&y).values(), &[1, 2]);
    }

    #[test]
    fn prunes_values_without_support() {
        let (mut csp, _, y) = not_equal_pair(&[1], &[1, 2]);
        let log = Ac3.apply(&mut csp, &mut SearchStats::default());

        assert!(!log.inconsistency_found());
        assert_eq!(csp.domain(&y).values(), &[2]);
        assert!(Ac3::is_arc_consistent(&csp));

        log.undo(&mut csp);
        assert_eq!(csp.domain(&y).values(), &[1, 2]);
    }

    #[test]
    fn propagates_along_equality_chains() {
        let x = Variable::new("X");
        let y = Variable::new("Y");
        let z = Variable::new("Z");
        let mut csp = Csp::new();
        csp.add_variable(x.clone(), Domain::new([1, 2, 3])).unwrap();
        csp.add_variable(y.clone(), Domain::new([2, 3])).unwrap();
        csp.add_variable(z.clone(), Domain::new([3])).unwrap();
        csp.add_constraint(EqualConstraint::new(x.clone(), y.clone()))
            .unwrap();
        csp.add_constraint(EqualConstraint::new(y.clone(), z.clone()))
            .unwrap();

        let log = Ac3.apply(&mut csp, &mut SearchStats::default());
        assert!(!log.inconsistency_found());
        assert_eq!(csp.domain(&x).values(), &[3]);
        assert_eq!(csp.domain(&y).values(), &[3]);
        assert_eq!(csp.domain(&z).values(), &[3]);
    }

    #[test]
    fn reports_contradictions_through_the_log() {
        let (mut csp, x, y) = not_equal_pair(&[1], &[1]);
        let before_x = csp.domain(&x).clone();
        let before_y = csp.domain(&y).clone();

        let log = Ac3.apply(&mut csp, &mut SearchStats::default());
        assert!(log.inconsistency_found());

        log.undo(&mut csp);
        assert_eq!(csp.domain(&x), &before_x);
        assert_eq!(csp.domain(&y), &before_y);
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let (mut csp, _, _) = not_equal_pair(&[1], &[1, 2]);

        let first = Ac3.apply(&mut csp, &mut SearchStats::default());
        assert!(!first.is_empty());

        let second = Ac3.apply(&mut csp, &mut SearchStats::default());
        assert!(second.is_empty());
        assert!(!second.inconsistency_found());
    }

    #[test]
    fn incremental_pass_narrows_only_the_affected_region() {
        let (mut csp, x, y) = not_equal_pair(&[1, 2], &[1, 2]);
        let mut assignment = Assignment::new();
        assignment.add(x.clone(), 1);

        let log = Ac3.apply_assigned(&x, &assignment, &mut csp, &mut SearchStats::default());
        assert!(!log.inconsistency_found());
        assert_eq!(csp.domain(&x).values(), &[1]);
        assert_eq!(csp.domain(&y).values(), &[2]);

        log.undo(&mut csp);
        assert_eq!(csp.domain(&x).values(), &[1, 2]);
        assert_eq!(csp.domain(&y).values(), &[1, 2]);
    }

    #[test]
    fn incremental_pass_flags_values_outside_the_domain() {
        let (mut csp, x, _) = not_equal_pair(&[2], &[1, 3]);

        let mut assignment = Assignment::new();
        assignment.add(x.clone(), 1);

        let log = Ac3.apply_assigned(&x, &assignment, &mut csp, &mut SearchStats::default());
        assert!(log.inconsistency_found());
        assert!(log.is_empty());
    }

    #[test]
    fn non_binary_constraints_are_not_propagated() {
        let a = Variable::new("A");
        let b = Variable::new("B");
        let c = Variable::new("C");
        let mut csp = Csp::new();
        for variable in [&a, &b, &c] {
            csp.add_variable(variable.clone(), Domain::new([1, 2]))
                .unwrap();
        }
        csp.add_constraint(AllDifferentConstraint::new(vec![a.clone(), b, c]))
            .unwrap();

        // Three variables over two values cannot be all-different, but the
        // constraint is not binary, so AC-3 leaves the domains alone.
        let log = Ac3.apply(&mut csp, &mut SearchStats::default());
        assert!(log.is_empty());
        assert_eq!(csp.domain(&a).values(), &[1, 2]);
    }
}
