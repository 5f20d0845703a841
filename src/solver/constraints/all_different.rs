use std::collections::HashSet;

use crate::solver::{
    assignment::Assignment,
    constraint::{Constraint, ConstraintDescriptor},
    value::ValueEquality,
    variable::Variable,
};

/// An n-ary constraint requiring all variables in a set to take distinct
/// values.
///
/// Because its scope is larger than two, this constraint is outside the reach
/// of the binary propagation performed by the inference strategies: it is
/// enforced by the consistency checks of the search instead.
#[derive(Debug, Clone)]
pub struct AllDifferentConstraint {
    vars: Vec<Variable>,
}

impl AllDifferentConstraint {
    pub fn new(vars: Vec<Variable>) -> Self {
        Self { vars }
    }
}

impl<V: ValueEquality> Constraint<V> for AllDifferentConstraint {
    fn scope(&self) -> &[Variable] {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        let vars = self
            .vars
            .iter()
            .map(Variable::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        ConstraintDescriptor {
            name: "AllDifferentConstraint".to_string(),
            description: format!("AllDifferent({vars})"),
        }
    }

    fn is_satisfied_with(&self, assignment: &Assignment<V>) -> bool {
        let mut seen = HashSet::new();
        for variable in &self.vars {
            match assignment.get(variable) {
                Some(value) => {
                    if !seen.insert(value) {
                        return false;
                    }
                }
                None => return true,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::AllDifferentConstraint;
    use crate::solver::{assignment::Assignment, constraint::Constraint, variable::Variable};

    fn vars(names: &[&str]) -> Vec<Variable> {
        names.iter().map(|name| Variable::new(*name)).collect()
    }

    #[test]
    fn detects_duplicate_values() {
        let scope = vars(&["A", "B", "C"]);
        let constraint = AllDifferentConstraint::new(scope.clone());

        let mut assignment = Assignment::new();
        assignment.add(scope[0].clone(), 1);
        assignment.add(scope[1].clone(), 2);
        assignment.add(scope[2].clone(), 1);
        assert!(!Constraint::<i32>::is_satisfied_with(
            &constraint,
            &assignment
        ));

        assignment.add(scope[2].clone(), 3);
        assert!(Constraint::<i32>::is_satisfied_with(
            &constraint,
            &assignment
        ));
    }

    #[test]
    fn underbound_scope_is_not_rejected() {
        let scope = vars(&["A", "B", "C"]);
        let constraint = AllDifferentConstraint::new(scope.clone());

        let mut assignment = Assignment::new();
        assignment.add(scope[0].clone(), 1);
        assignment.add(scope[2].clone(), 2);
        // B is unbound, so the bound values alone cannot violate the rule.
        assert!(Constraint::<i32>::is_satisfied_with(
            &constraint,
            &assignment
        ));
    }
}
