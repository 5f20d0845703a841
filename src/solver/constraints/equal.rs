use crate::solver::{
    assignment::Assignment,
    constraint::{Constraint, ConstraintDescriptor},
    value::ValueEquality,
    variable::Variable,
};

/// A binary constraint requiring two variables to take the same value.
#[derive(Debug, Clone)]
pub struct EqualConstraint {
    vars: [Variable; 2],
}

impl EqualConstraint {
    pub fn new(a: Variable, b: Variable) -> Self {
        Self { vars: [a, b] }
    }
}

impl<V: ValueEquality> Constraint<V> for EqualConstraint {
    fn scope(&self) -> &[Variable] {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "EqualConstraint".to_string(),
            description: format!("{} == {}", self.vars[0], self.vars[1]),
        }
    }

    fn is_satisfied_with(&self, assignment: &Assignment<V>) -> bool {
        match (assignment.get(&self.vars[0]), assignment.get(&self.vars[1])) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }
}
