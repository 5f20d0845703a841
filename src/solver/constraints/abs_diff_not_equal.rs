use crate::solver::{
    assignment::Assignment,
    constraint::{Constraint, ConstraintDescriptor},
    value::ValueArithmetic,
    variable::Variable,
};

/// A binary constraint enforcing `abs(X - Y) != C`.
///
/// This constraint is specialized for values that support arithmetic. The
/// classic use is the diagonal attack rule of n-queens, where `C` is the
/// column distance between two queens.
#[derive(Debug, Clone)]
pub struct AbsoluteDifferenceNotEqualConstraint<V: ValueArithmetic> {
    vars: [Variable; 2],
    difference: V,
}

impl<V: ValueArithmetic> AbsoluteDifferenceNotEqualConstraint<V> {
    pub fn new(x: Variable, y: Variable, difference: V) -> Self {
        Self {
            vars: [x, y],
            difference,
        }
    }
}

impl<V: ValueArithmetic> Constraint<V> for AbsoluteDifferenceNotEqualConstraint<V> {
    fn scope(&self) -> &[Variable] {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "AbsDiffNotEqualConstraint".to_string(),
            description: format!(
                "abs({} - {}) != {:?}",
                self.vars[0], self.vars[1], self.difference
            ),
        }
    }

    fn is_satisfied_with(&self, assignment: &Assignment<V>) -> bool {
        match (assignment.get(&self.vars[0]), assignment.get(&self.vars[1])) {
            (Some(a), Some(b)) => a.sub(b).abs() != self.difference,
            _ => true,
        }
    }
}
