//! The n-queens puzzle: place `n` queens on an `n x n` board so that no two
//! attack each other.
//!
//! One variable per column, the value being the queen's row. Two queens may
//! not share a row, and may not sit on a common diagonal; the latter is an
//! absolute-difference constraint over the column distance.

use crate::solver::{
    assignment::Assignment,
    constraints::{
        abs_diff_not_equal::AbsoluteDifferenceNotEqualConstraint, not_equal::NotEqualConstraint,
    },
    csp::Csp,
    domain::Domain,
    value::StandardValue,
    variable::Variable,
};

pub fn n_queens(n: usize) -> Csp<StandardValue> {
    let columns: Vec<Variable> = (0..n).map(|i| Variable::new(format!("Q{i}"))).collect();

    let mut csp = Csp::new();
    for column in &columns {
        csp.add_variable(
            column.clone(),
            Domain::new((0..n as i64).map(StandardValue::Int)),
        )
        .expect("column names are unique");
    }
    for i in 0..n {
        for j in (i + 1)..n {
            csp.add_constraint(NotEqualConstraint::new(
                columns[i].clone(),
                columns[j].clone(),
            ))
            .expect("columns are registered");
            csp.add_constraint(AbsoluteDifferenceNotEqualConstraint::new(
                columns[i].clone(),
                columns[j].clone(),
                StandardValue::Int((j - i) as i64),
            ))
            .expect("columns are registered");
        }
    }
    csp
}

/// The queens' rows in column order, if every column is assigned.
pub fn rows(csp: &Csp<StandardValue>, assignment: &Assignment<StandardValue>) -> Option<Vec<i64>> {
    csp.variables()
        .iter()
        .map(|column| match assignment.get(column) {
            Some(StandardValue::Int(row)) => Some(*row),
            _ => None,
        })
        .collect()
}
