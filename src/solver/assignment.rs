use std::collections::HashMap;

use crate::solver::{constraint::Constraint, csp::Csp, value::ValueEquality, variable::Variable};

/// A partial or total mapping from variables to chosen values.
///
/// Equality is order-independent: two assignments are equal when they bind
/// the same variables to the same values, regardless of the order in which
/// the bindings were added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment<V: ValueEquality> {
    values: HashMap<Variable, V>,
}

impl<V: ValueEquality> Assignment<V> {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Binds `variable` to `value`, returning the previously bound value if
    /// one existed.
    pub fn add(&mut self, variable: Variable, value: V) -> Option<V> {
        self.values.insert(variable, value)
    }

    pub fn remove(&mut self, variable: &Variable) -> Option<V> {
        self.values.remove(variable)
    }

    pub fn get(&self, variable: &Variable) -> Option<&V> {
        self.values.get(variable)
    }

    pub fn contains(&self, variable: &Variable) -> bool {
        self.values.contains_key(variable)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.values.keys()
    }

    /// Whether every one of the given variables is bound.
    pub fn is_complete<'a>(&self, variables: impl IntoIterator<Item = &'a Variable>) -> bool {
        variables.into_iter().all(|variable| self.contains(variable))
    }

    /// Whether every scope variable of `constraint` is bound.
    pub fn binds_scope(&self, constraint: &dyn Constraint<V>) -> bool {
        constraint
            .scope()
            .iter()
            .all(|variable| self.contains(variable))
    }

    /// Whether every fully-bound constraint in the given collection holds.
    /// Constraints with unbound scope variables are skipped, since their
    /// predicates are not defined on partial assignments.
    pub fn is_consistent<'a>(
        &self,
        constraints: impl IntoIterator<Item = &'a dyn Constraint<V>>,
    ) -> bool {
        constraints
            .into_iter()
            .all(|constraint| !self.binds_scope(constraint) || constraint.is_satisfied_with(self))
    }

    /// Whether this assignment binds every variable of `csp` and satisfies
    /// all of its constraints.
    pub fn is_solution(&self, csp: &Csp<V>) -> bool {
        self.is_complete(csp.variables())
            && csp
                .constraints()
                .all(|constraint| constraint.is_satisfied_with(self))
    }
}

impl<V: ValueEquality> Default for Assignment<V> {
    fn default() -> Self {
        Self::new()
    }
}
