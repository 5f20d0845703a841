use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    error::{Error, Result},
    solver::{constraint::Constraint, domain::Domain, value::ValueEquality, variable::Variable},
};

pub type ConstraintId = usize;

/// A constraint satisfaction problem instance.
///
/// The `Csp` owns the *current* domain of every variable, the single source
/// of truth read and narrowed by the inference strategies, together with the
/// immutable list of constraints and a derived index from each variable to
/// the constraints that mention it.
///
/// Domains are mutated destructively while solving and restored from
/// [`DomainLog`](crate::solver::inference::log::DomainLog)s rather than
/// copied wholesale, so one instance serves an entire search. Cloning a `Csp`
/// deep-copies the domains while sharing the constraints, which is the
/// supported way to hand independent searches their own instance.
#[derive(Debug, Clone)]
pub struct Csp<V: ValueEquality> {
    variables: Vec<Variable>,
    domains: HashMap<Variable, Domain<V>>,
    constraints: Vec<Arc<dyn Constraint<V>>>,
    incident: HashMap<Variable, Vec<ConstraintId>>,
}

impl<V: ValueEquality> Csp<V> {
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            domains: HashMap::new(),
            constraints: Vec::new(),
            incident: HashMap::new(),
        }
    }

    /// Registers a variable with its initial domain.
    pub fn add_variable(&mut self, variable: Variable, domain: Domain<V>) -> Result<()> {
        if self.domains.contains_key(&variable) {
            return Err(Error::DuplicateVariable(variable));
        }
        self.incident.insert(variable.clone(), Vec::new());
        self.domains.insert(variable.clone(), domain);
        self.variables.push(variable);
        Ok(())
    }

    /// Adds a constraint, wiring it into the variable adjacency index.
    ///
    /// Every scope variable must already be registered and the scope must
    /// hold at least two variables.
    pub fn add_constraint(&mut self, constraint: impl Constraint<V> + 'static) -> Result<ConstraintId> {
        let constraint: Arc<dyn Constraint<V>> = Arc::new(constraint);
        if constraint.scope().len() < 2 {
            return Err(Error::ScopeTooSmall {
                constraint: constraint.descriptor().description,
            });
        }
        for variable in constraint.scope() {
            if !self.domains.contains_key(variable) {
                return Err(Error::UnknownVariable {
                    variable: variable.clone(),
                    constraint: constraint.descriptor().description,
                });
            }
        }

        let id = self.constraints.len();
        for variable in constraint.scope() {
            let incident = self.incident.entry(variable.clone()).or_default();
            if !incident.contains(&id) {
                incident.push(id);
            }
        }
        self.constraints.push(constraint);
        Ok(id)
    }

    /// The variables in declaration order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The current domain of `variable`.
    ///
    /// # Panics
    ///
    /// Panics if the variable is not registered.
    pub fn domain(&self, variable: &Variable) -> &Domain<V> {
        let Some(domain) = self.domains.get(variable) else {
            panic!("unknown variable {variable}");
        };
        domain
    }

    /// Replaces the current domain of `variable`.
    ///
    /// # Panics
    ///
    /// Panics if the variable is not registered.
    pub fn set_domain(&mut self, variable: &Variable, domain: Domain<V>) {
        let Some(slot) = self.domains.get_mut(variable) else {
            panic!("unknown variable {variable}");
        };
        *slot = domain;
    }

    /// Removes `value` from the current domain of `variable`, returning
    /// whether the domain shrank.
    ///
    /// # Panics
    ///
    /// Panics if the variable is not registered.
    pub fn remove_value(&mut self, variable: &Variable, value: &V) -> bool {
        let Some(domain) = self.domains.get_mut(variable) else {
            panic!("unknown variable {variable}");
        };
        domain.remove(value)
    }

    pub fn constraints(&self) -> impl Iterator<Item = &dyn Constraint<V>> {
        self.constraints.iter().map(|constraint| constraint.as_ref())
    }

    pub fn constraint(&self, id: ConstraintId) -> &Arc<dyn Constraint<V>> {
        &self.constraints[id]
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Ids of the constraints whose scope mentions `variable`.
    pub fn constraint_ids_on(&self, variable: &Variable) -> &[ConstraintId] {
        self.incident
            .get(variable)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The constraints whose scope mentions `variable`.
    pub fn constraints_on<'a>(
        &'a self,
        variable: &Variable,
    ) -> impl Iterator<Item = &'a dyn Constraint<V>> {
        self.constraint_ids_on(variable)
            .iter()
            .map(move |&id| self.constraints[id].as_ref())
    }

    /// For a binary constraint, the scope variable that is not `variable`.
    /// `None` if the constraint is not binary or does not mention `variable`.
    pub fn neighbor<'a>(
        &self,
        variable: &Variable,
        constraint: &'a dyn Constraint<V>,
    ) -> Option<&'a Variable> {
        match constraint.scope() {
            [a, b] if a == variable => Some(b),
            [a, b] if b == variable => Some(a),
            _ => None,
        }
    }
}

impl<V: ValueEquality> Default for Csp<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Csp;
    use crate::{
        error::Error,
        solver::{
            constraints::{all_different::AllDifferentConstraint, not_equal::NotEqualConstraint},
            domain::Domain,
            variable::Variable,
        },
    };

    fn two_variable_csp() -> (Csp<i32>, Variable, Variable) {
        let x = Variable::new("X");
        let y = Variable::new("Y");
        let mut csp = Csp::new();
        csp.add_variable(x.clone(), Domain::new([1, 2])).unwrap();
        csp.add_variable(y.clone(), Domain::new([1, 2])).unwrap();
        (csp, x, y)
    }

    #[test]
    fn duplicate_variables_are_rejected() {
        let (mut csp, x, _) = two_variable_csp();
        let result = csp.add_variable(x, Domain::new([3]));
        assert!(matches!(result, Err(Error::DuplicateVariable(_))));
    }

    #[test]
    fn constraints_must_reference_known_variables() {
        let (mut csp, x, _) = two_variable_csp();
        let result = csp.add_constraint(NotEqualConstraint::new(x, Variable::new("Z")));
        assert!(matches!(result, Err(Error::UnknownVariable { .. })));
    }

    #[test]
    fn scope_must_hold_two_variables() {
        let (mut csp, x, _) = two_variable_csp();
        let result = csp.add_constraint(AllDifferentConstraint::new(vec![x]));
        assert!(matches!(result, Err(Error::ScopeTooSmall { .. })));
    }

    #[test]
    fn adjacency_tracks_incident_constraints() {
        let (mut csp, x, y) = two_variable_csp();
        let z = Variable::new("Z");
        csp.add_variable(z.clone(), Domain::new([1, 2])).unwrap();

        let xy = csp
            .add_constraint(NotEqualConstraint::new(x.clone(), y.clone()))
            .unwrap();
        let yz = csp
            .add_constraint(NotEqualConstraint::new(y.clone(), z.clone()))
            .unwrap();

        assert_eq!(csp.constraint_ids_on(&x), &[xy]);
        assert_eq!(csp.constraint_ids_on(&y), &[xy, yz]);
        assert_eq!(csp.constraint_ids_on(&z), &[yz]);
    }

    #[test]
    fn neighbor_resolves_the_other_scope_variable() {
        let (mut csp, x, y) = two_variable_csp();
        let id = csp
            .add_constraint(NotEqualConstraint::new(x.clone(), y.clone()))
            .unwrap();
        let constraint = csp.constraint(id).clone();

        assert_eq!(csp.neighbor(&x, constraint.as_ref()), Some(&y));
        assert_eq!(csp.neighbor(&y, constraint.as_ref()), Some(&x));
        assert_eq!(csp.neighbor(&Variable::new("Z"), constraint.as_ref()), None);
    }

    #[test]
    fn clones_copy_domains_and_share_constraints() {
        let (mut csp, x, y) = two_variable_csp();
        csp.add_constraint(NotEqualConstraint::new(x.clone(), y))
            .unwrap();

        let mut copy = csp.clone();
        copy.remove_value(&x, &1);

        assert_eq!(csp.domain(&x).values(), &[1, 2]);
        assert_eq!(copy.domain(&x).values(), &[2]);
        assert_eq!(copy.constraint_count(), csp.constraint_count());
    }
}
