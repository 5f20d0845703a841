use std::collections::HashSet;

use crate::solver::{csp::Csp, domain::Domain, value::ValueEquality, variable::Variable};

/// A record of the domain reductions performed by one inference pass.
///
/// For every variable the pass touched, the log stores the domain exactly as
/// it was *before* the pass: at most one snapshot per variable, taken before
/// the first removal. [`undo`](DomainLog::undo) writes those snapshots back,
/// restoring the CSP to its pre-pass state value for value, order for order.
/// The snapshots are independent of one another, so restoration order does
/// not matter.
///
/// `undo` consumes the log, so a pass can be reverted at most once.
///
/// `DomainLog::new()` is the identity log: no changes, no contradiction.
#[derive(Debug)]
pub struct DomainLog<V: ValueEquality> {
    saved: Vec<(Variable, Domain<V>)>,
    touched: HashSet<Variable>,
    empty_domain_found: bool,
}

impl<V: ValueEquality> DomainLog<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots `domain` as the pre-pass state of `variable`. Only the
    /// first call per variable has an effect; later calls never overwrite an
    /// earlier snapshot.
    pub fn store(&mut self, variable: &Variable, domain: Domain<V>) {
        if self.touched.insert(variable.clone()) {
            self.saved.push((variable.clone(), domain));
        }
    }

    /// Marks that the pass produced an empty domain.
    pub fn set_empty_domain_found(&mut self) {
        self.empty_domain_found = true;
    }

    /// Whether the pass left every domain untouched.
    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    /// Whether some domain reached zero size during the pass.
    pub fn inconsistency_found(&self) -> bool {
        self.empty_domain_found
    }

    /// The variables whose domains were reduced, in the order they were
    /// first touched.
    pub fn affected_variables(&self) -> impl Iterator<Item = &Variable> {
        self.saved.iter().map(|(variable, _)| variable)
    }

    /// Drops the auxiliary already-snapshotted lookup once a pass is over;
    /// only the snapshots themselves are needed to undo.
    pub fn compact(mut self) -> Self {
        self.touched = HashSet::new();
        self
    }

    /// Restores every logged variable's domain to its pre-pass snapshot.
    pub fn undo(self, csp: &mut Csp<V>) {
        for (variable, domain) in self.saved {
            csp.set_domain(&variable, domain);
        }
    }
}

impl<V: ValueEquality> Default for DomainLog<V> {
    fn default() -> Self {
        Self {
            saved: Vec::new(),
            touched: HashSet::new(),
            empty_domain_found: false,
        }
    }
}
