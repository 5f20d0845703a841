pub mod ac3;
pub mod forward_checking;
pub mod log;

use crate::solver::{
    assignment::Assignment, csp::Csp, stats::SearchStats, value::ValueEquality, variable::Variable,
};

use self::{ac3::Ac3, forward_checking::ForwardChecking, log::DomainLog};

/// A constraint-propagation strategy.
///
/// Both entry points narrow domains in place on the given CSP and return a
/// [`DomainLog`] describing every reduction, so the caller can inspect
/// [`inconsistency_found`](DomainLog::inconsistency_found) and later
/// [`undo`](DomainLog::undo) the pass. Per-constraint counters are recorded
/// into `stats`.
pub trait InferenceStrategy<V: ValueEquality> {
    /// A full pass over the whole CSP.
    fn apply(&self, csp: &mut Csp<V>, stats: &mut SearchStats) -> DomainLog<V>;

    /// An incremental pass, run immediately after `variable` was bound in
    /// `assignment`.
    fn apply_assigned(
        &self,
        variable: &Variable,
        assignment: &Assignment<V>,
        csp: &mut Csp<V>,
        stats: &mut SearchStats,
    ) -> DomainLog<V>;
}

/// Propagation disabled: both passes return the identity log.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInference;

impl<V: ValueEquality> InferenceStrategy<V> for NoInference {
    fn apply(&self, _csp: &mut Csp<V>, _stats: &mut SearchStats) -> DomainLog<V> {
        DomainLog::new()
    }

    fn apply_assigned(
        &self,
        _variable: &Variable,
        _assignment: &Assignment<V>,
        _csp: &mut Csp<V>,
        _stats: &mut SearchStats,
    ) -> DomainLog<V> {
        DomainLog::new()
    }
}

/// Inference selection for configuring a search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Inference {
    #[default]
    None,
    ForwardChecking,
    Ac3,
}

impl Inference {
    pub fn strategy<V: ValueEquality>(self) -> Box<dyn InferenceStrategy<V>> {
        match self {
            Inference::None => Box::new(NoInference),
            Inference::ForwardChecking => Box::new(ForwardChecking),
            Inference::Ac3 => Box::new(Ac3),
        }
    }
}
