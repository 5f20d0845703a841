use crate::solver::variable::Variable;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised while assembling a problem instance.
///
/// Solving itself never fails with an [`Error`]: an unsatisfiable problem is
/// reported as an ordinary `None` result, and an inconsistent domain reached
/// during propagation is reported through the inference log.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("constraint `{constraint}` references unknown variable `{variable}`")]
    UnknownVariable {
        variable: Variable,
        constraint: String,
    },

    #[error("constraint `{constraint}` needs a scope of at least two variables")]
    ScopeTooSmall { constraint: String },

    #[error("variable `{0}` is already registered")]
    DuplicateVariable(Variable),
}
