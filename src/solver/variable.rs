use std::fmt;
use std::sync::Arc;

/// A named variable of a constraint satisfaction problem.
///
/// A `Variable` is pure identity: two variables are equal exactly when their
/// names are equal, independent of whatever domain is currently associated
/// with them in a [`Csp`](crate::solver::csp::Csp). The name is reference
/// counted, so cloning a variable is cheap and variables can be used freely
/// as map keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    name: Arc<str>,
}

impl Variable {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Variable {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::Variable;

    #[test]
    fn equality_is_by_name() {
        assert_eq!(Variable::new("WA"), Variable::new("WA"));
        assert_ne!(Variable::new("WA"), Variable::new("NT"));
    }

    #[test]
    fn clones_share_identity() {
        let var = Variable::new("SA");
        assert_eq!(var, var.clone());
        assert_eq!(var.to_string(), "SA");
    }
}
