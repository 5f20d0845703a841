use std::fmt;

use crate::solver::{
    assignment::Assignment, csp::Csp, value::ValueEquality, variable::Variable,
};

pub type ListenerId = usize;

/// A synchronous progress callback. Receives the current CSP, the current
/// assignment when one exists, and the most recently changed variable when
/// known.
pub type StateCallback<V> = Box<dyn Fn(&Csp<V>, Option<&Assignment<V>>, Option<&Variable>)>;

/// The progress listeners registered on a search strategy.
///
/// Callbacks are invoked synchronously at well-defined points of a solve:
/// the solver blocks on each callback and resumes once it returns. The set
/// is empty by default, which is the headless mode.
pub struct ListenerSet<V: ValueEquality> {
    next_id: ListenerId,
    entries: Vec<(ListenerId, StateCallback<V>)>,
}

impl<V: ValueEquality> ListenerSet<V> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Registers a callback, returning an id that can later be passed to
    /// [`remove`](ListenerSet::remove).
    pub fn add(
        &mut self,
        callback: impl Fn(&Csp<V>, Option<&Assignment<V>>, Option<&Variable>) + 'static,
    ) -> ListenerId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Removes a previously registered callback. Returns whether it was
    /// still registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn notify(
        &self,
        csp: &Csp<V>,
        assignment: Option<&Assignment<V>>,
        variable: Option<&Variable>,
    ) {
        for (_, callback) in &self.entries {
            callback(csp, assignment, variable);
        }
    }
}

impl<V: ValueEquality> Default for ListenerSet<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ValueEquality> fmt::Debug for ListenerSet<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet")
            .field("listeners", &self.entries.len())
            .finish()
    }
}
