//! Satisfying assignments.

use satori_base::Var;
use serde::Serialize;
use std::collections::BTreeMap;

/// A (possibly partial) truth assignment, keyed by variable.
///
/// Serializes to the assignment report format: a JSON object mapping each
/// assigned variable to `true`/`false` in ascending variable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Model {
    assignments: BTreeMap<Var, bool>,
}

impl Model {
    /// Creates a model from variable/value pairs.
    pub fn new(assignments: impl IntoIterator<Item = (Var, bool)>) -> Self {
        Self {
            assignments: assignments.into_iter().collect(),
        }
    }

    /// Gets the value of a variable, `None` if unassigned.
    #[must_use]
    pub fn get(&self, var: Var) -> Option<bool> {
        self.assignments.get(&var).copied()
    }

    /// Sets the value of a variable.
    pub fn set(&mut self, var: Var, value: bool) {
        self.assignments.insert(var, value);
    }

    /// Iterates over assignments in ascending variable order.
    pub fn iter(&self) -> impl Iterator<Item = (Var, bool)> + '_ {
        self.assignments.iter().map(|(&v, &b)| (v, b))
    }

    /// Returns the number of assigned variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Returns whether no variable is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, (var, val)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "x{} = {}", var, if val { 1 } else { 0 })?;
        }
        write!(f, "]")
    }
}
