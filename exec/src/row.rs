//! Execution rows.

use trellis_core::Value;

/// An ordered mapping from variable name to value.
///
/// Rows are the unit flowing through the operator pipeline. A row is
/// logically immutable once emitted — operators that change bindings build
/// a new row with [`Row::extend_with`] instead of mutating in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    entries: Vec<(String, Value)>,
}

impl Row {
    /// Create a new empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a row with a single binding.
    pub fn with(name: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut row = Self::new();
        row.set(name, value);
        row
    }

    /// Bind a value. Rebinding an existing name replaces the value in place,
    /// keeping the original column position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Get a bound value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Check if a variable is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Clone with an additional binding.
    pub fn extend_with(&self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut row = self.clone();
        row.set(name, value);
        row
    }

    /// Get the number of bindings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over bound names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Iterate over bindings in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (name, value) in iter {
            row.set(name, value);
        }
        row
    }
}
