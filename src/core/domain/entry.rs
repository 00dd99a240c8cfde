//! Entry type.
//!
//! One parsed line of an input configuration file.

/// A `(line, key, value)` triple from the input file
///
/// For a bare address line the key holds the address and the value is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    index: usize,
    key: String,
    value: String,
}

impl Entry {
    /// Create an entry for the given 1-based line number
    pub fn new(index: usize, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            index,
            key: key.into(),
            value: value.into(),
        }
    }

    /// 1-based line number in the source file
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether both key and value are empty
    pub fn is_empty(&self) -> bool {
        self.key.is_empty() && self.value.is_empty()
    }

    /// Whether both key and value are present (`KEY=value` form)
    pub fn is_assignment(&self) -> bool {
        !self.key.is_empty() && !self.value.is_empty()
    }

    /// Text that may hold a secret address.
    ///
    /// The value for `KEY=value` entries, otherwise the key.
    pub fn candidate(&self) -> &str {
        if self.is_assignment() {
            &self.value
        } else {
            &self.key
        }
    }

    /// Output prefix for variables produced by this entry.
    ///
    /// Empty unless the entry is an assignment.
    pub fn prefix(&self) -> &str {
        if self.is_assignment() {
            &self.key
        } else {
            ""
        }
    }
}
