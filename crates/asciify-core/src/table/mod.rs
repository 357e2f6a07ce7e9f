//! The code point → replacement table and its text formats.
//!
//! Entries accumulate in a hash map while builders run. Anything that needs a
//! stable order (closure passes, serialization) sorts the keys explicitly.

mod rules;
mod syllables;

pub use rules::{load_table, parse_rules, parse_table, save_table, write_table};
pub use syllables::{parse_syllables, PLACEHOLDER};

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io;

use crate::codepoint::{is_printable_ascii_str, CodePoint};

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("{code_point} maps to {value:?}, which is not printable ASCII")]
    NotPrintable { code_point: CodePoint, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    entries: HashMap<CodePoint, String>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, cp: CodePoint) -> Option<&str> {
        self.entries.get(&cp).map(String::as_str)
    }

    pub fn contains(&self, cp: CodePoint) -> bool {
        self.entries.contains_key(&cp)
    }

    /// Insert unless `cp` already has an entry. Returns whether it was added.
    pub fn insert(&mut self, cp: CodePoint, value: impl Into<String>) -> bool {
        if self.entries.contains_key(&cp) {
            return false;
        }
        self.entries.insert(cp, value.into());
        true
    }

    /// Insert or replace.
    pub fn set(&mut self, cp: CodePoint, value: String) {
        self.entries.insert(cp, value);
    }

    /// Merge `other` into `self`; existing entries win. Returns the number added.
    pub fn merge(&mut self, other: Table) -> usize {
        let mut added = 0;
        for (cp, value) in other.entries {
            if let Entry::Vacant(slot) = self.entries.entry(cp) {
                slot.insert(value);
                added += 1;
            }
        }
        added
    }

    /// Unordered iteration.
    pub fn iter(&self) -> impl Iterator<Item = (CodePoint, &str)> {
        self.entries.iter().map(|(cp, v)| (*cp, v.as_str()))
    }

    pub fn keys_sorted(&self) -> Vec<CodePoint> {
        let mut keys: Vec<CodePoint> = self.entries.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Entries in ascending code point order.
    pub fn sorted(&self) -> Vec<(CodePoint, &str)> {
        let mut entries: Vec<(CodePoint, &str)> = self.iter().collect();
        entries.sort_unstable_by_key(|(cp, _)| *cp);
        entries
    }

    /// Fail on the lowest code point whose value is not printable ASCII.
    pub fn verify_printable(&self) -> Result<(), TableError> {
        for (cp, value) in self.sorted() {
            if !is_printable_ascii_str(value) {
                return Err(TableError::NotPrintable {
                    code_point: cp,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Collects with first-writer-wins semantics.
impl FromIterator<(CodePoint, String)> for Table {
    fn from_iter<I: IntoIterator<Item = (CodePoint, String)>>(iter: I) -> Self {
        let mut table = Table::new();
        for (cp, value) in iter {
            table.insert(cp, value);
        }
        table
    }
}
