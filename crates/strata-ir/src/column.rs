//! Column references owned by IR nodes

use crate::types::ValueType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a column owned by a single IR node.
///
/// Only meaningful together with the node that minted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(usize);

impl ColumnId {
    pub(crate) const fn new(v: usize) -> Self {
        Self(v)
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColumnId({})", self.0)
    }
}

/// A named reference into the parent relation.
///
/// The resolved type and the output index are filled in by type resolution;
/// the index is written only once the node's output relation is final.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    resolved: Option<ValueType>,
    index: Option<usize>,
}

impl Column {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resolved: None,
            index: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resolved_type(&self) -> Option<ValueType> {
        self.resolved
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some() && self.index.is_some()
    }

    pub(crate) fn set_resolved(&mut self, value_type: ValueType, index: usize) {
        self.resolved = Some(value_type);
        self.index = Some(index);
    }
}

/// Column names must be non-empty, free of control characters and not padded
/// with whitespace.
pub fn is_valid_column_name(name: &str) -> bool {
    !name.is_empty() && name.trim() == name && !name.chars().any(char::is_control)
}
