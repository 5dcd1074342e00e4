//! Compiler errors raised while binding, resolving and lowering IR nodes

use crate::graph::NodeId;
use crate::types::DataType;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompileError>;

/// Position a column occupies in an exported metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    Time,
    Value,
    Count,
    Sum,
    Quantile,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColumnRole::Time => "time",
            ColumnRole::Value => "value",
            ColumnRole::Count => "count",
            ColumnRole::Sum => "sum",
            ColumnRole::Quantile => "quantile",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("Invalid column name: {0:?}")]
    InvalidColumnName(String),

    /// The graph was wired incorrectly upstream. Not reachable from valid input.
    #[error("Structural invariant violated on {node}: expected exactly one parent, found {parents}")]
    Structural { node: NodeId, parents: usize },

    #[error("{node}: column '{column}' not found in parent relation")]
    UnresolvedColumn { node: NodeId, column: String },

    #[error("{node}: expected {role} column '{column}' to be {expected}, received {actual}")]
    TypeMismatch {
        node: NodeId,
        role: ColumnRole,
        column: String,
        expected: &'static str,
        actual: DataType,
    },

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("{0} has not been resolved")]
    NodeNotResolved(NodeId),

    #[error("{node}: parent {parent} has not been resolved")]
    ParentNotResolved { node: NodeId, parent: NodeId },

    #[error("{node}: column '{column}' read before resolution")]
    ColumnNotResolved { node: NodeId, column: String },

    #[error("{node} is a {actual} operator, expected {expected}")]
    WrongOperator {
        node: NodeId,
        expected: &'static str,
        actual: &'static str,
    },
}

impl CompileError {
    /// Errors that indicate a compiler defect rather than bad user input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            CompileError::Structural { .. }
                | CompileError::NodeNotFound(_)
                | CompileError::ColumnNotResolved { .. }
                | CompileError::WrongOperator { .. }
        )
    }
}
