//! Strata Intermediate Representation (IR)
//!
//! Resolved operator graph that sits between logical planning and the
//! physical-plan wire format. Nodes move through three phases, always in
//! order: bind (config names become owned column references), resolve
//! (columns get types from the parent relation) and lower (the node becomes
//! a `strata_planpb::Operator`).

pub mod column;
pub mod diagnostics;
pub mod error;
pub mod graph;
pub mod otel;
pub mod schema;
mod types;

pub use column::{Column, ColumnId};
pub use diagnostics::{Diagnostic, DiagnosticCode};
pub use error::{ColumnRole, CompileError, Result};
pub use graph::{IrGraph, Node, NodeId, Operator, TableSource};
pub use schema::{Field, TableType};
pub use types::*;
