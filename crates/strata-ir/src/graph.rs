//! IR graph: an arena of operator nodes connected by index edges
//!
//! Nodes never own each other. Parents and children are stored as `NodeId`s
//! into the graph's arena, and the graph owns every node.

use crate::error::{CompileError, Result};
use crate::otel::{OTelData, OTelExportSink};
use crate::schema::TableType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use strata_planpb as planpb;
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn new(v: usize) -> Self {
        Self(v)
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Upstream operator reduced to the relation it produces.
///
/// Stands in for every operator kind that is compiled elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSource {
    pub name: String,
    pub relation: TableType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    TableSource(TableSource),
    OTelExportSink(OTelExportSink),
}

impl Operator {
    pub fn kind(&self) -> &'static str {
        match self {
            Operator::TableSource(_) => "TableSource",
            Operator::OTelExportSink(_) => "OTelExportSink",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    parents: Vec<NodeId>,
    children: Vec<NodeId>,
    op: Operator,
    resolved_type: Option<TableType>,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn op(&self) -> &Operator {
        &self.op
    }

    pub fn resolved_type(&self) -> Option<&TableType> {
        self.resolved_type.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct IrGraph {
    nodes: Vec<Node>,
}

impl IrGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a node with no edges.
    pub fn add_node(&mut self, op: Operator) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            id,
            parents: Vec::new(),
            children: Vec::new(),
            op,
            resolved_type: None,
        });
        id
    }

    pub fn add_edge(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node(parent)?;
        self.node(child)?;
        self.nodes[parent.get()].children.push(child);
        self.nodes[child.get()].parents.push(parent);
        Ok(())
    }

    pub fn add_table_source(&mut self, name: impl Into<String>, relation: TableType) -> NodeId {
        self.add_node(Operator::TableSource(TableSource {
            name: name.into(),
            relation,
        }))
    }

    /// Bind `raw` into a new export sink fed by `parent`.
    pub fn add_otel_export_sink(
        &mut self,
        parent: NodeId,
        raw: &OTelData<String>,
    ) -> Result<NodeId> {
        self.node(parent)?;
        let sink = OTelExportSink::bind(raw)?;
        let id = self.add_node(Operator::OTelExportSink(sink));
        self.add_edge(parent, id)?;
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.get()).ok_or(CompileError::NodeNotFound(id))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn resolved_type(&self, id: NodeId) -> Result<&TableType> {
        self.node(id)?
            .resolved_type
            .as_ref()
            .ok_or(CompileError::NodeNotResolved(id))
    }

    pub fn otel_export_sink(&self, id: NodeId) -> Result<&OTelExportSink> {
        match &self.node(id)?.op {
            Operator::OTelExportSink(sink) => Ok(sink),
            other => Err(CompileError::WrongOperator {
                node: id,
                expected: "OTelExportSink",
                actual: other.kind(),
            }),
        }
    }

    /// The single parent of a unary operator.
    ///
    /// Any other parent count means the graph was built wrong upstream.
    fn sole_parent(&self, id: NodeId) -> Result<NodeId> {
        match self.node(id)?.parents.as_slice() {
            [parent] => Ok(*parent),
            parents => {
                error!(
                    node = %id,
                    parents = parents.len(),
                    "Unary operator does not have exactly one parent"
                );
                Err(CompileError::Structural {
                    node: id,
                    parents: parents.len(),
                })
            }
        }
    }

    /// Resolve a node's output relation. Its parent must be resolved first.
    ///
    /// Resolving an unchanged node again produces the same relation.
    pub fn resolve_node(&mut self, id: NodeId) -> Result<()> {
        let source_relation = match &self.node(id)?.op {
            Operator::TableSource(source) => Some(source.relation.clone()),
            Operator::OTelExportSink(_) => None,
        };
        let resolved = match source_relation {
            Some(relation) => relation,
            None => self.resolve_sink(id)?,
        };

        self.nodes[id.get()].resolved_type = Some(resolved);
        Ok(())
    }

    fn resolve_sink(&mut self, id: NodeId) -> Result<TableType> {
        let parent = self.sole_parent(id)?;
        let parent_type = self
            .node(parent)?
            .resolved_type
            .clone()
            .ok_or(CompileError::ParentNotResolved { node: id, parent })?;

        match &mut self.nodes[id.get()].op {
            Operator::OTelExportSink(sink) => sink.resolve(id, &parent_type),
            other => Err(CompileError::WrongOperator {
                node: id,
                expected: "OTelExportSink",
                actual: other.kind(),
            }),
        }
    }

    /// Resolve every node in insertion order.
    pub fn resolve_all(&mut self) -> Result<()> {
        for idx in 0..self.nodes.len() {
            self.resolve_node(NodeId::new(idx))?;
        }
        debug!(nodes = self.nodes.len(), "Resolved IR graph");
        Ok(())
    }

    /// Column names each parent must supply, one set per parent.
    pub fn required_input_columns(&self, id: NodeId) -> Result<Vec<BTreeSet<String>>> {
        let sink = self.otel_export_sink(id)?;
        Ok(vec![sink.required_column_names().clone()])
    }

    /// Lower a resolved node to its physical-plan operator.
    pub fn to_proto(&self, id: NodeId) -> Result<planpb::Operator> {
        let sink = self.otel_export_sink(id)?;
        self.resolved_type(id)?;
        sink.to_proto(id)
    }

    /// Rebuild `id`'s operator from its semantic config.
    ///
    /// Sinks are rebound, so the copy owns fresh, unresolved columns.
    fn rebuilt_operator(&self, id: NodeId) -> Result<Operator> {
        Ok(match &self.node(id)?.op {
            Operator::TableSource(source) => Operator::TableSource(source.clone()),
            Operator::OTelExportSink(sink) => {
                Operator::OTelExportSink(OTelExportSink::copy_from(sink)?)
            }
        })
    }

    /// Copy node `id` of `source` into this graph under `parent`.
    pub fn copy_node(&mut self, source: &IrGraph, id: NodeId, parent: NodeId) -> Result<NodeId> {
        self.node(parent)?;
        let op = source.rebuilt_operator(id)?;
        let copy = self.add_node(op);
        self.add_edge(parent, copy)?;
        debug!(source = %id, copy = %copy, "Copied IR node");
        Ok(copy)
    }

    /// Duplicate node `id` within this graph under `parent`.
    pub fn duplicate_node(&mut self, id: NodeId, parent: NodeId) -> Result<NodeId> {
        self.node(parent)?;
        let op = self.rebuilt_operator(id)?;
        let copy = self.add_node(op);
        self.add_edge(parent, copy)?;
        Ok(copy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataType;

    fn relation() -> TableType {
        TableType::from(vec![crate::schema::Field::new(
            "ts",
            DataType::Time64Ns,
            Default::default(),
        )])
    }

    #[test]
    fn test_edges_are_recorded_both_ways() {
        let mut graph = IrGraph::new();
        let a = graph.add_table_source("a", relation());
        let b = graph.add_table_source("b", relation());
        graph.add_edge(a, b).unwrap();

        assert_eq!(graph.node(a).unwrap().children(), &[b]);
        assert_eq!(graph.node(b).unwrap().parents(), &[a]);
    }

    #[test]
    fn test_unknown_node() {
        let mut graph = IrGraph::new();
        let a = graph.add_table_source("a", relation());
        let missing = NodeId::new(7);

        assert_eq!(graph.add_edge(a, missing), Err(CompileError::NodeNotFound(missing)));
        assert!(matches!(graph.resolve_node(missing), Err(CompileError::NodeNotFound(_))));
    }

    #[test]
    fn test_source_resolves_to_its_relation() {
        let mut graph = IrGraph::new();
        let a = graph.add_table_source("a", relation());
        assert!(matches!(graph.resolved_type(a), Err(CompileError::NodeNotResolved(_))));

        graph.resolve_node(a).unwrap();
        assert_eq!(graph.resolved_type(a).unwrap(), &relation());
    }

    #[test]
    fn test_required_columns_only_on_sinks() {
        let mut graph = IrGraph::new();
        let a = graph.add_table_source("a", relation());
        assert!(matches!(
            graph.required_input_columns(a),
            Err(CompileError::WrongOperator { actual: "TableSource", .. })
        ));
    }
}
