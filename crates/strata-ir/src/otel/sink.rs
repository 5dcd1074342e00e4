//! OpenTelemetry export sink node: binding, cloning and type resolution

use super::config::{OTelData, OTelMetricData};
use crate::column::{is_valid_column_name, Column, ColumnId};
use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::error::{CompileError, Result};
use crate::graph::NodeId;
use crate::schema::TableType;
use std::collections::BTreeSet;
use std::convert::Infallible;
use tracing::{debug, warn};

/// Sink that exports its parent's rows as OpenTelemetry metrics.
///
/// Owns every column it references. Config column names are replaced by
/// handles into `columns` when the node is bound.
#[derive(Debug, Clone, PartialEq)]
pub struct OTelExportSink {
    data: OTelData<ColumnId>,
    columns: Vec<Column>,
    required_column_names: BTreeSet<String>,
    diagnostics: Vec<Diagnostic>,
}

impl OTelExportSink {
    /// Bind a raw config, creating one owned column per reference.
    pub fn bind(raw: &OTelData<String>) -> Result<Self> {
        let mut columns: Vec<Column> = Vec::new();
        let mut required_column_names = BTreeSet::new();

        let data = raw.try_map_columns(|name| {
            if !is_valid_column_name(name) {
                return Err(CompileError::InvalidColumnName(name.clone()));
            }
            let id = ColumnId::new(columns.len());
            columns.push(Column::new(name.as_str()));
            required_column_names.insert(name.clone());
            Ok(id)
        })?;

        let diagnostics = collect_diagnostics(&data);

        debug!(
            metrics = data.metrics.len(),
            resource_attributes = data.resource_attributes.len(),
            columns = columns.len(),
            "Bound OTel export sink"
        );

        Ok(Self {
            data,
            columns,
            required_column_names,
            diagnostics,
        })
    }

    /// Rebind from another sink's semantic config.
    ///
    /// The copy owns fresh, unresolved columns; nothing is shared with `source`.
    pub fn copy_from(source: &OTelExportSink) -> Result<Self> {
        Self::bind(&source.semantic_config())
    }

    /// The config this node was bound from, with handles turned back into names.
    pub fn semantic_config(&self) -> OTelData<String> {
        let mapped: std::result::Result<_, Infallible> = self
            .data
            .try_map_columns(|id| Ok(self.column(*id).name().to_string()));
        match mapped {
            Ok(raw) => raw,
            Err(never) => match never {},
        }
    }

    pub fn data(&self) -> &OTelData<ColumnId> {
        &self.data
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Ids are only ever minted by this node, so they are always in range.
    pub fn column(&self, id: ColumnId) -> &Column {
        &self.columns[id.get()]
    }

    pub fn required_column_names(&self) -> &BTreeSet<String> {
        &self.required_column_names
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Resolve every column against the parent relation and build the
    /// output relation.
    ///
    /// Nothing is written back unless every column resolves, so a failed
    /// attempt leaves the node as it was.
    pub(crate) fn resolve(&mut self, node: NodeId, parent: &TableType) -> Result<TableType> {
        let mut resolved = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            let unresolved = || CompileError::UnresolvedColumn {
                node,
                column: column.name().to_string(),
            };
            let value_type = parent.get(column.name()).ok_or_else(unresolved)?;
            resolved.push(value_type);
        }

        let mut table = TableType::new();
        for (column, value_type) in self.columns.iter().zip(&resolved) {
            table.add_column(column.name(), *value_type);
        }

        // Indices are read off the finished relation: positions in this
        // sink's output, not in the parent's relation.
        for (column, value_type) in self.columns.iter_mut().zip(resolved) {
            let index = table
                .index_of(column.name())
                .ok_or_else(|| CompileError::ColumnNotResolved {
                    node,
                    column: column.name().to_string(),
                })?;
            column.set_resolved(value_type, index);
        }

        debug!(%node, columns = table.len(), "Resolved OTel export sink");
        Ok(table)
    }
}

fn collect_diagnostics(data: &OTelData<ColumnId>) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if !data.spans.is_empty() {
        warn!(spans = data.spans.len(), "Span export is not supported; spans are ignored");
        diagnostics.push(Diagnostic::new(
            DiagnosticCode::UnsupportedSpans,
            format!(
                "{} span descriptor(s) accepted but not exported: span export is not supported",
                data.spans.len()
            ),
        ));
    }

    for metric in &data.metrics {
        if let OTelMetricData::Summary { quantiles, .. } = &metric.data {
            for q in quantiles {
                if !(0.0..=1.0).contains(&q.quantile) {
                    diagnostics.push(Diagnostic::new(
                        DiagnosticCode::QuantileOutOfRange,
                        format!(
                            "metric '{}': quantile {} is outside [0, 1]",
                            metric.name, q.quantile
                        ),
                    ));
                }
            }
        }
    }

    diagnostics
}
