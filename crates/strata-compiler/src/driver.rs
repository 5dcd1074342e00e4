//! Single-sink compile pipeline
//!
//! Builds a two-node graph (table source → export sink), resolves it and
//! lowers the sink to its plan operator.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use strata_ir::{CompileError, Diagnostic, IrGraph, TableType};
use strata_planpb as planpb;
use thiserror::Error;
use tracing::{debug, info, info_span};

use crate::config::CompilerConfig;
use crate::request::CompileRequest;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("{count} diagnostic(s) reported with strict diagnostics enabled; first: {first}")]
    StrictDiagnostics { count: usize, first: String },

    #[error("Failed to read request: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse YAML request: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result of compiling one export sink.
#[derive(Debug, Clone)]
pub struct CompiledSink {
    pub operator: planpb::Operator,
    pub output_schema: TableType,
    pub required_columns: BTreeSet<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompiledSink {
    pub fn encode(&self) -> Vec<u8> {
        planpb::encode_operator(&self.operator)
    }

    /// SHA-256 of the encoded operator, for caching and plan diffing
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.encode());
        format!("{:x}", hasher.finalize())
    }

    pub fn summary(&self) -> Summary<'_> {
        Summary {
            output_schema: &self.output_schema,
            required_columns: &self.required_columns,
            diagnostics: &self.diagnostics,
            metrics: self
                .operator
                .otel_sink_op()
                .map(|sink| sink.metrics.len())
                .unwrap_or_default(),
            encoded_bytes: self.encode().len(),
            fingerprint: self.fingerprint(),
        }
    }
}

/// JSON view of a compile, printed in `summary` output mode
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub output_schema: &'a TableType,
    pub required_columns: &'a BTreeSet<String>,
    #[serde(skip_serializing_if = "<[Diagnostic]>::is_empty")]
    pub diagnostics: &'a [Diagnostic],
    pub metrics: usize,
    pub encoded_bytes: usize,
    pub fingerprint: String,
}

pub fn compile(
    request: &CompileRequest,
    config: &CompilerConfig,
) -> Result<CompiledSink, DriverError> {
    let span = info_span!(
        "compile",
        source = %request.source_name,
        metrics = request.sink.metrics.len()
    );
    let _guard = span.enter();

    let mut graph = IrGraph::new();
    let source = graph.add_table_source(&request.source_name, request.relation.clone());
    let sink = graph.add_otel_export_sink(source, &request.sink)?;
    graph.resolve_all()?;

    let required_columns = graph
        .required_input_columns(sink)?
        .into_iter()
        .next()
        .unwrap_or_default();
    let operator = graph.to_proto(sink)?;
    let output_schema = graph.resolved_type(sink)?.clone();
    let diagnostics = graph.otel_export_sink(sink)?.diagnostics().to_vec();

    if config.strict_diagnostics {
        if let Some(first) = diagnostics.first() {
            return Err(DriverError::StrictDiagnostics {
                count: diagnostics.len(),
                first: first.to_string(),
            });
        }
    }

    debug!(columns = ?required_columns, "Required input columns");
    info!(
        output_columns = output_schema.len(),
        diagnostics = diagnostics.len(),
        "Compiled export sink"
    );

    Ok(CompiledSink {
        operator,
        output_schema,
        required_columns,
        diagnostics,
    })
}
