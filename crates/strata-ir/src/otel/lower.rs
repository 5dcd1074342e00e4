//! Lowering of a resolved OTel export sink to its physical-plan operator

use super::config::{OTelAttribute, OTelEndpointConfig, OTelMetric, OTelMetricData};
use super::sink::OTelExportSink;
use super::units::otel_unit;
use crate::column::{Column, ColumnId};
use crate::error::{ColumnRole, CompileError, Result};
use crate::graph::NodeId;
use crate::types::{DataType, ValueType};
use strata_planpb as planpb;

impl OTelExportSink {
    /// Produce the plan operator for this sink.
    ///
    /// Fails on the first column that breaks its positional type contract;
    /// no partial operator is ever returned. Spans are skipped.
    pub(crate) fn to_proto(&self, node: NodeId) -> Result<planpb::Operator> {
        let lowering = Lowering { node, sink: self };
        let data = self.data();

        let resource = planpb::OTelResource {
            attributes: lowering.attributes(&data.resource_attributes)?,
        };

        let metrics = data
            .metrics
            .iter()
            .map(|metric| lowering.metric(metric))
            .collect::<Result<Vec<_>>>()?;

        Ok(planpb::Operator {
            op_type: planpb::OperatorType::OtelExportSinkOperator as i32,
            op: Some(planpb::operator::Op::OtelSinkOp(planpb::OTelExportSinkOperator {
                endpoint_config: Some(endpoint_config_to_proto(&data.endpoint_config)),
                resource: Some(resource),
                metrics,
            })),
        })
    }
}

fn endpoint_config_to_proto(config: &OTelEndpointConfig) -> planpb::OTelEndpointConfig {
    planpb::OTelEndpointConfig {
        url: config.url.clone(),
        headers: config.headers.clone(),
        insecure: config.insecure,
        timeout: config.timeout_secs,
    }
}

struct Lowering<'a> {
    node: NodeId,
    sink: &'a OTelExportSink,
}

impl<'a> Lowering<'a> {
    fn resolved(&self, id: ColumnId) -> Result<(&'a Column, ValueType, i64)> {
        let column = self.sink.column(id);
        match (column.resolved_type(), column.index()) {
            (Some(value_type), Some(index)) => Ok((column, value_type, index as i64)),
            _ => Err(CompileError::ColumnNotResolved {
                node: self.node,
                column: column.name().to_string(),
            }),
        }
    }

    fn mismatch(
        &self,
        role: ColumnRole,
        column: &Column,
        expected: &'static str,
        actual: DataType,
    ) -> CompileError {
        CompileError::TypeMismatch {
            node: self.node,
            role,
            column: column.name().to_string(),
            expected,
            actual,
        }
    }

    /// Index of a column that must have exactly `expected` as its data type.
    fn expect(&self, role: ColumnRole, id: ColumnId, expected: DataType) -> Result<i64> {
        let (column, value_type, index) = self.resolved(id)?;
        if value_type.data_type != expected {
            return Err(self.mismatch(role, column, expected.as_str(), value_type.data_type));
        }
        Ok(index)
    }

    fn attributes(&self, attrs: &[OTelAttribute<ColumnId>]) -> Result<Vec<planpb::OTelAttribute>> {
        attrs
            .iter()
            .map(|attr| -> Result<planpb::OTelAttribute> {
                let (_, _, column_index) = self.resolved(attr.column)?;
                Ok(planpb::OTelAttribute {
                    name: attr.name.clone(),
                    column_index,
                })
            })
            .collect()
    }

    fn metric(&self, metric: &OTelMetric<ColumnId>) -> Result<planpb::OTelMetric> {
        // The unit comes from the unit column's semantic type, not a declared unit.
        let (_, unit_type, _) = self.resolved(metric.unit_column)?;
        let time_column_index =
            self.expect(ColumnRole::Time, metric.time_column, DataType::Time64Ns)?;
        let attributes = self.attributes(&metric.attributes)?;

        let data = match &metric.data {
            OTelMetricData::Gauge { value_column } => {
                planpb::otel_metric::Data::Gauge(self.gauge(*value_column)?)
            }
            OTelMetricData::Summary {
                count_column,
                sum_column,
                quantiles,
            } => {
                let count_column_index =
                    self.expect(ColumnRole::Count, *count_column, DataType::Int64)?;
                let sum_column_index =
                    self.expect(ColumnRole::Sum, *sum_column, DataType::Float64)?;
                let quantile_values = quantiles
                    .iter()
                    .map(|q| -> Result<planpb::otel_metric_summary::ValueAtQuantile> {
                        let value_column_index =
                            self.expect(ColumnRole::Quantile, q.value_column, DataType::Float64)?;
                        Ok(planpb::otel_metric_summary::ValueAtQuantile {
                            quantile: q.quantile,
                            value_column_index,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;

                planpb::otel_metric::Data::Summary(planpb::OTelMetricSummary {
                    count_column_index,
                    sum_column_index,
                    quantile_values,
                })
            }
        };

        Ok(planpb::OTelMetric {
            name: metric.name.clone(),
            description: metric.description.clone(),
            unit: otel_unit(unit_type.semantic_type).to_string(),
            attributes,
            time_column_index,
            data: Some(data),
        })
    }

    fn gauge(&self, value_column: ColumnId) -> Result<planpb::OTelMetricGauge> {
        use planpb::otel_metric_gauge::ValueColumn;

        let (column, value_type, index) = self.resolved(value_column)?;
        let value_column = match value_type.data_type {
            DataType::Int64 => ValueColumn::IntColumnIndex(index),
            DataType::Float64 => ValueColumn::FloatColumnIndex(index),
            other => {
                return Err(self.mismatch(ColumnRole::Value, column, "INT64 or FLOAT64", other))
            }
        };

        Ok(planpb::OTelMetricGauge {
            value_column: Some(value_column),
        })
    }
}
