//! Physical-plan wire format for Strata
//!
//! The execution engine consumes operators as binary protobuf. This crate
//! holds the message definitions the planner populates and thin helpers for
//! moving them on and off the wire.

use prost::Message;
use thiserror::Error;

pub mod proto;

// Re-export for convenience
pub use proto::*;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("Failed to decode operator: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("Unknown operator type tag: {0}")]
    UnknownOperatorType(i32),
}

impl Operator {
    /// The export-sink payload, if this is an export-sink operator.
    pub fn otel_sink_op(&self) -> Option<&OTelExportSinkOperator> {
        match &self.op {
            Some(operator::Op::OtelSinkOp(sink)) => Some(sink),
            None => None,
        }
    }
}

/// Encode an operator to binary protobuf format
pub fn encode_operator(op: &Operator) -> Vec<u8> {
    op.encode_to_vec()
}

/// Decode an operator produced by [`encode_operator`].
///
/// Rejects operator type tags this build does not know about so a stale
/// engine never silently treats a new operator as `Unspecified`.
pub fn decode_operator(bytes: &[u8]) -> Result<Operator, WireError> {
    let op = Operator::decode(bytes)?;
    if OperatorType::try_from(op.op_type).is_err() {
        return Err(WireError::UnknownOperatorType(op.op_type));
    }
    Ok(op)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_operator() -> Operator {
        let mut headers = std::collections::BTreeMap::new();
        headers.insert("api-key".to_string(), "secret".to_string());

        Operator {
            op_type: OperatorType::OtelExportSinkOperator as i32,
            op: Some(operator::Op::OtelSinkOp(OTelExportSinkOperator {
                endpoint_config: Some(OTelEndpointConfig {
                    url: "otel-collector:4317".to_string(),
                    headers,
                    insecure: true,
                    timeout: 5,
                }),
                resource: Some(OTelResource {
                    attributes: vec![OTelAttribute {
                        name: "service.name".to_string(),
                        column_index: 0,
                    }],
                }),
                metrics: vec![OTelMetric {
                    name: "http.resp.latency".to_string(),
                    description: String::new(),
                    unit: "ns".to_string(),
                    attributes: vec![],
                    time_column_index: 1,
                    data: Some(otel_metric::Data::Summary(OTelMetricSummary {
                        count_column_index: 2,
                        sum_column_index: 3,
                        quantile_values: vec![otel_metric_summary::ValueAtQuantile {
                            quantile: 0.99,
                            value_column_index: 4,
                        }],
                    })),
                }],
            })),
        }
    }

    #[test]
    fn test_operator_survives_the_wire() {
        let op = sample_operator();
        let bytes = encode_operator(&op);
        assert!(!bytes.is_empty());

        let decoded = decode_operator(&bytes).unwrap();
        assert_eq!(decoded, op);
        assert_eq!(decoded.op_type(), OperatorType::OtelExportSinkOperator);
    }

    #[test]
    fn test_otel_sink_op_accessor() {
        let op = sample_operator();
        assert_eq!(op.otel_sink_op().unwrap().metrics.len(), 1);

        let empty = Operator {
            op_type: OperatorType::OtelExportSinkOperator as i32,
            op: None,
        };
        assert!(empty.otel_sink_op().is_none());
    }

    #[test]
    fn test_unknown_operator_type_rejected() {
        let op = Operator {
            op_type: 4242,
            op: None,
        };
        let bytes = encode_operator(&op);

        match decode_operator(&bytes) {
            Err(WireError::UnknownOperatorType(tag)) => assert_eq!(tag, 4242),
            other => panic!("expected unknown operator type, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_bytes_fail_to_decode() {
        let bytes = encode_operator(&sample_operator());
        let result = decode_operator(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(WireError::Decode(_))));
    }
}
