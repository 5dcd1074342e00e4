//! OpenTelemetry export sink
//!
//! Binds the raw exporter config to owned columns, resolves them against the
//! parent relation and lowers the result to a plan operator.

mod config;
mod lower;
mod sink;
mod units;

pub use config::{
    OTelAttribute, OTelData, OTelEndpointConfig, OTelMetric, OTelMetricData, OTelQuantile, OTelSpan,
};
pub use sink::OTelExportSink;
pub use units::otel_unit;
