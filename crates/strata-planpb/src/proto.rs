//! Physical-plan messages populated by the export-sink lowering.
//!
//! Field tags are part of the wire contract with the execution engine and
//! must never be renumbered.

use std::collections::BTreeMap;

/// Operator kinds understood by the execution engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum OperatorType {
    Unspecified = 0,
    MemorySourceOperator = 1000,
    MapOperator = 1002,
    FilterOperator = 1004,
    MemorySinkOperator = 9000,
    GrpcSinkOperator = 9100,
    OtelExportSinkOperator = 9200,
}

/// One operator of a plan fragment.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Operator {
    #[prost(enumeration = "OperatorType", tag = "1")]
    pub op_type: i32,
    #[prost(oneof = "operator::Op", tags = "14")]
    pub op: ::core::option::Option<operator::Op>,
}

pub mod operator {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Op {
        #[prost(message, tag = "14")]
        OtelSinkOp(super::OTelExportSinkOperator),
    }
}

/// Where and how the exporter ships data. Opaque to the compiler.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct OTelEndpointConfig {
    #[prost(string, tag = "1")]
    pub url: ::prost::alloc::string::String,
    #[prost(btree_map = "string, string", tag = "2")]
    pub headers: BTreeMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
    #[prost(bool, tag = "3")]
    pub insecure: bool,
    #[prost(int64, tag = "4")]
    pub timeout: i64,
}

/// An attribute whose value is read from an input column.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct OTelAttribute {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(int64, tag = "2")]
    pub column_index: i64,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct OTelResource {
    #[prost(message, repeated, tag = "1")]
    pub attributes: ::prost::alloc::vec::Vec<OTelAttribute>,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct OTelMetricGauge {
    #[prost(oneof = "otel_metric_gauge::ValueColumn", tags = "1, 2")]
    pub value_column: ::core::option::Option<otel_metric_gauge::ValueColumn>,
}

pub mod otel_metric_gauge {
    #[derive(Clone, Copy, PartialEq, Eq, ::prost::Oneof)]
    pub enum ValueColumn {
        #[prost(int64, tag = "1")]
        IntColumnIndex(i64),
        #[prost(int64, tag = "2")]
        FloatColumnIndex(i64),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OTelMetricSummary {
    #[prost(int64, tag = "1")]
    pub count_column_index: i64,
    #[prost(int64, tag = "2")]
    pub sum_column_index: i64,
    #[prost(message, repeated, tag = "3")]
    pub quantile_values: ::prost::alloc::vec::Vec<otel_metric_summary::ValueAtQuantile>,
}

pub mod otel_metric_summary {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ValueAtQuantile {
        #[prost(double, tag = "1")]
        pub quantile: f64,
        #[prost(int64, tag = "2")]
        pub value_column_index: i64,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OTelMetric {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub description: ::prost::alloc::string::String,
    /// UCUM unit symbol, empty when the metric is unitless.
    #[prost(string, tag = "3")]
    pub unit: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "4")]
    pub attributes: ::prost::alloc::vec::Vec<OTelAttribute>,
    #[prost(int64, tag = "5")]
    pub time_column_index: i64,
    #[prost(oneof = "otel_metric::Data", tags = "101, 102")]
    pub data: ::core::option::Option<otel_metric::Data>,
}

pub mod otel_metric {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Data {
        #[prost(message, tag = "101")]
        Gauge(super::OTelMetricGauge),
        #[prost(message, tag = "102")]
        Summary(super::OTelMetricSummary),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OTelExportSinkOperator {
    #[prost(message, optional, tag = "1")]
    pub endpoint_config: ::core::option::Option<OTelEndpointConfig>,
    #[prost(message, optional, tag = "2")]
    pub resource: ::core::option::Option<OTelResource>,
    #[prost(message, repeated, tag = "3")]
    pub metrics: ::prost::alloc::vec::Vec<OTelMetric>,
}
