//! Type system for Strata IR

use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical data type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    Boolean,
    Int64,
    Uint128,
    Float64,
    String,
    #[serde(rename = "TIME64NS")]
    Time64Ns,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Boolean => "BOOLEAN",
            DataType::Int64 => "INT64",
            DataType::Uint128 => "UINT128",
            DataType::Float64 => "FLOAT64",
            DataType::String => "STRING",
            DataType::Time64Ns => "TIME64NS",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain-level tag carried alongside the data type.
///
/// The set is closed: the unit mapper and anything else that dispatches on it
/// matches every variant explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SemanticType {
    Unspecified,
    #[default]
    None,
    TimeNs,
    AgentUid,
    Asid,
    Upid,
    ServiceName,
    PodName,
    PodPhase,
    PodStatus,
    NodeName,
    ContainerName,
    ContainerState,
    ContainerStatus,
    NamespaceName,
    Bytes,
    Percent,
    DurationNs,
    ThroughputPerNs,
    ThroughputBytesPerNs,
    Quantiles,
    DurationNsQuantiles,
    IpAddress,
    Port,
    HttpReqMethod,
    HttpRespStatus,
    HttpRespMessage,
    ScriptReference,
}

impl SemanticType {
    pub const ALL: [SemanticType; 28] = [
        SemanticType::Unspecified,
        SemanticType::None,
        SemanticType::TimeNs,
        SemanticType::AgentUid,
        SemanticType::Asid,
        SemanticType::Upid,
        SemanticType::ServiceName,
        SemanticType::PodName,
        SemanticType::PodPhase,
        SemanticType::PodStatus,
        SemanticType::NodeName,
        SemanticType::ContainerName,
        SemanticType::ContainerState,
        SemanticType::ContainerStatus,
        SemanticType::NamespaceName,
        SemanticType::Bytes,
        SemanticType::Percent,
        SemanticType::DurationNs,
        SemanticType::ThroughputPerNs,
        SemanticType::ThroughputBytesPerNs,
        SemanticType::Quantiles,
        SemanticType::DurationNsQuantiles,
        SemanticType::IpAddress,
        SemanticType::Port,
        SemanticType::HttpReqMethod,
        SemanticType::HttpRespStatus,
        SemanticType::HttpRespMessage,
        SemanticType::ScriptReference,
    ];
}

/// Resolved type of a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueType {
    pub data_type: DataType,
    #[serde(default)]
    pub semantic_type: SemanticType,
}

impl ValueType {
    pub fn new(data_type: DataType, semantic_type: SemanticType) -> Self {
        Self {
            data_type,
            semantic_type,
        }
    }
}

impl From<DataType> for ValueType {
    fn from(data_type: DataType) -> Self {
        Self::new(data_type, SemanticType::None)
    }
}
