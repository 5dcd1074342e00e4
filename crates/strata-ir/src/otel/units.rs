//! Semantic type → OpenTelemetry unit symbol

use crate::types::SemanticType;

/// Map a semantic type to its UCUM terminal symbol.
///
/// See <https://ucum.org/ucum.html#section-Tables-of-Terminal-Symbols>.
/// Most semantic types have no standard unit and map to the empty string.
/// No wildcard arm: every new semantic type must be mapped here.
pub fn otel_unit(semantic_type: SemanticType) -> &'static str {
    match semantic_type {
        SemanticType::DurationNs | SemanticType::DurationNsQuantiles => "ns",
        SemanticType::Bytes => "By",
        SemanticType::Percent | SemanticType::ThroughputPerNs => "/ns",
        SemanticType::ThroughputBytesPerNs => "By/ns",

        // Not in the unit tables; not expected as metric values.
        SemanticType::Unspecified
        | SemanticType::None
        | SemanticType::TimeNs
        | SemanticType::AgentUid
        | SemanticType::Asid
        | SemanticType::Upid
        | SemanticType::ServiceName
        | SemanticType::PodName
        | SemanticType::PodPhase
        | SemanticType::PodStatus
        | SemanticType::NodeName
        | SemanticType::ContainerName
        | SemanticType::ContainerState
        | SemanticType::ContainerStatus
        | SemanticType::NamespaceName
        | SemanticType::Quantiles
        | SemanticType::IpAddress
        | SemanticType::Port
        | SemanticType::HttpReqMethod
        | SemanticType::HttpRespStatus
        | SemanticType::HttpRespMessage
        | SemanticType::ScriptReference => "",
    }
}
