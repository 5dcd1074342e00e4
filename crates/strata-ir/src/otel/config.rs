//! Export-sink configuration, generic over how a column is referred to.
//!
//! The config-parsing stage produces `OTelData<String>` (plain column names).
//! Binding turns that into `OTelData<ColumnId>` owned by a sink node. Both
//! shapes share one definition so they cannot drift apart.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Collector endpoint. Passed through to the plan untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OTelEndpointConfig {
    pub url: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub insecure: bool,
    #[serde(default)]
    pub timeout_secs: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OTelAttribute<C> {
    pub name: String,
    pub column: C,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OTelQuantile<C> {
    pub quantile: f64,
    pub value_column: C,
}

/// Shape-specific part of a metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OTelMetricData<C> {
    Gauge {
        value_column: C,
    },
    Summary {
        count_column: C,
        sum_column: C,
        #[serde(default)]
        quantiles: Vec<OTelQuantile<C>>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OTelMetric<C> {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub unit_column: C,
    pub time_column: C,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<OTelAttribute<C>>,
    pub data: OTelMetricData<C>,
}

/// Span descriptor. Accepted and carried, but never bound or lowered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OTelSpan {
    pub name: String,
    pub trace_id_column: String,
    pub span_id_column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_span_id_column: Option<String>,
    pub start_time_column: String,
    pub end_time_column: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<OTelAttribute<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OTelData<C> {
    pub endpoint_config: OTelEndpointConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_attributes: Vec<OTelAttribute<C>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<OTelMetric<C>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spans: Vec<OTelSpan>,
}

impl<C> Default for OTelData<C> {
    fn default() -> Self {
        Self {
            endpoint_config: OTelEndpointConfig::default(),
            resource_attributes: Vec::new(),
            metrics: Vec::new(),
            spans: Vec::new(),
        }
    }
}

impl<C> OTelData<C> {
    /// Rebuild the config with every column reference passed through `f`.
    ///
    /// Visit order is fixed: resource attributes, then per metric the unit,
    /// time and attribute columns followed by the shape columns (gauge value;
    /// summary count, sum, quantile values). Spans are copied as-is.
    pub fn try_map_columns<D, E, F>(&self, mut f: F) -> Result<OTelData<D>, E>
    where
        F: FnMut(&C) -> Result<D, E>,
    {
        let resource_attributes = map_attributes(&self.resource_attributes, &mut f)?;

        let mut metrics = Vec::with_capacity(self.metrics.len());
        for metric in &self.metrics {
            let unit_column = f(&metric.unit_column)?;
            let time_column = f(&metric.time_column)?;
            let attributes = map_attributes(&metric.attributes, &mut f)?;
            let data = match &metric.data {
                OTelMetricData::Gauge { value_column } => OTelMetricData::Gauge {
                    value_column: f(value_column)?,
                },
                OTelMetricData::Summary {
                    count_column,
                    sum_column,
                    quantiles,
                } => {
                    let count_column = f(count_column)?;
                    let sum_column = f(sum_column)?;
                    let mut mapped = Vec::with_capacity(quantiles.len());
                    for q in quantiles {
                        mapped.push(OTelQuantile {
                            quantile: q.quantile,
                            value_column: f(&q.value_column)?,
                        });
                    }
                    OTelMetricData::Summary {
                        count_column,
                        sum_column,
                        quantiles: mapped,
                    }
                }
            };
            metrics.push(OTelMetric {
                name: metric.name.clone(),
                description: metric.description.clone(),
                unit_column,
                time_column,
                attributes,
                data,
            });
        }

        Ok(OTelData {
            endpoint_config: self.endpoint_config.clone(),
            resource_attributes,
            metrics,
            spans: self.spans.clone(),
        })
    }
}

fn map_attributes<C, D, E, F>(
    attrs: &[OTelAttribute<C>],
    f: &mut F,
) -> Result<Vec<OTelAttribute<D>>, E>
where
    F: FnMut(&C) -> Result<D, E>,
{
    attrs
        .iter()
        .map(|attr| -> Result<OTelAttribute<D>, E> {
            Ok(OTelAttribute {
                name: attr.name.clone(),
                column: f(&attr.column)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_raw_config() {
        let raw: OTelData<String> = serde_json::from_str(
            r#"{
                "endpoint_config": {"url": "otel-collector:4317", "headers": {"k": "v"}},
                "resource_attributes": [{"name": "service.name", "column": "svc"}],
                "metrics": [{
                    "name": "http.latency",
                    "unit_column": "latency",
                    "time_column": "ts",
                    "data": {
                        "type": "summary",
                        "count_column": "cnt",
                        "sum_column": "total",
                        "quantiles": [{"quantile": 0.5, "value_column": "p50"}]
                    }
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(raw.endpoint_config.headers.get("k").map(String::as_str), Some("v"));
        assert!(!raw.endpoint_config.insecure);
        assert!(raw.spans.is_empty());
        match &raw.metrics[0].data {
            OTelMetricData::Summary { quantiles, .. } => {
                assert_eq!(quantiles[0].value_column, "p50");
            }
            other => panic!("expected summary, got {:?}", other),
        }
    }

    #[test]
    fn test_map_visits_columns_in_binding_order() {
        let raw = OTelData {
            endpoint_config: OTelEndpointConfig::default(),
            resource_attributes: vec![OTelAttribute {
                name: "service.name".to_string(),
                column: "svc".to_string(),
            }],
            metrics: vec![OTelMetric {
                name: "m".to_string(),
                description: String::new(),
                unit_column: "unit".to_string(),
                time_column: "ts".to_string(),
                attributes: vec![OTelAttribute {
                    name: "pod".to_string(),
                    column: "pod".to_string(),
                }],
                data: OTelMetricData::Summary {
                    count_column: "cnt".to_string(),
                    sum_column: "sum".to_string(),
                    quantiles: vec![OTelQuantile {
                        quantile: 0.9,
                        value_column: "p90".to_string(),
                    }],
                },
            }],
            spans: vec![],
        };

        let mut seen = Vec::new();
        let mapped: OTelData<usize> = raw
            .try_map_columns(|name| {
                seen.push(name.clone());
                Ok::<_, ()>(seen.len() - 1)
            })
            .unwrap();

        assert_eq!(seen, vec!["svc", "unit", "ts", "pod", "cnt", "sum", "p90"]);
        assert_eq!(mapped.metrics[0].time_column, 2);
    }
}
