// Operation specs as they arrive on the wire (camelCase field names).

use gridworks_core::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Number,
    Date,
}

impl Default for ValueType {
    fn default() -> Self {
        ValueType::String
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub key: String,
    pub direction: Direction,
    #[serde(default)]
    pub value_type: ValueType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOp {
    Eq,
    Ne,
    Gt,
    Lt,
    Gte,
    Lte,
    Contains,
    StartsWith,
    EndsWith,
}

/// One field/operator/value triple. A record matches a clause list when
/// every clause matches (AND semantics).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterClause {
    pub key: String,
    pub operator: FilterOp,
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateOp {
    Sum,
    Avg,
    Min,
    Max,
    Count,
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AggregateOp::Sum => "sum",
            AggregateOp::Avg => "avg",
            AggregateOp::Min => "min",
            AggregateOp::Max => "max",
            AggregateOp::Count => "count",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    pub source_field: String,
    pub operation: AggregateOp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSpec {
    pub group_by_key: String,
    pub aggregations: Vec<Aggregation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSpec {
    pub query: String,
    pub fields: Vec<String>,
    #[serde(default)]
    pub fuzzy: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformOp {
    Uppercase,
    Lowercase,
    Trim,
    Round,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformStep {
    pub field: String,
    pub operation: TransformOp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSpec {
    pub fields: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_spec_wire_shape() {
        let spec: SortSpec =
            serde_json::from_str(r#"{"key":"age","direction":"desc","valueType":"number"}"#)
                .unwrap();
        assert_eq!(spec.direction, Direction::Desc);
        assert_eq!(spec.value_type, ValueType::Number);
    }

    #[test]
    fn test_sort_spec_defaults_to_string_type() {
        let spec: SortSpec =
            serde_json::from_str(r#"{"key":"name","direction":"asc"}"#).unwrap();
        assert_eq!(spec.value_type, ValueType::String);
    }

    #[test]
    fn test_filter_operator_names() {
        let clause: FilterClause =
            serde_json::from_str(r#"{"key":"name","operator":"startsWith","value":"Al"}"#)
                .unwrap();
        assert_eq!(clause.operator, FilterOp::StartsWith);
    }

    #[test]
    fn test_aggregation_output_key_optional() {
        let agg: Aggregation =
            serde_json::from_str(r#"{"sourceField":"amount","operation":"sum"}"#).unwrap();
        assert!(agg.output_key.is_none());
        assert_eq!(agg.operation.to_string(), "sum");
    }
}
