use gridworks_core::Record;
use gridworks_ops::{AggregateSpec, FilterClause, SearchSpec, SortSpec, StatsSpec, TransformStep};
use serde::{Deserialize, Serialize};

/// The closed set of operations the engine understands. Dispatch is a
/// match on this enum, so adding an operation is a compile-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Sort,
    Filter,
    Aggregate,
    Search,
    Transform,
    Stats,
}

impl OpKind {
    /// The tag stays a raw string in the envelope so an unknown tag still
    /// decodes far enough to answer with a correlated failure.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "SORT" => Some(OpKind::Sort),
            "FILTER" => Some(OpKind::Filter),
            "AGGREGATE" => Some(OpKind::Aggregate),
            "SEARCH" => Some(OpKind::Search),
            "TRANSFORM" => Some(OpKind::Transform),
            "STATS" => Some(OpKind::Stats),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            OpKind::Sort => "SORT",
            OpKind::Filter => "FILTER",
            OpKind::Aggregate => "AGGREGATE",
            OpKind::Search => "SEARCH",
            OpKind::Transform => "TRANSFORM",
            OpKind::Stats => "STATS",
        }
    }
}

/// One request as it crosses the worker boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub operation_tag: String,
    pub correlation_id: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Exactly one response per request. `success` and `result` /
/// `error_message` are mutually exclusive; duration is reported for both
/// outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub correlation_id: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<f64>,
}

impl Response {
    pub fn ok(correlation_id: String, result: serde_json::Value, duration_ms: f64) -> Self {
        Self {
            correlation_id,
            success: true,
            result: Some(result),
            error_message: None,
            duration_ms: Some(duration_ms),
        }
    }

    pub fn failure(correlation_id: String, message: String, duration_ms: Option<f64>) -> Self {
        Self {
            correlation_id,
            success: false,
            result: None,
            error_message: Some(message),
            duration_ms,
        }
    }
}

// Per-operation job payloads: the records to operate on plus the spec
// fields flattened alongside them. The engine holds no state between
// requests, so every request carries its own data.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortJob {
    pub records: Vec<Record>,
    #[serde(flatten)]
    pub spec: SortSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterJob {
    pub records: Vec<Record>,
    pub clauses: Vec<FilterClause>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateJob {
    pub records: Vec<Record>,
    #[serde(flatten)]
    pub spec: AggregateSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchJob {
    pub records: Vec<Record>,
    #[serde(flatten)]
    pub spec: SearchSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformJob {
    pub records: Vec<Record>,
    pub steps: Vec<TransformStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsJob {
    pub records: Vec<Record>,
    #[serde(flatten)]
    pub spec: StatsSpec,
}
