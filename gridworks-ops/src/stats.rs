use crate::spec::StatsSpec;
use gridworks_core::Record;
use serde::{Deserialize, Serialize};

/// Descriptive statistics for one field. Serializes with the wire names
/// the dashboard expects (`stdDev`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSummary {
    pub field: String,
    pub count: usize,
    pub sum: f64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
}

/// Computes per-field statistics over the numeric values of each
/// requested field, in request order.
///
/// Unlike Filter and Aggregate, non-numeric values are excluded rather
/// than coerced to zero, so a column of labels with a few numbers reports
/// on just those numbers. A field with no numeric values reports all
/// zeros, never NaN. Standard deviation is the population form (divide by
/// N).
pub fn compute_stats(records: &[Record], spec: &StatsSpec) -> Vec<FieldSummary> {
    spec.fields
        .iter()
        .map(|field| summarize(records, field))
        .collect()
}

fn summarize(records: &[Record], field: &str) -> FieldSummary {
    let values: Vec<f64> = records
        .iter()
        .filter_map(|record| record.get(field).and_then(|v| v.finite_number()))
        .collect();

    if values.is_empty() {
        return FieldSummary {
            field: field.to_string(),
            count: 0,
            sum: 0.0,
            avg: 0.0,
            min: 0.0,
            max: 0.0,
            std_dev: 0.0,
        };
    }

    let count = values.len();
    let sum: f64 = values.iter().sum();
    let avg = sum / count as f64;
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / count as f64;

    FieldSummary {
        field: field.to_string(),
        count,
        sum,
        avg,
        min,
        max,
        std_dev: variance.sqrt(),
    }
}
