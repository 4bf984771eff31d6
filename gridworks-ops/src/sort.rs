use crate::spec::{Direction, SortSpec, ValueType};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use gridworks_core::{Record, Value};
use std::cmp::Ordering;

/// Stable single-key sort. Records with a missing or null sort key land
/// last for both directions: the null check runs before the direction
/// reversal, so "null is largest" is policy, not an accident of the
/// comparator.
pub fn sort_records(records: &[Record], spec: &SortSpec) -> Vec<Record> {
    let mut sorted: Vec<Record> = records.to_vec();
    // slice::sort_by is stable, so equal keys keep their input order.
    sorted.sort_by(|a, b| {
        let left = present(a.get(&spec.key));
        let right = present(b.get(&spec.key));
        match (left, right) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(l), Some(r)) => {
                let ordering = compare_typed(l, r, spec.value_type);
                match spec.direction {
                    Direction::Asc => ordering,
                    Direction::Desc => ordering.reverse(),
                }
            }
        }
    });
    sorted
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn compare_typed(left: &Value, right: &Value, value_type: ValueType) -> Ordering {
    match value_type {
        ValueType::Number => left
            .coerce_number()
            .partial_cmp(&right.coerce_number())
            .unwrap_or(Ordering::Equal),
        ValueType::Date => parse_timestamp(left).cmp(&parse_timestamp(right)),
        ValueType::String => left
            .text()
            .to_lowercase()
            .cmp(&right.text().to_lowercase()),
    }
}

/// Timestamp in epoch milliseconds. Unparseable dates degrade to 0, the
/// same degradation policy the numeric coercion uses.
fn parse_timestamp(value: &Value) -> i64 {
    if let Value::Number(n) = value {
        return *n as i64;
    }
    let text = value.text();
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return dt.timestamp_millis();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return dt.and_utc().timestamp_millis();
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return dt.and_utc().timestamp_millis();
        }
    }
    0
}
