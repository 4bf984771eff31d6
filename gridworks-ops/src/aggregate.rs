use crate::spec::{AggregateOp, AggregateSpec};
use gridworks_core::{Record, Value};
use std::collections::HashMap;

/// Sentinel bucket for records missing the grouping field. A field that
/// actually holds the string "undefined" lands in the same bucket; the
/// grid surface never produces that string, so the collision is accepted
/// rather than complicating the key space.
const MISSING_GROUP: &str = "undefined";

/// Groups records by the string form of the grouping field and computes
/// one output value per requested aggregation. Groups emit in first-seen
/// order so the result is deterministic.
pub fn aggregate_records(records: &[Record], spec: &AggregateSpec) -> Vec<Record> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<usize>> = HashMap::new();

    for (index, record) in records.iter().enumerate() {
        let key = match record.get(&spec.group_by_key) {
            Some(value) => value.group_text(),
            None => MISSING_GROUP.to_string(),
        };
        groups
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(index);
    }

    order
        .into_iter()
        .map(|key| {
            let members = &groups[&key];
            let mut row = Record::new();
            row.insert(spec.group_by_key.clone(), Value::String(key));
            for aggregation in &spec.aggregations {
                let output_key = aggregation.output_key.clone().unwrap_or_else(|| {
                    format!("{}_{}", aggregation.operation, aggregation.source_field)
                });
                let value = reduce(records, members, &aggregation.source_field, aggregation.operation);
                row.insert(output_key, Value::Number(value));
            }
            row
        })
        .collect()
}

fn reduce(records: &[Record], members: &[usize], field: &str, op: AggregateOp) -> f64 {
    if op == AggregateOp::Count {
        return members.len() as f64;
    }
    // Non-numeric source values coerce to 0 rather than failing the group.
    let values = members.iter().map(|&i| {
        records[i]
            .get(field)
            .map(Value::coerce_number)
            .unwrap_or(0.0)
    });
    match op {
        AggregateOp::Sum => values.sum(),
        AggregateOp::Avg => {
            let count = members.len() as f64;
            let total: f64 = values.sum();
            if count == 0.0 {
                0.0
            } else {
                total / count
            }
        }
        AggregateOp::Min => values.fold(f64::INFINITY, f64::min),
        AggregateOp::Max => values.fold(f64::NEG_INFINITY, f64::max),
        AggregateOp::Count => unreachable!(),
    }
}
