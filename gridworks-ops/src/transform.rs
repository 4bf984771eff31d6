use crate::spec::{TransformOp, TransformStep};
use gridworks_core::{Record, Value};

/// Applies an ordered list of per-field operations to a copy of every
/// record. Field names never change; values are rewritten in place within
/// the copy. Absent and null fields are skipped, not defaulted.
pub fn transform_records(records: &[Record], steps: &[TransformStep]) -> Vec<Record> {
    records
        .iter()
        .map(|record| {
            let mut out = record.clone();
            for step in steps {
                let current = match out.get(&step.field) {
                    Some(value) if !value.is_null() => value.clone(),
                    _ => continue,
                };
                out.insert(step.field.clone(), apply(&current, step.operation));
            }
            out
        })
        .collect()
}

fn apply(value: &Value, op: TransformOp) -> Value {
    match op {
        TransformOp::Uppercase => Value::String(value.text().to_uppercase()),
        TransformOp::Lowercase => Value::String(value.text().to_lowercase()),
        TransformOp::Trim => Value::String(value.text().trim().to_string()),
        // Non-numeric input rounds to 0 via the zero-degrading coercion,
        // matching Filter and Aggregate.
        TransformOp::Round => Value::Number(value.coerce_number().round()),
    }
}
