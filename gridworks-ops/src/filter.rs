use crate::spec::{FilterClause, FilterOp};
use gridworks_core::{Record, Value};

/// Keeps the records that match every clause (AND semantics; OR and
/// grouping are out of scope). An absent field is treated as an empty or
/// zero value for the operator's comparison, not as an automatic
/// non-match, so clauses that look for "empty" values can pass.
pub fn filter_records(records: &[Record], clauses: &[FilterClause]) -> Vec<Record> {
    records
        .iter()
        .filter(|record| clauses.iter().all(|clause| clause_matches(record, clause)))
        .cloned()
        .collect()
}

fn clause_matches(record: &Record, clause: &FilterClause) -> bool {
    let field = record.get(&clause.key);
    match clause.operator {
        FilterOp::Eq => field.unwrap_or(&Value::Null) == &clause.value,
        FilterOp::Ne => field.unwrap_or(&Value::Null) != &clause.value,
        FilterOp::Gt | FilterOp::Lt | FilterOp::Gte | FilterOp::Lte => {
            let left = field.map(Value::coerce_number).unwrap_or(0.0);
            let right = clause.value.coerce_number();
            match clause.operator {
                FilterOp::Gt => left > right,
                FilterOp::Lt => left < right,
                FilterOp::Gte => left >= right,
                FilterOp::Lte => left <= right,
                _ => unreachable!(),
            }
        }
        FilterOp::Contains | FilterOp::StartsWith | FilterOp::EndsWith => {
            let haystack = field
                .map(|v| v.text().to_lowercase())
                .unwrap_or_default();
            let needle = clause.value.text().to_lowercase();
            match clause.operator {
                FilterOp::Contains => haystack.contains(&needle),
                FilterOp::StartsWith => haystack.starts_with(&needle),
                FilterOp::EndsWith => haystack.ends_with(&needle),
                _ => unreachable!(),
            }
        }
    }
}
