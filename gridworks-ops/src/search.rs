use crate::spec::SearchSpec;
use gridworks_core::{Record, Value};

/// Case-insensitive match across a set of fields; a record matches when
/// any listed field matches (OR across fields). Absent and null fields
/// never match.
///
/// Fuzzy mode is a subsequence match, not edit distance: the query
/// characters must appear in order in the field text but need not be
/// contiguous. Short queries will match aggressively.
pub fn search_records(records: &[Record], spec: &SearchSpec) -> Vec<Record> {
    let query = spec.query.to_lowercase();
    records
        .iter()
        .filter(|record| {
            spec.fields.iter().any(|field| match record.get(field) {
                Some(value) if !value.is_null() => {
                    let text = value.text().to_lowercase();
                    if spec.fuzzy {
                        is_subsequence(&query, &text)
                    } else {
                        text.contains(&query)
                    }
                }
                _ => false,
            })
        })
        .cloned()
        .collect()
}

fn is_subsequence(query: &str, text: &str) -> bool {
    let mut chars = query.chars().peekable();
    for c in text.chars() {
        match chars.peek() {
            Some(&next) if next == c => {
                chars.next();
            }
            Some(_) => {}
            None => return true,
        }
    }
    chars.peek().is_none()
}
