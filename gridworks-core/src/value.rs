use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A single cell of grid data. Records are loosely typed: a column may hold
/// strings in one row and numbers in the next, and callers routinely send
/// numbers as strings. All coercion policy lives here so the operations
/// stay consistent with each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Zero-degrading numeric coercion used by Filter, Aggregate, numeric
    /// Sort and Transform's `round`: anything that does not coerce to a
    /// finite number becomes 0 instead of failing the request.
    pub fn coerce_number(&self) -> f64 {
        match self {
            Value::Number(n) if n.is_finite() => *n,
            Value::Number(_) => 0.0,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .unwrap_or(0.0),
            Value::Null => 0.0,
        }
    }

    /// Strict numeric coercion used by Stats: values that do not coerce to
    /// a finite number are excluded from the computation entirely, not
    /// treated as zero.
    pub fn finite_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            Value::Number(_) => None,
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            Value::Null => None,
        }
    }

    /// Display form used by Search, Transform and the string Filter
    /// operators. Null renders empty so "matches empty" filters can pass.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed(""),
            Value::Bool(true) => Cow::Borrowed("true"),
            Value::Bool(false) => Cow::Borrowed("false"),
            Value::Number(n) => Cow::Owned(format_number(*n)),
            Value::String(s) => Cow::Borrowed(s),
        }
    }

    /// Grouping form used by Aggregate. Unlike `text`, null renders as the
    /// literal "null" so null-valued rows bucket separately from
    /// empty-string rows.
    pub fn group_text(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            other => other.text().into_owned(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Integral floats print without a trailing ".0" so grouping keys and
/// string comparisons see "2", not "2.0".
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
