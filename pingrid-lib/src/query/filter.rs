//! Column filter semantics.

use serde::Deserialize;
use serde::Serialize;

use crate::model::Row;
use crate::model::Value;

/// A filter on a single column: `{ "id": ..., "value": ... }` on the wire.
///
/// Matching rules, shared by every gateway implementation:
///
/// - a blank value (null or `""`) matches every row;
/// - a row whose field is missing or null never matches a non-blank filter;
/// - strings match by case-insensitive substring containment;
/// - numbers match when the filter text parses to the same number, or when
///   the number's text contains the filter text;
/// - anything else matches by case-insensitive containment of its text form.
///
/// # Example
///
/// ```
/// use pingrid_lib::model::Row;
/// use pingrid_lib::query::ColumnFilter;
///
/// let row = Row::new().set("lastName", "Lovelace").set("age", 36);
///
/// assert!(ColumnFilter::new("lastName", "LOVE").matches(&row));
/// assert!(ColumnFilter::new("age", "36").matches(&row));
/// assert!(ColumnFilter::new("age", "3").matches(&row));
/// assert!(!ColumnFilter::new("age", "40").matches(&row));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFilter {
    /// Column (field) id.
    pub id: String,
    /// Filter value; blank means "no filter".
    #[serde(default)]
    pub value: Value,
}

impl ColumnFilter {
    /// Creates a filter on `id`.
    pub fn new(id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }

    /// Returns `true` if this filter never excludes a row.
    pub fn is_blank(&self) -> bool {
        self.value.is_blank()
    }

    /// Returns `true` if `row` passes this filter.
    pub fn matches(&self, row: &Row) -> bool {
        if self.is_blank() {
            return true;
        }

        let field = row.value(&self.id);
        if field.is_null() {
            return false;
        }

        let text = self.value.to_string().trim().to_lowercase();

        match field {
            Value::String(s) => s.to_lowercase().contains(&text),
            Value::Int(_) | Value::Float(_) => {
                let exact = match (parse_number(&text), field.as_f64()) {
                    (Some(wanted), Some(actual)) => wanted == actual,
                    _ => false,
                };
                exact || field.to_string().contains(&text)
            }
            other => other.to_string().to_lowercase().contains(&text),
        }
    }
}

/// Returns `true` if `row` passes every filter.
pub fn row_matches(row: &Row, filters: &[ColumnFilter]) -> bool {
    filters.iter().all(|filter| filter.matches(row))
}

/// Numeric coercion of filter text.
///
/// Empty text is zero; `0x`, `0o` and `0b` prefixes take an unsigned body in
/// that radix. Text that is not a finite number yields `None`, which leaves
/// only the containment check.
fn parse_number(text: &str) -> Option<f64> {
    if text.is_empty() {
        return Some(0.0);
    }
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(body) = text.strip_prefix(prefix) {
            if body.starts_with(['+', '-']) {
                return None;
            }
            return u128::from_str_radix(body, radix).ok().map(|v| v as f64);
        }
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
