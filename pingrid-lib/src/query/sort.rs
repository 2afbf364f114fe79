//! Sort keys and row comparison.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Row;
use crate::model::Value;

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl SortDirection {
    /// Returns `true` for [`SortDirection::Desc`].
    pub fn is_desc(self) -> bool {
        self == SortDirection::Desc
    }
}

/// One entry of a multi-column sort: `{ "id": ..., "desc": ... }` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortKey {
    /// Column (field) id.
    pub id: String,
    /// Sort descending when `true`.
    #[serde(default)]
    pub desc: bool,
}

impl SortKey {
    /// Creates an ascending key.
    pub fn asc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: false,
        }
    }

    /// Creates a descending key.
    pub fn desc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: true,
        }
    }

    /// Returns the direction of this key.
    pub fn direction(&self) -> SortDirection {
        if self.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

/// Compares two rows by a list of sort keys, first key first.
///
/// Nulls (and missing fields) sort last when ascending and first when
/// descending. Rows equal on every key compare `Equal`, so a stable sort keeps
/// their input order.
pub fn compare_rows(a: &Row, b: &Row, keys: &[SortKey]) -> Ordering {
    for key in keys {
        let left = a.value(&key.id);
        let right = b.value(&key.id);

        match (left.is_null(), right.is_null()) {
            (true, true) => continue,
            (true, false) => return if key.desc { Ordering::Less } else { Ordering::Greater },
            (false, true) => return if key.desc { Ordering::Greater } else { Ordering::Less },
            (false, false) => {}
        }

        let ordering = compare_values(left, right);
        if ordering != Ordering::Equal {
            return if key.desc { ordering.reverse() } else { ordering };
        }
    }
    Ordering::Equal
}

/// Compares two non-null values.
///
/// Strings compare with [`locale_compare`], numbers numerically, and mixed
/// types compare their text forms.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(x), Value::String(y)) => locale_compare(x, y),
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => locale_compare(&a.to_string(), &b.to_string()),
        },
    }
}

/// Collation close to a root-locale `localeCompare`.
///
/// Primary pass: punctuation and whitespace before digits before letters,
/// letters compared case-insensitively. Ties are broken by case, lowercase
/// first, then by code point.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let primary = a.chars().flat_map(primary_key).cmp(b.chars().flat_map(primary_key));
    if primary != Ordering::Equal {
        return primary;
    }

    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        return match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => x.cmp(&y),
        };
    }
    a.chars().count().cmp(&b.chars().count())
}

fn primary_key(c: char) -> impl Iterator<Item = (u8, char)> {
    let class = if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    };
    c.to_lowercase().map(move |lower| (class, lower))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(values: &[(&str, Value)]) -> Vec<Row> {
        values
            .iter()
            .map(|(name, age)| Row::new().set("name", *name).set("age", age.clone()))
            .collect()
    }

    fn names(rows: &[Row]) -> Vec<String> {
        rows.iter().map(|r| r.value("name").to_string()).collect()
    }

    #[test]
    fn test_locale_compare() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("Zed", "zed"), Ordering::Greater);
        assert_eq!(locale_compare("item 2", "item10"), Ordering::Less);
        assert_eq!(locale_compare("9", "a"), Ordering::Less);
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_numbers_compare_numerically() {
        assert_eq!(compare_values(&Value::from(9), &Value::from(10)), Ordering::Less);
        assert_eq!(compare_values(&Value::from(2.5), &Value::from(2)), Ordering::Greater);
        assert_eq!(compare_values(&Value::from("9"), &Value::from(10)), Ordering::Greater);
    }

    #[test]
    fn test_nulls_last_ascending_first_descending() {
        let mut data = rows(&[("a", Value::Null), ("b", Value::from(3)), ("c", Value::from(1))]);

        data.sort_by(|a, b| compare_rows(a, b, &[SortKey::asc("age")]));
        assert_eq!(names(&data), vec!["c", "b", "a"]);

        data.sort_by(|a, b| compare_rows(a, b, &[SortKey::desc("age")]));
        assert_eq!(names(&data), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_ties_fall_through_to_next_key_then_input_order() {
        let mut data = rows(&[
            ("x", Value::from(1)),
            ("b", Value::from(2)),
            ("a", Value::from(1)),
            ("x", Value::from(0)),
        ]);
        data.sort_by(|a, b| compare_rows(a, b, &[SortKey::asc("name"), SortKey::desc("age")]));
        let ages: Vec<String> = data.iter().map(|r| r.value("age").to_string()).collect();
        assert_eq!(names(&data), vec!["a", "b", "x", "x"]);
        assert_eq!(ages, vec!["1", "2", "1", "0"]);
    }

    #[test]
    fn test_both_null_continue_to_next_key() {
        let a = Row::new().set("name", "b");
        let b = Row::new().set("name", "a");
        let keys = [SortKey::asc("age"), SortKey::asc("name")];
        assert_eq!(compare_rows(&a, &b, &keys), Ordering::Greater);
    }
}
