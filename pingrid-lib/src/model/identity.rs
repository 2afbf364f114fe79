//! Row identity resolution

use std::borrow::Borrow;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::Row;

/// Stable identifier of a logical row, derived from its field values.
///
/// Used wherever rows are compared across fetches: pinning, selection and
/// de-duplication of the merged row sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    /// Creates a row id from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RowId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for RowId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Derives a [`RowId`] from a row.
///
/// Implementations must be pure: the same field values always produce the
/// same id. Two distinct rows that map to one id are treated as the same row.
pub trait RowIdentity: Send + Sync {
    /// Returns the identifier of `row`.
    fn identify(&self, row: &Row) -> RowId;
}

impl<F> RowIdentity for F
where
    F: Fn(&Row) -> RowId + Send + Sync,
{
    fn identify(&self, row: &Row) -> RowId {
        self(row)
    }
}

/// Identifies rows by concatenating the string forms of designated fields.
///
/// Null or missing fields contribute an empty string. With the default empty
/// separator, `("ab", "c")` and `("a", "bc")` collide; use
/// [`FieldConcat::with_separator`] or a [`KeyField`] when the data allows it.
///
/// # Example
///
/// ```
/// use pingrid_lib::model::{FieldConcat, Row, RowIdentity};
///
/// let identity = FieldConcat::new(["firstName", "lastName"]);
/// let row = Row::new().set("firstName", "Ada").set("lastName", "Lovelace");
///
/// assert_eq!(identity.identify(&row).as_str(), "AdaLovelace");
/// ```
#[derive(Debug, Clone)]
pub struct FieldConcat {
    fields: Vec<String>,
    separator: String,
}

impl FieldConcat {
    /// Creates a resolver over the given fields, in order.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            separator: String::new(),
        }
    }

    /// Places `separator` between field values.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Returns the designated fields.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl RowIdentity for FieldConcat {
    fn identify(&self, row: &Row) -> RowId {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|field| match row.get(field) {
                Some(value) if !value.is_null() => value.to_string(),
                _ => String::new(),
            })
            .collect();
        RowId(parts.join(&self.separator))
    }
}

/// Identifies rows by a single field that is unique in the dataset.
#[derive(Debug, Clone)]
pub struct KeyField(String);

impl KeyField {
    /// Creates a resolver over the given key field.
    pub fn new(field: impl Into<String>) -> Self {
        Self(field.into())
    }
}

impl RowIdentity for KeyField {
    fn identify(&self, row: &Row) -> RowId {
        match row.get(&self.0) {
            Some(value) if !value.is_null() => RowId(value.to_string()),
            _ => RowId(String::new()),
        }
    }
}
