//! Categorical input data.
//!
//! A [`DataView`] is a set of columns of raw cell values. Row `i` of every
//! column describes the same record, which is what makes filtering one
//! column by the selection of another meaningful.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Display format of date values.
pub const DATE_FORMAT: &str = "%b %e, %Y";

/// A raw cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    /// Serialized as `{"date": "2024-01-31"}`.
    Date {
        date: NaiveDate,
    },
    Text(String),
}

impl CellValue {
    /// The text shown for this value in chips and dropdown entries.
    pub fn display_name(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Date { date } => date.format(DATE_FORMAT).to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(date: NaiveDate) -> Self {
        CellValue::Date { date }
    }
}

/// One filterable column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryColumn {
    pub display_name: String,
    #[serde(default)]
    pub values: Vec<CellValue>,
}

impl CategoryColumn {
    pub fn new(display_name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            display_name: display_name.into(),
            values,
        }
    }
}

/// The categorical data handed to the widget on every data update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataView {
    #[serde(default)]
    pub categories: Vec<CategoryColumn>,
}

impl DataView {
    pub fn new(categories: Vec<CategoryColumn>) -> Self {
        Self { categories }
    }

    /// Parse a data view from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn category(&self, name: &str) -> Option<&CategoryColumn> {
        self.categories.iter().find(|c| c.display_name == name)
    }
}

// ----------------------------------------------------------------------------
// Identities
// ----------------------------------------------------------------------------

/// Opaque key identifying one row of one category, as understood by the
/// host's cross-filtering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IdentityKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// Builds identity keys for category rows.
pub trait IdentityProvider {
    fn identity(&self, category: &CategoryColumn, row: usize) -> IdentityKey;
}

/// Identifies rows by index, so the same row has the same key in every
/// category.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowIdentity;

impl IdentityProvider for RowIdentity {
    fn identity(&self, _category: &CategoryColumn, row: usize) -> IdentityKey {
        IdentityKey(format!("row:{}", row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(CellValue::Null.display_name(), "");
        assert_eq!(CellValue::Bool(true).display_name(), "true");
        assert_eq!(CellValue::Number(3.0).display_name(), "3");
        assert_eq!(CellValue::Number(2.5).display_name(), "2.5");
        assert_eq!(CellValue::from("Italy").display_name(), "Italy");
    }

    #[test]
    fn test_date_display_is_space_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(CellValue::from(date).display_name(), "Jan  5, 2024");
    }

    #[test]
    fn test_parse_mixed_values() {
        let json = r#"{"categories":[{"displayName":"Mixed","values":[null,true,4,{"date":"2023-12-25"},"x"]}]}"#;
        let view = DataView::from_json(json).unwrap();
        let values = &view.categories[0].values;

        assert_eq!(values[0], CellValue::Null);
        assert_eq!(values[1], CellValue::Bool(true));
        assert_eq!(values[2], CellValue::Number(4.0));
        assert_eq!(values[3].display_name(), "Dec 25, 2023");
        assert_eq!(values[4], CellValue::from("x"));
    }
}
