//! The persisted filter map: category name to selected identity keys.

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::{CellValue, DataView, IdentityKey, IdentityProvider};
use crate::error::Result;

/// Selected identity keys per category, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filters(BTreeMap<String, Vec<IdentityKey>>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the map from the persisted `selection` property.
    ///
    /// Missing or malformed JSON yields an empty map. The legacy format, a
    /// JSON array of JSON-encoded raw values, is upgraded against the first
    /// category; values matching no row are dropped. Every category of
    /// `data` gets an entry.
    pub fn load(selection: Option<&str>, data: &DataView, identities: &impl IdentityProvider) -> Self {
        let mut filters = match selection.map(serde_json::from_str::<Value>) {
            None => Self::new(),
            Some(Err(e)) => {
                warn!("Ignoring malformed selection: {}", e);
                Self::new()
            }
            Some(Ok(Value::Array(legacy))) => Self::upgrade(&legacy, data, identities),
            Some(Ok(value)) => serde_json::from_value(value).unwrap_or_else(|e| {
                warn!("Ignoring selection with unexpected shape: {}", e);
                Self::new()
            }),
        };
        filters.ensure_categories(data);
        filters
    }

    fn upgrade(legacy: &[Value], data: &DataView, identities: &impl IdentityProvider) -> Self {
        let mut filters = Self::new();
        let Some(category) = data.categories.first() else {
            return filters;
        };

        let keys = filters.0.entry(category.display_name.clone()).or_default();
        for item in legacy {
            let Some(target) = legacy_display_name(item) else {
                warn!("Dropping unparsable legacy filter value {}", item);
                continue;
            };
            match category
                .values
                .iter()
                .position(|v| v.display_name() == target)
            {
                Some(row) => keys.push(identities.identity(category, row)),
                None => warn!("Dropping legacy filter value {:?}, no matching row", target),
            }
        }
        debug!(
            "Upgraded {} legacy filter values into {:?}",
            keys.len(),
            category.display_name
        );
        filters
    }

    /// Add an empty entry for every category that has none.
    pub fn ensure_categories(&mut self, data: &DataView) {
        for category in &data.categories {
            self.0.entry(category.display_name.clone()).or_default();
        }
    }

    /// Keys of a category, empty for unknown categories.
    pub fn get(&self, category: &str) -> &[IdentityKey] {
        self.0.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, category: &str, key: &IdentityKey) -> bool {
        self.get(category).contains(key)
    }

    /// Append a key unless present.
    pub fn add(&mut self, category: &str, key: IdentityKey) {
        let keys = self.0.entry(category.to_string()).or_default();
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    pub fn remove(&mut self, category: &str, key: &IdentityKey) {
        if let Some(keys) = self.0.get_mut(category) {
            keys.retain(|k| k != key);
        }
    }

    pub fn clear_category(&mut self, category: &str) {
        if let Some(keys) = self.0.get_mut(category) {
            keys.clear();
        }
    }

    /// Whether no category has a selected key.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    /// Categories with at least one selected key.
    pub fn active(&self) -> impl Iterator<Item = (&str, &[IdentityKey])> {
        self.0
            .iter()
            .filter(|(_, keys)| !keys.is_empty())
            .map(|(name, keys)| (name.as_str(), keys.as_slice()))
    }

    /// Whether a row of `category` survives the filters of every other
    /// category.
    pub fn admits(&self, category: &str, key: &IdentityKey) -> bool {
        self.active()
            .filter(|(name, _)| *name != category)
            .all(|(_, keys)| keys.contains(key))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// The display text a legacy entry referred to. Entries are JSON strings
/// holding an encoded raw value, e.g. `"\"Italy\""` or `"42"`.
fn legacy_display_name(item: &Value) -> Option<String> {
    let encoded = item.as_str()?;
    let raw: CellValue = serde_json::from_str(encoded).ok()?;
    Some(raw.display_name())
}
