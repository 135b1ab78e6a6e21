//! Host property bag.
//!
//! Settings and the persisted selection live in named objects of loosely
//! typed properties (`general.selection`, `search.limit`, ...). The widget
//! reads them on every update and writes the selection back through
//! [`PropertyStore::merge`] / [`PropertyStore::remove`].

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::Result;

/// Properties of one object.
pub type Properties = serde_json::Map<String, Value>;

/// Backend trait for property storage.
pub trait PropertyStore {
    /// All properties of an object, or `None` if the object has never been
    /// written.
    fn object(&self, name: &str) -> Option<Properties>;

    /// Set the given properties of an object, keeping the others.
    fn merge(&mut self, object: &str, properties: Properties) -> Result<()>;

    /// Delete properties of an object.
    fn remove(&mut self, object: &str, names: &[&str]) -> Result<()>;
}

/// In-memory property store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    objects: BTreeMap<String, Properties>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style property setter.
    pub fn with(mut self, object: &str, name: &str, value: impl Into<Value>) -> Self {
        self.set(object, name, value);
        self
    }

    pub fn set(&mut self, object: &str, name: &str, value: impl Into<Value>) {
        self.objects
            .entry(object.to_string())
            .or_default()
            .insert(name.to_string(), value.into());
    }

    pub fn get(&self, object: &str, name: &str) -> Option<&Value> {
        self.objects.get(object).and_then(|props| props.get(name))
    }

    /// Every object, for serializing the whole store.
    pub fn objects(&self) -> &BTreeMap<String, Properties> {
        &self.objects
    }

    pub fn from_objects(objects: BTreeMap<String, Properties>) -> Self {
        Self { objects }
    }
}

impl PropertyStore for MemoryStore {
    fn object(&self, name: &str) -> Option<Properties> {
        self.objects.get(name).cloned()
    }

    fn merge(&mut self, object: &str, properties: Properties) -> Result<()> {
        self.objects
            .entry(object.to_string())
            .or_default()
            .extend(properties);
        Ok(())
    }

    fn remove(&mut self, object: &str, names: &[&str]) -> Result<()> {
        if let Some(props) = self.objects.get_mut(object) {
            for name in names {
                props.remove(*name);
            }
        }
        Ok(())
    }
}
