//! Property store persisted as a JSON file.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;
use smartfilter_lib::{FilterError, MemoryStore, Properties, PropertyStore};

/// A [`MemoryStore`] written through to a JSON file after every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, FilterError> {
        let path = path.into();
        let objects: BTreeMap<String, Properties> = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!("Opened property store {:?} ({} objects)", path, objects.len());
        Ok(Self {
            path,
            inner: MemoryStore::from_objects(objects),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), FilterError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(self.inner.objects())?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl PropertyStore for JsonFileStore {
    fn object(&self, name: &str) -> Option<Properties> {
        self.inner.object(name)
    }

    fn merge(&mut self, object: &str, properties: Properties) -> Result<(), FilterError> {
        self.inner.merge(object, properties)?;
        self.save()
    }

    fn remove(&mut self, object: &str, names: &[&str]) -> Result<(), FilterError> {
        self.inner.remove(object, names)?;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::Value;

    fn selection(store: &JsonFileStore) -> Option<Value> {
        store
            .object("general")
            .and_then(|props| props.get("selection").cloned())
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("none.json")).unwrap();
        assert!(store.object("general").is_none());
    }

    #[test]
    fn test_changes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("props.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        let mut props = Properties::new();
        props.insert("selection".into(), Value::from("{}"));
        store.merge("general", props).unwrap();

        let mut reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(selection(&reopened), Some(Value::from("{}")));

        reopened.remove("general", &["selection"]).unwrap();
        let again = JsonFileStore::open(&path).unwrap();
        assert_eq!(selection(&again), None);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("props.json");
        fs::write(&path, "{oops").unwrap();

        assert!(matches!(
            JsonFileStore::open(&path),
            Err(FilterError::Json(_))
        ));
    }
}
