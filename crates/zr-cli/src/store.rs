//! JSON file acting as the host's key/value settings store
//!
//! The file holds one object whose top-level keys are the store keys. Every
//! read goes to disk so that `get` observes writes made by other processes
//! after the snapshot was taken.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use zr_core::{AccessorError, SettingsAccessor};

/// Settings store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store at `path`; the file may not exist yet
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file; a missing or blank file is an empty store
    fn read(&self) -> Result<Option<Value>, AccessorError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn read_entries(&self) -> Result<Map<String, Value>, AccessorError> {
        match self.read()? {
            None | Some(Value::Null) => Ok(Map::new()),
            Some(Value::Object(map)) => Ok(map),
            Some(_) => Err(AccessorError::Backend(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
        }
    }

    fn write_entries(&self, entries: Map<String, Value>) -> Result<(), AccessorError> {
        let mut text = serde_json::to_string_pretty(&Value::Object(entries))?;
        text.push('\n');
        replace_file(&self.path, &text)?;
        Ok(())
    }
}

/// Replace `path` via a sibling temp file.
/// The temp file is removed if the swap fails.
fn replace_file(path: &Path, text: &str) -> io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, text)?;
    if let Err(err) = fs::rename(&tmp, path) {
        if let Err(cleanup) = fs::remove_file(&tmp) {
            tracing::warn!(path = %tmp.display(), error = %cleanup, "failed to remove temporary store file");
        }
        return Err(err);
    }
    Ok(())
}

impl SettingsAccessor for JsonFileStore {
    fn get_all(&self) -> Result<Option<Value>, AccessorError> {
        self.read()
    }

    fn get(&self, key: &str) -> Result<Option<Value>, AccessorError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), AccessorError> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value);
        tracing::debug!(key, path = %self.path.display(), "store entry written");
        self.write_entries(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_in(dir: &tempfile::TempDir, contents: Option<&str>) -> JsonFileStore {
        let path = dir.path().join("store.json");
        if let Some(contents) = contents {
            fs::write(&path, contents).unwrap();
        }
        JsonFileStore::new(path)
    }

    #[test]
    fn missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir, None);

        assert_eq!(store.get_all().unwrap(), None);
        assert_eq!(store.get("annotations").unwrap(), None);
    }

    #[test]
    fn blank_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir, Some("  \n"));
        assert_eq!(store.get_all().unwrap(), None);
    }

    #[test]
    fn reads_existing_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir, Some(r#"{"copy": {"template": ""}}"#));

        assert_eq!(store.get_all().unwrap(), Some(json!({"copy": {"template": ""}})));
        assert_eq!(store.get("copy").unwrap(), Some(json!({"template": ""})));
        assert_eq!(store.get("notes").unwrap(), None);
    }

    #[test]
    fn set_creates_and_extends_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir, None);

        store.set("copy", json!({"template": "x"})).unwrap();
        store.set("notes", json!({"use": "text"})).unwrap();

        let on_disk: Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(on_disk, json!({"copy": {"template": "x"}, "notes": {"use": "text"}}));
        assert!(!dir.path().join("store.json.tmp").exists());
    }

    #[test]
    fn get_sees_out_of_band_writes() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir, Some("{}"));

        fs::write(store.path(), r#"{"metadata": {"use": "function"}}"#).unwrap();
        assert_eq!(store.get("metadata").unwrap(), Some(json!({"use": "function"})));
    }

    #[test]
    fn invalid_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir, Some("{not json"));
        assert!(matches!(store.get_all(), Err(AccessorError::Json(_))));
    }

    #[test]
    fn non_object_file_rejects_writes() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir, Some("[1, 2]"));

        assert_eq!(store.get_all().unwrap(), Some(json!([1, 2])));
        assert!(matches!(store.set("copy", json!({})), Err(AccessorError::Backend(_))));
    }

    #[test]
    fn writes_indented_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir, None);

        store.set("other", json!({"autoload": false})).unwrap();
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "{\n  \"other\": {\n    \"autoload\": false\n  }\n}\n"
        );
    }

    #[test]
    fn failed_swap_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("store.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("occupied"), "x").unwrap();

        assert!(replace_file(&target, "{}\n").is_err());
        assert!(!dir.path().join("store.json.tmp").exists());
        assert!(target.is_dir());
    }
}
