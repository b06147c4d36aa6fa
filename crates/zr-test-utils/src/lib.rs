//! Testing utilities for the reconciliation workspace
//!
//! An in-memory host store that records every call, and settings fixtures.

#![allow(missing_docs)]

use std::cell::{Cell, RefCell};

use serde_json::{json, Map, Value};
use zr_core::{AccessorError, SettingsAccessor};
use zr_schema::get_defaults;

/// In-memory host store recording every accessor call
#[derive(Debug, Default)]
pub struct RecordingStore {
    entries: Map<String, Value>,
    get_all_calls: Cell<usize>,
    get_calls: RefCell<Vec<String>>,
    writes: Vec<(String, Value)>,
    fail_writes: bool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the keys of `value` (must be an object)
    pub fn with_entries(value: Value) -> Self {
        let entries = match value {
            Value::Object(map) => map,
            other => panic!("store fixture must be an object, got {other}"),
        };
        Self {
            entries,
            ..Self::default()
        }
    }

    /// Make every subsequent `set` fail
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Simulate the host writing a key out-of-band
    pub fn host_write(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }

    pub fn entry(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn snapshot(&self) -> Value {
        Value::Object(self.entries.clone())
    }

    pub fn writes(&self) -> &[(String, Value)] {
        &self.writes
    }

    pub fn written_keys(&self) -> Vec<&str> {
        self.writes.iter().map(|(key, _)| key.as_str()).collect()
    }

    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    pub fn get_all_count(&self) -> usize {
        self.get_all_calls.get()
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.get_calls.borrow().clone()
    }

    /// Forget recorded calls, keeping the stored entries
    pub fn reset_calls(&mut self) {
        self.get_all_calls.set(0);
        self.get_calls.borrow_mut().clear();
        self.writes.clear();
    }
}

impl SettingsAccessor for RecordingStore {
    fn get_all(&self) -> Result<Option<Value>, AccessorError> {
        self.get_all_calls.set(self.get_all_calls.get() + 1);
        if self.entries.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.snapshot()))
    }

    fn get(&self, key: &str) -> Result<Option<Value>, AccessorError> {
        self.get_calls.borrow_mut().push(key.to_string());
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), AccessorError> {
        if self.fail_writes {
            return Err(AccessorError::Backend(format!("write to '{key}' rejected")));
        }
        self.writes.push((key.to_string(), value.clone()));
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Three raw request entries: two share an API key, two share a library
pub fn sample_data_requests() -> Value {
    json!([
        {"apikey": "K1", "dataURI": "users/123/items", "name": "My library"},
        {"apikey": "K1", "dataURI": "groups/456/items/top", "name": "Lab group"},
        {"apiKey": "K2", "dataURI": "users/123/collections/ABC/items", "name": "Reading list"}
    ])
}

/// Host store holding every section with its default, plus structured requests
pub fn fully_populated_store() -> Value {
    let mut stored = get_defaults().into_value();
    stored["requests"] = json!({
        "dataRequests": sample_data_requests(),
        "apiKeys": [],
        "libraries": []
    });
    stored
}

/// Legacy `roam/js` settings object
pub fn legacy_manual_settings() -> Value {
    json!({
        "dataRequests": [{"apikey": "K", "dataURI": "users/123/items", "name": "Lib"}],
        "other": {"autoload": true}
    })
}
