//! Merged settings object

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::defaults::section_defaults;
use crate::section::SectionName;

/// A settings object keyed by section name.
///
/// Values produced by [`crate::merge`] or [`crate::get_defaults`] always hold
/// every recognised section and leaf. Keys the schema does not know are kept
/// as they were stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(Map<String, Value>);

impl Settings {
    /// Wrap an existing JSON map
    #[inline]
    #[must_use]
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Borrow the underlying map
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Convert into a JSON object value
    #[inline]
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Get a recognised section as an object.
    ///
    /// Returns `None` when the section is absent or not stored as an object.
    #[inline]
    #[must_use]
    pub fn section(&self, section: SectionName) -> Option<&Map<String, Value>> {
        self.0.get(section.as_str()).and_then(Value::as_object)
    }

    /// Mutable access to a recognised section
    #[inline]
    pub fn section_mut(&mut self, section: SectionName) -> Option<&mut Map<String, Value>> {
        self.0.get_mut(section.as_str()).and_then(Value::as_object_mut)
    }

    /// Get a value by JSON pointer, e.g. `/metadata/smartblock/param`.
    #[must_use]
    pub fn get(&self, pointer: &str) -> Option<&Value> {
        let rest = pointer.strip_prefix('/')?;
        let (head, tail) = match rest.find('/') {
            Some(idx) => rest.split_at(idx),
            None => (rest, ""),
        };
        let head = head.replace("~1", "/").replace("~0", "~");
        self.0.get(&head)?.pointer(tail)
    }

    /// Iterate over the recognised sections present, in storage order
    pub fn sections(&self) -> impl Iterator<Item = (SectionName, &Value)> + '_ {
        SectionName::ALL
            .into_iter()
            .filter_map(|section| self.0.get(section.as_str()).map(|value| (section, value)))
    }

    /// Top-level keys the schema does not recognise
    pub fn unknown_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|key| !SectionName::is_recognised(key))
    }

    /// JSON pointers of recognised leaves that are absent.
    ///
    /// Only descends where both the default and the stored value are objects,
    /// mirroring how deep the merge goes.
    #[must_use]
    pub fn missing_leaves(&self) -> Vec<String> {
        let mut missing = Vec::new();
        for section in SectionName::ALL {
            let mut path = format!("/{}", section.as_str());
            match self.0.get(section.as_str()) {
                Some(stored) => collect_missing(&section_defaults(section), stored, &mut path, &mut missing),
                None => missing.push(path),
            }
        }
        missing
    }

    /// Whether every recognised section and leaf is present
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_leaves().is_empty()
    }
}

impl From<Settings> for Value {
    fn from(settings: Settings) -> Self {
        settings.into_value()
    }
}

fn collect_missing(default: &Value, stored: &Value, path: &mut String, out: &mut Vec<String>) {
    let (Value::Object(default_map), Value::Object(stored_map)) = (default, stored) else {
        return;
    };
    for (key, default_value) in default_map {
        let len = path.len();
        path.push('/');
        path.push_str(&key.replace('~', "~0").replace('/', "~1"));
        match stored_map.get(key) {
            Some(stored_value) => collect_missing(default_value, stored_value, path, out),
            None => out.push(path.clone()),
        }
        path.truncate(len);
    }
}
