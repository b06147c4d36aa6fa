//! Non-destructive merge of stored settings over the defaults
//!
//! Any key present in the stored object wins, whatever its value. Only keys
//! that are absent fall back to the schema default. Recursion follows the
//! shape of the defaults and never descends into structures the schema does
//! not declare.

use serde_json::{Map, Value};

use crate::defaults::section_defaults;
use crate::section::SectionName;
use crate::settings::Settings;

/// Result of merging stored settings over the defaults
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// Structurally complete settings
    pub settings: Settings,
    /// Sections absent from the stored object (or stored as `null`)
    pub missing_sections: Vec<SectionName>,
    /// Sections stored with a shape that cannot be merged (not an object)
    pub malformed_sections: Vec<SectionName>,
    /// Top-level keys the schema does not recognise, passed through as-is
    pub unknown_keys: Vec<String>,
}

impl MergeOutcome {
    /// Storage keys of the missing sections
    #[must_use]
    pub fn missing_keys(&self) -> Vec<&'static str> {
        self.missing_sections.iter().map(|s| s.as_str()).collect()
    }

    /// Whether the stored object already held every section
    #[inline]
    #[must_use]
    pub fn is_fully_stored(&self) -> bool {
        self.missing_sections.is_empty()
    }
}

/// Merge a raw, possibly partial settings object against the defaults.
///
/// `None`, `null` and non-object input are all treated as an empty object.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use zr_schema::{merge, SectionName};
///
/// let raw = json!({"other": {"autoload": true}});
/// let outcome = merge(Some(&raw));
///
/// assert_eq!(outcome.settings.get("/other/autoload"), Some(&json!(true)));
/// assert_eq!(outcome.settings.get("/other/darkTheme"), Some(&json!(false)));
/// assert!(!outcome.missing_sections.contains(&SectionName::Other));
/// ```
#[must_use]
pub fn merge(raw: Option<&Value>) -> MergeOutcome {
    let empty = Map::new();
    let stored = match raw {
        Some(Value::Object(map)) => map,
        None | Some(Value::Null) => &empty,
        Some(other) => {
            tracing::warn!(kind = json_kind(other), "stored settings are not an object; using defaults");
            &empty
        }
    };

    let mut merged = Map::new();
    let mut missing_sections = Vec::new();
    let mut malformed_sections = Vec::new();

    for section in SectionName::ALL {
        let defaults = section_defaults(section);
        let value = match stored.get(section.as_str()) {
            None | Some(Value::Null) => {
                missing_sections.push(section);
                defaults
            }
            Some(Value::Object(stored_section)) => {
                let mut target = defaults;
                if let Value::Object(target_map) = &mut target {
                    overlay(target_map, stored_section);
                }
                target
            }
            Some(other) => {
                tracing::warn!(
                    %section,
                    kind = json_kind(other),
                    "stored section is not an object; using defaults in memory"
                );
                malformed_sections.push(section);
                defaults
            }
        };
        merged.insert(section.as_str().to_string(), value);
    }

    let mut unknown_keys = Vec::new();
    for (key, value) in stored {
        if !SectionName::is_recognised(key) {
            tracing::debug!(key = %key, "passing through unrecognised settings key");
            unknown_keys.push(key.clone());
            merged.insert(key.clone(), value.clone());
        }
    }

    MergeOutcome {
        settings: Settings::from_map(merged),
        missing_sections,
        malformed_sections,
        unknown_keys,
    }
}

/// Lay `stored` over `target`, which starts out as the defaults.
///
/// Recurses only where the default is an object and the stored value is one
/// too; everything else is taken from `stored` wholesale.
fn overlay(target: &mut Map<String, Value>, stored: &Map<String, Value>) {
    for (key, stored_value) in stored {
        if let (Some(Value::Object(default_map)), Value::Object(stored_map)) =
            (target.get_mut(key), stored_value)
        {
            overlay(default_map, stored_map);
            continue;
        }
        target.insert(key.clone(), stored_value.clone());
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
