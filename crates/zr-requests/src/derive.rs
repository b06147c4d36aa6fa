//! Derivation of a [`RequestCollection`] from raw stored requests
//!
//! Accepted raw shapes:
//! - `{ "dataRequests": [...] , ... }` (structured store; stored `apiKeys`
//!   and `libraries` are ignored and recomputed)
//! - `[...]` (legacy top-level `dataRequests` array)
//! - `null` / absent (no requests)

use serde_json::{Map, Value};

use crate::data_uri::parse_data_uri;
use crate::error::RequestEntryError;
use crate::types::{LibraryRef, LibraryType, RequestCollection, RequestDescriptor};

/// Derived collection plus the entries that were dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedRequests {
    pub collection: RequestCollection,
    pub rejected: Vec<RequestEntryError>,
}

/// Derive requests, logging each dropped entry.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use zr_requests::derive_requests;
///
/// let raw = json!([{"apikey": "K", "dataURI": "users/123/items", "name": "Lib"}]);
/// let requests = derive_requests(&raw);
///
/// assert_eq!(requests.api_keys, vec!["K"]);
/// assert_eq!(requests.data_requests[0].library.path, "users/123");
/// ```
#[must_use]
pub fn derive_requests(raw: &Value) -> RequestCollection {
    let derived = derive_requests_detailed(raw);
    for error in &derived.rejected {
        tracing::warn!(%error, "skipping request entry");
    }
    derived.collection
}

/// Derive requests and return the rejected entries instead of logging them.
#[must_use]
pub fn derive_requests_detailed(raw: &Value) -> DerivedRequests {
    let entries = match raw_entries(raw) {
        Ok(entries) => entries,
        Err(error) => {
            return DerivedRequests {
                collection: RequestCollection::new(),
                rejected: vec![error],
            }
        }
    };

    let mut descriptors = Vec::with_capacity(entries.len());
    let mut rejected = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        match normalize_entry(index, entry) {
            Ok(descriptor) => descriptors.push(descriptor),
            Err(error) => rejected.push(error),
        }
    }

    DerivedRequests {
        collection: RequestCollection::from_descriptors(descriptors),
        rejected,
    }
}

fn raw_entries(raw: &Value) -> Result<&[Value], RequestEntryError> {
    match raw {
        Value::Null => Ok(&[]),
        Value::Array(items) => Ok(items),
        Value::Object(map) => match map.get("dataRequests") {
            None | Some(Value::Null) => Ok(&[]),
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(RequestEntryError::UnsupportedShape { kind: json_kind(other) }),
        },
        other => Err(RequestEntryError::UnsupportedShape { kind: json_kind(other) }),
    }
}

fn normalize_entry(index: usize, entry: &Value) -> Result<RequestDescriptor, RequestEntryError> {
    let Value::Object(entry) = entry else {
        return Err(RequestEntryError::NotAnObject { index });
    };

    let name = non_empty_str(entry, "name").map_or_else(|| index.to_string(), str::to_string);

    let Some(apikey) = non_empty_str(entry, "apikey").or_else(|| non_empty_str(entry, "apiKey")) else {
        return Err(RequestEntryError::MissingApiKey { index, name });
    };

    let Some(data_uri) = non_empty_str(entry, "dataURI") else {
        return Err(RequestEntryError::MissingDataUri { index, name });
    };

    let Some(inferred) = parse_data_uri(data_uri) else {
        return Err(RequestEntryError::UnresolvableLibrary {
            index,
            name,
            data_uri: data_uri.to_string(),
        });
    };

    let library = match entry.get("library") {
        None | Some(Value::Null) => inferred,
        Some(Value::Object(record)) => explicit_library(record, &inferred).map_err(|reason| {
            RequestEntryError::InvalidLibrary {
                index,
                name: name.clone(),
                reason,
            }
        })?,
        Some(_) => {
            return Err(RequestEntryError::InvalidLibrary {
                index,
                name,
                reason: "library must be an object".to_string(),
            })
        }
    };

    Ok(RequestDescriptor {
        apikey: apikey.to_string(),
        data_uri: data_uri.to_string(),
        library,
        name,
    })
}

/// Explicit library record, which must address the library of the data URI
fn explicit_library(record: &Map<String, Value>, inferred: &LibraryRef) -> Result<LibraryRef, String> {
    let explicit = library_from_record(record)?;
    if explicit.path != inferred.path {
        return Err(format!(
            "library '{}' does not match dataURI library '{}'",
            explicit.path, inferred.path
        ));
    }
    Ok(explicit)
}

/// Read an explicit `{ type, id, uri? }` library record.
///
/// A stored `path` is ignored; it is always recomputed from type and id.
fn library_from_record(record: &Map<String, Value>) -> Result<LibraryRef, String> {
    let kind = match record.get("type") {
        Some(Value::String(s)) => {
            LibraryType::parse(s).ok_or_else(|| format!("unknown library type '{s}'"))?
        }
        _ => return Err("missing library type".to_string()),
    };

    let id = match record.get("id") {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err("missing library id".to_string()),
    };
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("library id '{id}' is not numeric"));
    }

    let uri = non_empty_str(record, "uri")
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .unwrap_or(LibraryRef::DEFAULT_URI);

    Ok(LibraryRef::new(kind, id, uri))
}

fn non_empty_str<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
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
