//! Request descriptor types
//!
//! Descriptors carry `apiKey` and `dataURI`, the fields the library client
//! reads. `libraries` pairs keep the stored `apikey` spelling.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Kind of Zotero library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryType {
    /// A user library (`users/<id>`)
    Users,
    /// A group library (`groups/<id>`)
    Groups,
}

impl LibraryType {
    /// Path keyword, already plural
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Groups => "groups",
        }
    }

    /// Parse a library type, accepting the singular spelling too.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "users" | "user" => Some(Self::Users),
            "groups" | "group" => Some(Self::Groups),
            _ => None,
        }
    }
}

impl std::fmt::Display for LibraryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to one Zotero library
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LibraryRef {
    /// Numeric library id
    pub id: String,
    /// `<type>/<id>`, always derived from `kind` and `id`
    pub path: String,
    /// Library kind
    #[serde(rename = "type")]
    pub kind: LibraryType,
    /// Endpoint below the library path (`items`, `items/top`, ...)
    pub uri: String,
}

impl LibraryRef {
    /// Default endpoint when none is given
    pub const DEFAULT_URI: &'static str = "items";

    /// Create a library reference; the path is computed from `kind` and `id`.
    #[must_use]
    pub fn new(kind: LibraryType, id: impl Into<String>, uri: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            path: library_path(kind, &id),
            id,
            kind,
            uri: uri.into(),
        }
    }

    /// Full data URI for this library: `<path>/<uri>`
    #[inline]
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("{}/{}", self.path, self.uri)
    }
}

/// Compute the dedup path of a library
#[inline]
#[must_use]
pub fn library_path(kind: LibraryType, id: &str) -> String {
    format!("{}/{}", kind.as_str(), id)
}

/// One normalized library request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// Zotero API key
    #[serde(rename = "apiKey", alias = "apikey")]
    pub apikey: String,
    /// Data URI queried by the library client
    #[serde(rename = "dataURI")]
    pub data_uri: String,
    /// Library the request targets
    pub library: LibraryRef,
    /// Display name
    pub name: String,
}

/// Distinct (library path, API key) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LibraryAccess {
    pub path: String,
    #[serde(alias = "apiKey")]
    pub apikey: String,
}

/// Normalized requests with their derived key and library sets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCollection {
    /// Normalized requests, in input order
    pub data_requests: Vec<RequestDescriptor>,
    /// Distinct API keys, by first occurrence
    pub api_keys: Vec<String>,
    /// Distinct (path, apikey) pairs, by first occurrence
    pub libraries: Vec<LibraryAccess>,
}

impl RequestCollection {
    /// Empty collection
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection, deriving `api_keys` and `libraries` from the
    /// descriptors.
    #[must_use]
    pub fn from_descriptors(data_requests: Vec<RequestDescriptor>) -> Self {
        let mut api_keys = IndexSet::new();
        let mut libraries = IndexSet::new();

        for request in &data_requests {
            api_keys.insert(request.apikey.clone());
            libraries.insert(LibraryAccess {
                path: request.library.path.clone(),
                apikey: request.apikey.clone(),
            });
        }

        Self {
            data_requests,
            api_keys: api_keys.into_iter().collect(),
            libraries: libraries.into_iter().collect(),
        }
    }

    /// Number of requests
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data_requests.len()
    }

    /// Whether there are no requests
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data_requests.is_empty()
    }
}
