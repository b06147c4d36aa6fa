//! Errors for individual request entries
//!
//! None of these abort a derivation: the offending entry is dropped and the
//! error is reported alongside the collection.

/// Why a raw request entry could not be normalized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestEntryError {
    /// The requests value itself has an unusable shape
    #[error("requests must be an array or an object with `dataRequests`, got {kind}")]
    UnsupportedShape { kind: &'static str },

    /// Entry is not a JSON object
    #[error("request #{index} is not an object")]
    NotAnObject { index: usize },

    /// Neither `apikey` nor `apiKey` holds a non-empty string
    #[error("request #{index} ({name}) has no API key")]
    MissingApiKey { index: usize, name: String },

    /// `dataURI` is absent or empty
    #[error("request #{index} ({name}) has no data URI")]
    MissingDataUri { index: usize, name: String },

    /// Data URI does not name a user or group library
    #[error("request #{index} ({name}): cannot resolve a library from data URI '{data_uri}'")]
    UnresolvableLibrary {
        index: usize,
        name: String,
        data_uri: String,
    },

    /// Explicit `library` record is unusable or names another library than
    /// the data URI
    #[error("request #{index} ({name}): invalid library: {reason}")]
    InvalidLibrary {
        index: usize,
        name: String,
        reason: String,
    },
}

impl RequestEntryError {
    /// Index of the offending entry in the raw list, if any
    #[inline]
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::UnsupportedShape { .. } => None,
            Self::NotAnObject { index }
            | Self::MissingApiKey { index, .. }
            | Self::MissingDataUri { index, .. }
            | Self::UnresolvableLibrary { index, .. }
            | Self::InvalidLibrary { index, .. } => Some(*index),
        }
    }
}
