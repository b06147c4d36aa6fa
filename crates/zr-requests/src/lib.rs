//! zoteroRoam data requests
//!
//! Turns the raw `dataRequests` entries a user stored (in either the
//! structured or the legacy flat format) into normalized
//! [`RequestDescriptor`]s, and derives the distinct API keys and
//! (library, key) pairs the library client needs.
//!
//! Malformed entries never fail a derivation; they are dropped and reported
//! as [`RequestEntryError`]s.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod data_uri;
mod derive;
mod error;
mod types;

// Re-exports
pub use data_uri::parse_data_uri;
pub use derive::{derive_requests, derive_requests_detailed, DerivedRequests};
pub use error::RequestEntryError;
pub use types::{
    library_path, LibraryAccess, LibraryRef, LibraryType, RequestCollection, RequestDescriptor,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
