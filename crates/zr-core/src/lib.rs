//! zoteroRoam settings reconciliation
//!
//! Entry point run once per extension activation:
//! - Reads settings from the execution context (host store or legacy
//!   manual settings)
//! - Merges them against the canonical defaults
//! - Persists defaults for sections the host store has never held
//! - Derives the normalized library requests
//!
//! # Architecture
//!
//! ```text
//! ExecutionContext ──> snapshot ──> merge ──> Settings
//!        │                │           └─ missing sections ──> SettingsAccessor::set
//!        │                └─ requests / dataRequests ──> RequestCollection
//!        └─ RoamDepot { extension_api } | Legacy { manual_settings }
//! ```
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use zr_core::{initialize, ExecutionContext};
//!
//! let manual = json!({
//!     "dataRequests": [{"apikey": "K", "dataURI": "users/123/items", "name": "Lib"}],
//!     "other": {"autoload": true}
//! });
//!
//! let result = initialize(ExecutionContext::legacy(manual)).unwrap();
//! assert_eq!(result.requests.api_keys, vec!["K"]);
//! assert_eq!(result.settings.get("/other/autoload"), Some(&json!(true)));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod accessor;
pub mod config;
pub mod context;
pub mod error;
pub mod reconcile;

// Re-exports for convenience
pub use accessor::SettingsAccessor;
pub use config::{ReconcileConfig, WriteBackPolicy};
pub use context::{ContextKind, ExecutionContext};
pub use error::{AccessorError, ReconcileError, ReconcileResult};
pub use reconcile::{initialize, Reconciler, Reconciliation, LEGACY_REQUESTS_KEY, REQUESTS_KEY};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with settings reconciliation
    pub use crate::{
        initialize, AccessorError, ExecutionContext, ReconcileConfig, ReconcileError, Reconciler,
        Reconciliation, SettingsAccessor, WriteBackPolicy,
    };
    pub use zr_requests::{LibraryRef, LibraryType, RequestCollection, RequestDescriptor};
    pub use zr_schema::{get_defaults, merge, SectionName, Settings};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
