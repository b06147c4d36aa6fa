//! zoteroRoam settings schema
//!
//! The canonical default settings and the merge that lays stored (partial,
//! possibly stale) settings over them.
//!
//! # Core Concepts
//!
//! - [`SectionName`]: the closed set of top-level settings sections
//! - [`get_defaults`]: a fresh, fully populated default [`Settings`]
//! - [`merge`]: non-destructive deep merge, reporting missing sections
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use zr_schema::{merge, SectionName};
//!
//! let stored = json!({"annotations": {"use": "function"}});
//! let outcome = merge(Some(&stored));
//!
//! // Stored choice kept, absent leaf filled from the defaults
//! assert_eq!(outcome.settings.get("/annotations/use"), Some(&json!("function")));
//! assert_eq!(outcome.settings.get("/annotations/func"), Some(&json!("")));
//!
//! // Only wholly absent sections are reported
//! assert!(!outcome.missing_sections.contains(&SectionName::Annotations));
//! assert!(outcome.missing_sections.contains(&SectionName::Copy));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod defaults;
mod merge;
mod section;
mod settings;

// Re-exports
pub use defaults::{get_defaults, section_defaults};
pub use merge::{merge, MergeOutcome};
pub use section::SectionName;
pub use settings::Settings;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
