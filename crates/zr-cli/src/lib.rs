//! `zr-reconcile`: settings reconciliation from the command line
//!
//! `depot` treats a JSON file as the Roam Depot key/value store, so missing
//! sections are written back into it. `legacy` reconciles a manual settings
//! object without writing anything.
//!
//! ```text
//! zr-reconcile depot <store.json> [--dry-run] [--pretty]
//! zr-reconcile legacy <settings.json> [--pretty]
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod cli;
pub mod logging;
pub mod store;

pub use cli::{command, render, run, Report};
pub use logging::init_tracing;
pub use store::JsonFileStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
