//! Execution contexts
//!
//! The two historical ways settings reach the extension:
//! - Roam Depot: settings live behind the host's accessor
//! - Legacy `roam/js`: a flat settings object embedded in the graph, with
//!   `dataRequests` at the top level

use serde_json::Value;

use crate::accessor::SettingsAccessor;
use crate::error::{ReconcileError, ReconcileResult};

/// Where the settings come from
pub enum ExecutionContext<'a> {
    /// Settings stored by the host
    RoamDepot {
        extension_api: &'a mut dyn SettingsAccessor,
    },
    /// Settings supplied directly; read-only
    Legacy { manual_settings: Value },
}

/// Tag of an [`ExecutionContext`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
    RoamDepot,
    Legacy,
}

impl ContextKind {
    /// Host-facing identifier
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RoamDepot => "roam/depot",
            Self::Legacy => "roam/js",
        }
    }
}

impl std::fmt::Display for ContextKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'a> ExecutionContext<'a> {
    /// Context backed by the host's settings accessor
    #[inline]
    pub fn roam_depot(extension_api: &'a mut dyn SettingsAccessor) -> Self {
        Self::RoamDepot { extension_api }
    }

    /// Context backed by a manually supplied settings object
    #[inline]
    #[must_use]
    pub fn legacy(manual_settings: Value) -> Self {
        Self::Legacy { manual_settings }
    }

    /// Build a context from loosely supplied parts.
    ///
    /// An accessor takes precedence; otherwise manual settings form a legacy
    /// context. `null` manual settings count as not supplied.
    ///
    /// # Errors
    /// Returns [`ReconcileError::Configuration`] when neither is supplied
    pub fn resolve(
        extension_api: Option<&'a mut dyn SettingsAccessor>,
        manual_settings: Option<Value>,
    ) -> ReconcileResult<Self> {
        match (extension_api, manual_settings) {
            (Some(extension_api), _) => Ok(Self::RoamDepot { extension_api }),
            (None, Some(manual_settings)) if !manual_settings.is_null() => {
                Ok(Self::Legacy { manual_settings })
            }
            (None, _) => Err(ReconcileError::configuration(
                "no usable storage backend and no manual settings supplied",
            )),
        }
    }

    /// Which variant this is
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ContextKind {
        match self {
            Self::RoamDepot { .. } => ContextKind::RoamDepot,
            Self::Legacy { .. } => ContextKind::Legacy,
        }
    }
}

impl std::fmt::Debug for ExecutionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RoamDepot { .. } => f.debug_struct("RoamDepot").finish_non_exhaustive(),
            Self::Legacy { manual_settings } => f
                .debug_struct("Legacy")
                .field("manual_settings", manual_settings)
                .finish(),
        }
    }
}
