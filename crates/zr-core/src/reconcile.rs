//! Reconciliation entry point
//!
//! # Write-back
//!
//! Only sections wholly absent from the host snapshot are persisted, each
//! with its full default, each at most once. A section stored in any form
//! (even partially) is never rewritten: nested defaults for it exist only in
//! the returned settings. A store that already holds every section sees no
//! writes at all.

use serde_json::{Map, Value};
use zr_requests::{derive_requests_detailed, RequestCollection, RequestEntryError};
use zr_schema::{merge, section_defaults, MergeOutcome, SectionName, Settings};

use crate::accessor::SettingsAccessor;
use crate::config::{ReconcileConfig, WriteBackPolicy};
use crate::context::ExecutionContext;
use crate::error::{json_kind, ReconcileError, ReconcileResult};

/// Storage key holding structured requests in the host store
pub const REQUESTS_KEY: &str = "requests";

/// Top-level key holding requests in legacy manual settings
pub const LEGACY_REQUESTS_KEY: &str = "dataRequests";

/// Outcome of one reconciliation
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// Complete settings
    pub settings: Settings,
    /// Normalized requests
    pub requests: RequestCollection,
    /// Sections persisted with their defaults during this run
    pub written_sections: Vec<SectionName>,
    /// Request entries that were dropped
    pub rejected_requests: Vec<RequestEntryError>,
}

/// Runs reconciliations with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    config: ReconcileConfig,
}

impl Reconciler {
    /// Create a reconciler
    #[inline]
    #[must_use]
    pub fn new(config: ReconcileConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Merge settings, apply the write-back policy and derive requests.
    ///
    /// # Errors
    /// Returns error if the host accessor fails or returns a malformed
    /// snapshot, if a write-back fails, or if legacy manual settings are not
    /// an object
    pub fn initialize(&self, context: ExecutionContext<'_>) -> ReconcileResult<Reconciliation> {
        let kind = context.kind();
        let result = match context {
            ExecutionContext::RoamDepot { extension_api } => self.reconcile_depot(extension_api),
            ExecutionContext::Legacy { manual_settings } => Self::reconcile_legacy(manual_settings),
        };

        match &result {
            Ok(reconciliation) => tracing::debug!(
                context = %kind,
                requests = reconciliation.requests.len(),
                written = reconciliation.written_sections.len(),
                rejected = reconciliation.rejected_requests.len(),
                "settings reconciled"
            ),
            Err(error) => tracing::error!(context = %kind, %error, "settings reconciliation failed"),
        }
        result
    }

    fn reconcile_depot(&self, store: &mut dyn SettingsAccessor) -> ReconcileResult<Reconciliation> {
        let snapshot = match store.get_all()? {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(snapshot @ Value::Object(_)) => snapshot,
            Some(other) => {
                return Err(ReconcileError::MalformedSnapshot {
                    kind: json_kind(&other),
                })
            }
        };

        let outcome = merge(Some(&snapshot));
        log_drift(&outcome);

        let written_sections = match self.config.write_back {
            WriteBackPolicy::MissingSections => self.write_missing(store, &outcome.missing_sections)?,
            WriteBackPolicy::Disabled => {
                if !outcome.missing_sections.is_empty() {
                    tracing::debug!(
                        missing = ?outcome.missing_keys(),
                        "write-back disabled; missing sections defaulted in memory only"
                    );
                }
                Vec::new()
            }
        };

        let raw_requests = snapshot.get(REQUESTS_KEY).unwrap_or(&Value::Null);
        let (requests, rejected_requests) = derive(raw_requests);

        Ok(Reconciliation {
            settings: outcome.settings,
            requests,
            written_sections,
            rejected_requests,
        })
    }

    fn reconcile_legacy(manual_settings: Value) -> ReconcileResult<Reconciliation> {
        let manual_settings = match manual_settings {
            Value::Null => Value::Object(Map::new()),
            settings @ Value::Object(_) => settings,
            other => {
                return Err(ReconcileError::configuration(format!(
                    "manual settings must be an object, got {}",
                    json_kind(&other)
                )))
            }
        };

        let outcome = merge(Some(&manual_settings));
        log_drift(&outcome);

        let raw_requests = manual_settings
            .get(LEGACY_REQUESTS_KEY)
            .unwrap_or(&Value::Null);
        let (requests, rejected_requests) = derive(raw_requests);

        Ok(Reconciliation {
            settings: outcome.settings,
            requests,
            written_sections: Vec::new(),
            rejected_requests,
        })
    }

    fn write_missing(
        &self,
        store: &mut dyn SettingsAccessor,
        missing: &[SectionName],
    ) -> ReconcileResult<Vec<SectionName>> {
        let mut written = Vec::with_capacity(missing.len());

        for &section in missing {
            if self.config.recheck_before_write {
                let current = store.get(section.as_str())?;
                if current.is_some_and(|value| !value.is_null()) {
                    tracing::debug!(%section, "section populated since snapshot; not overwriting");
                    continue;
                }
            }

            store
                .set(section.as_str(), section_defaults(section))
                .map_err(|source| ReconcileError::WriteBack { section, source })?;
            written.push(section);
        }

        if !written.is_empty() {
            let keys: Vec<_> = written.iter().map(|s| s.as_str()).collect();
            tracing::info!(sections = ?keys, "persisted default settings for missing sections");
        }
        Ok(written)
    }
}

/// Reconcile with the default configuration.
///
/// # Errors
/// See [`Reconciler::initialize`]
pub fn initialize(context: ExecutionContext<'_>) -> ReconcileResult<Reconciliation> {
    Reconciler::default().initialize(context)
}

fn derive(raw_requests: &Value) -> (RequestCollection, Vec<RequestEntryError>) {
    let derived = derive_requests_detailed(raw_requests);
    for error in &derived.rejected {
        tracing::warn!(%error, "skipping request entry");
    }
    (derived.collection, derived.rejected)
}

fn log_drift(outcome: &MergeOutcome) {
    if !outcome.unknown_keys.is_empty() {
        tracing::debug!(keys = ?outcome.unknown_keys, "unrecognised settings keys passed through");
    }
}
