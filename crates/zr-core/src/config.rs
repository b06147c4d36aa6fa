//! Reconciliation options

use serde::{Deserialize, Serialize};

/// What reconciliation may write back to the host store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteBackPolicy {
    /// Persist the defaults of sections absent from the store; never touch
    /// sections that exist in any form
    #[default]
    MissingSections,
    /// Never write (inspection / dry run)
    Disabled,
}

/// Reconciliation configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Write-back policy
    pub write_back: WriteBackPolicy,
    /// Re-read each missing key right before writing it, and skip the write
    /// if the host populated it since the snapshot
    pub recheck_before_write: bool,
}

impl ReconcileConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that never writes
    #[inline]
    #[must_use]
    pub fn dry_run() -> Self {
        Self::default().with_write_back(WriteBackPolicy::Disabled)
    }

    /// With write-back policy
    #[inline]
    #[must_use]
    pub fn with_write_back(mut self, policy: WriteBackPolicy) -> Self {
        self.write_back = policy;
        self
    }

    /// With pre-write recheck enabled or disabled
    #[inline]
    #[must_use]
    pub fn with_recheck(mut self, recheck: bool) -> Self {
        self.recheck_before_write = recheck;
        self
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            write_back: WriteBackPolicy::MissingSections,
            recheck_before_write: true,
        }
    }
}
