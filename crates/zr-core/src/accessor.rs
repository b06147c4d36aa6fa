//! Host settings accessor
//!
//! The narrow capability the host runtime hands to the extension. Calls are
//! synchronous; `set` is durable once it returns and `get_all` reflects the
//! latest committed state.

use serde_json::Value;

use crate::error::AccessorError;

/// Key/value settings store owned by the host
pub trait SettingsAccessor {
    /// Snapshot of every stored key.
    ///
    /// `Ok(None)` means the store has never been written.
    ///
    /// # Errors
    /// Returns error if the backend cannot be read
    fn get_all(&self) -> Result<Option<Value>, AccessorError>;

    /// Current value of one key.
    ///
    /// # Errors
    /// Returns error if the backend cannot be read
    fn get(&self, key: &str) -> Result<Option<Value>, AccessorError>;

    /// Store a value under `key`.
    ///
    /// # Errors
    /// Returns error if the value could not be persisted
    fn set(&mut self, key: &str, value: Value) -> Result<(), AccessorError>;
}

impl<T: SettingsAccessor + ?Sized> SettingsAccessor for &mut T {
    fn get_all(&self) -> Result<Option<Value>, AccessorError> {
        (**self).get_all()
    }

    fn get(&self, key: &str) -> Result<Option<Value>, AccessorError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), AccessorError> {
        (**self).set(key, value)
    }
}

impl<T: SettingsAccessor + ?Sized> SettingsAccessor for Box<T> {
    fn get_all(&self) -> Result<Option<Value>, AccessorError> {
        (**self).get_all()
    }

    fn get(&self, key: &str) -> Result<Option<Value>, AccessorError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), AccessorError> {
        (**self).set(key, value)
    }
}
