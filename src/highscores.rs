//! Best score persistence
//!
//! The best score is read once at startup and written only on game over.
//! Storage is any `KeyValueStore`; failures degrade to a best of zero.

use std::collections::HashMap;

use crate::error::StoreError;

/// Numeric key-value persistence capability
pub trait KeyValueStore {
    /// Stored value, `None` if the key was never written
    fn get_number(&self, key: &str) -> Result<Option<f64>, StoreError>;

    /// Persist a value; must not leave a partial write behind
    fn set_number(&mut self, key: &str, value: f64) -> Result<(), StoreError>;

    /// Stored value or `default`, logging any failure
    fn get_number_or(&self, key: &str, default: f64) -> f64 {
        match self.get_number(key) {
            Ok(value) => value.unwrap_or(default),
            Err(e) => {
                log::warn!("Failed to read '{}': {}", key, e);
                default
            }
        }
    }
}

/// In-memory store (tests, and platforms without storage)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, f64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_number(&self, key: &str) -> Result<Option<f64>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn set_number(&mut self, key: &str, value: f64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Persisted best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    value: u64,
}

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "bestScore";

    /// Read the best score, defaulting to zero when missing or unreadable
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw = store.get_number_or(Self::STORAGE_KEY, 0.0);
        let value = if raw.is_finite() && raw > 0.0 {
            raw as u64
        } else {
            0
        };
        log::info!("Best score: {}", value);
        Self { value }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Record a final score. Returns true if it is a new best.
    ///
    /// The in-memory best is updated even when persisting fails, so the
    /// session still shows the right value.
    pub fn submit(&mut self, score: u64, store: &mut dyn KeyValueStore) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        if let Err(e) = persist_confirmed(store, Self::STORAGE_KEY, score as f64) {
            log::warn!("Best score {} not saved: {}", score, e);
        } else {
            log::info!("New best score saved: {}", score);
        }
        true
    }
}

/// Write then read back to confirm the value landed
fn persist_confirmed(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: f64,
) -> Result<(), StoreError> {
    store.set_number(key, value)?;
    match store.get_number(key)? {
        Some(v) if v == value => Ok(()),
        _ => Err(StoreError::Unconfirmed {
            key: key.to_string(),
        }),
    }
}
