//! # Sync Configuration
//!
//! Tuning knobs for the primitives, loaded once at startup.
//!
//! ```toml
//! [spinlock]
//! yield_after_spins = 128
//!
//! [deque]
//! initial_capacity = 256
//! ```
//!
//! Every section and field is optional; missing values fall back to
//! [`Default`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SyncError, SyncResult};

/// Largest initial capacity accepted for a deque.
///
/// Anything bigger is almost certainly a typo in the config file and would
/// reserve gigabytes up front.
pub const MAX_DEQUE_INITIAL_CAPACITY: usize = 1 << 24;

/// Spin policy for [`Spinlock`](crate::Spinlock).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    /// Number of relaxed polls after which a waiting thread yields its
    /// time slice. `0` means never yield (pure busy wait).
    pub yield_after_spins: u32,
}

/// Initial sizing for [`ConcurrentDeque`](crate::ConcurrentDeque).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DequeConfig {
    /// Number of elements reserved when the deque is created.
    pub initial_capacity: usize,
}

/// Top-level configuration for the concurrency core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Spinlock tuning.
    pub spinlock: SpinConfig,
    /// Deque tuning.
    pub deque: DequeConfig,
}

impl SyncConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidConfig`] if the text is not valid TOML,
    /// has fields of the wrong type, or fails [`SyncConfig::validate`].
    pub fn from_toml_str(text: &str) -> SyncResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| SyncError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::ConfigRead`] if the file cannot be read and
    /// [`SyncError::InvalidConfig`] if its contents are rejected.
    pub fn from_file(path: impl AsRef<Path>) -> SyncResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| SyncError::ConfigRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded sync configuration from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> SyncResult<()> {
        if self.deque.initial_capacity > MAX_DEQUE_INITIAL_CAPACITY {
            return Err(SyncError::InvalidConfig(format!(
                "deque.initial_capacity {} exceeds limit {}",
                self.deque.initial_capacity, MAX_DEQUE_INITIAL_CAPACITY
            )));
        }
        Ok(())
    }
}
