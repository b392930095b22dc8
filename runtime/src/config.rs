//! Store configuration
//!
//! [`StoreConfig`] carries the runtime knobs of a [`Store`](crate::Store).
//! Values can be built in code or read from the process environment:
//!
//! | Variable | Type | Default |
//! |---|---|---|
//! | `TODO_STORE_BROADCAST_CAPACITY` | `usize` (> 0) | `64` |
//! | `TODO_STORE_LOG_DISPATCHES` | `true`/`false`/`1`/`0` | `false` |
//!
//! # Example
//!
//! ```
//! use composable_todo_runtime::StoreConfig;
//!
//! let config = StoreConfig::default()
//!     .with_broadcast_capacity(256)
//!     .with_log_dispatches(true);
//! assert_eq!(config.broadcast_capacity, 256);
//! ```

use thiserror::Error;

/// Environment variable holding the action broadcast capacity
pub const BROADCAST_CAPACITY_VAR: &str = "TODO_STORE_BROADCAST_CAPACITY";

/// Environment variable enabling the dispatch logger
pub const LOG_DISPATCHES_VAR: &str = "TODO_STORE_LOG_DISPATCHES";

/// Errors raised while loading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to a value that cannot be used
    #[error("Invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Raw value found
        value: String,
        /// What was expected
        reason: &'static str,
    },
}

/// Configuration for Store instances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of actions buffered for each `subscribe_actions` receiver
    pub broadcast_capacity: usize,
    /// Install a [`LoggingObserver`](crate::LoggingObserver) on the store
    pub log_dispatches: bool,
}

impl StoreConfig {
    /// Set the action broadcast capacity
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    /// Enable or disable the dispatch logger
    #[must_use]
    pub const fn with_log_dispatches(mut self, enabled: bool) -> Self {
        self.log_dispatches = enabled;
        self
    }

    /// Load configuration from the process environment
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set but cannot
    /// be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set but cannot
    /// be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(BROADCAST_CAPACITY_VAR) {
            let parsed = raw.trim().parse::<usize>();
            config.broadcast_capacity = match parsed {
                Ok(capacity) if capacity > 0 => capacity,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: BROADCAST_CAPACITY_VAR,
                        value: raw,
                        reason: "expected a positive integer",
                    });
                },
            };
        }

        if let Some(raw) = lookup(LOG_DISPATCHES_VAR) {
            config.log_dispatches = parse_flag(&raw).ok_or(ConfigError::InvalidValue {
                var: LOG_DISPATCHES_VAR,
                value: raw.clone(),
                reason: "expected true, false, 1 or 0",
            })?;
        }

        tracing::debug!(?config, "Loaded store configuration");
        Ok(config)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 64,
            log_dispatches: false,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
