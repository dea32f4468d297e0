#![forbid(unsafe_code)]

//! Resizing engine configuration.
//!
//! All tunables of [`ResizingEngine`](crate::engine::ResizingEngine) as one
//! [`ResizingConfig`] that can be loaded from TOML or JSON (feature
//! `config`) or from the environment.
//!
//! # Loading
//!
//! ```toml
//! # bee-resizing.toml
//! max_settle_passes = 32
//! underflow_policy = "reject"
//! record_debug = true
//! ```
//!
//! ```rust,ignore
//! let config = ResizingConfig::from_toml_file("bee-resizing.toml")?;
//! let config = ResizingConfig::from_json_str(json)?;
//! ```
//!
//! # Environment
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `BEE_FULL_RESIZE=1\|true\|yes` | bypass the per-node cache |
//! | `BEE_MAX_SETTLE_PASSES=<n>` | override `max_settle_passes` |

#[cfg(feature = "config")]
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::apportion::UnderflowPolicy;

/// Environment variable forcing full recomputation on every pass.
pub const FULL_RESIZE_ENV: &str = "BEE_FULL_RESIZE";
/// Environment variable overriding [`ResizingConfig::max_settle_passes`].
pub const MAX_SETTLE_PASSES_ENV: &str = "BEE_MAX_SETTLE_PASSES";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizingConfig {
    /// Passes `settle()` may run before giving up.
    pub max_settle_passes: usize,
    /// Policy for nested tables whose container is narrower than their
    /// columns' minimums.
    pub underflow_policy: UnderflowPolicy,
    /// Recompute every node on every pass, ignoring the cache.
    pub force_full: bool,
    /// Start with the debug recorder enabled.
    pub record_debug: bool,
}

impl Default for ResizingConfig {
    fn default() -> Self {
        Self {
            max_settle_passes: 64,
            underflow_policy: UnderflowPolicy::ClampToMinimums,
            force_full: false,
            record_debug: false,
        }
    }
}

impl ResizingConfig {
    /// Defaults, overridden by `BEE_FULL_RESIZE` and `BEE_MAX_SETTLE_PASSES`.
    ///
    /// Unparseable values are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    fn with_env_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = var(FULL_RESIZE_ENV) {
            self.force_full = matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(passes) = var(MAX_SETTLE_PASSES_ENV).and_then(|v| v.trim().parse().ok()) {
            self.max_settle_passes = passes;
        }
        self
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Check all values, returning one message per problem.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.max_settle_passes == 0 {
            errors.push("max_settle_passes must be > 0".to_string());
        }
        errors
    }

    /// [`validate`](Self::validate) as a `Result`.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Errors that can occur when loading a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
