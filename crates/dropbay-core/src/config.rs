//! Batch configuration and shared constants.
//!
//! [`BatchConfig`] carries the client-side constraints a dropzone enforces.
//! It can be built in code or loaded from JSON:
//!
//! ```
//! use dropbay_core::config::BatchConfig;
//!
//! let config = BatchConfig::from_json(r#"{ "max_files": 2, "max_size": 1048576 }"#).unwrap();
//! assert_eq!(config.max_files, Some(2));
//! assert_eq!(config.accepted_types, None);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// =============================================================================
// Size formatting
// =============================================================================

/// Multiplier between adjacent size units.
pub const SIZE_BASE: u64 = 1024;

/// Unit labels indexed by power of [`SIZE_BASE`].
pub const SIZE_UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

// =============================================================================
// Demo limits
// =============================================================================

/// One mebibyte, the image bucket limit used by the demo page.
pub const ONE_MB: u64 = 1024 * 1024;

/// Default number of files the multi-file dropzone accepts.
pub const DEFAULT_MAX_FILES: usize = 6;

/// Client-side constraints for one dropzone.
///
/// Every field is optional; an unset field means "no limit".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// Upper bound on the number of entries in the batch
    pub max_files: Option<usize>,
    /// Upper bound on an individual file's size in bytes
    pub max_size: Option<u64>,
    /// Allow-list of MIME patterns (`image/*`, `application/pdf`) or
    /// extensions (`.png`)
    pub accepted_types: Option<Vec<String>>,
}

impl BatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = Some(max_files);
        self
    }

    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = Some(max_size);
        self
    }

    pub fn with_accepted_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Parses a configuration from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations no file could ever satisfy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_files == Some(0) {
            return Err(ConfigError::Invalid("max_files must be at least 1".to_string()));
        }
        if let Some(types) = &self.accepted_types {
            if types.iter().any(|t| t.trim().is_empty()) {
                return Err(ConfigError::Invalid(
                    "accepted_types must not contain empty patterns".to_string(),
                ));
            }
        }
        Ok(())
    }
}
