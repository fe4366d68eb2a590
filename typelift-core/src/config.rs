//! Configuration for the hierarchy resolution pipeline

use crate::error::{Result, TypeLiftError};
use serde::{Deserialize, Serialize};

/// Default minimum number of fields a recurring subset must have
pub const DEFAULT_MIN_SUBSET_SIZE: usize = 2;

/// Default upper bound on fields per column set for power-set enumeration
pub const DEFAULT_MAX_FIELDS_PER_SET: usize = 24;

/// Hard ceiling on enumerable fields; subsets are enumerated via u64 masks
const ENUMERATION_CEILING: usize = 62;

/// What anchored resolution does when no registry candidate matches and no
/// capability marker was supplied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorFallback {
    /// Emit a parentless type carrying all of the column set's fields
    #[default]
    MarkerOnly,
    /// Fail the batch with an unresolved-anchor error
    Fail,
}

/// Configuration for a resolution run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeLiftConfig {
    /// Minimum field count for a subset to be considered
    pub min_subset_size: usize,

    /// Maximum field count per column set before enumeration is refused
    ///
    /// Subset discovery enumerates the power set of each column set, which
    /// is exponential in the field count. Inputs wider than this bound fail
    /// fast instead of exhausting memory.
    pub max_fields_per_set: usize,

    /// Name prefix for discovered base types (`Base0`, `Base1`, ...)
    pub base_name_prefix: String,

    /// Name prefix for unnamed input column sets (`Record0`, ...)
    pub record_name_prefix: String,

    /// Fallback policy when anchored resolution finds no base and no marker
    pub anchor_fallback: AnchorFallback,
}

impl Default for TypeLiftConfig {
    fn default() -> Self {
        Self {
            min_subset_size: DEFAULT_MIN_SUBSET_SIZE,
            max_fields_per_set: DEFAULT_MAX_FIELDS_PER_SET,
            base_name_prefix: "Base".to_string(),
            record_name_prefix: "Record".to_string(),
            anchor_fallback: AnchorFallback::default(),
        }
    }
}

impl TypeLiftConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum subset size
    #[must_use]
    pub fn with_min_subset_size(mut self, size: usize) -> Self {
        self.min_subset_size = size;
        self
    }

    /// Set the enumeration guard
    #[must_use]
    pub fn with_max_fields_per_set(mut self, max: usize) -> Self {
        self.max_fields_per_set = max;
        self
    }

    /// Set the discovered-base name prefix
    #[must_use]
    pub fn with_base_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.base_name_prefix = prefix.into();
        self
    }

    /// Set the unnamed-record name prefix
    #[must_use]
    pub fn with_record_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.record_name_prefix = prefix.into();
        self
    }

    /// Set the anchored fallback policy
    #[must_use]
    pub fn with_anchor_fallback(mut self, fallback: AnchorFallback) -> Self {
        self.anchor_fallback = fallback;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`TypeLiftError::ConfigError`] if any bound is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.min_subset_size < 1 {
            return Err(TypeLiftError::config("min_subset_size must be at least 1"));
        }
        if self.max_fields_per_set < self.min_subset_size {
            return Err(TypeLiftError::config(format!(
                "max_fields_per_set ({}) must not be below min_subset_size ({})",
                self.max_fields_per_set, self.min_subset_size
            )));
        }
        if self.max_fields_per_set > ENUMERATION_CEILING {
            return Err(TypeLiftError::config(format!(
                "max_fields_per_set must not exceed {ENUMERATION_CEILING}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TypeLiftConfig::default();
        assert_eq!(config.min_subset_size, 2);
        assert_eq!(config.anchor_fallback, AnchorFallback::MarkerOnly);
        config.validate().expect("default config validates");
    }

    #[test]
    fn test_builder_chain() {
        let config = TypeLiftConfig::new()
            .with_min_subset_size(3)
            .with_base_name_prefix("Shared")
            .with_anchor_fallback(AnchorFallback::Fail);
        assert_eq!(config.min_subset_size, 3);
        assert_eq!(config.base_name_prefix, "Shared");
        assert_eq!(config.anchor_fallback, AnchorFallback::Fail);
    }

    #[test]
    fn test_invalid_bounds_are_rejected() {
        let config = TypeLiftConfig::new().with_min_subset_size(0);
        assert!(config.validate().is_err());

        let config = TypeLiftConfig::new()
            .with_min_subset_size(5)
            .with_max_fields_per_set(4);
        assert!(config.validate().is_err());

        let config = TypeLiftConfig::new().with_max_fields_per_set(100);
        assert!(config.validate().is_err());
    }
}
