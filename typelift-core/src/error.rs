//! Error types for typelift operations

use thiserror::Error;

/// Main error type for typelift operations
#[derive(Error, Debug)]
pub enum TypeLiftError {
    /// The input column-set collection is absent or unusable
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Error message
        message: String,
        /// Column set that triggered the error, if any
        column_set: Option<String>,
    },

    /// An internal hierarchy invariant was broken
    ///
    /// This signals a bug in the resolver's own construction order, never a
    /// normal runtime condition. The batch is aborted and no descriptors
    /// from it are usable.
    #[error("Domain violation: {message}")]
    DomainViolation {
        /// Error message
        message: String,
        /// Node where the violation was detected
        node: Option<String>,
    },

    /// Anchored resolution found no matching base and fallback is disabled
    #[error("No base type anchors column set '{column_set}': {reason}")]
    UnresolvedAnchor {
        /// Column set that could not be anchored
        column_set: String,
        /// Reason no anchor was found
        reason: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type alias for typelift operations
pub type Result<T> = std::result::Result<T, TypeLiftError>;

impl TypeLiftError {
    /// Create a new invalid-input error
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            column_set: None,
        }
    }

    /// Create a new invalid-input error naming the offending column set
    #[must_use]
    pub fn invalid_input_for(message: impl Into<String>, column_set: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            column_set: Some(column_set.into()),
        }
    }

    /// Create a new domain-violation error
    #[must_use]
    pub fn domain_violation(message: impl Into<String>) -> Self {
        Self::DomainViolation {
            message: message.into(),
            node: None,
        }
    }

    /// Create a new domain-violation error naming the offending node
    #[must_use]
    pub fn domain_violation_at(message: impl Into<String>, node: impl Into<String>) -> Self {
        Self::DomainViolation {
            message: message.into(),
            node: Some(node.into()),
        }
    }

    /// Create a new unresolved-anchor error
    #[must_use]
    pub fn unresolved_anchor(column_set: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnresolvedAnchor {
            column_set: column_set.into(),
            reason: reason.into(),
        }
    }

    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Create a new serialization error
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError(message.into())
    }
}

impl From<serde_json::Error> for TypeLiftError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
