//! Error types for the memory subsystem
//!
//! A lookup miss is never an error: `get`/`search` return empty results and
//! `delete`/`forget` on an absent id are no-ops. Errors are reserved for
//! dimension violations, bad configuration, and failures reported by a
//! remote vector backend.

use thiserror::Error;

/// Boxed error type carried by backend failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the crate
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Errors produced by the memory tiers and vector indexes
#[derive(Debug, Error)]
pub enum MemoryError {
    /// A vector's length disagrees with the index's configured dimension.
    /// Always raised before any mutation.
    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension the index was configured with
        expected: usize,
        /// Dimension of the offending vector
        actual: usize,
    },

    /// Invalid or incomplete configuration
    #[error("configuration error: {message}")]
    Configuration {
        /// Human readable reason
        message: String,
    },

    /// Failure reported by a remote vector backend, propagated unmodified
    #[error("{backend} backend failed during {operation}: {source}")]
    Backend {
        /// Backend tag (e.g. `pgvector`)
        backend: String,
        /// Operation that failed
        operation: &'static str,
        /// Underlying transport error
        #[source]
        source: BoxError,
    },

    /// Transport-level signal that an id does not exist.
    ///
    /// Transports may return this; the index layer turns it into `None` for
    /// lookups and into success for deletes.
    #[error("item not found: {id}")]
    NotFound {
        /// Missing id
        id: String,
    },

    /// TOML configuration could not be parsed
    #[error("failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl MemoryError {
    /// Create a dimension mismatch error
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Wrap a transport failure from a remote backend
    pub fn backend(
        backend: impl Into<String>,
        operation: &'static str,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Backend {
            backend: backend.into(),
            operation,
            source: source.into(),
        }
    }

    /// Create a not-found signal for the given id
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Whether this error is the transport's missing-id signal
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether this error is a dimension violation
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, Self::DimensionMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_message() {
        let err = MemoryError::dimension_mismatch(3, 2);
        assert!(err.is_dimension_mismatch());
        assert_eq!(
            err.to_string(),
            "vector dimension mismatch: expected 3, got 2"
        );
    }

    #[test]
    fn test_backend_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let err = MemoryError::backend("pgvector", "insert", io);

        assert!(!err.is_not_found());
        assert!(err.to_string().contains("pgvector backend failed during insert"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
