//! Error types for the pathfinder library.
//!
//! This module provides the error hierarchy for parameter resolution,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Result type alias for operations that may fail with a pathfinder error.
///
/// # Examples
///
/// ```
/// use pathfinder::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("/srv/app".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the pathfinder library.
///
/// This enum encompasses all error conditions that can occur while
/// resolving a parameter map.
#[derive(Debug, Error)]
pub enum Error {
    /// A requested key is absent from the parameter map.
    #[error("unknown key '{key}'")]
    UnknownKey {
        /// The key that was requested.
        key: String,
    },

    /// A placeholder references a key not present in the parameter map.
    #[error("unknown reference '%{token}%' in value of '{referenced_by}'")]
    UnknownReference {
        /// The missing token named by the placeholder.
        token: String,
        /// The key whose value contains the placeholder.
        referenced_by: String,
    },

    /// A placeholder chain re-entered a key that is already being resolved.
    #[error("placeholder cycle detected: {}", chain.join(" -> "))]
    Cycle {
        /// The keys on the resolution path, ending with the re-entered key.
        chain: Vec<String>,
    },

    /// A value could not be coerced to a string where resolution required it.
    #[error("unsupported value for '{key}': {reason}")]
    UnsupportedValue {
        /// The key holding the unsupported value.
        key: String,
        /// The reason the value cannot be resolved.
        reason: String,
    },

    /// An invalid path string was encountered during normalization.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// The offending path string.
        path: String,
        /// The reason the path is invalid.
        reason: String,
    },
}

impl Error {
    /// Check if the error is a placeholder cycle.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathfinder::Error;
    ///
    /// let err = Error::Cycle { chain: vec!["a".into(), "b".into(), "a".into()] };
    /// assert!(err.is_cycle());
    /// ```
    #[must_use]
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::Cycle { .. })
    }

    /// Check if the error indicates a key absent from the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathfinder::Error;
    ///
    /// let err = Error::UnknownKey { key: "dir.missing".to_string() };
    /// assert!(err.is_unknown_key());
    /// ```
    #[must_use]
    pub fn is_unknown_key(&self) -> bool {
        matches!(self, Self::UnknownKey { .. })
    }

    /// Check if the error is a dangling placeholder reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathfinder::Error;
    ///
    /// let err = Error::UnknownReference {
    ///     token: "dir.gone".to_string(),
    ///     referenced_by: "dir.assets".to_string(),
    /// };
    /// assert!(err.is_unknown_reference());
    /// ```
    #[must_use]
    pub fn is_unknown_reference(&self) -> bool {
        matches!(self, Self::UnknownReference { .. })
    }
}
