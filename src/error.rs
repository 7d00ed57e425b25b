//! Unified error handling for the vkwall crate
//!
//! Domain-specific errors live next to the code that raises them; this module
//! folds them into a single [`Error`] enum so callers crossing module
//! boundaries can use one type.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vkwall::error::{Error, VkwallErrorTrait};
//!
//! fn report(err: &Error) {
//!     tracing::error!(category = %err.category(), "community failed: {err}");
//! }
//! ```

use thiserror::Error;

pub use crate::utils::error::{FetchError, StorageError};

/// Common trait for all vkwall error types
pub trait VkwallErrorTrait: std::error::Error {
    /// Get the error category for log grouping
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Transport failures (connect, timeout)
    Network,
    /// Output file errors
    Storage,
    /// Configuration errors surfaced while building a client
    Config,
}

impl ErrorCategory {
    /// Short human-readable label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Storage => "storage",
            Self::Config => "config",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl VkwallErrorTrait for FetchError {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::Http(_) | Self::Timeout => ErrorCategory::Network,
            Self::InvalidUrl(_) => ErrorCategory::Config,
        }
    }
}

impl VkwallErrorTrait for StorageError {
    fn category(&self) -> ErrorCategory {
        ErrorCategory::Storage
    }
}

/// Error raised while processing a single community
#[derive(Error, Debug)]
pub enum Error {
    /// API fetch errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Output sink errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl VkwallErrorTrait for Error {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::Fetch(e) => e.category(),
            Self::Storage(e) => e.category(),
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category() {
        assert_eq!(
            Error::Fetch(FetchError::Timeout).category(),
            ErrorCategory::Network
        );
        assert_eq!(
            Error::Fetch(FetchError::InvalidUrl("ftp://".into())).category(),
            ErrorCategory::Config
        );
    }

    #[test]
    fn test_storage_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let unified: Error = StorageError::from(io).into();
        assert!(matches!(unified, Error::Storage(_)));
        assert_eq!(unified.category(), ErrorCategory::Storage);
        assert_eq!(unified.to_string(), "Storage error: I/O error: disk full");
    }

    #[test]
    fn test_category_display() {
        assert_eq!(ErrorCategory::Network.to_string(), "network");
        assert_eq!(ErrorCategory::Config.to_string(), "config");
    }
}
