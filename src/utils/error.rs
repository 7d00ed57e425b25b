//! Error types for the vkwall collector
//!
//! This module defines custom error types used throughout the application.

use thiserror::Error;

/// Errors that can occur while talking to the VK API
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Invalid endpoint URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Classify a reqwest error, separating timeouts from other transport failures
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

/// Errors raised by the CSV output sink
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying file I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
