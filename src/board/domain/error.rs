//! Error types for board domain parsing.

use thiserror::Error;

/// Errors returned while parsing board domain values from strings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The platform value is not one of `ig`, `tiktok` or `youtube`.
    #[error("unsupported platform: {0}")]
    UnknownPlatform(String),

    /// The priority value is not one of `low`, `med` or `high`.
    #[error("unsupported priority: {0}")]
    UnknownPriority(String),
}

/// Error returned while parsing content statuses from the backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown content status: {0}")]
pub struct ParseContentStatusError(pub String);
