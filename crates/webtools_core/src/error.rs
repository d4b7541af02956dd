//! Error types for webtools helpers.

use thiserror::Error;

/// Errors raised by the fallible helpers in this crate.
///
/// The tree builder never fails; malformed records degrade its output instead.
#[derive(Debug, Error)]
pub enum ToolsError {
    /// A date/time string could not be parsed.
    #[error("Invalid date: '{0}'")]
    InvalidDate(String),

    /// A data URL is missing its `,` separator or its `:<mime>;` header.
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// The payload of a data URL is not valid Base64.
    #[error("Invalid Base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Deep clone met a value with no structural copy rule.
    #[error("Unable to copy value: type '{0}' isn't supported")]
    UnsupportedType(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ToolsError>;
