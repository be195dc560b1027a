//! Error types for vRealize Operations API operations.

use thiserror::Error;

/// Errors that can occur during vRealize Operations API operations.
///
/// Decode errors (`MalformedInput`, `UnsupportedField`, `TypeMismatch`,
/// `MissingField`, `UnsupportedDataType`) are fatal on the page-fetch path:
/// the platform schema has drifted and partial decoding is not allowed.
#[derive(Debug, Error)]
pub enum VropsError {
    /// Configuration is missing or invalid.
    #[error("vRealize configuration invalid: {0}")]
    Config(String),

    /// Input that should be a JSON object is something else.
    #[error("failed to unpack {kind}: not a JSON object")]
    MalformedInput {
        /// The kind being decoded.
        kind: &'static str,
    },

    /// An object carried a key outside its declared schema.
    #[error("failed to unpack {kind}: unsupported key: {key}")]
    UnsupportedField {
        /// The kind being decoded.
        kind: &'static str,
        /// The offending key as received.
        key: String,
    },

    /// A declared key held a value of the wrong JSON type.
    #[error("failed to unpack {kind}: key {key} expects {expected}")]
    TypeMismatch {
        kind: &'static str,
        key: &'static str,
        expected: &'static str,
    },

    /// A required key was never seen.
    #[error("failed to unpack {kind}: required key not found: {key}")]
    MissingField {
        kind: &'static str,
        key: &'static str,
    },

    /// A resource identifier declared a data type other than STRING.
    #[error("resource identifier {name:?} has unsupported data type: {data_type:?}")]
    UnsupportedDataType {
        /// Identifier name, as read from `identifierType.name`.
        name: String,
        /// The declared data type (empty when the declaration was absent).
        data_type: String,
    },

    /// Token acquisition failed.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Network or TLS failure below the HTTP status layer.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-200 status.
    #[error("request failed: status code {status}: {body}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
        /// Response body text, kept for diagnostics.
        body: String,
    },

    /// A response body exceeded the receiver data limit.
    #[error("response body exceeds receiver data limit of {limit} bytes")]
    ResponseTooLarge { limit: u64 },

    /// The response body was not JSON at all.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL construction error.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type alias for vRealize Operations API operations.
pub type Result<T> = core::result::Result<T, VropsError>;
