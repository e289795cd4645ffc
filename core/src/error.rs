//! Error types for the MyDHL client.
//!
//! # Design
//! Usage errors (`InvalidArgument`, `MissingArgument`) are raised before any
//! request leaves the process and are never retried. Everything after the
//! request is built lands in the remaining variants: non-2xx carrier responses
//! keep the raw status and problem detail for debugging.

use thiserror::Error;

/// Errors returned by value-object constructors, the shipment builder and
/// the response parser.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A value object or setter received a value of the wrong shape.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A required shipment field was not set before sending.
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    /// The carrier returned a non-success status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The caller's transport failed to complete the round-trip.
    #[error("transport failed: {0}")]
    Transport(String),
}

impl ApiError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ApiError::InvalidArgument(msg.into())
    }
}
