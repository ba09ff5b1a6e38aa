//! Unified error types for the Ferrite core crate.
//!
//! Three families of failures exist at this layer:
//!
//! - [`ApiError`] — anything that goes wrong talking to the remote bot API.
//! - [`RegistryError`] — programmer-error-class failures of the entity
//!   registry (unregistered type names, undecodable payloads).
//! - [`ContextError`] — an operation was invoked on a context whose payload
//!   lacks the identity the operation needs.
//!
//! Absence of an optional wire field is never an error: context accessors
//! model it as `None`.

use thiserror::Error;

// =============================================================================
// API Errors
// =============================================================================

/// Errors surfaced by API calls through the transport.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The API call timed out.
    #[error("API call timed out")]
    Timeout,

    /// The transport failed before a response was produced.
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote API answered with `ok: false`.
    #[error("API error ({code}): {description}")]
    Api {
        /// Numeric error code reported by the platform.
        code: i64,
        /// Human-readable description reported by the platform.
        description: String,
    },

    /// Failed to serialize parameters or deserialize a result.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The context has no identity field to aim this call at
    /// (e.g. editing a callback query that carries neither a message
    /// nor an inline message id).
    #[error("no target for {0}")]
    MissingTarget(&'static str),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

// =============================================================================
// Registry Errors
// =============================================================================

/// Errors from the entity registry.
///
/// Both variants are programmer/config errors, not runtime data errors:
/// they should fail loudly during development and are never swallowed by
/// the dispatch pipeline.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// The requested type name was never registered.
    #[error("no entity registered under '{name}'")]
    UnknownType {
        /// The unregistered type name.
        name: String,
    },

    /// The raw payload could not be decoded into the registered type.
    #[error("malformed '{name}' payload: {reason}")]
    Payload {
        /// The entity type name being constructed.
        name: &'static str,
        /// Decoder error message.
        reason: String,
    },
}

// =============================================================================
// Context Errors
// =============================================================================

/// Errors raised by context operations that require identity fields.
#[derive(Debug, Clone, Error)]
pub enum ContextError {
    /// The payload has no sender, so there is no user to key
    /// conversation state on.
    #[error("payload has no sender identity")]
    MissingUserIdentity,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type for entity registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
