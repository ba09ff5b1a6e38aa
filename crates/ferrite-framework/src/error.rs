//! Error types for the dispatch pipeline.

use thiserror::Error;

use ferrite_core::{ApiError, ContextError, RegistryError};

/// Errors surfaced while dispatching an update through the pipeline.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Root context construction failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// An API call issued during dispatch failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A context accessor required data the payload does not carry.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// A middleware aborted the chain with an error of its own.
    #[error("middleware error: {0}")]
    Middleware(String),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
