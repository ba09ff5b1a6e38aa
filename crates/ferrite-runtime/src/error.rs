//! Runtime error types.

use thiserror::Error;

use ferrite_core::ApiError;
use ferrite_framework::DispatchError;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment failed to assemble or deserialize the configuration.
    #[error("failed to load configuration: {0}")]
    Load(#[from] figment::Error),

    /// A loaded value fails validation.
    #[error("invalid configuration: {message}")]
    Validation {
        /// What is wrong with the value.
        message: String,
    },
}

impl ConfigError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Top-level runtime failure.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The API rejected a call the runtime itself made (e.g. `getMe`
    /// during startup).
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
pub type RuntimeResult<T> = Result<T, RuntimeError>;
