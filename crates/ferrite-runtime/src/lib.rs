//! Ferrite Runtime - orchestration layer for the Ferrite bot framework.
//!
//! This crate provides:
//! - Layered configuration loading (`ferrite.toml` + `FERRITE_*` env)
//! - An HTTP [`Transport`](ferrite_core::Transport) implementation for
//!   the bot API
//! - A long-polling update source with backoff and graceful shutdown
//! - [`FerriteRuntime`], which wires the above into a runnable process
//!
//! ```ignore
//! use ferrite_runtime::FerriteRuntime;
//! use ferrite_framework::handler_fn;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut runtime = FerriteRuntime::new()?;
//!     runtime.dispatcher_mut().on_update(handler_fn(|update| async move {
//!         // react to update.entity here
//!     }));
//!     runtime.run().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod polling;
pub mod runtime;
pub mod transport;

pub use config::{BotConfig, EphemeralConfig, FerriteConfig, LoggingConfig, PollingConfig};
pub use error::{ConfigError, ConfigResult, RuntimeError, RuntimeResult};
pub use polling::PollingSource;
pub use runtime::FerriteRuntime;
pub use transport::HttpTransport;
