//! # Ferrite Framework
//!
//! The dispatch pipeline of the Ferrite bot framework.
//!
//! This layer wires `ferrite-core`'s typed contexts into a running bot:
//! - [`Dispatcher`]: classifies raw updates, runs the middleware chain,
//!   builds exactly one root context per update and fans it out to
//!   handlers
//! - [`Middleware`]: ordered, short-circuiting stages that can inspect
//!   and rewrite the raw envelope before contexts exist
//! - [`QuestionStore`]: one-shot per-user continuations for
//!   ask-and-wait conversational flows
//! - [`builtin`]: question interception, callback-payload resolution
//!   and ephemeral-message cleanup middleware

pub mod builtin;
pub mod dispatcher;
pub mod error;
pub mod middleware;
pub mod question;

pub use dispatcher::{DispatchedUpdate, Dispatcher, UpdateHandler, handler_fn};
pub use error::{DispatchError, DispatchResult};
pub use middleware::{DispatchContext, Endpoint, Middleware, Next};
pub use question::{QuestionCallback, QuestionStore};
