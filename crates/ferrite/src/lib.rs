//! # Ferrite
//!
//! A typed, middleware-driven Telegram bot framework for Rust.
//!
//! ## Architecture
//!
//! Updates flow through three layers:
//!
//! ```text
//! ┌─────────────┐    ┌────────────────────────────┐    ┌──────────────┐
//! │   Runtime   │───▶│ Dispatcher                 │───▶│ your handler │
//! │ (long poll) │    │  middleware ▸ root context │    │  (contexts)  │
//! └─────────────┘    └────────────────────────────┘    └──────────────┘
//! ```
//!
//! - **core**: wire model, typed contexts, entity registry, API client
//! - **framework**: dispatcher, middleware chain, question state,
//!   built-in middleware
//! - **runtime**: config, logging, HTTP transport, polling loop
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ferrite::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut runtime = FerriteRuntime::new()?;
//!     runtime.dispatcher_mut().on_update(handler_fn(|update| async move {
//!         if let Some(msg) = update.entity.downcast_ref::<MessageContext>() {
//!             if msg.text() == Some("/ping") {
//!                 let _ = msg.reply("pong").await;
//!             }
//!         }
//!     }));
//!     runtime.run().await?;
//!     Ok(())
//! }
//! ```

pub use ferrite_core as core;
pub use ferrite_framework as framework;
pub use ferrite_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use ferrite::prelude::*;
/// ```
pub mod prelude {
    // Runtime entry point and configuration.
    pub use ferrite_runtime::{FerriteConfig, FerriteRuntime};

    // Dispatch pipeline.
    pub use ferrite_framework::{
        DispatchContext, DispatchError, DispatchedUpdate, Dispatcher, Middleware, Next,
        QuestionStore, handler_fn,
    };
    pub use ferrite_framework::builtin::{
        CallbackDataResolver, CallbackStore, EphemeralCleanup, MemoryCallbackStore,
        QuestionInterceptor, shorten,
    };

    // Client and contexts.
    pub use ferrite_core::{
        ApiError, Bot, CallbackQueryContext, ChatContext, ChatJoinRequestContext,
        ChatMemberUpdatedContext, InlineQueryContext, LocationContext, MemberRole, MessageContext,
        PollAnswerContext, PollContext, PreCheckoutQueryContext, ServiceEvent, SharedEntity,
        ShippingQueryContext, Transport, Update, UpdateKind, UserContext,
    };
}
