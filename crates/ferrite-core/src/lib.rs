//! # Ferrite Core
//!
//! The core engine of the Ferrite bot framework: the typed data model
//! and context system over a Telegram-style HTTP bot API.
//!
//! ## Architecture Layers
//!
//! - **Wire model** ([`model`]): serde structs mirroring the platform's
//!   JSON payloads, including the [`Update`](model::Update) envelope
//!   and its classification into an [`UpdateKind`](model::UpdateKind).
//! - **Contexts** ([`context`]): typed views pairing a raw payload with
//!   a [`Bot`] back-reference; read accessors compute over the raw
//!   data, action methods call back into the API.
//! - **Entity registry** ([`registry`]): decentralized name→factory
//!   table with memoized construction, used by the dispatcher to build
//!   root contexts polymorphically.
//! - **Algorithms**: entity markup rendering ([`format`]) and
//!   great-circle geodesy ([`geo`]).
//!
//! ## Data Flow
//!
//! ```text
//! ┌───────────┐    ┌────────────┐    ┌─────────────────┐
//! │ Transport │───▶│  Update    │───▶│ EntityRegistry  │───▶ contexts
//! │  (JSON)   │    │ (classify) │    │ (build + memo)  │
//! └───────────┘    └────────────┘    └─────────────────┘
//! ```
//!
//! The dispatch pipeline itself (middleware, question state, update
//! dispatcher) lives in `ferrite-framework`.

pub mod client;
pub mod context;
pub mod error;
pub mod format;
pub mod geo;
pub mod model;
pub mod registry;

pub use client::{Bot, Transport, merge_params};
pub use context::{
    CallbackQueryContext, ChatContext, ChatJoinRequestContext, ChatMemberUpdatedContext,
    Entity, InlineQueryContext, LocationContext, MemberRole, MessageContext, PollAnswerContext,
    PollContext, PreCheckoutQueryContext, ServiceEvent, SharedEntity, ShippingQueryContext,
    UserContext,
};
pub use error::{ApiError, ApiResult, ContextError, RegistryError, RegistryResult};
pub use model::{ChatType, Update, UpdateKind};
pub use registry::{ENTITY_FACTORIES, EntityArgs, EntityFactory, EntityRegistration, EntityRegistry};
