//! Typed context views over raw payloads.
//!
//! A context pairs a raw payload struct with a [`Bot`](crate::client::Bot)
//! back-reference: read accessors compute over the live raw data, action
//! methods call back into the API with parameters assembled from the
//! context's identity fields.
//!
//! Contexts never mutate their raw payload after construction, and
//! accessors over optional wire fields return `Option` instead of
//! failing. Nested contexts (a message's sender, a callback query's
//! message) are built on demand from the nested raw structs; two
//! constructions from equal payloads are value-equal, which is all the
//! framework relies on.
//!
//! Every concrete view implements [`Entity`] and registers itself with
//! the entity registry (see [`crate::registry`]) so the dispatcher can
//! construct root contexts polymorphically by type name.

use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;

pub mod callback_query;
pub mod chat;
pub mod chat_join_request;
pub mod chat_member;
pub mod inline_query;
pub mod location;
pub mod message;
pub mod payments;
pub mod poll;
pub mod user;

pub use callback_query::CallbackQueryContext;
pub use chat::ChatContext;
pub use chat_join_request::ChatJoinRequestContext;
pub use chat_member::{ChatMemberUpdatedContext, MemberRole};
pub use inline_query::InlineQueryContext;
pub use location::LocationContext;
pub use message::{MessageContext, ServiceEvent};
pub use payments::{PreCheckoutQueryContext, ShippingQueryContext};
pub use poll::{PollAnswerContext, PollContext};
pub use user::UserContext;

// =============================================================================
// Entity trait
// =============================================================================

/// Base trait for all typed context views.
///
/// Contexts are type-erased as `dyn Entity` when constructed through the
/// registry and downcast back to concrete types by handlers.
pub trait Entity: Any + Send + Sync {
    /// The registry name of this context type.
    fn kind(&self) -> &'static str;

    /// Returns self as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
}

// =============================================================================
// SharedEntity
// =============================================================================

/// A type-erased, shareable context handle.
///
/// Clones share the same underlying context; the registry's memoization
/// hands out clones of one `SharedEntity` for repeated constructions of
/// the same `(type, payload)` pair.
#[derive(Clone)]
pub struct SharedEntity {
    inner: Arc<dyn Entity>,
}

impl SharedEntity {
    /// Wraps a concrete context.
    pub fn new<E: Entity>(entity: E) -> Self {
        Self {
            inner: Arc::new(entity),
        }
    }

    /// Attempts to downcast to a concrete context type.
    pub fn downcast_ref<E: Entity>(&self) -> Option<&E> {
        self.inner.as_any().downcast_ref()
    }

    /// Whether the wrapped context is of type `E`.
    pub fn is<E: Entity>(&self) -> bool {
        self.downcast_ref::<E>().is_some()
    }
}

impl Deref for SharedEntity {
    type Target = dyn Entity;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl std::fmt::Debug for SharedEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedEntity")
            .field("kind", &self.kind())
            .finish()
    }
}
