//! Update dispatcher for the Ferrite framework.
//!
//! The [`Dispatcher`] receives raw update envelopes, classifies them,
//! runs the middleware chain over the mutable envelope, and finally
//! builds exactly one typed root context which is handed to every
//! registered handler.
//!
//! ```rust,ignore
//! use ferrite_framework::{Dispatcher, handler_fn};
//!
//! let mut dispatcher = Dispatcher::new(bot);
//! dispatcher.layer(QuestionInterceptor);
//! dispatcher.on_update(handler_fn(|update| async move {
//!     if let Some(msg) = update.entity.downcast_ref::<MessageContext>() {
//!         let _ = msg.reply("hello").await;
//!     }
//! }));
//! dispatcher.dispatch(update).await?;
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::Value;
use tracing::{Instrument, Level, debug, span, warn};

use ferrite_core::{Bot, EntityArgs, EntityRegistry, SharedEntity, Update, UpdateKind};

use crate::error::{DispatchError, DispatchResult};
use crate::middleware::{DispatchContext, Endpoint, Middleware, Next};
use crate::question::QuestionStore;

/// A classified update with its root context, as seen by handlers.
#[derive(Clone)]
pub struct DispatchedUpdate {
    /// What kind of update this is.
    pub kind: UpdateKind,
    /// The typed root context, downcastable to its concrete type.
    pub entity: SharedEntity,
    /// The bot session the update arrived on.
    pub bot: Bot,
}

/// Type-erased update handler.
pub type UpdateHandler = Arc<dyn Fn(DispatchedUpdate) -> BoxFuture<'static, ()> + Send + Sync>;

/// Wraps an async closure into an [`UpdateHandler`].
pub fn handler_fn<F, Fut>(handler: F) -> UpdateHandler
where
    F: Fn(DispatchedUpdate) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    Arc::new(move |update| Box::pin(handler(update)))
}

/// The central update dispatcher.
///
/// Holds the middleware chain, the handler list, the entity registry
/// and the pending-question table. `dispatch` may be called from many
/// tasks concurrently; all shared state is internally synchronized.
pub struct Dispatcher {
    bot: Bot,
    entities: Arc<EntityRegistry>,
    questions: QuestionStore,
    middleware: Vec<Arc<dyn Middleware>>,
    handlers: Vec<UpdateHandler>,
}

impl Dispatcher {
    pub fn new(bot: Bot) -> Self {
        Self {
            bot,
            entities: Arc::new(EntityRegistry::new()),
            questions: QuestionStore::new(),
            middleware: Vec::new(),
            handlers: Vec::new(),
        }
    }

    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    pub fn questions(&self) -> &QuestionStore {
        &self.questions
    }

    pub fn entities(&self) -> &Arc<EntityRegistry> {
        &self.entities
    }

    /// Appends a middleware to the chain. Middleware run in the order
    /// they were added.
    pub fn layer<M: Middleware + 'static>(&mut self, middleware: M) -> &mut Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Appends a middleware (builder pattern).
    pub fn with_layer<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Registers a handler invoked with every dispatched root context.
    pub fn on_update(&mut self, handler: UpdateHandler) -> &mut Self {
        self.handlers.push(handler);
        self
    }

    /// Decodes a raw envelope and dispatches it.
    ///
    /// A payload that is not even envelope-shaped is logged and dropped
    /// rather than treated as an error; polling keeps going.
    pub async fn dispatch_raw(&self, raw: Value) -> DispatchResult<bool> {
        match serde_json::from_value::<Update>(raw) {
            Ok(update) => self.dispatch(update).await,
            Err(err) => {
                warn!(error = %err, "discarding undecodable update envelope");
                Ok(false)
            }
        }
    }

    /// Runs one update through the full pipeline.
    ///
    /// Returns `Ok(true)` when a root context was built and handed to
    /// the handlers, `Ok(false)` when the update was dropped before
    /// that point (unclassifiable, or consumed by a middleware).
    pub async fn dispatch(&self, update: Update) -> DispatchResult<bool> {
        let Some(kind) = update.kind() else {
            debug!(update_id = update.update_id, "dropping unclassifiable update");
            return Ok(false);
        };

        let span = span!(Level::DEBUG, "dispatch", update_id = update.update_id, kind = %kind);

        let mut cx = DispatchContext::new(
            self.bot.clone(),
            update,
            self.questions.clone(),
            Arc::clone(&self.entities),
        );
        let endpoint = HandlerEndpoint {
            handlers: &self.handlers,
        };
        Next::new(&self.middleware, &endpoint)
            .run(&mut cx)
            .instrument(span)
            .await
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("middleware", &self.middleware.len())
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// Terminal chain stage: builds the root context and fans it out to the
/// registered handlers.
struct HandlerEndpoint<'h> {
    handlers: &'h [UpdateHandler],
}

#[async_trait]
impl Endpoint for HandlerEndpoint<'_> {
    async fn call(&self, cx: &mut DispatchContext) -> DispatchResult<bool> {
        // Re-classify: a middleware may have rewritten the envelope.
        let Some(kind) = cx.kind() else {
            debug!("envelope emptied mid-chain, dropping");
            return Ok(false);
        };
        let Some(payload) = cx.update().payload_value(kind) else {
            return Ok(false);
        };

        let entity = cx
            .entities()
            .get(
                kind.entity_name(),
                EntityArgs {
                    bot: cx.bot().clone(),
                    source: payload,
                },
            )
            .map_err(DispatchError::Registry)?;

        let dispatched = DispatchedUpdate {
            kind,
            entity,
            bot: cx.bot().clone(),
        };
        for handler in self.handlers {
            handler(dispatched.clone()).await;
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use ferrite_core::{ApiResult, MessageContext, Transport};

    use super::*;

    struct NullTransport;

    #[async_trait]
    impl Transport for NullTransport {
        async fn call(&self, _method: &str, _params: Value) -> ApiResult<Value> {
            Ok(Value::Null)
        }
    }

    fn bot() -> Bot {
        Bot::new(Arc::new(NullTransport))
    }

    fn message_update(text: &str) -> Update {
        serde_json::from_value(json!({
            "update_id": 100,
            "message": {
                "message_id": 1,
                "date": 0,
                "chat": {"id": 5, "type": "private"},
                "from": {"id": 9, "first_name": "Lin"},
                "text": text
            }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn builds_one_root_context_per_update() {
        let mut dispatcher = Dispatcher::new(bot());
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        dispatcher.on_update(handler_fn(move |update| {
            let counter = counter.clone();
            async move {
                assert_eq!(update.kind, UpdateKind::Message);
                assert!(update.entity.downcast_ref::<MessageContext>().is_some());
                counter.fetch_add(1, Ordering::SeqCst);
            }
        }));

        let handled = dispatcher.dispatch(message_update("hi")).await.unwrap();

        assert!(handled);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(dispatcher.entities().cached(), 1);
    }

    #[tokio::test]
    async fn empty_envelope_never_reaches_middleware() {
        struct Tripwire;

        #[async_trait]
        impl Middleware for Tripwire {
            async fn handle(
                &self,
                _cx: &mut DispatchContext,
                _next: Next<'_>,
            ) -> DispatchResult<bool> {
                panic!("middleware must not run for unclassifiable updates");
            }
        }

        let mut dispatcher = Dispatcher::new(bot());
        dispatcher.layer(Tripwire);

        let update: Update = serde_json::from_value(json!({"update_id": 3})).unwrap();
        let handled = dispatcher.dispatch(update).await.unwrap();

        assert!(!handled);
        assert_eq!(dispatcher.entities().cached(), 0);
    }

    #[tokio::test]
    async fn middleware_consumes_before_handlers() {
        struct Swallow;

        #[async_trait]
        impl Middleware for Swallow {
            async fn handle(
                &self,
                _cx: &mut DispatchContext,
                _next: Next<'_>,
            ) -> DispatchResult<bool> {
                Ok(true)
            }
        }

        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        let mut dispatcher = Dispatcher::new(bot());
        dispatcher.layer(Swallow);
        dispatcher.on_update(handler_fn(move |_update| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        }));

        let handled = dispatcher.dispatch(message_update("hi")).await.unwrap();

        assert!(handled);
        assert_eq!(seen.load(Ordering::SeqCst), 0);
        assert_eq!(dispatcher.entities().cached(), 0);
    }

    #[tokio::test]
    async fn envelope_rewrites_are_visible_to_contexts() {
        struct Upcase;

        #[async_trait]
        impl Middleware for Upcase {
            async fn handle(
                &self,
                cx: &mut DispatchContext,
                next: Next<'_>,
            ) -> DispatchResult<bool> {
                if let Some(message) = cx.update_mut().message.as_mut()
                    && let Some(text) = message.text.take()
                {
                    message.text = Some(text.to_uppercase());
                }
                next.run(cx).await
            }
        }

        let mut dispatcher = Dispatcher::new(bot());
        dispatcher.layer(Upcase);
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        dispatcher.on_update(handler_fn(move |update| {
            let counter = counter.clone();
            async move {
                let msg = update.entity.downcast_ref::<MessageContext>().unwrap();
                assert_eq!(msg.text(), Some("HI"));
                counter.fetch_add(1, Ordering::SeqCst);
            }
        }));

        assert!(dispatcher.dispatch(message_update("hi")).await.unwrap());
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn undecodable_raw_payload_is_dropped() {
        let dispatcher = Dispatcher::new(bot());
        let handled = dispatcher.dispatch_raw(json!("not an object")).await.unwrap();
        assert!(!handled);
    }
}
