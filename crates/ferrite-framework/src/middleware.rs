//! Middleware chain run over each classified update before handlers.
//!
//! Middleware see the raw [`Update`] envelope and may rewrite it; typed
//! contexts are only built after the whole chain has run, so edits made
//! here are visible to every handler. A middleware short-circuits by
//! returning without calling [`Next::run`].

use std::sync::Arc;

use async_trait::async_trait;

use ferrite_core::{Bot, EntityRegistry, Update, UpdateKind};

use crate::error::DispatchResult;
use crate::question::QuestionStore;

/// Mutable per-update state threaded through the middleware chain.
pub struct DispatchContext {
    bot: Bot,
    update: Update,
    questions: QuestionStore,
    entities: Arc<EntityRegistry>,
}

impl DispatchContext {
    pub fn new(
        bot: Bot,
        update: Update,
        questions: QuestionStore,
        entities: Arc<EntityRegistry>,
    ) -> Self {
        Self {
            bot,
            update,
            questions,
            entities,
        }
    }

    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    /// The raw update envelope as it currently stands.
    pub fn update(&self) -> &Update {
        &self.update
    }

    /// Mutable access to the envelope; later middleware and the final
    /// context construction observe any edits.
    pub fn update_mut(&mut self) -> &mut Update {
        &mut self.update
    }

    /// Classification of the envelope in its current state.
    pub fn kind(&self) -> Option<UpdateKind> {
        self.update.kind()
    }

    pub fn questions(&self) -> &QuestionStore {
        &self.questions
    }

    pub fn entities(&self) -> &Arc<EntityRegistry> {
        &self.entities
    }
}

/// A single stage of the dispatch pipeline.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Processes the update, optionally calling `next` to continue the
    /// chain. Returning without calling `next` consumes the update.
    ///
    /// The returned flag reports whether anything downstream (or this
    /// middleware itself) handled the update.
    async fn handle(&self, cx: &mut DispatchContext, next: Next<'_>) -> DispatchResult<bool>;
}

/// The terminal stage reached when every middleware has called through.
#[async_trait]
pub trait Endpoint: Send + Sync {
    async fn call(&self, cx: &mut DispatchContext) -> DispatchResult<bool>;
}

/// Handle to the remainder of the middleware chain.
pub struct Next<'a> {
    rest: &'a [Arc<dyn Middleware>],
    endpoint: &'a dyn Endpoint,
}

impl<'a> Next<'a> {
    pub(crate) fn new(rest: &'a [Arc<dyn Middleware>], endpoint: &'a dyn Endpoint) -> Self {
        Self { rest, endpoint }
    }

    /// Runs the rest of the chain, ending at the endpoint.
    pub async fn run(self, cx: &mut DispatchContext) -> DispatchResult<bool> {
        match self.rest.split_first() {
            Some((current, rest)) => {
                let next = Next::new(rest, self.endpoint);
                current.handle(cx, next).await
            }
            None => self.endpoint.call(cx).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::{Value, json};

    use ferrite_core::{ApiResult, Transport};

    use super::*;

    struct NullTransport;

    #[async_trait]
    impl Transport for NullTransport {
        async fn call(&self, _method: &str, _params: Value) -> ApiResult<Value> {
            Ok(Value::Null)
        }
    }

    fn test_context() -> DispatchContext {
        let update: Update = serde_json::from_value(json!({
            "update_id": 1,
            "message": {
                "message_id": 5,
                "date": 0,
                "chat": {"id": 10, "type": "private"}
            }
        }))
        .unwrap();
        DispatchContext::new(
            Bot::new(Arc::new(NullTransport)),
            update,
            QuestionStore::new(),
            Arc::new(EntityRegistry::new()),
        )
    }

    struct Counting(Arc<AtomicUsize>);

    #[async_trait]
    impl Middleware for Counting {
        async fn handle(&self, cx: &mut DispatchContext, next: Next<'_>) -> DispatchResult<bool> {
            self.0.fetch_add(1, Ordering::SeqCst);
            next.run(cx).await
        }
    }

    struct Dropping;

    #[async_trait]
    impl Middleware for Dropping {
        async fn handle(&self, _cx: &mut DispatchContext, _next: Next<'_>) -> DispatchResult<bool> {
            Ok(true)
        }
    }

    struct CountingEndpoint(Arc<AtomicUsize>);

    #[async_trait]
    impl Endpoint for CountingEndpoint {
        async fn call(&self, _cx: &mut DispatchContext) -> DispatchResult<bool> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }
    }

    #[tokio::test]
    async fn chain_runs_in_order_to_endpoint() {
        let hits = Arc::new(AtomicUsize::new(0));
        let endpoint_hits = Arc::new(AtomicUsize::new(0));
        let chain: Vec<Arc<dyn Middleware>> = vec![
            Arc::new(Counting(hits.clone())),
            Arc::new(Counting(hits.clone())),
        ];
        let endpoint = CountingEndpoint(endpoint_hits.clone());
        let mut cx = test_context();

        let handled = Next::new(&chain, &endpoint).run(&mut cx).await.unwrap();

        assert!(handled);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(endpoint_hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn short_circuit_skips_rest_of_chain() {
        let hits = Arc::new(AtomicUsize::new(0));
        let endpoint_hits = Arc::new(AtomicUsize::new(0));
        let chain: Vec<Arc<dyn Middleware>> =
            vec![Arc::new(Dropping), Arc::new(Counting(hits.clone()))];
        let endpoint = CountingEndpoint(endpoint_hits.clone());
        let mut cx = test_context();

        let handled = Next::new(&chain, &endpoint).run(&mut cx).await.unwrap();

        assert!(handled);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(endpoint_hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn envelope_edits_survive_the_chain() {
        struct Rewriting;

        #[async_trait]
        impl Middleware for Rewriting {
            async fn handle(
                &self,
                cx: &mut DispatchContext,
                next: Next<'_>,
            ) -> DispatchResult<bool> {
                if let Some(message) = cx.update_mut().message.as_mut() {
                    message.text = Some("rewritten".to_owned());
                }
                next.run(cx).await
            }
        }

        struct TextEndpoint;

        #[async_trait]
        impl Endpoint for TextEndpoint {
            async fn call(&self, cx: &mut DispatchContext) -> DispatchResult<bool> {
                let text = cx.update().message.as_ref().and_then(|m| m.text.as_deref());
                Ok(text == Some("rewritten"))
            }
        }

        let chain: Vec<Arc<dyn Middleware>> = vec![Arc::new(Rewriting)];
        let mut cx = test_context();

        let handled = Next::new(&chain, &TextEndpoint).run(&mut cx).await.unwrap();
        assert!(handled);
    }
}
