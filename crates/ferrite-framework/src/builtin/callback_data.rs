//! Callback-payload resolution middleware.
//!
//! The platform caps inline-button payloads at a few dozen bytes.
//! [`shorten`] stores the real payload and returns a `cbd:<id>` stand-in
//! that fits the cap; [`CallbackDataResolver`] swaps the stand-in back
//! for the stored payload before any handler sees the callback query.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, warn};

use ferrite_core::UpdateKind;

use crate::error::DispatchResult;
use crate::middleware::{DispatchContext, Middleware, Next};

/// Marks a callback payload as a stored-payload reference.
pub const SHORT_ID_PREFIX: &str = "cbd:";

/// Persistence contract for oversized callback payloads.
#[async_trait]
pub trait CallbackStore: Send + Sync {
    /// Stores a payload and returns its identifier.
    async fn put(&self, payload: String) -> String;

    /// Looks a payload up by identifier. `None` means the identifier is
    /// unknown or has expired.
    async fn get(&self, id: &str) -> Option<String>;
}

/// Stores `payload` and returns the `cbd:<id>` stand-in to put on the
/// button instead.
pub async fn shorten(store: &dyn CallbackStore, payload: String) -> String {
    let id = store.put(payload).await;
    format!("{SHORT_ID_PREFIX}{id}")
}

/// In-process [`CallbackStore`] with sequential identifiers.
///
/// Payloads only survive as long as the process; deployments that
/// restart between sending a keyboard and the button press need a
/// persistent implementation.
#[derive(Default)]
pub struct MemoryCallbackStore {
    payloads: Mutex<HashMap<String, String>>,
    next_id: AtomicU64,
}

impl MemoryCallbackStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CallbackStore for MemoryCallbackStore {
    async fn put(&self, payload: String) -> String {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed).to_string();
        self.payloads.lock().insert(id.clone(), payload);
        id
    }

    async fn get(&self, id: &str) -> Option<String> {
        self.payloads.lock().get(id).cloned()
    }
}

/// Replaces `cbd:<id>` callback payloads with their stored originals.
///
/// Data without the prefix passes through untouched, as does a prefixed
/// id the store no longer knows (the handler then sees the stand-in and
/// can treat it as stale).
pub struct CallbackDataResolver {
    store: Arc<dyn CallbackStore>,
}

impl CallbackDataResolver {
    pub fn new(store: Arc<dyn CallbackStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Middleware for CallbackDataResolver {
    async fn handle(&self, cx: &mut DispatchContext, next: Next<'_>) -> DispatchResult<bool> {
        if cx.kind() == Some(UpdateKind::CallbackQuery) {
            let short_id = cx
                .update()
                .callback_query
                .as_ref()
                .and_then(|query| query.data.as_deref())
                .and_then(|data| data.strip_prefix(SHORT_ID_PREFIX))
                .map(str::to_owned);
            if let Some(short_id) = short_id {
                match self.store.get(&short_id).await {
                    Some(payload) => {
                        debug!(id = %short_id, "resolved short callback payload");
                        if let Some(query) = cx.update_mut().callback_query.as_mut() {
                            query.data = Some(payload);
                        }
                    }
                    None => {
                        warn!(id = %short_id, "unknown short callback id, passing through");
                    }
                }
            }
        }
        next.run(cx).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use ferrite_core::{ApiResult, Bot, EntityRegistry, Transport, Update};

    use super::*;
    use crate::middleware::Endpoint;
    use crate::question::QuestionStore;

    struct NullTransport;

    #[async_trait]
    impl Transport for NullTransport {
        async fn call(&self, _method: &str, _params: Value) -> ApiResult<Value> {
            Ok(Value::Null)
        }
    }

    struct DataEndpoint {
        expected: &'static str,
    }

    #[async_trait]
    impl Endpoint for DataEndpoint {
        async fn call(&self, cx: &mut DispatchContext) -> DispatchResult<bool> {
            let data = cx
                .update()
                .callback_query
                .as_ref()
                .and_then(|q| q.data.as_deref());
            assert_eq!(data, Some(self.expected));
            Ok(true)
        }
    }

    fn callback_update(data: &str) -> DispatchContext {
        let update: Update = serde_json::from_value(json!({
            "update_id": 1,
            "callback_query": {
                "id": "cq1",
                "from": {"id": 3, "first_name": "p"},
                "data": data
            }
        }))
        .unwrap();
        DispatchContext::new(
            Bot::new(std::sync::Arc::new(NullTransport)),
            update,
            QuestionStore::new(),
            Arc::new(EntityRegistry::new()),
        )
    }

    #[tokio::test]
    async fn short_id_is_spliced_back() {
        let store = Arc::new(MemoryCallbackStore::new());
        let stand_in = shorten(store.as_ref(), "the full original payload".into()).await;
        assert!(stand_in.starts_with(SHORT_ID_PREFIX));

        let resolver = CallbackDataResolver::new(store);
        let mut cx = callback_update(&stand_in);
        let endpoint = DataEndpoint {
            expected: "the full original payload",
        };

        let handled = resolver
            .handle(&mut cx, Next::new(&[], &endpoint))
            .await
            .unwrap();
        assert!(handled);
    }

    #[tokio::test]
    async fn plain_data_passes_through_unchanged() {
        let resolver = CallbackDataResolver::new(Arc::new(MemoryCallbackStore::new()));
        let mut cx = callback_update("plain");
        let endpoint = DataEndpoint { expected: "plain" };

        resolver
            .handle(&mut cx, Next::new(&[], &endpoint))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unknown_id_passes_through_unchanged() {
        let resolver = CallbackDataResolver::new(Arc::new(MemoryCallbackStore::new()));
        let mut cx = callback_update("cbd:404");
        let endpoint = DataEndpoint { expected: "cbd:404" };

        resolver
            .handle(&mut cx, Next::new(&[], &endpoint))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn memory_store_round_trips() {
        let store = MemoryCallbackStore::new();
        let a = store.put("alpha".into()).await;
        let b = store.put("beta".into()).await;

        assert_ne!(a, b);
        assert_eq!(store.get(&a).await.as_deref(), Some("alpha"));
        assert_eq!(store.get(&b).await.as_deref(), Some("beta"));
        assert_eq!(store.get("missing").await, None);
    }
}
