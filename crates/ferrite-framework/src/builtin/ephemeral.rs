//! Ephemeral-message cleanup middleware.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use ferrite_core::{ChatType, UpdateKind};

use crate::error::DispatchResult;
use crate::middleware::{DispatchContext, Middleware, Next};

/// Deletes private-chat messages a fixed delay after handling.
///
/// The deletion is fire-and-forget: it runs on a spawned task after the
/// chain has finished, and a failed delete (message already gone, chat
/// closed) is ignored. The chain's own result is passed through
/// unchanged either way.
pub struct EphemeralCleanup {
    delay: Duration,
}

impl EphemeralCleanup {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Middleware for EphemeralCleanup {
    async fn handle(&self, cx: &mut DispatchContext, next: Next<'_>) -> DispatchResult<bool> {
        let target = cx.update().message.as_ref().and_then(|message| {
            (cx.kind() == Some(UpdateKind::Message) && message.chat.kind == ChatType::Private)
                .then_some((message.chat.id, message.message_id))
        });

        let result = next.run(cx).await;

        if let Some((chat_id, message_id)) = target {
            let bot = cx.bot().clone();
            let delay = self.delay;
            debug!(chat_id, message_id, delay_secs = delay.as_secs(), "scheduling ephemeral delete");
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                // Best effort; the message may already be gone.
                let _ = bot.delete_message(chat_id, message_id).await;
            });
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;
    use serde_json::{Value, json};

    use ferrite_core::{ApiResult, Bot, EntityRegistry, Transport, Update};

    use super::*;
    use crate::middleware::Endpoint;
    use crate::question::QuestionStore;

    #[derive(Default)]
    struct RecordingTransport {
        calls: Mutex<Vec<(String, Value)>>,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn call(&self, method: &str, params: Value) -> ApiResult<Value> {
            self.calls.lock().push((method.to_owned(), params));
            Ok(Value::Null)
        }
    }

    struct OkEndpoint(Arc<AtomicUsize>);

    #[async_trait]
    impl Endpoint for OkEndpoint {
        async fn call(&self, _cx: &mut DispatchContext) -> DispatchResult<bool> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }
    }

    fn context_for(update: Value, transport: Arc<RecordingTransport>) -> DispatchContext {
        DispatchContext::new(
            Bot::new(transport),
            serde_json::from_value::<Update>(update).unwrap(),
            QuestionStore::new(),
            Arc::new(EntityRegistry::new()),
        )
    }

    fn private_message() -> Value {
        json!({
            "update_id": 1,
            "message": {
                "message_id": 77,
                "date": 0,
                "chat": {"id": 5, "type": "private"},
                "from": {"id": 5, "first_name": "e"},
                "text": "secret"
            }
        })
    }

    #[tokio::test(start_paused = true)]
    async fn deletes_private_messages_after_delay() {
        let transport = Arc::new(RecordingTransport::default());
        let endpoint_hits = Arc::new(AtomicUsize::new(0));
        let endpoint = OkEndpoint(endpoint_hits.clone());
        let mut cx = context_for(private_message(), transport.clone());

        let cleanup = EphemeralCleanup::new(Duration::from_secs(30));
        let handled = cleanup
            .handle(&mut cx, Next::new(&[], &endpoint))
            .await
            .unwrap();
        assert!(handled);
        assert_eq!(endpoint_hits.load(Ordering::SeqCst), 1);
        assert!(transport.calls.lock().is_empty());

        // Advancing past the delay lets the spawned delete run.
        tokio::time::sleep(Duration::from_secs(31)).await;
        tokio::task::yield_now().await;

        let calls = transport.calls.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "deleteMessage");
        assert_eq!(calls[0].1["chat_id"], json!(5));
        assert_eq!(calls[0].1["message_id"], json!(77));
    }

    #[tokio::test(start_paused = true)]
    async fn group_messages_are_left_alone() {
        let transport = Arc::new(RecordingTransport::default());
        let endpoint = OkEndpoint(Arc::new(AtomicUsize::new(0)));
        let update = json!({
            "update_id": 1,
            "message": {
                "message_id": 8,
                "date": 0,
                "chat": {"id": -100, "type": "group"},
                "text": "public"
            }
        });
        let mut cx = context_for(update, transport.clone());

        EphemeralCleanup::new(Duration::from_secs(30))
            .handle(&mut cx, Next::new(&[], &endpoint))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert!(transport.calls.lock().is_empty());
    }
}
