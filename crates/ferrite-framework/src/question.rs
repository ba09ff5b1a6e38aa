//! Pending-question state for conversational flows.
//!
//! A handler can ask a user a question and park a callback here; the
//! [`QuestionInterceptor`](crate::builtin::QuestionInterceptor) middleware
//! routes that user's next message straight to the callback instead of the
//! regular handlers.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use parking_lot::Mutex;
use tracing::debug;

use ferrite_core::{ContextError, MessageContext};

use crate::error::DispatchResult;

/// A one-shot continuation invoked with the user's next message.
pub type QuestionCallback = Box<dyn FnOnce(MessageContext) -> BoxFuture<'static, ()> + Send>;

/// Shared table of pending questions, keyed by user id.
///
/// At most one question is pending per user. Asking again while a question
/// is outstanding replaces the previous callback; the later question wins.
#[derive(Clone, Default)]
pub struct QuestionStore {
    pending: Arc<Mutex<HashMap<i64, QuestionCallback>>>,
}

impl QuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parks a callback for `user_id`, replacing any previous one.
    pub fn register(&self, user_id: i64, callback: QuestionCallback) {
        if self.pending.lock().insert(user_id, callback).is_some() {
            debug!(user_id, "replaced pending question");
        }
    }

    /// Removes and returns the pending callback for `user_id`, if any.
    ///
    /// The removal is atomic with the lookup, so a callback is handed to at
    /// most one caller even under concurrent dispatch.
    pub fn take(&self, user_id: i64) -> Option<QuestionCallback> {
        self.pending.lock().remove(&user_id)
    }

    /// Reports whether a question is pending for `user_id` without
    /// consuming it.
    pub fn is_waiting(&self, user_id: i64) -> bool {
        self.pending.lock().contains_key(&user_id)
    }

    /// Number of users with a pending question.
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    /// Sends `prompt` as a reply to `cx` and parks `callback` for the
    /// message's sender.
    ///
    /// Fails with [`ContextError::MissingUserIdentity`] when the message has
    /// no sender to key the question on (e.g. channel posts).
    pub async fn ask<F, Fut>(
        &self,
        cx: &MessageContext,
        prompt: &str,
        callback: F,
    ) -> DispatchResult<()>
    where
        F: FnOnce(MessageContext) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let user_id = cx
            .from()
            .map(|user| user.id())
            .ok_or(ContextError::MissingUserIdentity)?;
        cx.reply(prompt).await?;
        self.register(user_id, boxed(callback));
        Ok(())
    }
}

/// Boxes an async closure into a [`QuestionCallback`].
pub fn boxed<F, Fut>(callback: F) -> QuestionCallback
where
    F: FnOnce(MessageContext) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    Box::new(move |cx| Box::pin(callback(cx)))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    fn noop() -> QuestionCallback {
        boxed(|_cx| async {})
    }

    #[test]
    fn take_consumes_exactly_once() {
        let store = QuestionStore::new();
        store.register(7, noop());

        assert!(store.is_waiting(7));
        assert!(store.take(7).is_some());
        assert!(store.take(7).is_none());
        assert!(!store.is_waiting(7));
    }

    #[test]
    fn later_registration_wins() {
        let store = QuestionStore::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let first = hits.clone();
        store.register(
            42,
            boxed(move |_cx| async move {
                first.fetch_add(1, Ordering::SeqCst);
            }),
        );
        let second = hits.clone();
        store.register(
            42,
            boxed(move |_cx| async move {
                second.fetch_add(100, Ordering::SeqCst);
            }),
        );

        assert_eq!(store.len(), 1);
        // Dropping the replaced callback must not run it.
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn peek_does_not_consume() {
        let store = QuestionStore::new();
        store.register(1, noop());

        assert!(store.is_waiting(1));
        assert!(store.is_waiting(1));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn keys_are_independent() {
        let store = QuestionStore::new();
        store.register(1, noop());
        store.register(2, noop());

        assert!(store.take(1).is_some());
        assert!(store.is_waiting(2));
    }
}
