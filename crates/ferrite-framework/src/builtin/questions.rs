//! Question interception middleware.

use async_trait::async_trait;
use tracing::debug;

use ferrite_core::{MessageContext, UpdateKind};

use crate::error::DispatchResult;
use crate::middleware::{DispatchContext, Middleware, Next};

/// Routes a user's next plain message to their pending question
/// callback, bypassing the rest of the chain.
///
/// Only plain messages count; edited messages and channel posts never
/// resume a question. Users without a pending question fall through to
/// the rest of the chain untouched.
pub struct QuestionInterceptor;

#[async_trait]
impl Middleware for QuestionInterceptor {
    async fn handle(&self, cx: &mut DispatchContext, next: Next<'_>) -> DispatchResult<bool> {
        if cx.kind() == Some(UpdateKind::Message)
            && let Some(message) = cx.update().message.as_ref()
            && let Some(from) = message.from.as_ref()
            && let Some(callback) = cx.questions().take(from.id)
        {
            debug!(user_id = from.id, "resuming pending question");
            let raw = message.clone();
            callback(MessageContext::new(cx.bot().clone(), raw)).await;
            return Ok(true);
        }
        next.run(cx).await
    }
}
