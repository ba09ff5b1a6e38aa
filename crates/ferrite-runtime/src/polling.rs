//! Long-polling update source.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use ferrite_core::Bot;
use ferrite_framework::Dispatcher;

use crate::config::PollingConfig;

/// Pulls update batches with `getUpdates` and feeds them to the
/// dispatcher.
///
/// The confirmed offset advances past every received `update_id`, even
/// for envelopes the dispatcher drops, so the platform never redelivers
/// them. Failed polls retry with exponential backoff; a dispatch error
/// is logged and polling continues.
pub struct PollingSource {
    bot: Bot,
    dispatcher: Arc<Dispatcher>,
    config: PollingConfig,
    shutdown: CancellationToken,
}

impl PollingSource {
    pub fn new(bot: Bot, dispatcher: Arc<Dispatcher>, config: PollingConfig) -> Self {
        Self {
            bot,
            dispatcher,
            config,
            shutdown: CancellationToken::new(),
        }
    }

    /// Token that stops the polling loop when cancelled.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Runs the polling loop until the shutdown token fires.
    pub async fn run(&self) {
        let initial_backoff = Duration::from_millis(self.config.backoff_initial_ms);
        let max_backoff = Duration::from_millis(self.config.backoff_max_ms);
        let mut offset: Option<i64> = None;
        let mut backoff = initial_backoff;

        loop {
            let batch = tokio::select! {
                _ = self.shutdown.cancelled() => break,
                batch = self.bot.get_updates(
                    offset,
                    self.config.timeout_secs,
                    self.config.limit,
                    &self.config.allowed_updates,
                ) => batch,
            };

            match batch {
                Ok(updates) => {
                    backoff = initial_backoff;
                    for raw in updates {
                        if let Some(id) = raw.get("update_id").and_then(Value::as_i64) {
                            offset = Some(offset.map_or(id + 1, |current| current.max(id + 1)));
                        }
                        if let Err(err) = self.dispatcher.dispatch_raw(raw).await {
                            error!(error = %err, "update dispatch failed");
                        }
                    }
                }
                Err(err) => {
                    warn!(error = %err, backoff_ms = backoff.as_millis() as u64, "poll failed, backing off");
                    tokio::select! {
                        _ = self.shutdown.cancelled() => break,
                        _ = tokio::time::sleep(backoff) => {}
                    }
                    backoff = (backoff * 2).min(max_backoff);
                }
            }
        }
        debug!("polling loop stopped");
    }
}
