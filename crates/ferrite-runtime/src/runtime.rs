//! Main runtime orchestration.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ferrite_runtime::FerriteRuntime;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut runtime = FerriteRuntime::new()?;
//!     runtime.dispatcher_mut().on_update(handler_fn(|update| async move {
//!         // ...
//!     }));
//!     runtime.run().await?;
//!     Ok(())
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tracing::{info, warn};

use ferrite_core::Bot;
use ferrite_framework::Dispatcher;
use ferrite_framework::builtin::{
    CallbackDataResolver, CallbackStore, EphemeralCleanup, MemoryCallbackStore, QuestionInterceptor,
};

use crate::config::FerriteConfig;
use crate::error::RuntimeResult;
use crate::logging;
use crate::polling::PollingSource;
use crate::transport::HttpTransport;

/// Wires configuration, transport, dispatcher and polling into a
/// runnable bot process.
///
/// Construction installs the standard middleware in a fixed order:
/// ephemeral cleanup (when enabled) outermost so it observes every
/// private message even when a later stage consumes it, then question
/// interception, then callback-payload resolution. Application
/// middleware added via [`dispatcher_mut`](Self::dispatcher_mut) runs
/// after them.
pub struct FerriteRuntime {
    config: FerriteConfig,
    bot: Bot,
    dispatcher: Dispatcher,
    callbacks: Arc<dyn CallbackStore>,
}

impl FerriteRuntime {
    /// Creates a runtime from `ferrite.toml` and the environment, and
    /// initializes logging from the loaded configuration.
    pub fn new() -> RuntimeResult<Self> {
        let config = FerriteConfig::load()?;
        logging::init_from_config(&config.logging);
        Self::from_config(config)
    }

    /// Creates a runtime from a pre-loaded configuration. Logging is
    /// left to the caller.
    pub fn from_config(config: FerriteConfig) -> RuntimeResult<Self> {
        let transport = HttpTransport::new(
            &config.bot.api_url,
            &config.bot.token,
            Duration::from_secs(config.bot.request_timeout_secs),
        )?;
        let bot = Bot::new(Arc::new(transport));
        let callbacks: Arc<dyn CallbackStore> = Arc::new(MemoryCallbackStore::new());

        let mut dispatcher = Dispatcher::new(bot.clone());
        install_standard_middleware(&mut dispatcher, &config, callbacks.clone());

        Ok(Self {
            config,
            bot,
            dispatcher,
            callbacks,
        })
    }

    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    pub fn config(&self) -> &FerriteConfig {
        &self.config
    }

    /// The callback-payload store shared with the resolver middleware;
    /// use it with [`shorten`](ferrite_framework::builtin::shorten)
    /// when building inline keyboards.
    pub fn callbacks(&self) -> &Arc<dyn CallbackStore> {
        &self.callbacks
    }

    /// The dispatcher, for registering handlers and extra middleware.
    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    /// Verifies credentials, then polls for updates until Ctrl+C.
    pub async fn run(self) -> RuntimeResult<()> {
        let me = self.bot.get_me().await?;
        info!(
            bot_id = me.id,
            username = me.username.as_deref().unwrap_or("<unset>"),
            "bot authorized, starting polling"
        );

        let dispatcher = Arc::new(self.dispatcher);
        let source = PollingSource::new(self.bot, dispatcher, self.config.polling.clone());
        let shutdown = source.shutdown_token();

        tokio::spawn(async move {
            if let Err(err) = signal::ctrl_c().await {
                warn!(error = %err, "ctrl-c listener failed, shutting down");
            } else {
                info!("shutdown signal received");
            }
            shutdown.cancel();
        });

        source.run().await;
        info!("runtime stopped");
        Ok(())
    }
}

/// Installs the standard middleware stack in its fixed order.
///
/// Ephemeral cleanup must sit outermost: it schedules deletion for
/// every private message regardless of whether an inner stage (the
/// question interceptor in particular) consumes the update.
fn install_standard_middleware(
    dispatcher: &mut Dispatcher,
    config: &FerriteConfig,
    callbacks: Arc<dyn CallbackStore>,
) {
    if config.ephemeral.enabled {
        dispatcher.layer(EphemeralCleanup::new(Duration::from_secs(
            config.ephemeral.delay_secs,
        )));
    }
    dispatcher.layer(QuestionInterceptor);
    dispatcher.layer(CallbackDataResolver::new(callbacks));
}
