//! Built-in middleware shipped with the framework.

pub mod callback_data;
pub mod ephemeral;
pub mod questions;

pub use callback_data::{
    CallbackDataResolver, CallbackStore, MemoryCallbackStore, SHORT_ID_PREFIX, shorten,
};
pub use ephemeral::EphemeralCleanup;
pub use questions::QuestionInterceptor;
