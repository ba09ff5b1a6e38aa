//! Raw callback query payload.

use serde::{Deserialize, Serialize};

use super::message::RawMessage;
use super::user::RawUser;

/// A button press on an inline keyboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCallbackQuery {
    /// Unique query identifier.
    pub id: String,
    /// The user who pressed the button.
    pub from: RawUser,
    /// The message the button was attached to; absent when the message
    /// is too old or was sent inline.
    #[serde(default)]
    pub message: Option<Box<RawMessage>>,
    /// Identifier of the inline message, when sent via inline mode.
    #[serde(default)]
    pub inline_message_id: Option<String>,
    /// Global identifier of the originating chat.
    #[serde(default)]
    pub chat_instance: Option<String>,
    /// Opaque data attached to the button.
    ///
    /// May carry a `cbd:` short id that the callback-payload resolution
    /// middleware replaces with the stored full payload before handlers
    /// observe it.
    #[serde(default)]
    pub data: Option<String>,
}
