//! Bot response variants returned by the teletest service.
//!
//! Every reply carries a `response_type` discriminator. Each variant holds
//! only the fields meaningful for its tag, so matching on [`BotResponse`]
//! tells the caller exactly which fields can be populated.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::decode::DecodeError;

/// Name of the discriminator field on the wire.
pub const RESPONSE_TYPE_FIELD: &str = "response_type";

const MESSAGE_FIELDS: &[&str] = &["message_id", "message_text", "reply_markup", "reply_keyboard"];
const CALLBACK_ANSWER_FIELDS: &[&str] = &[
    "message_id",
    "message_text",
    "callback_answer_text",
    "callback_answer_alert",
];
const POPUP_FIELDS: &[&str] = &["message_id", "message_text", "popup_message"];

/// Discriminator values for [`BotResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// A new message from the bot.
    Message,
    /// An existing message the bot edited in place.
    EditedMessage,
    /// Acknowledgement of a button press.
    CallbackAnswer,
    /// Transient alert shown outside the message stream.
    Popup,
}

impl ResponseType {
    /// Every known tag.
    pub const ALL: [Self; 4] = [
        Self::Message,
        Self::EditedMessage,
        Self::CallbackAnswer,
        Self::Popup,
    ];

    /// Wire name of this tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::EditedMessage => "edited_message",
            Self::CallbackAnswer => "callback_answer",
            Self::Popup => "popup",
        }
    }

    /// Fields a response with this tag may carry, excluding the discriminator.
    #[must_use]
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Message | Self::EditedMessage => MESSAGE_FIELDS,
            Self::CallbackAnswer => CALLBACK_ANSWER_FIELDS,
            Self::Popup => POPUP_FIELDS,
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseType {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| DecodeError::UnknownResponseType(s.to_string()))
    }
}

/// A field that tells "absent" apart from an explicit JSON `null`.
///
/// Use with `#[serde(default, skip_serializing_if = "Nullable::is_absent")]`
/// so both states survive a decode/encode round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nullable<T> {
    /// Field not present.
    Absent,
    /// Field present with value `null`.
    Null,
    /// Field present with a value.
    Value(T),
}

impl<T> Nullable<T> {
    /// True when the field was not present.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// True when the field was present as `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the value, treating absent and `null` alike.
    #[must_use]
    pub const fn as_option(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }

    /// Take the value, treating absent and `null` alike.
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::Absent | Self::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<T>::deserialize(deserializer)?.map_or(Self::Null, Self::Value))
    }
}

/// Inline keyboard button attached to a bot message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageButton {
    /// Label shown on the button.
    pub text: String,
    /// Callback payload sent when pressed; `null` for URL or reply buttons.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub callback_data: Nullable<String>,
}

impl MessageButton {
    /// Create a button with no callback payload.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: Nullable::Absent,
        }
    }

    /// Attach a callback payload.
    #[must_use]
    pub fn with_callback_data(mut self, data: impl Into<String>) -> Self {
        self.callback_data = Nullable::Value(data.into());
        self
    }

    /// Callback payload, if any.
    #[must_use]
    pub fn callback_data(&self) -> Option<&str> {
        self.callback_data.as_option().map(String::as_str)
    }
}

/// Fields of a `message` or `edited_message` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_text: Option<String>,
    /// Rows of inline buttons.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub reply_markup: Nullable<Vec<Vec<MessageButton>>>,
    /// Whether a non-inline reply keyboard was attached.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub reply_keyboard: Nullable<bool>,
}

/// Fields of a `callback_answer` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackAnswer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_answer_text: Option<String>,
    /// `true` for a blocking alert, `false` for a toast.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_answer_alert: Option<bool>,
}

/// Fields of a `popup` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Popup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popup_message: Option<String>,
}

/// One reply produced by a bot interaction.
///
/// Plain serde deserialization ignores fields foreign to the tag. Use
/// [`crate::decode`] to pick a strict or lenient policy explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "response_type", rename_all = "snake_case")]
pub enum BotResponse {
    Message(MessageResponse),
    EditedMessage(MessageResponse),
    CallbackAnswer(CallbackAnswer),
    Popup(Popup),
}

impl BotResponse {
    /// Plain text message with an id.
    #[must_use]
    pub fn text_message(message_id: i64, text: impl Into<String>) -> Self {
        Self::Message(MessageResponse {
            message_id: Some(message_id),
            message_text: Some(text.into()),
            ..MessageResponse::default()
        })
    }

    /// Discriminator of this response.
    #[must_use]
    pub const fn response_type(&self) -> ResponseType {
        match self {
            Self::Message(_) => ResponseType::Message,
            Self::EditedMessage(_) => ResponseType::EditedMessage,
            Self::CallbackAnswer(_) => ResponseType::CallbackAnswer,
            Self::Popup(_) => ResponseType::Popup,
        }
    }

    #[must_use]
    pub const fn message_id(&self) -> Option<i64> {
        match self {
            Self::Message(m) | Self::EditedMessage(m) => m.message_id,
            Self::CallbackAnswer(a) => a.message_id,
            Self::Popup(p) => p.message_id,
        }
    }

    #[must_use]
    pub fn message_text(&self) -> Option<&str> {
        match self {
            Self::Message(m) | Self::EditedMessage(m) => m.message_text.as_deref(),
            Self::CallbackAnswer(a) => a.message_text.as_deref(),
            Self::Popup(p) => p.message_text.as_deref(),
        }
    }

    /// Message fields, for `message` and `edited_message` responses.
    #[must_use]
    pub const fn as_message(&self) -> Option<&MessageResponse> {
        match self {
            Self::Message(m) | Self::EditedMessage(m) => Some(m),
            Self::CallbackAnswer(_) | Self::Popup(_) => None,
        }
    }

    /// Inline keyboard rows, if the response carries any.
    #[must_use]
    pub fn reply_markup(&self) -> Option<&[Vec<MessageButton>]> {
        self.as_message()
            .and_then(|m| m.reply_markup.as_option())
            .map(Vec::as_slice)
    }

    /// All inline buttons in row order.
    pub fn buttons(&self) -> impl Iterator<Item = &MessageButton> {
        self.reply_markup().into_iter().flatten().flatten()
    }

    /// First inline button whose label equals `text`.
    #[must_use]
    pub fn find_button(&self, text: &str) -> Option<&MessageButton> {
        self.buttons().find(|button| button.text == text)
    }
}

/// Reply of the `get-messages` endpoint, in service order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetMessagesResponse {
    pub messages: Vec<BotResponse>,
}

/// Reply of the `reset-chat` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetChatResponse {
    pub status: String,
}

impl ResetChatResponse {
    /// True when the service reported success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
