//! Request payloads for the teletest service endpoints.

use serde::{Deserialize, Serialize};

/// Number of messages `get-messages` asks for when the caller gives no limit.
pub const DEFAULT_MESSAGES_LIMIT: i64 = 5;

/// Body of `POST /send-message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    /// Bot to talk to, e.g. `@my_bot`.
    pub bot_username: String,
    pub message_text: String,
    /// How long the service waits for the bot to answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_sec: Option<u64>,
}

impl SendMessageRequest {
    #[must_use]
    pub fn new(bot_username: impl Into<String>, message_text: impl Into<String>) -> Self {
        Self {
            bot_username: bot_username.into(),
            message_text: message_text.into(),
            timeout_sec: None,
        }
    }

    /// Set the service-side wait timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout_sec: u64) -> Self {
        self.timeout_sec = Some(timeout_sec);
        self
    }
}

/// Body of `POST /press-button`.
///
/// The button is identified by its label, its callback payload, or both.
/// Both are forwarded as given; the service decides which one wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressButtonRequest {
    pub bot_username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_sec: Option<u64>,
}

impl PressButtonRequest {
    /// Request with no button selector; add one with the `with_*` methods.
    #[must_use]
    pub fn new(bot_username: impl Into<String>) -> Self {
        Self {
            bot_username: bot_username.into(),
            button_text: None,
            callback_data: None,
            timeout_sec: None,
        }
    }

    /// Press the button with this label.
    #[must_use]
    pub fn by_text(bot_username: impl Into<String>, button_text: impl Into<String>) -> Self {
        Self::new(bot_username).with_button_text(button_text)
    }

    /// Press the button with this callback payload.
    #[must_use]
    pub fn by_callback_data(
        bot_username: impl Into<String>,
        callback_data: impl Into<String>,
    ) -> Self {
        Self::new(bot_username).with_callback_data(callback_data)
    }

    #[must_use]
    pub fn with_button_text(mut self, button_text: impl Into<String>) -> Self {
        self.button_text = Some(button_text.into());
        self
    }

    #[must_use]
    pub fn with_callback_data(mut self, callback_data: impl Into<String>) -> Self {
        self.callback_data = Some(callback_data.into());
        self
    }

    /// Set the service-side wait timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout_sec: u64) -> Self {
        self.timeout_sec = Some(timeout_sec);
        self
    }
}

/// Query string of `GET /get-messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetMessagesQuery {
    pub bot_username: String,
    /// Forwarded unclamped.
    pub limit: i64,
}

impl GetMessagesQuery {
    /// Query with [`DEFAULT_MESSAGES_LIMIT`] when `limit` is `None`.
    #[must_use]
    pub fn new(bot_username: impl Into<String>, limit: Option<i64>) -> Self {
        Self {
            bot_username: bot_username.into(),
            limit: limit.unwrap_or(DEFAULT_MESSAGES_LIMIT),
        }
    }
}

/// Body of `POST /reset-chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetChatRequest {
    pub bot_username: String,
}

impl ResetChatRequest {
    #[must_use]
    pub fn new(bot_username: impl Into<String>) -> Self {
        Self {
            bot_username: bot_username.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_send_message_omits_absent_timeout() {
        let body = serde_json::to_value(SendMessageRequest::new("bot_a", "hi")).unwrap();
        assert_eq!(body, json!({"bot_username": "bot_a", "message_text": "hi"}));

        let body =
            serde_json::to_value(SendMessageRequest::new("bot_a", "hi").with_timeout(15)).unwrap();
        assert_eq!(body["timeout_sec"], 15);
    }

    #[test]
    fn test_press_button_forwards_both_selectors() {
        let body = serde_json::to_value(
            PressButtonRequest::by_text("bot_a", "Yes").with_callback_data("confirm"),
        )
        .unwrap();
        assert_eq!(
            body,
            json!({"bot_username": "bot_a", "button_text": "Yes", "callback_data": "confirm"})
        );

        let body =
            serde_json::to_value(PressButtonRequest::by_callback_data("bot_a", "opt_1")).unwrap();
        assert_eq!(body, json!({"bot_username": "bot_a", "callback_data": "opt_1"}));
    }

    #[test]
    fn test_empty_values_are_not_validated() {
        let req = SendMessageRequest::new("", "");
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body, json!({"bot_username": "", "message_text": ""}));
    }

    #[test]
    fn test_get_messages_query_default_limit() {
        assert_eq!(GetMessagesQuery::new("bot_a", None).limit, 5);
        assert_eq!(GetMessagesQuery::new("bot_a", Some(10)).limit, 10);
        assert_eq!(GetMessagesQuery::new("bot_a", Some(-1)).limit, -1);
    }
}
