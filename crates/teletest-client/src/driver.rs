//! Trait seam for code that drives bots.

use async_trait::async_trait;
use teletest_core::{
    BotResponse, Credentials, GetMessagesResponse, PressButtonRequest, ResetChatRequest,
    ResetChatResponse, SendMessageRequest,
};

use crate::{ClientError, TeletestClient};

/// Operations a test harness uses to drive a bot.
///
/// Implemented by [`TeletestClient`]. Harness code written against this
/// trait can swap in a scripted fake for offline tests.
#[async_trait]
pub trait BotDriver: Send + Sync {
    /// Send a text message and collect the replies.
    async fn send_message(
        &self,
        request: &SendMessageRequest,
        credentials: Option<&Credentials>,
    ) -> Result<Vec<BotResponse>, ClientError>;

    /// Press an inline button and collect the replies.
    async fn press_button(
        &self,
        request: &PressButtonRequest,
        credentials: Option<&Credentials>,
    ) -> Result<Vec<BotResponse>, ClientError>;

    /// Fetch recent messages; `None` uses the default limit.
    async fn get_messages(
        &self,
        bot_username: &str,
        limit: Option<i64>,
        credentials: Option<&Credentials>,
    ) -> Result<GetMessagesResponse, ClientError>;

    /// Delete the chat history with a bot.
    async fn reset_chat(
        &self,
        request: &ResetChatRequest,
        credentials: Option<&Credentials>,
    ) -> Result<ResetChatResponse, ClientError>;
}

#[async_trait]
impl BotDriver for TeletestClient {
    async fn send_message(
        &self,
        request: &SendMessageRequest,
        credentials: Option<&Credentials>,
    ) -> Result<Vec<BotResponse>, ClientError> {
        Self::send_message(self, request, credentials).await
    }

    async fn press_button(
        &self,
        request: &PressButtonRequest,
        credentials: Option<&Credentials>,
    ) -> Result<Vec<BotResponse>, ClientError> {
        Self::press_button(self, request, credentials).await
    }

    async fn get_messages(
        &self,
        bot_username: &str,
        limit: Option<i64>,
        credentials: Option<&Credentials>,
    ) -> Result<GetMessagesResponse, ClientError> {
        Self::get_messages(self, bot_username, limit, credentials).await
    }

    async fn reset_chat(
        &self,
        request: &ResetChatRequest,
        credentials: Option<&Credentials>,
    ) -> Result<ResetChatResponse, ClientError> {
        Self::reset_chat(self, request, credentials).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Fake driver that replays canned replies and records what was sent.
    #[derive(Default)]
    struct ScriptedDriver {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl BotDriver for ScriptedDriver {
        async fn send_message(
            &self,
            request: &SendMessageRequest,
            _credentials: Option<&Credentials>,
        ) -> Result<Vec<BotResponse>, ClientError> {
            self.sent.lock().unwrap().push(request.message_text.clone());
            Ok(vec![BotResponse::text_message(
                1,
                format!("echo: {}", request.message_text),
            )])
        }

        async fn press_button(
            &self,
            _request: &PressButtonRequest,
            _credentials: Option<&Credentials>,
        ) -> Result<Vec<BotResponse>, ClientError> {
            Ok(Vec::new())
        }

        async fn get_messages(
            &self,
            _bot_username: &str,
            _limit: Option<i64>,
            _credentials: Option<&Credentials>,
        ) -> Result<GetMessagesResponse, ClientError> {
            Ok(GetMessagesResponse::default())
        }

        async fn reset_chat(
            &self,
            _request: &ResetChatRequest,
            _credentials: Option<&Credentials>,
        ) -> Result<ResetChatResponse, ClientError> {
            self.sent.lock().unwrap().clear();
            Ok(ResetChatResponse {
                status: "ok".to_string(),
            })
        }
    }

    async fn ping(driver: &dyn BotDriver) -> Option<String> {
        let replies = driver
            .send_message(&SendMessageRequest::new("bot_a", "/ping"), None)
            .await
            .ok()?;
        replies.first()?.message_text().map(str::to_string)
    }

    #[tokio::test]
    async fn test_harness_code_runs_against_fake_driver() {
        let driver = ScriptedDriver::default();
        assert_eq!(ping(&driver).await.as_deref(), Some("echo: /ping"));
        assert_eq!(*driver.sent.lock().unwrap(), vec!["/ping".to_string()]);

        let reset = driver
            .reset_chat(&ResetChatRequest::new("bot_a"), None)
            .await
            .unwrap();
        assert!(reset.is_ok());
        assert!(driver.sent.lock().unwrap().is_empty());
    }
}
