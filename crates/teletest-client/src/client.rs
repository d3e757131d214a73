//! Teletest service client.

use bytes::Bytes;
use reqwest::header::HeaderValue;
use serde::Serialize;
use teletest_core::{
    BotResponse, Credentials, DecodeError, DecodePolicy, GetMessagesQuery, GetMessagesResponse,
    PressButtonRequest, ResetChatRequest, ResetChatResponse, SendMessageRequest, build_headers,
    decode::{decode_messages_from_slice, decode_responses_from_slice},
};

use crate::{ClientBuilder, ClientError};

const SEND_MESSAGE_PATH: &str = "/send-message";
const PRESS_BUTTON_PATH: &str = "/press-button";
const GET_MESSAGES_PATH: &str = "/get-messages";
const RESET_CHAT_PATH: &str = "/reset-chat";

/// Client for a teletest service.
///
/// Holds only the base URL and the transport handle. Clones share the
/// underlying connection pool and can be used from many tasks at once.
#[derive(Debug, Clone)]
pub struct TeletestClient {
    http: reqwest::Client,
    base_url: String,
    decode_policy: DecodePolicy,
}

impl TeletestClient {
    /// Create a client with default settings.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        ClientBuilder::new(base_url).build()
    }

    /// Create a client over an existing transport handle.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid.
    pub fn with_http(base_url: impl Into<String>, http: reqwest::Client) -> Result<Self, ClientError> {
        ClientBuilder::new(base_url).http_client(http).build()
    }

    /// Start building a client.
    #[must_use]
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    pub(crate) const fn from_parts(
        http: reqwest::Client,
        base_url: String,
        decode_policy: DecodePolicy,
    ) -> Self {
        Self {
            http,
            base_url,
            decode_policy,
        }
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn decode_policy(&self) -> DecodePolicy {
        self.decode_policy
    }

    /// Send a text message to a bot and return the replies it produced.
    ///
    /// # Errors
    /// Returns error on transport failure, non-success status, or a reply
    /// that does not decode.
    pub async fn send_message(
        &self,
        request: &SendMessageRequest,
        credentials: Option<&Credentials>,
    ) -> Result<Vec<BotResponse>, ClientError> {
        let body = self.post(SEND_MESSAGE_PATH, request, credentials).await?;
        decode_responses_from_slice(&body, self.decode_policy)
            .map_err(|source| decode_error(SEND_MESSAGE_PATH, source))
    }

    /// Press an inline button on the bot's latest message.
    ///
    /// # Errors
    /// Returns error on transport failure, non-success status, or a reply
    /// that does not decode.
    pub async fn press_button(
        &self,
        request: &PressButtonRequest,
        credentials: Option<&Credentials>,
    ) -> Result<Vec<BotResponse>, ClientError> {
        let body = self.post(PRESS_BUTTON_PATH, request, credentials).await?;
        decode_responses_from_slice(&body, self.decode_policy)
            .map_err(|source| decode_error(PRESS_BUTTON_PATH, source))
    }

    /// Fetch the most recent messages in the chat with a bot.
    ///
    /// `limit` defaults to [`teletest_core::DEFAULT_MESSAGES_LIMIT`].
    ///
    /// # Errors
    /// Returns error on transport failure, non-success status, or a reply
    /// that does not decode.
    pub async fn get_messages(
        &self,
        bot_username: &str,
        limit: Option<i64>,
        credentials: Option<&Credentials>,
    ) -> Result<GetMessagesResponse, ClientError> {
        let query = GetMessagesQuery::new(bot_username, limit);
        let body = self.get(GET_MESSAGES_PATH, &query, credentials).await?;
        decode_messages_from_slice(&body, self.decode_policy)
            .map_err(|source| decode_error(GET_MESSAGES_PATH, source))
    }

    /// Delete the chat history with a bot.
    ///
    /// # Errors
    /// Returns error on transport failure, non-success status, or a reply
    /// that does not decode.
    pub async fn reset_chat(
        &self,
        request: &ResetChatRequest,
        credentials: Option<&Credentials>,
    ) -> Result<ResetChatResponse, ClientError> {
        let body = self.post(RESET_CHAT_PATH, request, credentials).await?;
        serde_json::from_slice(&body)
            .map_err(|e| decode_error(RESET_CHAT_PATH, DecodeError::Json(e)))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &'static str,
        body: &B,
        credentials: Option<&Credentials>,
    ) -> Result<Bytes, ClientError> {
        let request = self.http.post(self.url(path)).json(body);
        Self::execute("POST", path, request, credentials).await
    }

    async fn get<Q: Serialize + ?Sized>(
        &self,
        path: &'static str,
        query: &Q,
        credentials: Option<&Credentials>,
    ) -> Result<Bytes, ClientError> {
        let request = self.http.get(self.url(path)).query(query);
        Self::execute("GET", path, request, credentials).await
    }

    async fn execute(
        method: &'static str,
        path: &'static str,
        mut request: reqwest::RequestBuilder,
        credentials: Option<&Credentials>,
    ) -> Result<Bytes, ClientError> {
        let headers = credential_headers(credentials)?;
        tracing::debug!(
            method,
            path,
            headers = ?headers.iter().map(|(name, _)| *name).collect::<Vec<_>>(),
            "Calling teletest service"
        );
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(method, path, %status, "Teletest service responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(method, path, %status, "Teletest service returned an error status");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?)
    }
}

/// Validate credential headers before anything goes on the wire.
fn credential_headers(
    credentials: Option<&Credentials>,
) -> Result<Vec<(&'static str, HeaderValue)>, ClientError> {
    build_headers(credentials)
        .into_iter()
        .map(|(name, value)| {
            let mut value = HeaderValue::from_str(&value)
                .map_err(|source| ClientError::InvalidHeader { name, source })?;
            value.set_sensitive(true);
            Ok((name, value))
        })
        .collect()
}

const fn decode_error(path: &'static str, source: DecodeError) -> ClientError {
    ClientError::Decode { path, source }
}
