//! Client configuration and builder.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use teletest_core::DecodePolicy;
use url::Url;

use crate::{ClientError, TeletestClient};

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("teletest-client/", env!("CARGO_PKG_VERSION"));

/// Serializable client settings, for harnesses that load them from a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Root URL of the teletest service, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Client-side transport timeout per request. Independent of the
    /// `timeout_sec` the service uses to wait for the bot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub decode_policy: DecodePolicy,
}

impl ClientConfig {
    /// Config with defaults for everything but the base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout_secs: None,
            user_agent: None,
            decode_policy: DecodePolicy::default(),
        }
    }
}

/// Builder for [`TeletestClient`].
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    request_timeout: Option<Duration>,
    user_agent: Option<String>,
    decode_policy: DecodePolicy,
    http: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: None,
            user_agent: None,
            decode_policy: DecodePolicy::default(),
            http: None,
        }
    }

    /// Create a builder from loaded settings.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            request_timeout: config.request_timeout_secs.map(Duration::from_secs),
            user_agent: config.user_agent.clone(),
            decode_policy: config.decode_policy,
            http: None,
        }
    }

    /// Abort requests that take longer than this on the client side.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    #[must_use]
    pub const fn decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.decode_policy = policy;
        self
    }

    /// Use an existing transport handle.
    ///
    /// The handle keeps its own timeout and user agent; the builder's
    /// settings for those are ignored.
    #[must_use]
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// Returns error if the base URL is not an absolute http(s) URL or the
    /// transport cannot be built.
    pub fn build(self) -> Result<TeletestClient, ClientError> {
        let base_url = normalize_base_url(&self.base_url)?;

        let http = if let Some(http) = self.http {
            if self.request_timeout.is_some() || self.user_agent.is_some() {
                tracing::warn!("Ignoring timeout and user agent settings for a supplied HTTP client");
            }
            http
        } else {
            let mut builder = reqwest::Client::builder().user_agent(
                self.user_agent
                    .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            );
            if let Some(timeout) = self.request_timeout {
                builder = builder.timeout(timeout);
            }
            builder.build().map_err(ClientError::Build)?
        };

        Ok(TeletestClient::from_parts(http, base_url, self.decode_policy))
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: String| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme `{}`", url.scheme())));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".to_string()));
    }
    Ok(trimmed.to_string())
}
