//! Per-call Telegram credentials and their header mapping.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Header carrying the Telegram application id.
pub const API_ID_HEADER: &str = "X-Telegram-Api-Id";
/// Header carrying the Telegram application hash.
pub const API_HASH_HEADER: &str = "X-Telegram-Api-Hash";
/// Header carrying the serialized Telegram session.
pub const SESSION_STRING_HEADER: &str = "X-Telegram-Session-String";

/// Telegram identity used to authenticate a single service call.
///
/// Every field is optional; the service falls back to its own default
/// account for whatever is missing. The client never stores these.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Telegram application id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_id: Option<i64>,
    /// Telegram application hash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_hash: Option<String>,
    /// Serialized user session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_string: Option<String>,
}

impl Credentials {
    /// Create an empty credential bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the application id.
    #[must_use]
    pub const fn with_api_id(mut self, api_id: i64) -> Self {
        self.api_id = Some(api_id);
        self
    }

    /// Set the application hash.
    #[must_use]
    pub fn with_api_hash(mut self, api_hash: impl Into<String>) -> Self {
        self.api_hash = Some(api_hash.into());
        self
    }

    /// Set the session string.
    #[must_use]
    pub fn with_session_string(mut self, session_string: impl Into<String>) -> Self {
        self.session_string = Some(session_string.into());
        self
    }

    /// True when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.api_id.is_none() && self.api_hash.is_none() && self.session_string.is_none()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_id", &self.api_id)
            .field("api_hash", &self.api_hash.as_ref().map(|_| "<redacted>"))
            .field(
                "session_string",
                &self.session_string.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Map optional credentials to request headers.
///
/// A header is present iff its field is set. Values are passed through
/// untouched; the service is the one that validates them.
#[must_use]
pub fn build_headers(credentials: Option<&Credentials>) -> BTreeMap<&'static str, String> {
    let mut headers = BTreeMap::new();
    let Some(creds) = credentials else {
        return headers;
    };
    if let Some(api_id) = creds.api_id {
        headers.insert(API_ID_HEADER, api_id.to_string());
    }
    if let Some(ref api_hash) = creds.api_hash {
        headers.insert(API_HASH_HEADER, api_hash.clone());
    }
    if let Some(ref session_string) = creds.session_string {
        headers.insert(SESSION_STRING_HEADER, session_string.clone());
    }
    headers
}
