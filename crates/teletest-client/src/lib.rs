//! HTTP client for driving Telegram bots through a teletest service.
//!
//! Provides:
//! - `TeletestClient` - Send messages, press buttons, read and reset chats
//! - `ClientBuilder` / `ClientConfig` - Transport and decoding settings
//! - `BotDriver` - Trait seam for harness code that should not depend on HTTP
//!
//! Credentials are passed per call and never stored on the client, so one
//! client can act as several Telegram accounts.

pub mod client;
pub mod config;
pub mod driver;
pub mod error;

pub use client::TeletestClient;
pub use config::{ClientBuilder, ClientConfig, DEFAULT_USER_AGENT};
pub use driver::BotDriver;
pub use error::ClientError;
pub use teletest_core::{
    BotResponse, CallbackAnswer, Credentials, DecodeError, DecodePolicy, GetMessagesResponse,
    MessageButton, MessageResponse, Nullable, Popup, PressButtonRequest, ResetChatRequest,
    ResetChatResponse, ResponseType, SendMessageRequest,
};
