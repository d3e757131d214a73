//! Wire types for driving Telegram bots through a teletest service.
//!
//! This crate provides the transport-free building blocks:
//! - `Credentials` - Per-call platform identity, mapped to request headers
//! - `BotResponse` - Tagged union of every reply shape a bot can produce
//! - Decoding with a strict or lenient field policy
//! - Request payloads for each service endpoint

pub mod credentials;
pub mod decode;
pub mod request;
pub mod response;

pub use credentials::{Credentials, build_headers};
pub use decode::{DecodeError, DecodePolicy};
pub use request::{
    DEFAULT_MESSAGES_LIMIT, GetMessagesQuery, PressButtonRequest, ResetChatRequest,
    SendMessageRequest,
};
pub use response::{
    BotResponse, CallbackAnswer, GetMessagesResponse, MessageButton, MessageResponse, Nullable,
    Popup, ResetChatResponse, ResponseType,
};
