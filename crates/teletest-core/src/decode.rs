//! Decoding raw service replies into [`BotResponse`] values.
//!
//! The discriminator is checked before any field is looked at, so an unknown
//! `response_type` always surfaces as an error instead of a guessed variant.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::response::{BotResponse, GetMessagesResponse, RESPONSE_TYPE_FIELD, ResponseType};

/// How to treat fields that do not belong to a response's tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodePolicy {
    /// Reject the response.
    #[default]
    Strict,
    /// Drop the foreign fields and decode the rest.
    Lenient,
}

/// Decode error.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Expected a JSON object")]
    NotAnObject,
    #[error("Expected a JSON array")]
    NotAnArray,
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("Missing response_type discriminator")]
    MissingResponseType,
    #[error("Unknown response_type: {0}")]
    UnknownResponseType(String),
    #[error("Field `{field}` is not valid for response_type `{response_type}`")]
    UnexpectedField {
        response_type: ResponseType,
        field: String,
    },
    #[error("Response {index}: {source}")]
    AtIndex {
        index: usize,
        #[source]
        source: Box<DecodeError>,
    },
}

/// Decode one reply object.
///
/// # Errors
/// Returns error if the value is not an object, the discriminator is missing
/// or unknown, a field is foreign to the tag under [`DecodePolicy::Strict`],
/// or a field has the wrong JSON type.
pub fn decode_response(value: Value, policy: DecodePolicy) -> Result<BotResponse, DecodeError> {
    let Value::Object(mut object) = value else {
        return Err(DecodeError::NotAnObject);
    };

    let response_type = match object.get(RESPONSE_TYPE_FIELD) {
        None => return Err(DecodeError::MissingResponseType),
        Some(Value::String(tag)) => tag.parse::<ResponseType>()?,
        Some(other) => return Err(DecodeError::UnknownResponseType(other.to_string())),
    };

    apply_policy(&mut object, response_type, policy)?;

    Ok(serde_json::from_value(Value::Object(object))?)
}

/// Decode a JSON array of reply objects, keeping service order.
///
/// # Errors
/// Returns error if the value is not an array or any element fails to
/// decode; the failing element's index is attached.
pub fn decode_responses(
    value: Value,
    policy: DecodePolicy,
) -> Result<Vec<BotResponse>, DecodeError> {
    let Value::Array(items) = value else {
        return Err(DecodeError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            decode_response(item, policy).map_err(|e| DecodeError::AtIndex {
                index,
                source: Box::new(e),
            })
        })
        .collect()
}

/// Decode a `get-messages` reply object.
///
/// # Errors
/// Returns error if the value is not an object, has no `messages` array,
/// or any message fails to decode.
pub fn decode_messages(
    value: Value,
    policy: DecodePolicy,
) -> Result<GetMessagesResponse, DecodeError> {
    let Value::Object(mut object) = value else {
        return Err(DecodeError::NotAnObject);
    };
    let messages = object
        .remove("messages")
        .ok_or(DecodeError::MissingField("messages"))?;

    Ok(GetMessagesResponse {
        messages: decode_responses(messages, policy)?,
    })
}

/// Parse bytes and decode a JSON array of replies.
///
/// # Errors
/// Returns error if the bytes are not JSON or [`decode_responses`] fails.
pub fn decode_responses_from_slice(
    bytes: &[u8],
    policy: DecodePolicy,
) -> Result<Vec<BotResponse>, DecodeError> {
    decode_responses(serde_json::from_slice(bytes)?, policy)
}

/// Parse bytes and decode a `get-messages` reply.
///
/// # Errors
/// Returns error if the bytes are not JSON or [`decode_messages`] fails.
pub fn decode_messages_from_slice(
    bytes: &[u8],
    policy: DecodePolicy,
) -> Result<GetMessagesResponse, DecodeError> {
    decode_messages(serde_json::from_slice(bytes)?, policy)
}

fn apply_policy(
    object: &mut Map<String, Value>,
    response_type: ResponseType,
    policy: DecodePolicy,
) -> Result<(), DecodeError> {
    let allowed = response_type.fields();
    let foreign: Vec<String> = object
        .keys()
        .filter(|key| key.as_str() != RESPONSE_TYPE_FIELD && !allowed.contains(&key.as_str()))
        .cloned()
        .collect();

    for field in foreign {
        match policy {
            DecodePolicy::Strict => {
                return Err(DecodeError::UnexpectedField {
                    response_type,
                    field,
                });
            }
            DecodePolicy::Lenient => {
                tracing::debug!(%response_type, field = %field, "Dropping field foreign to response type");
                object.remove(&field);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::response::{CallbackAnswer, Nullable, Popup};

    #[test]
    fn test_decodes_each_tag() {
        let message = decode_response(
            json!({"response_type": "message", "message_id": 1, "message_text": "hi"}),
            DecodePolicy::Strict,
        )
        .unwrap();
        assert_eq!(message, BotResponse::text_message(1, "hi"));

        let edited = decode_response(
            json!({"response_type": "edited_message", "message_id": 1, "reply_keyboard": true}),
            DecodePolicy::Strict,
        )
        .unwrap();
        assert_eq!(edited.response_type(), ResponseType::EditedMessage);
        assert_eq!(
            edited.as_message().unwrap().reply_keyboard,
            Nullable::Value(true)
        );

        let answer = decode_response(
            json!({
                "response_type": "callback_answer",
                "callback_answer_text": "ok",
                "callback_answer_alert": false
            }),
            DecodePolicy::Strict,
        )
        .unwrap();
        assert_eq!(
            answer,
            BotResponse::CallbackAnswer(CallbackAnswer {
                callback_answer_text: Some("ok".into()),
                callback_answer_alert: Some(false),
                ..CallbackAnswer::default()
            })
        );

        let popup = decode_response(
            json!({"response_type": "popup", "popup_message": "Careful"}),
            DecodePolicy::Strict,
        )
        .unwrap();
        assert_eq!(
            popup,
            BotResponse::Popup(Popup {
                popup_message: Some("Careful".into()),
                ..Popup::default()
            })
        );
    }

    #[test]
    fn test_unknown_response_type_fails() {
        for policy in [DecodePolicy::Strict, DecodePolicy::Lenient] {
            let err = decode_response(
                json!({"response_type": "sticker", "message_id": 1}),
                policy,
            )
            .unwrap_err();
            assert!(matches!(err, DecodeError::UnknownResponseType(ref tag) if tag == "sticker"));
        }

        let err = decode_response(json!({"response_type": 3}), DecodePolicy::Lenient).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownResponseType(ref tag) if tag == "3"));
    }

    #[test]
    fn test_missing_response_type_fails() {
        let err = decode_response(json!({"message_text": "hi"}), DecodePolicy::Lenient).unwrap_err();
        assert!(matches!(err, DecodeError::MissingResponseType));
    }

    #[test]
    fn test_non_object_fails() {
        let err = decode_response(json!("message"), DecodePolicy::Strict).unwrap_err();
        assert!(matches!(err, DecodeError::NotAnObject));
    }

    #[test]
    fn test_strict_rejects_foreign_field() {
        let err = decode_response(
            json!({"response_type": "popup", "popup_message": "x", "reply_markup": [[{"text": "A"}]]}),
            DecodePolicy::Strict,
        )
        .unwrap_err();
        match err {
            DecodeError::UnexpectedField {
                response_type,
                field,
            } => {
                assert_eq!(response_type, ResponseType::Popup);
                assert_eq!(field, "reply_markup");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lenient_drops_foreign_field() {
        let response = decode_response(
            json!({"response_type": "popup", "popup_message": "x", "reply_markup": [[{"text": "A"}]]}),
            DecodePolicy::Lenient,
        )
        .unwrap();
        assert_eq!(
            response,
            BotResponse::Popup(Popup {
                popup_message: Some("x".into()),
                ..Popup::default()
            })
        );
    }

    #[test]
    fn test_wrong_field_type_fails() {
        let err = decode_response(
            json!({"response_type": "message", "message_id": "not a number"}),
            DecodePolicy::Lenient,
        )
        .unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn test_decode_responses_keeps_order_and_reports_index() {
        let responses = decode_responses(
            json!([
                {"response_type": "message", "message_id": 1, "message_text": "hi"},
                {"response_type": "message", "message_id": 2, "message_text": "echo: hi"}
            ]),
            DecodePolicy::Strict,
        )
        .unwrap();
        assert_eq!(
            responses,
            vec![
                BotResponse::text_message(1, "hi"),
                BotResponse::text_message(2, "echo: hi"),
            ]
        );

        let err = decode_responses(
            json!([{"response_type": "message"}, {"response_type": "nope"}]),
            DecodePolicy::Strict,
        )
        .unwrap_err();
        match err {
            DecodeError::AtIndex { index, source } => {
                assert_eq!(index, 1);
                assert!(matches!(*source, DecodeError::UnknownResponseType(_)));
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = decode_responses(json!({"messages": []}), DecodePolicy::Strict).unwrap_err();
        assert!(matches!(err, DecodeError::NotAnArray));
    }

    #[test]
    fn test_decode_messages() {
        let response = decode_messages_from_slice(
            br#"{"messages": [{"response_type": "message", "message_id": 4, "message_text": "pong"}]}"#,
            DecodePolicy::Strict,
        )
        .unwrap();
        assert_eq!(response.messages, vec![BotResponse::text_message(4, "pong")]);

        let empty = decode_messages(json!({"messages": []}), DecodePolicy::Strict).unwrap();
        assert!(empty.messages.is_empty());

        let err = decode_messages(json!({}), DecodePolicy::Strict).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField("messages")));
    }

    #[test]
    fn test_invalid_json_bytes() {
        let err = decode_responses_from_slice(b"<html>oops</html>", DecodePolicy::Strict).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn test_policy_serde() {
        let policy: DecodePolicy = serde_json::from_str(r#""lenient""#).unwrap();
        assert_eq!(policy, DecodePolicy::Lenient);
        assert_eq!(DecodePolicy::default(), DecodePolicy::Strict);
    }
}
