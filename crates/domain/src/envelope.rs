//! Backend response envelope decoding.
//!
//! The admin API answers `{success: bool, data: <payload>}` on current
//! endpoints, but older ones still return the payload bare, nest it one level
//! deeper, or wrap lists in an `activities` object. All accepted shapes are
//! spelled out as one untagged union so a body either decodes to a typed
//! payload or yields an explicit [`DecodeError`].

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

/// Errors produced while decoding a response body.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Malformed response body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Backend rejected the request: {0}")]
    Rejected(String),

    #[error("Envelope marked success but carried no data")]
    MissingData,
}

/// Every body shape the backend is known to produce.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResponseShape<T> {
    Envelope {
        success: bool,
        // Missing Option fields decode as None; payload types need not
        // implement Default.
        data: Option<T>,
        message: Option<String>,
    },
    Bare(T),
}

/// List payloads additionally come wrapped in legacy containers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListPayload<T> {
    List(Vec<T>),
    Activities { activities: Vec<T> },
    Nested { data: Vec<T> },
}

impl<T> ListPayload<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListPayload::List(items) => items,
            ListPayload::Activities { activities } => activities,
            ListPayload::Nested { data } => data,
        }
    }
}

/// Decode a single-object body, honoring the `success` flag.
pub fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    match serde_json::from_slice::<ResponseShape<T>>(bytes)? {
        ResponseShape::Envelope {
            success: false,
            message,
            ..
        } => Err(DecodeError::Rejected(
            message.unwrap_or_else(|| "no failure message provided".to_string()),
        )),
        ResponseShape::Envelope {
            data: Some(data), ..
        } => Ok(data),
        ResponseShape::Envelope { data: None, .. } => Err(DecodeError::MissingData),
        ResponseShape::Bare(value) => Ok(value),
    }
}

/// Decode a list body, unwrapping whichever legacy container it arrived in.
pub fn decode_list<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>, DecodeError> {
    decode_body::<ListPayload<T>>(bytes).map(ListPayload::into_vec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityEvent;

    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Probe {
        value: i64,
    }

    #[test]
    fn test_decode_standard_envelope() {
        let body = br#"{"success": true, "data": {"value": 7}}"#;
        let probe: Probe = decode_body(body).unwrap();
        assert_eq!(probe.value, 7);
    }

    #[test]
    fn test_decode_bare_payload() {
        let body = br#"{"value": 12}"#;
        let probe: Probe = decode_body(body).unwrap();
        assert_eq!(probe.value, 12);
    }

    #[test]
    fn test_decode_rejected_envelope() {
        let body = br#"{"success": false, "message": "token expired"}"#;
        let err = decode_body::<Probe>(body).unwrap_err();
        match err {
            DecodeError::Rejected(msg) => assert_eq!(msg, "token expired"),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    // Payload type with no Default impl; decoding must not require one.
    #[derive(Debug, serde::Deserialize)]
    struct Plain {
        required: String,
    }

    #[test]
    fn test_decode_payload_without_default_impl() {
        let body = br#"{"success": true, "data": {"required": "x"}}"#;
        let plain: Plain = decode_body(body).unwrap();
        assert_eq!(plain.required, "x");

        let body = br#"{"success": true}"#;
        let err = decode_body::<Plain>(body).unwrap_err();
        assert!(matches!(err, DecodeError::MissingData));
    }

    #[test]
    fn test_decode_success_without_data() {
        let body = br#"{"success": true}"#;
        let err = decode_body::<Probe>(body).unwrap_err();
        assert!(matches!(err, DecodeError::MissingData));
    }

    #[test]
    fn test_decode_malformed_body() {
        let body = br#"{"unexpected": "shape"}"#;
        let err = decode_body::<Probe>(body).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[test]
    fn test_decode_list_enveloped() {
        let body = br#"{"success": true, "data": [{"kind": "login", "message": "admin signed in"}]}"#;
        let events: Vec<ActivityEvent> = decode_list(body).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, "login");
    }

    #[test]
    fn test_decode_list_activities_wrapper() {
        let body =
            br#"{"activities": [{"kind": "booking", "message": "Cabin 2 reserved"}]}"#;
        let events: Vec<ActivityEvent> = decode_list(body).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "Cabin 2 reserved");
    }

    #[test]
    fn test_decode_list_bare_array() {
        let body = br#"[{"kind": "cleanup", "message": "queue drained"}]"#;
        let events: Vec<ActivityEvent> = decode_list(body).unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_decode_list_double_nested() {
        let body = br#"{"success": true, "data": {"data": [{"kind": "sync", "message": "ok"}]}}"#;
        let events: Vec<ActivityEvent> = decode_list(body).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, "sync");
    }
}
