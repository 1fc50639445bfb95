// Copyright (C) 2021  Braiins Systems s.r.o.
//
// This file is part of Braiins Open-Source Initiative (BOSI).
//
// BOSI is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//
// Please, keep in mind that we may also license BOSI or any part thereof
// under a proprietary license. For more information on the terms and conditions
// of such proprietary license or if you have any other questions, please
// contact us at opensource@braiins.com.

//! The Stratum V1 message envelope: the three on-wire shapes (Request, Notification, Response),
//! identification from raw bytes, and the wire-level `StratumError`.
//!
//! Eventhough the protocol is pure JSON, it carries two logically distinct frame shapes under one
//! scheme: a method-bearing object (Request, or Notification when `id` is null), and an
//! `id`-bearing object with `result`/`error` (Response). Identification is by presence of fields,
//! not by a type tag.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Which of the three logical envelope shapes a message was identified as.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Kind {
    Request,
    Notification,
    Response,
}

/// Wire shape shared by Request and Notification: `id` is `None` for a Notification.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
struct RequestLike {
    id: Option<u32>,
    method: String,
    params: serde_json::Value,
}

/// Wire shape of a Response: exactly one of `error`/`result` carries meaning, enforced at the
/// point of construction rather than at the type level, matching the wire's own looseness.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
struct ResponseLike {
    id: u32,
    error: Option<StratumError>,
    result: Option<serde_json::Value>,
}

/// An identified, still envelope-shaped message. Method codecs parse the inner `params`/`result`
/// value further once the caller knows which method it belongs to.
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    Request {
        id: u32,
        method: String,
        params: serde_json::Value,
    },
    Notification {
        method: String,
        params: serde_json::Value,
    },
    Response {
        id: u32,
        error: Option<StratumError>,
        result: Option<serde_json::Value>,
    },
}

impl Message {
    pub fn request(id: u32, method: impl Into<String>, params: serde_json::Value) -> Self {
        Message::Request {
            id,
            method: method.into(),
            params,
        }
    }

    pub fn notification(method: impl Into<String>, params: serde_json::Value) -> Self {
        Message::Notification {
            method: method.into(),
            params,
        }
    }

    pub fn response_ok(id: u32, result: serde_json::Value) -> Self {
        Message::Response {
            id,
            error: None,
            result: Some(result),
        }
    }

    pub fn response_err(id: u32, error: StratumError) -> Self {
        Message::Response {
            id,
            error: Some(error),
            result: None,
        }
    }

    /// Canonical JSON encoding. Field order is not significant to correctness.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let value = match self {
            Message::Request { id, method, params } => serde_json::json!({
                "id": id,
                "method": method,
                "params": params,
            }),
            Message::Notification { method, params } => serde_json::json!({
                "id": serde_json::Value::Null,
                "method": method,
                "params": params,
            }),
            Message::Response { id, error, result } => serde_json::json!({
                "id": id,
                "error": error,
                "result": result,
            }),
        };
        Ok(serde_json::to_vec(&value)?)
    }
}

/// Identifies a raw JSON message and returns its typed [`Message`] together with its [`Kind`].
///
/// 1. Decode as a Request-shaped object.
/// 2. If `method` is non-empty: `id` absent/null ⇒ Notification, else ⇒ Request.
/// 3. Otherwise decode as a Response-shaped object; `id == 0` is rejected (Decred pool policy:
///    Stratum ids start at 1).
pub fn identify(bytes: &[u8]) -> Result<(Message, Kind)> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| Error::parse_with("malformed JSON", e))?;

    if let Ok(req) = serde_json::from_value::<RequestLike>(value.clone()) {
        if !req.method.is_empty() {
            return match req.id {
                Some(id) => Ok((
                    Message::Request {
                        id,
                        method: req.method,
                        params: req.params,
                    },
                    Kind::Request,
                )),
                None => Ok((
                    Message::Notification {
                        method: req.method,
                        params: req.params,
                    },
                    Kind::Notification,
                )),
            };
        }
    }

    let resp: ResponseLike = serde_json::from_value(value)
        .map_err(|_| Error::parse("message identifies as neither a request nor a response"))?;

    if resp.id == 0 {
        return Err(Error::parse("response id 0 is not a valid Stratum id"));
    }

    Ok((
        Message::Response {
            id: resp.id,
            error: resp.error,
            result: resp.result,
        },
        Kind::Response,
    ))
}

fn label(code: u32) -> &'static str {
    match code {
        21 => "Stale Job",
        22 => "Duplicate share",
        23 => "Low difficulty share",
        24 => "Unauthorized worker",
        25 => "Not subscribed",
        _ => "Other/Unknown",
    }
}

/// The on-wire error carried in a Response: `{ code, message, traceback }`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StratumError {
    pub code: u32,
    pub message: String,
    pub traceback: String,
}

impl StratumError {
    /// Builds a `StratumError` whose `message` is `"<label>: <cause>"`. Any code outside the six
    /// defined constants collapses to the `"Other/Unknown"` label; the raw code is still
    /// preserved in `code`.
    pub fn new(code: u32, cause: impl std::fmt::Display) -> Self {
        StratumError {
            code,
            message: format!("{}: {}", label(code), cause),
            traceback: String::new(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// S1
    #[test]
    fn test_identify_request() {
        let bytes = br#"{"id":1,"method":"mining.authorize","params":["addr.worker",""]}"#;
        let (message, kind) = identify(bytes).unwrap();
        assert_eq!(kind, Kind::Request);
        match message {
            Message::Request { id, method, .. } => {
                assert_eq!(id, 1);
                assert_eq!(method, "mining.authorize");
            }
            other => panic!("expected Request, got {:?}", other),
        }
    }

    /// S2
    #[test]
    fn test_identify_notification() {
        let bytes = br#"{"id":null,"method":"mining.set_difficulty","params":[1024]}"#;
        let (message, kind) = identify(bytes).unwrap();
        assert_eq!(kind, Kind::Notification);
        assert!(matches!(message, Message::Notification { .. }));
    }

    /// S4
    #[test]
    fn test_identify_response_id_zero_rejected() {
        let bytes = br#"{"id":0,"result":true,"error":null}"#;
        let err = identify(bytes).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Parse);
    }

    #[test]
    fn test_identify_response() {
        let bytes = br#"{"id":7,"result":true,"error":null}"#;
        let (message, kind) = identify(bytes).unwrap();
        assert_eq!(kind, Kind::Response);
        match message {
            Message::Response { id, error, result } => {
                assert_eq!(id, 7);
                assert!(error.is_none());
                assert_eq!(result, Some(serde_json::Value::Bool(true)));
            }
            other => panic!("expected Response, got {:?}", other),
        }
    }

    #[test]
    fn test_identify_neither_is_parse_error() {
        let bytes = br#"{"foo":"bar"}"#;
        let err = identify(bytes).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Parse);
    }

    #[test]
    fn test_stratum_error_known_code_label() {
        let err = StratumError::new(21, "job abcd expired");
        assert_eq!(err.message, "Stale Job: job abcd expired");
        assert_eq!(err.traceback, "");
    }

    #[test]
    fn test_stratum_error_unknown_code_collapses_label() {
        let err = StratumError::new(99, "weird");
        assert_eq!(err.message, "Other/Unknown: weird");
        assert_eq!(err.code, 99);
    }

    #[test]
    fn test_encode_request_round_trip_through_identify() {
        let message = Message::request(1, "mining.authorize", serde_json::json!(["addr.worker", ""]));
        let bytes = message.encode().unwrap();
        let (identified, kind) = identify(&bytes).unwrap();
        assert_eq!(kind, Kind::Request);
        assert_eq!(identified, message);
    }

    #[test]
    fn test_encode_notification_round_trip_through_identify() {
        let message = Message::notification("mining.set_difficulty", serde_json::json!([1024]));
        let bytes = message.encode().unwrap();
        let (identified, kind) = identify(&bytes).unwrap();
        assert_eq!(kind, Kind::Notification);
        assert_eq!(identified, message);
    }
}
