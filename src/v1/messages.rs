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

//! Typed constructors and parsers for the five Decred Stratum methods: `mining.authorize`,
//! `mining.subscribe`, `mining.set_difficulty`, `mining.notify`, `mining.submit`.
//!
//! Each parser validates an already-[`identify`](super::rpc::identify)d [`Message`]'s `params`/
//! `result` value into typed fields, rejecting on the first structural mismatch with a precise
//! description. None of them panic on malformed input.


use std::convert::TryFrom;

use crate::error::{Error, Result};
use crate::v1::rpc::{Message, StratumError};
use crate::v1::TruncatedU64;

pub const METHOD_AUTHORIZE: &str = "mining.authorize";
pub const METHOD_SUBSCRIBE: &str = "mining.subscribe";
pub const METHOD_SET_DIFFICULTY: &str = "mining.set_difficulty";
pub const METHOD_NOTIFY: &str = "mining.notify";
pub const METHOD_SUBMIT: &str = "mining.submit";

fn as_array<'a>(params: &'a serde_json::Value, method: &str) -> Result<&'a Vec<serde_json::Value>> {
    params
        .as_array()
        .ok_or_else(|| Error::parse(format!("{} params must be a positional array", method)))
}

fn as_str<'a>(value: &'a serde_json::Value, field: &str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| Error::parse(format!("failed to parse {} parameter", field)))
}

// ---------------------------------------------------------------------------------------------
// mining.authorize
// ---------------------------------------------------------------------------------------------

/// Builds a `username = "<address>.<workerName>"` authorize request with an empty password.
pub fn authorize_request(id: u32, address: &str, worker_name: &str) -> Message {
    let username = format!("{}.{}", address, worker_name);
    Message::request(id, METHOD_AUTHORIZE, serde_json::json!([username, ""]))
}

pub fn authorize_response(id: u32, authorized: bool) -> Message {
    Message::response_ok(id, serde_json::Value::Bool(authorized))
}

/// Returns only the `username`; the password is ignored per the wire contract.
pub fn parse_authorize(params: &serde_json::Value) -> Result<String> {
    let params = as_array(params, METHOD_AUTHORIZE)?;
    let username = params
        .get(0)
        .ok_or_else(|| Error::parse("missing username parameter"))?;
    Ok(as_str(username, "username")?.to_string())
}

pub fn parse_authorize_response(result: &serde_json::Value) -> Result<bool> {
    result
        .as_bool()
        .ok_or_else(|| Error::parse("failed to parse authorize result"))
}

// ---------------------------------------------------------------------------------------------
// mining.subscribe
// ---------------------------------------------------------------------------------------------

/// Builds `[agent]` or `[agent, notifyID]` where `agent = "<userAgent>/<version>"`.
pub fn subscribe_request(id: u32, user_agent: &str, version: &str, notify_id: Option<&str>) -> Message {
    let agent = format!("{}/{}", user_agent, version);
    let params = match notify_id {
        Some(notify_id) => serde_json::json!([agent, notify_id]),
        None => serde_json::json!([agent]),
    };
    Message::request(id, METHOD_SUBSCRIBE, params)
}

/// Returns `(agent, notifyID_or_empty)`.
pub fn parse_subscribe(params: &serde_json::Value) -> Result<(String, String)> {
    let params = as_array(params, METHOD_SUBSCRIBE)?;
    let agent = as_str(
        params.get(0).ok_or_else(|| Error::parse("missing agent parameter"))?,
        "agent",
    )?
    .to_string();
    let notify_id = match params.get(1) {
        Some(value) => as_str(value, "notifyID")?.to_string(),
        None => String::new(),
    };
    Ok((agent, notify_id))
}

/// Builds the 3-tuple subscribe-success result: `[subscriptions, extraNonce1, extraNonce2Size]`,
/// where `subscriptions = [["mining.set_difficulty", notifyID], ["mining.notify", notifyID]]`.
pub fn subscribe_response(
    id: u32,
    notify_id: &str,
    extra_nonce1: &str,
    extra_nonce2_size: u64,
) -> Message {
    let result = serde_json::json!([
        [
            [METHOD_SET_DIFFICULTY, notify_id],
            [METHOD_NOTIFY, notify_id],
        ],
        extra_nonce1,
        extra_nonce2_size,
    ]);
    Message::response_ok(id, result)
}

pub fn subscribe_error_response(id: u32, error: StratumError) -> Message {
    Message::response_err(id, error)
}

/// Why a subscribe response failed to yield subscription fields: either the peer reported a
/// Stratum-level problem (`Wire`, carrying the `StratumError` as-is, `code` included), or the
/// response itself was malformed (`Codec`). Keeping these distinct lets a caller tell "the peer
/// rejected the subscribe" apart from "the bytes were garbage".
#[derive(Debug, Clone, PartialEq)]
pub enum SubscribeResponseError {
    Wire(StratumError),
    Codec(Error),
}

impl std::fmt::Display for SubscribeResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscribeResponseError::Wire(error) => write!(f, "{}", error.message),
            SubscribeResponseError::Codec(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for SubscribeResponseError {}

impl From<Error> for SubscribeResponseError {
    fn from(error: Error) -> Self {
        SubscribeResponseError::Codec(error)
    }
}

/// Returns `(diffID, notifyID, extraNonce1, extraNonce2Size)`. A non-null `error` on the response
/// is surfaced as `SubscribeResponseError::Wire`, not folded into the codec's `Parse` kind; a
/// malformed or missing result is `SubscribeResponseError::Codec`.
pub fn parse_subscribe_response(
    message: &Message,
) -> std::result::Result<(String, String, String, u64), SubscribeResponseError> {
    let (error, result) = match message {
        Message::Response { error, result, .. } => (error, result),
        _ => return Err(Error::parse("expected a Response message").into()),
    };

    if let Some(error) = error {
        return Err(SubscribeResponseError::Wire(error.clone()));
    }

    let result = result
        .as_ref()
        .ok_or_else(|| Error::parse("subscribe response has no result"))?;

    let diff_id = result
        .pointer("/0/0/1")
        .and_then(|v| v.as_str())
        .ok_or_else(|| Error::parse("failed to parse diffID in subscribe result"))?
        .to_string();
    let notify_id = result
        .pointer("/0/1/1")
        .and_then(|v| v.as_str())
        .ok_or_else(|| Error::parse("failed to parse notifyID in subscribe result"))?
        .to_string();
    let extra_nonce1 = result
        .pointer("/1")
        .and_then(|v| v.as_str())
        .ok_or_else(|| Error::parse("failed to parse extraNonce1 in subscribe result"))?
        .to_string();
    let extra_nonce2_size = result
        .pointer("/2")
        .map(TruncatedU64::try_from)
        .ok_or_else(|| Error::parse("failed to parse extraNonce2Size in subscribe result"))??
        .0;

    Ok((diff_id, notify_id, extra_nonce1, extra_nonce2_size))
}

// ---------------------------------------------------------------------------------------------
// mining.set_difficulty
// ---------------------------------------------------------------------------------------------

/// Truncates a rational difficulty to a non-negative integer and emits it as a JSON number.
pub fn set_difficulty_notification(difficulty: f64) -> Message {
    let truncated = difficulty.max(0.0) as u64;
    Message::notification(METHOD_SET_DIFFICULTY, serde_json::json!([truncated]))
}

pub fn parse_set_difficulty(params: &serde_json::Value) -> Result<u64> {
    let params = as_array(params, METHOD_SET_DIFFICULTY)?;
    let value = params
        .get(0)
        .ok_or_else(|| Error::parse("missing difficulty parameter"))?;
    Ok(TruncatedU64::try_from(value)?.0)
}

// ---------------------------------------------------------------------------------------------
// mining.notify
// ---------------------------------------------------------------------------------------------

/// Fields of a work notification. Merkle branches are always an empty array in this codec:
/// Decred carries merkle data inside `genTx2`.
#[derive(Clone, Debug, PartialEq)]
pub struct NotifyParams {
    pub job_id: String,
    pub prev_block: String,
    pub gen_tx1: String,
    pub gen_tx2: String,
    pub block_version: String,
    pub n_bits: String,
    pub n_time: String,
    pub clean_job: bool,
}

pub fn notify_notification(
    job_id: &str,
    prev_block: &str,
    gen_tx1: &str,
    gen_tx2: &str,
    block_version: &str,
    n_bits: &str,
    n_time: &str,
    clean_job: bool,
) -> Message {
    let params = serde_json::json!([
        job_id,
        prev_block,
        gen_tx1,
        gen_tx2,
        serde_json::Value::Array(vec![]),
        block_version,
        n_bits,
        n_time,
        clean_job,
    ]);
    Message::notification(METHOD_NOTIFY, params)
}

pub fn parse_notify(params: &serde_json::Value) -> Result<NotifyParams> {
    let params = as_array(params, METHOD_NOTIFY)?;
    let field = |index: usize, name: &str| -> Result<&str> {
        as_str(
            params
                .get(index)
                .ok_or_else(|| Error::parse(format!("missing {} parameter", name)))?,
            name,
        )
    };

    let job_id = field(0, "jobID")?.to_string();
    let prev_block = field(1, "prevBlock")?.to_string();
    let gen_tx1 = field(2, "genTx1")?.to_string();
    let gen_tx2 = field(3, "genTx2")?.to_string();
    let block_version = field(5, "blockVersion")?.to_string();
    let n_bits = field(6, "nBits")?.to_string();
    let n_time = field(7, "nTime")?.to_string();
    let clean_job = params
        .get(8)
        .and_then(|v| v.as_bool())
        .ok_or_else(|| Error::parse("failed to parse cleanJob parameter"))?;

    Ok(NotifyParams {
        job_id,
        prev_block,
        gen_tx1,
        gen_tx2,
        block_version,
        n_bits,
        n_time,
        clean_job,
    })
}

// ---------------------------------------------------------------------------------------------
// mining.submit
// ---------------------------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct SubmitParams {
    pub worker_name: String,
    pub job_id: String,
    pub extra_nonce2: String,
    pub n_time: String,
    pub nonce: String,
}

pub fn submit_request(
    id: u32,
    worker_name: &str,
    job_id: &str,
    extra_nonce2: &str,
    n_time: &str,
    nonce: &str,
) -> Message {
    let params = serde_json::json!([worker_name, job_id, extra_nonce2, n_time, nonce]);
    Message::request(id, METHOD_SUBMIT, params)
}

pub fn submit_response(id: u32, accepted: bool) -> Message {
    Message::response_ok(id, serde_json::Value::Bool(accepted))
}

/// Enforces `len == 5` before field-wise extraction.
pub fn parse_submit(params: &serde_json::Value) -> Result<SubmitParams> {
    let params = as_array(params, METHOD_SUBMIT)?;
    if params.len() != 5 {
        return Err(Error::parse(format!(
            "submit params must have exactly 5 elements, got {}",
            params.len()
        )));
    }

    Ok(SubmitParams {
        worker_name: as_str(&params[0], "workerName")?.to_string(),
        job_id: as_str(&params[1], "jobID")?.to_string(),
        extra_nonce2: as_str(&params[2], "extraNonce2")?.to_string(),
        n_time: as_str(&params[3], "nTime")?.to_string(),
        nonce: as_str(&params[4], "nonce")?.to_string(),
    })
}
