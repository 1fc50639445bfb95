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

//! Raw wire JSON fixtures shared across the envelope and method codec test modules.

use super::common::USER_CREDENTIALS;

pub const MINING_AUTHORIZE_REQ_JSON: &str =
    r#"{"id":2,"method":"mining.authorize","params":["DsAccountAddress1111111111111111111.worker0",""]}"#;

pub const MINING_SUBSCRIBE_REQ_JSON: &str =
    r#"{"id":1,"method":"mining.subscribe","params":["gominer/1.0.0"]}"#;

pub const MINING_SUBSCRIBE_OK_RESULT_JSON: &str = concat!(
    r#"{"id":1,"error":null,"#,
    r#""result":[[["mining.set_difficulty","abcd"],["mining.notify","abcd"]],"00112233",4]}"#,
);

pub const MINING_SET_DIFFICULTY_JSON: &str =
    r#"{"id":null,"method":"mining.set_difficulty","params":[1024]}"#;

pub const MINING_SUBMIT_REQ_JSON: &str = concat!(
    r#"{"id":3,"method":"mining.submit","#,
    r#""params":["braiins.worker0","ahoj","00000000","5d10bc0a","0443c37b"]}"#,
);

pub const STRATUM_ERROR_RESPONSE_JSON: &str =
    r#"{"id":1,"error":{"code":25,"message":"Not subscribed: client never subscribed","traceback":""},"result":null}"#;

pub fn authorize_username() -> String {
    USER_CREDENTIALS.to_string()
}
