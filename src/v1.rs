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

//! Stratum V1 envelope, method codecs, and the numeric newtype shared between them.

pub mod messages;
pub mod rpc;

use crate::error::Result;
use std::convert::TryFrom;

/// A JSON number that may arrive as an integer or a float; truncated to a non-negative `u64`
/// rather than rejected, per the wire format's tolerance for fractional representations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TruncatedU64(pub u64);

impl TryFrom<&serde_json::Value> for TruncatedU64 {
    type Error = crate::error::Error;

    fn try_from(value: &serde_json::Value) -> Result<Self> {
        value
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0)
            .map(|n| TruncatedU64(n as u64))
            .ok_or_else(|| crate::error::Error::parse(format!("expected non-negative number, got {}", value)))
    }
}
