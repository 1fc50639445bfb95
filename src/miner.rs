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

//! ASIC miner identity. The header assembler in [`crate::header`] keys its per-miner byte-layout
//! quirks off this enum; an unrecognized tag can't reach the assembler at all because parsing the
//! tag into this type is itself the validation point.

use std::convert::TryFrom;
use std::fmt;

use crate::error::{Error, Result};

/// Known ASIC miner models with firmware-specific header submission quirks.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Miner {
    Cpu,
    ObeliskDcr1,
    AntminerDr3,
    AntminerDr5,
    InnosiliconD9,
    WhatsminerD1,
}

impl Miner {
    /// The exact wire tag used to identify this miner model.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::ObeliskDcr1 => "ObeliskDCR1",
            Self::AntminerDr3 => "AntminerDR3",
            Self::AntminerDr5 => "AntminerDR5",
            Self::InnosiliconD9 => "InnosiliconD9",
            Self::WhatsminerD1 => "WhatsminerD1",
        }
    }
}

impl fmt::Display for Miner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Miner {
    type Error = Error;

    fn try_from(tag: &str) -> Result<Self> {
        match tag {
            "CPU" => Ok(Self::Cpu),
            "ObeliskDCR1" => Ok(Self::ObeliskDcr1),
            "AntminerDR3" => Ok(Self::AntminerDr3),
            "AntminerDR5" => Ok(Self::AntminerDr5),
            "InnosiliconD9" => Ok(Self::InnosiliconD9),
            "WhatsminerD1" => Ok(Self::WhatsminerD1),
            other => Err(Error::other(format!("specified miner {} is unknown", other))),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_known_tags_round_trip() {
        for miner in [
            Miner::Cpu,
            Miner::ObeliskDcr1,
            Miner::AntminerDr3,
            Miner::AntminerDr5,
            Miner::InnosiliconD9,
            Miner::WhatsminerD1,
        ] {
            let tag = miner.as_str();
            assert_eq!(Miner::try_from(tag).unwrap(), miner);
        }
    }

    #[test]
    fn test_unknown_tag_is_other_error() {
        let err = Miner::try_from("BitmainS9").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Other);
        assert_eq!(err.to_string(), "specified miner BitmainS9 is unknown");
    }
}
