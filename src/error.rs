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

//! Module that represents codec errors: a `Parse`/`Decode`/`Other` kind, a human description,
//! and an optional wrapped cause.

use thiserror::Error as ThisError;

/// A boxed cause, kept type-erased so parsers don't need to know about `serde_json` or `hex`
/// error types to wrap them.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The three codec error kinds. `Parse` covers structural/type mismatches in a wire message,
/// `Decode` covers hex decoding and header-from-bytes failures, `Other` covers everything else
/// (an unknown miner tag, a header that fails its structural validator).
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum ErrorKind {
    Parse,
    Decode,
    Other,
}

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("{description}")]
    Parse {
        description: String,
        #[source]
        cause: Option<Cause>,
    },

    #[error("{description}")]
    Decode {
        description: String,
        #[source]
        cause: Option<Cause>,
    },

    #[error("{description}")]
    Other {
        description: String,
        #[source]
        cause: Option<Cause>,
    },
}

impl Error {
    pub fn parse<S: Into<String>>(description: S) -> Self {
        Self::Parse {
            description: description.into(),
            cause: None,
        }
    }

    pub fn parse_with<S, E>(description: S, cause: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Parse {
            description: description.into(),
            cause: Some(Box::new(cause)),
        }
    }

    pub fn decode<S: Into<String>>(description: S) -> Self {
        Self::Decode {
            description: description.into(),
            cause: None,
        }
    }

    pub fn decode_with<S, E>(description: S, cause: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Decode {
            description: description.into(),
            cause: Some(Box::new(cause)),
        }
    }

    pub fn other<S: Into<String>>(description: S) -> Self {
        Self::Other {
            description: description.into(),
            cause: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Other { .. } => ErrorKind::Other,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::parse_with("malformed JSON", e)
    }
}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Self {
        Error::decode_with("malformed hex string", e)
    }
}

/// A specialized `Result` type bound to [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
