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

//! Stratum codec and header assembler for a Decred mining pool.
//!
//! The crate is organized the way the wire protocol itself is layered: [`v1`] carries the
//! JSON-RPC-shaped envelope and the typed method codecs built on top of it, [`header`] carries
//! the byte-exact Decred block header assembler, [`miner`] names the ASIC models the assembler
//! has quirks for, and [`pagination`] is the thin read-only HTTP projection over pool statistics
//! described as an external collaborator contract.

pub use packed_struct;

pub mod error;
pub mod header;
pub mod logging;
pub mod miner;
pub mod pagination;
pub mod v1;

#[doc(hidden)]
pub mod test_utils;
