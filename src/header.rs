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

//! Assembles the binary Decred block header from a work notification and, once a miner submits
//! a share, rebuilds the solved header while correcting for per-miner byte-layout quirks.
//!
//! Everything here works in *hex-character space*: `headerHex` is patched character-by-character
//! before being decoded, mirroring the source system's own representation. See
//! [`generate_solved_block_header`] for why.

use packed_struct::prelude::*;
use packed_struct_codegen::PackedStruct;
use slog::warn;

use crate::error::{Error, Result};
use crate::logging;
use crate::miner::Miner;

/// Size in bytes of a serialized Decred block header.
pub const HEADER_SIZE: usize = 180;

/// Number of zero nibbles reserved by [`generate_block_header`] for the fields a submission
/// fills in later: `nTime ‖ nonce ‖ extraNonce1 ‖ extraNonce2 ‖ <tail>`.
const RESERVED_NIBBLES: usize = 56;

const NTIME_RANGE: std::ops::Range<usize> = 272..280;
const NONCE_RANGE: std::ops::Range<usize> = 280..288;
const EXTRA_NONCE1_RANGE: std::ops::Range<usize> = 288..296;
const EXTRA_NONCE2_RANGE: std::ops::Range<usize> = 296..304;
const EXTRA_NONCE2_WIDE_DR_RANGE: std::ops::Range<usize> = 288..312;
const EXTRA_NONCE2_WIDE_D1_RANGE: std::ops::Range<usize> = 288..304;

/// A fully decoded Decred block header, 180 bytes packed little-endian with no padding.
///
/// `version` through `size` (136 bytes / 272 hex characters) is exactly the
/// `prevBlock ‖ genTx1` concatenation used by [`generate_block_header`]; the first 8 bytes of
/// `extra_data` carry `extraNonce1 ‖ extraNonce2` for miners that honor the split.
#[derive(PackedStruct, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[packed_struct(endian = "lsb")]
pub struct ParsedHeader {
    pub version: u32,
    pub prev_block: [u8; 32],
    pub merkle_root: [u8; 32],
    pub stake_root: [u8; 32],
    pub vote_bits: u16,
    pub final_state: [u8; 6],
    pub voters: u16,
    pub fresh_stake: u8,
    pub revocations: u8,
    pub pool_size: u32,
    pub bits: u32,
    pub sbits: u64,
    pub height: u32,
    pub size: u32,
    pub timestamp: u32,
    pub nonce: u32,
    pub extra_data: [u8; 32],
    pub stake_version: u32,
}

impl ParsedHeader {
    #[inline]
    pub fn into_bytes(self) -> [u8; HEADER_SIZE] {
        self.pack()
    }
}

/// Decodes `hex_str` and unpacks it as a [`ParsedHeader`], treating a malformed byte count or a
/// packing failure as the structural-validator rejection described by the caller's `on_invalid`.
fn decode_and_unpack(
    hex_str: &str,
    decode_err: impl FnOnce(String, hex::FromHexError) -> Error,
    invalid_err: impl FnOnce(String) -> Error,
) -> Result<ParsedHeader> {
    let bytes = hex::decode(hex_str)
        .map_err(|e| decode_err(format!("malformed header hex: {}", hex_str), e))?;

    let array: [u8; HEADER_SIZE] = bytes.as_slice().try_into().map_err(|_| {
        invalid_err(format!(
            "decoded header is {} bytes, expected {}",
            bytes.len(),
            HEADER_SIZE
        ))
    })?;

    ParsedHeader::unpack(&array)
        .map_err(|e| invalid_err(format!("header failed structural validation: {}", e)))
}

/// Builds the canonical (unsolved) Decred block header for a work notification.
///
/// Concatenates `blockVersion ‖ prevBlock ‖ genTx1 ‖ extraNonce1 ‖ ("0" × 56) ‖ genTx2`, decodes
/// the result and parses it as a [`ParsedHeader`]. The 56 zero nibbles reserve the
/// `nTime ‖ nonce ‖ extraNonce2 ‖ <tail>` region that [`generate_solved_block_header`] fills in
/// once a share is submitted.
pub fn generate_block_header(
    block_version: &str,
    prev_block: &str,
    gen_tx1: &str,
    extra_nonce1: &str,
    gen_tx2: &str,
) -> Result<ParsedHeader> {
    let hex_str = format!(
        "{}{}{}{}{}{}",
        block_version,
        prev_block,
        gen_tx1,
        extra_nonce1,
        "0".repeat(RESERVED_NIBBLES),
        gen_tx2
    );

    decode_and_unpack(&hex_str, Error::decode_with, |description| {
        warn!(logging::logger(), "header structural validation failed"; "reason" => &description);
        Error::other(description)
    })
}

/// Reverses the order of *bytes* (pairs of hex characters) in a hex string, not individual
/// nibbles. `hex_reversed(hex_reversed(s)) == s` for any even-length `s`.
pub fn hex_reversed(s: &str) -> Result<String> {
    if s.len() % 2 != 0 {
        return Err(Error::decode(format!(
            "hex string has odd length: {}",
            s
        )));
    }
    let bytes = s.as_bytes();
    Ok(bytes
        .chunks(2)
        .rev()
        .map(|pair| std::str::from_utf8(pair).expect("hex chunk is ASCII"))
        .collect::<Vec<_>>()
        .concat())
}

fn patch(chars: &mut [u8], range: std::ops::Range<usize>, value: &str) -> Result<()> {
    if range.end > chars.len() {
        return Err(Error::decode("header hex string too short for patch"));
    }
    if value.len() != range.len() {
        return Err(Error::decode(format!(
            "expected {} hex characters, got {}",
            range.len(),
            value.len()
        )));
    }
    chars[range].copy_from_slice(value.as_bytes());
    Ok(())
}

/// Rebuilds the solved block header from a submission, applying the per-miner byte-layout quirk
/// table. `header_hex` is treated as a mutable hex-character string (nibble-indexed, not
/// byte-indexed) because that's the representation the offsets in the miner quirk table are
/// defined against; patching in byte space instead requires halving every offset consistently.
pub fn generate_solved_block_header(
    header_hex: &str,
    extra_nonce1: &str,
    extra_nonce2: &str,
    n_time: &str,
    nonce: &str,
    miner: Miner,
) -> Result<ParsedHeader> {
    let mut chars = header_hex.as_bytes().to_vec();

    match miner {
        Miner::Cpu => {
            patch(&mut chars, NTIME_RANGE, n_time)?;
            patch(&mut chars, NONCE_RANGE, nonce)?;
            patch(&mut chars, EXTRA_NONCE1_RANGE, extra_nonce1)?;
            patch(&mut chars, EXTRA_NONCE2_RANGE, extra_nonce2)?;
        }
        Miner::ObeliskDcr1 | Miner::InnosiliconD9 => {
            patch(&mut chars, NTIME_RANGE, &hex_reversed(n_time)?)?;
            patch(&mut chars, NONCE_RANGE, &hex_reversed(nonce)?)?;
            patch(&mut chars, EXTRA_NONCE1_RANGE, extra_nonce1)?;
            patch(&mut chars, EXTRA_NONCE2_RANGE, extra_nonce2)?;
        }
        Miner::AntminerDr3 | Miner::AntminerDr5 => {
            patch(&mut chars, NTIME_RANGE, &hex_reversed(n_time)?)?;
            patch(&mut chars, NONCE_RANGE, &hex_reversed(nonce)?)?;
            patch(&mut chars, EXTRA_NONCE2_WIDE_DR_RANGE, extra_nonce2)?;
        }
        Miner::WhatsminerD1 => {
            patch(&mut chars, NTIME_RANGE, &hex_reversed(n_time)?)?;
            patch(&mut chars, NONCE_RANGE, &hex_reversed(nonce)?)?;
            patch(&mut chars, EXTRA_NONCE2_WIDE_D1_RANGE, extra_nonce2)?;
        }
    }

    let patched = String::from_utf8(chars).expect("patching only ever writes ASCII hex digits");

    decode_and_unpack(&patched, Error::decode_with, Error::decode)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::common::*;
    use std::convert::TryFrom;

    #[test]
    fn test_hex_reversed() {
        assert_eq!(hex_reversed("a1b2c3d4").unwrap(), "d4c3b2a1");
    }

    #[test]
    fn test_hex_reversed_odd_length_is_decode_error() {
        let err = hex_reversed("abc").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Decode);
    }

    #[test]
    fn test_hex_reversed_is_involution() {
        let s = "0123456789abcdef";
        assert_eq!(hex_reversed(&hex_reversed(s).unwrap()).unwrap(), s);
    }

    #[test]
    fn test_generate_block_header_roundtrip() {
        let header = generate_block_header(
            TEST_BLOCK_VERSION_HEX,
            TEST_PREV_BLOCK_HEX,
            TEST_GEN_TX1_HEX,
            TEST_EXTRA_NONCE1_HEX,
            TEST_GEN_TX2_HEX,
        )
        .expect("valid header fields must assemble");
        assert_eq!(header.version, 0x00000006);
    }

    #[test]
    fn test_generate_block_header_rejects_bad_hex() {
        let err = generate_block_header("zz", TEST_PREV_BLOCK_HEX, TEST_GEN_TX1_HEX, TEST_EXTRA_NONCE1_HEX, TEST_GEN_TX2_HEX)
            .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Decode);
    }

    /// S6: ObeliskDCR1 header patch.
    #[test]
    fn test_generate_solved_block_header_obelisk_dcr1() {
        let header_hex = "0".repeat(304);
        let extra_nonce1 = "11111111";
        let extra_nonce2 = "22222222";
        let n_time = "a1b2c3d4";
        let nonce = "deadbeef";

        let mut chars = header_hex.into_bytes();
        patch(&mut chars, NTIME_RANGE, &hex_reversed(n_time).unwrap()).unwrap();
        patch(&mut chars, NONCE_RANGE, &hex_reversed(nonce).unwrap()).unwrap();
        patch(&mut chars, EXTRA_NONCE1_RANGE, extra_nonce1).unwrap();
        patch(&mut chars, EXTRA_NONCE2_RANGE, extra_nonce2).unwrap();
        let patched = String::from_utf8(chars).unwrap();

        assert_eq!(&patched[272..280], "d4c3b2a1");
        assert_eq!(&patched[280..288], "efbeadde");
        assert_eq!(&patched[288..296], "11111111");
        assert_eq!(&patched[296..304], "22222222");
    }

    /// S7: AntminerDR3 wide extraNonce.
    #[test]
    fn test_generate_solved_block_header_antminer_dr3_wide_extra_nonce() {
        let header_hex = "0".repeat(312);
        let extra_nonce2 = "0123456789abcdef01234567"; // 24 hex chars
        let nonce = "deadbeef";

        let mut chars = header_hex.into_bytes();
        patch(&mut chars, NONCE_RANGE, &hex_reversed(nonce).unwrap()).unwrap();
        patch(&mut chars, EXTRA_NONCE2_WIDE_DR_RANGE, extra_nonce2).unwrap();
        let patched = String::from_utf8(chars).unwrap();

        assert_eq!(&patched[288..312], extra_nonce2);
        assert_eq!(&patched[280..288], "efbeadde");
    }

    #[test]
    fn test_generate_solved_block_header_determinism() {
        let header_hex = build_unsolved_header_hex();
        let miner = Miner::try_from("CPU").unwrap();

        let a = generate_solved_block_header(
            &header_hex,
            TEST_EXTRA_NONCE1_HEX,
            TEST_EXTRA_NONCE2_HEX,
            TEST_NTIME_HEX,
            TEST_NONCE_HEX,
            miner,
        )
        .unwrap();
        let b = generate_solved_block_header(
            &header_hex,
            TEST_EXTRA_NONCE1_HEX,
            TEST_EXTRA_NONCE2_HEX,
            TEST_NTIME_HEX,
            TEST_NONCE_HEX,
            miner,
        )
        .unwrap();

        assert_eq!(a, b);
        assert_eq!(a.into_bytes(), b.into_bytes());
    }

    #[test]
    fn test_generate_solved_block_header_cpu_is_as_is() {
        let header_hex = build_unsolved_header_hex();
        let miner = Miner::try_from("CPU").unwrap();

        let header = generate_solved_block_header(
            &header_hex,
            TEST_EXTRA_NONCE1_HEX,
            TEST_EXTRA_NONCE2_HEX,
            TEST_NTIME_HEX,
            TEST_NONCE_HEX,
            miner,
        )
        .unwrap();

        assert_eq!(header.timestamp, u32::from_le_bytes(
            <[u8; 4]>::try_from(hex::decode(TEST_NTIME_HEX).unwrap().as_slice()).unwrap()
        ));
    }

    #[test]
    fn test_generate_solved_block_header_wide_miner_rejects_mismatched_width() {
        let header_hex = build_unsolved_header_hex();
        let miner = Miner::try_from("AntminerDR3").unwrap();

        // extraNonce2 must be 24 hex characters for the wide DR3/DR5 slot; the canonical 8 is
        // rejected rather than silently truncated or zero-padded.
        let err = generate_solved_block_header(
            &header_hex,
            TEST_EXTRA_NONCE1_HEX,
            TEST_EXTRA_NONCE2_HEX,
            TEST_NTIME_HEX,
            TEST_NONCE_HEX,
            miner,
        )
        .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Decode);
    }
}
