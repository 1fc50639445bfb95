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

//! Miscellaneous constants shared among test utils to generate consistent messages and block
//! header fixtures.

pub const POOL_URL: &str = "dcr.braiinspool.com";
pub const POOL_PORT: usize = 3252;
pub const USER_CREDENTIALS: &str = "DsAccountAddress1111111111111111111.worker0";

pub const TEST_BLOCK_VERSION_HEX: &str = "06000000";
pub const TEST_PREV_BLOCK_HEX: &str =
    "1111111111111111111111111111111111111111111111111111111111111111"; // 32 bytes

/// `merkleRoot(32) ‖ stakeRoot(32) ‖ voteBits(2) ‖ finalState(6) ‖ voters(2) ‖ freshStake(1) ‖
/// revocations(1) ‖ poolSize(4) ‖ bits(4) ‖ sbits(8) ‖ height(4) ‖ size(4)` = 100 bytes.
pub const TEST_GEN_TX1_HEX: &str = concat!(
    "2222222222222222222222222222222222222222222222222222222222222222", // merkleRoot (32 bytes)
    "2222222222222222222222222222222222222222222222222222222222222222", // stakeRoot (32 bytes)
    "0100",             // voteBits (2 bytes)
    "030405060708",     // finalState (6 bytes)
    "0200",             // voters (2 bytes)
    "03",               // freshStake (1 byte)
    "00",               // revocations (1 byte)
    "04000000",         // poolSize (4 bytes)
    "1a2b3c4d",         // bits (4 bytes)
    "0010a5d4e8000000", // sbits (8 bytes)
    "40420f00",         // height (4 bytes)
    "d0070000",         // size (4 bytes)
);

pub const TEST_EXTRA_NONCE1_HEX: &str = "11223344";
pub const TEST_EXTRA_NONCE2_HEX: &str = "22222222";
pub const TEST_NTIME_HEX: &str = "a1b2c3d4";
pub const TEST_NONCE_HEX: &str = "deadbeef";

/// The 12 trailing bytes (`extraData[24:32] ‖ stakeVersion`) appended past the 56 reserved zero
/// nibbles, completing the 180-byte header.
pub const TEST_GEN_TX2_HEX: &str = "000000000000000000000001";

/// Builds the same unsolved-header hex string [`crate::header::generate_block_header`] would,
/// for tests that only need a well-formed `headerHex` to patch.
pub fn build_unsolved_header_hex() -> String {
    format!(
        "{}{}{}{}{}{}",
        TEST_BLOCK_VERSION_HEX,
        TEST_PREV_BLOCK_HEX,
        TEST_GEN_TX1_HEX,
        TEST_EXTRA_NONCE1_HEX,
        "0".repeat(56),
        TEST_GEN_TX2_HEX,
    )
}
