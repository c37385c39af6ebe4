// ## 📂 File: `src/headers/types.rs`

//! headers/types.rs
//! BIGInfo record as captured from the periodic advertising train.
//!
//! Notes:
//! - 57 bytes, fixed length, little-endian, bit-packed (Core Vol 6 Part B 4.4.2.8).
//! - Only seed_access_addr, giv and gskd feed the key material. The
//!   scheduling fields are decoded anyway so every offset stays byte-exact.

use std::fmt;

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::lens;

/// Fixed record size in bytes.
pub const BIG_INFO_LEN: usize = 57;

/// 37-bit data channel map.
pub const CHANNEL_MAP_MASK: u64 = (1 << 37) - 1;

/// Radio PHY of the BIG (3-bit field).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive, Serialize, Deserialize)]
pub enum BigPhy {
    Le1M = 0,
    Le2M = 1,
    LeCoded = 2,
}

impl fmt::Display for BigPhy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BigPhy::Le1M => "LE 1M",
            BigPhy::Le2M => "LE 2M",
            BigPhy::LeCoded => "LE Coded",
        };
        f.write_str(name)
    }
}

/// Decoded BIGInfo.
///
/// `phy` keeps the raw 3-bit value; use [`BigInfo::phy_kind`] for the typed view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BigInfo {
    // octets 0..4
    pub offs: u16,          // 14 bits
    pub offs_units: bool,   // 1 bit, 300 us units when set
    pub iso_interval: u16,  // 12 bits
    pub num_bis: u8,        // 5 bits

    // octets 4..8
    pub nse: u8,            // 5 bits
    pub bn: u8,             // 3 bits
    pub sub_interval: u32,  // 20 bits
    pub pto: u8,            // 4 bits

    // octets 8..11
    pub bis_spacing: u32,   // 20 bits
    pub irc: u8,            // 4 bits

    pub max_pdu: u8,
    pub rfu: u8,
    pub seed_access_addr: [u8; lens::SEED_ACCESS_ADDR],

    // octets 17..21
    pub sdu_interval: u32,  // 20 bits
    pub max_sdu: u16,       // 12 bits

    pub base_crc_init: [u8; 2],

    // octets 23..28
    pub channel_map: u64,   // 37 bits
    pub phy: u8,            // 3 bits

    // octets 28..33
    pub bis_payload_count: u64, // 39 bits
    pub framing: bool,          // 1 bit

    pub giv: [u8; lens::GIV],
    pub gskd: [u8; lens::GSKD],
}

impl BigInfo {
    pub fn phy_kind(&self) -> Option<BigPhy> {
        BigPhy::try_from_primitive(self.phy).ok()
    }

    /// Number of data channels in use.
    pub fn used_channels(&self) -> u32 {
        (self.channel_map & CHANNEL_MAP_MASK).count_ones()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BigInfoError {
    #[error("BIGInfo buffer too short: have {have}, need {need}")]
    BufferTooShort { have: usize, need: usize },

    #[error("BIGInfo field {field} out of range: {value}")]
    FieldOutOfRange { field: &'static str, value: u64 },
}
