// ## 📂 File: `src/constants.rs`

//! Protocol constants for the BIG key hierarchy and the search defaults.
//!
//! All multi-octet protocol values are stored the way they sit in memory on a
//! Bluetooth LE controller: little-endian, octet 0 is the least significant.

/// Broadcast Code length after zero padding.
pub const BROADCAST_CODE_LEN: usize = 16;

/// h7 SALT for IGLTK = h7("BIG1", Broadcast_Code), little-endian in memory.
pub const SALT_BIG1: [u8; 16] = [
    0x31, 0x47, 0x49, 0x42, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// h6 keyID for GLTK = h6(IGLTK, "BIG2").
pub const KEY_ID_BIG2: [u8; 4] = [0x32, 0x47, 0x49, 0x42];

/// h8 keyID for GSK = h8(GLTK, GSKD, "BIG3").
pub const KEY_ID_BIG3: [u8; 4] = [0x33, 0x47, 0x49, 0x42];

/// BIS the tool derives the access address and IV for.
pub const DEFAULT_BIS_INDEX: u8 = 1;

/// Direction bit of the CCM nonce. Always set for broadcast isochronous PDUs.
pub const BIS_DIRECTION: u8 = 1;

/// Largest payload counter that leaves bit 39 free for the direction flag.
pub const MAX_PAYLOAD_COUNT: u64 = (1 << 39) - 1;

/// Numeric mode enumerates codes up to this many bytes (the index must fit a u64).
pub const MAX_NUMERIC_CODE_LEN: u8 = 7;

/// Candidates between two looks at the success flag (and two progress events).
pub const DEFAULT_CHECK_INTERVAL: u64 = 100_000;

/// Nordic radios insert one extra octet before the encrypted payload.
pub const MAX_HW_OFFSET: u8 = 1;

/// Bounded capacity of the worker -> orchestrator event channel, per worker.
pub const EVENTS_PER_WORKER: usize = 64;

/// Octet lengths of the BIG session material.
pub mod lens {
    pub const GIV: usize = 8;
    pub const GSKD: usize = 16;
    pub const GSK: usize = 16;
    pub const IV: usize = 8;
    pub const NONCE: usize = 13;
    pub const SEED_ACCESS_ADDR: usize = 4;
    pub const PAYLOAD_COUNT: usize = 5;
}
