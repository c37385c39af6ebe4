//! headers/mod.rs
//! BIGInfo record: the fixed-layout metadata captured next to the PDU.
//!
//! Notes:
//! - Little-endian and bit-packed, exactly as it travels in the ACAD of the
//!   periodic advertising train.
//! - Decode is pure and byte-exact; encode exists for fixtures.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
