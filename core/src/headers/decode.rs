// ## 📂 File: `src/headers/decode.rs`
//! src/headers/decode.rs
//!
//! BIGInfo decoding.
//!
//! Design notes:
//! - Pure function over a byte slice; never casts raw memory onto a struct.
//! - Bit-packed groups are read as little-endian integers and split with
//!   shifts and masks. Bit 0 is the least significant bit of the group.
//! - Extra trailing bytes are ignored; callers decide whether to warn.

use byteorder::{ByteOrder, LittleEndian};

use crate::headers::types::{BigInfo, BigInfoError, BIG_INFO_LEN, CHANNEL_MAP_MASK};

#[inline]
fn bits(v: u64, lo: u32, width: u32) -> u64 {
    (v >> lo) & ((1u64 << width) - 1)
}

/// Decode the first 57 bytes of `buf` into a [`BigInfo`].
pub fn decode_big_info(buf: &[u8]) -> Result<BigInfo, BigInfoError> {
    if buf.len() < BIG_INFO_LEN {
        return Err(BigInfoError::BufferTooShort { have: buf.len(), need: BIG_INFO_LEN });
    }

    let mut i = 0usize;
    #[inline] fn get_uint(buf: &[u8], i: &mut usize, n: usize) -> u64 { let v = LittleEndian::read_uint(&buf[*i..*i + n], n); *i += n; v }
    #[inline] fn get_u8(buf: &[u8], i: &mut usize) -> u8 { let v = buf[*i]; *i += 1; v }
    #[inline] fn get_bytes<const N: usize>(buf: &[u8], i: &mut usize) -> [u8; N] {
        let mut dst = [0u8; N]; dst.copy_from_slice(&buf[*i..*i + N]); *i += N; dst
    }

    let mut b = BigInfo::default();

    let w0 = get_uint(buf, &mut i, 4);                     // 0..4
    b.offs         = bits(w0, 0, 14) as u16;
    b.offs_units   = bits(w0, 14, 1) == 1;
    b.iso_interval = bits(w0, 15, 12) as u16;
    b.num_bis      = bits(w0, 27, 5) as u8;

    let w1 = get_uint(buf, &mut i, 4);                     // 4..8
    b.nse          = bits(w1, 0, 5) as u8;
    b.bn           = bits(w1, 5, 3) as u8;
    b.sub_interval = bits(w1, 8, 20) as u32;
    b.pto          = bits(w1, 28, 4) as u8;

    let w2 = get_uint(buf, &mut i, 3);                     // 8..11
    b.bis_spacing  = bits(w2, 0, 20) as u32;
    b.irc          = bits(w2, 20, 4) as u8;

    b.max_pdu          = get_u8(buf, &mut i);              // 11
    b.rfu              = get_u8(buf, &mut i);              // 12
    b.seed_access_addr = get_bytes::<4>(buf, &mut i);      // 13..17

    let w3 = get_uint(buf, &mut i, 4);                     // 17..21
    b.sdu_interval = bits(w3, 0, 20) as u32;
    b.max_sdu      = bits(w3, 20, 12) as u16;

    b.base_crc_init = get_bytes::<2>(buf, &mut i);         // 21..23

    let w4 = get_uint(buf, &mut i, 5);                     // 23..28
    b.channel_map = w4 & CHANNEL_MAP_MASK;
    b.phy         = bits(w4, 37, 3) as u8;

    let w5 = get_uint(buf, &mut i, 5);                     // 28..33
    b.bis_payload_count = bits(w5, 0, 39);
    b.framing           = bits(w5, 39, 1) == 1;

    b.giv  = get_bytes::<8>(buf, &mut i);                  // 33..41
    b.gskd = get_bytes::<16>(buf, &mut i);                 // 41..57

    debug_assert_eq!(i, BIG_INFO_LEN, "decoding consumed incorrect length");
    Ok(b)
}
