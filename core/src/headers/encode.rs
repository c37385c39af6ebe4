// ## 📂 File: `src/headers/encode.rs`
//! src/headers/encode.rs
//!
//! BIGInfo encoding, the exact inverse of `decode.rs`.
//!
//! Used to build capture fixtures (tests, `bigcrack forge`). Fields wider
//! than their bit budget are rejected instead of silently truncated.

use byteorder::{ByteOrder, LittleEndian};

use crate::headers::types::{BigInfo, BigInfoError, BIG_INFO_LEN};

fn check(field: &'static str, value: u64, width: u32) -> Result<u64, BigInfoError> {
    if value >> width != 0 {
        return Err(BigInfoError::FieldOutOfRange { field, value });
    }
    Ok(value)
}

/// Serialize a [`BigInfo`] into its 57-byte wire form.
pub fn encode_big_info(b: &BigInfo) -> Result<[u8; BIG_INFO_LEN], BigInfoError> {
    let mut out = [0u8; BIG_INFO_LEN];
    let mut i = 0usize;

    fn put_uint(out: &mut [u8], i: &mut usize, v: u64, n: usize) {
        LittleEndian::write_uint(&mut out[*i..*i + n], v, n);
        *i += n;
    }
    fn put_bytes(out: &mut [u8], i: &mut usize, b: &[u8]) {
        out[*i..*i + b.len()].copy_from_slice(b);
        *i += b.len();
    }

    let w0 = check("offs", b.offs as u64, 14)?
        | (b.offs_units as u64) << 14
        | check("iso_interval", b.iso_interval as u64, 12)? << 15
        | check("num_bis", b.num_bis as u64, 5)? << 27;
    put_uint(&mut out, &mut i, w0, 4);                     // 0..4

    let w1 = check("nse", b.nse as u64, 5)?
        | check("bn", b.bn as u64, 3)? << 5
        | check("sub_interval", b.sub_interval as u64, 20)? << 8
        | check("pto", b.pto as u64, 4)? << 28;
    put_uint(&mut out, &mut i, w1, 4);                     // 4..8

    let w2 = check("bis_spacing", b.bis_spacing as u64, 20)?
        | check("irc", b.irc as u64, 4)? << 20;
    put_uint(&mut out, &mut i, w2, 3);                     // 8..11

    put_bytes(&mut out, &mut i, &[b.max_pdu, b.rfu]);      // 11..13
    put_bytes(&mut out, &mut i, &b.seed_access_addr);      // 13..17

    let w3 = check("sdu_interval", b.sdu_interval as u64, 20)?
        | check("max_sdu", b.max_sdu as u64, 12)? << 20;
    put_uint(&mut out, &mut i, w3, 4);                     // 17..21

    put_bytes(&mut out, &mut i, &b.base_crc_init);         // 21..23

    let w4 = check("channel_map", b.channel_map, 37)?
        | check("phy", b.phy as u64, 3)? << 37;
    put_uint(&mut out, &mut i, w4, 5);                     // 23..28

    let w5 = check("bis_payload_count", b.bis_payload_count, 39)?
        | (b.framing as u64) << 39;
    put_uint(&mut out, &mut i, w5, 5);                     // 28..33

    put_bytes(&mut out, &mut i, &b.giv);                   // 33..41
    put_bytes(&mut out, &mut i, &b.gskd);                  // 41..57

    debug_assert_eq!(i, BIG_INFO_LEN, "encoding wrote incorrect length");
    Ok(out)
}
