// ## 📂 File: `src/crypto/nonce.rs`

//! crypto/nonce.rs
//! IV and CCM nonce construction for BIS PDUs.
//!
//! Design:
//! - IV: upper half copied from the GIV, lower half is GIV XOR the BIS
//!   access address (Core Vol 6 Part E 4.2).
//! - Nonce: 39-bit payload counter | direction bit | IV (13 octets).
//! - Neither depends on the Broadcast Code, so both are computed once per run.

use byteorder::{ByteOrder, LittleEndian};

use crate::constants::{lens, MAX_PAYLOAD_COUNT};
use crate::crypto::types::{NonceError, NONCE_LEN_13};
use crate::utils::xor_n;

/// Access address of BIS `bis` derived from the seed access address.
///
/// Core v5.2 Vol 6 Part B 2.1.2. The two least significant octets of DW are
/// zero, so only octets 2 and 3 of the seed change.
pub fn bis_access_address(bis: u8, seed_access_addr: &[u8; lens::SEED_ACCESS_ADDR]) -> [u8; 4] {
    // 8 bits are enough for d: the math wraps and we need it mod 128 anyway.
    let d = (35u8.wrapping_mul(bis).wrapping_add(42)) & 0x7f;

    // Most significant 6 bits of DW are the bit extension of d's LSB.
    let mut dwh1: u8 = if d & 1 != 0 { 0xFC } else { 0x00 };

    // Bits 25..17 of DW.
    dwh1 |= (d & 0x02) | ((d >> 6) & 0x01);
    let dwh0: u8 = ((d & 0x02) << 6) | (d & 0x30) | ((d & 0x0C) >> 1);

    let mut aa = *seed_access_addr;
    aa[3] ^= dwh1;
    aa[2] ^= dwh0;
    aa
}

/// IV for BIS `bis_index`.
pub fn compute_iv(
    giv: &[u8; lens::GIV],
    seed_access_addr: &[u8; lens::SEED_ACCESS_ADDR],
    bis_index: u8,
) -> [u8; lens::IV] {
    let aa = bis_access_address(bis_index, seed_access_addr);

    let mut iv = [0u8; lens::IV];
    iv[4..].copy_from_slice(&giv[4..]);
    xor_n(&mut iv[..4], &giv[..4], &aa);
    iv
}

/// 13-octet CCM nonce. Bit 7 of octet 4 is forced to `direction`.
pub fn compute_nonce(
    payload_count: &[u8; lens::PAYLOAD_COUNT],
    iv: &[u8; lens::IV],
    direction: u8,
) -> Result<[u8; NONCE_LEN_13], NonceError> {
    if direction > 1 {
        return Err(NonceError::InvalidDirection(direction));
    }

    let mut nonce = [0u8; NONCE_LEN_13];
    nonce[..5].copy_from_slice(payload_count);
    nonce[4] = (nonce[4] & 0x7F) | (direction << 7);
    nonce[5..].copy_from_slice(iv);
    Ok(nonce)
}

/// Little-endian 5-octet encoding of the PDU's payload counter.
pub fn payload_count_bytes(count: u64) -> Result<[u8; lens::PAYLOAD_COUNT], NonceError> {
    if count > MAX_PAYLOAD_COUNT {
        return Err(NonceError::PayloadCountOverflow { value: count });
    }
    let mut out = [0u8; lens::PAYLOAD_COUNT];
    LittleEndian::write_uint(&mut out, count, lens::PAYLOAD_COUNT);
    Ok(out)
}
