// ## src/crypto/kdf.rs

//! crypto/kdf.rs
//! BIG key hierarchy: Broadcast_Code -> IGLTK -> GLTK -> GSK.
//!
//! Design:
//! - IGLTK = h7("BIG1", Broadcast_Code)
//! - GLTK  = h6(IGLTK, "BIG2")
//! - GSK   = h8(GLTK, GSKD, "BIG3")
//!
//! Byte order:
//! - Every argument and result of h6/h7/h8 is little-endian in memory, the
//!   way a controller keeps them. The functions swap to big-endian for
//!   AES-CMAC and swap the MAC back.
//! - The AES key schedule wants the GSK most significant octet first, so
//!   `derive_gsk` reverses the h8 output once more.

use aes::Aes128;
use cmac::{Cmac, Mac};

use crate::constants::{KEY_ID_BIG2, KEY_ID_BIG3, SALT_BIG1};
use crate::crypto::types::{BroadcastCode, KdfError, KEY_LEN_16};

/// AES-CMAC (RFC 4493) with a big-endian key over a big-endian message.
#[inline]
pub fn aes_cmac(key: &[u8; KEY_LEN_16], msg: &[u8]) -> Result<[u8; KEY_LEN_16], KdfError> {
    let mut mac = <Cmac<Aes128> as Mac>::new_from_slice(key)
        .map_err(|_| KdfError::Primitive { stage: "aes_cmac" })?;
    mac.update(msg);

    let tag = mac.finalize().into_bytes();
    let mut out = [0u8; KEY_LEN_16];
    out.copy_from_slice(&tag);
    Ok(out)
}

#[inline]
fn swap16(src: &[u8; 16]) -> [u8; 16] {
    let mut out = *src;
    out.reverse();
    out
}

#[inline]
fn swap4(src: &[u8; 4]) -> [u8; 4] {
    let mut out = *src;
    out.reverse();
    out
}

/// h6(W, keyID) = AES-CMAC_W(keyID). Core Vol 3 Part H 2.2.10.
pub fn h6(w: &[u8; 16], key_id: &[u8; 4]) -> Result<[u8; 16], KdfError> {
    let res = aes_cmac(&swap16(w), &swap4(key_id))
        .map_err(|_| KdfError::Primitive { stage: "h6" })?;
    Ok(swap16(&res))
}

/// h7(SALT, W) = AES-CMAC_SALT(W). Core Vol 3 Part H 2.2.11.
pub fn h7(salt: &[u8; 16], w: &[u8; 16]) -> Result<[u8; 16], KdfError> {
    let res = aes_cmac(&swap16(salt), &swap16(w))
        .map_err(|_| KdfError::Primitive { stage: "h7" })?;
    Ok(swap16(&res))
}

/// h8(K, S, keyID) = AES-CMAC_IK(keyID) with IK = AES-CMAC_S(K).
pub fn h8(k: &[u8; 16], s: &[u8; 16], key_id: &[u8; 4]) -> Result<[u8; 16], KdfError> {
    let ik = aes_cmac(&swap16(s), &swap16(k))
        .map_err(|_| KdfError::Primitive { stage: "h8" })?;
    let res = aes_cmac(&ik, &swap4(key_id))
        .map_err(|_| KdfError::Primitive { stage: "h8" })?;
    Ok(swap16(&res))
}

/// Derive the Group Session Key for one Broadcast Code candidate.
///
/// Returns the key ready for the AES-128 key schedule (octet-swapped).
/// A failing stage short-circuits; later stages never run.
#[inline]
pub fn derive_gsk(code: &BroadcastCode, gskd: &[u8; 16]) -> Result<[u8; KEY_LEN_16], KdfError> {
    let igltk = h7(&SALT_BIG1, code.as_bytes())?;
    let gltk = h6(&igltk, &KEY_ID_BIG2)?;
    let gsk = h8(&gltk, gskd, &KEY_ID_BIG3)?;
    Ok(swap16(&gsk))
}

/// Convenience form taking the raw 1..=16 byte candidate.
pub fn derive_gsk_from_candidate(candidate: &[u8], gskd: &[u8; 16]) -> Result<[u8; KEY_LEN_16], KdfError> {
    let code = BroadcastCode::from_candidate(candidate)?;
    derive_gsk(&code, gskd)
}
