// ## 📂 File: `src/capture.rs`

//! Synthetic captures: a BIGInfo record plus one BIS PDU sealed under a
//! known Broadcast Code.
//!
//! The seal path runs the same derivation as the search (IV, nonce, GSK),
//! so a forged capture is cracked by exactly the pipeline under test.

use thiserror::Error;

use crate::constants::{lens, BIS_DIRECTION};
use crate::crypto::{
    compute_iv, compute_nonce, derive_gsk_from_candidate, encrypt_pdu, payload_count_bytes,
    KdfError, NonceError, VerifyError,
};
use crate::headers::{encode_big_info, BigInfo, BigInfoError, BIG_INFO_LEN};

/// Header octet of an unframed BIS data PDU with CSSN = CSTF = 0.
pub const DEFAULT_PDU_HEADER: u8 = 0x00;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgedCapture {
    pub big_info: [u8; BIG_INFO_LEN],
    pub pdu: Vec<u8>,
    pub gsk: [u8; lens::GSK],
    pub nonce: [u8; lens::NONCE],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSpec<'a> {
    pub code: &'a [u8],
    pub big_info: &'a BigInfo,
    pub payload_count: u64,
    pub plaintext: &'a [u8],
    pub header: u8,
    pub hw_offset: u8,
    pub bis_index: u8,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForgeError {
    #[error(transparent)]
    Kdf(#[from] KdfError),
    #[error(transparent)]
    Nonce(#[from] NonceError),
    #[error(transparent)]
    Verify(#[from] VerifyError),
    #[error(transparent)]
    BigInfo(#[from] BigInfoError),
}

pub fn forge_capture(input: &CaptureSpec<'_>) -> Result<ForgedCapture, ForgeError> {
    if input.hw_offset > 1 {
        return Err(VerifyError::InvalidArgument(format!(
            "hw_offset must be 0 or 1, got {}",
            input.hw_offset
        ))
        .into());
    }

    let big_info = encode_big_info(input.big_info)?;
    let iv = compute_iv(&input.big_info.giv, &input.big_info.seed_access_addr, input.bis_index);
    let nonce = compute_nonce(&payload_count_bytes(input.payload_count)?, &iv, BIS_DIRECTION)?;
    let gsk = derive_gsk_from_candidate(input.code, &input.big_info.gskd)?;

    let mut pdu = encrypt_pdu(input.header, input.plaintext, &gsk, &nonce)?;
    if input.hw_offset == 1 {
        // The extra radio octet sits between the length octet and the payload.
        pdu.insert(2, 0x00);
    }

    Ok(ForgedCapture { big_info, pdu, gsk, nonce })
}
