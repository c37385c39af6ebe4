// ## 📂 File: `src/crypto/aead.rs`

//! src/crypto/aead.rs
//! AES-128-CCM open/seal for BIS PDUs.
//!
//! Design notes:
//! - CCM with a 4-octet MIC and a 13-octet nonce (Core Vol 6 Part E).
//! - PDU wire layout: header | length | [hw pad] | ciphertext | MIC.
//! - A MIC failure is `VerifyError::TagMismatch` and is the expected result
//!   for every wrong candidate. It must stay cheap and silent.
//! - `EncryptedPdu` validates the layout once so the search loop only does
//!   key schedule + CCM per candidate.

use aes::Aes128;
use bytes::Bytes;
use ccm::aead::generic_array::GenericArray;
use ccm::aead::{AeadInPlace, KeyInit};
use ccm::consts::{U13, U4};
use ccm::Ccm;

use crate::constants::MAX_HW_OFFSET;
use crate::crypto::aad::build_aad;
use crate::crypto::types::{VerifyError, KEY_LEN_16, MIC_LEN, NONCE_LEN_13, PDU_HEADER_LEN};

/// AES-128-CCM, M = 4, nonce 13.
pub type BisCcm = Ccm<Aes128, U4, U13>;

/// A captured, still encrypted BIS PDU with its layout checked.
///
/// Cloning is cheap; the bytes are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPdu {
    raw: Bytes,
    hw_offset: u8,
}

impl EncryptedPdu {
    /// Validate `raw` as a PDU whose payload starts `2 + hw_offset` octets in.
    pub fn parse(raw: impl Into<Bytes>, hw_offset: u8) -> Result<Self, VerifyError> {
        let raw = raw.into();
        validate_layout(&raw, hw_offset)?;
        Ok(Self { raw, hw_offset })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    pub fn bytes(&self) -> Bytes {
        self.raw.clone()
    }

    pub fn hw_offset(&self) -> u8 {
        self.hw_offset
    }

    pub fn header(&self) -> u8 {
        self.raw[0]
    }

    /// Plaintext length announced by the length octet.
    pub fn plaintext_len(&self) -> usize {
        self.raw[1] as usize - MIC_LEN
    }

    pub fn aad(&self) -> [u8; 1] {
        build_aad(self.header())
    }

    /// Ciphertext without the MIC.
    pub fn ciphertext(&self) -> &[u8] {
        let start = PDU_HEADER_LEN + self.hw_offset as usize;
        &self.raw[start..self.raw.len() - MIC_LEN]
    }

    pub fn mic(&self) -> &[u8] {
        &self.raw[self.raw.len() - MIC_LEN..]
    }

    /// Decrypt into `out` (cleared first) and verify the MIC under `gsk`.
    ///
    /// `out` is the caller's scratch buffer; it is reused across calls and
    /// holds garbage after a `TagMismatch`.
    #[inline]
    pub fn open_into(
        &self,
        gsk: &[u8; KEY_LEN_16],
        nonce: &[u8; NONCE_LEN_13],
        out: &mut Vec<u8>,
    ) -> Result<(), VerifyError> {
        let cipher = BisCcm::new(GenericArray::from_slice(gsk));

        out.clear();
        out.extend_from_slice(self.ciphertext());

        cipher
            .decrypt_in_place_detached(
                GenericArray::from_slice(nonce),
                &self.aad(),
                out.as_mut_slice(),
                GenericArray::from_slice(self.mic()),
            )
            .map_err(|_| VerifyError::TagMismatch)
    }
}

fn validate_layout(pdu: &[u8], hw_offset: u8) -> Result<(), VerifyError> {
    if hw_offset > MAX_HW_OFFSET {
        return Err(VerifyError::InvalidArgument(format!(
            "hw_offset must be 0 or 1, got {}",
            hw_offset
        )));
    }

    let min_len = PDU_HEADER_LEN + hw_offset as usize + MIC_LEN;
    if pdu.len() < min_len {
        return Err(VerifyError::Malformed(format!(
            "PDU is {} bytes, need at least {}",
            pdu.len(),
            min_len
        )));
    }

    let declared = pdu[1] as usize;
    if declared < MIC_LEN {
        return Err(VerifyError::Malformed(format!(
            "length octet {} is shorter than the MIC",
            declared
        )));
    }

    let payload = pdu.len() - PDU_HEADER_LEN - hw_offset as usize;
    if payload != declared {
        return Err(VerifyError::Malformed(format!(
            "length octet says {} payload bytes, PDU carries {}",
            declared, payload
        )));
    }

    Ok(())
}

/// Decrypt and verify one PDU under `gsk`.
///
/// Returns the plaintext (`pdu[1] - 4` bytes) or `VerifyError::TagMismatch`.
pub fn decrypt_and_verify(
    pdu: &[u8],
    gsk: &[u8; KEY_LEN_16],
    nonce: &[u8; NONCE_LEN_13],
    hw_offset: u8,
) -> Result<Vec<u8>, VerifyError> {
    let pdu = EncryptedPdu::parse(Bytes::copy_from_slice(pdu), hw_offset)?;
    let mut out = Vec::with_capacity(pdu.plaintext_len());
    pdu.open_into(gsk, nonce, &mut out)?;
    Ok(out)
}

/// Seal `plaintext` into a software-layout PDU (hw offset 0).
///
/// The header octet is written as given; only its unmasked bits are
/// authenticated.
pub fn encrypt_pdu(
    header: u8,
    plaintext: &[u8],
    gsk: &[u8; KEY_LEN_16],
    nonce: &[u8; NONCE_LEN_13],
) -> Result<Vec<u8>, VerifyError> {
    let len = plaintext.len() + MIC_LEN;
    if len > u8::MAX as usize {
        return Err(VerifyError::InvalidArgument(format!(
            "plaintext of {} bytes does not fit a BIS PDU",
            plaintext.len()
        )));
    }

    let cipher = BisCcm::new(GenericArray::from_slice(gsk));
    let mut body = plaintext.to_vec();
    let mic = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(nonce), &build_aad(header), &mut body)
        .map_err(|_| VerifyError::InvalidArgument("CCM seal failed".into()))?;

    let mut pdu = Vec::with_capacity(PDU_HEADER_LEN + len);
    pdu.push(header);
    pdu.push(len as u8);
    pdu.extend_from_slice(&body);
    pdu.extend_from_slice(&mic);
    Ok(pdu)
}
