// ## 📂 File: `src/crypto/types.rs`

use thiserror::Error;

use crate::constants::BROADCAST_CODE_LEN;

/// Authentication tag length of BIG PDUs (CCM M = 4).
pub const MIC_LEN: usize = 4;

/// CCM nonce length (CCM L = 2).
pub const NONCE_LEN_13: usize = 13;

/// AES-128 key length.
pub const KEY_LEN_16: usize = 16;

/// PDU header: one header octet plus one length octet.
pub const PDU_HEADER_LEN: usize = 2;

/// Header bits covered by the MIC. CSSN and CSTF are masked out.
pub const AAD_MASK: u8 = 0xC3;

/// A Broadcast Code right-padded with zeros to 16 octets.
///
/// Octet 0 holds the first character of the code as entered by the user.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct BroadcastCode([u8; BROADCAST_CODE_LEN]);

impl BroadcastCode {
    /// Pad a 1..=16 byte candidate. Longer or empty inputs are rejected.
    pub fn from_candidate(candidate: &[u8]) -> Result<Self, KdfError> {
        let mut code = Self::default();
        code.load(candidate)?;
        Ok(code)
    }

    /// Overwrite in place so a worker can reuse one code across candidates.
    #[inline]
    pub fn load(&mut self, candidate: &[u8]) -> Result<(), KdfError> {
        if candidate.is_empty() || candidate.len() > BROADCAST_CODE_LEN {
            return Err(KdfError::InvalidCodeLen { actual: candidate.len() });
        }
        self.0 = [0u8; BROADCAST_CODE_LEN];
        self.0[..candidate.len()].copy_from_slice(candidate);
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8; BROADCAST_CODE_LEN] {
        &self.0
    }

    /// The code in display order (octet 15 first).
    pub fn reversed(&self) -> [u8; BROADCAST_CODE_LEN] {
        let mut out = self.0;
        out.reverse();
        out
    }
}

// Broadcast Codes are secrets; keep them out of accidental debug output.
impl std::fmt::Debug for BroadcastCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BroadcastCode(..)")
    }
}

impl From<[u8; BROADCAST_CODE_LEN]> for BroadcastCode {
    fn from(raw: [u8; BROADCAST_CODE_LEN]) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KdfError {
    /// AES-CMAC could not be keyed.
    #[error("AES-CMAC primitive failed in {stage}")]
    Primitive { stage: &'static str },

    /// Candidate outside 1..=16 octets.
    #[error("broadcast code must be 1..=16 bytes, got {actual}")]
    InvalidCodeLen { actual: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// MIC did not verify. The normal outcome for a wrong candidate.
    #[error("PDU MIC mismatch")]
    TagMismatch,

    /// Caller passed a parameter outside its domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The PDU cannot hold the payload its length octet announces.
    #[error("malformed PDU: {0}")]
    Malformed(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NonceError {
    #[error("payload counter {value} does not fit 39 bits")]
    PayloadCountOverflow { value: u64 },

    #[error("direction must be 0 or 1, got {0}")]
    InvalidDirection(u8),
}
