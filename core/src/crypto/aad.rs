// ## 📂 File: `src/crypto/aad.rs`

use crate::crypto::types::AAD_MASK;

/// AAD of a BIS PDU: the header octet with CSSN and CSTF cleared.
///
/// Those two control bits may change in flight, so the MIC does not cover
/// them. The length octet is not part of the AAD either.
#[inline]
pub fn build_aad(header: u8) -> [u8; 1] {
    [header & AAD_MASK]
}
