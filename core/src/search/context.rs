// ## 📂 File: `src/search/context.rs`

//! Read-only session material shared by every worker.
//!
//! Built once before the search: BIGInfo decode, PDU layout check, IV and
//! nonce. Workers hold it behind an `Arc` and never write to it.

use bytes::Bytes;
use tracing::{debug, warn};

use crate::constants::{lens, BIS_DIRECTION};
use crate::crypto::{compute_iv, compute_nonce, payload_count_bytes, EncryptedPdu};
use crate::headers::{decode_big_info, BigInfo, BIG_INFO_LEN};
use crate::search::config::{ConfigError, SearchConfig, SearchMode};
use crate::utils::hex_lower;

#[derive(Debug, Clone)]
pub struct SearchContext {
    pub mode: SearchMode,
    pub pdu: EncryptedPdu,
    pub big_info: BigInfo,
    pub gskd: [u8; lens::GSKD],
    pub iv: [u8; lens::IV],
    pub nonce: [u8; lens::NONCE],
    pub check_interval: u64,
}

impl SearchContext {
    /// Validate `config` and derive the per-session values.
    pub fn build(
        config: &SearchConfig,
        pdu: impl Into<Bytes>,
        big_info: &[u8],
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        if big_info.len() > BIG_INFO_LEN {
            warn!(len = big_info.len(), "BIGInfo longer than {} bytes, trailing bytes ignored", BIG_INFO_LEN);
        }
        let big_info = decode_big_info(big_info)?;
        let pdu = EncryptedPdu::parse(pdu, config.hw_offset)?;

        let iv = compute_iv(&big_info.giv, &big_info.seed_access_addr, config.bis_index);
        let count = payload_count_bytes(config.payload_count)?;
        let nonce = compute_nonce(&count, &iv, BIS_DIRECTION)?;

        debug!(
            gskd = %hex_lower(&big_info.gskd),
            iv = %hex_lower(&iv),
            nonce = %hex_lower(&nonce),
            plaintext_len = pdu.plaintext_len(),
            "search context ready"
        );

        Ok(Self {
            mode: config.mode.clone(),
            pdu,
            gskd: big_info.gskd,
            iv,
            nonce,
            big_info,
            check_interval: config.check_interval,
        })
    }
}
