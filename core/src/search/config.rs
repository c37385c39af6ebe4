// ## 📂 File: `src/search/config.rs`

//! Validated search configuration.
//!
//! The CLI (or any embedder) fills a `SearchConfig`; `validate()` runs
//! before any worker starts, so a bad input is a `ConfigError` and never a
//! worker failure.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_BIS_INDEX, DEFAULT_CHECK_INTERVAL, MAX_HW_OFFSET, MAX_NUMERIC_CODE_LEN,
    MAX_PAYLOAD_COUNT,
};
use crate::crypto::{NonceError, VerifyError};
use crate::headers::BigInfoError;

/// Largest BIS index a BIG can carry (5-bit Num_BIS).
pub const MAX_BIS_INDEX: u8 = 31;

/// Where candidates come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SearchMode {
    /// Every `code_len`-byte value, rendered as `2 * code_len` lowercase hex digits.
    Numeric { code_len: u8 },
    /// One candidate per dictionary line.
    Wordlist { path: PathBuf },
}

impl SearchMode {
    pub fn name(&self) -> &'static str {
        match self {
            SearchMode::Numeric { .. } => "numeric",
            SearchMode::Wordlist { .. } => "wordlist",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub mode: SearchMode,
    /// Payload counter of the captured PDU (39 bits).
    pub payload_count: u64,
    /// Requested worker count. The remainder partition may add one more.
    pub num_threads: usize,
    /// Candidates between two looks at the success flag.
    pub check_interval: u64,
    /// Extra octet some radios insert before the payload (0 or 1).
    pub hw_offset: u8,
    pub bis_index: u8,
}

impl SearchConfig {
    pub fn numeric(code_len: u8, payload_count: u64, num_threads: usize) -> Self {
        Self::with_mode(SearchMode::Numeric { code_len }, payload_count, num_threads)
    }

    pub fn wordlist(path: impl Into<PathBuf>, payload_count: u64, num_threads: usize) -> Self {
        Self::with_mode(SearchMode::Wordlist { path: path.into() }, payload_count, num_threads)
    }

    fn with_mode(mode: SearchMode, payload_count: u64, num_threads: usize) -> Self {
        Self {
            mode,
            payload_count,
            num_threads,
            check_interval: DEFAULT_CHECK_INTERVAL,
            hw_offset: 0,
            bis_index: DEFAULT_BIS_INDEX,
        }
    }

    /// One worker per logical CPU.
    pub fn default_threads() -> usize {
        num_cpus::get().max(1)
    }

    pub fn check_interval(mut self, interval: u64) -> Self {
        self.check_interval = interval;
        self
    }

    pub fn hw_offset(mut self, offset: u8) -> Self {
        self.hw_offset = offset;
        self
    }

    pub fn bis_index(mut self, bis: u8) -> Self {
        self.bis_index = bis;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.payload_count == 0 || self.payload_count > MAX_PAYLOAD_COUNT {
            return Err(ConfigError::InvalidPayloadCount { value: self.payload_count });
        }
        if self.num_threads == 0 {
            return Err(ConfigError::InvalidThreads);
        }
        if self.check_interval == 0 {
            return Err(ConfigError::InvalidCheckInterval);
        }
        if self.hw_offset > MAX_HW_OFFSET {
            return Err(ConfigError::InvalidHwOffset { value: self.hw_offset });
        }
        if self.bis_index == 0 || self.bis_index > MAX_BIS_INDEX {
            return Err(ConfigError::InvalidBisIndex { value: self.bis_index });
        }

        match &self.mode {
            SearchMode::Numeric { code_len } => {
                if *code_len == 0 || *code_len > MAX_NUMERIC_CODE_LEN {
                    return Err(ConfigError::InvalidCodeLen { value: *code_len });
                }
            }
            SearchMode::Wordlist { path } => validate_wordlist(path)?,
        }
        Ok(())
    }
}

fn validate_wordlist(path: &Path) -> Result<(), ConfigError> {
    let meta = std::fs::metadata(path).map_err(|e| ConfigError::Wordlist {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    if !meta.is_file() {
        return Err(ConfigError::Wordlist {
            path: path.to_path_buf(),
            reason: "not a regular file".into(),
        });
    }
    Ok(())
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("payload counter must be in 1..=2^39-1, got {value}")]
    InvalidPayloadCount { value: u64 },

    #[error("worker count must be > 0")]
    InvalidThreads,

    #[error("check interval must be > 0")]
    InvalidCheckInterval,

    #[error("hardware offset must be 0 or 1, got {value}")]
    InvalidHwOffset { value: u8 },

    #[error("BIS index must be in 1..=31, got {value}")]
    InvalidBisIndex { value: u8 },

    #[error("numeric code length must be in 1..=7 bytes, got {value}")]
    InvalidCodeLen { value: u8 },

    #[error("wordlist {path}: {reason}")]
    Wordlist { path: PathBuf, reason: String },

    #[error("BIGInfo: {0}")]
    BigInfo(#[from] BigInfoError),

    #[error("PDU: {0}")]
    Pdu(#[from] VerifyError),

    #[error("nonce: {0}")]
    Nonce(#[from] NonceError),
}
