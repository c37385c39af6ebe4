//! bigcrack-core
//!
//! Broadcast Code recovery for encrypted LE Audio BIGs.
//! Pure Rust: BIG key derivation, AES-CCM PDU verification and a
//! partitioned multi-threaded candidate search. No FFI.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

pub mod headers;
pub mod crypto;
pub mod telemetry;
pub mod capture;

// Search layer
pub mod search;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::crypto::{
        decrypt_and_verify, derive_gsk, encrypt_pdu, BroadcastCode, EncryptedPdu, KdfError,
        VerifyError,
    };
    pub use crate::capture::{forge_capture, CaptureSpec, ForgedCapture};
    pub use crate::headers::{decode_big_info, encode_big_info, BigInfo, BigInfoError};
    pub use crate::search::{
        NoopObserver, ProgressObserver, Recovery, SearchConfig, SearchEngine, SearchEvent,
        SearchMode, SearchOutcome, SearchReport, SuccessFlag,
    };
    pub use crate::telemetry::SearchSnapshot;
    pub use crate::types::{SearchError, ResourceError};
}
