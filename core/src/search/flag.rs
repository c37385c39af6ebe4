// ## 📂 File: `src/search/flag.rs`

//! Shared stop signalling between workers.
//!
//! - `SuccessFlag` is set exactly once, by the first worker whose candidate
//!   verifies. It is an explicit handle so tests can pre-set it.
//! - `StopSignal` adds the abort flag raised on a broken KDF primitive.
//! - Workers read both at their check interval, never per candidate.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct SuccessFlag(Arc<AtomicBool>);

impl SuccessFlag {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Set the flag. Returns true only for the caller that flipped it.
    #[inline]
    pub fn try_claim(&self) -> bool {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    found: SuccessFlag,
    abort: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new(found: SuccessFlag) -> Self {
        Self { found, abort: Arc::new(AtomicBool::new(false)) }
    }

    pub fn found(&self) -> &SuccessFlag {
        &self.found
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.found.is_set() || self.abort.load(Ordering::Acquire)
    }

    pub fn abort(&self) {
        self.abort.store(true, Ordering::Release);
    }

    pub fn is_aborted(&self) -> bool {
        self.abort.load(Ordering::Acquire)
    }
}
