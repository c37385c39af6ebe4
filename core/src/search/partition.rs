// ## 📂 File: `src/search/partition.rs`

//! Splits a candidate space into per-worker ranges.
//!
//! Layout for `total` units over `n` workers (n clamped to `total`):
//! - `n` equal chunks of `total / n`, then one remainder partition when
//!   `total % n != 0`. The run can therefore use `n + 1` workers.
//! - Bounds are inclusive. Together the partitions cover `[0, total)`
//!   exactly once, with no gaps and no overlaps.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub worker_id: usize,
    pub start: u64,
    /// Inclusive.
    pub end: u64,
}

impl Partition {
    /// Units covered. Never zero.
    pub fn span(&self) -> u64 {
        self.end - self.start + 1
    }

    pub fn contains(&self, pos: u64) -> bool {
        (self.start..=self.end).contains(&pos)
    }
}

pub fn partition_space(total: u64, num_threads: usize) -> Vec<Partition> {
    if total == 0 || num_threads == 0 {
        return Vec::new();
    }

    let n = (num_threads as u64).min(total);
    let chunk = total / n;
    let remainder = total % n;

    let mut parts = Vec::with_capacity(n as usize + usize::from(remainder > 0));
    for i in 0..n {
        let start = i * chunk;
        parts.push(Partition { worker_id: i as usize, start, end: start + chunk - 1 });
    }
    if remainder > 0 {
        parts.push(Partition { worker_id: n as usize, start: n * chunk, end: total - 1 });
    }
    parts
}
