// ## 📂 File: `src/search/candidate.rs`

//! Candidate generators for one worker partition.
//!
//! Design:
//! - A source writes each candidate into a caller-owned buffer; the hot loop
//!   never allocates per candidate.
//! - Numeric: index `i` in the partition becomes `2 * code_len` lowercase hex
//!   digits, zero padded (`code_len = 2`, `i = 0x00ab` gives `"00ab"`).
//! - Wordlist: the partition is a byte range of the file. A line belongs to
//!   the partition holding its first byte, so every line is read by exactly
//!   one worker, whatever the chunk boundaries.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::constants::BROADCAST_CODE_LEN;
use crate::search::partition::Partition;
use crate::types::ResourceError;
use crate::utils::strip_line_terminator;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Result of one pull from a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    /// `buf` holds a usable candidate.
    Candidate,
    /// Consumed input that cannot be a Broadcast Code.
    Skip,
    /// Partition exhausted.
    Done,
}

pub trait CandidateSource {
    fn next_into(&mut self, buf: &mut Vec<u8>) -> Result<Next, ResourceError>;

    /// Units of the partition consumed so far (indices or bytes).
    fn progress(&self) -> u64;

    /// Input bytes read from disk, alignment included.
    fn bytes_read(&self) -> u64 {
        0
    }
}

// ------------------------------------------------------------
// Numeric
// ------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct NumericSource {
    next: u64,
    end: u64,
    start: u64,
    digits: usize,
    done: bool,
}

impl NumericSource {
    pub fn new(partition: &Partition, code_len: u8) -> Self {
        Self {
            next: partition.start,
            end: partition.end,
            start: partition.start,
            digits: 2 * code_len as usize,
            done: false,
        }
    }
}

/// Render `value` as exactly `digits` lowercase hex digits into `buf`.
pub fn format_numeric(value: u64, digits: usize, buf: &mut Vec<u8>) {
    buf.clear();
    for k in (0..digits).rev() {
        buf.push(HEX_DIGITS[((value >> (4 * k)) & 0xf) as usize]);
    }
}

impl CandidateSource for NumericSource {
    fn next_into(&mut self, buf: &mut Vec<u8>) -> Result<Next, ResourceError> {
        if self.done {
            return Ok(Next::Done);
        }
        format_numeric(self.next, self.digits, buf);
        // Stop on equality so `end == u64::MAX` cannot overflow.
        if self.next == self.end {
            self.done = true;
        } else {
            self.next += 1;
        }
        Ok(Next::Candidate)
    }

    fn progress(&self) -> u64 {
        if self.done {
            self.end - self.start + 1
        } else {
            self.next - self.start
        }
    }
}

// ------------------------------------------------------------
// Wordlist
// ------------------------------------------------------------

#[derive(Debug)]
pub struct WordlistSource {
    reader: BufReader<File>,
    path: PathBuf,
    start: u64,
    end: u64,
    /// Absolute offset of the next unread line.
    pos: u64,
    read: u64,
}

impl WordlistSource {
    /// Open `path` positioned at the first line starting inside `partition`.
    pub fn open(path: &Path, partition: &Partition) -> Result<Self, ResourceError> {
        let file = File::open(path)
            .map_err(|source| ResourceError::Open { path: path.to_path_buf(), source })?;
        let mut reader = BufReader::new(file);

        let mut pos = partition.start;
        let mut read = 0;
        if partition.start > 0 {
            // Look at the byte before our range: if it ends a line we own the
            // line at `start`, otherwise that line belongs to our neighbour.
            let back = partition.start - 1;
            reader
                .seek(SeekFrom::Start(back))
                .map_err(|source| ResourceError::Seek { path: path.to_path_buf(), offset: back, source })?;
            let mut discard = Vec::new();
            let n = reader
                .read_until(b'\n', &mut discard)
                .map_err(|source| ResourceError::Read { path: path.to_path_buf(), source })?;
            pos = back + n as u64;
            read = n as u64;
        }

        Ok(Self {
            reader,
            path: path.to_path_buf(),
            start: partition.start,
            end: partition.end,
            pos,
            read,
        })
    }
}

impl CandidateSource for WordlistSource {
    fn next_into(&mut self, buf: &mut Vec<u8>) -> Result<Next, ResourceError> {
        if self.pos > self.end {
            return Ok(Next::Done);
        }

        buf.clear();
        let n = self
            .reader
            .read_until(b'\n', buf)
            .map_err(|source| ResourceError::Read { path: self.path.clone(), source })?;
        if n == 0 {
            return Ok(Next::Done);
        }
        self.pos += n as u64;
        self.read += n as u64;

        let len = strip_line_terminator(buf).len();
        buf.truncate(len);
        if buf.is_empty() || buf.len() > BROADCAST_CODE_LEN {
            return Ok(Next::Skip);
        }
        Ok(Next::Candidate)
    }

    fn progress(&self) -> u64 {
        self.pos.saturating_sub(self.start).min(self.end - self.start + 1)
    }

    fn bytes_read(&self) -> u64 {
        self.read
    }
}
