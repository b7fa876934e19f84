//! Hash-chain match finder over the whole session buffer.
//!
//! `pre_process` threads every unit-aligned position onto a chain of earlier
//! positions sharing the hash of its first bytes. A query walks that chain
//! from the nearest candidate outwards, so candidates are visited in order of
//! increasing displacement and the walk stops at the first one beyond
//! `max_displacement`.
//!
//! The chain only links positions strictly before the queried one, which
//! keeps queries read-only and independent of each other. Positions are
//! stored as `usize`, so buffers of any addressable length are indexed in
//! full.

use log::debug;

use super::finder::MatchFinder;
use super::types::{FindLimitations, FindOptions, Match, UnitSize};
use crate::config::HASH_LOG;
use crate::error::Result;

// ─────────────────────────────────────────────────────────────────────────────
// Hashing
// ─────────────────────────────────────────────────────────────────────────────

/// Chain terminator. No slice index reaches it.
const NO_POSITION: usize = usize::MAX;

/// Most bytes folded into a hash.
const MAX_HASH_BYTES: usize = 4;

const HASH_TABLE_SIZE: usize = 1 << HASH_LOG;

/// Knuth multiplicative hash of the first `len` (≤ 4) bytes of `bytes`.
#[inline(always)]
fn hash_bytes(bytes: &[u8], len: usize) -> usize {
    let mut value: u32 = 0;
    for &b in &bytes[..len] {
        value = (value << 8) | b as u32;
    }
    (value.wrapping_mul(2_654_435_761u32) >> (32 - HASH_LOG)) as usize
}

// ─────────────────────────────────────────────────────────────────────────────
// HistoryMatchFinder
// ─────────────────────────────────────────────────────────────────────────────

/// Finds back-references by walking hash chains of previous positions.
#[derive(Debug, Clone)]
pub struct HistoryMatchFinder {
    limitations: FindLimitations,
    unit_size: UnitSize,
    search_depth: usize,
    hash_len: usize,
    /// `chain[p / unit]` holds the previous position with the same hash as `p`.
    chain: Vec<usize>,
}

impl HistoryMatchFinder {
    /// Finder for `limitations`, taking the unit size and search depth from
    /// the session's `options`.
    pub fn new(limitations: FindLimitations, options: &FindOptions) -> Result<Self> {
        limitations.validate(options.unit_size)?;
        options.validate()?;
        Ok(HistoryMatchFinder {
            limitations,
            unit_size: options.unit_size,
            search_depth: options.search_depth,
            hash_len: limitations.min_length.min(MAX_HASH_BYTES),
            chain: Vec::new(),
        })
    }

    /// Length of the common run of `buffer[candidate..]` and
    /// `buffer[position..]`, capped at `max_len`. The two ranges may overlap.
    #[inline]
    fn common_length(buffer: &[u8], candidate: usize, position: usize, max_len: usize) -> usize {
        buffer[candidate..]
            .iter()
            .zip(&buffer[position..position + max_len])
            .take_while(|(a, b)| a == b)
            .count()
    }
}

impl MatchFinder for HistoryMatchFinder {
    fn limitations(&self) -> &FindLimitations {
        &self.limitations
    }

    fn unit_size(&self) -> UnitSize {
        self.unit_size
    }

    fn pre_process(&mut self, buffer: &[u8]) {
        let unit = self.unit_size.bytes();
        let slots = buffer.len() / unit + 1;
        self.chain = vec![NO_POSITION; slots];

        let mut head = vec![NO_POSITION; HASH_TABLE_SIZE];
        let mut position = 0usize;
        while position + self.hash_len <= buffer.len() {
            let h = hash_bytes(&buffer[position..], self.hash_len);
            self.chain[position / unit] = head[h];
            head[h] = position;
            position += unit;
        }

        debug!(
            "history finder indexed {} positions (hash {} bytes, unit {})",
            position / unit,
            self.hash_len,
            unit
        );
    }

    fn find_matches_at_position(&self, buffer: &[u8], position: usize) -> Vec<Match> {
        let unit = self.unit_size.bytes();
        let limits = &self.limitations;
        let mut matches = Vec::new();

        if position >= buffer.len() || position % unit != 0 {
            return matches;
        }
        let mut max_len = limits.max_length.min(buffer.len() - position);
        max_len -= max_len % unit;
        if max_len < limits.min_length {
            return matches;
        }

        let mut best = limits.min_length - 1;
        let mut candidate = self.chain.get(position / unit).copied().unwrap_or(NO_POSITION);
        let mut depth = 0usize;

        while candidate != NO_POSITION && depth < self.search_depth {
            let displacement = position - candidate;
            if displacement > limits.max_displacement {
                break;
            }
            if displacement >= limits.min_displacement {
                let mut length = Self::common_length(buffer, candidate, position, max_len);
                length -= length % unit;
                if length > best {
                    best = length;
                    matches.push(Match::new(position, displacement, length));
                    if length == max_len {
                        break;
                    }
                }
            }
            candidate = self.chain[candidate / unit];
            depth += 1;
        }

        matches
    }
}
