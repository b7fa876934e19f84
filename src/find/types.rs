//! Match descriptor, finder limitations and per-session find options.

use std::fmt;
use std::sync::Arc;

use crate::config::{init_task_count, DEFAULT_SEARCH_DEPTH};
use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Match
// ─────────────────────────────────────────────────────────────────────────────

/// One back-reference: `length` bytes at `position` repeat the bytes found
/// `displacement` bytes earlier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Match {
    /// Start of the match in the parsed input.
    pub position: usize,
    /// Distance back from `position` to the source bytes (≥ 1).
    pub displacement: usize,
    /// Number of bytes covered (a multiple of the session unit size).
    pub length: usize,
}

impl Match {
    pub fn new(position: usize, displacement: usize, length: usize) -> Self {
        Match {
            position,
            displacement,
            length,
        }
    }

    /// First position after the match.
    #[inline]
    pub fn end(&self) -> usize {
        self.position + self.length
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Units and direction
// ─────────────────────────────────────────────────────────────────────────────

/// Granularity of positions, lengths and displacements in a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum UnitSize {
    #[default]
    Byte = 1,
    Short = 2,
    Int = 4,
    Long = 8,
}

impl UnitSize {
    #[inline]
    pub fn bytes(self) -> usize {
        self as usize
    }
}

/// Direction the encoder walks the input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchDirection {
    #[default]
    Forward,
    /// The input is reversed before parsing; reported match positions are
    /// offsets into the reversed input.
    Backward,
}

// ─────────────────────────────────────────────────────────────────────────────
// FindLimitations
// ─────────────────────────────────────────────────────────────────────────────

/// Bounds a finder honours for every match it reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FindLimitations {
    pub min_length: usize,
    pub max_length: usize,
    pub min_displacement: usize,
    pub max_displacement: usize,
}

impl FindLimitations {
    pub const fn new(min_length: usize, max_length: usize, min_displacement: usize, max_displacement: usize) -> Self {
        FindLimitations {
            min_length,
            max_length,
            min_displacement,
            max_displacement,
        }
    }

    /// Check the bounds are usable with `unit`.
    pub fn validate(&self, unit: UnitSize) -> Result<()> {
        if self.min_length == 0 || self.min_displacement == 0 {
            return Err(Error::config("match length and displacement minimums must be at least 1"));
        }
        if self.min_length > self.max_length {
            return Err(Error::config(format!(
                "min length {} exceeds max length {}",
                self.min_length, self.max_length
            )));
        }
        if self.min_displacement > self.max_displacement {
            return Err(Error::config(format!(
                "min displacement {} exceeds max displacement {}",
                self.min_displacement, self.max_displacement
            )));
        }
        if self.min_length < unit.bytes() {
            return Err(Error::config(format!(
                "min length {} is shorter than one {:?} unit",
                self.min_length, unit
            )));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// FindOptions
// ─────────────────────────────────────────────────────────────────────────────

/// Hook applied to the input before any other adjustment.
pub type InputTransform = Arc<dyn Fn(&[u8]) -> Vec<u8> + Send + Sync>;

/// Session-wide settings shared by a parser and all of its finders.
///
/// Constructed once per encode call and never changed while parsing.
#[derive(Clone)]
pub struct FindOptions {
    pub unit_size: UnitSize,
    pub direction: SearchDirection,
    /// Zero bytes placed in front of the input; matches may reach into them.
    pub pre_buffer_size: usize,
    /// Units the format stores implicitly after every match.
    pub skip_after_match: usize,
    /// Workers used to collect matches in the optimal parser.
    pub task_count: usize,
    /// Chain links a hash-chain finder follows per position.
    pub search_depth: usize,
    transform: Option<InputTransform>,
}

impl Default for FindOptions {
    fn default() -> Self {
        FindOptions {
            unit_size: UnitSize::Byte,
            direction: SearchDirection::Forward,
            pre_buffer_size: 0,
            skip_after_match: 0,
            task_count: init_task_count(),
            search_depth: DEFAULT_SEARCH_DEPTH,
            transform: None,
        }
    }
}

impl fmt::Debug for FindOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FindOptions")
            .field("unit_size", &self.unit_size)
            .field("direction", &self.direction)
            .field("pre_buffer_size", &self.pre_buffer_size)
            .field("skip_after_match", &self.skip_after_match)
            .field("task_count", &self.task_count)
            .field("search_depth", &self.search_depth)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

impl FindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unit_size(mut self, unit_size: UnitSize) -> Self {
        self.unit_size = unit_size;
        self
    }

    pub fn with_direction(mut self, direction: SearchDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_pre_buffer_size(mut self, size: usize) -> Self {
        self.pre_buffer_size = size;
        self
    }

    pub fn with_skip_after_match(mut self, units: usize) -> Self {
        self.skip_after_match = units;
        self
    }

    pub fn with_task_count(mut self, task_count: usize) -> Self {
        self.task_count = task_count;
        self
    }

    pub fn with_search_depth(mut self, depth: usize) -> Self {
        self.search_depth = depth;
        self
    }

    pub fn with_transform(mut self, transform: InputTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn transform(&self) -> Option<&InputTransform> {
        self.transform.as_ref()
    }

    /// Reject settings no parser can work with.
    pub fn validate(&self) -> Result<()> {
        if self.task_count == 0 {
            return Err(Error::config("task count must be at least 1"));
        }
        if self.search_depth == 0 {
            return Err(Error::config("search depth must be at least 1"));
        }
        Ok(())
    }
}
