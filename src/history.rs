//! Circular history window used by every LZ decoder.
//!
//! The buffer keeps the last `capacity` bytes of decoded output. Back-references
//! are replayed one byte at a time, and each copied byte is written back into
//! the window before the next one is read, so a copy whose source overlaps the
//! bytes it produces repeats them: a distance-1 copy of length `L` repeats
//! the last byte `L` times.

use std::io::Write;

use crate::error::{Error, Result};

/// Bytes staged before each flush to the caller's writer during a copy.
const COPY_CHUNK: usize = 256;

/// Fixed-capacity sliding window of previously produced bytes.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    data: Vec<u8>,
    cursor: usize,
    /// Bytes a back-reference may reach, saturating at `data.len()`.
    available: usize,
    /// Total bytes written through the buffer, for error reporting.
    produced: u64,
}

impl HistoryBuffer {
    /// Empty window: no byte may be referenced until it has been written.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be non-zero");
        HistoryBuffer {
            data: vec![0; capacity],
            cursor: 0,
            available: 0,
            produced: 0,
        }
    }

    /// Zero-filled window whose whole capacity is addressable from the start,
    /// with the write cursor seeded at `cursor`.
    ///
    /// Formats that pre-seed their ring buffer (Lzss01) may reference any slot
    /// of the window, including ones that were never written.
    pub fn prefilled(capacity: usize, cursor: usize) -> Self {
        assert!(capacity > 0, "history capacity must be non-zero");
        HistoryBuffer {
            data: vec![0; capacity],
            cursor: cursor % capacity,
            available: capacity,
            produced: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Current write position inside the window.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Largest displacement a copy may currently use.
    #[inline]
    pub fn available(&self) -> usize {
        self.available
    }

    /// Bytes written since the buffer was created.
    #[inline]
    pub fn produced(&self) -> u64 {
        self.produced
    }

    /// Append one byte, overwriting the oldest one when the window is full.
    #[inline]
    pub fn write_byte(&mut self, value: u8) {
        self.data[self.cursor] = value;
        self.cursor += 1;
        if self.cursor == self.data.len() {
            self.cursor = 0;
        }
        if self.available < self.data.len() {
            self.available += 1;
        }
        self.produced += 1;
    }

    /// Byte `displacement` positions behind the cursor. The caller checks the
    /// displacement against [`available`](Self::available).
    #[inline]
    fn byte_behind(&self, displacement: usize) -> u8 {
        let capacity = self.data.len();
        self.data[(self.cursor + capacity - displacement) % capacity]
    }

    /// Check that `displacement` addresses produced history.
    pub fn check_displacement(&self, displacement: usize) -> Result<()> {
        if displacement == 0 || displacement > self.available {
            return Err(Error::InvalidDisplacement {
                position: self.produced,
                displacement,
                available: self.available,
            });
        }
        Ok(())
    }

    /// Copy `length` bytes starting `displacement` bytes behind the cursor to
    /// `output`, feeding each byte back into the window as it goes.
    pub fn copy(&mut self, output: &mut dyn Write, displacement: usize, length: usize) -> Result<()> {
        self.check_displacement(displacement)?;

        let mut chunk = [0u8; COPY_CHUNK];
        let mut remaining = length;
        while remaining > 0 {
            let n = remaining.min(COPY_CHUNK);
            for slot in chunk.iter_mut().take(n) {
                let value = self.byte_behind(displacement);
                self.write_byte(value);
                *slot = value;
            }
            output.write_all(&chunk[..n])?;
            remaining -= n;
        }
        Ok(())
    }

    /// Write `value` to both the window and `output`.
    pub fn emit(&mut self, output: &mut dyn Write, value: u8) -> Result<()> {
        self.write_byte(value);
        output.write_all(&[value])?;
        Ok(())
    }
}
