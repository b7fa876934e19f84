//! Flag bytes shared by the flag-driven LZ formats.
//!
//! Lz10, IrLz and Lzss01 interleave one flag byte with up to eight tokens.
//! Each flag bit tells the decoder what the next token is; formats differ in
//! the order the bits are consumed and in what a set bit means.

use std::io::Write;

use crate::error::Result;

/// Order in which the eight bits of a flag byte are consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitOrder {
    /// Bit 7 first.
    MsbFirst,
    /// Bit 0 first.
    LsbFirst,
}

impl BitOrder {
    /// Mask of the `index`-th bit consumed (0..8).
    #[inline(always)]
    fn mask(self, index: u8) -> u8 {
        match self {
            BitOrder::MsbFirst => 0x80 >> index,
            BitOrder::LsbFirst => 1 << index,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// FlagReader
// ─────────────────────────────────────────────────────────────────────────────

/// Hands out the bits of the current flag byte one by one.
#[derive(Clone, Copy, Debug)]
pub struct FlagReader {
    order: BitOrder,
    byte: u8,
    consumed: u8,
}

impl FlagReader {
    /// Reader with no flag byte loaded.
    pub fn new(order: BitOrder) -> Self {
        FlagReader {
            order,
            byte: 0,
            consumed: 8,
        }
    }

    /// All bits of the current byte have been used.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.consumed == 8
    }

    /// Load a fresh flag byte.
    #[inline]
    pub fn load(&mut self, byte: u8) {
        self.byte = byte;
        self.consumed = 0;
    }

    /// Next bit of the loaded byte. Must not be called when [`is_empty`](Self::is_empty).
    #[inline]
    pub fn next_bit(&mut self) -> bool {
        debug_assert!(!self.is_empty());
        let bit = self.byte & self.order.mask(self.consumed) != 0;
        self.consumed += 1;
        bit
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// FlagBlockWriter
// ─────────────────────────────────────────────────────────────────────────────

/// Groups tokens into blocks of one flag byte followed by up to eight token
/// bodies.
#[derive(Debug)]
pub struct FlagBlockWriter {
    order: BitOrder,
    flags: u8,
    count: u8,
    body: Vec<u8>,
}

impl FlagBlockWriter {
    pub fn new(order: BitOrder) -> Self {
        FlagBlockWriter {
            order,
            flags: 0,
            count: 0,
            body: Vec::with_capacity(16),
        }
    }

    /// Append one token with flag bit `set`, flushing the block to `output`
    /// once it holds eight tokens.
    pub fn push(&mut self, output: &mut dyn Write, set: bool, token: &[u8]) -> Result<()> {
        if set {
            self.flags |= self.order.mask(self.count);
        }
        self.body.extend_from_slice(token);
        self.count += 1;
        if self.count == 8 {
            self.flush(output)?;
        }
        Ok(())
    }

    /// Write the pending partial block; unused flag bits stay clear.
    pub fn finish(mut self, output: &mut dyn Write) -> Result<()> {
        if self.count > 0 {
            self.flush(output)?;
        }
        Ok(())
    }

    fn flush(&mut self, output: &mut dyn Write) -> Result<()> {
        output.write_all(&[self.flags])?;
        output.write_all(&self.body)?;
        self.flags = 0;
        self.count = 0;
        self.body.clear();
        Ok(())
    }
}
