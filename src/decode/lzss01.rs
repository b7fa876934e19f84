//! Lzss01 token stream (classic Okumura LZSS layout).
//!
//! Flag bytes are read least significant bit first and a set bit is a
//! literal. Matches address the 4 KiB ring buffer absolutely: `b1` holds the
//! low byte of the ring position, the high nibble of `b2` its upper bits and
//! the low nibble of `b2` the length minus 3. The ring starts zero-filled
//! with the write cursor at `0xFEE`, so early matches may read those zeros.

use std::io::{Read, Write};

use super::flagged::{decode_flagged, FlagFormat};
use super::Decoder;
use crate::config::{LZSS01_PRE_BUFFER_SIZE, WINDOW_4K};
use crate::error::Result;
use crate::flags::BitOrder;
use crate::history::HistoryBuffer;

const FORMAT: FlagFormat = FlagFormat {
    name: "lzss01",
    order: BitOrder::LsbFirst,
    match_bit: false,
};

/// Decoder for headerless Lzss01 data.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lzss01Decoder;

impl Lzss01Decoder {
    pub fn new() -> Self {
        Lzss01Decoder
    }
}

/// Displacement from the write cursor back to absolute ring position `pos`.
#[inline]
fn ring_displacement(cursor: usize, pos: usize) -> usize {
    match (cursor + WINDOW_4K - pos) % WINDOW_4K {
        0 => WINDOW_4K,
        d => d,
    }
}

impl Decoder for Lzss01Decoder {
    fn decode(&self, input: &mut dyn Read, output: &mut dyn Write, decompressed_size: Option<usize>) -> Result<()> {
        decode_flagged(
            &FORMAT,
            HistoryBuffer::prefilled(WINDOW_4K, LZSS01_PRE_BUFFER_SIZE),
            input,
            output,
            decompressed_size,
            |b1, b2, history| {
                let pos = b1 as usize | (((b2 & 0xF0) as usize) << 4);
                let length = (b2 & 0x0F) as usize + 3;
                (ring_displacement(history.cursor(), pos), length)
            },
        )
    }
}
