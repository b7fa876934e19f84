//! IrLz token stream.
//!
//! Flag bytes are read least significant bit first; a set bit is a match of
//! two bytes `DD LD`: length `L + 2`, displacement `0xDDD + 1` with the high
//! nibble in the second byte.

use std::io::{Read, Write};

use super::flagged::{decode_flagged, FlagFormat};
use super::Decoder;
use crate::config::WINDOW_4K;
use crate::error::Result;
use crate::flags::BitOrder;
use crate::history::HistoryBuffer;

const FORMAT: FlagFormat = FlagFormat {
    name: "irlz",
    order: BitOrder::LsbFirst,
    match_bit: true,
};

/// Decoder for headerless IrLz data.
#[derive(Clone, Copy, Debug, Default)]
pub struct IrLzDecoder;

impl IrLzDecoder {
    pub fn new() -> Self {
        IrLzDecoder
    }
}

impl Decoder for IrLzDecoder {
    fn decode(&self, input: &mut dyn Read, output: &mut dyn Write, decompressed_size: Option<usize>) -> Result<()> {
        decode_flagged(
            &FORMAT,
            HistoryBuffer::new(WINDOW_4K),
            input,
            output,
            decompressed_size,
            |b1, b2, _| {
                let length = (b2 >> 4) as usize + 2;
                let displacement = ((((b2 & 0x0F) as usize) << 8) | b1 as usize) + 1;
                (displacement, length)
            },
        )
    }
}
