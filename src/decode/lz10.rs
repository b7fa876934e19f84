//! Nintendo LZ10 token stream.
//!
//! Flag bytes are read most significant bit first; a set bit is a match of
//! two bytes `LD DD`: length `L + 3`, displacement `0xDDD + 1`.

use std::io::{Read, Write};

use super::flagged::{decode_flagged, FlagFormat};
use super::Decoder;
use crate::config::WINDOW_4K;
use crate::error::Result;
use crate::flags::BitOrder;
use crate::history::HistoryBuffer;

const FORMAT: FlagFormat = FlagFormat {
    name: "lz10",
    order: BitOrder::MsbFirst,
    match_bit: true,
};

/// Decoder for headerless LZ10 data.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lz10Decoder;

impl Lz10Decoder {
    pub fn new() -> Self {
        Lz10Decoder
    }
}

impl Decoder for Lz10Decoder {
    fn decode(&self, input: &mut dyn Read, output: &mut dyn Write, decompressed_size: Option<usize>) -> Result<()> {
        decode_flagged(
            &FORMAT,
            HistoryBuffer::new(WINDOW_4K),
            input,
            output,
            decompressed_size,
            |b1, b2, _| {
                let length = (b1 >> 4) as usize + 3;
                let displacement = ((((b1 & 0x0F) as usize) << 8) | b2 as usize) + 1;
                (displacement, length)
            },
        )
    }
}
