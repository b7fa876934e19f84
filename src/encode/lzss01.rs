//! Lzss01 encoder.
//!
//! The parse runs over the input preceded by `0xFEE` zero bytes, the part of
//! the decoder's ring buffer in front of its initial cursor, so matches can
//! start out by copying zeros. Match references are written as absolute ring
//! positions.

use std::io::Write;

use log::debug;

use super::{tokens, Encoder, FlagTokenPriceCalculator, LzSettings, Token};
use crate::config::{LZSS01_PRE_BUFFER_SIZE, WINDOW_4K};
use crate::error::Result;
use crate::find::FindLimitations;
use crate::flags::{BitOrder, FlagBlockWriter};
use crate::parse::PriceCalculator;

/// Lengths 3..=18, displacements 1..=0x1000.
pub const LZSS01_LIMITATIONS: FindLimitations = FindLimitations::new(3, 0x12, 1, WINDOW_4K);

/// Encoder producing headerless Lzss01 data for [`Lzss01Decoder`](crate::decode::Lzss01Decoder).
#[derive(Clone, Copy, Debug, Default)]
pub struct Lzss01Encoder {
    settings: LzSettings,
}

impl Lzss01Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(mut self, settings: LzSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn limitations(&self) -> FindLimitations {
        LZSS01_LIMITATIONS
    }

    pub fn price_calculator(&self) -> Box<dyn PriceCalculator> {
        Box::new(FlagTokenPriceCalculator)
    }
}

/// Ring position of the source of a match at input `position`.
#[inline]
fn ring_position(position: usize, displacement: usize) -> usize {
    (LZSS01_PRE_BUFFER_SIZE + position + WINDOW_4K - displacement) & (WINDOW_4K - 1)
}

impl Encoder for Lzss01Encoder {
    fn encode(&self, input: &[u8], output: &mut dyn Write) -> Result<()> {
        let options = self.settings.find_options().with_pre_buffer_size(LZSS01_PRE_BUFFER_SIZE);
        let matches = self
            .settings
            .parse(options, self.limitations(), self.price_calculator(), input)?;

        let mut writer = FlagBlockWriter::new(BitOrder::LsbFirst);
        for token in tokens(input, &matches) {
            match token {
                Token::Literals(bytes) => {
                    for &b in bytes {
                        writer.push(output, true, &[b])?;
                    }
                }
                Token::Match(m) => {
                    let pos = ring_position(m.position, m.displacement);
                    let b2 = (((pos >> 4) & 0xF0) | (m.length - 3)) as u8;
                    writer.push(output, false, &[pos as u8, b2])?;
                }
            }
        }
        writer.finish(output)?;

        debug!("lzss01: encoded {} bytes as {} matches", input.len(), matches.len());
        Ok(())
    }
}
