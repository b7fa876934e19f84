//! LZ10 encoder.

use std::io::Write;

use log::debug;

use super::{tokens, Encoder, FlagTokenPriceCalculator, LzSettings, Token};
use crate::config::WINDOW_4K;
use crate::error::Result;
use crate::find::FindLimitations;
use crate::flags::{BitOrder, FlagBlockWriter};
use crate::parse::PriceCalculator;

/// Lengths 3..=18, displacements 1..=0x1000.
pub const LZ10_LIMITATIONS: FindLimitations = FindLimitations::new(3, 0x12, 1, WINDOW_4K);

/// Encoder producing headerless LZ10 data for [`Lz10Decoder`](crate::decode::Lz10Decoder).
#[derive(Clone, Copy, Debug, Default)]
pub struct Lz10Encoder {
    settings: LzSettings,
}

impl Lz10Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(mut self, settings: LzSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn limitations(&self) -> FindLimitations {
        LZ10_LIMITATIONS
    }

    pub fn price_calculator(&self) -> Box<dyn PriceCalculator> {
        Box::new(FlagTokenPriceCalculator)
    }
}

impl Encoder for Lz10Encoder {
    fn encode(&self, input: &[u8], output: &mut dyn Write) -> Result<()> {
        let matches = self.settings.parse(
            self.settings.find_options(),
            self.limitations(),
            self.price_calculator(),
            input,
        )?;

        let mut writer = FlagBlockWriter::new(BitOrder::MsbFirst);
        for token in tokens(input, &matches) {
            match token {
                Token::Literals(bytes) => {
                    for &b in bytes {
                        writer.push(output, false, &[b])?;
                    }
                }
                Token::Match(m) => {
                    let disp = m.displacement - 1;
                    let b1 = (((m.length - 3) << 4) | (disp >> 8)) as u8;
                    writer.push(output, true, &[b1, disp as u8])?;
                }
            }
        }
        writer.finish(output)?;

        debug!("lz10: encoded {} bytes as {} matches", input.len(), matches.len());
        Ok(())
    }
}
