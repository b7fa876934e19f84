//! IrLz encoder.

use std::io::Write;

use log::debug;

use super::{tokens, Encoder, FlagTokenPriceCalculator, LzSettings, Token};
use crate::config::WINDOW_4K;
use crate::error::Result;
use crate::find::FindLimitations;
use crate::flags::{BitOrder, FlagBlockWriter};
use crate::parse::PriceCalculator;

/// Lengths 2..=17, displacements 1..=0x1000.
pub const IRLZ_LIMITATIONS: FindLimitations = FindLimitations::new(2, 0x11, 1, WINDOW_4K);

/// Encoder producing headerless IrLz data for [`IrLzDecoder`](crate::decode::IrLzDecoder).
#[derive(Clone, Copy, Debug, Default)]
pub struct IrLzEncoder {
    settings: LzSettings,
}

impl IrLzEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(mut self, settings: LzSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn limitations(&self) -> FindLimitations {
        IRLZ_LIMITATIONS
    }

    pub fn price_calculator(&self) -> Box<dyn PriceCalculator> {
        Box::new(FlagTokenPriceCalculator)
    }
}

impl Encoder for IrLzEncoder {
    fn encode(&self, input: &[u8], output: &mut dyn Write) -> Result<()> {
        let matches = self.settings.parse(
            self.settings.find_options(),
            self.limitations(),
            self.price_calculator(),
            input,
        )?;

        let mut writer = FlagBlockWriter::new(BitOrder::LsbFirst);
        for token in tokens(input, &matches) {
            match token {
                Token::Literals(bytes) => {
                    for &b in bytes {
                        writer.push(output, false, &[b])?;
                    }
                }
                Token::Match(m) => {
                    let disp = m.displacement - 1;
                    let b2 = (((m.length - 2) << 4) | (disp >> 8)) as u8;
                    writer.push(output, true, &[disp as u8, b2])?;
                }
            }
        }
        writer.finish(output)?;

        debug!("irlz: encoded {} bytes as {} matches", input.len(), matches.len());
        Ok(())
    }
}
