//! SpikeChunsoft encoder and its run-aware cost model.
//!
//! Matches longer than the seven bytes a match token can hold are split into
//! a match token followed by continue tokens of up to 31 bytes each. Literal
//! gaps are written as run tokens where a byte repeats at least four times
//! and as raw tokens otherwise.

use std::io::Write;

use log::{debug, trace};

use super::{tokens, Encoder, LzSettings, Token};
use crate::config::WINDOW_SPIKE_CHUNSOFT;
use crate::error::Result;
use crate::find::FindLimitations;
use crate::parse::{PriceCalculator, RunState};

/// Lengths 4..=255, displacements 1..=0x1FFF.
pub const SPIKE_CHUNSOFT_LIMITATIONS: FindLimitations = FindLimitations::new(4, 0xFF, 1, WINDOW_SPIKE_CHUNSOFT);

/// Longest match a match token holds on its own.
const MATCH_TOKEN_MAX: usize = 7;
/// Longest extension a continue token holds.
const CONTINUE_MAX: usize = 0x1F;
/// Longest raw block with a one-byte header.
const RAW_SHORT_MAX: usize = 0x1F;
/// Longest raw block.
const RAW_MAX: usize = 0x1FFF;
/// Shortest repeat written as a run token.
const RUN_MIN: usize = 4;
/// Longest run with a one-byte header.
const RUN_SHORT_MAX: usize = 0x0F + RUN_MIN;
/// Longest run.
const RUN_MAX: usize = 0x0FFF + RUN_MIN;

// ─────────────────────────────────────────────────────────────────────────────
// Pricing
// ─────────────────────────────────────────────────────────────────────────────

/// Bit costs of SpikeChunsoft tokens.
///
/// A literal opening a raw block pays for the block header; so does the
/// literal that pushes a block past the one-byte header limit or starts a
/// new block after the longest one. Matches pay for the match token plus
/// one byte per continue token.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpikeChunsoftPriceCalculator;

impl PriceCalculator for SpikeChunsoftPriceCalculator {
    fn literal_price(&self, _position: usize, _value: u8, run: &RunState) -> u32 {
        if !run.in_literal_run() || run.length == RAW_SHORT_MAX || run.length % RAW_MAX == 0 {
            16
        } else {
            8
        }
    }

    fn match_price(&self, _displacement: usize, length: usize, _run: &RunState) -> u32 {
        let continues = length.saturating_sub(MATCH_TOKEN_MAX).div_ceil(CONTINUE_MAX);
        16 + 8 * continues as u32
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Token writers
// ─────────────────────────────────────────────────────────────────────────────

fn write_match(output: &mut dyn Write, displacement: usize, length: usize) -> Result<()> {
    let head = length.min(MATCH_TOKEN_MAX);
    let flag = 0x80 | (((head - 4) as u8) << 5) | (displacement >> 8) as u8;
    output.write_all(&[flag, displacement as u8])?;
    let mut remaining = length - head;
    while remaining > 0 {
        let n = remaining.min(CONTINUE_MAX);
        output.write_all(&[0x60 | n as u8])?;
        remaining -= n;
    }
    Ok(())
}

fn write_raw(output: &mut dyn Write, bytes: &[u8]) -> Result<()> {
    for block in bytes.chunks(RAW_MAX) {
        if block.len() <= RAW_SHORT_MAX {
            output.write_all(&[block.len() as u8])?;
        } else {
            output.write_all(&[0x20 | (block.len() >> 8) as u8, block.len() as u8])?;
        }
        output.write_all(block)?;
    }
    Ok(())
}

fn write_run(output: &mut dyn Write, value: u8, mut length: usize) -> Result<()> {
    while length >= RUN_MIN {
        let n = length.min(RUN_MAX);
        let stored = n - RUN_MIN;
        if n <= RUN_SHORT_MAX {
            output.write_all(&[0x40 | stored as u8, value])?;
        } else {
            output.write_all(&[0x50 | (stored >> 8) as u8, stored as u8, value])?;
        }
        length -= n;
    }
    // A tail too short for a run token.
    if length > 0 {
        write_raw(output, &[value; RUN_MIN][..length])?;
    }
    Ok(())
}

/// Write a literal gap as run and raw tokens.
fn write_literals(output: &mut dyn Write, bytes: &[u8]) -> Result<()> {
    let mut raw_start = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        let value = bytes[i];
        let run = bytes[i..].iter().take_while(|&&b| b == value).count();
        if run >= RUN_MIN {
            write_raw(output, &bytes[raw_start..i])?;
            write_run(output, value, run)?;
            i += run;
            raw_start = i;
        } else {
            i += run;
        }
    }
    write_raw(output, &bytes[raw_start..])
}

// ─────────────────────────────────────────────────────────────────────────────
// SpikeChunsoftEncoder
// ─────────────────────────────────────────────────────────────────────────────

/// Encoder producing headerless data for
/// [`SpikeChunsoftDecoder`](crate::decode::SpikeChunsoftDecoder).
#[derive(Clone, Copy, Debug, Default)]
pub struct SpikeChunsoftEncoder {
    settings: LzSettings,
}

impl SpikeChunsoftEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(mut self, settings: LzSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn limitations(&self) -> FindLimitations {
        SPIKE_CHUNSOFT_LIMITATIONS
    }

    pub fn price_calculator(&self) -> Box<dyn PriceCalculator> {
        Box::new(SpikeChunsoftPriceCalculator)
    }
}

impl Encoder for SpikeChunsoftEncoder {
    fn encode(&self, input: &[u8], output: &mut dyn Write) -> Result<()> {
        let matches = self.settings.parse(
            self.settings.find_options(),
            self.limitations(),
            self.price_calculator(),
            input,
        )?;

        for token in tokens(input, &matches) {
            match token {
                Token::Literals(bytes) => write_literals(output, bytes)?,
                Token::Match(m) => {
                    trace!("spike: match disp={:#x} len={}", m.displacement, m.length);
                    write_match(output, m.displacement, m.length)?;
                }
            }
        }

        debug!("spike: encoded {} bytes as {} matches", input.len(), matches.len());
        Ok(())
    }
}
