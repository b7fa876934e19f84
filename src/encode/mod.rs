//! Encoders for the headerless formats.
//!
//! The LZ encoders run one [`HistoryMatchFinder`] under a greedy or optimal
//! parser (see [`LzSettings`]) and serialise the resulting token sequence in
//! their format's flag and token layout. Huffman and RLE are standalone.
//!
//! No encoder writes a size header; the caller keeps the input length and
//! hands it to the decoder when the format needs it.

pub mod huffman;
pub mod irlz;
pub mod lz10;
pub mod lzss01;
pub mod rle;
pub mod spike_chunsoft;

pub use huffman::HuffmanEncoder;
pub use irlz::IrLzEncoder;
pub use lz10::Lz10Encoder;
pub use lzss01::Lzss01Encoder;
pub use rle::RleEncoder;
pub use spike_chunsoft::{SpikeChunsoftEncoder, SpikeChunsoftPriceCalculator};

use std::io::Write;

use log::debug;

use crate::config::DEFAULT_SEARCH_DEPTH;
use crate::error::Result;
use crate::find::{FindLimitations, FindOptions, HistoryMatchFinder, Match, MatchFinder};
use crate::parse::{GreedyParser, OptimalParser, Parser, PriceCalculator, RunState};

/// A format-specific encoder.
pub trait Encoder {
    /// Encode all of `input` into `output`.
    fn encode(&self, input: &[u8], output: &mut dyn Write) -> Result<()>;
}

/// Encode an in-memory buffer into a fresh vector.
pub fn encode_to_vec(encoder: &dyn Encoder, bytes: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(bytes.len() / 2 + 16);
    encoder.encode(bytes, &mut output)?;
    Ok(output)
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing settings
// ─────────────────────────────────────────────────────────────────────────────

/// Token-selection strategy of an LZ encoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParseStrategy {
    Greedy,
    #[default]
    Optimal,
}

/// Parsing knobs shared by the LZ encoders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LzSettings {
    pub strategy: ParseStrategy,
    /// Match-collection workers; `None` uses the process default.
    pub task_count: Option<usize>,
    pub search_depth: usize,
}

impl Default for LzSettings {
    fn default() -> Self {
        LzSettings {
            strategy: ParseStrategy::Optimal,
            task_count: None,
            search_depth: DEFAULT_SEARCH_DEPTH,
        }
    }
}

impl LzSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: ParseStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_task_count(mut self, task_count: usize) -> Self {
        self.task_count = Some(task_count);
        self
    }

    pub fn with_search_depth(mut self, depth: usize) -> Self {
        self.search_depth = depth;
        self
    }

    /// Session options for a byte-unit parse.
    pub(crate) fn find_options(&self) -> FindOptions {
        let options = FindOptions::new().with_search_depth(self.search_depth);
        match self.task_count {
            Some(n) => options.with_task_count(n),
            None => options,
        }
    }

    /// Parse `input` with a single hash-chain finder bounded by `limitations`.
    pub(crate) fn parse(
        &self,
        options: FindOptions,
        limitations: FindLimitations,
        calculator: Box<dyn PriceCalculator>,
        input: &[u8],
    ) -> Result<Vec<Match>> {
        let finder = HistoryMatchFinder::new(limitations, &options)?;
        let finders: Vec<Box<dyn MatchFinder>> = vec![Box::new(finder)];
        let matches = match self.strategy {
            ParseStrategy::Greedy => GreedyParser::new(options, finders)?.parse_matches(input)?,
            ParseStrategy::Optimal => OptimalParser::new(options, finders, calculator)?.parse_matches(input)?,
        };
        debug!("{:?} parse of {} bytes: {} matches", self.strategy, input.len(), matches.len());
        Ok(matches)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Token sequence
// ─────────────────────────────────────────────────────────────────────────────

/// One step of a parse: a stretch of literal bytes or a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Literals(&'a [u8]),
    Match(Match),
}

/// Interleave `matches` with the literal gaps of `data` between them.
pub(crate) fn tokens<'a>(data: &'a [u8], matches: &[Match]) -> Vec<Token<'a>> {
    let mut out = Vec::with_capacity(matches.len() * 2 + 1);
    let mut position = 0usize;
    for m in matches {
        if m.position > position {
            out.push(Token::Literals(&data[position..m.position]));
        }
        out.push(Token::Match(*m));
        position = m.end();
    }
    if position < data.len() {
        out.push(Token::Literals(&data[position..]));
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Flag-token pricing
// ─────────────────────────────────────────────────────────────────────────────

/// Cost model of the flag-byte formats: a flag bit plus one byte per
/// literal, a flag bit plus two bytes per match.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlagTokenPriceCalculator;

impl PriceCalculator for FlagTokenPriceCalculator {
    #[inline]
    fn literal_price(&self, _position: usize, _value: u8, _run: &RunState) -> u32 {
        9
    }

    #[inline]
    fn match_price(&self, _displacement: usize, _length: usize, _run: &RunState) -> u32 {
        17
    }
}
