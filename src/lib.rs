// lzforge: LZ match finding, cost-optimal parsing and headerless legacy codecs

pub mod config;
pub mod error;
pub mod history;
pub mod flags;
pub mod find;
pub mod parse;
pub mod decode;
pub mod encode;

pub use decode::{decode_to_vec, Decoder};
pub use encode::{encode_to_vec, Encoder, LzSettings, ParseStrategy};
pub use error::{Error, Result};
pub use find::{FindLimitations, FindOptions, HistoryMatchFinder, Match, MatchFinder, SearchDirection, UnitSize};
pub use history::HistoryBuffer;
pub use parse::{total_price, GreedyParser, OptimalParser, Parser, PriceCalculator, RunKind, RunState};

// ── Version constants ────────────────────────────────────────────────────────
pub const LZFORGE_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version string.
pub fn version_string() -> &'static str {
    LZFORGE_VERSION_STRING
}
