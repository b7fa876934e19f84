//! Parsers turn an input buffer into an ordered, non-overlapping list of
//! matches; the bytes between matches are literals.
//!
//! Two strategies are provided:
//!   - [`GreedyParser`]: longest match at each position, no look-ahead.
//!   - [`OptimalParser`]: minimum total price over all literal/match paths.

pub mod collect;
pub mod greedy;
pub mod optimal;
pub mod price;

pub use greedy::GreedyParser;
pub use optimal::{OptimalParser, PositionElement};
pub use price::{total_price, PriceCalculator, RunKind, RunState};

use crate::error::{Error, Result};
use crate::find::{FindOptions, Match, MatchFinder};

/// A token-selection strategy.
pub trait Parser {
    /// Session options the parser was built with.
    fn options(&self) -> &FindOptions;

    /// Matches chosen for `input`, ascending by position. Positions are
    /// offsets into the adjusted input with the pre-buffer removed.
    fn parse_matches(&mut self, input: &[u8]) -> Result<Vec<Match>>;
}

/// Check that a finder set can share one parsing session.
pub(crate) fn validate_finders(options: &FindOptions, finders: &[Box<dyn MatchFinder>]) -> Result<()> {
    options.validate()?;
    if finders.is_empty() {
        return Err(Error::config("a parser needs at least one match finder"));
    }
    for (index, finder) in finders.iter().enumerate() {
        if finder.unit_size() != options.unit_size {
            return Err(Error::config(format!(
                "finder {} uses unit size {:?} but the session uses {:?}",
                index,
                finder.unit_size(),
                options.unit_size
            )));
        }
        finder.limitations().validate(options.unit_size)?;
    }
    Ok(())
}

/// Number of unit-sized steps covering `len` bytes; a trailing partial unit
/// counts as one literal step.
#[inline]
pub(crate) fn unit_count(len: usize, unit: usize) -> usize {
    len.div_ceil(unit)
}
