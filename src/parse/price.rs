//! Token pricing.
//!
//! Many legacy formats share one length header across a run of literals or
//! matches, so the cost of a token depends on the run it extends. Parsers pass
//! the [`RunState`] reached before the token to the calculator.

use crate::find::input::adjust_input;
use crate::find::{FindOptions, Match};

/// Kind of the run the last token belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunKind {
    /// Nothing emitted yet.
    #[default]
    None,
    Literal,
    Match,
}

/// Run context at a position: kind of the current run and how many tokens
/// (literal units or matches) it holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunState {
    pub kind: RunKind,
    pub length: usize,
}

impl RunState {
    /// State after one more literal unit.
    #[inline]
    pub fn after_literal(self) -> RunState {
        match self.kind {
            RunKind::Literal => RunState {
                kind: RunKind::Literal,
                length: self.length + 1,
            },
            _ => RunState {
                kind: RunKind::Literal,
                length: 1,
            },
        }
    }

    /// State after one more match.
    #[inline]
    pub fn after_match(self) -> RunState {
        match self.kind {
            RunKind::Match => RunState {
                kind: RunKind::Match,
                length: self.length + 1,
            },
            _ => RunState {
                kind: RunKind::Match,
                length: 1,
            },
        }
    }

    #[inline]
    pub fn in_literal_run(&self) -> bool {
        self.kind == RunKind::Literal
    }

    #[inline]
    pub fn in_match_run(&self) -> bool {
        self.kind == RunKind::Match
    }
}

/// Cost model of one format, in any consistent unit (usually bits).
pub trait PriceCalculator: Send + Sync {
    /// Cost of emitting the literal unit starting with `value` at `position`.
    fn literal_price(&self, position: usize, value: u8, run: &RunState) -> u32;

    /// Cost of emitting a match of `length` bytes at `displacement`.
    fn match_price(&self, displacement: usize, length: usize, run: &RunState) -> u32;
}

/// Price of the token sequence `matches` over `input`, with the gaps between
/// matches priced as literal units.
///
/// `matches` must be ordered and non-overlapping, with positions in the
/// adjusted input as parsers report them.
pub fn total_price(
    input: &[u8],
    matches: &[Match],
    options: &FindOptions,
    calculator: &dyn PriceCalculator,
) -> u64 {
    let adjusted = adjust_input(input, options);
    let data = adjusted.data();
    let unit = options.unit_size.bytes();
    let skip = options.skip_after_match * unit;

    let mut total = 0u64;
    let mut run = RunState::default();
    let mut position = 0usize;
    let mut next_match = matches.iter().peekable();

    while position < data.len() {
        match next_match.peek() {
            Some(m) if m.position == position => {
                total += calculator.match_price(m.displacement, m.length, &run) as u64;
                run = run.after_match();
                position += m.length + skip;
                next_match.next();
            }
            _ => {
                total += calculator.literal_price(position, data[position], &run) as u64;
                run = run.after_literal();
                position += unit;
            }
        }
    }
    total
}
