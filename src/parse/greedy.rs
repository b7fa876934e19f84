//! Greedy parsing: take the longest match at each position.

use log::debug;

use super::{unit_count, validate_finders, Parser};
use crate::error::Result;
use crate::find::input::adjust_input;
use crate::find::{FindOptions, Match, MatchFinder};

/// Emits the longest available match at each position and skips past it.
///
/// Cheap and always legal, but blind to the cost of the tokens it chooses.
pub struct GreedyParser {
    options: FindOptions,
    finders: Vec<Box<dyn MatchFinder>>,
}

impl GreedyParser {
    /// Fails with a configuration error if a finder's unit size differs from
    /// the session's or no finder is given.
    pub fn new(options: FindOptions, finders: Vec<Box<dyn MatchFinder>>) -> Result<Self> {
        validate_finders(&options, &finders)?;
        Ok(GreedyParser { options, finders })
    }

    /// Longest match over all finders at `position`; the earlier finder wins
    /// ties. Returns the match with its finder's minimum length.
    fn best_match(&self, buffer: &[u8], position: usize) -> Option<(Match, usize)> {
        let mut best: Option<(Match, usize)> = None;
        for finder in &self.finders {
            if let Some(found) = finder.find_matches_at_position(buffer, position).last() {
                if best.map_or(true, |(b, _)| found.length > b.length) {
                    best = Some((*found, finder.limitations().min_length));
                }
            }
        }
        best
    }
}

impl Parser for GreedyParser {
    fn options(&self) -> &FindOptions {
        &self.options
    }

    fn parse_matches(&mut self, input: &[u8]) -> Result<Vec<Match>> {
        let adjusted = adjust_input(input, &self.options);
        for finder in self.finders.iter_mut() {
            finder.pre_process(&adjusted.buffer);
        }

        let unit = self.options.unit_size.bytes();
        let skip = self.options.skip_after_match;
        let total = unit_count(adjusted.len(), unit);
        let start = adjusted.start;

        let mut matches = Vec::new();
        let mut step = 0usize;
        while step < total {
            let position = start + step * unit;
            if let Some((mut found, min_length)) = self.best_match(&adjusted.buffer, position) {
                // The implicit units after a match must still fit in the input.
                let room = total.saturating_sub(step + skip) * unit;
                if found.length > room {
                    found.length = room - room % unit;
                }
                if found.length >= min_length {
                    found.position -= start;
                    step += found.length / unit + skip;
                    matches.push(found);
                    continue;
                }
            }
            step += 1;
        }

        debug!("greedy parse: {} bytes, {} matches", adjusted.len(), matches.len());
        Ok(matches)
    }
}
