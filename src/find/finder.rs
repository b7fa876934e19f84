//! The match-finder strategy contract.

use super::types::{FindLimitations, Match, UnitSize};

/// A pluggable back-reference search strategy.
///
/// `pre_process` is called once per session with the fully adjusted buffer.
/// Afterwards `find_matches_at_position` only reads the prepared state, so a
/// parser may query many positions concurrently.
pub trait MatchFinder: Send + Sync {
    /// Length and displacement bounds of every reported match.
    fn limitations(&self) -> &FindLimitations;

    /// Unit size the finder was built for; must equal the session's.
    fn unit_size(&self) -> UnitSize;

    /// Index `buffer` before any query.
    fn pre_process(&mut self, buffer: &[u8]);

    /// Candidates starting at `position`, ordered by strictly increasing
    /// length. Empty when nothing satisfies the limitations.
    fn find_matches_at_position(&self, buffer: &[u8], position: usize) -> Vec<Match>;
}
