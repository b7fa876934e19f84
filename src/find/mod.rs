//! Match model and match-finding strategies.
//!
//! A finder is queried position by position for back-reference candidates.
//! Parsers own one or more finders for a session and feed them the adjusted
//! input produced by [`input::adjust_input`].

pub mod finder;
pub mod history;
pub mod input;
pub mod types;

pub use finder::MatchFinder;
pub use history::HistoryMatchFinder;
pub use types::{FindLimitations, FindOptions, InputTransform, Match, SearchDirection, UnitSize};
