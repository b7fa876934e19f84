//! Price-optimal parsing by shortest path over input positions.
//!
//! Nodes are the unit steps `0..=N` of the adjusted input. Every node has a
//! literal edge to the next unit and, for each candidate match found there,
//! one edge per admissible length (finder minimum up to the match length, in
//! unit increments). Edge weights come from the session's
//! [`PriceCalculator`], evaluated with the run state of the source node.
//!
//! The graph is acyclic and edges only point forward, so one left-to-right
//! relaxation pass settles every node. The parse is then read back from node
//! `N` along parent indices.
//!
//! # Tie-breaking
//!
//! Literal edges replace an equal-priced path, match edges need to be strictly
//! cheaper. On equal cost the parse therefore prefers literals.

use log::{debug, trace};

use super::collect::{collect_candidates, Candidate};
use super::price::{PriceCalculator, RunState};
use super::{unit_count, validate_finders, Parser};
use crate::error::Result;
use crate::find::input::adjust_input;
use crate::find::{FindOptions, Match, MatchFinder};

/// Price of a node no path has reached yet.
const UNREACHED: u64 = u64::MAX;

// ─────────────────────────────────────────────────────────────────────────────
// PositionElement
// ─────────────────────────────────────────────────────────────────────────────

/// One node of the shortest-path arena.
#[derive(Clone, Copy, Debug)]
pub struct PositionElement {
    /// Cheapest known price of encoding everything before this node.
    pub price: u64,
    /// Arena index of the node the cheapest path came from.
    pub parent: usize,
    /// Match taken on the edge from `parent`, `None` for a literal edge.
    pub token: Option<Match>,
    /// Run context after the edge.
    pub run: RunState,
}

impl Default for PositionElement {
    fn default() -> Self {
        PositionElement {
            price: UNREACHED,
            parent: 0,
            token: None,
            run: RunState::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// OptimalParser
// ─────────────────────────────────────────────────────────────────────────────

/// Chooses the token sequence with the lowest total price.
pub struct OptimalParser {
    options: FindOptions,
    finders: Vec<Box<dyn MatchFinder>>,
    calculator: Box<dyn PriceCalculator>,
}

impl OptimalParser {
    /// Fails with a configuration error if a finder's unit size differs from
    /// the session's or no finder is given.
    pub fn new(
        options: FindOptions,
        finders: Vec<Box<dyn MatchFinder>>,
        calculator: Box<dyn PriceCalculator>,
    ) -> Result<Self> {
        validate_finders(&options, &finders)?;
        Ok(OptimalParser {
            options,
            finders,
            calculator,
        })
    }

    /// Forward relaxation over `total` unit steps of `data`.
    fn forward_pass(&self, data: &[u8], candidates: &[Vec<Candidate>], total: usize) -> Vec<PositionElement> {
        let unit = self.options.unit_size.bytes();
        let skip = self.options.skip_after_match;
        let calc = &*self.calculator;

        let mut nodes = vec![PositionElement::default(); total + 1];
        nodes[0].price = 0;

        for step in 0..total {
            let current = nodes[step];
            if current.price == UNREACHED {
                continue;
            }
            let position = step * unit;

            // Literal edge; wins ties.
            let literal = current
                .price
                .saturating_add(calc.literal_price(position, data[position], &current.run) as u64);
            if literal <= nodes[step + 1].price {
                nodes[step + 1] = PositionElement {
                    price: literal,
                    parent: step,
                    token: None,
                    run: current.run.after_literal(),
                };
            }

            // Match edges, one per admissible length.
            for candidate in &candidates[step] {
                let found = candidate.found;
                let mut length = candidate.min_length.max(unit);
                length += (unit - length % unit) % unit;
                while length <= found.length {
                    let target = step + length / unit + skip;
                    if target > total {
                        break;
                    }
                    let price = current
                        .price
                        .saturating_add(calc.match_price(found.displacement, length, &current.run) as u64);
                    if price < nodes[target].price {
                        nodes[target] = PositionElement {
                            price,
                            parent: step,
                            token: Some(Match::new(position, found.displacement, length)),
                            run: current.run.after_match(),
                        };
                    }
                    length += unit;
                }
            }
        }

        nodes
    }

    /// Walk parent links back from the last node and return the matches taken,
    /// ascending by position.
    fn backward_pass(nodes: &[PositionElement]) -> Vec<Match> {
        let mut matches = Vec::new();
        let mut index = nodes.len() - 1;
        while index > 0 {
            let node = &nodes[index];
            if let Some(m) = node.token {
                matches.push(m);
            }
            index = node.parent;
        }
        matches.reverse();
        matches
    }
}

impl Parser for OptimalParser {
    fn options(&self) -> &FindOptions {
        &self.options
    }

    fn parse_matches(&mut self, input: &[u8]) -> Result<Vec<Match>> {
        let adjusted = adjust_input(input, &self.options);
        for finder in self.finders.iter_mut() {
            finder.pre_process(&adjusted.buffer);
        }

        let unit = self.options.unit_size.bytes();
        let total = unit_count(adjusted.len(), unit);
        if total == 0 {
            return Ok(Vec::new());
        }

        let mut candidates = collect_candidates(
            &self.finders,
            &adjusted.buffer,
            adjusted.start,
            unit,
            self.options.task_count,
        )?;
        // Rebase candidate positions onto the data without the pre-buffer.
        for found in candidates.iter_mut().flatten() {
            found.found.position -= adjusted.start;
        }

        let nodes = self.forward_pass(adjusted.data(), &candidates, total);
        let matches = Self::backward_pass(&nodes);

        debug!(
            "optimal parse: {} bytes, {} matches, price {}",
            adjusted.len(),
            matches.len(),
            nodes[total].price
        );
        trace!("optimal parse matches: {:?}", matches);
        Ok(matches)
    }
}
