// Integration tests for OptimalParser: cost-driven token choice, run-aware
// pricing and agreement between serial and parallel match collection.

use lzforge::encode::FlagTokenPriceCalculator;
use lzforge::{
    total_price, FindLimitations, FindOptions, GreedyParser, HistoryMatchFinder, Match, MatchFinder,
    OptimalParser, Parser, PriceCalculator, RunState,
};

const LIMITS: FindLimitations = FindLimitations::new(3, 18, 1, 0x1000);

fn finders(options: &FindOptions) -> Vec<Box<dyn MatchFinder>> {
    vec![Box::new(HistoryMatchFinder::new(LIMITS, options).unwrap())]
}

fn optimal(options: FindOptions, calculator: Box<dyn PriceCalculator>) -> OptimalParser {
    let f = finders(&options);
    OptimalParser::new(options, f, calculator).unwrap()
}

/// Matches cost the same no matter how long they are, literals are costly.
struct CheapMatches;

impl PriceCalculator for CheapMatches {
    fn literal_price(&self, _: usize, _: u8, _: &RunState) -> u32 {
        100
    }
    fn match_price(&self, _: usize, _: usize, _: &RunState) -> u32 {
        1
    }
}

/// A literal after a match costs a lot; literals inside a run are free.
struct RunHeaders;

impl PriceCalculator for RunHeaders {
    fn literal_price(&self, _: usize, _: u8, run: &RunState) -> u32 {
        if run.in_literal_run() {
            0
        } else {
            50
        }
    }
    fn match_price(&self, _: usize, _: usize, _: &RunState) -> u32 {
        20
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cost-driven choices
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn beats_greedy_where_greedy_is_short_sighted() {
    // Greedy takes "abcd" at 8 and then cannot match "efgh"; the optimal parse
    // starts one byte later and covers "bcdefgh" with one match.
    let input = b"abcdXXXXbcdefghYabcdefgh";
    let options = FindOptions::new().with_task_count(1);

    let mut g = GreedyParser::new(options.clone(), finders(&options)).unwrap();
    let greedy_matches = g.parse_matches(input).unwrap();
    let mut o = optimal(options.clone(), Box::new(FlagTokenPriceCalculator));
    let optimal_matches = o.parse_matches(input).unwrap();

    let calc = FlagTokenPriceCalculator;
    let gp = total_price(input, &greedy_matches, &options, &calc);
    let op = total_price(input, &optimal_matches, &options, &calc);
    assert!(op <= gp, "optimal {op} vs greedy {gp}");
}

#[test]
fn every_match_length_is_an_edge() {
    // With flat match prices the parse may cut matches short to reach
    // another match sooner; the sum must still cover the input.
    let input = b"abcdefabcdefabcdef";
    let options = FindOptions::new().with_task_count(1);
    let mut parser = optimal(options.clone(), Box::new(CheapMatches));
    let matches = parser.parse_matches(input).unwrap();
    let literals = input.len() - matches.iter().map(|m| m.length).sum::<usize>();
    assert_eq!(literals, 6);
    assert_eq!(total_price(input, &matches, &options, &CheapMatches), 6 * 100 + matches.len() as u64);
}

#[test]
fn run_state_reaches_the_calculator() {
    // A single literal run is cheaper than breaking it with a match.
    let input = b"abcabcab";
    let mut parser = optimal(FindOptions::new().with_task_count(1), Box::new(RunHeaders));
    assert!(parser.parse_matches(input).unwrap().is_empty());
}

#[test]
fn positions_exclude_pre_buffer() {
    let options = FindOptions::new().with_task_count(1).with_pre_buffer_size(32);
    let mut parser = optimal(options, Box::new(FlagTokenPriceCalculator));
    let matches = parser.parse_matches(&[0u8; 10]).unwrap();
    assert_eq!(matches, vec![Match::new(0, 1, 10)]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Parallel collection
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn worker_count_does_not_change_the_parse() {
    let input: Vec<u8> = (0..4000u32).map(|i| b"lorem ipsum dolor"[(i * i % 17) as usize]).collect();
    let serial = optimal(FindOptions::new().with_task_count(1), Box::new(FlagTokenPriceCalculator))
        .parse_matches(&input)
        .unwrap();
    for workers in [2, 3, 8] {
        let parallel = optimal(FindOptions::new().with_task_count(workers), Box::new(FlagTokenPriceCalculator))
            .parse_matches(&input)
            .unwrap();
        assert_eq!(parallel, serial, "{workers} workers");
    }
}
