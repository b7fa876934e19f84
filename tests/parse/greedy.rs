// Integration tests for GreedyParser through the public API.

use lzforge::{FindLimitations, FindOptions, GreedyParser, HistoryMatchFinder, Match, MatchFinder, Parser};

fn finder(options: &FindOptions, limits: FindLimitations) -> Box<dyn MatchFinder> {
    Box::new(HistoryMatchFinder::new(limits, options).unwrap())
}

fn greedy(options: FindOptions, limits: &[FindLimitations]) -> GreedyParser {
    let finders = limits.iter().map(|&l| finder(&options, l)).collect();
    GreedyParser::new(options, finders).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Token choice
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn position_advances_past_each_match() {
    let mut parser = greedy(FindOptions::new().with_task_count(1), &[FindLimitations::new(3, 18, 1, 0x1000)]);
    let matches = parser.parse_matches(b"abcabcabcXabc").unwrap();
    assert_eq!(matches, vec![Match::new(3, 3, 6), Match::new(10, 4, 3)]);
}

#[test]
fn longest_across_finders_wins() {
    // The short-window finder cannot see the earlier "0123456789".
    let limits = [FindLimitations::new(3, 18, 1, 4), FindLimitations::new(3, 18, 1, 0x1000)];
    let mut parser = greedy(FindOptions::new().with_task_count(1), &limits);
    let matches = parser.parse_matches(b"0123456789aaaa0123456789").unwrap();
    assert!(matches.contains(&Match::new(14, 14, 10)));
}

#[test]
fn max_length_splits_long_repeats() {
    let mut parser = greedy(FindOptions::new().with_task_count(1), &[FindLimitations::new(3, 18, 1, 0x1000)]);
    let matches = parser.parse_matches(&[9u8; 40]).unwrap();
    assert_eq!(matches, vec![Match::new(1, 1, 18), Match::new(19, 1, 18), Match::new(37, 1, 3)]);
}

#[test]
fn skip_after_match_steps_over_implicit_units() {
    let options = FindOptions::new().with_task_count(1).with_skip_after_match(1);
    let mut parser = greedy(options, &[FindLimitations::new(3, 18, 1, 0x1000)]);
    let matches = parser.parse_matches(b"abcdabcdXabcd").unwrap();
    assert_eq!(matches[0], Match::new(4, 4, 4));
    // The byte after the match is never the start of the next token.
    assert!(matches.iter().skip(1).all(|m| m.position >= 9));
}
