// Integration tests for HistoryMatchFinder: candidate ordering, limitation
// bounds, unit alignment and search depth.

use lzforge::{FindLimitations, FindOptions, HistoryMatchFinder, Match, MatchFinder, UnitSize};

fn prepared(data: &[u8], limits: FindLimitations, options: &FindOptions) -> HistoryMatchFinder {
    let mut finder = HistoryMatchFinder::new(limits, options).unwrap();
    finder.pre_process(data);
    finder
}

// ─────────────────────────────────────────────────────────────────────────────
// Bounds
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn every_candidate_honours_limitations() {
    let data: Vec<u8> = b"to be or not to be, that is the question; to be is to do".to_vec();
    let limits = FindLimitations::new(3, 6, 2, 40);
    let finder = prepared(&data, limits, &FindOptions::new().with_task_count(1));
    for position in 0..data.len() {
        let found = finder.find_matches_at_position(&data, position);
        for m in &found {
            assert_eq!(m.position, position);
            assert!((3..=6).contains(&m.length), "{m:?}");
            assert!((2..=40).contains(&m.displacement), "{m:?}");
            assert!(m.displacement <= position);
            assert!(m.end() <= data.len());
            assert_eq!(data[position..m.end()], data[position - m.displacement..m.end() - m.displacement]);
        }
        assert!(found.windows(2).all(|w| w[0].length < w[1].length));
    }
}

#[test]
fn matches_stop_at_input_end() {
    let data = b"xyzxyzxy";
    let finder = prepared(data, FindLimitations::new(2, 18, 1, 0x1000), &FindOptions::new().with_task_count(1));
    assert_eq!(finder.find_matches_at_position(data, 3).last(), Some(&Match::new(3, 3, 5)));
}

#[test]
fn min_displacement_skips_nearer_candidates() {
    let data = [4u8; 12];
    let finder = prepared(&data, FindLimitations::new(3, 18, 3, 0x1000), &FindOptions::new().with_task_count(1));
    let found = finder.find_matches_at_position(&data, 6);
    assert_eq!(found.first().map(|m| m.displacement), Some(3));
}

// ─────────────────────────────────────────────────────────────────────────────
// Units and depth
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn int_units_only_report_aligned_matches() {
    let mut data = Vec::new();
    for _ in 0..4 {
        data.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
    }
    let options = FindOptions::new().with_task_count(1).with_unit_size(UnitSize::Int);
    let finder = prepared(&data, FindLimitations::new(4, 16, 4, 0x1000), &options);
    assert!(finder.find_matches_at_position(&data, 6).is_empty());
    let found = finder.find_matches_at_position(&data, 8);
    assert_eq!(found.last(), Some(&Match::new(8, 8, 16)));
}

#[test]
fn search_depth_bounds_the_chain_walk() {
    // The only long match is the oldest candidate.
    let mut data = b"abcdefgh".to_vec();
    for _ in 0..8 {
        data.extend_from_slice(b"abc-");
    }
    data.extend_from_slice(b"abcdefgh");
    let position = data.len() - 8;

    let shallow = FindOptions::new().with_task_count(1).with_search_depth(2);
    let deep = FindOptions::new().with_task_count(1).with_search_depth(64);
    let limits = FindLimitations::new(3, 18, 1, 0x1000);

    let near = prepared(&data, limits, &shallow).find_matches_at_position(&data, position);
    let far = prepared(&data, limits, &deep).find_matches_at_position(&data, position);
    assert_eq!(near.last().map(|m| m.length), Some(3));
    assert_eq!(far.last().map(|m| m.length), Some(8));
}
