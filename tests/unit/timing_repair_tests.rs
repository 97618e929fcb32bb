/*!
 * Tests for overlap resolution and final-end clamping
 */

#![allow(non_snake_case)]

use narravox::timing::TimingRecord;
use narravox::timing::repair::{RepairMode, force_final_end, resolve_overlaps};

use crate::common::assert_close;

fn records(specs: &[(f64, f64)]) -> Vec<TimingRecord> {
    specs
        .iter()
        .enumerate()
        .map(|(i, (start, end))| TimingRecord::new(format!("line {i}"), *start, *end))
        .collect()
}

/// Test the midpoint collapse on a single overlapping pair
#[test]
fn test_resolve_overlaps_withOverlappingPair_shouldCollapseToMidpoint() {
    let mut timeline = records(&[(1.0, 2.0), (1.5, 3.0)]);

    resolve_overlaps(&mut timeline, RepairMode::SinglePass);

    assert_close(timeline[0].end, 1.75);
    assert_close(timeline[1].start, 1.75);
    // Untouched edges stay put
    assert_close(timeline[0].start, 1.0);
    assert_close(timeline[1].end, 3.0);
}

/// Test that non-overlapping records are left alone, including records
/// that touch exactly
#[test]
fn test_resolve_overlaps_withCleanTimeline_shouldChangeNothing() {
    let mut timeline = records(&[(0.0, 1.0), (1.0, 2.0), (2.5, 3.0)]);
    let original = timeline.clone();

    resolve_overlaps(&mut timeline, RepairMode::SinglePass);

    assert_eq!(timeline, original);
}

/// Test a single forward sweep repairs every adjacent pair in a chain
#[test]
fn test_resolve_overlaps_withOverlapChain_shouldRepairAllAdjacentPairs() {
    let mut timeline = records(&[(0.0, 2.0), (1.0, 3.0), (2.0, 4.0)]);

    resolve_overlaps(&mut timeline, RepairMode::SinglePass);

    for pair in timeline.windows(2) {
        assert!(
            pair[1].start >= pair[0].end,
            "pair still overlaps: {:?} then {:?}",
            pair[0],
            pair[1]
        );
    }
    // First pair: midpoint of 2.0 and 1.0
    assert_close(timeline[0].end, 1.5);
    assert_close(timeline[1].start, 1.5);
}

/// Test fixed-point mode also reaches a non-overlapping timeline
#[test]
fn test_resolve_overlaps_withFixedPointMode_shouldReachCleanTimeline() {
    let mut timeline = records(&[(0.0, 3.0), (0.5, 3.5), (1.0, 4.0), (1.5, 4.5)]);

    resolve_overlaps(&mut timeline, RepairMode::FixedPoint);

    for pair in timeline.windows(2) {
        assert!(pair[1].start >= pair[0].end);
    }
}

/// Test the degenerate sizes
#[test]
fn test_resolve_overlaps_withShortTimelines_shouldNotPanic() {
    let mut empty: Vec<TimingRecord> = Vec::new();
    resolve_overlaps(&mut empty, RepairMode::SinglePass);
    assert!(empty.is_empty());

    let mut single = records(&[(0.0, 5.0)]);
    resolve_overlaps(&mut single, RepairMode::FixedPoint);
    assert_close(single[0].end, 5.0);
}

/// Test the final record is pinned to the audio duration in both
/// directions, extending or truncating
#[test]
fn test_force_final_end_withMismatchedLastRecord_shouldPinToDuration() {
    let mut short = records(&[(0.0, 1.0), (1.0, 1.8)]);
    force_final_end(&mut short, 3.0);
    assert_eq!(short[1].end, 3.0);

    let mut long = records(&[(0.0, 1.0), (1.0, 4.2)]);
    force_final_end(&mut long, 3.0);
    assert_eq!(long[1].end, 3.0);

    let mut empty: Vec<TimingRecord> = Vec::new();
    force_final_end(&mut empty, 3.0);
    assert!(empty.is_empty());
}

/// Test the repair-mode config values round-trip through serde
#[test]
fn test_repair_mode_withSerde_shouldUseSnakeCaseNames() {
    assert_eq!(
        serde_json::to_string(&RepairMode::SinglePass).unwrap(),
        "\"single_pass\""
    );
    let mode: RepairMode = serde_json::from_str("\"fixed_point\"").unwrap();
    assert_eq!(mode, RepairMode::FixedPoint);
    assert_eq!(RepairMode::default(), RepairMode::SinglePass);
}
