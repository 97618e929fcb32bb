use serde::{Deserialize, Serialize};

use super::TimingRecord;

// @module: Timeline repair - overlap resolution and final-end clamping

/// Strategy for the overlap-repair sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairMode {
    /// One forward sweep. A long run of mutually overlapping adjacent
    /// pairs is only pairwise-corrected, not globally re-optimized; this
    /// is the original behavior and the compatibility default.
    #[default]
    SinglePass,

    /// Repeat the sweep until no adjacent pair overlaps
    FixedPoint,
}

/// Resolve overlaps between consecutive records by collapsing each
/// overlapping pair to its midpoint: previous end and current start both
/// become `(prev.end + cur.start) / 2`.
pub fn resolve_overlaps(records: &mut [TimingRecord], mode: RepairMode) {
    match mode {
        RepairMode::SinglePass => {
            sweep(records);
        }
        RepairMode::FixedPoint => {
            // Each sweep strictly shrinks some overlap, so the pass count
            // is bounded by the record count in practice; the cap keeps
            // pathological float behavior from spinning
            let mut passes = 0;
            while sweep(records) && passes < records.len() {
                passes += 1;
            }
        }
    }
}

/// One forward sweep over adjacent pairs. Returns whether anything moved.
fn sweep(records: &mut [TimingRecord]) -> bool {
    let mut changed = false;

    for i in 1..records.len() {
        if records[i].start < records[i - 1].end {
            let midpoint = (records[i - 1].end + records[i].start) / 2.0;
            records[i - 1].end = midpoint;
            records[i].start = midpoint;
            changed = true;
        }
    }

    changed
}

/// Force the last record's end to exactly the audio duration, overriding
/// whatever the alignment produced, so the caption track always spans the
/// full audio
pub fn force_final_end(records: &mut [TimingRecord], audio_duration: f64) {
    if let Some(last) = records.last_mut() {
        last.end = audio_duration;
    }
}
