use log::debug;

use super::repair::{self, RepairMode};
use super::{TimingRecord, WordSpan};

// @module: Character-count proportional word grouping

/// Minimum visible duration for a line whose end could not be determined
const MIN_LINE_DURATION: f64 = 0.5;

/// Placeholder slot for a line that normalizes to zero characters
const PLACEHOLDER_DURATION: f64 = 0.1;

/// Reduce text to a comparable canonical form: lowercase, with punctuation
/// and whitespace stripped. The count of normalized characters is the
/// weight used to apportion recognized words to caption lines.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Single forward cursor over the recognized words.
///
/// Holds the word list, the per-word normalized character weights and the
/// current position explicitly, so each grouping step is a plain function
/// of visible state.
#[derive(Debug)]
struct WordCursor<'a> {
    words: &'a [WordSpan],
    weights: &'a [usize],
    pos: usize,
}

impl<'a> WordCursor<'a> {
    fn new(words: &'a [WordSpan], weights: &'a [usize]) -> Self {
        WordCursor {
            words,
            weights,
            pos: 0,
        }
    }

    /// Consume words until the accumulated weight reaches `target_chars`
    /// or the input runs out. Returns the (start, end) of the consumed run,
    /// or None if the cursor was already starved.
    fn take_for(&mut self, target_chars: usize) -> Option<(f64, f64)> {
        let mut run_start = None;
        let mut run_end = None;
        let mut consumed_chars = 0;

        while self.pos < self.words.len() && consumed_chars < target_chars {
            let word = &self.words[self.pos];
            if run_start.is_none() {
                run_start = Some(word.start);
            }
            run_end = Some(word.end);
            consumed_chars += self.weights[self.pos];
            self.pos += 1;
        }

        match (run_start, run_end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Absorb every remaining word, returning the last end time if any
    /// words were left
    fn drain(&mut self) -> Option<f64> {
        let mut last_end = None;
        while self.pos < self.words.len() {
            last_end = Some(self.words[self.pos].end);
            self.pos += 1;
        }
        last_end
    }
}

/// Group recognized words onto caption lines by normalized character
/// count, producing one provisional record per line.
///
/// Matching is by character budget, not semantic word identity: caption
/// lines reflow differently from spoken segmentation, so recognized word
/// counts do not map 1:1 onto lines, but character density is a robust
/// proxy. Recognized words are assumed to arrive in caption reading order;
/// systematic ASR mis-recognition beyond the floor/placeholder rules below
/// is an accepted approximation.
pub fn group_words(words: &[WordSpan], lines: &[String], audio_duration: f64) -> Vec<TimingRecord> {
    if lines.is_empty() {
        return Vec::new();
    }

    if words.is_empty() {
        debug!("No recognized words, using uniform division");
        return uniform_division(lines, audio_duration);
    }

    let line_weights: Vec<usize> = lines
        .iter()
        .map(|line| normalize_text(line).chars().count())
        .collect();
    let word_weights: Vec<usize> = words
        .iter()
        .map(|w| normalize_text(&w.text).chars().count())
        .collect();

    debug!(
        "Grouping {} recognized words ({} chars) onto {} caption lines ({} chars)",
        words.len(),
        word_weights.iter().sum::<usize>(),
        lines.len(),
        line_weights.iter().sum::<usize>()
    );

    let total_lines = lines.len();
    let mut cursor = WordCursor::new(words, &word_weights);
    let mut records: Vec<TimingRecord> = Vec::with_capacity(total_lines);

    for (line_idx, line) in lines.iter().enumerate() {
        let target_chars = line_weights[line_idx];

        // A line that normalizes to nothing takes no words; it gets a
        // minimal placeholder slot anchored at the previous end
        if target_chars == 0 {
            let prev_end = records.last().map_or(0.0, |r| r.end);
            records.push(TimingRecord::new(
                line.clone(),
                prev_end,
                prev_end + PLACEHOLDER_DURATION,
            ));
            continue;
        }

        let (line_start, mut line_end) = match cursor.take_for(target_chars) {
            Some((start, end)) => (Some(start), Some(end)),
            None => (None, None),
        };

        // The final line absorbs all remaining words regardless of target
        if line_idx == total_lines - 1 {
            if let Some(end) = cursor.drain() {
                line_end = Some(end);
            }
        }

        let start = line_start.unwrap_or_else(|| records.last().map_or(0.0, |r| r.end));
        let end = match line_end {
            Some(end) if end > start => end,
            _ => start + MIN_LINE_DURATION,
        };

        records.push(TimingRecord::new(
            line.clone(),
            start.max(0.0),
            end.min(audio_duration),
        ));
    }

    records
}

/// Equal-duration division of the audio across the caption lines, used
/// when no alignment data is available at all
pub fn uniform_division(lines: &[String], audio_duration: f64) -> Vec<TimingRecord> {
    if lines.is_empty() {
        return Vec::new();
    }

    let time_per_line = audio_duration / lines.len() as f64;
    let mut records: Vec<TimingRecord> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            TimingRecord::new(
                line.clone(),
                i as f64 * time_per_line,
                (i + 1) as f64 * time_per_line,
            )
        })
        .collect();

    // The caption track spans the full audio exactly, even when the
    // floating division does not multiply back to it
    repair::force_final_end(&mut records, audio_duration);
    records
}

/// Full matching step: group words onto lines, resolve overlaps and pin
/// the final record to the audio duration
pub fn match_lines(
    words: &[WordSpan],
    lines: &[String],
    audio_duration: f64,
    mode: RepairMode,
) -> Vec<TimingRecord> {
    let mut records = group_words(words, lines, audio_duration);
    repair::resolve_overlaps(&mut records, mode);
    repair::force_final_end(&mut records, audio_duration);
    records
}
