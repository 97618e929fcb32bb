/*!
 * Tests for aligner output parsing and the external-command aligner
 */

#![allow(non_snake_case)]

use std::path::Path;

use narravox::aligners::command::CommandAligner;
use narravox::aligners::{Aligner, AlignmentOutput, collect_word_spans};
use narravox::errors::AlignerError;

use crate::common::assert_close;

fn parse(json: &str) -> AlignmentOutput {
    serde_json::from_str(json).unwrap()
}

/// Test flattening word-level detail across segments
#[test]
fn test_collect_word_spans_withWordDetail_shouldFlattenInOrder() {
    let output = parse(
        r#"{
            "segments": [
                {
                    "text": "Hello there",
                    "start": 0.0,
                    "end": 1.0,
                    "words": [
                        {"text": "Hello", "start": 0.0, "end": 0.5},
                        {"text": "there", "start": 0.5, "end": 1.0}
                    ]
                },
                {
                    "text": "Goodbye",
                    "start": 1.0,
                    "end": 2.0,
                    "words": [
                        {"text": "Goodbye", "start": 1.0, "end": 2.0}
                    ]
                }
            ]
        }"#,
    );

    let spans = collect_word_spans(&output);

    assert_eq!(spans.len(), 3);
    assert_eq!(spans[0].text, "Hello");
    assert_close(spans[0].start, 0.0);
    assert_close(spans[0].end, 0.5);
    assert_eq!(spans[2].text, "Goodbye");
    assert_close(spans[2].end, 2.0);
}

/// Test the "word" field alias some tools emit instead of "text"
#[test]
fn test_collect_word_spans_withWordFieldAlias_shouldAcceptIt() {
    let output = parse(
        r#"{
            "segments": [
                {
                    "start": 0.0,
                    "end": 1.0,
                    "words": [
                        {"word": "hello", "start": 0.1, "end": 0.9}
                    ]
                }
            ]
        }"#,
    );

    let spans = collect_word_spans(&output);

    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].text, "hello");
}

/// Test words without their own timestamps inherit the segment bounds
#[test]
fn test_collect_word_spans_withMissingWordTimestamps_shouldInheritSegmentBounds() {
    let output = parse(
        r#"{
            "segments": [
                {
                    "start": 2.0,
                    "end": 4.0,
                    "words": [
                        {"text": "untimed"},
                        {"text": "also", "start": 2.5}
                    ]
                }
            ]
        }"#,
    );

    let spans = collect_word_spans(&output);

    assert_eq!(spans.len(), 2);
    assert_close(spans[0].start, 2.0);
    assert_close(spans[0].end, 4.0);
    assert_close(spans[1].start, 2.5);
    assert_close(spans[1].end, 4.0);
}

/// Test a segment without word detail contributes one span, and empty
/// texts are dropped entirely
#[test]
fn test_collect_word_spans_withSegmentOnlyDetail_shouldUseWholeSegment() {
    let output = parse(
        r#"{
            "segments": [
                {"text": "A whole segment", "start": 0.0, "end": 3.0},
                {"text": "   ", "start": 3.0, "end": 4.0},
                {
                    "start": 4.0,
                    "end": 5.0,
                    "words": [{"text": "  "}, {"text": "kept"}]
                }
            ]
        }"#,
    );

    let spans = collect_word_spans(&output);

    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].text, "A whole segment");
    assert_eq!(spans[1].text, "kept");
}

/// Test an empty document parses to zero spans
#[test]
fn test_collect_word_spans_withEmptyDocument_shouldReturnNothing() {
    let output = parse("{}");
    assert!(collect_word_spans(&output).is_empty());
}

/// Test the command aligner reports a missing tool as unavailable rather
/// than panicking or hanging
#[tokio::test]
async fn test_command_aligner_withMissingProgram_shouldReturnUnavailable() {
    let aligner = CommandAligner::new("narravox-no-such-aligner-tool", Vec::new(), 5);

    let result = aligner
        .align(Path::new("audio.wav"), "Hello there", "en")
        .await;

    match result {
        Err(AlignerError::Unavailable(_)) => {}
        other => panic!("expected Unavailable, got {other:?}"),
    }

    let result = aligner.transcribe(Path::new("audio.wav"), "en").await;
    assert!(matches!(result, Err(AlignerError::Unavailable(_))));
}
