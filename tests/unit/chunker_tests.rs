/*!
 * Tests for paragraph- and sentence-aware text chunking
 */

#![allow(non_snake_case)]

use narravox::chunker::{SentenceSplitter, chunk_text, chunk_text_with};

/// Test that titles like "Dr." never produce a sentence boundary
#[test]
fn test_split_sentences_withTitleAbbreviation_shouldNotSplitAfterTitle() {
    let splitter = SentenceSplitter::new();
    let sentences = splitter.split_sentences("Dr. Kim arrived. He sat down.");

    assert_eq!(sentences, vec!["Dr. Kim arrived.", "He sat down."]);
}

/// Test single-capital initials ("J. K. Rowling")
#[test]
fn test_split_sentences_withInitials_shouldKeepInitialsTogether() {
    let splitter = SentenceSplitter::new();
    let sentences = splitter.split_sentences("J. K. Rowling wrote it. Then she left.");

    assert_eq!(sentences, vec!["J. K. Rowling wrote it.", "Then she left."]);
}

/// Test common abbreviations and exclamation/question terminators
#[test]
fn test_split_sentences_withMixedTerminators_shouldSplitOnRealBoundaries() {
    let splitter = SentenceSplitter::new();
    let sentences =
        splitter.split_sentences("It uses flour, sugar, etc. in the mix. Really? Yes!");

    assert_eq!(
        sentences,
        vec!["It uses flour, sugar, etc. in the mix.", "Really?", "Yes!"]
    );
}

/// Test extending the abbreviation exception list
#[test]
fn test_split_sentences_withExtraAbbreviation_shouldHonorExtension() {
    let default_splitter = SentenceSplitter::new();
    let extended_splitter =
        SentenceSplitter::with_extra_abbreviations(&["Bldg.".to_string()]);

    let text = "Meet at Bldg. 7 today. Bring the keys.";

    assert_eq!(
        default_splitter.split_sentences(text),
        vec!["Meet at Bldg.", "7 today.", "Bring the keys."]
    );
    assert_eq!(
        extended_splitter.split_sentences(text),
        vec!["Meet at Bldg. 7 today.", "Bring the keys."]
    );
}

/// Test the abbreviation guard at the chunking level
#[test]
fn test_chunk_text_withAbbreviationAndLargeBudget_shouldProduceOneChunk() {
    let chunks = chunk_text("Dr. Kim arrived. He sat down.", 100);

    assert_eq!(chunks, vec!["Dr. Kim arrived. He sat down."]);
}

/// Test that a tight budget splits only at real sentence boundaries
#[test]
fn test_chunk_text_withTightBudget_shouldSplitAtSentenceBoundaries() {
    let chunks = chunk_text("Dr. Kim arrived. He sat down.", 20);

    assert_eq!(chunks, vec!["Dr. Kim arrived.", "He sat down."]);
}

/// Test greedy packing of short sentences
#[test]
fn test_chunk_text_withShortSentences_shouldPackGreedily() {
    let chunks = chunk_text("One. Two. Three.", 10);

    assert_eq!(chunks, vec!["One. Two.", "Three."]);
}

/// Test that a paragraph boundary always forces a chunk flush
#[test]
fn test_chunk_text_withParagraphBreak_shouldNeverMergeAcrossParagraphs() {
    let chunks = chunk_text("One. Two.\n\nThree.", 100);

    assert_eq!(chunks, vec!["One. Two.", "Three."]);
}

/// Test that a single oversized sentence becomes its own chunk
#[test]
fn test_chunk_text_withOversizedSentence_shouldEmitItWhole() {
    let long_sentence = "This single sentence is far longer than the tiny budget allows.";
    let text = format!("Short. {} Tail.", long_sentence);
    let chunks = chunk_text(&text, 10);

    assert_eq!(chunks, vec!["Short.", long_sentence, "Tail."]);
}

/// Test that budgets count characters, not bytes
#[test]
fn test_chunk_text_withWideCharacters_shouldCountCharsNotBytes() {
    // 12 chars but 32 bytes of UTF-8
    let text = "안녕하세요. 반갑습니다.";
    let chunks = chunk_text(text, 15);

    assert_eq!(chunks, vec![text]);
}

/// Test empty and whitespace-only input
#[test]
fn test_chunk_text_withEmptyInput_shouldReturnEmptySequence() {
    assert!(chunk_text("", 100).is_empty());
    assert!(chunk_text("  \n\n   \n ", 100).is_empty());
}

/// Test that chunking preserves every non-whitespace character
#[test]
fn test_chunk_text_roundTrip_shouldPreserveNonWhitespaceCharacters() {
    let text = "Mr. Lee spoke first. The room went quiet!\n\n\
                Afterwards, e.g. during lunch, people talked. Was it strange? Not at all.\n\n\
                One final paragraph with a somewhat longer closing sentence to pack.";
    let chunks = chunk_text_with(text, 40, &SentenceSplitter::new());

    let squash = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
    let original: String = squash(text);
    let rejoined: String = squash(&chunks.join(" "));

    assert_eq!(rejoined, original);

    // No chunk exceeds the budget unless it is a single oversized sentence
    for chunk in &chunks {
        if chunk.chars().count() > 40 {
            let splitter = SentenceSplitter::new();
            assert_eq!(splitter.split_sentences(chunk).len(), 1);
        }
    }
}
