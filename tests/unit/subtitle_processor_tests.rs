/*!
 * Tests for cue stream parsing and subtitle rendering
 */

use subalign::app_config::OutputMode;
use subalign::assembler::Sentence;
use subalign::subtitle_processor::{
    ends_sentence, Cue, CueStreamParser, LineKind, ParsedLine, SubtitleRenderer,
};
use crate::common;

const TIME_1: &str = "00:00:01,000 --> 00:00:02,500";

/// Test classification of the three line shapes
#[test]
fn test_classify_withBlockLines_shouldRecognizeIndexTimeAndText() {
    let mut parser = CueStreamParser::new();

    assert_eq!(
        parser.classify("1"),
        Some(ParsedLine { position: 1, kind: LineKind::Index })
    );
    assert_eq!(
        parser.classify(TIME_1),
        Some(ParsedLine { position: 1, kind: LineKind::TimeRange(TIME_1.to_string()) })
    );
    assert_eq!(
        parser.classify("  Hello there  "),
        Some(ParsedLine { position: 1, kind: LineKind::Text("Hello there".to_string()) })
    );
}

/// Test that blank lines produce nothing
#[test]
fn test_classify_withBlankLines_shouldSkip() {
    let mut parser = CueStreamParser::new();
    assert_eq!(parser.classify(""), None);
    assert_eq!(parser.classify("   \t"), None);
}

/// Test time ranges with unusual digit counts
#[test]
fn test_classify_withLooseTimeRange_shouldStillMatch() {
    let mut parser = CueStreamParser::new();
    let loose = "0:0:1,5 --> 0:0:2,75";
    assert_eq!(
        parser.classify(loose).map(|line| line.kind),
        Some(LineKind::TimeRange(loose.to_string()))
    );
}

/// Test that a byte-order mark is only stripped from the first non-blank line
#[test]
fn test_classify_withByteOrderMark_shouldStripOnlyFirstLine() {
    let mut parser = CueStreamParser::new();
    assert_eq!(parser.classify(""), None);
    assert_eq!(parser.classify("\u{FEFF}1").map(|line| line.kind), Some(LineKind::Index));

    let later = parser.classify("\u{FEFF}2").map(|line| line.kind);
    assert_eq!(later, Some(LineKind::Text("\u{FEFF}2".to_string())));
}

/// Test out-of-sequence numbering
#[test]
fn test_classify_withOutOfSequenceIndex_shouldTreatAsText() {
    let mut parser = CueStreamParser::new();
    assert_eq!(parser.classify("1").map(|line| line.kind), Some(LineKind::Index));
    assert_eq!(parser.classify("5").map(|line| line.kind), Some(LineKind::Text("5".to_string())));
    assert_eq!(parser.classify("1").map(|line| line.kind), Some(LineKind::Text("1".to_string())));

    // The running counter still expects 2
    let next = parser.classify("2").expect("line should classify");
    assert_eq!(next, ParsedLine { position: 2, kind: LineKind::Index });
}

/// Test that parsing the same content twice yields the same lines
#[test]
fn test_parse_withSameContentTwice_shouldBeDeterministic() {
    let first: Vec<ParsedLine> = CueStreamParser::parse(common::SAMPLE_SUBTITLE).collect();
    let second: Vec<ParsedLine> = CueStreamParser::parse(common::SAMPLE_SUBTITLE).collect();

    assert_eq!(first, second);
    // 3 blocks of index, time and text
    assert_eq!(first.len(), 9);
}

/// Test CRLF input
#[test]
fn test_parse_withWindowsLineEndings_shouldClassifyLikeUnix() {
    let crlf = common::SAMPLE_SUBTITLE.replace('\n', "\r\n");
    let unix: Vec<ParsedLine> = CueStreamParser::parse(common::SAMPLE_SUBTITLE).collect();
    let windows: Vec<ParsedLine> = CueStreamParser::parse(&crlf).collect();
    assert_eq!(unix, windows);
}

/// Test terminal punctuation detection
#[test]
fn test_ends_sentence_withVariousEndings_shouldDetectTerminalMarks() {
    assert!(ends_sentence("Done."));
    assert!(ends_sentence("Really?"));
    assert!(ends_sentence("Stop!"));
    assert!(ends_sentence("first part;"));
    assert!(ends_sentence("He said \"go.\""));
    assert!(!ends_sentence("I am happy,"));
    assert!(!ends_sentence("no mark"));
    assert!(!ends_sentence("colon:"));
}

fn translated_sentences() -> Vec<Sentence> {
    let mut first = Sentence::new(
        1,
        vec![
            Cue::new(4, TIME_1, "I am happy,"),
            Cue::new(5, "00:00:02,500 --> 00:00:04,000", "you are sad."),
        ],
    );
    first.cues[0].translated_text = "我很高兴，".to_string();
    first.cues[1].translated_text = "你很伤心。".to_string();

    let mut second = Sentence::new(2, vec![Cue::new(7, "00:00:05,000 --> 00:00:07,000", "Next one.")]);
    second.cues[0].translated_text = "下一个。".to_string();

    vec![first, second]
}

/// Test bilingual rendering and renumbering
#[test]
fn test_render_withBilingualMode_shouldRenumberAndPutTranslationFirst() {
    let rendered = SubtitleRenderer::render(&translated_sentences(), OutputMode::Bilingual);

    let expected = "1\n00:00:01,000 --> 00:00:02,500\n我很高兴，\nI am happy,\n\n\
                    2\n00:00:02,500 --> 00:00:04,000\n你很伤心。\nyou are sad.\n\n\
                    3\n00:00:05,000 --> 00:00:07,000\n下一个。\nNext one.\n\n";
    assert_eq!(rendered, expected);
}

/// Test single-language rendering modes
#[test]
fn test_render_withSingleLanguageModes_shouldWriteOneLinePerCue() {
    let sentences = translated_sentences();

    let translated = SubtitleRenderer::render(&sentences, OutputMode::Translated);
    assert!(translated.starts_with("1\n00:00:01,000 --> 00:00:02,500\n我很高兴，\n\n2\n"));
    assert!(!translated.contains("I am happy,"));

    let source = SubtitleRenderer::render(&sentences, OutputMode::Source);
    assert!(source.ends_with("3\n00:00:05,000 --> 00:00:07,000\nNext one.\n\n"));
    assert!(!source.contains("下一个"));
}

/// Test rendering nothing
#[test]
fn test_render_withNoSentences_shouldBeEmpty() {
    assert_eq!(SubtitleRenderer::render(&[], OutputMode::Bilingual), "");
}
