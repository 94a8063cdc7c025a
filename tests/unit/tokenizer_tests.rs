/*!
 * Tests for linguistic unit segmentation
 */

use subalign::tokenizer::{is_space, Tokenizer, UnicodeTokenizer};

/// Test that tokens rebuild the input exactly
#[test]
fn test_tokenize_withMixedText_shouldConcatenateToInput() {
    let tokenizer = UnicodeTokenizer::new();
    for text in ["Hello, world.", "我很高兴，你很伤心。", "  spaced   out  ", "价格是3,14元 and 2 more", ""] {
        assert_eq!(tokenizer.tokenize(text).concat(), text);
    }
}

/// Test that every ideograph is a unit of its own
#[test]
fn test_tokenize_withChinese_shouldSplitPerIdeograph() {
    let tokenizer = UnicodeTokenizer::new();
    assert_eq!(tokenizer.tokenize("我很高兴。"), vec!["我", "很", "高", "兴", "。"]);
}

/// Test numeric groups and contractions staying whole
#[test]
fn test_tokenize_withNumbersAndContractions_shouldKeepThemWhole() {
    let tokenizer = UnicodeTokenizer::new();
    assert_eq!(tokenizer.tokenize("3,14"), vec!["3,14"]);
    assert_eq!(tokenizer.tokenize("don't"), vec!["don't"]);
}

/// Test counting of visible units
#[test]
fn test_visible_units_withSpacesAndPunctuation_shouldCountNonSpaceTokens() {
    let tokenizer = UnicodeTokenizer::new();
    assert_eq!(tokenizer.visible_units("Hello, world."), 4);
    assert_eq!(tokenizer.visible_units("我很 高兴"), 4);
    assert_eq!(tokenizer.visible_units("   "), 0);
    assert_eq!(tokenizer.visible_units(""), 0);
}

/// Test whitespace detection
#[test]
fn test_is_space_withVariousTokens_shouldDetectWhitespace() {
    assert!(is_space(" "));
    assert!(is_space("\t "));
    assert!(is_space("\u{3000}"));
    assert!(!is_space("a"));
    assert!(!is_space("，"));
}
