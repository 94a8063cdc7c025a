/*!
 * Linguistic unit segmentation.
 *
 * The realigner and the punctuation driver only need two things from a
 * segmenter: an ordered token stream that concatenates back to the input,
 * and a count of the tokens that are not whitespace.
 */

use unicode_segmentation::UnicodeSegmentation;

/// Splits text into word, punctuation and whitespace tokens
pub trait Tokenizer: Send + Sync {
    /// Tokenize `text`; the returned tokens concatenate to exactly `text`
    fn tokenize<'t>(&self, text: &'t str) -> Vec<&'t str>;

    /// Number of tokens that are not whitespace
    fn visible_units(&self, text: &str) -> usize {
        self.tokenize(text)
            .into_iter()
            .filter(|token| !is_space(token))
            .count()
    }
}

/// Whether a token is whitespace only
pub fn is_space(token: &str) -> bool {
    token.chars().all(char::is_whitespace)
}

/// UAX #29 word-boundary tokenizer.
///
/// Each CJK ideograph becomes its own unit, while numeric groups such as
/// `3,14` and contractions such as `don't` stay whole.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeTokenizer;

impl UnicodeTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for UnicodeTokenizer {
    fn tokenize<'t>(&self, text: &'t str) -> Vec<&'t str> {
        text.split_word_bounds().collect()
    }
}
