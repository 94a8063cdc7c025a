/*!
 * Punctuation restoration for unpunctuated source subtitles.
 *
 * Each sentence's cue text is sent to a restoration service once. The
 * service's punctuation is then written back into the individual cue
 * fragments by walking both token streams side by side, so cue boundaries
 * and wording stay exactly as they were.
 */

use log::{debug, info, warn};

use crate::assembler::Sentence;
use crate::errors::ProviderError;
use crate::providers::PunctuationService;
use crate::tokenizer::{is_space, Tokenizer, UnicodeTokenizer};

/// How many restored words ahead a source word may be matched
const MATCH_WINDOW: usize = 3;

/// Whether a token consists only of punctuation
pub fn is_punctuation(token: &str) -> bool {
    !token.is_empty()
        && token.chars().all(|c| {
            c.is_ascii_punctuation()
                || matches!(
                    c,
                    '，' | '。' | '？' | '！' | '；' | '：' | '、' | '“' | '”' | '‘' | '’' | '（' | '）' | '…'
                )
        })
}

fn same_word(restored: &str, original: &str) -> bool {
    restored == original || restored.to_lowercase() == original.to_lowercase()
}

/// Offset of `word` in `candidates`, looking at most `MATCH_WINDOW` words ahead.
///
/// Punctuation tokens do not count against the window.
fn find_match(candidates: &[&str], word: &str) -> Option<usize> {
    let mut words = 0;
    for (offset, candidate) in candidates.iter().enumerate() {
        if same_word(candidate, word) {
            return Some(offset);
        }
        if !is_punctuation(candidate) {
            words += 1;
            if words == MATCH_WINDOW {
                break;
            }
        }
    }
    None
}

/// Append `mark` to the last word of `text`, keeping trailing whitespace after it
fn attach(text: &mut String, mark: &str) {
    let kept = text.trim_end().len();
    if kept == 0 {
        return;
    }
    let trailing = text.split_off(kept);
    text.push_str(mark);
    text.push_str(&trailing);
}

/// A sentence the service could not punctuate
#[derive(Debug)]
pub struct PunctuationFailure {
    /// 1-based sentence index
    pub destination_index: usize,
    /// What went wrong
    pub error: ProviderError,
}

/// Outcome of a restoration run
#[derive(Debug, Default)]
pub struct PunctuationReport {
    /// Sentences rewritten with restored punctuation
    pub restored: usize,
    /// Sentences left unchanged because the service failed
    pub failures: Vec<PunctuationFailure>,
}

impl PunctuationReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives a punctuation service over assembled sentences
#[derive(Debug, Clone)]
pub struct PunctuationRestorer<T: Tokenizer = UnicodeTokenizer> {
    tokenizer: T,
}

impl Default for PunctuationRestorer<UnicodeTokenizer> {
    fn default() -> Self {
        Self::new(UnicodeTokenizer::new())
    }
}

impl<T: Tokenizer> PunctuationRestorer<T> {
    pub fn new(tokenizer: T) -> Self {
        Self { tokenizer }
    }

    /// Restore punctuation in every sentence, one request at a time.
    ///
    /// A failed request leaves its sentence untouched and is recorded in
    /// the report; the run always continues.
    pub async fn restore_all(
        &self,
        sentences: &mut [Sentence],
        service: &dyn PunctuationService,
    ) -> PunctuationReport {
        let mut report = PunctuationReport::default();

        for sentence in sentences.iter_mut() {
            match self.restore_sentence(sentence, service).await {
                Ok(()) => report.restored += 1,
                Err(error) => {
                    warn!(
                        "Punctuation restoration failed for sentence {}: {}",
                        sentence.destination_index, error
                    );
                    report.failures.push(PunctuationFailure {
                        destination_index: sentence.destination_index,
                        error,
                    });
                }
            }
        }

        info!(
            "Punctuation restored for {} of {} sentences",
            report.restored,
            sentences.len()
        );
        report
    }

    /// Restore punctuation in one sentence's cues
    pub async fn restore_sentence(
        &self,
        sentence: &mut Sentence,
        service: &dyn PunctuationService,
    ) -> Result<(), ProviderError> {
        let fragments: Vec<&str> = sentence.cues.iter().map(|cue| cue.source_text.as_str()).collect();
        let text = fragments.join(" ");
        if text.trim().is_empty() {
            return Ok(());
        }

        let restored = service.restore(&text).await?;
        debug!("Sentence {} restored as: {}", sentence.destination_index, restored);

        let rewritten = self.reinsert(&fragments, &restored);
        for (cue, text) in sentence.cues.iter_mut().zip(rewritten) {
            cue.source_text = text;
        }
        sentence.refresh_source_text();
        Ok(())
    }

    /// Copy the punctuation of `restored` into `fragments`.
    ///
    /// Words are matched in order, case-insensitively, within a small
    /// window. Punctuation the service placed before a matched word is
    /// attached to the preceding word; punctuation right after a fragment's
    /// last word stays with that fragment. Words the service changed or
    /// added are ignored.
    pub fn reinsert(&self, fragments: &[&str], restored: &str) -> Vec<String> {
        let restored: Vec<&str> = self
            .tokenizer
            .tokenize(restored)
            .into_iter()
            .filter(|token| !is_space(token))
            .collect();

        let mut cursor = 0;
        let mut output = Vec::with_capacity(fragments.len());

        for fragment in fragments {
            let mut text = String::new();

            for token in self.tokenizer.tokenize(fragment) {
                if is_space(token) {
                    text.push_str(token);
                    continue;
                }

                let matched = find_match(&restored[cursor..], token);

                if let Some(offset) = matched {
                    for skipped in &restored[cursor..cursor + offset] {
                        if is_punctuation(skipped) {
                            attach(&mut text, skipped);
                        }
                    }
                    cursor += offset + 1;
                }
                text.push_str(token);
            }

            while cursor < restored.len() && is_punctuation(restored[cursor]) {
                attach(&mut text, restored[cursor]);
                cursor += 1;
            }

            output.push(text.trim_end().to_string());
        }

        output
    }
}
