/*!
 * Sentence assembly from a classified cue stream.
 *
 * Subtitle cues are display fragments; translation works on whole
 * sentences. The assembler groups consecutive cues until one ends with a
 * sentence-ending mark and seals the group at the next cue boundary.
 */

use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::subtitle_processor::{ends_sentence, Cue, CueStreamParser, LineKind, ParsedLine};

static SPACE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());

/// Join cue fragments into the text handed to the translator.
///
/// Hyphens become spaces and space runs collapse to one.
pub fn normalize_source(fragments: &[&str]) -> String {
    let joined = fragments.join(" ").replace('-', " ");
    SPACE_RUN_REGEX.replace_all(&joined, " ").trim().to_string()
}

/// A group of cues that together form one sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// 1-based order among sentences
    #[serde(rename = "dPos")]
    pub destination_index: usize,

    /// Translation of the whole sentence, once known
    #[serde(rename = "dCSub", default)]
    pub full_translated_text: String,

    /// Normalized source text sent for translation
    #[serde(rename = "dESub")]
    pub full_source_text: String,

    /// Number of member cues
    #[serde(rename = "Num")]
    pub member_count: usize,

    /// Member cues in display order
    #[serde(rename = "SplitInfo")]
    pub cues: Vec<Cue>,
}

impl Sentence {
    /// Build a sentence from its member cues
    pub fn new(destination_index: usize, cues: Vec<Cue>) -> Self {
        let mut sentence = Sentence {
            destination_index,
            full_translated_text: String::new(),
            full_source_text: String::new(),
            member_count: cues.len(),
            cues,
        };
        sentence.refresh_source_text();
        sentence
    }

    /// Recompute `full_source_text` from the member cues
    pub fn refresh_source_text(&mut self) {
        let fragments: Vec<&str> = self.cues.iter().map(|cue| cue.source_text.as_str()).collect();
        self.full_source_text = normalize_source(&fragments);
    }
}

/// Sealed sentences of one subtitle file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    pub sentences: Vec<Sentence>,
}

impl Assembly {
    /// Total number of member cues across all sentences
    pub fn cue_count(&self) -> usize {
        self.sentences.iter().map(|s| s.cues.len()).sum()
    }

    /// The translation request: one newline-terminated line per sentence.
    ///
    /// Translators must return exactly one line per request line, in order;
    /// line position is the only link back to the sentences.
    pub fn translation_request(&self) -> String {
        let mut request = String::new();
        for sentence in &self.sentences {
            request.push_str(&sentence.full_source_text);
            request.push('\n');
        }
        request
    }
}

/// Cue number and time range of the block being read
#[derive(Debug, Default)]
struct PendingCue {
    position: usize,
    time_range: String,
}

/// State machine grouping cues into sentences.
///
/// A text line whose time range equals the last member's is merged into that
/// member, so multi-line blocks stay one cue. A sentence whose latest text
/// ended with a sentence-ending mark is sealed at the next index line or at
/// end of stream.
#[derive(Debug, Default)]
pub struct SentenceAssembler {
    sentences: Vec<Sentence>,
    open: Vec<Cue>,
    current: PendingCue,
    terminal_seen: bool,
}

impl SentenceAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and assemble a whole subtitle text
    pub fn assemble(content: &str) -> Assembly {
        let mut assembler = Self::new();
        for line in CueStreamParser::parse(content) {
            assembler.push(line);
        }
        let assembly = assembler.finish();
        info!(
            "Assembled {} sentences from {} cues",
            assembly.sentences.len(),
            assembly.cue_count()
        );
        assembly
    }

    /// Feed one classified line
    pub fn push(&mut self, line: ParsedLine) {
        match line.kind {
            LineKind::Index => {
                if self.terminal_seen {
                    self.seal();
                }
                self.current = PendingCue {
                    position: line.position,
                    time_range: String::new(),
                };
            }
            LineKind::TimeRange(time_range) => {
                self.current.time_range = time_range;
            }
            LineKind::Text(text) => {
                self.terminal_seen = ends_sentence(&text);
                let same_block = self
                    .open
                    .last()
                    .is_some_and(|last| last.time_range == self.current.time_range);

                if same_block {
                    if let Some(last) = self.open.last_mut() {
                        last.source_text.push(' ');
                        last.source_text.push_str(&text);
                    }
                } else {
                    self.open.push(Cue::new(
                        self.current.position,
                        self.current.time_range.clone(),
                        text,
                    ));
                }
            }
        }
    }

    /// Seal any partial sentence and return the result
    pub fn finish(mut self) -> Assembly {
        self.seal();
        Assembly {
            sentences: self.sentences,
        }
    }

    fn seal(&mut self) {
        self.terminal_seen = false;
        if self.open.is_empty() {
            return;
        }
        let cues = std::mem::take(&mut self.open);
        let sentence = Sentence::new(self.sentences.len() + 1, cues);
        debug!(
            "Sealed sentence {} with {} cues: {}",
            sentence.destination_index, sentence.member_count, sentence.full_source_text
        );
        self.sentences.push(sentence);
    }
}
