use std::fmt::{self, Write};
use regex::Regex;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use log::trace;

use crate::app_config::OutputMode;
use crate::assembler::Sentence;

// @module: Subtitle line classification and rendering

// @const: Index line, digits only
static INDEX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+$").unwrap()
});

// @const: Time range line, digit counts unconstrained
static TIME_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d*:\d*:\d*\d*:*,\d* --> \d*:\d*:\d*\d*:*,\d*$").unwrap()
});

// @const: Sentence-ending mark, optionally followed by quotes
static TERMINAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([;.?!])"*$"#).unwrap()
});

const BOM: char = '\u{FEFF}';

/// Whether a text fragment ends a sentence
pub fn ends_sentence(text: &str) -> bool {
    TERMINAL_REGEX.is_match(text)
}

// @struct: Single subtitle display unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    // @field: 1-based index in the source file
    #[serde(rename = "sPos")]
    pub position: usize,

    // @field: Time range line, kept verbatim
    #[serde(rename = "sTime")]
    pub time_range: String,

    // @field: Translated fragment
    #[serde(rename = "sCSub", default)]
    pub translated_text: String,

    // @field: Source fragment
    #[serde(rename = "sSub")]
    pub source_text: String,
}

impl Cue {
    pub fn new(position: usize, time_range: impl Into<String>, source_text: impl Into<String>) -> Self {
        Cue {
            position,
            time_range: time_range.into(),
            translated_text: String::new(),
            source_text: source_text.into(),
        }
    }
}

/// Shape of a non-blank subtitle line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Index line matching the expected running number
    Index,
    /// Time range line
    TimeRange(String),
    /// Anything else
    Text(String),
}

/// One classified line, tagged with the running cue number it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// Running cue number (0 before the first index line)
    pub position: usize,
    /// Line classification
    pub kind: LineKind,
}

/// Line classifier state.
///
/// The running index only advances on a digits-only line equal to the
/// expected next number. Any other digits-only line is treated as text, so
/// damaged numbering never aborts a run.
#[derive(Debug, Clone)]
pub struct CueStreamParser {
    next_index: usize,
    position: usize,
    first_line: bool,
}

impl Default for CueStreamParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CueStreamParser {
    pub fn new() -> Self {
        Self {
            next_index: 1,
            position: 0,
            first_line: true,
        }
    }

    /// Classify one raw line; blank lines yield `None`
    pub fn classify(&mut self, line: &str) -> Option<ParsedLine> {
        let mut line = line.trim();
        if line.is_empty() {
            return None;
        }

        if self.first_line {
            self.first_line = false;
            line = line.trim_start_matches(BOM).trim();
            if line.is_empty() {
                return None;
            }
        }

        if INDEX_REGEX.is_match(line) && line.parse::<usize>().ok() == Some(self.next_index) {
            self.position = self.next_index;
            self.next_index += 1;
            return Some(ParsedLine { position: self.position, kind: LineKind::Index });
        }

        let kind = if TIME_RANGE_REGEX.is_match(line) {
            LineKind::TimeRange(line.to_string())
        } else {
            trace!("Text line for cue {}: {}", self.position, line);
            LineKind::Text(line.to_string())
        };

        Some(ParsedLine { position: self.position, kind })
    }

    /// Lazily classify every line of `content` with a fresh parser
    pub fn parse(content: &str) -> CueLines<'_> {
        CueLines {
            lines: content.lines(),
            parser: CueStreamParser::new(),
        }
    }
}

/// Iterator over the classified lines of one subtitle text
pub struct CueLines<'a> {
    lines: std::str::Lines<'a>,
    parser: CueStreamParser,
}

impl Iterator for CueLines<'_> {
    type Item = ParsedLine;

    fn next(&mut self) -> Option<ParsedLine> {
        for line in self.lines.by_ref() {
            if let Some(parsed) = self.parser.classify(line) {
                return Some(parsed);
            }
        }
        None
    }
}

/// Renders sentences back into a numbered subtitle file
pub struct SubtitleRenderer;

impl SubtitleRenderer {
    /// Render every cue in order, renumbered from 1
    pub fn render(sentences: &[Sentence], mode: OutputMode) -> String {
        let mut output = String::new();
        let mut number = 0;

        for cue in sentences.iter().flat_map(|sentence| sentence.cues.iter()) {
            number += 1;
            // Writing into a String cannot fail
            let _ = write!(output, "{}", RenderedCue { number, cue, mode });
        }

        output
    }
}

struct RenderedCue<'a> {
    number: usize,
    cue: &'a Cue,
    mode: OutputMode,
}

impl fmt::Display for RenderedCue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.number)?;
        writeln!(f, "{}", self.cue.time_range)?;
        match self.mode {
            OutputMode::Bilingual => {
                writeln!(f, "{}", self.cue.translated_text)?;
                writeln!(f, "{}", self.cue.source_text)?;
            }
            OutputMode::Translated => writeln!(f, "{}", self.cue.translated_text)?,
            OutputMode::Source => writeln!(f, "{}", self.cue.source_text)?,
        }
        writeln!(f)
    }
}
