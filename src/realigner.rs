/*!
 * Splitting one translated sentence back across its source cues.
 *
 * Translation happens per sentence, display happens per cue. For a
 * sentence of N cues the realigner cuts the translation into N consecutive
 * fragments. Cuts prefer full-width clause commas when source and
 * translation agree on clause structure, and otherwise follow each cue's
 * share of the source's linguistic units, snapping to nearby punctuation.
 *
 * This is a heuristic: fragments may be uneven, but the last cue always
 * absorbs whatever is left, so no text is reordered.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::assembler::{normalize_source, Sentence};
use crate::tokenizer::{is_space, Tokenizer, UnicodeTokenizer};

/// Divisor of the expected share giving the search band around it
pub const SLACK_DIVISOR: f64 = 3.0;

/// Tokens held back per later cue so none is left empty
pub const RESERVE_PER_MEMBER: usize = 2;

/// Clause separator in translated text
pub const CLAUSE_SEPARATOR: char = '，';

// Tokens a cut may follow
const BREAK_TOKENS: [&str; 8] = ["，", "。", "”", "？", "！", "；", "）", ")"];

static SPACE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());

static NUMERAL_COMMA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+，[0-9]+").unwrap());

fn is_break(token: &str) -> bool {
    BREAK_TOKENS.contains(&token)
}

/// Normalize a translated line before splitting.
///
/// Every ASCII comma becomes a full-width clause separator, except
/// between digits where it is a numeral separator (`3,14`). Space runs
/// collapse to one space.
pub fn preprocess(text: &str) -> String {
    let wide = text.replace(',', "，");
    let collapsed = SPACE_RUN_REGEX.replace_all(&wide, " ");
    NUMERAL_COMMA_REGEX
        .replace_all(&collapsed, |caps: &Captures| caps[0].replace(CLAUSE_SEPARATOR, ","))
        .into_owned()
}

/// Consecutive fragments cut from the front of one text
struct FragmentBuilder<'a> {
    text: &'a str,
    offset: usize,
    fragments: Vec<String>,
}

impl<'a> FragmentBuilder<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            offset: 0,
            fragments: Vec::new(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.offset..]
    }

    /// Cut `len` bytes off the front of the remaining text
    fn take(&mut self, len: usize) {
        let rest = self.rest();
        let fragment = rest.get(..len).unwrap_or(rest);
        self.offset += fragment.len();
        self.fragments.push(fragment.to_string());
    }

    fn finish(self) -> Vec<String> {
        self.fragments
    }
}

/// Splits translated sentences across their member cues
#[derive(Debug, Clone)]
pub struct Realigner<T: Tokenizer = UnicodeTokenizer> {
    tokenizer: T,
}

impl Default for Realigner<UnicodeTokenizer> {
    fn default() -> Self {
        Self::new(UnicodeTokenizer::new())
    }
}

impl<T: Tokenizer> Realigner<T> {
    pub fn new(tokenizer: T) -> Self {
        Self { tokenizer }
    }

    /// Store `translated` on the sentence and distribute it over its cues
    pub fn apply(&self, sentence: &mut Sentence, translated: &str) {
        let fragments = self.realign(sentence, translated);
        sentence.full_translated_text = translated.to_string();
        for (cue, fragment) in sentence.cues.iter_mut().zip(fragments) {
            cue.translated_text = fragment;
        }
    }

    /// One translated fragment per member cue of `sentence`
    pub fn realign(&self, sentence: &Sentence, translated: &str) -> Vec<String> {
        let text = preprocess(translated);
        let sources: Vec<&str> = sentence.cues.iter().map(|cue| cue.source_text.as_str()).collect();
        let fragments = self.split(&sources, &text);
        debug!(
            "Sentence {} realigned into {:?}",
            sentence.destination_index, fragments
        );
        fragments
    }

    /// Split preprocessed `text` into one fragment per source fragment
    pub fn split(&self, sources: &[&str], text: &str) -> Vec<String> {
        let count = sources.len();
        let mut builder = FragmentBuilder::new(text);
        let mut previous_comma_split = true;

        for index in 0..count {
            let rest = builder.rest();

            let cut = if index == count - 1 {
                rest.len()
            } else if let Some(cut) = previous_comma_split
                .then(|| Self::clause_cut(sources[index], rest))
                .flatten()
            {
                cut
            } else {
                previous_comma_split = false;
                self.proportional_cut(&sources[index..], rest)
            };

            builder.take(cut);
        }

        builder.finish()
    }

    /// Clause-for-clause cut for a source fragment ending on a comma.
    ///
    /// Takes one translated clause per comma in the source fragment when the
    /// remaining translation has at least as many clauses.
    fn clause_cut(source: &str, rest: &str) -> Option<usize> {
        if !source.trim_end().ends_with(',') {
            return None;
        }

        let source_clauses = source.split(',').count();
        let clauses: Vec<&str> = rest.split(CLAUSE_SEPARATOR).collect();
        if clauses.len() < source_clauses {
            return None;
        }

        let cut = clauses
            .iter()
            .take(source_clauses - 1)
            .map(|clause| clause.len() + CLAUSE_SEPARATOR.len_utf8())
            .sum();
        Some(cut)
    }

    /// Cut proportional to the first source fragment's share of `sources`
    fn proportional_cut(&self, sources: &[&str], rest: &str) -> usize {
        let source_units = self.tokenizer.visible_units(&normalize_source(sources));
        let member_units = self.tokenizer.visible_units(sources[0]);

        let tokens = self.tokenizer.tokenize(rest);
        let translated_units = tokens.iter().filter(|token| !is_space(token)).count();

        let mut ends = Vec::with_capacity(tokens.len());
        let mut end = 0;
        for token in &tokens {
            end += token.len();
            ends.push(end);
        }

        let reserved = (sources.len() - 1) * RESERVE_PER_MEMBER;
        let limit = tokens.len().saturating_sub(reserved);

        // No source units to share by: take everything up to the reservation floor
        if source_units == 0 {
            return limit.checked_sub(1).map_or(0, |last| ends[last]);
        }

        let target = member_units as f64 / source_units as f64 * translated_units as f64;
        let slack = target / SLACK_DIVISOR;

        let mut walked = 0.0;
        let mut cut = 0;
        let mut snapshot: Option<usize> = None;

        for k in 0..tokens.len() {
            if walked >= target && !is_break(tokens[k]) {
                // Share reached mid-clause: look a little further for a break
                let mut ahead = 0.0;
                for j in k..tokens.len().saturating_sub(1) {
                    if ahead <= slack && j + 2 < tokens.len() {
                        if is_break(tokens[j]) {
                            cut = ends[j];
                            break;
                        }
                        if !is_space(tokens[j]) {
                            ahead += 1.0;
                        }
                    } else {
                        if let Some(snapshot) = snapshot {
                            cut = snapshot;
                        }
                        break;
                    }
                }
                break;
            }

            if k < limit {
                cut = ends[k];
            } else {
                break;
            }

            if !is_space(tokens[k]) {
                walked += 1.0;
            }
            if is_break(tokens[k]) && target - walked <= slack {
                snapshot = Some(cut);
            }
        }

        cut
    }
}
