/*!
 * Character set detection and decoding for subtitle and translated files.
 *
 * Translators hand back files in UTF-8, GB18030 or BIG5. The resolver
 * takes a majority vote over sniffing results and decodes with the winner.
 * Source subtitles may come in any legacy encoding and are decoded with
 * the detector's own guess.
 */

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, BIG5, GB18030, GBK, UTF_8};
use log::debug;
use std::fmt;

/// Character sets accepted for translated input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charset {
    Utf8,
    Gb18030,
    Big5,
}

impl Charset {
    /// Candidates in tie-break order
    pub const CANDIDATES: [Charset; 3] = [Charset::Utf8, Charset::Gb18030, Charset::Big5];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF8",
            Self::Gb18030 => "GB18030",
            Self::Big5 => "BIG5",
        }
    }

    fn encoding(&self) -> &'static Encoding {
        match self {
            Self::Utf8 => UTF_8,
            Self::Gb18030 => GB18030,
            Self::Big5 => BIG5,
        }
    }

    /// Map a sniffed encoding onto a candidate, if it is one
    fn from_encoding(encoding: &'static Encoding) -> Option<Self> {
        if encoding == UTF_8 {
            Some(Self::Utf8)
        } else if encoding == GBK || encoding == GB18030 {
            Some(Self::Gb18030)
        } else if encoding == BIG5 {
            Some(Self::Big5)
        } else {
            None
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Result of decoding a byte buffer
#[derive(Debug, Clone)]
pub struct DecodedText {
    /// UTF-8 text with any leading BOM removed
    pub text: String,
    /// Charset used for decoding
    pub charset: Charset,
    /// Whether malformed sequences were replaced during decoding
    pub had_errors: bool,
}

/// Result of decoding a source subtitle
#[derive(Debug, Clone)]
pub struct DecodedSource {
    /// UTF-8 text with any leading BOM removed
    pub text: String,
    /// Encoding used for decoding
    pub encoding: &'static Encoding,
    /// Whether malformed sequences were replaced during decoding
    pub had_errors: bool,
}

/// Sniffs and decodes subtitle and translated text files
pub struct CharsetResolver;

impl CharsetResolver {
    /// Pick the most likely charset by majority vote.
    ///
    /// The whole buffer casts one vote and every line containing non-ASCII
    /// bytes casts another. Ties go to the earlier entry of
    /// [`Charset::CANDIDATES`]; no votes at all means UTF-8.
    pub fn detect(bytes: &[u8]) -> Charset {
        let mut votes = [0usize; 3];

        let mut cast = |buffer: &[u8]| {
            if let Some(charset) = Self::sniff(buffer) {
                if let Some(slot) = Charset::CANDIDATES.iter().position(|c| *c == charset) {
                    votes[slot] += 1;
                }
            }
        };

        cast(bytes);
        for line in bytes.split(|b| *b == b'\n') {
            if !line.is_ascii() {
                cast(line);
            }
        }

        debug!(
            "Charset votes: UTF8={} GB18030={} BIG5={}",
            votes[0], votes[1], votes[2]
        );

        let mut best = 0;
        for slot in 1..votes.len() {
            if votes[slot] > votes[best] {
                best = slot;
            }
        }
        Charset::CANDIDATES[best]
    }

    /// Decode bytes with the given charset, stripping a leading BOM
    pub fn decode(charset: Charset, bytes: &[u8]) -> DecodedText {
        let (text, had_errors) = charset.encoding().decode_with_bom_removal(bytes);
        DecodedText {
            text: text.into_owned(),
            charset,
            had_errors,
        }
    }

    /// Detect then decode
    pub fn read_text(bytes: &[u8]) -> DecodedText {
        Self::decode(Self::detect(bytes), bytes)
    }

    /// Decode a source subtitle in whatever encoding it appears to use.
    ///
    /// Valid UTF-8 (and plain ASCII) is taken as is. Anything else is
    /// decoded with the detector's best guess over the whole buffer, so
    /// windows-1252 and other single-byte files survive. A BOM overrides
    /// the guess.
    pub fn read_source(bytes: &[u8]) -> DecodedSource {
        let guess = if std::str::from_utf8(bytes).is_ok() {
            UTF_8
        } else {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        };

        let (text, encoding, had_errors) = guess.decode(bytes);
        DecodedSource {
            text: text.into_owned(),
            encoding,
            had_errors,
        }
    }

    fn sniff(buffer: &[u8]) -> Option<Charset> {
        if buffer.is_empty() || buffer.is_ascii() {
            return None;
        }
        if std::str::from_utf8(buffer).is_ok() {
            return Some(Charset::Utf8);
        }
        let mut detector = EncodingDetector::new();
        detector.feed(buffer, true);
        Charset::from_encoding(detector.guess(None, true))
    }
}
