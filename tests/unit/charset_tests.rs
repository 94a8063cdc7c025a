/*!
 * Tests for charset voting and decoding
 */

use encoding_rs::{BIG5, GB18030, UTF_8, WINDOWS_1252};
use subalign::charset::{Charset, CharsetResolver};

const SIMPLIFIED: &str = "我们今天去公园散步，天气非常好，阳光明媚。\n\
                          他说这个问题已经解决了，我们不需要再担心。\n\
                          这部电影讲述了一个关于友谊和勇气的故事。\n\
                          请大家注意安全，晚上早点回家休息。\n";

/// Test that plain ASCII defaults to UTF-8
#[test]
fn test_detect_withAsciiOnly_shouldDefaultToUtf8() {
    assert_eq!(CharsetResolver::detect(b"hello world\nsecond line\n"), Charset::Utf8);
    assert_eq!(CharsetResolver::detect(b""), Charset::Utf8);
}

/// Test UTF-8 detection
#[test]
fn test_detect_withUtf8Chinese_shouldPickUtf8() {
    assert_eq!(CharsetResolver::detect(SIMPLIFIED.as_bytes()), Charset::Utf8);
}

/// Test GB18030 detection
#[test]
fn test_detect_withGbEncodedChinese_shouldPickGb18030() {
    let (bytes, _, _) = GB18030.encode(SIMPLIFIED);
    assert_eq!(CharsetResolver::detect(&bytes), Charset::Gb18030);

    let decoded = CharsetResolver::read_text(&bytes);
    assert_eq!(decoded.charset, Charset::Gb18030);
    assert_eq!(decoded.text, SIMPLIFIED);
    assert!(!decoded.had_errors);
}

/// Test explicit BIG5 decoding
#[test]
fn test_decode_withBig5Bytes_shouldDecodeTraditionalText() {
    let text = "我們今天去公園散步。";
    let (bytes, _, _) = BIG5.encode(text);

    let decoded = CharsetResolver::decode(Charset::Big5, &bytes);
    assert_eq!(decoded.text, text);
    assert_eq!(decoded.charset, Charset::Big5);
    assert!(!decoded.had_errors);
}

/// Test byte-order mark removal
#[test]
fn test_decode_withUtf8Bom_shouldStripIt() {
    let decoded = CharsetResolver::decode(Charset::Utf8, "\u{FEFF}第一行\n".as_bytes());
    assert_eq!(decoded.text, "第一行\n");
}

/// Test malformed input reporting
#[test]
fn test_decode_withInvalidUtf8_shouldReportErrors() {
    let decoded = CharsetResolver::decode(Charset::Utf8, &[b'a', 0xFF, b'b']);
    assert!(decoded.had_errors);
    assert_eq!(decoded.text, "a\u{FFFD}b");
}

/// Test display names
#[test]
fn test_charset_display_withEachCandidate_shouldUseUpperCaseNames() {
    let names: Vec<String> = Charset::CANDIDATES.iter().map(|c| c.to_string()).collect();
    assert_eq!(names, vec!["UTF8", "GB18030", "BIG5"]);
}

/// Test a western single-byte subtitle outside the translated-file candidates
#[test]
fn test_read_source_withWindows1252Bytes_shouldKeepAccents() {
    let text = "1\n00:00:01,000 --> 00:00:02,000\nCaf\u{e9} is open.\n\n\
                2\n00:00:03,000 --> 00:00:04,000\nHer r\u{e9}sum\u{e9} is ready.\n\n\
                3\n00:00:05,000 --> 00:00:06,000\nThe d\u{e9}cor at the caf\u{e9} is lovely.\n\n";
    let (bytes, _, _) = WINDOWS_1252.encode(text);
    assert!(std::str::from_utf8(&bytes).is_err());

    let decoded = CharsetResolver::read_source(&bytes);
    assert_eq!(decoded.text, text);
    assert!(!decoded.had_errors);
}

/// Test UTF-8 source subtitles passing through with the BOM removed
#[test]
fn test_read_source_withUtf8Bom_shouldDecodeAsUtf8() {
    let decoded = CharsetResolver::read_source("\u{FEFF}Caf\u{e9}\n".as_bytes());
    assert_eq!(decoded.encoding, UTF_8);
    assert_eq!(decoded.text, "Caf\u{e9}\n");
    assert!(!decoded.had_errors);
}
