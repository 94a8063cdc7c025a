/*!
 * Tests for ISO language code utilities
 */

use subalign::language_utils::{get_language_name, normalize_to_part1_or_part2t, normalize_to_part2t};

/// Test normalization to three-letter codes
#[test]
fn test_normalize_to_part2t_withVariousCodes_shouldReturnTerminologicalCode() {
    assert_eq!(normalize_to_part2t("en").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("ZH").unwrap(), "zho");
    assert_eq!(normalize_to_part2t("chi").unwrap(), "zho");
    assert_eq!(normalize_to_part2t("fre").unwrap(), "fra");
    assert_eq!(normalize_to_part2t("deu").unwrap(), "deu");
    assert!(normalize_to_part2t("xx").is_err());
    assert!(normalize_to_part2t("english").is_err());
}

/// Test normalization preferring two-letter codes
#[test]
fn test_normalize_to_part1_or_part2t_withVariousCodes_shouldPreferTwoLetters() {
    assert_eq!(normalize_to_part1_or_part2t("zho").unwrap(), "zh");
    assert_eq!(normalize_to_part1_or_part2t("ger").unwrap(), "de");
    assert_eq!(normalize_to_part1_or_part2t("es").unwrap(), "es");
    assert!(normalize_to_part1_or_part2t("").is_err());
}

/// Test language names
#[test]
fn test_get_language_name_withValidCodes_shouldReturnEnglishName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("fra").unwrap(), "French");
    assert!(get_language_name("xyz").is_err());
}
