/*!
 * Tests for file utilities
 */

use anyhow::Result;
use std::path::{Path, PathBuf};
use subalign::file_utils::FileManager;
use crate::common;

/// Test output path generation
#[test]
fn test_generate_output_path_withLanguage_shouldReplaceExtension() {
    let path = FileManager::generate_output_path(Path::new("/videos/movie.srt"), Path::new("/out"), "zh", "srt");
    assert_eq!(path, PathBuf::from("/out/movie.zh.srt"));

    let relative = FileManager::generate_output_path(Path::new("movie.srt"), Path::new(""), "punct", "srt");
    assert_eq!(relative, PathBuf::from("movie.punct.srt"));
}

/// Test suffix appending on full names
#[test]
fn test_append_suffix_withSubtitlePath_shouldKeepOriginalExtension() {
    assert_eq!(
        FileManager::append_suffix(Path::new("dir/movie.srt"), "en.txt"),
        PathBuf::from("dir/movie.srt.en.txt")
    );
    assert_eq!(
        FileManager::append_suffix(Path::new("movie.srt"), "json"),
        PathBuf::from("movie.srt.json")
    );
}

/// Test recovering a subtitle path from its record path
#[test]
fn test_strip_record_suffix_withJsonPath_shouldDropJsonOnly() {
    assert_eq!(
        FileManager::strip_record_suffix(Path::new("dir/movie.srt.json")),
        PathBuf::from("dir/movie.srt")
    );
    assert_eq!(
        FileManager::strip_record_suffix(Path::new("dir/movie.srt")),
        PathBuf::from("dir/movie.srt")
    );
}

/// Test writing, reading and existence checks
#[test]
fn test_write_and_read_withNestedPath_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("deeper").join("file.txt");

    FileManager::write_to_file(&path, "content 内容")?;

    assert!(FileManager::file_exists(&path));
    assert!(!FileManager::dir_exists(&path));
    assert!(FileManager::dir_exists(temp_dir.path().join("nested")));
    assert_eq!(FileManager::read_to_string(&path)?, "content 内容");
    assert_eq!(FileManager::read_bytes(&path)?, "content 内容".as_bytes());
    Ok(())
}

/// Test recursive search
#[test]
fn test_find_files_withMixedTree_shouldReturnSortedMatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    FileManager::ensure_dir(root.join("season1"))?;

    common::create_test_file(root, "b.srt", "")?;
    common::create_test_file(root, "a.SRT", "")?;
    common::create_test_file(root, "notes.txt", "")?;
    common::create_test_file(&root.join("season1"), "e01.srt", "")?;

    let found = FileManager::find_files(root, ".srt")?;
    assert_eq!(
        found,
        vec![root.join("a.SRT"), root.join("b.srt"), root.join("season1").join("e01.srt")]
    );
    Ok(())
}

/// Test reading a missing file
#[test]
fn test_read_to_string_withMissingFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    assert!(FileManager::read_to_string(temp_dir.path().join("absent.srt")).is_err());
    Ok(())
}
