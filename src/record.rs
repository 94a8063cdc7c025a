/*!
 * Intermediate alignment record.
 *
 * The record stores every sentence with its cues, source and translated
 * text, so a user can hand-edit alignment results and regenerate the final
 * subtitle without realigning. Field names match the JSON written by the
 * earlier TrSubtitle tool, so its records load unchanged.
 */

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::app_config::OutputMode;
use crate::assembler::Sentence;
use crate::errors::{AppError, RecordError, SubtitleError};
use crate::file_utils::FileManager;
use crate::subtitle_processor::SubtitleRenderer;

/// Ordered list of aligned sentences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlignmentRecord {
    pub sentences: Vec<Sentence>,
}

impl AlignmentRecord {
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }

    /// Check that every sentence's member count matches its cues
    pub fn validate(&self) -> Result<(), RecordError> {
        for sentence in &self.sentences {
            if sentence.member_count != sentence.cues.len() {
                return Err(RecordError::Inconsistent {
                    destination_index: sentence.destination_index,
                    declared: sentence.member_count,
                    actual: sentence.cues.len(),
                });
            }
        }
        Ok(())
    }

    /// Render the final subtitle file
    pub fn render(&self, mode: OutputMode) -> String {
        SubtitleRenderer::render(&self.sentences, mode)
    }

    /// Serialize to indented JSON
    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON text, tolerating a leading BOM
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        let json = json.trim_start_matches('\u{FEFF}');
        let record: AlignmentRecord =
            serde_json::from_str(json).map_err(|e| RecordError::Malformed(e.to_string()))?;
        record.validate()?;
        Ok(record)
    }
}

/// Reads and writes alignment records on disk
pub struct RecordStore;

impl RecordStore {
    /// Write `record` to `path` as indented JSON
    pub fn save<P: AsRef<Path>>(path: P, record: &AlignmentRecord) -> Result<(), AppError> {
        let path = path.as_ref();
        FileManager::write_to_file(path, &record.to_json()?)?;
        info!("Alignment record written: {:?}", path);
        Ok(())
    }

    /// Load a record from `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<AlignmentRecord, AppError> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            return Err(SubtitleError::MissingInput(path.to_path_buf()).into());
        }

        let json = FileManager::read_to_string(path)?;
        let record = AlignmentRecord::from_json(&json)?;
        if record.sentences.is_empty() {
            warn!("Alignment record {:?} holds no sentences", path);
        }
        Ok(record)
    }
}
