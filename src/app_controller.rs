use log::{debug, error, info, warn};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::{Config, OutputMode};
use crate::assembler::{Assembly, SentenceAssembler};
use crate::charset::{CharsetResolver, DecodedText};
use crate::errors::{AppError, SubtitleError};
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::providers::PunctuationService;
use crate::punctuation::{PunctuationReport, PunctuationRestorer};
use crate::realigner::Realigner;
use crate::record::{AlignmentRecord, RecordStore};

// @module: Application controller for the alignment workflows

// @const: Language tag of punctuated output files
const PUNCTUATED_TAG: &str = "punct";

/// Main application controller driving extract, merge, rebuild and punctuate
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;
        Ok(Self { config })
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    // @generates: `<input>.<source_language>.txt`
    pub fn request_path(&self, input: &Path) -> PathBuf {
        FileManager::append_suffix(input, &format!("{}.txt", self.config.source_language))
    }

    // @generates: `<input>.json`
    pub fn record_path(&self, input: &Path) -> PathBuf {
        FileManager::append_suffix(input, "json")
    }

    // @generates: `<stem>.<target_language>.srt` next to the input
    pub fn final_output_path(&self, input: &Path) -> PathBuf {
        let language = language_utils::normalize_to_part1_or_part2t(&self.config.target_language)
            .unwrap_or_else(|_| self.config.target_language.to_lowercase());
        FileManager::generate_output_path(input, Self::parent_dir(input), &language, "srt")
    }

    // @generates: `<stem>.punct.srt` next to the input
    pub fn punctuated_output_path(&self, input: &Path) -> PathBuf {
        FileManager::generate_output_path(input, Self::parent_dir(input), PUNCTUATED_TAG, "srt")
    }

    /// Assemble a subtitle file and write its translation request.
    ///
    /// The request holds one line per sentence; the translated file handed
    /// to [`Controller::merge`] must keep that line count and order.
    pub fn extract(&self, input: &Path) -> Result<Assembly, AppError> {
        let assembly = self.read_assembly(input)?;

        let request_path = self.request_path(input);
        if self.may_write(&request_path) {
            Self::write(&request_path, &assembly.translation_request())?;
        }

        Ok(assembly)
    }

    /// Realign a translated request file onto the subtitle it came from.
    ///
    /// Line `i` of `translated` is the translation of sentence `i`. Writes
    /// the alignment record and the final subtitle.
    pub fn merge(&self, input: &Path, translated: &Path) -> Result<AlignmentRecord, AppError> {
        let start_time = Instant::now();
        let mut assembly = self.read_assembly(input)?;
        let decoded = Self::read_decoded(translated)?;
        info!("Translated file {:?} decoded as {}", translated, decoded.charset);

        let lines: Vec<&str> = decoded
            .text
            .lines()
            .map(|line| line.trim_start_matches('\u{FEFF}').trim())
            .collect();

        let expected = assembly.sentences.len();
        if lines.len() < expected {
            warn!(
                "Translated file has {} lines but {} sentences were extracted; missing translations stay empty",
                lines.len(),
                expected
            );
        } else if lines.len() > expected {
            warn!(
                "Translated file has {} lines but {} sentences were extracted; extra lines are ignored",
                lines.len(),
                expected
            );
        }

        let progress_bar = ProgressBar::new(expected as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} sentences ({percent}%)")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));

        let realigner = Realigner::default();
        for (index, sentence) in assembly.sentences.iter_mut().enumerate() {
            let translated_line = lines.get(index).copied().unwrap_or_default();
            realigner.apply(sentence, translated_line);
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        let record = AlignmentRecord::new(assembly.sentences);

        let record_path = self.record_path(input);
        if self.may_write(&record_path) {
            RecordStore::save(&record_path, &record)?;
        }
        self.write_final(input, &record)?;

        info!(
            "Realigned {} sentences in {}",
            expected,
            Self::format_duration(start_time.elapsed())
        );
        Ok(record)
    }

    /// Regenerate the final subtitle from a (possibly hand-edited) record
    pub fn rebuild(&self, record_path: &Path) -> Result<PathBuf, AppError> {
        let record = RecordStore::load(record_path)?;
        let subtitle_path = FileManager::strip_record_suffix(record_path);
        self.write_final(&subtitle_path, &record)
    }

    /// Restore punctuation in an unpunctuated subtitle.
    ///
    /// Sentences the service fails on are kept as they were and listed in
    /// the returned report.
    pub async fn punctuate(
        &self,
        input: &Path,
        service: &dyn PunctuationService,
    ) -> Result<PunctuationReport, AppError> {
        let mut assembly = self.read_assembly(input)?;

        let restorer = PunctuationRestorer::default();
        let report = restorer.restore_all(&mut assembly.sentences, service).await;
        if !report.is_complete() {
            warn!(
                "{} sentences kept without restored punctuation",
                report.failures.len()
            );
        }

        let output_path = self.punctuated_output_path(input);
        if self.may_write(&output_path) {
            let content = AlignmentRecord::new(assembly.sentences).render(OutputMode::Source);
            Self::write(&output_path, &content)?;
        }

        Ok(report)
    }

    /// Run [`Controller::extract`] on every subtitle file under `input_dir`.
    ///
    /// Files this tool generated are skipped. Failures are logged and do not
    /// stop the run; returns the number of files extracted.
    pub fn run_folder(&self, input_dir: &Path) -> Result<usize, AppError> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(SubtitleError::MissingInput(input_dir.to_path_buf()).into());
        }

        let files = FileManager::find_files(input_dir, "srt")
            .map_err(|e| AppError::File(e.to_string()))?;

        let mut processed_count = 0;
        for path in files.iter().filter(|path| !self.is_generated_output(path)) {
            info!("Processing subtitle: {:?}", path);
            match self.extract(path) {
                Ok(_) => processed_count += 1,
                Err(e) => error!("Error processing file {:?}: {}", path, e),
            }
        }

        info!(
            "Finished processing {} files in {}",
            processed_count,
            Self::format_duration(start_time.elapsed())
        );
        Ok(processed_count)
    }

    fn read_assembly(&self, input: &Path) -> Result<Assembly, AppError> {
        let bytes = Self::read_input(input)?;
        let decoded = CharsetResolver::read_source(&bytes);
        debug!("Subtitle {:?} decoded as {}", input, decoded.encoding.name());
        if decoded.had_errors {
            warn!(
                "Malformed {} sequences in {:?} were replaced",
                decoded.encoding.name(),
                input
            );
        }

        let assembly = SentenceAssembler::assemble(&decoded.text);
        if assembly.sentences.is_empty() {
            return Err(SubtitleError::EmptySubtitle(input.to_path_buf()).into());
        }
        Ok(assembly)
    }

    fn read_input(path: &Path) -> Result<Vec<u8>, AppError> {
        if !FileManager::file_exists(path) {
            return Err(SubtitleError::MissingInput(path.to_path_buf()).into());
        }
        FileManager::read_bytes(path).map_err(|e| AppError::File(e.to_string()))
    }

    fn read_decoded(path: &Path) -> Result<DecodedText, AppError> {
        let bytes = Self::read_input(path)?;
        let decoded = CharsetResolver::read_text(&bytes);
        if decoded.had_errors {
            warn!(
                "Malformed {} sequences in {:?} were replaced",
                decoded.charset, path
            );
        }
        Ok(decoded)
    }

    fn write_final(&self, subtitle_path: &Path, record: &AlignmentRecord) -> Result<PathBuf, AppError> {
        let output_path = self.final_output_path(subtitle_path);
        if self.may_write(&output_path) {
            Self::write(&output_path, &record.render(self.config.output.mode))?;
        }
        Ok(output_path)
    }

    fn may_write(&self, path: &Path) -> bool {
        if FileManager::file_exists(path) && !self.config.output.force_overwrite {
            warn!(
                "Skipping {:?}, file already exists (use -f to force overwrite)",
                path
            );
            return false;
        }
        true
    }

    fn write(path: &Path, content: &str) -> Result<(), AppError> {
        FileManager::write_to_file(path, content).map_err(|e| AppError::File(e.to_string()))?;
        info!("Success: {}", path.display());
        Ok(())
    }

    fn is_generated_output(&self, path: &Path) -> bool {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let Some((_, tag)) = stem.rsplit_once('.') else {
            return false;
        };
        tag == PUNCTUATED_TAG
            || language_utils::normalize_to_part2t(tag).ok()
                == language_utils::normalize_to_part2t(&self.config.target_language).ok()
    }

    fn parent_dir(path: &Path) -> &Path {
        path.parent().unwrap_or(Path::new(""))
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
