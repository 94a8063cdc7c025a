/*!
 * # subalign - bilingual subtitles from sentence-level translation
 *
 * Subtitle cues split sentences at arbitrary points, which ruins machine
 * translation. This library regroups cues into whole sentences, writes them
 * out as a plain translation request, and later splits each translated
 * sentence back over the original cues with their timing intact.
 *
 * ## Workflow
 *
 * 1. `extract`: parse a subtitle, assemble sentences, write one line per
 *    sentence for an external translator
 * 2. `merge`: read the translated lines (UTF-8, GB18030 or BIG5), realign
 *    each onto its cues, write an editable JSON record and the final
 *    subtitle
 * 3. `rebuild`: regenerate the final subtitle from an edited record
 * 4. `punctuate`: restore punctuation in unpunctuated source subtitles via
 *    a remote service before extraction
 *
 * ## Architecture
 *
 * - `subtitle_processor`: cue stream parsing and subtitle rendering
 * - `assembler`: sentence assembly state machine
 * - `realigner`: proportional and clause-wise splitting of translations
 * - `tokenizer`: linguistic unit segmentation
 * - `charset`: subtitle decoding and translated file charset voting
 * - `record`: the intermediate alignment record
 * - `punctuation`: punctuation restoration driver
 * - `providers`: punctuation service clients
 * - `app_controller`: the workflows above
 * - `app_config`, `file_utils`, `language_utils`, `errors`: support code
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod assembler;
pub mod charset;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod punctuation;
pub mod realigner;
pub mod record;
pub mod subtitle_processor;
pub mod tokenizer;

// Re-export main types for easier usage
pub use app_config::{Config, OutputMode};
pub use app_controller::Controller;
pub use assembler::{Assembly, Sentence, SentenceAssembler};
pub use charset::{Charset, CharsetResolver};
pub use errors::{AppError, ProviderError, RecordError, SubtitleError};
pub use providers::{HttpPunctuator, MockPunctuator, PunctuationService};
pub use punctuation::{PunctuationReport, PunctuationRestorer};
pub use realigner::Realigner;
pub use record::{AlignmentRecord, RecordStore};
pub use subtitle_processor::{Cue, CueStreamParser, SubtitleRenderer};
pub use tokenizer::{Tokenizer, UnicodeTokenizer};
