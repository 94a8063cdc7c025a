// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use subalign::app_config::{self, Config, OutputMode};
use subalign::{AppError, Controller, HttpPunctuator};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for OutputMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliOutputMode {
    Bilingual,
    Translated,
    Source,
}

impl From<CliOutputMode> for OutputMode {
    fn from(cli_mode: CliOutputMode) -> Self {
        match cli_mode {
            CliOutputMode::Bilingual => OutputMode::Bilingual,
            CliOutputMode::Translated => OutputMode::Translated,
            CliOutputMode::Source => OutputMode::Source,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble sentences and write the translation request file
    Extract {
        /// Subtitle file, or a directory to process every .srt file in it
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,
    },

    /// Realign a translated request file and write the final subtitle
    Merge {
        /// Subtitle file the request was extracted from
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Translated request file, one line per sentence
        #[arg(value_name = "TRANSLATED_PATH")]
        translated_path: PathBuf,
    },

    /// Regenerate the final subtitle from an alignment record
    Rebuild {
        /// Alignment record (`<subtitle>.json`)
        #[arg(value_name = "RECORD_PATH")]
        record_path: PathBuf,
    },

    /// Restore punctuation in an unpunctuated subtitle
    Punctuate {
        /// Subtitle file without punctuation
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,
    },

    /// Generate shell completions for subalign
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subalign - bilingual subtitles from sentence-level translation
#[derive(Parser, Debug)]
#[command(name = "subalign")]
#[command(version)]
#[command(about = "Sentence-level subtitle translation assistant")]
#[command(long_about = "subalign regroups subtitle cues into whole sentences for translation and splits the translated sentences back over the original cue timing.

EXAMPLES:
    subalign extract movie.srt                       # Write movie.srt.en.txt for translation
    subalign merge movie.srt movie.srt.en.txt.zh    # Realign and write movie.zh.srt
    subalign rebuild movie.srt.json                  # Regenerate movie.zh.srt from an edited record
    subalign punctuate movie.srt                     # Write movie.punct.srt with punctuation restored
    subalign -m translated merge movie.srt zh.txt    # Translated lines only
    subalign completions bash > subalign.bash        # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Force overwrite of existing output files
    #[arg(short, long, global = true)]
    force_overwrite: bool,

    /// Lines written per cue in the final subtitle
    #[arg(short, long, value_enum, global = true)]
    mode: Option<CliOutputMode>,

    /// Source language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long, global = true)]
    source_language: Option<String>,

    /// Target language code (e.g., 'zh', 'es', 'fr')
    #[arg(short, long, global = true)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the max level is narrowed once the
    // config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "subalign", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;

    match run_command(&controller, cli.command).await {
        Err(e) if e.is_missing_input() => {
            // Nothing to work on is not a failure of the tool
            error!("{}", e);
            Ok(())
        }
        result => result.map_err(anyhow::Error::from),
    }
}

async fn run_command(controller: &Controller, command: Commands) -> Result<(), AppError> {
    match command {
        Commands::Extract { input_path } => {
            if input_path.is_dir() {
                controller.run_folder(&input_path)?;
            } else {
                let assembly = controller.extract(&input_path)?;
                info!(
                    "{} sentences from {} cues",
                    assembly.sentences.len(),
                    assembly.cue_count()
                );
                print_translation_instructions(&controller.request_path(&input_path));
            }
        }
        Commands::Merge {
            input_path,
            translated_path,
        } => {
            let record = controller.merge(&input_path, &translated_path)?;
            info!(
                "Final subtitle: {} ({} sentences)",
                controller.final_output_path(&input_path).display(),
                record.sentences.len()
            );
            info!(
                "Edit {} and run `subalign rebuild` to adjust the alignment",
                controller.record_path(&input_path).display()
            );
        }
        Commands::Rebuild { record_path } => {
            let output_path = controller.rebuild(&record_path)?;
            info!("Generated subtitle from record: {}", output_path.display());
        }
        Commands::Punctuate { input_path } => {
            let service = HttpPunctuator::from_config(&controller.config().punctuation);
            info!("Restoring punctuation via {}", service.endpoint());
            let report = controller.punctuate(&input_path, &service).await?;
            if !report.is_complete() {
                warn!(
                    "Punctuation could not be restored for {} sentences",
                    report.failures.len()
                );
            }
        }
        Commands::Completions { .. } => {}
    }
    Ok(())
}

/// Load or create the configuration and apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let config_path = &cli.config_path;
    let mut config = if Path::new(config_path).exists() {
        let content = std::fs::read_to_string(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        serde_json::from_str::<Config>(&content)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    if let Some(source_lang) = &cli.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &cli.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(mode) = &cli.mode {
        config.output.mode = mode.clone().into();
    }
    if cli.force_overwrite {
        config.output.force_overwrite = true;
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

fn print_translation_instructions(request_path: &Path) {
    println!("Please translate the file [{}]", request_path.display());
    println!();
    println!("Translate URLs: https://translate.google.com/");
    println!("             or https://cn.bing.com/Translator");
    println!("             or https://fanyi.baidu.com");
    println!();
    println!("Note: Make sure the translated content matches the line location");
    println!("      and total number of rows of the original content.");
}
