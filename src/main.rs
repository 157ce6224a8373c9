// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use cuekit::app_config::{Config, LogLevel};
use cuekit::app_controller::{ConversionOutcome, Controller};
use cuekit::subtitle_model::SubtitleFormat;
use cuekit::subtitle_processor::SubtitleDocument;
use cuekit::file_utils::FileManager;

/// CLI Wrapper for SubtitleFormat to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    Lrc,
    LrcEnhanced,
    Srt,
    Vtt,
    VttKaraoke,
    Ttml,
    TtmlKaraoke,
    Txt,
    Json,
}

impl From<CliFormat> for SubtitleFormat {
    fn from(cli_format: CliFormat) -> Self {
        match cli_format {
            CliFormat::Lrc => SubtitleFormat::Lrc,
            CliFormat::LrcEnhanced => SubtitleFormat::LrcEnhanced,
            CliFormat::Srt => SubtitleFormat::Srt,
            CliFormat::Vtt => SubtitleFormat::Vtt,
            CliFormat::VttKaraoke => SubtitleFormat::VttKaraoke,
            CliFormat::Ttml => SubtitleFormat::Ttml,
            CliFormat::TtmlKaraoke => SubtitleFormat::TtmlKaraoke,
            CliFormat::Txt => SubtitleFormat::Txt,
            CliFormat::Json => SubtitleFormat::Json,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a subtitle file, or every subtitle file in a directory
    Convert(ConvertArgs),

    /// Print the detected format and a summary of a subtitle file
    Detect {
        /// Subtitle file to inspect
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,
    },

    /// Generate shell completions for cuekit
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Target format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    to: Option<CliFormat>,

    /// Output directory (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Leave title/artist/album tags out of the output
    #[arg(long)]
    no_metadata: bool,
}

/// cuekit - convert timed captions and lyrics
#[derive(Parser, Debug)]
#[command(name = "cuekit")]
#[command(version)]
#[command(about = "Convert captions and lyrics between SRT, WebVTT, LRC, TTML, JSON and TXT")]
#[command(long_about = "cuekit converts time-synchronized captions and lyrics between formats,
keeping word-level timing where the target format supports it.

EXAMPLES:
    cuekit convert song.lrc --to vtt-karaoke    # Enhanced LRC to karaoke WebVTT
    cuekit convert movie.srt --to ttml -f       # Overwrite an existing TTML export
    cuekit convert ./lyrics --to json           # Convert a whole directory
    cuekit detect unknown.txt                   # Show the detected format
    cuekit completions bash > cuekit.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
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
        // Filtering is left to log::max_level so it can change after init
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
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
            let (emoji, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(level) = cli.log_level {
        log::set_max_level(LogLevel::from(level).to_level_filter());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "cuekit", &mut std::io::stdout());
            Ok(())
        }
        Commands::Detect { input_path } => run_detect(&input_path).await,
        Commands::Convert(args) => {
            let mut config = Config::load_or_create(&cli.config_path)?;
            match cli.log_level {
                Some(level) => config.log_level = level.into(),
                None => log::set_max_level(config.log_level.to_level_filter()),
            }
            if args.no_metadata {
                config.output.include_metadata = false;
            }
            config.validate().context("Configuration validation failed")?;
            run_convert(args, config).await
        }
    }
}

async fn run_detect(input_path: &Path) -> Result<()> {
    let content = FileManager::read_to_string(input_path).await?;
    let document = SubtitleDocument::from_file_content(&input_path.to_string_lossy(), &content);

    println!("{}", document);
    if document.has_word_timing() {
        println!("Word timing: yes");
    }
    Ok(())
}

async fn run_convert(options: ConvertArgs, config: Config) -> Result<()> {
    let target: SubtitleFormat = options
        .to
        .map(SubtitleFormat::from)
        .unwrap_or(config.default_format);
    let controller = Controller::with_config(config)?;

    if options.input_path.is_file() {
        let output_dir = options
            .output_dir
            .clone()
            .unwrap_or_else(|| options.input_path.parent().unwrap_or(Path::new(".")).to_path_buf());

        match controller
            .convert_file(&options.input_path, &output_dir, target, options.force_overwrite)
            .await?
        {
            ConversionOutcome::Written(path) => info!("Success: {:?}", path),
            ConversionOutcome::Skipped(path) => info!("Left unchanged: {:?}", path),
        }
    } else if options.input_path.is_dir() {
        if options.output_dir.is_some() {
            return Err(anyhow!("--output-dir is only supported for single files"));
        }
        controller
            .convert_folder(&options.input_path, target, options.force_overwrite)
            .await?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}
