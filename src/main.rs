// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use vtai::app_config::{self, Config};
use vtai::errors::SessionError;
use vtai::history::Entry;
use vtai::language_utils::TRANSLATION_TARGETS;
use vtai::session::{DownloadKind, SummaryRequest, SummaryResult, SummarySize};
use vtai::theme::Theme;
use vtai::Application;

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

/// CLI Wrapper for SummarySize to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliSummarySize {
    Small,
    Medium,
    Large,
}

impl From<CliSummarySize> for SummarySize {
    fn from(size: CliSummarySize) -> Self {
        match size {
            CliSummarySize::Small => SummarySize::Small,
            CliSummarySize::Medium => SummarySize::Medium,
            CliSummarySize::Large => SummarySize::Large,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliDownloadFormat {
    Txt,
    Pdf,
}

impl From<CliDownloadFormat> for DownloadKind {
    fn from(format: CliDownloadFormat) -> Self {
        match format {
            CliDownloadFormat::Txt => DownloadKind::Text,
            CliDownloadFormat::Pdf => DownloadKind::Pdf,
        }
    }
}

/// Options shared by both summarize commands
#[derive(Args, Debug)]
struct RequestOptions {
    /// Summary length (defaults to the configured size)
    #[arg(short, long, value_enum)]
    size: Option<CliSummarySize>,

    /// Source-language hint (e.g., 'en', 'hi')
    #[arg(short = 'L', long)]
    language: Option<String>,

    /// Do not ask the backend to translate the transcript to English
    #[arg(long)]
    no_english: bool,

    /// Translate the resulting summary into this language
    #[arg(short, long, value_name = "LANG")]
    translate_to: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize a video by link
    Summarize {
        /// Video link
        #[arg(value_name = "URL")]
        url: String,

        #[command(flatten)]
        options: RequestOptions,
    },

    /// Summarize an uploaded video or audio file
    Upload {
        /// Media file to upload
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        options: RequestOptions,
    },

    /// Translate arbitrary text
    Translate {
        /// Text to translate
        text: String,

        /// Target language code
        #[arg(short, long, value_name = "LANG")]
        to: String,
    },

    /// Inspect and manage local history
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Show or change the display theme
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommand>,
    },

    /// List offered translation targets
    Languages,

    /// Generate shell completions for vtai
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryCommand {
    /// List stored entries, newest first
    List,
    /// Print one entry in full
    Show { id: String },
    /// Translate an entry's summary and store the result
    Translate {
        id: String,
        #[arg(value_name = "LANG")]
        to: String,
    },
    /// Save an entry's artifact from the backend
    Download {
        id: String,
        #[arg(short, long, value_enum, default_value = "txt")]
        format: CliDownloadFormat,
        /// Output file (defaults to summary.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete all stored entries
    Clear,
}

#[derive(Subcommand, Debug)]
enum ThemeCommand {
    /// Switch between dark and light
    Toggle,
    /// Set a specific theme
    Set { theme: String },
}

/// vtai - video summary client
///
/// Summarizes videos through a summarization backend, keeps the last
/// results in a local history and translates summaries on demand.
#[derive(Parser, Debug)]
#[command(name = "vtai")]
#[command(version)]
#[command(about = "Video summary client")]
#[command(long_about = "vtai sends videos to a summarization backend, keeps the 20 most recent results locally and translates summaries.

EXAMPLES:
    vtai summarize https://youtu.be/abc123          # Summarize a video link
    vtai summarize -s large -t fr https://youtu.be/x # Large summary, then translate to French
    vtai upload talk.mp4 -L hi                       # Upload a file with a Hindi hint
    vtai history list                                # Show stored results
    vtai history translate <ID> de                   # Translate a stored summary
    vtai history download <ID> -f pdf                # Save the PDF artifact
    vtai completions bash > vtai.bash                # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Keep history in memory only for this run
    #[arg(long, global = true)]
    ephemeral: bool,
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
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
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
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
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
    // Level is raised or lowered once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "vtai", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;
    if let Some(level) = cli.log_level.clone() {
        config.log_level = level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());
    config.validate().context("Configuration validation failed")?;

    let app = if cli.ephemeral {
        Application::in_memory(config)?
    } else {
        Application::from_config(config)?
    };

    match cli.command {
        Commands::Summarize { url, options } => {
            let request = build_request(&app, SummaryRequest::by_reference(url, SummarySize::Small), &options);
            run_summary(&app, request, options.translate_to.as_deref()).await
        }
        Commands::Upload { file, options } => {
            let payload = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let request = build_request(
                &app,
                SummaryRequest::by_upload(file_name, payload, SummarySize::Small),
                &options,
            );
            run_summary(&app, request, options.translate_to.as_deref()).await
        }
        Commands::Translate { text, to } => {
            let translated = app.overlay().translate(&text, &to).await.map_err(user_error)?;
            println!("{}", translated);
            Ok(())
        }
        Commands::History { command } => run_history(&app, command).await,
        Commands::Theme { command } => run_theme(&app, command).await,
        Commands::Languages => {
            for target in TRANSLATION_TARGETS {
                println!("{}  {}", target.code, target.name);
            }
            Ok(())
        }
        Commands::Completions { .. } => Ok(()),
    }
}

/// Apply CLI options over the configured defaults
fn build_request(app: &Application, base: SummaryRequest, options: &RequestOptions) -> SummaryRequest {
    let defaults = &app.config().defaults;
    let size = options.size.map(SummarySize::from).unwrap_or(defaults.size);
    let language = options.language.clone().unwrap_or_else(|| defaults.language.clone());

    SummaryRequest { size, ..base }
        .with_language(language)
        .with_translate_to_english(defaults.translate_to_english && !options.no_english)
}

async fn run_summary(app: &Application, request: SummaryRequest, translate_to: Option<&str>) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .map_err(|e| anyhow!("Invalid progress template: {}", e))?,
    );
    spinner.set_message(format!("Summarizing '{}' ({})", request.title(), request.size.description()));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let outcome = app.controller().submit(request).await;
    spinner.finish_and_clear();

    let mut result = outcome.map_err(user_error)?;

    if let Some(target) = translate_to {
        match app.overlay().translate_active(target).await {
            Ok(Some(text)) => result.summary_text = text,
            Ok(None) => debug!("Active result changed before translation completed"),
            Err(e) => error!("{}", e.user_message()),
        }
    }

    print_result(app, &result);
    Ok(())
}

fn print_result(app: &Application, result: &SummaryResult) {
    if let Some(language) = &result.detected_language {
        println!("Detected language: {}", language);
    }
    println!("\nSummary:\n{}\n", result.summary_text);
    println!("Transcript:\n{}\n", result.transcript_text);
    for link in &result.download_links {
        match link.resolve(app.backend().base_url()) {
            Ok(url) => println!("Download ({}): {}", link.kind.extension(), url),
            Err(e) => debug!("Unresolvable download path {}: {}", link.path, e),
        }
    }
}

fn print_entry(entry: &Entry) {
    println!("{}  {}", entry.id, entry.created_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"));
    println!("{} [{}, {}]", entry.title, entry.mode.as_str(), entry.size);
    if let Some(language) = &entry.detected_language {
        println!("Detected language: {}", language);
    }
    println!("\nSummary:\n{}\n", entry.summary_text);
    println!("Transcript:\n{}", entry.transcript_text);
}

async fn run_history(app: &Application, command: HistoryCommand) -> Result<()> {
    match command {
        HistoryCommand::List => {
            let entries = app.history().list().await.map_err(user_error)?;
            if entries.is_empty() {
                println!("No history yet.");
            }
            for entry in entries {
                println!(
                    "{}  {}  {:<6} {}",
                    entry.id,
                    entry.created_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"),
                    entry.size,
                    entry.title
                );
            }
        }
        HistoryCommand::Show { id } => {
            let entry = app.history().get(&id).await.map_err(user_error)?;
            print_entry(&entry);
        }
        HistoryCommand::Translate { id, to } => {
            match app.overlay().translate_entry(&id, &to).await.map_err(user_error)? {
                Some(entry) => println!("{}", entry.summary_text),
                None => println!("{}", SessionError::NotFound(id).user_message()),
            }
        }
        HistoryCommand::Download { id, format, output } => {
            let entry = app.history().get(&id).await.map_err(user_error)?;
            let kind = DownloadKind::from(format);
            let link = entry
                .link(kind)
                .ok_or_else(|| anyhow!("Entry {} has no {} download", id, kind.extension()))?;
            let bytes = app.backend().download(&link).await.map_err(|e| {
                error!("Download failed: {}", e);
                anyhow!(vtai::errors::REQUEST_FAILED_MESSAGE)
            })?;
            let path = output.unwrap_or_else(|| PathBuf::from(format!("summary.{}", kind.extension())));
            tokio::fs::write(&path, &bytes)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Saved {} bytes to {}", bytes.len(), path.display());
        }
        HistoryCommand::Clear => {
            app.history().clear().await.map_err(user_error)?;
            println!("History cleared.");
        }
    }
    Ok(())
}

async fn run_theme(app: &Application, command: Option<ThemeCommand>) -> Result<()> {
    let theme = match command {
        None => app.theme().current().await?,
        Some(ThemeCommand::Toggle) => app.theme().toggle().await?,
        Some(ThemeCommand::Set { theme }) => {
            let theme: Theme = theme.parse()?;
            app.theme().set(theme).await?;
            theme
        }
    };
    println!("{}", theme);
    Ok(())
}

/// Log the diagnostic and surface only the short message
fn user_error(error: SessionError) -> anyhow::Error {
    debug!("{}", error);
    anyhow!(error.user_message())
}
