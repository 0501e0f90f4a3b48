use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use srt_translate::interactive::run_interactive_wizard;
use srt_translate::translate::GeminiTranslator;
use srt_translate::{print_summary, Config, PipelineConfig, ProgressObserver, SrtTranslateError};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "srt-translate")]
#[command(version, about = "Translate SRT subtitle files chunk by chunk")]
#[command(
    long_about = "Translate every .srt file under a directory with Google Gemini and write the result next to each original (movie.en.srt -> movie.nld.srt). Without a directory argument an interactive prompt is shown."
)]
struct Cli {
    /// Directory to scan recursively for .srt files
    source_dir: Option<PathBuf>,

    /// Target language code (e.g., nl, de, fr)
    #[arg(short, long)]
    target: Option<String>,

    /// Suffix for published files (defaults to the target's ISO 639-2 code)
    #[arg(long)]
    suffix: Option<String>,

    /// Number of subtitle lines per translation request
    #[arg(short, long)]
    chunk_size: Option<usize>,

    /// Pause before the first request of each file, in milliseconds
    #[arg(long)]
    first_chunk_delay_ms: Option<u64>,

    /// Only translate .en.srt files
    #[arg(long)]
    english_only: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

/// Per-file progress bar.
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new() -> Self {
        let bar = ProgressBar::new(100);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
        {
            bar.set_style(style.progress_chars("=> "));
        }
        Self { bar }
    }
}

impl ProgressObserver for BarProgress {
    fn on_file_start(&self, path: &Path, _total_lines: usize) {
        self.bar.reset();
        self.bar.set_message(
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );
    }

    fn on_progress(&self, _path: &Path, percent: f64) {
        self.bar.set_position(percent.round().clamp(0.0, 100.0) as u64);
    }

    fn on_file_done(&self, _path: &Path, published: &Path) {
        self.bar.println(format!("✓ {}", published.display()));
    }
}

/// Startup checks, source directory first so a missing directory is reported
/// ahead of any configuration problem.
fn preflight(source_dir: &Path, config: &Config) -> srt_translate::Result<()> {
    if !source_dir.is_dir() {
        return Err(SrtTranslateError::SourceDirectoryNotFound(
            source_dir.display().to_string(),
        ));
    }
    config.validate()
}

fn report_missing_source_dir(dir: &str) {
    println!("Source directory '{}' does not exist.", dir);
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(ref target) = cli.target {
        config.target_language = target.clone();
        if cli.suffix.is_none() {
            config.output_suffix = None;
        }
    }
    if let Some(ref suffix) = cli.suffix {
        config.output_suffix = Some(suffix.clone());
    }
    if let Some(size) = cli.chunk_size {
        config.chunk_size = size;
    }
    if let Some(delay) = cli.first_chunk_delay_ms {
        config.first_chunk_delay_ms = delay;
    }
    if cli.english_only {
        config.english_only = true;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let (source_dir, mut config) = match cli.source_dir.clone() {
        Some(dir) => (dir, Config::load().context("Failed to load configuration")?),
        None => {
            let wizard = run_interactive_wizard()?;
            (wizard.source_dir, wizard.config)
        }
    };

    apply_overrides(&mut config, &cli);
    match preflight(&source_dir, &config) {
        Err(SrtTranslateError::SourceDirectoryNotFound(dir)) => {
            report_missing_source_dir(&dir);
            return Ok(());
        }
        result => result.context("Configuration validation failed")?,
    }

    let pipeline_config = PipelineConfig::from(&config);

    info!("Source:   {}", source_dir.display());
    info!("Target:   {}", pipeline_config.target_language);
    info!("Suffix:   .{}.srt", pipeline_config.output_suffix);
    info!("Chunks:   {} lines", pipeline_config.chunk_size);

    let api_key = config.gemini_api_key.clone().unwrap_or_default();
    let translator = GeminiTranslator::new(api_key);
    let progress = BarProgress::new();

    let result = srt_translate::run(&source_dir, &translator, &pipeline_config, &progress).await;
    progress.bar.finish_and_clear();

    match result {
        Ok(summary) => {
            print_summary(&summary);
            Ok(())
        }
        Err(SrtTranslateError::SourceDirectoryNotFound(dir)) => {
            report_missing_source_dir(&dir);
            Ok(())
        }
        Err(e) => Err(e).context("Translation run failed"),
    }
}
