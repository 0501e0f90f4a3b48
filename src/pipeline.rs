use crate::config::Config;
use crate::error::{Result, SrtTranslateError};
use crate::publish::{is_published_name, publish};
use crate::subtitle::{build_chunk_text, normalize_timestamps, ChunkPlan, DEFAULT_CHUNK_SIZE};
use crate::translate::{translate_chunk, RequestPacing, TranslationOutcome, Translator};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Configuration for the translation pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Language code passed to the translator.
    pub target_language: String,
    /// Suffix of published files (`nld` gives `movie.nld.srt`).
    pub output_suffix: String,
    /// Source lines per translation request.
    pub chunk_size: usize,
    /// Delays applied before translation requests.
    pub pacing: RequestPacing,
    /// Only pick up `.en.srt` files.
    pub english_only: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_language: "nl".to_string(),
            output_suffix: "nld".to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            pacing: RequestPacing::default(),
            english_only: false,
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            target_language: config.target_language.trim().to_string(),
            output_suffix: config.effective_output_suffix(),
            chunk_size: config.chunk_size,
            pacing: RequestPacing {
                first_request_delay: Duration::from_millis(config.first_chunk_delay_ms),
                between_requests: Duration::ZERO,
            },
            english_only: config.english_only,
        }
    }
}

/// One input subtitle document, read once.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

impl SourceFile {
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        Ok(Self {
            path: path.to_path_buf(),
            lines: content.lines().map(str::to_string).collect(),
        })
    }

    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }
}

/// Translated output of a single file, accumulated chunk by chunk.
///
/// Every file gets its own artifact; [`publish`] consumes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslatedArtifact {
    content: String,
    appended_chunks: usize,
    dropped_chunks: usize,
    skipped_chunks: usize,
}

impl TranslatedArtifact {
    /// Append a translated chunk, terminating it with a newline if needed.
    pub fn append(&mut self, text: &str) {
        self.content.push_str(text);
        if !text.ends_with('\n') {
            self.content.push('\n');
        }
        self.appended_chunks += 1;
    }

    /// Record a chunk whose translation failed and was left out.
    pub fn record_dropped(&mut self) {
        self.dropped_chunks += 1;
    }

    /// Record a blank chunk that was never sent for translation.
    pub fn record_skipped(&mut self) {
        self.skipped_chunks += 1;
    }

    /// Rewrite mangled timing lines into canonical form.
    pub fn normalize(&mut self) {
        self.content = normalize_timestamps(&self.content);
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn appended_chunks(&self) -> usize {
        self.appended_chunks
    }

    pub fn dropped_chunks(&self) -> usize {
        self.dropped_chunks
    }

    pub fn skipped_chunks(&self) -> usize {
        self.skipped_chunks
    }
}

/// Hook for surfacing per-file progress (progress bars, GUIs).
pub trait ProgressObserver: Send + Sync {
    fn on_file_start(&self, _path: &Path, _total_lines: usize) {}

    /// `percent` is in `0.0..=100.0`.
    fn on_progress(&self, _path: &Path, _percent: f64) {}

    fn on_file_done(&self, _path: &Path, _published: &Path) {}
}

/// Observer that ignores every event.
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

/// Outcome of processing one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub source: PathBuf,
    pub published: PathBuf,
    pub total_lines: usize,
    pub chunks_translated: usize,
    pub chunks_dropped: usize,
    pub chunks_skipped: usize,
}

/// Result of a whole run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub files: Vec<FileReport>,
    pub total_time: Duration,
}

impl RunSummary {
    pub fn chunks_dropped(&self) -> usize {
        self.files.iter().map(|f| f.chunks_dropped).sum()
    }
}

/// Candidate input file check used by discovery.
fn is_candidate(name: &str, config: &PipelineConfig) -> bool {
    let lower = name.to_ascii_lowercase();
    let wanted = if config.english_only { ".en.srt" } else { ".srt" };
    lower.ends_with(wanted)
        && lower.len() > wanted.len()
        && !is_published_name(name, &config.output_suffix)
}

/// Recursively find subtitle files under `dir`, sorted by path.
///
/// Files that already carry the output suffix are skipped so a re-run does
/// not translate its own output.
pub fn discover_subtitle_files(dir: &Path, config: &PipelineConfig) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(SrtTranslateError::SourceDirectoryNotFound(
            dir.display().to_string(),
        ));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if is_candidate(name, config) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    debug!("Discovered {} subtitle file(s) under {:?}", files.len(), dir);
    Ok(files)
}

/// Give `translated` the same run of trailing newlines as the source chunk,
/// so chunk boundaries survive services that trim their output.
fn align_trailing_newlines(translated: &str, source_chunk: &str) -> String {
    let trailing = source_chunk.len() - source_chunk.trim_end_matches('\n').len();
    let mut text = translated.trim_end().to_string();
    text.push_str(&"\n".repeat(trailing.max(1)));
    text
}

/// Translate every chunk of `source` into a fresh artifact.
///
/// Blank chunks are skipped without a request. Failed chunks are left out;
/// their neighbours are unaffected. The artifact is returned unnormalised.
pub async fn translate_file(
    source: &SourceFile,
    translator: &dyn Translator,
    config: &PipelineConfig,
    observer: &dyn ProgressObserver,
) -> TranslatedArtifact {
    let plan = ChunkPlan::new(source.total_lines(), config.chunk_size);
    let mut artifact = TranslatedArtifact::default();

    info!("Processing subtitle file: {}", source.path.display());
    info!(
        "Total number of lines: {} ({} chunk(s) of {})",
        plan.total_lines,
        plan.len(),
        plan.chunk_size
    );
    observer.on_file_start(&source.path, plan.total_lines);

    for (chunk_index, window) in plan.windows().enumerate() {
        let offset = window.start;
        let chunk = build_chunk_text(&source.lines, window);

        if chunk.is_blank() {
            debug!("Chunk at line {} is blank, skipping", offset + 1);
            artifact.record_skipped();
        } else {
            config.pacing.wait(chunk_index).await;

            match translate_chunk(translator, &chunk.text, &config.target_language).await {
                TranslationOutcome::Translated(text) => {
                    artifact.append(&align_trailing_newlines(&text, &chunk.text));
                    debug!("Appended chunk at line {}", offset + 1);
                }
                TranslationOutcome::Failed { reason } => {
                    warn!(
                        "Dropping chunk at line {} of {}: {}",
                        offset + 1,
                        source.path.display(),
                        reason
                    );
                    artifact.record_dropped();
                }
            }
        }

        observer.on_progress(&source.path, plan.progress_after(offset));
    }

    artifact
}

/// Translate, normalise and publish a single file.
pub async fn process_file(
    path: &Path,
    translator: &dyn Translator,
    config: &PipelineConfig,
    observer: &dyn ProgressObserver,
) -> Result<FileReport> {
    let source = SourceFile::read(path)?;
    let mut artifact = translate_file(&source, translator, config, observer).await;

    artifact.normalize();
    debug!("Normalised timestamps in translation of {}", path.display());

    let chunks_translated = artifact.appended_chunks();
    let chunks_dropped = artifact.dropped_chunks();
    let chunks_skipped = artifact.skipped_chunks();
    let published = publish(artifact, path, &config.output_suffix)?;
    observer.on_file_done(path, &published);

    Ok(FileReport {
        source: path.to_path_buf(),
        published,
        total_lines: source.total_lines(),
        chunks_translated,
        chunks_dropped,
        chunks_skipped,
    })
}

/// Translate every subtitle file under `source_dir`, one after another.
///
/// A missing directory aborts before any file is touched. Filesystem errors
/// while reading or publishing a file abort the run.
pub async fn run(
    source_dir: &Path,
    translator: &dyn Translator,
    config: &PipelineConfig,
    observer: &dyn ProgressObserver,
) -> Result<RunSummary> {
    let start_time = Instant::now();
    let files = discover_subtitle_files(source_dir, config)?;

    if files.is_empty() {
        warn!("No subtitle files found under {}", source_dir.display());
    } else {
        info!(
            "Translating {} file(s) to {} with {}",
            files.len(),
            config.target_language,
            translator.name()
        );
    }

    let mut reports = Vec::with_capacity(files.len());
    for path in &files {
        reports.push(process_file(path, translator, config, observer).await?);
    }

    Ok(RunSummary {
        files: reports,
        total_time: start_time.elapsed(),
    })
}

/// Print a summary of the run.
pub fn print_summary(summary: &RunSummary) {
    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("                    Subtitle Translation Complete               ");
    println!("═══════════════════════════════════════════════════════════════");
    println!();
    if summary.files.is_empty() {
        println!("  No subtitle files were found.");
    }
    for report in &summary.files {
        println!("  {}", report.published.display());
        println!(
            "    {} lines, {} chunk(s) translated, {} dropped, {} blank",
            report.total_lines,
            report.chunks_translated,
            report.chunks_dropped,
            report.chunks_skipped
        );
    }
    println!();
    println!(
        "  Files:  {}    Total: {:.2}s",
        summary.files.len(),
        summary.total_time.as_secs_f64()
    );
    if summary.chunks_dropped() > 0 {
        println!();
        println!(
            "  Note: {} chunk(s) could not be translated and were left out",
            summary.chunks_dropped()
        );
    }
    println!();
    println!("═══════════════════════════════════════════════════════════════");
}
