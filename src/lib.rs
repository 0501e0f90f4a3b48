pub mod config;
pub mod error;
pub mod interactive;
pub mod language;
pub mod pipeline;
pub mod publish;
pub mod subtitle;
pub mod translate;

pub use config::Config;
pub use error::{Result, SrtTranslateError};
pub use pipeline::{
    discover_subtitle_files, print_summary, process_file, run, translate_file, FileReport,
    NoProgress, PipelineConfig, ProgressObserver, RunSummary, SourceFile, TranslatedArtifact,
};
