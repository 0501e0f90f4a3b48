//! Writes a finished translation next to its source file.

use crate::error::{Result, SrtTranslateError};
use crate::pipeline::TranslatedArtifact;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

const ENGLISH_SUFFIX: &str = ".en.srt";
const SRT_SUFFIX: &str = ".srt";

/// Split `name` into the part before its source-language suffix.
///
/// `movie.en.srt` and `movie.srt` both give `movie`. Matching is ASCII
/// case-insensitive. Returns `None` for names that are not `.srt` files.
fn source_stem(name: &str) -> Option<&str> {
    let lower = name.to_ascii_lowercase();
    let cut = if lower.ends_with(ENGLISH_SUFFIX) && lower.len() > ENGLISH_SUFFIX.len() {
        ENGLISH_SUFFIX.len()
    } else if lower.ends_with(SRT_SUFFIX) && lower.len() > SRT_SUFFIX.len() {
        SRT_SUFFIX.len()
    } else {
        return None;
    };
    Some(&name[..name.len() - cut])
}

/// Name of the published translation for an original file name.
///
/// ```
/// use srt_translate::publish::published_file_name;
/// assert_eq!(published_file_name("movie.en.srt", "nld").as_deref(), Some("movie.nld.srt"));
/// assert_eq!(published_file_name("movie.srt", "nld").as_deref(), Some("movie.nld.srt"));
/// ```
pub fn published_file_name(original: &str, suffix: &str) -> Option<String> {
    source_stem(original).map(|stem| format!("{}.{}.srt", stem, suffix))
}

/// Whether `name` is already a published translation with `suffix`.
pub fn is_published_name(name: &str, suffix: &str) -> bool {
    let marker = format!(".{}.srt", suffix).to_ascii_lowercase();
    let lower = name.to_ascii_lowercase();
    lower.ends_with(&marker) && lower.len() > marker.len()
}

/// Destination path for `source`, in the same directory.
pub fn published_path(source: &Path, suffix: &str) -> Result<PathBuf> {
    let name = source
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| published_file_name(n, suffix))
        .ok_or_else(|| SrtTranslateError::Publish {
            path: source.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "source is not an .srt file",
            ),
        })?;
    Ok(source.with_file_name(name))
}

/// Write `artifact` to the sibling of `source` and consume it.
///
/// The content lands in a temporary file in the destination directory first
/// and is then renamed over the final name, so a failure never leaves a
/// partially written output behind.
pub fn publish(artifact: TranslatedArtifact, source: &Path, suffix: &str) -> Result<PathBuf> {
    let destination = published_path(source, suffix)?;
    let dir = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let publish_err = |err: std::io::Error| SrtTranslateError::Publish {
        path: destination.clone(),
        source: err,
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(publish_err)?;
    debug!("Staging {} bytes in {:?}", artifact.len(), staged.path());
    staged
        .write_all(artifact.content().as_bytes())
        .and_then(|_| staged.flush())
        .map_err(publish_err)?;
    staged
        .persist(&destination)
        .map_err(|e| publish_err(e.error))?;

    info!("Published translation to {}", destination.display());
    Ok(destination)
}
