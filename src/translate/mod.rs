pub mod gemini;

pub use gemini::GeminiTranslator;

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// An external translation service.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target_lang`. An `Ok` with empty text is allowed
    /// and is treated as "no result" by [`translate_chunk`].
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String>;

    fn name(&self) -> &'static str;
}

/// Result of one translation request, as seen by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    Translated(String),
    Failed { reason: String },
}

impl TranslationOutcome {
    pub fn is_translated(&self) -> bool {
        matches!(self, TranslationOutcome::Translated(_))
    }
}

/// Call the translator and fold every failure mode into [`TranslationOutcome`].
///
/// Errors and empty results never propagate; they are logged and reported as
/// `Failed`. There is no retry.
pub async fn translate_chunk(
    translator: &dyn Translator,
    text: &str,
    target_lang: &str,
) -> TranslationOutcome {
    match translator.translate(text, target_lang).await {
        Ok(translated) if !translated.trim().is_empty() => {
            debug!("Translation result: {}...", preview(&translated, 50));
            TranslationOutcome::Translated(translated)
        }
        Ok(_) => {
            warn!("No translation found for text: {}...", preview(text, 30));
            TranslationOutcome::Failed {
                reason: "empty translation result".to_string(),
            }
        }
        Err(e) => {
            warn!("Error during translation with {}: {}", translator.name(), e);
            TranslationOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

/// First `max_chars` characters of `text`, without splitting a code point.
fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Delay policy applied before the translation requests of a file.
///
/// Delays are keyed by chunk position, not by request count: a blank chunk 0
/// sends nothing, so its delay is skipped rather than moved to the next chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestPacing {
    /// Pause before chunk 0 of every file.
    pub first_request_delay: Duration,
    /// Pause before every later chunk that is sent.
    pub between_requests: Duration,
}

impl Default for RequestPacing {
    fn default() -> Self {
        Self {
            first_request_delay: Duration::from_millis(500),
            between_requests: Duration::ZERO,
        }
    }
}

impl RequestPacing {
    pub fn none() -> Self {
        Self {
            first_request_delay: Duration::ZERO,
            between_requests: Duration::ZERO,
        }
    }

    /// Delay to apply before sending chunk `chunk_index` of a file, if any.
    pub fn delay_before(&self, chunk_index: usize) -> Option<Duration> {
        let delay = if chunk_index == 0 {
            self.first_request_delay
        } else {
            self.between_requests
        };
        (!delay.is_zero()).then_some(delay)
    }

    pub async fn wait(&self, chunk_index: usize) {
        if let Some(delay) = self.delay_before(chunk_index) {
            debug!("Pacing: sleeping {:?} before chunk {}", delay, chunk_index);
            tokio::time::sleep(delay).await;
        }
    }
}
