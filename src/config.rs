use crate::error::{Result, SrtTranslateError};
use crate::language;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    /// Language code sent to the translator.
    pub target_language: String,
    /// Suffix of published files; derived from the target language when unset.
    pub output_suffix: Option<String>,
    /// Source lines per translation request.
    pub chunk_size: usize,
    /// Pause before the first request of each file.
    pub first_chunk_delay_ms: u64,
    /// Only pick up `.en.srt` files.
    pub english_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            target_language: "nl".to_string(),
            output_suffix: None,
            chunk_size: 100,
            first_chunk_delay_ms: 500,
            english_only: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Load from config file if it exists
        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path)?;
                match toml::from_str::<Config>(&contents) {
                    Ok(file_config) => config = file_config,
                    Err(e) => tracing::warn!("Ignoring malformed {:?}: {}", config_path, e),
                }
            }
        }

        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            self.gemini_api_key = Some(key);
        }
        if let Ok(lang) = std::env::var("SRT_TRANSLATE_TARGET_LANGUAGE") {
            self.target_language = lang;
        }
        if let Ok(suffix) = std::env::var("SRT_TRANSLATE_OUTPUT_SUFFIX") {
            self.output_suffix = Some(suffix);
        }
        if let Ok(size) = std::env::var("SRT_TRANSLATE_CHUNK_SIZE") {
            if let Ok(s) = size.parse() {
                self.chunk_size = s;
            }
        }
        if let Ok(delay) = std::env::var("SRT_TRANSLATE_FIRST_CHUNK_DELAY_MS") {
            if let Ok(d) = delay.parse() {
                self.first_chunk_delay_ms = d;
            }
        }
        if let Ok(flag) = std::env::var("SRT_TRANSLATE_ENGLISH_ONLY") {
            self.english_only = matches!(flag.to_lowercase().as_str(), "1" | "true" | "yes");
        }
    }

    /// Suffix written into published file names, e.g. `nld` for `movie.nld.srt`.
    pub fn effective_output_suffix(&self) -> String {
        match &self.output_suffix {
            Some(suffix) => suffix.trim().trim_matches('.').to_string(),
            None => language::file_suffix_for(&self.target_language),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.gemini_api_key.is_none() {
            return Err(SrtTranslateError::Config(
                "GEMINI_API_KEY not set. Get one at https://aistudio.google.com/apikey"
                    .to_string(),
            ));
        }

        if self.chunk_size == 0 {
            return Err(SrtTranslateError::Config(
                "Chunk size must be greater than 0".to_string(),
            ));
        }

        if self.target_language.trim().is_empty() {
            return Err(SrtTranslateError::Config(
                "Target language must not be empty".to_string(),
            ));
        }

        if self.effective_output_suffix().is_empty() {
            return Err(SrtTranslateError::Config(
                "Output suffix must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("srt-translate").join("config.toml"))
    }
}
