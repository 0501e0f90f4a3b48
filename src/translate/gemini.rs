//! Gemini-based translation using the Generative AI API.

use crate::error::{Result, SrtTranslateError};
use crate::language;
use crate::translate::Translator;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Translator using Google Gemini API.
pub struct GeminiTranslator {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiTranslator {
    /// Create a new Gemini translator with the given API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set a different model (e.g., "gemini-1.5-pro").
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point the client at a different API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    /// Build the translation prompt.
    fn build_prompt(&self, text: &str, target_lang: &str) -> String {
        let lang_name = language::display_name(target_lang);
        format!(
            r#"Translate the following SubRip (SRT) subtitle text to {lang_name}.
Keep every cue number, every timestamp line and every blank line exactly as it is; translate only the dialogue.
Return ONLY the translated subtitle text, nothing else.

{text}"#
        )
    }
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Deserialize, Debug)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiError>,
}

#[derive(Deserialize, Debug)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Deserialize, Debug)]
struct GeminiResponseContent {
    parts: Option<Vec<GeminiResponsePart>>,
}

#[derive(Deserialize, Debug)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct GeminiError {
    message: String,
}

/// Strip a ```` ``` ```` fence the model sometimes wraps its answer in.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return text;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop the info string (e.g. "srt") on the opening line.
    match body.split_once('\n') {
        Some((_, inner)) => inner,
        None => body,
    }
}

#[async_trait]
impl Translator for GeminiTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        debug!("Translating {} bytes to {}", text.len(), target_lang);

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: self.build_prompt(text, target_lang),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| SrtTranslateError::Api(format!("Translation request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SrtTranslateError::Api(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(SrtTranslateError::Api(format!(
                "Translation API error ({}): {}",
                status, body
            )));
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            SrtTranslateError::Api(format!("Failed to parse translation response: {}", e))
        })?;

        if let Some(error) = gemini_response.error {
            return Err(SrtTranslateError::Api(format!(
                "Gemini error: {}",
                error.message
            )));
        }

        let translated_text = gemini_response
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .map(|parts| {
                parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok(strip_code_fence(&translated_text).trim().to_string())
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
