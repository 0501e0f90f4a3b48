//! Language table shared by the translator prompt, the interactive front end
//! and published file naming.

/// A supported target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Code sent to the translation service (ISO 639-1).
    pub code: &'static str,
    /// Suffix used in published file names (ISO 639-2/B).
    pub file_suffix: &'static str,
    /// Human-readable name.
    pub name: &'static str,
}

pub const LANGUAGES: &[Language] = &[
    Language { code: "nl", file_suffix: "nld", name: "Dutch" },
    Language { code: "en", file_suffix: "eng", name: "English" },
    Language { code: "de", file_suffix: "ger", name: "German" },
    Language { code: "fr", file_suffix: "fre", name: "French" },
    Language { code: "es", file_suffix: "spa", name: "Spanish" },
    Language { code: "it", file_suffix: "ita", name: "Italian" },
    Language { code: "pt", file_suffix: "por", name: "Portuguese" },
    Language { code: "sv", file_suffix: "swe", name: "Swedish" },
    Language { code: "da", file_suffix: "dan", name: "Danish" },
    Language { code: "no", file_suffix: "nor", name: "Norwegian" },
    Language { code: "fi", file_suffix: "fin", name: "Finnish" },
    Language { code: "pl", file_suffix: "pol", name: "Polish" },
    Language { code: "tr", file_suffix: "tur", name: "Turkish" },
    Language { code: "ru", file_suffix: "rus", name: "Russian" },
    Language { code: "ja", file_suffix: "jpn", name: "Japanese" },
    Language { code: "zh", file_suffix: "chi", name: "Chinese" },
    Language { code: "ko", file_suffix: "kor", name: "Korean" },
    Language { code: "ar", file_suffix: "ara", name: "Arabic" },
];

/// Look up a language by its translation code, ignoring case.
pub fn find(code: &str) -> Option<&'static Language> {
    let code = code.trim();
    LANGUAGES.iter().find(|l| l.code.eq_ignore_ascii_case(code))
}

/// File suffix for a translation code. Unknown codes are used as-is.
pub fn file_suffix_for(code: &str) -> String {
    find(code)
        .map(|l| l.file_suffix.to_string())
        .unwrap_or_else(|| code.trim().to_lowercase())
}

/// Display name for prompts. Unknown codes get a generic fallback.
pub fn display_name(code: &str) -> &'static str {
    find(code).map(|l| l.name).unwrap_or("the target language")
}
