//! Timestamp cleanup for translated text.
//!
//! Translation services tend to mangle SRT timing lines: spaces appear around
//! the `:` and `,` separators and the arrow gets squeezed or split. Both
//! rewrites below map canonical input to itself, so running the normaliser
//! again is a no-op.

use regex::Regex;
use std::sync::LazyLock;

/// `HH:MM:SS,mmm` with optional horizontal whitespace around each separator.
static SPACED_TIMECODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2})[ \t]*:[ \t]*(\d{2})[ \t]*:[ \t]*(\d{2})[ \t]*,[ \t]*(\d{3})")
        .expect("Invalid timecode regex")
});

/// Two canonical timecodes joined by some arrow variant (`->`, `-->`, `- ->`, ...).
static LOOSE_ARROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2}:\d{2}:\d{2},\d{3})[ \t]*-[ \t-]*>[ \t]*(\d{2}:\d{2}:\d{2},\d{3})")
        .expect("Invalid arrow regex")
});

/// Restore canonical `HH:MM:SS,mmm --> HH:MM:SS,mmm` spacing everywhere in `text`.
pub fn normalize_timestamps(text: &str) -> String {
    let text = SPACED_TIMECODE.replace_all(text, "$1:$2:$3,$4");
    LOOSE_ARROW.replace_all(&text, "$1 --> $2").into_owned()
}
