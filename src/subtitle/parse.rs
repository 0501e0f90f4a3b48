//! Line-level subtitle parser.
//!
//! Each source line is parsed on its own. A line that looks like an SRT timing
//! line (optionally prefixed with the cue index and followed by inline text)
//! becomes a [`SubtitleLine::Block`]; every other line is passed through
//! untouched as [`SubtitleLine::Raw`].

use super::{SubtitleLine, Timecode};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// `[index] HH:MM:SS,mmm --> HH:MM:SS,mmm [text]`
static TIMING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(\d+)\s+)?(\d{2}:\d{2}:\d{2},\d{3})\s*-->\s*(\d{2}:\d{2}:\d{2},\d{3})(?:\s+(.*))?$",
    )
    .expect("Invalid timing line regex")
});

/// Parse a single line. The line is trimmed first; malformed timecodes fall
/// through to `Raw`.
pub fn parse_line(line: &str) -> SubtitleLine {
    let line = line.trim();

    let Some(caps) = TIMING_LINE.captures(line) else {
        return SubtitleLine::Raw(line.to_string());
    };

    // An index too large for u32 is not a cue number we can trust.
    let index = match caps.get(1) {
        Some(m) => match m.as_str().parse::<u32>() {
            Ok(i) => Some(i),
            Err(_) => return SubtitleLine::Raw(line.to_string()),
        },
        None => None,
    };

    let block = SubtitleLine::Block {
        index,
        start: Timecode(caps[2].to_string()),
        end: Timecode(caps[3].to_string()),
        text: caps.get(4).map(|m| m.as_str().to_string()).unwrap_or_default(),
    };
    trace!("Parsed timing line: {:?}", block);
    block
}
