pub mod chunk;
pub mod normalize;
pub mod parse;

pub use chunk::{build_chunk_text, chunk_windows, Chunk, ChunkPlan, DEFAULT_CHUNK_SIZE};
pub use normalize::normalize_timestamps;
pub use parse::parse_line;

use std::fmt;

/// An SRT timecode in canonical `HH:MM:SS,mmm` form.
///
/// Only constructed by the parser, so the inner string always matches the
/// canonical grammar. No arithmetic is done on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timecode(String);

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One source line after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubtitleLine {
    /// A recognised timing line, optionally prefixed by its index and followed
    /// by inline text.
    Block {
        index: Option<u32>,
        start: Timecode,
        end: Timecode,
        text: String,
    },
    /// Anything else, kept verbatim.
    Raw(String),
}

impl SubtitleLine {
    /// Serialise back into subtitle text for a translation request.
    ///
    /// An indexed block renders as `index\nstart --> end\ntext\n\n`. A bare
    /// timing line renders as `start --> end\n`, with its text on the next
    /// line if it had any. Raw lines are emitted unchanged plus a newline.
    pub fn render(&self) -> String {
        match self {
            SubtitleLine::Block {
                index: Some(index),
                start,
                end,
                text,
            } => format!("{}\n{} --> {}\n{}\n\n", index, start, end, text),
            SubtitleLine::Block {
                index: None,
                start,
                end,
                text,
            } => {
                if text.is_empty() {
                    format!("{} --> {}\n", start, end)
                } else {
                    format!("{} --> {}\n{}\n", start, end, text)
                }
            }
            SubtitleLine::Raw(line) => format!("{}\n", line),
        }
    }
}
