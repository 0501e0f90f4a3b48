use std::ops::Range;

use tracing::debug;

use super::parse::parse_line;

/// Default number of source lines per translation request.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Fixed-size windowing over a file's lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlan {
    pub total_lines: usize,
    pub chunk_size: usize,
}

impl ChunkPlan {
    /// A zero chunk size is bumped to one so windowing always advances.
    pub fn new(total_lines: usize, chunk_size: usize) -> Self {
        Self {
            total_lines,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Number of windows the plan yields.
    pub fn len(&self) -> usize {
        self.total_lines.div_ceil(self.chunk_size)
    }

    pub fn is_empty(&self) -> bool {
        self.total_lines == 0
    }

    /// Percentage of lines covered once the window starting at `offset` is done.
    pub fn progress_after(&self, offset: usize) -> f64 {
        if self.total_lines == 0 {
            return 100.0;
        }
        let done = (offset + self.chunk_size).min(self.total_lines);
        done as f64 * 100.0 / self.total_lines as f64
    }

    pub fn windows(&self) -> impl Iterator<Item = Range<usize>> {
        chunk_windows(self.total_lines, self.chunk_size)
    }
}

/// Contiguous `[start, end)` windows covering `0..total_lines` with no gaps or
/// overlaps. The last window may be short.
pub fn chunk_windows(total_lines: usize, chunk_size: usize) -> impl Iterator<Item = Range<usize>> {
    let chunk_size = chunk_size.max(1);
    (0..total_lines)
        .step_by(chunk_size)
        .map(move |start| start..(start + chunk_size).min(total_lines))
}

/// A window of source lines serialised for one translation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Zero-based line offset of the first source line.
    pub offset: usize,
    /// Serialised subtitle text.
    pub text: String,
}

impl Chunk {
    /// Whether the chunk carries nothing worth translating.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Parse every line in `window` and concatenate the rendered results.
///
/// Out-of-range windows are clamped to the available lines.
pub fn build_chunk_text<S: AsRef<str>>(lines: &[S], window: Range<usize>) -> Chunk {
    let end = window.end.min(lines.len());
    let start = window.start.min(end);

    let mut text = String::new();
    for (i, line) in lines[start..end].iter().enumerate() {
        let line = line.as_ref();
        debug!("Processing line {}: {}", start + i + 1, line.trim());
        text.push_str(&parse_line(line).render());
    }

    debug!(
        "Built chunk at line {} ({} lines, {} bytes)",
        start + 1,
        end - start,
        text.len()
    );

    Chunk {
        offset: start,
        text,
    }
}
