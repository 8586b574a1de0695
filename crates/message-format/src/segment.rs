//! Segmentation of a Markdown reply into chunks that fit one Telegram message.
//!
//! Text is split on `\n` and lines are packed greedily into chunks. Each line counts its
//! characters plus one for the newline. When the next line would overflow the limit the
//! current chunk is flushed; if a fenced code block is open at that point, the chunk is
//! closed with a bare fence and the next chunk starts by re-opening it with the same
//! language tag, so both messages show well-formed code.
//!
//! A single line longer than the limit is never cut: it lands in a chunk of its own. Inside a
//! fenced block the same holds for a line that does not fit together with its opening and
//! closing fence; that chunk is the only other one allowed past the limit.
//!
//! An opening fence line is never left dangling at the end of a chunk: when the first code line
//! after it does not fit, the fence moves to the next chunk with it. A closing fence line never
//! starts a chunk of its own, since the reserve kept while the block is open already pays for it.

use tracing::debug;

use crate::CODE_FENCE;

/// Budget kept free while a fence is open so the closing fence line always fits.
const CLOSE_FENCE_RESERVE: usize = CODE_FENCE.len() + 1;

/// Code fence state while walking the lines of one reply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FenceState {
    /// Outside any fenced code block.
    #[default]
    Closed,
    /// Inside a fenced block opened with ```` ```{lang} ```` (`lang` may be empty).
    Open { lang: String },
}

impl FenceState {
    /// Returns the state after `line`. A line whose trimmed content starts with the fence
    /// marker toggles the state; opening captures the rest of that line as the language tag.
    pub fn next(&self, line: &str) -> FenceState {
        match (self, line.trim().strip_prefix(CODE_FENCE)) {
            (_, None) => self.clone(),
            (FenceState::Closed, Some(lang)) => FenceState::Open {
                lang: lang.to_string(),
            },
            (FenceState::Open { .. }, Some(_)) => FenceState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, FenceState::Open { .. })
    }
}

/// Running chunk: its lines plus their length budget.
#[derive(Debug, Default)]
struct ChunkBuilder {
    lines: Vec<String>,
    len: usize,
    /// True once a line of the original text was added (seed fences don't count).
    has_content: bool,
}

impl ChunkBuilder {
    fn seeded(line: &str) -> Self {
        let mut chunk = Self::default();
        chunk.push_line(line);
        chunk
    }

    fn push_original(&mut self, line: &str) {
        self.push_line(line);
        self.has_content = true;
    }

    fn push_line(&mut self, line: &str) {
        self.len += line_budget(line);
        self.lines.push(line.to_string());
    }

    fn pop_line(&mut self) -> Option<String> {
        let line = self.lines.pop()?;
        self.len -= line_budget(&line);
        Some(line)
    }

    fn fits(&self, line: &str, reserve: usize, limit: usize) -> bool {
        self.len + line_budget(line) + reserve <= limit
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

fn line_budget(line: &str) -> usize {
    line.chars().count() + 1
}

/// Splits `text` into ordered chunks of at most `limit` characters.
///
/// Empty input yields no chunks. Output depends only on `(text, limit)`.
pub fn segment(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    if text.is_empty() {
        return chunks;
    }

    let mut current = ChunkBuilder::default();
    let mut fence = FenceState::Closed;
    // The last line of `current` opened the block that is still open.
    let mut opener_pending = false;

    for line in text.split('\n') {
        let next = fence.next(line);

        if fence.is_open() && !next.is_open() {
            if current.fits(line, 0, limit) {
                current.push_original(line);
            } else {
                current.push_original(CODE_FENCE);
            }
            fence = next;
            opener_pending = false;
            continue;
        }

        let reserve = if next.is_open() { CLOSE_FENCE_RESERVE } else { 0 };
        if current.has_content && !current.fits(line, reserve, limit) {
            if opener_pending {
                // A lone opener stays put: the line cannot fit with its fences anywhere.
                if current.lines.len() > 1 {
                    if let Some(opener) = current.pop_line() {
                        chunks.push(std::mem::take(&mut current).finish());
                        current.push_original(&opener);
                    }
                }
            } else {
                current = match &fence {
                    FenceState::Open { lang } => {
                        current.push_line(CODE_FENCE);
                        chunks.push(current.finish());
                        ChunkBuilder::seeded(&format!("{CODE_FENCE}{lang}"))
                    }
                    FenceState::Closed => {
                        chunks.push(current.finish());
                        ChunkBuilder::default()
                    }
                };
            }
        }

        current.push_original(line);
        opener_pending = !fence.is_open() && next.is_open();
        fence = next;
    }

    if current.has_content {
        chunks.push(current.finish());
    }

    debug!(
        text_len = text.len(),
        limit = limit,
        chunks = chunks.len(),
        "Segmented reply"
    );
    chunks
}
