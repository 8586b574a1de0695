//! Full reply pipeline: raw agent text → ordered, non-empty Telegram HTML messages.

use tracing::debug;

use crate::render::render;
use crate::segment::segment;
use crate::MESSAGE_LENGTH_LIMIT;

/// Formatting configuration. `message_limit` must match the delivery platform's limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatConfig {
    pub message_limit: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            message_limit: MESSAGE_LENGTH_LIMIT,
        }
    }
}

/// Segments a reply and renders every chunk, dropping chunks that are blank before or after
/// rendering.
#[derive(Debug, Clone, Default)]
pub struct ReplyFormatter {
    config: FormatConfig,
}

impl ReplyFormatter {
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    pub fn format(&self, raw: &str) -> Vec<String> {
        let chunks = segment(raw, self.config.message_limit);
        let total = chunks.len();

        let rendered: Vec<String> = chunks
            .iter()
            .filter(|chunk| !chunk.trim().is_empty())
            .map(|chunk| render(chunk))
            .filter(|html| !html.trim().is_empty())
            .collect();

        debug!(
            raw_len = raw.len(),
            chunks = total,
            messages = rendered.len(),
            "Formatted agent reply"
        );
        rendered
    }
}
