//! Integration tests for [`message_format::ReplyFormatter`] and the public segment/render API.
//!
//! Covers long replies split at the Telegram limit, code fences carried across chunks, and
//! dropping blank chunks.

use message_format::{render, segment, FormatConfig, ReplyFormatter, MESSAGE_LENGTH_LIMIT};

/// **Test: A 5000-char reply at the real limit becomes two messages, all lines preserved.**
#[test]
fn long_reply_splits_into_two_messages() {
    let text = "a\n".repeat(2500);

    let chunks = segment(&text, MESSAGE_LENGTH_LIMIT);
    assert_eq!(chunks.len(), 2);
    assert!(chunks[0].chars().count() <= MESSAGE_LENGTH_LIMIT);
    assert_eq!(chunks.join("\n"), text);

    let messages = ReplyFormatter::default().format(&text);
    assert_eq!(messages.len(), 2);
}

/// **Test: A python block crossing the boundary is closed, then re-opened with `python`.**
///
/// **Setup:** 4000 chars of prose, then a fenced python block of ~400 chars.
/// **Expected:** first chunk ends with a bare fence, second starts with ```` ```python ````.
#[test]
fn python_fence_is_reopened_with_language() {
    let prose = format!("{}\n", "p".repeat(3990));
    let code = (0..40)
        .map(|i| format!("print({i})"))
        .collect::<Vec<_>>()
        .join("\n");
    let text = format!("{prose}```python\n{code}\n```\nbye");

    let chunks = segment(&text, MESSAGE_LENGTH_LIMIT);

    assert_eq!(chunks.len(), 2);
    assert!(chunks[0].ends_with("\n```"));
    assert!(chunks[0].contains("```python\n"));
    assert!(chunks[1].starts_with("```python\n"));
    assert!(chunks[1].ends_with("```\nbye"));
    for chunk in &chunks {
        assert!(chunk.chars().count() <= MESSAGE_LENGTH_LIMIT);
    }

    let messages = ReplyFormatter::default().format(&text);
    assert!(messages[1].starts_with("```python\n"));
}

/// **Test: Chunks that are only whitespace never reach the output list.**
#[test]
fn blank_chunks_are_dropped() {
    let formatter = ReplyFormatter::new(FormatConfig { message_limit: 8 });

    let messages = formatter.format("*hey*\n      \n\n**yo**");

    assert_eq!(messages, vec!["<i>hey</i>", "<b>yo</b>"]);
}

/// **Test: Escaping happens once even when the text already looks like markup.**
#[test]
fn escaping_is_applied_exactly_once() {
    assert_eq!(render("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
    assert_eq!(render("&amp;"), "&amp;amp;");
}
