//! Post-processing of model output before it is sent to Discord.

/// Discord's message limit for standard users.
pub const MAX_MESSAGE_CHARS: usize = 2000;

const REASONING_OPEN: &str = "<think>";
const REASONING_CLOSE: &str = "</think>";
const ELLIPSIS: &str = "...";

/// Drop the reasoning segment emitted by thinking models.
///
/// Only when both markers are present, everything up to and including the
/// first `</think>` is discarded. The result is always trimmed.
#[must_use]
pub fn strip_reasoning(content: &str) -> &str {
    if content.contains(REASONING_OPEN)
        && let Some((_, answer)) = content.split_once(REASONING_CLOSE)
    {
        return answer.trim();
    }
    content.trim()
}

/// Cap `text` at `limit` characters, replacing the tail with `...` when cut.
#[must_use]
pub fn truncate_to_limit(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let keep = limit.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Turn raw model content into the final Discord reply.
#[must_use]
pub fn finalize_answer(content: &str) -> String {
    truncate_to_limit(strip_reasoning(content), MAX_MESSAGE_CHARS)
}
