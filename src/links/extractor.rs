use crate::messages::Messages;

/// Maximum number of links kept per text message or spreadsheet row.
pub const DEFAULT_LINK_LIMIT: usize = 10;

/// Literal, case-sensitive prefix a candidate must start with.
pub const LINK_PREFIX: &str = "http";

/// Split `text` on commas and return the first `limit` trimmed pieces that
/// start with [`LINK_PREFIX`], in their original order.
///
/// Nothing is parsed or validated beyond the prefix, and duplicates are kept.
#[must_use]
pub fn extract_links(text: &str, limit: usize) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|piece| piece.starts_with(LINK_PREFIX))
        .take(limit)
        .map(String::from)
        .collect()
}

/// Render the reply for the free-text path. `None` when there is nothing to
/// report, so the caller can send the "no valid links" notice instead.
#[must_use]
pub fn format_link_reply(links: &[String], messages: &Messages) -> Option<String> {
    if links.is_empty() {
        return None;
    }
    Some(format!("{}\n\n{}", messages.links_header(), links.join("\n")))
}
