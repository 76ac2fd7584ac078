//! `[[wikilink]]` extraction.

use std::sync::LazyLock;

use regex::Regex;

/// Matches `[[target]]`; the target may not contain `]`.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("valid wikilink regex"));

/// Lazily yield every `[[...]]` target in `text`, in order of appearance.
///
/// Tokens are returned verbatim (no trimming, no alias or heading stripping)
/// and duplicates are preserved. Calling this again on the same text yields
/// the same sequence.
pub fn extract_links(text: &str) -> impl Iterator<Item = &str> + '_ {
    LINK_RE
        .captures_iter(text)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
}
