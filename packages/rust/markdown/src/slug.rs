//! File-name slugs for paper pages.

use std::sync::LazyLock;

use regex::Regex;

static NON_SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\-]+").expect("valid slug regex"));

/// Used when a title has no sluggable characters at all.
pub const FALLBACK_SLUG: &str = "untitled";

/// Lowercase, collapse every run outside `[a-z0-9-]` to `-`, trim dashes.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let replaced = NON_SLUG_RE.replace_all(&lowered, "-");
    let slug = replaced.trim_matches('-');

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}
