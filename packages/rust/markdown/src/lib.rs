//! Markdown rendering for the generated site.
//!
//! Turns fetched [`Work`] records into the index page and one page per paper.
//! All functions are pure; writing to disk happens in `vaultsite-core`.

mod slug;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use vaultsite_shared::{DOI_URL_PREFIX, Work};

pub use slug::{FALLBACK_SLUG, slugify};

/// Directory (relative to the docs root) holding one page per paper.
pub const PAPERS_DIR: &str = "papers";

/// Timestamp format shown on the index page.
const UPDATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A rendered paper page, ready to be written under `papers/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperPage {
    /// File name, e.g. `trendelenburg-gait-2015.md`.
    pub file_name: String,
    /// Page title (trimmed display name).
    pub title: String,
    /// Full page content.
    pub markdown: String,
}

// ---------------------------------------------------------------------------
// Paper rendering
// ---------------------------------------------------------------------------

/// One bullet line for the index: `- **Title** (2015) → [DOI](https://doi.org/...)`.
///
/// Links to the DOI when present, otherwise to the landing page (labelled `link`).
pub fn paper_line(work: &Work) -> String {
    let title = display_title(work, "Untitled");
    let year = work.year_text();
    let doi = work.bare_doi();

    let (label, url) = if doi.is_empty() {
        ("link", work.landing_page_url().to_string())
    } else {
        ("DOI", format!("{DOI_URL_PREFIX}{doi}"))
    };

    format!("- **{title}** ({year}) → [{label}]({url})")
}

/// Render the standalone page for a single paper.
pub fn paper_page(work: &Work) -> PaperPage {
    let title = display_title(work, "untitled");
    let year = work.year_text();
    let file_name = format!("{}-{year}.md", slugify(&title));

    let link = match work.doi.as_deref() {
        Some(doi) if !doi.is_empty() => doi,
        _ => work.landing_page_url(),
    };

    let markdown = format!(
        "# {title}\n\n- Year: {year}\n- Citations: {}\n- DOI/Link: {link}\n",
        work.cited_by_count
    );

    PaperPage {
        file_name,
        title,
        markdown,
    }
}

/// Render every paper page. Pages sharing a file name are all returned; the
/// last one written wins.
pub fn paper_pages(works: &[Work]) -> Vec<PaperPage> {
    works.iter().map(paper_page).collect()
}

// ---------------------------------------------------------------------------
// Index page
// ---------------------------------------------------------------------------

/// Render `index.md`: last-update stamp, paper list, and links to the graph
/// viewer and the paper directory.
#[instrument(skip_all, fields(papers = works.len()))]
pub fn render_index(site_title: &str, works: &[Work], updated_at: DateTime<Utc>) -> String {
    let mut lines = vec![
        format!("# {site_title}"),
        format!(
            "- Last updated: **{}**",
            updated_at.format(UPDATED_AT_FORMAT)
        ),
        String::new(),
        "## Latest papers".to_string(),
    ];

    lines.extend(works.iter().map(paper_line));

    lines.extend([
        String::new(),
        "## Note graph".to_string(),
        "- View the graph: [graph.html](graph.html)".to_string(),
        String::new(),
        "## Paper files".to_string(),
        format!("- Listing: [{PAPERS_DIR}/]({PAPERS_DIR}/)"),
    ]);

    let index = lines.join("\n");
    debug!(len = index.len(), "index rendered");
    index
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn display_title(work: &Work, fallback: &str) -> String {
    work.display_name
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
