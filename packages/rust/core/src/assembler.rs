//! Site directory assembler.
//!
//! Takes rendered paper pages and the note graph, then writes the final docs
//! directory to disk.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use vaultsite_graph::NoteGraph;
use vaultsite_markdown::{PAPERS_DIR, paper_pages, render_index};
use vaultsite_shared::{Result, VaultSiteError, Work};

use crate::viewer::{GRAPH_HTML_FILE, GRAPH_JSON_FILE, graph_html};

/// File name of the generated index page.
pub const INDEX_FILE: &str = "index.md";

/// Configuration for site assembly.
#[derive(Debug, Clone)]
pub struct AssembleConfig {
    /// Root of the generated site (e.g., `docs/`).
    pub docs_dir: PathBuf,
    /// Heading of the index page.
    pub site_title: String,
}

/// Paths written by [`write_pages`].
#[derive(Debug, Clone)]
pub struct PagesWritten {
    pub index_path: PathBuf,
    /// One entry per paper page written (collisions listed once per write).
    pub paper_paths: Vec<PathBuf>,
}

/// Paths written by [`write_graph_assets`].
#[derive(Debug, Clone)]
pub struct GraphAssetsWritten {
    pub json_path: PathBuf,
    pub html_path: PathBuf,
}

/// Create `docs/` and `docs/papers/`.
pub fn prepare_dirs(docs_dir: &Path) -> Result<()> {
    let dirs = [docs_dir.to_path_buf(), docs_dir.join(PAPERS_DIR)];

    for dir in &dirs {
        std::fs::create_dir_all(dir).map_err(|e| VaultSiteError::io(dir, e))?;
    }

    debug!(path = %docs_dir.display(), "directory structure created");
    Ok(())
}

/// Write `index.md` and one page per paper under `papers/`.
///
/// ```text
/// <docs_dir>/
/// ├── index.md
/// └── papers/
///     ├── trendelenburg-gait-2015.md
///     └── ...
/// ```
#[instrument(skip_all, fields(docs_dir = %config.docs_dir.display(), papers = works.len()))]
pub fn write_pages(
    config: &AssembleConfig,
    works: &[Work],
    updated_at: DateTime<Utc>,
) -> Result<PagesWritten> {
    prepare_dirs(&config.docs_dir)?;

    let index_path = config.docs_dir.join(INDEX_FILE);
    let index = render_index(&config.site_title, works, updated_at);
    write_file_atomic(&index_path, &index)?;

    let papers_dir = config.docs_dir.join(PAPERS_DIR);
    let mut paper_paths = Vec::with_capacity(works.len());
    for page in paper_pages(works) {
        let path = papers_dir.join(&page.file_name);
        write_file_atomic(&path, &page.markdown)?;
        debug!(path = %path.display(), title = %page.title, "wrote paper page");
        paper_paths.push(path);
    }

    info!(pages = paper_paths.len(), "pages written");

    Ok(PagesWritten {
        index_path,
        paper_paths,
    })
}

/// Write `graph.json` and the `graph.html` viewer.
#[instrument(skip_all, fields(docs_dir = %docs_dir.display(), nodes = graph.node_count()))]
pub fn write_graph_assets(docs_dir: &Path, graph: &NoteGraph) -> Result<GraphAssetsWritten> {
    prepare_dirs(docs_dir)?;

    let json_path = docs_dir.join(GRAPH_JSON_FILE);
    write_file_atomic(&json_path, &graph.to_json()?)?;

    let html_path = docs_dir.join(GRAPH_HTML_FILE);
    write_file_atomic(&html_path, &graph_html())?;

    info!(
        nodes = graph.node_count(),
        links = graph.link_count(),
        "graph assets written"
    );

    Ok(GraphAssetsWritten {
        json_path,
        html_path,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Write via a dot-prefixed temp file in the same directory, then rename.
pub(crate) fn write_file_atomic(target: &Path, content: &str) -> Result<()> {
    let file_name = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            VaultSiteError::validation(format!("invalid output path: {}", target.display()))
        })?;
    let temp = target.with_file_name(format!(".{file_name}.tmp"));

    std::fs::write(&temp, content).map_err(|e| VaultSiteError::io(&temp, e))?;
    std::fs::rename(&temp, target).map_err(|e| VaultSiteError::io(target, e))?;

    debug!(path = %target.display(), size = content.len(), "wrote file");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use vaultsite_graph::{GraphLink, GraphNode};

    fn make_config(docs_dir: &Path) -> AssembleConfig {
        AssembleConfig {
            docs_dir: docs_dir.to_path_buf(),
            site_title: "Test Wiki".into(),
        }
    }

    fn make_works() -> Vec<Work> {
        vec![
            Work {
                display_name: Some("Gait Analysis".into()),
                publication_year: Some(2020),
                doi: Some("https://doi.org/10.1/ga".into()),
                cited_by_count: 3,
                primary_location: None,
            },
            Work {
                display_name: Some("Muscle Weakness".into()),
                publication_year: Some(2018),
                ..Default::default()
            },
        ]
    }

    fn make_graph() -> NoteGraph {
        NoteGraph {
            nodes: vec![
                GraphNode {
                    id: "A.md".into(),
                    group: "note".into(),
                },
                GraphNode {
                    id: "B.md".into(),
                    group: "note".into(),
                },
            ],
            links: vec![GraphLink {
                source: "A.md".into(),
                target: "B.md".into(),
            }],
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 3, 4, 5, 6).unwrap()
    }

    #[test]
    fn write_pages_creates_index_and_papers() {
        let tmp = tempfile::tempdir().unwrap();
        let docs = tmp.path().join("docs");
        let written = write_pages(&make_config(&docs), &make_works(), fixed_time()).unwrap();

        assert_eq!(written.index_path, docs.join("index.md"));
        assert!(docs.join("papers/gait-analysis-2020.md").exists());
        assert!(docs.join("papers/muscle-weakness-2018.md").exists());

        let index = std::fs::read_to_string(docs.join("index.md")).unwrap();
        assert!(index.starts_with("# Test Wiki\n- Last updated: **2026-02-03 04:05 UTC**"));
        assert!(index.contains("[DOI](https://doi.org/10.1/ga)"));
    }

    #[test]
    fn write_pages_with_no_papers_still_creates_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let docs = tmp.path().join("docs");
        let written = write_pages(&make_config(&docs), &[], fixed_time()).unwrap();

        assert!(written.paper_paths.is_empty());
        assert!(docs.join("papers").is_dir());
        assert!(docs.join("index.md").exists());
    }

    #[test]
    fn graph_assets_round_trip_through_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let written = write_graph_assets(tmp.path(), &make_graph()).unwrap();

        let json = std::fs::read_to_string(&written.json_path).unwrap();
        assert_eq!(
            json,
            r#"{"nodes":[{"id":"A.md","group":"note"},{"id":"B.md","group":"note"}],"links":[{"source":"A.md","target":"B.md"}]}"#
        );

        let html = std::fs::read_to_string(&written.html_path).unwrap();
        assert!(html.contains("d3@7"));
    }

    #[test]
    fn empty_graph_json_is_exact() {
        let tmp = tempfile::tempdir().unwrap();
        let written = write_graph_assets(tmp.path(), &NoteGraph::default()).unwrap();
        let json = std::fs::read_to_string(&written.json_path).unwrap();
        assert_eq!(json, r#"{"nodes":[],"links":[]}"#);
    }

    #[test]
    fn atomic_writes_leave_no_temp_files() {
        let tmp = tempfile::tempdir().unwrap();
        let docs = tmp.path().join("docs");
        write_pages(&make_config(&docs), &make_works(), fixed_time()).unwrap();
        write_graph_assets(&docs, &make_graph()).unwrap();

        for dir in [docs.clone(), docs.join("papers")] {
            for entry in std::fs::read_dir(&dir).unwrap() {
                let name = entry.unwrap().file_name().to_string_lossy().to_string();
                assert!(!name.starts_with('.'), "temp file left behind: {name}");
            }
        }
    }

    #[test]
    fn rewriting_overwrites_previous_output() {
        let tmp = tempfile::tempdir().unwrap();
        let docs = tmp.path().join("docs");
        let config = make_config(&docs);

        write_pages(&config, &make_works(), fixed_time()).unwrap();
        write_pages(&config, &[], fixed_time()).unwrap();

        let index = std::fs::read_to_string(docs.join("index.md")).unwrap();
        assert!(!index.contains("Gait Analysis"));
    }
}
