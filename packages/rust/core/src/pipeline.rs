//! End-to-end `build` pipeline: fetch papers → write pages → scan vault → write graph.
//!
//! Fetch failures and a missing vault degrade to empty output; only failures
//! to write the site itself abort the run.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{info, instrument, warn};

use vaultsite_graph::{ScanStats, scan_vault};
use vaultsite_papers::fetch_papers;
use vaultsite_shared::{AppConfig, Result, SearchQuery, Work};

use crate::assembler::{self, AssembleConfig};

/// Configuration for the `build_site` pipeline.
#[derive(Debug, Clone)]
pub struct BuildSiteConfig {
    /// Output directory for the generated site.
    pub docs_dir: PathBuf,
    /// Note vault scanned for links.
    pub vault_dir: PathBuf,
    /// Heading of the index page.
    pub site_title: String,
    /// Paper search request.
    pub query: SearchQuery,
    /// Skip the paper fetch entirely.
    pub offline: bool,
}

impl From<&AppConfig> for BuildSiteConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            docs_dir: PathBuf::from(&config.site.docs_dir),
            vault_dir: PathBuf::from(&config.site.vault_dir),
            site_title: config.site.title.clone(),
            query: SearchQuery::from(config),
            offline: false,
        }
    }
}

/// Result of the `build_site` pipeline.
#[derive(Debug)]
pub struct BuildSiteResult {
    /// Directory the site was written to.
    pub docs_dir: PathBuf,
    /// Number of papers rendered.
    pub paper_count: usize,
    /// Why the paper list is empty, if the fetch failed.
    pub fetch_error: Option<String>,
    /// Nodes in the note graph.
    pub node_count: usize,
    /// Links in the note graph.
    pub link_count: usize,
    /// Vault scan counters.
    pub scan: ScanStats,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called once the paper fetch has settled (possibly with zero papers).
    fn papers_fetched(&self, count: usize);
    /// Called when the pipeline completes.
    fn done(&self, result: &BuildSiteResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn papers_fetched(&self, _count: usize) {}
    fn done(&self, _result: &BuildSiteResult) {}
}

/// Run the full `build` pipeline.
///
/// 1. Fetch papers (empty on failure or when offline)
/// 2. Write `index.md` and paper pages
/// 3. Scan the vault into a link graph
/// 4. Write `graph.json` and `graph.html`
#[instrument(skip_all, fields(docs = %config.docs_dir.display(), vault = %config.vault_dir.display()))]
pub async fn build_site(
    config: &BuildSiteConfig,
    progress: &dyn ProgressReporter,
) -> Result<BuildSiteResult> {
    let start = Instant::now();

    info!(offline = config.offline, "starting site build");

    // --- Phase 1: Papers ---
    let (works, fetch_error) = if config.offline {
        info!("offline build, skipping paper fetch");
        (Vec::new(), None)
    } else {
        progress.phase("Fetching papers");
        fetch_or_empty(&config.query).await
    };
    progress.papers_fetched(works.len());

    // --- Phase 2: Pages ---
    progress.phase("Writing pages");
    let assemble_config = AssembleConfig {
        docs_dir: config.docs_dir.clone(),
        site_title: config.site_title.clone(),
    };
    assembler::write_pages(&assemble_config, &works, Utc::now())?;

    // --- Phase 3: Vault graph ---
    progress.phase("Scanning note vault");
    let scan = scan_vault(&config.vault_dir);

    // --- Phase 4: Graph assets ---
    progress.phase("Writing graph");
    assembler::write_graph_assets(&config.docs_dir, &scan.graph)?;

    let result = BuildSiteResult {
        docs_dir: config.docs_dir.clone(),
        paper_count: works.len(),
        fetch_error,
        node_count: scan.graph.node_count(),
        link_count: scan.graph.link_count(),
        scan: scan.stats,
        elapsed: start.elapsed(),
    };

    info!(
        papers = result.paper_count,
        nodes = result.node_count,
        links = result.link_count,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "site build complete"
    );

    progress.done(&result);
    Ok(result)
}

/// Fetch papers, turning any failure into an empty list plus the error text.
pub async fn fetch_or_empty(query: &SearchQuery) -> (Vec<Work>, Option<String>) {
    match fetch_papers(query).await {
        Ok(works) => (works, None),
        Err(e) => {
            warn!(error = %e, "paper fetch failed, continuing with an empty list");
            (Vec::new(), Some(e.to_string()))
        }
    }
}
