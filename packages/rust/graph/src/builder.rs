//! Vault scanning: enumerate notes, extract links, resolve them, build the graph.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use crate::links::extract_links;
use crate::model::{GraphAccumulator, NoteGraph};
use crate::resolver::{LinkResolver, NOTE_EXTENSION};

/// Counters collected while scanning a vault.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Notes found under the root.
    pub documents: usize,
    /// Notes that could not be read and contributed no links.
    pub unreadable: usize,
    /// `[[...]]` tokens seen across all readable notes.
    pub tokens: usize,
    /// Tokens that matched no note.
    pub unresolved: usize,
}

/// Graph plus the counters gathered while building it.
#[derive(Debug, Clone, Default)]
pub struct VaultScan {
    pub graph: NoteGraph,
    pub stats: ScanStats,
}

/// A note discovered on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFile {
    /// Vault-relative, `/`-separated path. Doubles as the node id.
    pub id: String,
    /// Absolute (or root-joined) path used for reading.
    pub path: PathBuf,
}

/// Build the link graph of the vault at `root`.
///
/// A missing root (or a root that is not a directory) yields an empty graph.
pub fn build_graph(root: &Path) -> NoteGraph {
    scan_vault(root).graph
}

/// Like [`build_graph`], also returning scan counters.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn scan_vault(root: &Path) -> VaultScan {
    if !root.exists() {
        info!("vault not found, producing empty graph");
        return VaultScan::default();
    }
    if !root.is_dir() {
        warn!("vault path is not a directory, producing empty graph");
        return VaultScan::default();
    }

    let notes = list_notes(root);
    let resolver = LinkResolver::new(root, notes.iter().map(|n| n.id.clone()).collect());

    let mut acc = GraphAccumulator::default();
    let mut stats = ScanStats {
        documents: notes.len(),
        ..Default::default()
    };

    for note in &notes {
        acc.ensure_node(&note.id);

        let text = match std::fs::read(&note.path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                debug!(note = %note.id, error = %e, "unreadable note, skipping its links");
                stats.unreadable += 1;
                continue;
            }
        };

        for token in extract_links(&text) {
            stats.tokens += 1;
            match resolver.resolve(token, &note.id) {
                Some(target) => acc.link(&note.id, &target),
                None => stats.unresolved += 1,
            }
        }
    }

    let graph = acc.finish();

    info!(
        documents = stats.documents,
        unreadable = stats.unreadable,
        nodes = graph.node_count(),
        links = graph.link_count(),
        unresolved = stats.unresolved,
        "vault scan complete"
    );

    VaultScan { graph, stats }
}

/// Every `*.md` file under `root`, depth-first, sorted by file name within each directory.
///
/// Symlinks to files count as notes; symlinked directories are not descended.
/// Entries that cannot be visited are skipped.
pub fn list_notes(root: &Path) -> Vec<NoteFile> {
    let mut notes = Vec::new();

    for result in WalkDir::new(root).sort_by_file_name() {
        let entry = match result {
            Ok(e) => e,
            Err(err) => {
                debug!(error = %err, "skipping unreadable vault entry");
                continue;
            }
        };

        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }

        let is_note = entry
            .file_name()
            .to_str()
            .map(|name| name.ends_with(NOTE_EXTENSION))
            .unwrap_or(false);
        if !is_note {
            continue;
        }

        if let Some(id) = relative_id(root, entry.path()) {
            notes.push(NoteFile {
                id,
                path: entry.into_path(),
            });
        }
    }

    debug!(count = notes.len(), "notes discovered");
    notes
}

/// `/`-joined path of `path` relative to `root`.
fn relative_id(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    (!parts.is_empty()).then(|| parts.join("/"))
}
