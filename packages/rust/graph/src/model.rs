//! Node/link graph in the shape the D3 viewer consumes (`graph.json`).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use vaultsite_shared::{Result, VaultSiteError};

/// Group label given to every note node.
pub const NOTE_GROUP: &str = "note";

/// A graph node: a note identified by its vault-relative path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub group: String,
}

/// A directed reference from `source` to `target` (both node ids).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

/// The link graph of a vault.
///
/// Serializes as `{"nodes": [{"id", "group"}], "links": [{"source", "target"}]}`.
/// Node order is first-seen order and carries no meaning; link order is
/// discovery order. Links are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl NoteGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Compact JSON with non-ASCII text written verbatim.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            VaultSiteError::validation(format!("graph serialization failed: {e}"))
        })
    }
}

/// Accumulates nodes (deduplicated by id) and links (kept as-is).
#[derive(Debug, Default)]
pub(crate) struct GraphAccumulator {
    seen: HashSet<String>,
    graph: NoteGraph,
}

impl GraphAccumulator {
    /// Register a node unless one with the same id already exists.
    pub(crate) fn ensure_node(&mut self, id: &str) {
        if self.seen.insert(id.to_string()) {
            self.graph.nodes.push(GraphNode {
                id: id.to_string(),
                group: NOTE_GROUP.to_string(),
            });
        }
    }

    /// Record `source -> target`, registering the target first.
    pub(crate) fn link(&mut self, source: &str, target: &str) {
        self.ensure_node(target);
        self.graph.links.push(GraphLink {
            source: source.to_string(),
            target: target.to_string(),
        });
    }

    pub(crate) fn finish(self) -> NoteGraph {
        self.graph
    }
}
