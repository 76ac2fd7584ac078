//! Note vault link graph.
//!
//! Scans a folder of markdown notes for `[[wikilinks]]`, resolves each link to
//! a note (same folder first, then anywhere in the vault) and produces the
//! node/link graph consumed by the site's force-layout viewer.
//!
//! - [`links`] — `[[...]]` token extraction
//! - [`resolver`] — token → note resolution
//! - [`builder`] — vault walk and graph assembly

pub mod builder;
pub mod links;
pub mod model;
pub mod resolver;

pub use builder::{NoteFile, ScanStats, VaultScan, build_graph, list_notes, scan_vault};
pub use links::extract_links;
pub use model::{GraphLink, GraphNode, NOTE_GROUP, NoteGraph};
pub use resolver::{LinkResolver, NOTE_EXTENSION, candidate_file_name};
