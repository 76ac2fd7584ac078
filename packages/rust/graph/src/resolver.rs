//! Link target resolution.
//!
//! A token is turned into a candidate file name and looked up first next to
//! the linking note, then anywhere in the vault. Resolved targets are
//! vault-relative, `/`-separated paths.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use tracing::trace;

/// Extension every note (and every resolved target) carries.
pub const NOTE_EXTENSION: &str = ".md";

/// Append `.md` unless the token already ends with it.
pub fn candidate_file_name(token: &str) -> Cow<'_, str> {
    if token.ends_with(NOTE_EXTENSION) {
        Cow::Borrowed(token)
    } else {
        Cow::Owned(format!("{token}{NOTE_EXTENSION}"))
    }
}

/// Resolves link tokens against a scanned vault.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    root: PathBuf,
    /// Vault-relative ids of every note, in traversal order.
    documents: Vec<String>,
}

impl LinkResolver {
    /// `documents` must be in the traversal order used for tie-breaking.
    pub fn new(root: impl Into<PathBuf>, documents: Vec<String>) -> Self {
        Self {
            root: root.into(),
            documents,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// Resolve `token` as written inside the note `current` (a vault-relative id).
    ///
    /// Returns `None` when neither a sibling file nor any vault file matches.
    pub fn resolve(&self, token: &str, current: &str) -> Option<String> {
        let candidate = candidate_file_name(token);

        if let Some(id) = self.resolve_sibling(&candidate, current) {
            trace!(token, current, target = %id, "resolved as sibling");
            return Some(id);
        }

        let found = self.find_in_vault(&candidate);
        match &found {
            Some(id) => trace!(token, current, target = %id, "resolved by vault search"),
            None => trace!(token, current, "unresolved link"),
        }
        found
    }

    /// Look for `candidate` relative to the folder containing `current`.
    fn resolve_sibling(&self, candidate: &str, current: &str) -> Option<String> {
        let mut base: Vec<&str> = current.split('/').collect();
        base.pop();

        let segments = normalize(base, candidate)?;
        let id = segments.join("/");

        self.root.join(&id).is_file().then_some(id)
    }

    /// First note, in traversal order, whose trailing path segments equal the candidate's.
    fn find_in_vault(&self, candidate: &str) -> Option<String> {
        let wanted: Vec<&str> = candidate
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();

        if wanted.is_empty() || wanted.contains(&"..") {
            return None;
        }

        self.documents
            .iter()
            .find(|doc| ends_with_segments(doc, &wanted))
            .cloned()
    }
}

/// Lexically apply `relative` to `base`. `None` if the result leaves the vault or is empty.
fn normalize<'a>(mut base: Vec<&'a str>, relative: &'a str) -> Option<Vec<&'a str>> {
    for part in relative.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                base.pop()?;
            }
            other => base.push(other),
        }
    }
    (!base.is_empty()).then_some(base)
}

fn ends_with_segments(id: &str, wanted: &[&str]) -> bool {
    let segments: Vec<&str> = id.split('/').collect();
    segments.len() >= wanted.len() && segments[segments.len() - wanted.len()..] == *wanted
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn vault(files: &[&str]) -> (TempDir, LinkResolver) {
        let dir = tempfile::tempdir().expect("tempdir");
        for rel in files {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "").unwrap();
        }
        let docs = files.iter().map(|s| s.to_string()).collect();
        let resolver = LinkResolver::new(dir.path(), docs);
        (dir, resolver)
    }

    #[test]
    fn candidate_appends_extension_once() {
        assert_eq!(candidate_file_name("Gait"), "Gait.md");
        assert_eq!(candidate_file_name("Gait.md"), "Gait.md");
        assert_eq!(candidate_file_name("notes.txt"), "notes.txt.md");
    }

    #[test]
    fn sibling_takes_precedence() {
        let (_dir, resolver) = vault(&["a/x.md", "a/y.md", "b/y.md"]);
        assert_eq!(resolver.resolve("y", "a/x.md").as_deref(), Some("a/y.md"));
    }

    #[test]
    fn falls_back_to_first_vault_match() {
        let (_dir, resolver) = vault(&["a/x.md", "b/y.md", "c/y.md"]);
        assert_eq!(resolver.resolve("y", "a/x.md").as_deref(), Some("b/y.md"));
    }

    #[test]
    fn root_level_notes_resolve() {
        let (_dir, resolver) = vault(&["A.md", "B.md"]);
        assert_eq!(resolver.resolve("B", "A.md").as_deref(), Some("B.md"));
        assert_eq!(resolver.resolve("B.md", "A.md").as_deref(), Some("B.md"));
    }

    #[test]
    fn unresolved_returns_none() {
        let (_dir, resolver) = vault(&["A.md"]);
        assert!(resolver.resolve("Missing", "A.md").is_none());
    }

    #[test]
    fn path_tokens_resolve_relative_then_by_suffix() {
        let (_dir, resolver) = vault(&["a/x.md", "a/sub/z.md", "deep/sub/z.md"]);
        // Relative to a/
        assert_eq!(resolver.resolve("sub/z", "a/x.md").as_deref(), Some("a/sub/z.md"));
        // From the root there is no ./sub/z.md, so the suffix search picks the first hit.
        let (_dir2, resolver2) = vault(&["top.md", "deep/sub/z.md"]);
        assert_eq!(resolver2.resolve("sub/z", "top.md").as_deref(), Some("deep/sub/z.md"));
    }

    #[test]
    fn parent_segments_are_normalized() {
        let (_dir, resolver) = vault(&["a/x.md", "b/y.md"]);
        assert_eq!(resolver.resolve("../b/y", "a/x.md").as_deref(), Some("b/y.md"));
    }

    #[test]
    fn escaping_the_vault_is_not_a_sibling() {
        let (_dir, resolver) = vault(&["x.md"]);
        assert!(resolver.resolve("../outside", "x.md").is_none());
    }

    #[test]
    fn directories_do_not_count_as_sibling_files() {
        let (dir, resolver) = vault(&["a/x.md"]);
        fs::create_dir_all(dir.path().join("a/folder.md")).unwrap();
        assert!(resolver.resolve("folder", "a/x.md").is_none());
    }

    #[test]
    fn suffix_match_respects_segment_boundaries() {
        assert!(ends_with_segments("a/b/c.md", &["b", "c.md"]));
        assert!(!ends_with_segments("a/xb/c.md", &["b", "c.md"]));
        assert!(!ends_with_segments("c.md", &["b", "c.md"]));
    }
}
