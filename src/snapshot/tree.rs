//! Directory-tree rendering for the snapshot header.

use crate::snapshot::options::SnapshotOptions;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Walk a directory tree with excluded directories pruned whole.
///
/// Within each directory, files come before subdirectories and both are
/// sorted by name, so every directory's files print directly under its
/// header. Unreadable entries are skipped.
pub(crate) fn walk(root: &Path, options: &SnapshotOptions) -> impl Iterator<Item = DirEntry> {
    let excluded = options.exclude_dirs.clone();
    WalkDir::new(root)
        .sort_by(|a, b| {
            let a_dir = a.file_type().is_dir();
            let b_dir = b.file_type().is_dir();
            a_dir
                .cmp(&b_dir)
                .then_with(|| a.file_name().cmp(b.file_name()))
        })
        .into_iter()
        .filter_entry(move |e| {
            !(e.depth() > 0
                && e.file_type().is_dir()
                && e.file_name()
                    .to_str()
                    .map(|n| excluded.iter().any(|d| d == n))
                    .unwrap_or(false))
        })
        .filter_map(|e| e.ok())
}

/// Render the directory tree block of a snapshot.
///
/// One `📁 name/` line per directory (the root shown as `./`), indented two
/// spaces per depth level, each followed by its `📄 file` lines.
pub fn render_tree(root: impl AsRef<Path>, options: &SnapshotOptions) -> String {
    let root = root.as_ref();
    let mut out = String::from("# Project Directory Structure\n\n");

    for entry in walk(root, options) {
        let indent = "  ".repeat(entry.depth());
        let name = entry.file_name().to_string_lossy();

        if entry.file_type().is_dir() {
            if entry.depth() == 0 {
                out.push_str(&format!("{}📁 ./\n", indent));
            } else {
                out.push_str(&format!("{}📁 {}/\n", indent, name));
            }
        } else if !options.is_excluded_file(&name) {
            out.push_str(&format!("{}📄 {}\n", indent, name));
        }
    }

    out
}
