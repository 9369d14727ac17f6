//! Snapshot report assembly: directory tree followed by file contents.

use crate::detect::{is_binary_file, is_spreadsheet_path};
use crate::error::Result;
use crate::snapshot::options::SnapshotOptions;
use crate::snapshot::tree::{render_tree, walk};
use crate::xlsx::XlsxExtractor;
use std::fs;
use std::io::Write;
use std::path::Path;

const RULE_WIDTH: usize = 80;

/// Write a complete snapshot of `root` to `writer`.
///
/// The report starts with the directory tree, then one block per file in
/// walk order: a `File:` header with an `=` rule, the file's content, and a
/// `-` rule. Spreadsheet files go through the extractor, binary files are
/// summarized by size, and a file that fails to read gets a failure line —
/// one bad file never aborts the run.
pub fn write_snapshot(
    root: impl AsRef<Path>,
    writer: &mut impl Write,
    options: &SnapshotOptions,
) -> Result<()> {
    let root = root.as_ref();

    writer.write_all(render_tree(root, options).as_bytes())?;
    writer.write_all(b"\n\n# File Contents\n\n")?;

    for entry in walk(root, options) {
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if options.is_excluded_file(&name) {
            continue;
        }

        let path = entry.path();
        let rel = path.strip_prefix(root).unwrap_or(path);
        let rel = rel.to_string_lossy();

        writeln!(writer, "File: {}", rel)?;
        writeln!(writer, "{}", "=".repeat(RULE_WIDTH))?;

        let body = match file_body(path) {
            Ok(body) => body,
            Err(e) => format!("Failed to read file {}: {}", rel, e),
        };

        writeln!(writer, "{}\n", body)?;
        writeln!(writer, "{}\n", "-".repeat(RULE_WIDTH))?;
    }

    Ok(())
}

/// Build a snapshot of `root` as a string.
pub fn snapshot_to_string(root: impl AsRef<Path>, options: &SnapshotOptions) -> Result<String> {
    let mut buf = Vec::new();
    write_snapshot(root, &mut buf, options)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Produce the content block for one file.
fn file_body(path: &Path) -> Result<String> {
    if is_spreadsheet_path(path) {
        let extractor = XlsxExtractor::open(path)?;
        return Ok(extractor.extract());
    }

    if is_binary_file(path) {
        let size = fs::metadata(path)?.len();
        return Ok(format!("[Binary file, size: {} bytes]", size));
    }

    Ok(fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use zip::write::SimpleFileOptions;

    fn minimal_xlsx() -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("xl/worksheets/sheet1.xml", SimpleFileOptions::default())
            .unwrap();
        writer
            .write_all(
                br#"<worksheet><sheetData><row><c t="inlineStr"><is><t>cell</t></is></c></row></sheetData></worksheet>"#,
            )
            .unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_report_routes_file_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("code.rs"), "fn main() {}\n").unwrap();
        fs::write(root.join("blob.bin"), [0u8, 1, 2, 3]).unwrap();
        fs::write(root.join("book.xlsx"), minimal_xlsx()).unwrap();

        let report = snapshot_to_string(root, &SnapshotOptions::default()).unwrap();

        assert!(report.starts_with("# Project Directory Structure\n"));
        assert!(report.contains("# File Contents\n"));
        assert!(report.contains("File: code.rs"));
        assert!(report.contains("fn main() {}"));
        assert!(report.contains("[Binary file, size: 4 bytes]"));
        assert!(report.contains("--- Sheet: sheet1.xml ---\ncell"));
        assert!(report.contains(&"=".repeat(80)));
        assert!(report.contains(&"-".repeat(80)));
    }

    #[test]
    fn test_bad_spreadsheet_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("broken.xlsx"), "this is not a zip archive").unwrap();
        fs::write(root.join("ok.txt"), "still here").unwrap();

        let report = snapshot_to_string(root, &SnapshotOptions::default()).unwrap();

        assert!(report.contains("Failed to read file broken.xlsx:"));
        assert!(report.contains("still here"));
    }

    #[test]
    fn test_excluded_entries_absent() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join(".git/HEAD"), "ref: refs/heads/main").unwrap();
        fs::write(root.join("files_with_code.txt"), "previous run").unwrap();
        fs::write(root.join("kept.txt"), "kept").unwrap();

        let report = snapshot_to_string(root, &SnapshotOptions::default()).unwrap();

        assert!(!report.contains("HEAD"));
        assert!(!report.contains("previous run"));
        assert!(report.contains("File: kept.txt"));
    }
}
