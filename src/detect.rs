//! File routing: spreadsheet extensions, ZIP magic, binary sniffing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Extensions routed to the spreadsheet extractor.
pub const SPREADSHEET_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xltx", "xltm"];

/// Number of leading bytes sampled when sniffing for binary content.
const BINARY_SAMPLE_SIZE: usize = 1024;

/// Check whether a path carries one of the OOXML spreadsheet extensions.
pub fn is_spreadsheet_path(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            SPREADSHEET_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// Check if data starts with ZIP magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}

/// Heuristic binary check: a NUL byte within the first 1024 bytes.
///
/// Files that cannot be opened or read count as binary, so the snapshot
/// summarizes them instead of trying to embed their contents.
pub fn is_binary_file(path: impl AsRef<Path>) -> bool {
    let mut file = match File::open(path.as_ref()) {
        Ok(f) => f,
        Err(_) => return true,
    };

    let mut sample = [0u8; BINARY_SAMPLE_SIZE];
    let n = match file.read(&mut sample) {
        Ok(n) => n,
        Err(_) => return true,
    };

    sample[..n].contains(&0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_spreadsheet_extensions() {
        assert!(is_spreadsheet_path("report.xlsx"));
        assert!(is_spreadsheet_path("macros.xlsm"));
        assert!(is_spreadsheet_path("template.XLTX"));
        assert!(!is_spreadsheet_path("legacy.xls"));
        assert!(!is_spreadsheet_path("notes.txt"));
        assert!(!is_spreadsheet_path("no_extension"));
    }

    #[test]
    fn test_is_zip_file() {
        assert!(is_zip_file(&[0x50, 0x4B, 0x03, 0x04, 0x00]));
        assert!(!is_zip_file(&[0x00, 0x00, 0x00, 0x00]));
        assert!(!is_zip_file(&[0x50, 0x4B])); // too short
    }

    #[test]
    fn test_binary_sniffing() {
        let dir = tempfile::tempdir().unwrap();

        let text_path = dir.path().join("plain.txt");
        std::fs::write(&text_path, "fn main() {}\n").unwrap();
        assert!(!is_binary_file(&text_path));

        let bin_path = dir.path().join("blob.bin");
        let mut f = File::create(&bin_path).unwrap();
        f.write_all(&[0x7F, b'E', b'L', b'F', 0x00, 0x01]).unwrap();
        assert!(is_binary_file(&bin_path));

        // Unreadable path is treated as binary
        assert!(is_binary_file(dir.path().join("missing")));
    }
}
