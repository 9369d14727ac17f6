//! ZIP container abstraction for OOXML spreadsheets.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

/// Read-only view of a zip-based spreadsheet container.
///
/// Part names are case-sensitive forward-slash paths and lookups are
/// exact-match. The whole archive is held in memory and every read returns
/// the complete part; the source files are expected to be modest in size.
pub struct SheetContainer {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl SheetContainer {
    /// Open a container from a file path.
    ///
    /// Fails with [`Error::Io`] if the file cannot be read and
    /// [`Error::Container`] if it is not a valid ZIP archive.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Create a container from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let cursor = Cursor::new(data);
        let archive = zip::ZipArchive::new(cursor)?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Read a part as raw bytes.
    pub fn read_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(path)
            .map_err(|_| Error::PartNotFound(path.to_string()))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Read an XML part as a string.
    ///
    /// Handles UTF-8 (with or without BOM) and UTF-16 LE/BE encodings.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        let bytes = self.read_bytes(path)?;
        decode_xml_bytes(&bytes)
    }

    /// Check whether a part exists.
    pub fn exists(&self, path: &str) -> bool {
        let archive = self.archive.borrow();
        let found = archive.file_names().any(|n| n == path);
        found
    }

    /// List all part names in the container.
    pub fn part_names(&self) -> Vec<String> {
        let archive = self.archive.borrow();
        archive.file_names().map(String::from).collect()
    }
}

impl std::fmt::Debug for SheetContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetContainer")
            .field("parts", &self.part_names().len())
            .finish()
    }
}

/// Decode an XML part to a string.
///
/// Parts are almost always UTF-8; UTF-16 shows up from non-standard
/// producers and is recognized by BOM, or for BOM-less input by the
/// null-byte pattern ASCII markup leaves in UTF-16. Anything else falls
/// back to lossy UTF-8.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => {
            String::from_utf8(rest.to_vec()).map_err(|e| Error::Format(e.to_string()))
        }
        [0xFF, 0xFE, rest @ ..] => {
            let content = decode_utf16(rest, u16::from_le_bytes)?;
            Ok(fix_xml_encoding_declaration(&content))
        }
        [0xFE, 0xFF, rest @ ..] => {
            let content = decode_utf16(rest, u16::from_be_bytes)?;
            Ok(fix_xml_encoding_declaration(&content))
        }
        _ => match String::from_utf8(bytes.to_vec()) {
            Ok(s) => Ok(s),
            Err(_) if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 => {
                decode_utf16(bytes, u16::from_le_bytes)
            }
            Err(_) if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 => {
                decode_utf16(bytes, u16::from_be_bytes)
            }
            Err(_) => Ok(String::from_utf8_lossy(bytes).into_owned()),
        },
    }
}

/// Rewrite the XML declaration after transcoding UTF-16 input to UTF-8.
///
/// quick-xml would otherwise try to honor the stale encoding="UTF-16"
/// declaration on an already-decoded string.
fn fix_xml_encoding_declaration(content: &str) -> String {
    if content.starts_with("<?xml") {
        if let Some(end_decl) = content.find("?>") {
            let decl = &content[..end_decl + 2];
            let rest = &content[end_decl + 2..];

            let fixed_decl = decl
                .replace("encoding=\"UTF-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='UTF-16'", "encoding='UTF-8'")
                .replace("encoding=\"utf-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='utf-16'", "encoding='UTF-8'");

            return format!("{}{}", fixed_decl, rest);
        }
    }
    content.to_string()
}

/// Decode UTF-16 code units read with `read` (LE or BE byte order).
/// A trailing odd byte is ignored.
fn decode_utf16(bytes: &[u8], read: fn([u8; 2]) -> u16) -> Result<String> {
    let len = bytes.len() & !1;

    let units = (0..len)
        .step_by(2)
        .map(|i| read([bytes[i], bytes[i + 1]]));

    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::Format(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn zip_with_parts(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in parts {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_open_and_read_parts() {
        let data = zip_with_parts(&[
            ("xl/workbook.xml", "<workbook/>"),
            ("xl/worksheets/sheet1.xml", "<worksheet/>"),
        ]);
        let container = SheetContainer::from_bytes(data).unwrap();

        assert!(container.exists("xl/workbook.xml"));
        assert!(!container.exists("xl/Workbook.xml")); // case-sensitive
        assert_eq!(container.part_names().len(), 2);
        assert_eq!(container.read_xml("xl/workbook.xml").unwrap(), "<workbook/>");
    }

    #[test]
    fn test_missing_part() {
        let data = zip_with_parts(&[("a.xml", "<a/>")]);
        let container = SheetContainer::from_bytes(data).unwrap();
        let err = container.read_bytes("b.xml").unwrap_err();
        assert!(matches!(err, Error::PartNotFound(p) if p == "b.xml"));
    }

    #[test]
    fn test_not_an_archive() {
        let err = SheetContainer::from_bytes(b"definitely not a zip".to_vec()).unwrap_err();
        assert!(matches!(err, Error::Container(_)));
    }

    #[test]
    fn test_decode_xml_bytes() {
        // UTF-16 LE with BOM
        let utf16_le = b"\xFF\xFE<\0?\0x\0m\0l\0>\0";
        assert_eq!(decode_xml_bytes(utf16_le).unwrap(), "<?xml>");

        // UTF-16 BE with BOM
        let utf16_be = b"\xFE\xFF\0<\0?\0x\0m\0l\0>";
        assert_eq!(decode_xml_bytes(utf16_be).unwrap(), "<?xml>");

        // UTF-8 BOM
        let utf8_bom = b"\xEF\xBB\xBF<?xml>";
        assert_eq!(decode_xml_bytes(utf8_bom).unwrap(), "<?xml>");

        // Plain UTF-8
        assert_eq!(decode_xml_bytes(b"<?xml>").unwrap(), "<?xml>");
    }

    #[test]
    fn test_fix_encoding_declaration() {
        let fixed = fix_xml_encoding_declaration("<?xml version=\"1.0\" encoding=\"UTF-16\"?><a/>");
        assert_eq!(fixed, "<?xml version=\"1.0\" encoding=\"UTF-8\"?><a/>");
    }
}
