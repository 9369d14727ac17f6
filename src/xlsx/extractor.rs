//! Worksheet row/cell extraction and text rendering.

use crate::container::SheetContainer;
use crate::error::Result;
use crate::xlsx::shared_strings::SharedStrings;
use crate::xlsx::workbook::{self, ResolvedSheet};
use std::path::Path;

const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// Placeholder emitted for a sheet that produced no non-empty rows, so the
/// output distinguishes "sheet present but blank" from "sheet absent".
pub const EMPTY_SHEET_PLACEHOLDER: &str = "[Sheet is empty]";

/// Extracts a plain-text rendering from an OOXML spreadsheet container.
///
/// Everything is built fresh per instance and nothing is cached across
/// calls: the output is purely a function of the input bytes, so repeated
/// extraction of an unmodified file is byte-for-byte identical.
pub struct XlsxExtractor {
    container: SheetContainer,
    shared: SharedStrings,
    sheets: Vec<ResolvedSheet>,
}

impl XlsxExtractor {
    /// Open a spreadsheet file for extraction.
    ///
    /// Only container-level failures (unreadable file, not a ZIP archive)
    /// propagate; a missing or corrupt shared-strings part degrades to an
    /// empty table and an unusable workbook manifest falls back to
    /// filename-ordered sheets.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let container = SheetContainer::open(path)?;
        Self::from_container(container)
    }

    /// Create an extractor from in-memory container bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let container = SheetContainer::from_bytes(data)?;
        Self::from_container(container)
    }

    fn from_container(container: SheetContainer) -> Result<Self> {
        let shared = match container.read_xml(SHARED_STRINGS_PART) {
            Ok(xml) => SharedStrings::parse(&xml).unwrap_or_default(),
            Err(_) => SharedStrings::default(),
        };

        let sheets = workbook::resolve_sheets(&container);

        Ok(Self {
            container,
            shared,
            sheets,
        })
    }

    /// Resolved sheet display names, in output order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Render every sheet's non-empty rows as tab-separated text.
    ///
    /// Each sheet block is a `--- Sheet: name ---` header followed by one
    /// tab-joined line per row that has at least one non-empty cell, or the
    /// empty-sheet placeholder, then a blank separator line. The whole
    /// result is trimmed of leading and trailing whitespace.
    pub fn extract(&self) -> String {
        let mut lines: Vec<String> = Vec::new();

        for sheet in &self.sheets {
            lines.push(format!("--- Sheet: {} ---", sheet.name));

            let rows = match self.container.read_xml(&sheet.part) {
                Ok(xml) => self.parse_rows(&xml),
                Err(_) => Vec::new(),
            };

            let mut emitted = 0usize;
            for row in rows {
                // Empty fields within a row are preserved; only rows where
                // every cell is empty are dropped.
                if row.iter().any(|value| !value.is_empty()) {
                    lines.push(row.join("\t"));
                    emitted += 1;
                }
            }

            if emitted == 0 {
                lines.push(EMPTY_SHEET_PLACEHOLDER.to_string());
            }
            lines.push(String::new());
        }

        lines.join("\n").trim().to_string()
    }

    /// Parse a worksheet part into rows of resolved cell strings.
    ///
    /// Rows and cells are taken in document order; column-index attributes
    /// are ignored and gaps from skipped columns are not reconstructed. A
    /// parse error mid-document keeps the rows collected so far.
    fn parse_rows(&self, xml: &str) -> Vec<Vec<String>> {
        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut current_row: Option<Vec<String>> = None;
        let mut in_cell = false;
        let mut in_value = false;
        let mut in_inline = false;
        let mut in_inline_text = false;
        let mut cell_type: Option<String> = None;
        let mut raw_value: Option<String> = None;
        let mut inline_text = String::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Start(ref e)) => match e.name().as_ref() {
                    b"row" => {
                        current_row = Some(Vec::new());
                    }
                    b"c" if current_row.is_some() => {
                        in_cell = true;
                        cell_type = None;
                        raw_value = None;
                        inline_text.clear();

                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"t" {
                                cell_type =
                                    Some(String::from_utf8_lossy(&attr.value).to_string());
                            }
                        }
                    }
                    b"v" if in_cell => {
                        in_value = true;
                        raw_value.get_or_insert_with(String::new);
                    }
                    b"is" if in_cell => {
                        in_inline = true;
                    }
                    b"t" if in_inline => {
                        in_inline_text = true;
                    }
                    _ => {}
                },
                Ok(quick_xml::events::Event::Empty(ref e)) => match e.name().as_ref() {
                    b"row" => {
                        rows.push(Vec::new());
                    }
                    b"c" if current_row.is_some() => {
                        // Valueless cell, resolves to the empty string
                        if let Some(ref mut row) = current_row {
                            row.push(String::new());
                        }
                    }
                    b"v" if in_cell => {
                        raw_value.get_or_insert_with(String::new);
                    }
                    _ => {}
                },
                Ok(quick_xml::events::Event::Text(ref e)) => {
                    let text = e.unescape().unwrap_or_default();
                    if in_value {
                        if let Some(ref mut v) = raw_value {
                            v.push_str(&text);
                        }
                    } else if in_inline_text {
                        inline_text.push_str(&text);
                    }
                }
                Ok(quick_xml::events::Event::End(ref e)) => match e.name().as_ref() {
                    b"row" => {
                        if let Some(row) = current_row.take() {
                            rows.push(row);
                        }
                    }
                    b"c" => {
                        let value = self.resolve_cell(
                            cell_type.as_deref(),
                            raw_value.as_deref(),
                            &inline_text,
                        );
                        if let Some(ref mut row) = current_row {
                            row.push(value);
                        }
                        in_cell = false;
                    }
                    b"v" => {
                        in_value = false;
                    }
                    b"is" => {
                        in_inline = false;
                    }
                    b"t" => {
                        in_inline_text = false;
                    }
                    _ => {}
                },
                Ok(quick_xml::events::Event::Eof) => break,
                Err(_) => break,
                _ => {}
            }
            buf.clear();
        }

        rows
    }

    /// Resolve one cell to its display string.
    ///
    /// Shared-string cells look up the index, out of range or unparsable
    /// resolving to empty; inline-string cells are their concatenated text
    /// runs; cells with a literal value pass it through verbatim; anything
    /// else is empty.
    fn resolve_cell(
        &self,
        cell_type: Option<&str>,
        raw_value: Option<&str>,
        inline_text: &str,
    ) -> String {
        match cell_type {
            Some("s") => raw_value
                .and_then(|v| v.parse::<usize>().ok())
                .and_then(|idx| self.shared.get(idx))
                .unwrap_or("")
                .to_string(),
            Some("inlineStr") => inline_text.to_string(),
            _ => raw_value.unwrap_or("").to_string(),
        }
    }
}

impl std::fmt::Debug for XlsxExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XlsxExtractor")
            .field("sheets", &self.sheets.len())
            .field("shared_strings", &self.shared.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    fn build_container(parts: &[(&str, &str)]) -> Vec<u8> {
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
    fn test_shared_and_inline_and_literal_cells() {
        let data = build_container(&[
            (
                "xl/sharedStrings.xml",
                r#"<sst><si><t>Alpha</t></si><si><t>Beta</t></si></sst>"#,
            ),
            (
                "xl/worksheets/sheet1.xml",
                r#"<worksheet><sheetData>
                    <row r="1">
                        <c r="A1" t="s"><v>1</v></c>
                        <c r="B1" t="s"><v>5</v></c>
                        <c r="C1" t="inlineStr"><is><r><t>in</t></r><r><t>line</t></r></is></c>
                        <c r="D1"><v>42.5</v></c>
                    </row>
                </sheetData></worksheet>"#,
            ),
        ]);

        let extractor = XlsxExtractor::from_bytes(data).unwrap();
        let text = extractor.extract();
        assert_eq!(text, "--- Sheet: sheet1.xml ---\nBeta\t\tinline\t42.5");
    }

    #[test]
    fn test_empty_fields_preserved_in_row() {
        let data = build_container(&[(
            "xl/worksheets/sheet1.xml",
            r#"<worksheet><sheetData>
                <row><c/><c t="inlineStr"><is><t>X</t></is></c><c/></row>
                <row><c t="inlineStr"><is><t>end</t></is></c></row>
            </sheetData></worksheet>"#,
        )]);

        let extractor = XlsxExtractor::from_bytes(data).unwrap();
        let text = extractor.extract();
        // Empty cells survive as empty tab-separated fields
        assert_eq!(text, "--- Sheet: sheet1.xml ---\n\tX\t\nend");
    }

    #[test]
    fn test_final_trim_eats_trailing_tab_on_last_line() {
        let data = build_container(&[(
            "xl/worksheets/sheet1.xml",
            r#"<worksheet><sheetData>
                <row><c/><c t="inlineStr"><is><t>X</t></is></c><c/></row>
            </sheetData></worksheet>"#,
        )]);

        let extractor = XlsxExtractor::from_bytes(data).unwrap();
        let text = extractor.extract();
        // When the padded row is the last line, the overall trim removes
        // the trailing tab
        assert_eq!(text, "--- Sheet: sheet1.xml ---\n\tX");
    }

    #[test]
    fn test_self_closing_shared_item_keeps_indices_aligned() {
        let data = build_container(&[
            ("xl/sharedStrings.xml", "<sst><si/><si><t>X</t></si></sst>"),
            (
                "xl/worksheets/sheet1.xml",
                r#"<worksheet><sheetData>
                    <row><c t="s"><v>1</v></c></row>
                </sheetData></worksheet>"#,
            ),
        ]);

        let extractor = XlsxExtractor::from_bytes(data).unwrap();
        assert_eq!(extractor.extract(), "--- Sheet: sheet1.xml ---\nX");
    }

    #[test]
    fn test_all_empty_rows_become_placeholder() {
        let data = build_container(&[(
            "xl/worksheets/sheet1.xml",
            r#"<worksheet><sheetData>
                <row><c/><c/><c/></row>
                <row/>
            </sheetData></worksheet>"#,
        )]);

        let extractor = XlsxExtractor::from_bytes(data).unwrap();
        let text = extractor.extract();
        assert_eq!(text, "--- Sheet: sheet1.xml ---\n[Sheet is empty]");
    }

    #[test]
    fn test_rows_kept_in_document_order() {
        let data = build_container(&[(
            "xl/worksheets/sheet1.xml",
            // Row indices deliberately out of order: document order wins
            r#"<worksheet><sheetData>
                <row r="2"><c><v>second</v></c></row>
                <row r="1"><c><v>first</v></c></row>
            </sheetData></worksheet>"#,
        )]);

        let extractor = XlsxExtractor::from_bytes(data).unwrap();
        let text = extractor.extract();
        assert_eq!(
            text,
            "--- Sheet: sheet1.xml ---\nsecond\nfirst"
        );
    }

    #[test]
    fn test_corrupt_shared_strings_degrades() {
        let data = build_container(&[
            ("xl/sharedStrings.xml", "<sst><si><t>broken"),
            (
                "xl/worksheets/sheet1.xml",
                r#"<worksheet><sheetData>
                    <row><c t="s"><v>0</v></c><c><v>7</v></c></row>
                </sheetData></worksheet>"#,
            ),
        ]);

        let extractor = XlsxExtractor::from_bytes(data).unwrap();
        let text = extractor.extract();
        // Shared-string reference resolves to empty, literal survives
        assert_eq!(text, "--- Sheet: sheet1.xml ---\n\t7");
    }

    #[test]
    fn test_malformed_sheet_keeps_parsed_rows() {
        let data = build_container(&[(
            "xl/worksheets/sheet1.xml",
            r#"<worksheet><sheetData><row><c><v>kept</v></c></row><row><c><v>lost"#,
        )]);

        let extractor = XlsxExtractor::from_bytes(data).unwrap();
        let text = extractor.extract();
        assert!(text.contains("kept"));
    }
}
