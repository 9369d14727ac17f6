//! Workbook manifest parsing and sheet-order resolution.
//!
//! Physical worksheet part names are arbitrary; the user-visible tab order
//! and display names live in `xl/workbook.xml`, which refers to parts
//! indirectly through relationship ids resolved in
//! `xl/_rels/workbook.xml.rels`. This module recovers that order, falling
//! back to a lexicographic sort of the raw worksheet parts when the
//! manifest is absent or unusable.

use crate::container::SheetContainer;
use std::collections::HashMap;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const WORKSHEET_PART_PREFIX: &str = "xl/worksheets/sheet";

/// A `<sheet>` entry from the workbook manifest, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetDecl {
    /// Display name shown on the sheet tab.
    pub name: String,
    /// Relationship id (e.g. "rId1") pointing at the worksheet part.
    pub rel_id: String,
}

/// A sheet declaration joined to its physical part path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSheet {
    /// Display name for the sheet header.
    pub name: String,
    /// Container part path holding the sheet data.
    pub part: String,
}

/// Resolve the ordered list of sheets for a container.
///
/// Declarations that fail to resolve (unknown relationship id, missing
/// target part) are dropped silently. If nothing resolves — no manifest,
/// manifest unusable, or every reference dangling — the fallback takes
/// every part matching the worksheet naming convention in lexicographic
/// path order, with the bare file name as display name.
pub fn resolve_sheets(container: &SheetContainer) -> Vec<ResolvedSheet> {
    let decls = match container.read_xml(WORKBOOK_PART) {
        Ok(xml) => parse_declarations(&xml),
        Err(_) => Vec::new(),
    };

    let rel_map = match container.read_xml(WORKBOOK_RELS_PART) {
        Ok(xml) => parse_relationships(&xml),
        Err(_) => HashMap::new(),
    };

    let mut resolved = Vec::new();
    for decl in decls {
        if let Some(part) = rel_map.get(&decl.rel_id) {
            if container.exists(part) {
                resolved.push(ResolvedSheet {
                    name: decl.name,
                    part: part.clone(),
                });
            }
        }
    }

    if resolved.is_empty() {
        return fallback_sheets(&container.part_names());
    }
    resolved
}

/// Parse `<sheet>` declarations from workbook.xml in document order.
///
/// A duplicate relationship id keeps the position of its first occurrence
/// but takes the last-seen name (dictionary-merge semantics). A partial
/// parse of malformed XML keeps whatever was collected before the error.
pub(crate) fn parse_declarations(xml: &str) -> Vec<SheetDecl> {
    let mut decls: Vec<SheetDecl> = Vec::new();
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Empty(e)) | Ok(quick_xml::events::Event::Start(e))
                if e.name().as_ref() == b"sheet" =>
            {
                let mut name = String::new();
                let mut rel_id = String::new();

                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"name" => name = String::from_utf8_lossy(&attr.value).to_string(),
                        b"r:id" => rel_id = String::from_utf8_lossy(&attr.value).to_string(),
                        _ => {}
                    }
                }

                if rel_id.is_empty() {
                    continue;
                }
                if name.is_empty() {
                    name = rel_id.clone();
                }

                match decls.iter().position(|d| d.rel_id == rel_id) {
                    Some(pos) => decls[pos].name = name,
                    None => decls.push(SheetDecl { name, rel_id }),
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    decls
}

/// Parse the workbook relationships part into an id -> part-path map.
///
/// Targets are rooted under the manifest's base directory (`xl/`). A
/// duplicate id overwrites the earlier entry (last wins).
pub(crate) fn parse_relationships(xml: &str) -> HashMap<String, String> {
    let mut rels = HashMap::new();
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Empty(e)) | Ok(quick_xml::events::Event::Start(e))
                if e.name().as_ref() == b"Relationship" =>
            {
                let mut id = String::new();
                let mut target = String::new();

                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Id" => id = String::from_utf8_lossy(&attr.value).to_string(),
                        b"Target" => target = String::from_utf8_lossy(&attr.value).to_string(),
                        _ => {}
                    }
                }

                if !id.is_empty() && !target.is_empty() {
                    let part = format!("xl/{}", target.trim_start_matches('/'));
                    rels.insert(id, part);
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    rels
}

/// Synthesize sheets from raw worksheet parts when the manifest is unusable.
///
/// Plain string ordering of the full part path: `sheet10.xml` sorts before
/// `sheet2.xml`. Tab order and real names are lost in this degraded mode.
pub(crate) fn fallback_sheets(part_names: &[String]) -> Vec<ResolvedSheet> {
    let mut parts: Vec<&String> = part_names
        .iter()
        .filter(|n| n.starts_with(WORKSHEET_PART_PREFIX) && n.ends_with(".xml"))
        .collect();
    parts.sort();

    parts
        .into_iter()
        .map(|part| {
            let name = part.rsplit('/').next().unwrap_or(part).to_string();
            ResolvedSheet {
                name,
                part: part.clone(),
            }
        })
        .collect()
}
