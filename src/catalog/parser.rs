//! Streaming reader for MAME `-listxml` style catalogs.
//!
//! Only `machine` (or legacy `game`) elements are inspected; their `name`
//! and optional `cloneof` attributes become `MachineRecord`s. Everything else
//! in the document, including the DTD and nested child elements, is skipped.
use super::{CatalogError, MachineRecord};
use log::info;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parse a catalog file from disk.
pub fn load_catalog(path: &Path) -> Result<Vec<MachineRecord>, CatalogError> {
    let file = File::open(path).map_err(|source| CatalogError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_catalog(BufReader::new(file))?;
    info!(
        "Parsed {} machines from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

pub fn parse_catalog_str(xml: &str) -> Result<Vec<MachineRecord>, CatalogError> {
    parse_catalog(xml.as_bytes())
}

/// Parse a catalog from any buffered reader.
///
/// The whole document must be well formed: a missing root, an unclosed
/// element at end of input or a catalog without any machine is an error, so
/// a cut-off file never yields a partial listing.
pub fn parse_catalog<R: BufRead>(input: R) -> Result<Vec<MachineRecord>, CatalogError> {
    let mut reader = Reader::from_reader(input);
    let mut buf = Vec::new();
    let mut records = Vec::new();
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let position = reader.buffer_position();
        match reader.read_event_into(&mut buf) {
            Err(source) => return Err(CatalogError::Xml { position, source }),
            Ok(Event::Start(ref e)) => {
                seen_root = true;
                depth += 1;
                if is_machine(e) {
                    records.push(machine_record(e, position)?);
                }
            }
            Ok(Event::Empty(ref e)) => {
                seen_root = true;
                if is_machine(e) {
                    records.push(machine_record(e, position)?);
                }
            }
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Eof) => break,
            Ok(_) => {}
        }
        buf.clear();
    }

    let position = reader.buffer_position();
    if !seen_root {
        return Err(CatalogError::NoRoot);
    }
    if depth > 0 {
        return Err(CatalogError::Truncated { position, depth });
    }
    if records.is_empty() {
        return Err(CatalogError::NoMachines);
    }
    Ok(records)
}

fn is_machine(e: &BytesStart<'_>) -> bool {
    matches!(e.local_name().as_ref(), b"machine" | b"game")
}

fn machine_record(e: &BytesStart<'_>, position: usize) -> Result<MachineRecord, CatalogError> {
    let mut name = None;
    let mut parent = None;
    for attr in e.attributes() {
        let attr = attr.map_err(|err| CatalogError::Xml {
            position,
            source: err.into(),
        })?;
        let value = || {
            attr.unescape_value()
                .map(|v| v.into_owned())
                .map_err(|source| CatalogError::Xml { position, source })
        };
        match attr.key.as_ref() {
            b"name" => name = Some(value()?),
            b"cloneof" => parent = Some(value()?),
            _ => {}
        }
    }
    let name = name
        .filter(|n| !n.is_empty())
        .ok_or(CatalogError::MissingName { position })?;
    Ok(MachineRecord::new(name, parent))
}
