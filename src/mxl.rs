//! MXL file handler — reads compressed MusicXML (.mxl) archives.
//!
//! An .mxl file is a ZIP archive containing:
//!   - META-INF/container.xml  — declares the root MusicXML file path
//!   - <rootfile>.xml          — the actual MusicXML content
//!   - (optional) other files  — images, sounds, etc.

use std::io::{Cursor, Read};
use zip::ZipArchive;

use crate::error::{KunkunError, Result};
use crate::model::NoteEvent;
use crate::parser::{self, ImportOptions};

/// Read the melody of an .mxl archive.
pub fn parse_mxl_melody(data: &[u8], options: &ImportOptions) -> Result<Vec<NoteEvent>> {
    let xml = extract_musicxml_from_mxl(data)?;
    parser::parse_musicxml_melody(&xml, options)
}

/// Extract the root MusicXML document from .mxl bytes.
pub fn extract_musicxml_from_mxl(data: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(data))
        .map_err(|e| KunkunError::archive("opening MXL archive", e))?;

    let root_file_path = find_root_file(&mut archive)?;

    let mut root_file = archive
        .by_name(&root_file_path)
        .map_err(|e| KunkunError::archive(format!("locating '{root_file_path}'"), e))?;
    let mut xml = String::new();
    root_file
        .read_to_string(&mut xml)
        .map_err(|e| KunkunError::io(format!("reading '{root_file_path}'"), e))?;

    Ok(xml)
}

/// Root file path from META-INF/container.xml, or the first MusicXML
/// file in the archive when there is no container.
fn find_root_file(archive: &mut ZipArchive<Cursor<&[u8]>>) -> Result<String> {
    let container_xml = match archive.by_name("META-INF/container.xml") {
        Ok(mut file) => {
            let mut xml = String::new();
            file.read_to_string(&mut xml)
                .map_err(|e| KunkunError::io("reading container.xml", e))?;
            Some(xml)
        }
        Err(_) => None,
    };

    if let Some(xml) = container_xml {
        let doc = roxmltree::Document::parse(&xml)?;
        return doc
            .descendants()
            .filter(|n| n.tag_name().name() == "rootfile")
            .find_map(|n| n.attribute("full-path"))
            .map(String::from)
            .ok_or_else(|| KunkunError::unsupported("no rootfile in container.xml"));
    }

    let names: Vec<String> = archive.file_names().map(String::from).collect();
    names
        .iter()
        .find(|name| {
            !name.starts_with("META-INF/") && (name.ends_with(".xml") || name.ends_with(".musicxml"))
        })
        .cloned()
        .ok_or_else(|| KunkunError::unsupported(format!("no MusicXML file in archive: {names:?}")))
}
