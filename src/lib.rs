//! kunkunlib — melody to kunkunshi (工工四) tablature for the sanshin.
//!
//! A melody (from audio transcription, MusicXML, or notes JSON) is
//! transposed into the reference key, every note is given its possible
//! (string, degree) positions, and a lattice decoder picks the sequence
//! that is easiest to play.
//!
//! # Example
//! ```
//! use kunkunlib::{convert_to_kunkunshi, generate_dummy_notes, tab_to_text};
//!
//! let notes = generate_dummy_notes(8.0);
//! let tab = convert_to_kunkunshi(&notes, "C");
//! assert_eq!(tab.len(), notes.len());
//! println!("{}", tab_to_text(&tab));
//! ```

pub mod candidates;
pub mod decoder;
pub mod error;
pub mod model;
pub mod mxl;
pub mod parser;
pub mod pitch;
pub mod renderer;
pub mod transcription;

#[cfg(target_os = "android")]
pub mod android;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use candidates::{build_candidates, resolve_candidates, CandidateList};
pub use decoder::{decode, path_cost, CostModel};
pub use error::{KunkunError, Result};
pub use model::*;
pub use mxl::parse_mxl_melody;
pub use parser::{parse_musicxml_melody, ImportOptions};
pub use pitch::{key_offset, midi_to_freq, midi_to_note_name, transpose_notes};
pub use renderer::{render_tab_points, render_tab_to_svg, tab_to_text, SheetOptions};
pub use transcription::{generate_dummy_notes, MelodyExtractor, PlaceholderExtractor};

/// Options for a conversion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Key root, e.g. `"C"`, `"F#"`, `"Bb"`.  Unknown names mean no transposition.
    pub key_root: String,
    pub cost: CostModel,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            key_root: "C".to_string(),
            cost: CostModel::default(),
        }
    }
}

/// Convert a melody to tablature in the given key with the standard cost
/// model.  Never fails; the output has one point per input note.
pub fn convert_to_kunkunshi(notes: &[NoteEvent], key_root: &str) -> Vec<TabPoint> {
    convert_with_options(
        notes,
        &ConversionOptions {
            key_root: key_root.to_string(),
            ..ConversionOptions::default()
        },
    )
}

/// Convert a melody to tablature with explicit options.
pub fn convert_with_options(notes: &[NoteEvent], options: &ConversionOptions) -> Vec<TabPoint> {
    let in_key = transpose_notes(notes, &options.key_root);
    let pitches: Vec<i32> = in_key.iter().map(|n| n.pitch).collect();
    let layers: Vec<CandidateList> = in_key
        .iter()
        .map(|n| resolve_candidates(n.pitch, n.confidence))
        .collect();

    let chosen = decode(&layers, &pitches, &options.cost);
    render_tab_points(notes, &chosen)
}

// ═══════════════════════════════════════════════════════════════════════
// Melody import
// ═══════════════════════════════════════════════════════════════════════

/// Read a melody from a file path.
/// Automatically detects format based on file extension:
/// - `.musicxml` or `.xml` → uncompressed MusicXML
/// - `.mxl` → compressed MXL (ZIP archive)
/// - `.json` → notes JSON (`[{start, end, midi, hz, confidence}, ...]`)
pub fn melody_from_file<P: AsRef<Path>>(path: P, options: &ImportOptions) -> Result<Vec<NoteEvent>> {
    let path = path.as_ref();
    let data = std::fs::read(path)
        .map_err(|e| KunkunError::io(format!("reading '{}'", path.display()), e))?;

    melody_from_bytes(&data, path.extension().and_then(|e| e.to_str()), options)
}

/// Read a melody from raw bytes with an optional format hint.
/// If `extension` is None, tries to auto-detect the format.
pub fn melody_from_bytes(data: &[u8], extension: Option<&str>, options: &ImportOptions) -> Result<Vec<NoteEvent>> {
    match extension {
        Some("mxl") => parse_mxl_melody(data, options),
        Some("musicxml") | Some("xml") => parse_musicxml_melody(utf8(data)?, options),
        Some("json") => notes_from_json(utf8(data)?),
        _ => {
            // Auto-detect: JSON array, then XML, then MXL
            if let Ok(text) = std::str::from_utf8(data) {
                let trimmed = text.trim_start();
                if trimmed.starts_with('[') {
                    return notes_from_json(text);
                }
                if trimmed.starts_with('<') {
                    return parse_musicxml_melody(text, options);
                }
            }
            parse_mxl_melody(data, options)
        }
    }
}

fn utf8(data: &[u8]) -> Result<&str> {
    std::str::from_utf8(data).map_err(|e| KunkunError::unsupported(format!("invalid UTF-8: {e}")))
}

// ═══════════════════════════════════════════════════════════════════════
// JSON interchange
// ═══════════════════════════════════════════════════════════════════════

/// Parse a notes JSON array.
pub fn notes_from_json(json: &str) -> Result<Vec<NoteEvent>> {
    Ok(serde_json::from_str(json)?)
}

pub fn notes_to_json(notes: &[NoteEvent]) -> Result<String> {
    Ok(serde_json::to_string(notes)?)
}

/// Serialize tablature in the `kunkunshi_json` shape.
pub fn tab_to_json(points: &[TabPoint]) -> Result<String> {
    Ok(serde_json::to_string(points)?)
}

/// Read a melody file and render it straight to an SVG sheet.
pub fn render_file_to_svg<P: AsRef<Path>>(path: P, key_root: &str, sheet: &SheetOptions) -> Result<String> {
    let notes = melody_from_file(path, &ImportOptions::default())?;
    let tab = convert_to_kunkunshi(&notes, key_root);
    Ok(render_tab_to_svg(&tab, sheet))
}

/// Notes JSON in, tablature JSON out.  `options_json` may be empty, in
/// which case the defaults apply; `key_root` overrides its key.
pub fn convert_json(notes_json: &str, key_root: &str, options_json: Option<&str>) -> Result<String> {
    let notes = notes_from_json(notes_json)?;
    let mut options: ConversionOptions = match options_json.map(str::trim) {
        Some(s) if !s.is_empty() => serde_json::from_str(s)?,
        _ => ConversionOptions::default(),
    };
    options.key_root = key_root.to_string();
    tab_to_json(&convert_with_options(&notes, &options))
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI — for iOS (static library) and Android (JNI)
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Convert notes JSON to tablature JSON and return it as a C string.
/// The caller must free the returned string with `kunkunlib_free_string`.
///
/// `key_root` may be null (key of C).  Returns null on malformed input.
///
/// # Safety
/// `notes_json` must be a valid null-terminated UTF-8 C string; `key_root`
/// must be null or one.
#[no_mangle]
pub unsafe extern "C" fn kunkunlib_convert_json(
    notes_json: *const c_char,
    key_root: *const c_char,
) -> *mut c_char {
    let Some(json) = (unsafe { c_str(notes_json) }) else {
        return std::ptr::null_mut();
    };
    let key = unsafe { c_str(key_root) }.unwrap_or("C");

    match convert_json(json, key, None) {
        Ok(out) => CString::new(out).unwrap_or_default().into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Read a melody file and return an SVG kunkunshi sheet as a C string.
/// The caller must free the returned string with `kunkunlib_free_string`.
///
/// # Safety
/// `path` must be a valid null-terminated UTF-8 C string; `key_root`
/// must be null or one.
#[no_mangle]
pub unsafe extern "C" fn kunkunlib_render_file(
    path: *const c_char,
    key_root: *const c_char,
) -> *mut c_char {
    let Some(path_str) = (unsafe { c_str(path) }) else {
        return std::ptr::null_mut();
    };
    let key = unsafe { c_str(key_root) }.unwrap_or("C");

    match render_file_to_svg(path_str, key, &SheetOptions::default()) {
        Ok(svg) => CString::new(svg).unwrap_or_default().into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Free a string previously returned by kunkunlib functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a kunkunlib function, or null.
#[no_mangle]
pub unsafe extern "C" fn kunkunlib_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}

/// # Safety
/// `ptr` must be null or a valid null-terminated C string.
unsafe fn c_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ffi_round_trip() {
        let notes = CString::new(notes_to_json(&generate_dummy_notes(8.0)).unwrap()).unwrap();
        let key = CString::new("D").unwrap();
        unsafe {
            let out = kunkunlib_convert_json(notes.as_ptr(), key.as_ptr());
            assert!(!out.is_null());
            let json = CStr::from_ptr(out).to_str().unwrap().to_string();
            kunkunlib_free_string(out);
            let points: Vec<TabPoint> = serde_json::from_str(&json).unwrap();
            assert_eq!(points.len(), 11);
            assert_eq!(points[0].note_name, "D4");
        }
    }

    #[test]
    fn ffi_rejects_null_and_garbage() {
        let garbage = CString::new("{not json").unwrap();
        unsafe {
            assert!(kunkunlib_convert_json(std::ptr::null(), std::ptr::null()).is_null());
            assert!(kunkunlib_convert_json(garbage.as_ptr(), std::ptr::null()).is_null());
            kunkunlib_free_string(std::ptr::null_mut());
        }
    }

    #[test]
    fn options_json_overrides_cost() {
        let notes = notes_to_json(&generate_dummy_notes(8.0)).unwrap();
        let out = convert_json(&notes, "C", Some(r#"{"cost": {"string_change": 0}}"#)).unwrap();
        let points: Vec<TabPoint> = serde_json::from_str(&out).unwrap();
        assert_eq!(points.len(), 11);
    }
}
