//! Output tests — text export, tablature JSON, and the SVG sheet.

use kunkunlib::{
    convert_json, convert_to_kunkunshi, generate_dummy_notes, notes_to_json, render_tab_to_svg,
    tab_to_json, tab_to_text, SheetOptions, TabPoint,
};
use pretty_assertions::assert_eq;

#[test]
fn text_export_of_reference_scale() {
    let tab = convert_to_kunkunshi(&generate_dummy_notes(8.0), "C");
    let text = tab_to_text(&tab);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[0], "0.00-0.73\tfemale\t工\tC4");
    assert_eq!(lines[5], "3.64-4.36\tfemale\t八\tA4");
    assert_eq!(lines[10], "7.27-8.00\tfemale\t工\tC4");
}

#[test]
fn tablature_json_shape() {
    let tab = convert_to_kunkunshi(&generate_dummy_notes(8.0), "C");
    let json = tab_to_json(&tab).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let first = &value[0];
    assert_eq!(first["string"], "female");
    assert_eq!(first["symbol"], "工");
    assert_eq!(first["display"], "工 (C4)");
    assert_eq!(first["noteName"], "C4");
    assert_eq!(first["confidence"], 0.65);

    let back: Vec<TabPoint> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.len(), tab.len());
    for (b, t) in back.iter().zip(&tab) {
        assert_eq!((b.register, b.symbol, &b.note_name), (t.register, t.symbol, &t.note_name));
        assert!((b.start - t.start).abs() < 1e-9);
    }
}

#[test]
fn convert_json_matches_direct_conversion() {
    let notes = generate_dummy_notes(8.0);
    let json = convert_json(&notes_to_json(&notes).unwrap(), "G", None).unwrap();
    let points: Vec<TabPoint> = serde_json::from_str(&json).unwrap();
    let direct = convert_to_kunkunshi(&notes, "G");
    let summary = |p: &TabPoint| (p.register, p.symbol, p.note_name.clone(), p.display.clone());
    assert_eq!(
        points.iter().map(summary).collect::<Vec<_>>(),
        direct.iter().map(summary).collect::<Vec<_>>()
    );
}

#[test]
fn convert_json_survives_extreme_weights() {
    let notes = notes_to_json(&generate_dummy_notes(8.0)).unwrap();
    let options = r#"{"cost":{"degree_jump":4294967295,"string_change":4294967295,"low_confidence":4294967295}}"#;
    let out = convert_json(&notes, "C", Some(options)).unwrap();
    let points: Vec<TabPoint> = serde_json::from_str(&out).unwrap();
    assert_eq!(points.len(), 11);
    assert_eq!(points[0].note_name, "C4");
}

#[test]
fn convert_json_rejects_bad_options() {
    let notes = notes_to_json(&generate_dummy_notes(8.0)).unwrap();
    assert!(convert_json(&notes, "C", Some("{\"cost\": 3}")).is_err());
    assert!(convert_json(&notes, "C", Some("   ")).is_ok());
}

#[test]
fn svg_sheet_of_reference_scale() {
    let tab = convert_to_kunkunshi(&generate_dummy_notes(8.0), "C");
    let svg = render_tab_to_svg(
        &tab,
        &SheetOptions {
            title: Some("Reference scale".to_string()),
            cells_per_column: 6,
            ..SheetOptions::default()
        },
    );
    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains("Reference scale"));
    // every cell carries its string mark
    assert_eq!(svg.matches(">女<").count(), 11);
    // two glyph 工 cells (first and last note)
    assert_eq!(svg.matches(">工<").count(), 2);
}
