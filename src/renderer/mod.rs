//! Tablature renderer — maps decoded positions back onto the original
//! note timings and formats the result as text or an SVG kunkunshi sheet.

mod constants;
mod sheet;
mod svg_builder;

use crate::model::{NoteEvent, PositionCandidate, TabPoint};

pub use sheet::{render_tab_to_svg, SheetOptions};

/// Pair each chosen position with the original (untransposed) note it was
/// decoded for.  Timing and confidence come from the note.
pub fn render_tab_points(notes: &[NoteEvent], chosen: &[PositionCandidate]) -> Vec<TabPoint> {
    debug_assert_eq!(
        notes.len(),
        chosen.len(),
        "notes ({}) and decoded positions ({}) must have the same length",
        notes.len(),
        chosen.len()
    );
    notes
        .iter()
        .zip(chosen)
        .map(|(note, cand)| TabPoint {
            start: note.start,
            end: note.end,
            register: cand.register,
            symbol: cand.symbol,
            display: format!("{} ({})", cand.symbol.glyph(), cand.note_name),
            confidence: note.confidence,
            note_name: cand.note_name.clone(),
        })
        .collect()
}

/// Plain-text export: `start-end<TAB>string<TAB>symbol<TAB>noteName`,
/// one line per point, times with two decimals.
pub fn tab_to_text(points: &[TabPoint]) -> String {
    points
        .iter()
        .map(|p| {
            format!(
                "{:.2}-{:.2}\t{}\t{}\t{}",
                p.start, p.end, p.register, p.symbol, p.note_name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{StringRegister, Symbol};
    use pretty_assertions::assert_eq;

    #[test]
    fn timing_and_confidence_come_from_the_note() {
        let notes = vec![NoteEvent::new(1.25, 2.0, 62, 0.42)];
        let chosen = vec![PositionCandidate {
            register: StringRegister::Female,
            degree: 1,
            symbol: Symbol::Shi,
            note_name: "E4".to_string(),
            confidence: 0.99,
        }];
        let points = render_tab_points(&notes, &chosen);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].start, 1.25);
        assert_eq!(points[0].end, 2.0);
        assert_eq!(points[0].confidence, 0.42);
        assert_eq!(points[0].note_name, "E4");
        assert_eq!(points[0].display, "四 (E4)");
    }

    #[test]
    fn text_export_lines() {
        let points = vec![
            TabPoint {
                start: 0.0,
                end: 0.727,
                register: StringRegister::Female,
                symbol: Symbol::Kou,
                display: "工 (C4)".to_string(),
                confidence: 0.65,
                note_name: "C4".to_string(),
            },
            TabPoint {
                start: 0.727,
                end: 1.4545,
                register: StringRegister::Middle,
                symbol: Symbol::Shaku,
                display: "尺 (F4)".to_string(),
                confidence: 0.89,
                note_name: "F4".to_string(),
            },
        ];
        assert_eq!(
            tab_to_text(&points),
            "0.00-0.73\tfemale\t工\tC4\n0.73-1.45\tmiddle\t尺\tF4"
        );
        assert_eq!(tab_to_text(&[]), "");
    }
}
