//! Pitch helpers: key transposition, note names and frequencies.

use crate::model::NoteEvent;

const SEMITONE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Semitone offset of a key root above C.
///
/// Accepts the twelve chromatic names with either sharps or flats
/// (`"C#"` and `"Db"` both give 1).  Unknown names give 0.
pub fn key_offset(key_root: &str) -> i32 {
    match key_root {
        "C" => 0,
        "C#" | "Db" => 1,
        "D" => 2,
        "D#" | "Eb" => 3,
        "E" => 4,
        "F" => 5,
        "F#" | "Gb" => 6,
        "G" => 7,
        "G#" | "Ab" => 8,
        "A" => 9,
        "A#" | "Bb" => 10,
        "B" => 11,
        _ => 0,
    }
}

/// Shift every note's pitch by the key's offset.  Timings, `hz` and
/// confidence are left as they were.
pub fn transpose_notes(notes: &[NoteEvent], key_root: &str) -> Vec<NoteEvent> {
    let offset = key_offset(key_root);
    notes
        .iter()
        .map(|note| NoteEvent {
            pitch: note.pitch + offset,
            ..note.clone()
        })
        .collect()
}

/// Scientific pitch name, e.g. 60 → `"C4"`, 61 → `"C#4"`.
pub fn midi_to_note_name(midi: i32) -> String {
    let name = SEMITONE_NAMES[midi.rem_euclid(12) as usize];
    let octave = midi.div_euclid(12) - 1;
    format!("{name}{octave}")
}

/// Equal-tempered frequency with A4 = 440 Hz.
pub fn midi_to_freq(midi: i32) -> f64 {
    440.0 * 2f64.powf((midi - 69) as f64 / 12.0)
}

/// MIDI pitch for a MusicXML step/alter/octave triple.
/// Returns `None` for an unknown step letter.
pub fn step_to_midi(step: &str, alter: i32, octave: i32) -> Option<i32> {
    let base = match step {
        "C" => 0,
        "D" => 2,
        "E" => 4,
        "F" => 5,
        "G" => 7,
        "A" => 9,
        "B" => 11,
        _ => return None,
    };
    Some((octave + 1) * 12 + base + alter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sharps_and_flats_share_offsets() {
        assert_eq!(key_offset("C#"), 1);
        assert_eq!(key_offset("Db"), 1);
        assert_eq!(key_offset("Bb"), 10);
        assert_eq!(key_offset("B"), 11);
    }

    #[test]
    fn unknown_key_is_untransposed() {
        assert_eq!(key_offset("H"), 0);
        assert_eq!(key_offset(""), 0);
        assert_eq!(key_offset("c"), 0);
    }

    #[test]
    fn note_names() {
        assert_eq!(midi_to_note_name(60), "C4");
        assert_eq!(midi_to_note_name(69), "A4");
        assert_eq!(midi_to_note_name(66), "F#4");
        assert_eq!(midi_to_note_name(0), "C-1");
        assert_eq!(midi_to_note_name(-1), "B-2");
    }

    #[test]
    fn a4_is_440() {
        assert!((midi_to_freq(69) - 440.0).abs() < 1e-9);
        assert!((midi_to_freq(81) - 880.0).abs() < 1e-9);
    }

    #[test]
    fn transposition_keeps_timing() {
        let notes = vec![NoteEvent::new(0.5, 1.0, 60, 0.9)];
        let shifted = transpose_notes(&notes, "D");
        assert_eq!(shifted[0].pitch, 62);
        assert_eq!(shifted[0].start, 0.5);
        assert_eq!(shifted[0].end, 1.0);
        assert_eq!(shifted[0].confidence, 0.9);
    }

    #[test]
    fn musicxml_steps() {
        assert_eq!(step_to_midi("C", 0, 4), Some(60));
        assert_eq!(step_to_midi("B", -1, 3), Some(58));
        assert_eq!(step_to_midi("X", 0, 4), None);
    }
}
