//! MusicXML melody import — reads one part of a `score-partwise`
//! document into a monophonic `NoteEvent` sequence.
//!
//! Only the first voice is kept.  Chord tones after the first, grace
//! notes and rests produce no events; tied notes are merged.  Timing
//! follows `<divisions>` and the active tempo (`<sound tempo>` or a
//! `<metronome>` mark, 120 BPM until one appears).

use roxmltree::{Document, Node};

use crate::error::{KunkunError, Result};
use crate::model::NoteEvent;
use crate::pitch::step_to_midi;

/// Tempo assumed until the score sets one.
pub const DEFAULT_TEMPO: f64 = 120.0;

/// Confidence given to notes read from notation.
const NOTATED_CONFIDENCE: f64 = 1.0;

/// Tolerance for deciding that a tied note starts where the previous ended.
const TIE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Which `<part>` to read (0-based, document order)
    pub part_index: usize,
    /// BPM used until the score sets a tempo
    pub default_tempo: f64,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            part_index: 0,
            default_tempo: DEFAULT_TEMPO,
        }
    }
}

/// Parse a MusicXML string into the melody of one part.
pub fn parse_musicxml_melody(xml: &str, options: &ImportOptions) -> Result<Vec<NoteEvent>> {
    // MusicXML files include a DOCTYPE declaration, so we must allow DTDs
    let parsing = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let doc = Document::parse_with_options(xml, parsing)?;
    let root = doc.root_element();

    if root.tag_name().name() != "score-partwise" {
        return Err(KunkunError::unsupported(format!(
            "root element '{}', only 'score-partwise' is supported",
            root.tag_name().name()
        )));
    }

    let parts: Vec<Node> = root
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "part")
        .collect();
    let part = parts.get(options.part_index).ok_or(KunkunError::MissingPart {
        index: options.part_index,
        available: parts.len(),
    })?;

    let mut reader = MelodyReader::new(options.default_tempo);
    for measure in part
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "measure")
    {
        reader.read_measure(&measure);
    }

    tracing::debug!(
        part = options.part_index,
        notes = reader.events.len(),
        "imported MusicXML melody"
    );
    Ok(reader.events)
}

/// Running state while walking a part in document order.
struct MelodyReader {
    divisions: f64,
    tempo: f64,
    /// Current position in seconds
    cursor: f64,
    voice: Option<String>,
    events: Vec<NoteEvent>,
}

impl MelodyReader {
    fn new(tempo: f64) -> Self {
        Self {
            divisions: 1.0,
            tempo,
            cursor: 0.0,
            voice: None,
            events: Vec::new(),
        }
    }

    /// Seconds spanned by `duration` divisions at the current tempo.
    fn seconds(&self, duration: f64) -> f64 {
        duration / self.divisions * 60.0 / self.tempo
    }

    fn read_measure(&mut self, measure: &Node) {
        for child in measure.children().filter(|n| n.is_element()) {
            match child.tag_name().name() {
                "attributes" => {
                    if let Some(d) = child_f64(&child, "divisions").filter(|d| *d > 0.0) {
                        self.divisions = d;
                    }
                }
                "direction" => self.read_direction(&child),
                "sound" => self.read_sound(&child),
                "backup" => {
                    let d = child_f64(&child, "duration").unwrap_or(0.0);
                    self.cursor = (self.cursor - self.seconds(d)).max(0.0);
                }
                "forward" => {
                    let d = child_f64(&child, "duration").unwrap_or(0.0);
                    self.cursor += self.seconds(d);
                }
                "note" => self.read_note(&child),
                _ => {}
            }
        }
    }

    fn read_direction(&mut self, node: &Node) {
        for d in node.descendants().filter(|n| n.is_element()) {
            match d.tag_name().name() {
                "sound" => self.read_sound(&d),
                "metronome" => {
                    // A later <sound tempo> in the same direction overrides this.
                    if let Some(bpm) = child_f64(&d, "per-minute").filter(|t| *t > 0.0) {
                        self.tempo = bpm;
                    }
                }
                _ => {}
            }
        }
    }

    fn read_sound(&mut self, node: &Node) {
        if let Some(t) = node
            .attribute("tempo")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|t| *t > 0.0)
        {
            self.tempo = t;
        }
    }

    fn read_note(&mut self, node: &Node) {
        let mut duration = 0.0;
        let mut midi = None;
        let mut voice = None;
        let mut rest = false;
        let mut chord = false;
        let mut grace = false;
        let mut tie_stop = false;

        for child in node.children().filter(|n| n.is_element()) {
            match child.tag_name().name() {
                "pitch" => {
                    midi = parse_pitch(&child);
                    if midi.is_none() {
                        tracing::warn!("unreadable <pitch>, treating note as a rest");
                    }
                }
                "duration" => duration = parse_f64(&child).unwrap_or(0.0),
                "voice" => voice = child.text().map(|t| t.trim().to_string()),
                "rest" => rest = true,
                "chord" => chord = true,
                "grace" => grace = true,
                "tie" => tie_stop |= child.attribute("type") == Some("stop"),
                _ => {}
            }
        }

        if grace || chord {
            return;
        }

        let voice = voice.unwrap_or_else(|| "1".to_string());
        let is_primary = *self.voice.get_or_insert_with(|| voice.clone()) == voice;
        let start = self.cursor;
        let end = start + self.seconds(duration);
        self.cursor = end;

        if !is_primary || rest {
            return;
        }
        let Some(midi) = midi else {
            return;
        };

        if tie_stop {
            if let Some(last) = self.events.last_mut() {
                if last.pitch == midi && (last.end - start).abs() < TIE_EPSILON {
                    last.end = end;
                    return;
                }
            }
        }
        self.events
            .push(NoteEvent::new(start, end, midi, NOTATED_CONFIDENCE));
    }
}

fn parse_pitch(node: &Node) -> Option<i32> {
    let mut step = None;
    let mut alter = 0;
    let mut octave = None;
    for child in node.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "step" => step = child.text().map(|t| t.trim().to_string()),
            // Microtonal alters (e.g. -0.5) round to the nearest semitone.
            "alter" => alter = parse_f64(&child).map(|a| a.round() as i32).unwrap_or(0),
            "octave" => octave = parse_f64(&child).map(|o| o as i32),
            _ => {}
        }
    }
    step_to_midi(step?.as_str(), alter, octave?)
}

fn child_f64(node: &Node, name: &str) -> Option<f64> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
        .and_then(|n| parse_f64(&n))
}

fn parse_f64(node: &Node) -> Option<f64> {
    node.text().and_then(|t| t.trim().parse().ok())
}
