//! Data model for melodies and kunkunshi tablature.
//!
//! `NoteEvent` is what comes in (from audio transcription or MusicXML
//! import), `TabPoint` is what goes out.  `PositionCandidate` is the
//! decoder's intermediate hypothesis and is never persisted.

use serde::{Deserialize, Serialize};

/// Intervals (in semitones above the open string) of the eight degrees
/// playable on each string.  Identical for all three strings.
pub const DEGREE_INTERVALS: [i32; 8] = [0, 2, 4, 5, 7, 9, 11, 12];

/// A single detected note of a monophonic melody.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Onset in seconds
    pub start: f64,
    /// Release in seconds
    pub end: f64,
    /// Absolute semitone pitch (MIDI numbering, 60 = C4)
    #[serde(rename = "midi")]
    pub pitch: i32,
    /// Fundamental frequency in Hz
    #[serde(default)]
    pub hz: f64,
    /// Detection confidence in [0, 1]
    pub confidence: f64,
}

impl NoteEvent {
    /// Build a note, deriving `hz` from the pitch.
    pub fn new(start: f64, end: f64, pitch: i32, confidence: f64) -> Self {
        Self {
            start,
            end,
            pitch,
            hz: crate::pitch::midi_to_freq(pitch),
            confidence,
        }
    }
}

/// One of the sanshin's three strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StringRegister {
    /// 男弦 — the lowest string
    Male,
    /// 中弦
    Middle,
    /// 女弦 — the highest string
    Female,
}

impl StringRegister {
    /// All strings in candidate enumeration order.
    pub const ALL: [StringRegister; 3] = [
        StringRegister::Male,
        StringRegister::Middle,
        StringRegister::Female,
    ];

    /// MIDI pitch of the open string.
    pub fn open_pitch(self) -> i32 {
        match self {
            StringRegister::Male => 48,
            StringRegister::Middle => 53,
            StringRegister::Female => 60,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StringRegister::Male => "male",
            StringRegister::Middle => "middle",
            StringRegister::Female => "female",
        }
    }

    /// Kanji label used on the rendered sheet.
    pub fn kanji(self) -> &'static str {
        match self {
            StringRegister::Male => "男",
            StringRegister::Middle => "中",
            StringRegister::Female => "女",
        }
    }
}

impl std::fmt::Display for StringRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kunkunshi glyph for a degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    #[serde(rename = "工")]
    Kou,
    #[serde(rename = "四")]
    Shi,
    #[serde(rename = "五")]
    Go,
    #[serde(rename = "六")]
    Roku,
    #[serde(rename = "七")]
    Shichi,
    #[serde(rename = "八")]
    Hachi,
    #[serde(rename = "九")]
    Ku,
    #[serde(rename = "尺")]
    Shaku,
}

impl Symbol {
    /// Glyphs indexed by degree.
    pub const BY_DEGREE: [Symbol; 8] = [
        Symbol::Kou,
        Symbol::Shi,
        Symbol::Go,
        Symbol::Roku,
        Symbol::Shichi,
        Symbol::Hachi,
        Symbol::Ku,
        Symbol::Shaku,
    ];

    /// Returns `None` for degrees outside 0..=7.
    pub fn from_degree(degree: u8) -> Option<Symbol> {
        Self::BY_DEGREE.get(degree as usize).copied()
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Symbol::Kou => "工",
            Symbol::Shi => "四",
            Symbol::Go => "五",
            Symbol::Roku => "六",
            Symbol::Shichi => "七",
            Symbol::Hachi => "八",
            Symbol::Ku => "九",
            Symbol::Shaku => "尺",
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}

/// A hypothesis for how one (transposed) pitch could be played.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionCandidate {
    pub register: StringRegister,
    /// Index into `DEGREE_INTERVALS` (0–7)
    pub degree: u8,
    pub symbol: Symbol,
    /// Western note name of the pitch this candidate was generated for
    pub note_name: String,
    /// Copied from the originating note
    pub confidence: f64,
}

/// One rendered tablature position, aligned 1:1 with an input note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabPoint {
    pub start: f64,
    pub end: f64,
    #[serde(rename = "string")]
    pub register: StringRegister,
    pub symbol: Symbol,
    /// Display label, e.g. `"工 (C4)"`
    pub display: String,
    pub confidence: f64,
    pub note_name: String,
}
