//! Candidate generation: every (string, degree) that produces a pitch.
//!
//! The female string additionally reaches one octave above its degree
//! table.  `resolve_candidates` wraps generation in the fallback chain
//! that guarantees every note gets at least one candidate.

use smallvec::{smallvec, SmallVec};

use crate::model::{PositionCandidate, StringRegister, Symbol, DEGREE_INTERVALS};
use crate::pitch::midi_to_note_name;

/// Three strings × up to two octave variants.
pub type CandidateList = SmallVec<[PositionCandidate; 6]>;

/// Enumerate all positions playing exactly `pitch`.  May be empty.
///
/// Order is deterministic: strings in `StringRegister::ALL` order, then
/// ascending degree, with the female string's upper-octave match directly
/// after its direct match for the same degree.
pub fn build_candidates(pitch: i32, confidence: f64) -> CandidateList {
    let mut out = CandidateList::new();
    for register in StringRegister::ALL {
        let open = register.open_pitch();
        for (degree, interval) in DEGREE_INTERVALS.iter().enumerate() {
            let position = open + interval;
            if position == pitch {
                out.push(candidate(register, degree as u8, pitch, confidence));
            }
            if register == StringRegister::Female && position + 12 == pitch {
                out.push(candidate(register, degree as u8, pitch, confidence));
            }
        }
    }
    out
}

/// Candidates for `pitch`, never empty.
///
/// Falls back to the octave above, then to a forced open male string
/// carrying the name of the unshifted pitch.
pub fn resolve_candidates(pitch: i32, confidence: f64) -> CandidateList {
    let direct = build_candidates(pitch, confidence);
    if !direct.is_empty() {
        return direct;
    }

    let octave_up = build_candidates(pitch + 12, confidence);
    if !octave_up.is_empty() {
        tracing::debug!(pitch, "no direct position, using octave above");
        return octave_up;
    }

    tracing::debug!(pitch, "no playable position, forcing open male string");
    smallvec![candidate(StringRegister::Male, 0, pitch, confidence)]
}

fn candidate(register: StringRegister, degree: u8, pitch: i32, confidence: f64) -> PositionCandidate {
    PositionCandidate {
        register,
        degree,
        symbol: Symbol::BY_DEGREE[degree as usize],
        note_name: midi_to_note_name(pitch),
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn positions(list: &CandidateList) -> Vec<(StringRegister, u8)> {
        list.iter().map(|c| (c.register, c.degree)).collect()
    }

    #[test]
    fn middle_c_has_three_positions() {
        let cands = build_candidates(60, 0.9);
        assert_eq!(
            positions(&cands),
            vec![
                (StringRegister::Male, 7),
                (StringRegister::Middle, 4),
                (StringRegister::Female, 0),
            ]
        );
        assert!(cands.iter().all(|c| c.note_name == "C4"));
        assert!(cands.iter().all(|c| c.confidence == 0.9));
    }

    #[test]
    fn female_upper_octave() {
        // 84 = female open (60) + octave (12) + 12
        let cands = build_candidates(84, 1.0);
        assert_eq!(positions(&cands), vec![(StringRegister::Female, 7)]);
        assert_eq!(cands[0].symbol, Symbol::Shaku);

        // 74 = female + major second (62) + 12
        let cands = build_candidates(74, 1.0);
        assert_eq!(positions(&cands), vec![(StringRegister::Female, 1)]);
    }

    #[test]
    fn chromatic_pitch_has_no_direct_position() {
        assert!(build_candidates(61, 1.0).is_empty());
    }

    #[test]
    fn fallback_uses_octave_above() {
        // 47 (B2) is below every string; 59 is male degree 6.
        let cands = resolve_candidates(47, 0.8);
        assert_eq!(positions(&cands), vec![(StringRegister::Male, 6)]);
        assert_eq!(cands[0].note_name, "B3");
    }

    #[test]
    fn forced_candidate_keeps_original_name() {
        // 66 (F#4) and 78 have no position on any string.
        let cands = resolve_candidates(66, 0.5);
        assert_eq!(cands.len(), 1);
        assert_eq!(cands[0].register, StringRegister::Male);
        assert_eq!(cands[0].degree, 0);
        assert_eq!(cands[0].symbol, Symbol::Kou);
        assert_eq!(cands[0].note_name, "F#4");
        assert_eq!(cands[0].confidence, 0.5);
    }

    #[test]
    fn resolution_is_total() {
        let lowest = StringRegister::Male.open_pitch();
        for pitch in (lowest - 24)..=(lowest + 36) {
            let cands = resolve_candidates(pitch, 1.0);
            assert!(!cands.is_empty(), "pitch {pitch} has no candidate");
            assert!(cands.iter().all(|c| c.degree <= 7));
        }
    }
}
