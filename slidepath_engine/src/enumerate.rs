// Candidate enumeration: every (slide position, partial) pair that can
// produce a target pitch on a given instrument.
//
// Positions are abstract position-units: semitones of slide extension below
// the partial's natural pitch. 0 is first position (fully retracted), 6 is
// seventh. The natural pitch of partial k in first position is the
// fundamental's (k+1)-th harmonic, so the required position is simply the
// semitone gap between that natural pitch and the target.
//
// Position strictly increases with partial: a higher partial sounds higher,
// so reaching the same target takes more extension. That monotonicity drives
// the enumeration loop: partials whose natural pitch is still below the
// target give positions at or under the -0.5 tolerance and are skipped,
// the first partials above it give playable positions, and once the
// position passes the slide length every later partial is out of reach too.

use crate::error::{OptimizeError, Result};
use crate::instrument::InstrumentConfig;
use serde::{Deserialize, Serialize};
use slidepath_pitch::Pitch;

/// Slide travel direction. Only the direction-minimizing objective tags
/// states with this; every other mode leaves it unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Retracting toward first position.
    In,
    /// Extending away from first position.
    Out,
}

/// One playable realization of a pitch: a slide position plus the harmonic
/// partial sounding there.
///
/// The position is always derived from (pitch, partial, instrument) by
/// `position_for_partial`; it is never set independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateState {
    /// Index of the note this state satisfies in the input sequence.
    pub note_index: usize,
    pub pitch: Pitch,
    /// Continuous slide position in position-units.
    pub position: f64,
    /// Harmonic partial; 0 is the fundamental (pedal register).
    pub partial: u32,
    /// Set only by the direction-minimizing objective.
    pub direction: Option<Direction>,
}

/// Flat notes reachable by lipping down in first position sit slightly
/// negative; anything at or below this is treated as unreachable.
pub const MIN_POSITION: f64 = -0.5;

/// Defensive ceiling on the partial search. The slide-length exit terminates
/// the loop for every sane config; this bound only guards against malformed
/// ones (e.g. a fundamental above the requested pitch range).
const MAX_PARTIAL: u32 = 32;

/// Slide position required to produce `pitch` using `partial`.
///
/// Strictly increasing in `partial` for a fixed pitch and instrument.
pub fn position_for_partial(pitch: Pitch, partial: u32, instrument: &InstrumentConfig) -> f64 {
    let natural = Pitch::from_frequency(instrument.fundamental.harmonic_frequency(partial));
    natural.semitones() - pitch.semitones()
}

/// Enumerate every playable state for `pitch`, in ascending partial order.
///
/// Fails with `UnplayablePitch` when no partial lands inside
/// `(MIN_POSITION, slide_length]`.
pub fn enumerate_candidates(
    note_index: usize,
    pitch: Pitch,
    instrument: &InstrumentConfig,
) -> Result<Vec<CandidateState>> {
    let mut states = Vec::new();
    for partial in 0..=MAX_PARTIAL {
        let position = position_for_partial(pitch, partial, instrument);
        if position > instrument.slide_length {
            // Position grows with partial, so every later partial is also
            // past the end of the slide.
            break;
        }
        if position > MIN_POSITION {
            states.push(CandidateState {
                note_index,
                pitch,
                position,
                partial,
                direction: None,
            });
        }
        // position <= MIN_POSITION: this partial's natural pitch is below
        // the target; a higher partial may still reach it.
    }
    if states.is_empty() {
        return Err(OptimizeError::UnplayablePitch { pitch });
    }
    Ok(states)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use slidepath_pitch::Note;

    #[test]
    fn position_increases_with_partial() {
        let tenor = InstrumentConfig::tenor();
        let c3 = Pitch::new(Note::C, 3);
        let mut previous = position_for_partial(c3, 0, &tenor);
        for partial in 1..10 {
            let position = position_for_partial(c3, partial, &tenor);
            assert!(
                position > previous,
                "partial {partial}: {position} not above {previous}"
            );
            previous = position;
        }
    }

    #[test]
    fn c3_has_single_candidate_in_sixth_position() {
        let tenor = InstrumentConfig::tenor();
        let states = enumerate_candidates(0, Pitch::new(Note::C, 3), &tenor).unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].partial, 2);
        assert_abs_diff_eq!(states[0].position, 5.0196, epsilon = 1e-3);
        assert_eq!(states[0].note_index, 0);
        assert_eq!(states[0].direction, None);
    }

    #[test]
    fn f4_candidates_ascend_by_partial() {
        let tenor = InstrumentConfig::tenor();
        let states = enumerate_candidates(3, Pitch::new(Note::F, 4), &tenor).unwrap();
        let partials: Vec<u32> = states.iter().map(|s| s.partial).collect();
        assert_eq!(partials, vec![5, 6, 7]);
        assert_abs_diff_eq!(states[0].position, 0.0196, epsilon = 1e-3);
        assert_abs_diff_eq!(states[1].position, 2.6883, epsilon = 1e-3);
        assert_abs_diff_eq!(states[2].position, 5.0, epsilon = 1e-9);
        assert!(states.iter().all(|s| s.note_index == 3));
    }

    #[test]
    fn fundamental_is_playable_in_first_position() {
        let tenor = InstrumentConfig::tenor();
        let states = enumerate_candidates(0, tenor.fundamental, &tenor).unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].partial, 0);
        assert_abs_diff_eq!(states[0].position, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn flat_note_within_tolerance_is_kept() {
        let tenor = InstrumentConfig::tenor();
        // A pedal Bb lipped 0.3 semitones sharp needs position -0.3, which
        // is inside the first-position tolerance.
        let sharp_pedal = Pitch::with_offset(Note::Bb, 1, 0.3);
        let states = enumerate_candidates(0, sharp_pedal, &tenor).unwrap();
        assert_eq!(states[0].partial, 0);
        assert_abs_diff_eq!(states[0].position, -0.3, epsilon = 1e-9);
    }

    #[test]
    fn pitch_between_partials_is_unplayable() {
        let tenor = InstrumentConfig::tenor();
        // B1 sits one semitone above the pedal Bb1 but eleven below the next
        // partial: no slide position reaches it.
        let result = enumerate_candidates(0, Pitch::new(Note::B, 1), &tenor);
        assert_eq!(
            result,
            Err(OptimizeError::UnplayablePitch {
                pitch: Pitch::new(Note::B, 1)
            })
        );
    }

    #[test]
    fn zero_length_slide_rejects_everything_off_center() {
        let stuck = InstrumentConfig::new(Pitch::new(Note::Bb, 1), 0.0);
        let result = enumerate_candidates(0, Pitch::new(Note::C, 3), &stuck);
        assert!(matches!(
            result,
            Err(OptimizeError::UnplayablePitch { .. })
        ));
    }

    #[test]
    fn alto_shifts_positions_down() {
        // On the Eb alto, C3 is the 2nd partial three semitones from home
        // rather than five: the whole map shifts with the fundamental.
        let alto = InstrumentConfig::alto();
        let states = enumerate_candidates(0, Pitch::new(Note::C, 3), &alto).unwrap();
        assert_eq!(states[0].partial, 1);
        assert_abs_diff_eq!(states[0].position, 3.0, epsilon = 1e-9);
    }
}
