// Equal-tempered pitch model and harmonic-series acoustics.
//
// Everything here is anchored to concert A (A4 = 440 Hz). A pitch is a pitch
// class plus an octave plus a fractional semitone offset, and converts both
// ways between that representation and frequency. The harmonic-series helpers
// model a brass instrument's tube as an open resonator: the k-th partial
// sounds at (k+1) times the tube's fundamental, and the half-wavelength of
// the fundamental gives the physical tube length.
//
// This crate is the single pitch model used across the Slidepath project.
// It is a leaf crate with no dependencies beyond serde, and all computation
// is pure: the same pitch always yields the same frequency and vice versa.
//
// **Critical constraint: `from_frequency` must be the exact inverse of
// `frequency` for offset-free pitches.** The slide-position engine derives
// positions by converting harmonic frequencies back into semitone space, so
// any asymmetry here would shift every computed position.

use serde::{Deserialize, Serialize};

pub const SEMITONES_PER_OCTAVE: i32 = 12;

/// Reference pitch: A4 = 440 Hz.
pub const A440_HERTZ: f64 = 440.0;
pub const A440_OCTAVE: i32 = 4;

/// Absolute semitone index of A4 on the C0-based scale (9 + 12 * 4).
const A440_ABSOLUTE_SEMITONES: i32 = Note::A as i32 + SEMITONES_PER_OCTAVE * A440_OCTAVE;

/// Speed of sound in air at room temperature, in meters per second.
pub const SPEED_OF_SOUND: f64 = 343.0;

/// The twelve pitch classes on a circular semitone axis, C = 0 through B = 11.
///
/// Black keys use flat spellings (trombone literature is flat-heavy).
/// Enharmonic respelling is a presentation concern and lives outside this
/// crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Note {
    C = 0,
    Db = 1,
    D = 2,
    Eb = 3,
    E = 4,
    F = 5,
    Gb = 6,
    G = 7,
    Ab = 8,
    A = 9,
    Bb = 10,
    B = 11,
}

impl Note {
    pub const ALL: [Note; 12] = [
        Note::C,
        Note::Db,
        Note::D,
        Note::Eb,
        Note::E,
        Note::F,
        Note::Gb,
        Note::G,
        Note::Ab,
        Note::A,
        Note::Bb,
        Note::B,
    ];

    /// Semitone value of this pitch class, 0-11.
    pub fn semitones(self) -> i32 {
        self as i32
    }

    /// Pitch class for a semitone value, wrapping modulo 12 (negative values
    /// wrap correctly: -1 is B).
    pub fn from_semitones(semitones: i32) -> Note {
        Note::ALL[semitones.rem_euclid(SEMITONES_PER_OCTAVE) as usize]
    }
}

/// A tempered pitch: pitch class, octave, and a fractional semitone offset.
///
/// The offset captures sub-semitone deviation from the nearest tempered
/// pitch (it is how `from_frequency` preserves out-of-tune input). Equality
/// compares all three fields exactly, not the derived frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pitch {
    pub note: Note,
    pub octave: i32,
    /// Deviation from the tempered pitch in semitones, within half a
    /// semitone either way when produced by `from_frequency`.
    pub offset: f64,
}

impl Pitch {
    /// An exactly tempered pitch (offset 0).
    pub fn new(note: Note, octave: i32) -> Self {
        Pitch {
            note,
            octave,
            offset: 0.0,
        }
    }

    /// A pitch detuned from temperament by `offset` semitones.
    pub fn with_offset(note: Note, octave: i32, offset: f64) -> Self {
        Pitch {
            note,
            octave,
            offset,
        }
    }

    /// Signed semitone distance from A4. A4 is 0, Bb4 is 1, A5 is 12.
    pub fn semitones(&self) -> f64 {
        let tempered =
            self.note.semitones() + SEMITONES_PER_OCTAVE * self.octave - A440_ABSOLUTE_SEMITONES;
        tempered as f64 + self.offset
    }

    /// Frequency in hertz: 440 * 2^(semitones / 12).
    pub fn frequency(&self) -> f64 {
        A440_HERTZ * (self.semitones() / SEMITONES_PER_OCTAVE as f64).exp2()
    }

    /// The pitch sounding at `hertz`: nearest tempered pitch plus the
    /// remaining sub-semitone deviation as `offset`.
    ///
    /// Exact inverse of `frequency` for offset-free pitches. Uses floor
    /// division for the octave split so pitches below C0 land in negative
    /// octaves rather than wrapping.
    pub fn from_frequency(hertz: f64) -> Pitch {
        let semitones = SEMITONES_PER_OCTAVE as f64 * (hertz / A440_HERTZ).log2()
            + A440_ABSOLUTE_SEMITONES as f64;
        let nearest = semitones.round() as i32;
        Pitch {
            note: Note::from_semitones(nearest),
            octave: nearest.div_euclid(SEMITONES_PER_OCTAVE),
            offset: semitones - nearest as f64,
        }
    }

    /// The canonical tempered pitch: same pitch class and octave, offset 0.
    pub fn remove_offset(&self) -> Pitch {
        Pitch::new(self.note, self.octave)
    }

    /// Frequency of the k-th partial of a tube whose fundamental is this
    /// pitch. Partial 0 is the fundamental itself; partial k sounds at
    /// (k+1) times the fundamental frequency.
    pub fn harmonic_frequency(&self, partial: u32) -> f64 {
        self.frequency() * (partial as f64 + 1.0)
    }

    /// Physical length in meters of an open tube that sounds this pitch at
    /// the given partial: the half-wavelength of the tube's fundamental,
    /// which lies (partial+1) times below the sounding pitch.
    pub fn tube_length(&self, partial: u32) -> f64 {
        let fundamental_hertz = self.frequency() / (partial as f64 + 1.0);
        SPEED_OF_SOUND / fundamental_hertz / 2.0
    }
}
