// Instrument configuration: the fundamental pitch at first position and the
// physical slide length in position-units.
//
// The config is immutable and cheap to copy; a single instance can be shared
// across any number of concurrent optimization calls. Presets cover the
// common horns; anything else loads from JSON.

use serde::{Deserialize, Serialize};
use slidepath_pitch::{Note, Pitch};
use std::path::Path;

/// A trombone, as far as the optimizer cares: the pitch its full tube sounds
/// at partial 0 with the slide fully retracted, and how far the slide goes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    /// Lowest natural pitch at slide position 0 (the pedal fundamental).
    pub fundamental: Pitch,
    /// Maximum slide extension in position-units. 6.5 covers the standard
    /// seven positions with a little room past seventh.
    pub slide_length: f64,
}

impl InstrumentConfig {
    pub fn new(fundamental: Pitch, slide_length: f64) -> Self {
        InstrumentConfig {
            fundamental,
            slide_length,
        }
    }

    /// Standard tenor trombone: Bb1 fundamental, seven-position slide.
    pub fn tenor() -> Self {
        InstrumentConfig::new(Pitch::new(Note::Bb, 1), 6.5)
    }

    /// Alto trombone in Eb.
    pub fn alto() -> Self {
        InstrumentConfig::new(Pitch::new(Note::Eb, 2), 6.5)
    }

    /// Load a config from a JSON file.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let config: InstrumentConfig = serde_json::from_str(&data)?;
        Ok(config)
    }

    /// Physical slide extension in meters needed to sound `pitch` at
    /// `partial`: half the difference between the required tube length and
    /// the instrument's closed tube, since the slide adds two parallel
    /// sections of pipe.
    pub fn slide_extension(&self, pitch: Pitch, partial: u32) -> f64 {
        (pitch.tube_length(partial) - self.fundamental.tube_length(0)) / 2.0
    }
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        InstrumentConfig::tenor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn tenor_preset() {
        let tenor = InstrumentConfig::tenor();
        assert_eq!(tenor.fundamental, Pitch::new(Note::Bb, 1));
        assert_relative_eq!(tenor.slide_length, 6.5);
        assert_eq!(InstrumentConfig::default(), tenor);
    }

    #[test]
    fn slide_extension_zero_at_home_position() {
        let tenor = InstrumentConfig::tenor();
        // The fundamental itself needs no extension.
        assert_abs_diff_eq!(
            tenor.slide_extension(tenor.fundamental, 0),
            0.0,
            epsilon = 1e-12
        );
        // Bb2 at partial 1 uses the same closed tube: same fundamental.
        assert_abs_diff_eq!(
            tenor.slide_extension(Pitch::new(Note::Bb, 2), 1),
            0.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn slide_extension_positive_below_natural_pitch() {
        let tenor = InstrumentConfig::tenor();
        // C3 on partial 2 sits well below the natural F3: the tube must grow.
        let extension = tenor.slide_extension(Pitch::new(Note::C, 3), 2);
        assert!(extension > 0.0, "expected positive extension, got {extension}");
        // Sixth-position territory is on the order of half a meter of slide.
        assert!(extension < 1.0, "implausible extension: {extension}");
    }

    #[test]
    fn serde_and_file_round_trip() {
        let config = InstrumentConfig::alto();
        let json = serde_json::to_string(&config).unwrap();
        let back: InstrumentConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);

        let path = std::env::temp_dir().join("slidepath_instrument_test.json");
        std::fs::write(&path, &json).unwrap();
        let loaded = InstrumentConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
