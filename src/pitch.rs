//! # Pitch Arithmetic
//!
//! Conversion between MIDI numbers (0-127) and `(octave, pitch class)` pairs.
//!
//! ```text
//! midi   = octave * 12 + pitch_class.index()
//! octave = midi / 12        (MIDI 0 is C0, MIDI 60 is C5)
//! class  = midi % 12
//! ```
//!
//! Octave numbering follows the editor grid, so MIDI 60 labels as `C5`, not the
//! scientific-pitch `C4`.

use crate::error::{EditorError, Result};
use serde::Serialize;
use std::fmt;

/// Number of pitch classes in an octave.
pub const SEMITONES: u32 = 12;

/// Highest valid MIDI number.
pub const MIDI_MAX: i64 = 127;

/// The twelve chromatic pitch classes, in ascending order from C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PitchClass {
    C,
    #[serde(rename = "C#")]
    CSharp,
    D,
    #[serde(rename = "D#")]
    DSharp,
    E,
    F,
    #[serde(rename = "F#")]
    FSharp,
    G,
    #[serde(rename = "G#")]
    GSharp,
    A,
    #[serde(rename = "A#")]
    ASharp,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Semitones above C (C=0, B=11).
    pub fn index(self) -> u32 {
        self as u32
    }

    /// Pitch class for a semitone offset, wrapping every octave.
    pub fn from_index(index: u32) -> Self {
        Self::ALL[(index % SEMITONES) as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }

    /// Grid label for this pitch class in an octave, e.g. `C#3`.
    pub fn label(self, octave: u32) -> String {
        format!("{}{}", self.name(), octave)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn check_midi(midi: i64) -> Result<u32> {
    if !(0..=MIDI_MAX).contains(&midi) {
        return Err(EditorError::OutOfRange(midi));
    }
    Ok(midi as u32)
}

/// Pitch class of a MIDI number.
///
/// ```
/// use notegrid::pitch::{pitch_class_of, PitchClass};
///
/// assert_eq!(pitch_class_of(61).unwrap(), PitchClass::CSharp);
/// assert!(pitch_class_of(128).is_err());
/// ```
pub fn pitch_class_of(midi: i64) -> Result<PitchClass> {
    Ok(PitchClass::from_index(check_midi(midi)?))
}

/// Octave of a MIDI number.
pub fn octave_of(midi: i64) -> Result<u32> {
    Ok(check_midi(midi)? / SEMITONES)
}

/// Both halves of a MIDI number at once.
pub fn split_midi(midi: i64) -> Result<(u32, PitchClass)> {
    let midi = check_midi(midi)?;
    Ok((midi / SEMITONES, PitchClass::from_index(midi)))
}

/// Absolute semitone number of a pitch. Equals the MIDI number whenever the
/// result is 127 or below; larger octaves still order correctly.
pub fn midi_number(octave: u32, pitch_class: PitchClass) -> u64 {
    octave as u64 * SEMITONES as u64 + pitch_class.index() as u64
}

/// Inverse of [`midi_number`] for grid columns.
pub fn from_midi_number(number: u64) -> (u32, PitchClass) {
    let octave = (number / SEMITONES as u64) as u32;
    let class = PitchClass::from_index((number % SEMITONES as u64) as u32);
    (octave, class)
}

/// Duration in beats of the inclusive range `start..=end`.
///
/// `end < start` gives a duration of zero or less, which note construction
/// rejects. Only a range too wide for an `i64` fails here.
///
/// ```
/// use notegrid::pitch::duration_from_range;
///
/// assert_eq!(duration_from_range(1, 3).unwrap(), 3);
/// assert!(duration_from_range(-1, i64::MAX).is_err());
/// ```
pub fn duration_from_range(start: i64, end: i64) -> Result<i64> {
    end.checked_sub(start)
        .and_then(|span| span.checked_add(1))
        .ok_or_else(|| {
            EditorError::InvalidArgument(format!(
                "beats {} to {} are too far apart",
                start, end
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midi_round_trip() {
        for m in 0..=MIDI_MAX {
            let octave = octave_of(m).unwrap();
            let class = pitch_class_of(m).unwrap();
            assert_eq!(midi_number(octave, class), m as u64);
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(split_midi(0).unwrap(), (0, PitchClass::C));
        assert_eq!(split_midi(38).unwrap(), (3, PitchClass::D));
        assert_eq!(split_midi(60).unwrap(), (5, PitchClass::C));
        assert_eq!(split_midi(127).unwrap(), (10, PitchClass::G));
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(pitch_class_of(-1), Err(EditorError::OutOfRange(-1)));
        assert_eq!(octave_of(128), Err(EditorError::OutOfRange(128)));
        assert!(split_midi(1000).is_err());
    }

    #[test]
    fn test_index_wraps() {
        assert_eq!(PitchClass::from_index(12), PitchClass::C);
        assert_eq!(PitchClass::from_index(23), PitchClass::B);
        for class in PitchClass::ALL {
            assert_eq!(PitchClass::from_index(class.index()), class);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(PitchClass::CSharp.label(3), "C#3");
        assert_eq!(PitchClass::G.label(10), "G10");
        assert_eq!(PitchClass::ASharp.to_string(), "A#");
    }

    #[test]
    fn test_serialized_names() {
        assert!(serde_yaml::to_string(&PitchClass::CSharp).unwrap().contains("C#"));
        assert!(serde_yaml::to_string(&PitchClass::ASharp).unwrap().contains("A#"));
    }

    #[test]
    fn test_from_midi_number() {
        assert_eq!(from_midi_number(47), (3, PitchClass::B));
        assert_eq!(from_midi_number(200), (16, PitchClass::GSharp));
    }

    #[test]
    fn test_duration_from_range() {
        assert_eq!(duration_from_range(1, 3), Ok(3));
        assert_eq!(duration_from_range(4, 4), Ok(1));
        assert_eq!(duration_from_range(5, 4), Ok(0));
        assert_eq!(duration_from_range(5, 2), Ok(-2));
    }

    #[test]
    fn test_duration_from_extreme_range() {
        assert_eq!(duration_from_range(0, i64::MAX - 1), Ok(i64::MAX));
        assert_eq!(duration_from_range(i64::MIN, i64::MIN), Ok(1));
        for (start, end) in [
            (-1, i64::MAX),
            (0, i64::MAX),
            (1, i64::MIN),
            (i64::MAX, i64::MIN),
            (i64::MIN, i64::MAX),
        ] {
            assert!(matches!(
                duration_from_range(start, end),
                Err(EditorError::InvalidArgument(_))
            ));
        }
    }
}
