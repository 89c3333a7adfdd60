//! Note values and their identity keys.
//!
//! A note is identified inside a piece by its [`NoteKey`]: the start beat
//! together with its octave and pitch class. Duration, instrument and volume
//! are attributes that may change without changing identity.

use crate::error::{EditorError, Result};
use crate::pitch::{midi_number, PitchClass};
use serde::Serialize;

/// Loudest allowed volume.
pub const MAX_VOLUME: i64 = 127;

/// No note may sound at or past this beat, so every end and length fits in an
/// `i64`.
pub const BEAT_LIMIT: u64 = i64::MAX as u64;

/// Identity of a note within a piece.
///
/// Field order gives the ordering used everywhere notes are listed: by start
/// beat, then from low to high pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteKey {
    pub start: u64,
    pub octave: u32,
    pub pitch_class: PitchClass,
}

impl NoteKey {
    pub fn new(octave: u32, pitch_class: PitchClass, start: u64) -> Self {
        Self { start, octave, pitch_class }
    }

    /// Grid label of the pitch, e.g. `D#3`.
    pub fn label(&self) -> String {
        self.pitch_class.label(self.octave)
    }
}

/// A single note.
///
/// Only built through [`Note::new`], so a note always has a duration of at
/// least one beat, a volume of at most 127, and ends before [`BEAT_LIMIT`].
///
/// Fields cannot be set from outside the crate:
/// ```compile_fail
/// use notegrid::{Note, PitchClass};
///
/// let note = Note {
///     octave: 3,
///     pitch_class: PitchClass::D,
///     start: 0,
///     duration: 0,
///     instrument: 0,
///     volume: 200,
/// };
/// ```
///
/// and a piece only takes new notes through `add_note`:
/// ```compile_fail
/// use notegrid::{Note, Piece, PitchClass};
///
/// let note = Note::new(3, PitchClass::D, 0, 1, 0, 64).unwrap();
/// Piece::new().insert(note).unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    octave: u32,
    pitch_class: PitchClass,
    start: u64,
    duration: u64,
    instrument: u32,
    volume: u8,
}

/// Check that a beat number is not negative.
pub(crate) fn check_beat(value: i64, what: &str) -> Result<u64> {
    u64::try_from(value)
        .map_err(|_| EditorError::InvalidArgument(format!("{} cannot be negative: {}", what, value)))
}

/// Check that a duration is at least one beat.
pub(crate) fn check_duration(value: i64) -> Result<u64> {
    if value <= 0 {
        return Err(EditorError::InvalidArgument(format!(
            "duration must be positive, got {}",
            value
        )));
    }
    Ok(value as u64)
}

/// Check that a note from `start` lasting `duration` beats ends before
/// [`BEAT_LIMIT`].
pub(crate) fn check_span(start: u64, duration: u64) -> Result<()> {
    match start.checked_add(duration) {
        Some(past_end) if past_end <= BEAT_LIMIT => Ok(()),
        _ => Err(EditorError::InvalidArgument(format!(
            "a note from beat {} lasting {} beats runs past the last beat",
            start, duration
        ))),
    }
}

impl Note {
    /// Build a validated note.
    ///
    /// Fails with `InvalidArgument` for a negative start, a duration below one,
    /// a note running past [`BEAT_LIMIT`], a negative instrument, or a volume
    /// outside 0..=127.
    pub fn new(
        octave: u32,
        pitch_class: PitchClass,
        start: i64,
        duration: i64,
        instrument: i64,
        volume: i64,
    ) -> Result<Self> {
        let start = check_beat(start, "start")?;
        let duration = check_duration(duration)?;
        check_span(start, duration)?;
        let instrument = u32::try_from(instrument).map_err(|_| {
            EditorError::InvalidArgument(format!("instrument {} does not exist", instrument))
        })?;
        if !(0..=MAX_VOLUME).contains(&volume) {
            return Err(EditorError::InvalidArgument(format!(
                "volume must be between 0 and {} (inclusive), got {}",
                MAX_VOLUME, volume
            )));
        }
        Ok(Self {
            octave,
            pitch_class,
            start,
            duration,
            instrument,
            volume: volume as u8,
        })
    }

    pub fn octave(&self) -> u32 {
        self.octave
    }

    pub fn pitch_class(&self) -> PitchClass {
        self.pitch_class
    }

    /// First beat the note sounds on.
    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// Instrument number, not interpreted here.
    pub fn instrument(&self) -> u32 {
        self.instrument
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn key(&self) -> NoteKey {
        NoteKey::new(self.octave, self.pitch_class, self.start)
    }

    /// Last beat the note sounds on.
    pub fn end(&self) -> u64 {
        self.start + self.duration - 1
    }

    pub fn midi_number(&self) -> u64 {
        midi_number(self.octave, self.pitch_class)
    }

    pub fn covers(&self, beat: u64) -> bool {
        self.start <= beat && beat <= self.end()
    }

    /// The same note moved `offset` beats later.
    pub fn shifted(&self, offset: u64) -> Result<Self> {
        let start = self.start.checked_add(offset).ok_or_else(|| {
            EditorError::InvalidArgument(format!(
                "cannot move beat {} by {} beats",
                self.start, offset
            ))
        })?;
        self.moved_to(start)
    }

    /// The same note starting on `start`.
    pub(crate) fn moved_to(&self, start: u64) -> Result<Self> {
        check_span(start, self.duration)?;
        Ok(Self { start, ..*self })
    }

    pub(crate) fn with_pitch_class(&self, pitch_class: PitchClass) -> Self {
        Self { pitch_class, ..*self }
    }

    pub(crate) fn with_duration(&self, duration: u64) -> Result<Self> {
        check_span(self.start, duration)?;
        Ok(Self { duration, ..*self })
    }
}

/// Whether a note begins on a beat or is held through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BeatState {
    /// The note starts on this beat
    Attack,
    /// The note started earlier and is still sounding
    Sustain,
}

/// A note sounding at a queried beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NoteAtBeat {
    pub note: Note,
    pub state: BeatState,
}
