//! # Note Timeline
//!
//! A [`Piece`] owns the notes of one composition along with its tempo.
//!
//! ## Identity
//! Notes are stored in a `BTreeMap` keyed by [`NoteKey`] (start beat, octave,
//! pitch class). Two notes can never share a key; inserting onto an occupied
//! key fails with `DuplicateNote`. Notes at the same pitch with different
//! starts may still overlap in time.
//!
//! ## Length
//! The length of a piece is one past the last beat any note sounds on:
//! ```text
//! length = 1 + max(note.end)    (0 for an empty piece)
//! ```
//! The text grid has one row per beat in `0..length`.
//!
//! ## Failure
//! Every operation either succeeds or returns an error with the piece left
//! exactly as it was. No note may run past
//! [`BEAT_LIMIT`](crate::note::BEAT_LIMIT), so edits and shifts that would carry
//! one there fail with `InvalidArgument`.
//!
//! ## Related Modules
//! - `merge` - overlay and append, also implemented on `Piece`
//! - `grid` - renders a piece as text
//! - `registry` - manages several pieces by title

use crate::error::{EditorError, Result};
use crate::note::{check_beat, check_duration, BeatState, Note, NoteAtBeat, NoteKey};
use crate::pitch::{duration_from_range, PitchClass};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Piece {
    title: String,
    tempo: u32,
    notes: BTreeMap<NoteKey, Note>,
}

impl Piece {
    /// An untitled, empty piece.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tempo(&self) -> u32 {
        self.tempo
    }

    pub fn set_tempo(&mut self, tempo: u32) {
        self.tempo = tempo;
    }

    /// Add a note.
    ///
    /// # Errors
    /// - `InvalidArgument` for a negative start or instrument, a duration below
    ///   one, or a volume outside 0..=127
    /// - `DuplicateNote` if a note already starts at this pitch and beat
    ///
    /// # Example
    /// ```
    /// use notegrid::{Piece, PitchClass};
    ///
    /// let mut piece = Piece::new();
    /// piece.add_note(3, PitchClass::D, 1, 3, 0, 64).unwrap();
    /// assert_eq!(piece.length(), 4);
    /// assert!(piece.add_note(3, PitchClass::D, 1, 1, 0, 64).is_err());
    /// ```
    pub fn add_note(
        &mut self,
        octave: u32,
        pitch_class: PitchClass,
        start: i64,
        duration: i64,
        instrument: i64,
        volume: i64,
    ) -> Result<()> {
        let note = Note::new(octave, pitch_class, start, duration, instrument, volume)?;
        self.insert(note)
    }

    /// Insert a note, rejecting an occupied key.
    fn insert(&mut self, note: Note) -> Result<()> {
        let key = note.key();
        if self.notes.contains_key(&key) {
            return Err(duplicate(&key));
        }
        log::trace!("adding {} at beat {} for {} beats", key.label(), key.start, note.duration());
        self.notes.insert(key, note);
        Ok(())
    }

    /// Insert a note unless its key is taken. Returns whether it went in.
    pub(crate) fn insert_if_free(&mut self, note: Note) -> bool {
        match self.notes.entry(note.key()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(note);
                true
            }
        }
    }

    /// Remove and return the note starting at the given pitch and beat.
    pub fn remove_note(&mut self, octave: u32, pitch_class: PitchClass, start: i64) -> Result<Note> {
        let key = lookup_key(octave, pitch_class, start)?;
        let note = self.notes.remove(&key).ok_or_else(|| missing(&key))?;
        log::trace!("removed {} at beat {}", key.label(), key.start);
        Ok(note)
    }

    /// Change the pitch class of a note. The octave stays the same.
    pub fn edit_pitch(
        &mut self,
        octave: u32,
        pitch_class: PitchClass,
        start: i64,
        new_pitch_class: PitchClass,
    ) -> Result<()> {
        let key = lookup_key(octave, pitch_class, start)?;
        let note = self.existing(&key)?;
        self.rekey(key, note.with_pitch_class(new_pitch_class))
    }

    /// Move a note to a new start beat, keeping its duration.
    pub fn edit_position(
        &mut self,
        octave: u32,
        pitch_class: PitchClass,
        start: i64,
        new_start: i64,
    ) -> Result<()> {
        let key = lookup_key(octave, pitch_class, start)?;
        let new_start = check_beat(new_start, "start")?;
        let note = self.existing(&key)?;
        self.rekey(key, note.moved_to(new_start)?)
    }

    /// Change the last beat of a note. The start does not move.
    pub fn edit_duration(
        &mut self,
        octave: u32,
        pitch_class: PitchClass,
        start: i64,
        new_end: i64,
    ) -> Result<()> {
        let key = lookup_key(octave, pitch_class, start)?;
        let duration = check_duration(duration_from_range(start, new_end)?)?;
        let note = self.notes.get_mut(&key).ok_or_else(|| missing(&key))?;
        *note = note.with_duration(duration)?;
        log::trace!("{} at beat {} now ends on beat {}", key.label(), key.start, note.end());
        Ok(())
    }

    /// Replace the note at `old` with `note`, whose key may differ.
    fn rekey(&mut self, old: NoteKey, note: Note) -> Result<()> {
        let new = note.key();
        if new != old && self.notes.contains_key(&new) {
            return Err(duplicate(&new));
        }
        self.notes.remove(&old);
        self.notes.insert(new, note);
        log::trace!(
            "moved {} at beat {} to {} at beat {}",
            old.label(),
            old.start,
            new.label(),
            new.start
        );
        Ok(())
    }

    fn existing(&self, key: &NoteKey) -> Result<Note> {
        self.notes.get(key).copied().ok_or_else(|| missing(key))
    }

    /// Every note sounding on `beat`, in key order.
    pub fn notes_at(&self, beat: u64) -> Vec<NoteAtBeat> {
        // Keys sort by start, so nothing past `beat` can cover it.
        self.notes
            .values()
            .take_while(|note| note.start() <= beat)
            .filter(|note| note.covers(beat))
            .map(|note| NoteAtBeat {
                note: *note,
                state: if note.start() == beat {
                    BeatState::Attack
                } else {
                    BeatState::Sustain
                },
            })
            .collect()
    }

    /// One past the last beat any note sounds on.
    pub fn length(&self) -> u64 {
        self.notes.values().map(|note| note.end() + 1).max().unwrap_or(0)
    }

    pub fn notes(&self) -> impl Iterator<Item = &Note> + '_ {
        self.notes.values()
    }

    pub fn all_notes(&self) -> Vec<Note> {
        self.notes.values().copied().collect()
    }

    pub fn note(&self, key: &NoteKey) -> Option<&Note> {
        self.notes.get(key)
    }

    pub fn contains(&self, key: &NoteKey) -> bool {
        self.notes.contains_key(key)
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Move every note `offset` beats later.
    ///
    /// Fails without moving anything when a note would run past
    /// [`BEAT_LIMIT`](crate::note::BEAT_LIMIT).
    pub fn shift(&mut self, offset: u64) -> Result<()> {
        if offset == 0 {
            return Ok(());
        }
        let moved = self
            .notes
            .values()
            .map(|note| note.shifted(offset).map(|moved| (moved.key(), moved)))
            .collect::<Result<BTreeMap<_, _>>>()?;
        self.notes = moved;
        Ok(())
    }
}

fn lookup_key(octave: u32, pitch_class: PitchClass, start: i64) -> Result<NoteKey> {
    let start = u64::try_from(start).map_err(|_| {
        EditorError::NotFound(format!(
            "no note at {} on beat {}",
            pitch_class.label(octave),
            start
        ))
    })?;
    Ok(NoteKey::new(octave, pitch_class, start))
}

fn missing(key: &NoteKey) -> EditorError {
    EditorError::NotFound(format!("no note at {} on beat {}", key.label(), key.start))
}

fn duplicate(key: &NoteKey) -> EditorError {
    EditorError::DuplicateNote {
        pitch: key.label(),
        start: key.start,
    }
}
