//! # Piece Registry
//!
//! A workspace of titled pieces with at most one of them open.
//!
//! ## Ordering
//! Pieces are kept most recently created first. `create` and `copy` both put
//! the new piece at the front and open it.
//!
//! ## The open piece
//! The registry remembers the open piece by title. All note operations act on
//! the open piece and fail with `NoOpenPiece` when nothing is open. Closing only
//! clears the open title; the piece stays in the registry.
//!
//! ## MIDI numbers
//! Note operations here take MIDI numbers (0-127) and convert them to
//! `(octave, pitch class)` before reaching the [`Piece`]. Beat ranges are
//! inclusive: a note from beat 1 to beat 3 lasts three beats.
//!
//! ## Example
//! ```rust
//! use notegrid::PieceRegistry;
//!
//! let mut registry = PieceRegistry::new();
//! registry.create("jill")?;
//! registry.create("jack")?;
//! registry.add_note(1, 3, 0, 38, 64)?;
//! registry.open("jill")?;
//! assert_eq!(registry.list(), "   jack\n>  jill\n");
//! # Ok::<(), notegrid::EditorError>(())
//! ```

use crate::error::{EditorError, Result};
use crate::grid::render;
use crate::merge::MergeSummary;
use crate::note::{Note, NoteAtBeat};
use crate::piece::Piece;
use crate::pitch::{duration_from_range, split_midi};

#[derive(Debug, Clone, Default)]
pub struct PieceRegistry {
    pieces: Vec<Piece>,
    open: Option<String>,
}

impl PieceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty piece and open it.
    pub fn create(&mut self, title: &str) -> Result<()> {
        if self.position(title).is_some() {
            return Err(EditorError::DuplicateTitle(title.to_string()));
        }
        self.pieces.insert(0, Piece::with_title(title));
        self.open = Some(title.to_string());
        log::debug!("created piece \"{}\"", title);
        Ok(())
    }

    pub fn open(&mut self, title: &str) -> Result<()> {
        if self.position(title).is_none() {
            return Err(missing_piece(title));
        }
        self.open = Some(title.to_string());
        log::debug!("opened piece \"{}\"", title);
        Ok(())
    }

    /// Deep copy `source` under `new_title` and open the copy.
    pub fn copy(&mut self, source: &str, new_title: &str) -> Result<()> {
        let original = self.piece(source).ok_or_else(|| missing_piece(source))?;
        if self.position(new_title).is_some() {
            return Err(EditorError::DuplicateTitle(new_title.to_string()));
        }
        let mut copy = Piece::with_title(new_title);
        copy.set_tempo(original.tempo());
        copy.overlay(original);
        self.pieces.insert(0, copy);
        self.open = Some(new_title.to_string());
        log::debug!("copied piece \"{}\" to \"{}\"", source, new_title);
        Ok(())
    }

    pub fn close(&mut self) -> Result<()> {
        let title = self.open.take().ok_or(EditorError::NoOpenPiece)?;
        log::debug!("closed piece \"{}\"", title);
        Ok(())
    }

    /// One line per piece, most recent first, with `>` marking the open one.
    ///
    /// ```text
    ///    you
    /// >  are
    ///    how
    /// ```
    pub fn list(&self) -> String {
        let mut text = String::new();
        for piece in &self.pieces {
            if self.open.as_deref() == Some(piece.title()) {
                text.push_str(">  ");
            } else {
                text.push_str("   ");
            }
            text.push_str(piece.title());
            text.push('\n');
        }
        text
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> + '_ {
        self.pieces.iter().map(|piece| piece.title())
    }

    pub fn piece(&self, title: &str) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.title() == title)
    }

    pub fn open_title(&self) -> Option<&str> {
        self.open.as_deref()
    }

    pub fn open_piece(&self) -> Result<&Piece> {
        let title = self.open.as_deref().ok_or(EditorError::NoOpenPiece)?;
        self.piece(title).ok_or_else(|| missing_piece(title))
    }

    fn open_piece_mut(&mut self) -> Result<&mut Piece> {
        let title = self.open.as_deref().ok_or(EditorError::NoOpenPiece)?;
        let index = self.position(title).ok_or_else(|| missing_piece(title))?;
        Ok(&mut self.pieces[index])
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.pieces.iter().position(|piece| piece.title() == title)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Grid text of the open piece.
    pub fn view(&self) -> Result<String> {
        Ok(render(self.open_piece()?))
    }

    /// Add a note from `start` to `end` inclusive at a MIDI pitch.
    pub fn add_note(
        &mut self,
        start: i64,
        end: i64,
        instrument: i64,
        pitch: i64,
        volume: i64,
    ) -> Result<()> {
        let piece = self.open_piece_mut()?;
        let (octave, class) = split_midi(pitch)?;
        let duration = duration_from_range(start, end)?;
        piece.add_note(octave, class, start, duration, instrument, volume)
    }

    pub fn remove_note(&mut self, start: i64, pitch: i64) -> Result<Note> {
        let piece = self.open_piece_mut()?;
        let (octave, class) = split_midi(pitch)?;
        piece.remove_note(octave, class, start)
    }

    /// Change a note's pitch within its octave.
    ///
    /// Fails with `InvalidArgument` when `edited_pitch` is in another octave.
    pub fn edit_note_pitch(&mut self, start: i64, pitch: i64, edited_pitch: i64) -> Result<()> {
        let piece = self.open_piece_mut()?;
        let (octave, class) = split_midi(pitch)?;
        let (edited_octave, edited_class) = split_midi(edited_pitch)?;
        if octave != edited_octave {
            return Err(EditorError::InvalidArgument(
                "cannot edit octave, only pitch".to_string(),
            ));
        }
        piece.edit_pitch(octave, class, start, edited_class)
    }

    pub fn edit_note_position(&mut self, start: i64, pitch: i64, edited_start: i64) -> Result<()> {
        let piece = self.open_piece_mut()?;
        let (octave, class) = split_midi(pitch)?;
        piece.edit_position(octave, class, start, edited_start)
    }

    /// Change the last beat of a note.
    pub fn edit_note_duration(&mut self, start: i64, pitch: i64, edited_end: i64) -> Result<()> {
        let piece = self.open_piece_mut()?;
        let (octave, class) = split_midi(pitch)?;
        piece.edit_duration(octave, class, start, edited_end)
    }

    pub fn set_tempo(&mut self, tempo: u32) -> Result<()> {
        self.open_piece_mut()?.set_tempo(tempo);
        Ok(())
    }

    pub fn tempo(&self) -> Result<u32> {
        Ok(self.open_piece()?.tempo())
    }

    pub fn length(&self) -> Result<u64> {
        Ok(self.open_piece()?.length())
    }

    pub fn notes(&self) -> Result<Vec<Note>> {
        Ok(self.open_piece()?.all_notes())
    }

    pub fn notes_at(&self, beat: u64) -> Result<Vec<NoteAtBeat>> {
        Ok(self.open_piece()?.notes_at(beat))
    }

    /// Overlay the piece titled `title` onto the open piece.
    pub fn overlay(&mut self, title: &str) -> Result<MergeSummary> {
        let source = self.source_copy(title)?;
        Ok(self.open_piece_mut()?.overlay(&source))
    }

    /// Append the piece titled `title` after the end of the open piece.
    pub fn add_to_end(&mut self, title: &str) -> Result<MergeSummary> {
        let source = self.source_copy(title)?;
        self.open_piece_mut()?.add_to_end(&source)
    }

    /// Snapshot of a merge source, so the open piece may merge with itself.
    fn source_copy(&self, title: &str) -> Result<Piece> {
        self.open_piece()?;
        self.piece(title).cloned().ok_or_else(|| missing_piece(title))
    }
}

fn missing_piece(title: &str) -> EditorError {
    EditorError::NotFound(format!("there is no piece titled \"{}\"", title))
}
