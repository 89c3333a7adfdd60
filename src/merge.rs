//! # Merging Pieces
//!
//! Two ways of combining pieces, both implemented on [`Piece`]:
//!
//! - **Overlay**: copy every note of a source piece into the target.
//! - **Append** (add to end): shift a copy of the source past the target's
//!   current length, then overlay it.
//!
//! ## Collisions
//! When the target already holds a note with the same key (start beat, octave,
//! pitch class) the target's note is kept and the source's note is dropped.
//! Neither operation fails on a collision, unlike [`Piece::add_note`].
//!
//! Because the target always wins, overlay is idempotent onto a copy of itself
//! but is not commutative:
//! ```
//! use notegrid::{Piece, PitchClass};
//!
//! let mut a = Piece::new();
//! a.add_note(3, PitchClass::C, 0, 2, 0, 64).unwrap();
//! let mut b = Piece::new();
//! b.add_note(3, PitchClass::C, 0, 5, 0, 64).unwrap();
//!
//! let mut a_over_b = a.clone();
//! a_over_b.overlay(&b);
//! let mut b_over_a = b.clone();
//! b_over_a.overlay(&a);
//! assert_eq!(a_over_b.length(), 2);
//! assert_eq!(b_over_a.length(), 5);
//! ```
//!
//! The source piece is never modified, and the target's title and tempo are
//! left alone.
//!
//! Append fails with `InvalidArgument` when the shifted source would run past
//! [`BEAT_LIMIT`](crate::note::BEAT_LIMIT). The target is then left untouched.

use crate::error::Result;
use crate::piece::Piece;

/// What a merge did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeSummary {
    /// Source notes copied into the target
    pub inserted: usize,
    /// Source notes dropped because the target already had that key
    pub collisions: usize,
}

impl Piece {
    /// Copy every note of `source` whose key is free in `self`.
    pub fn overlay(&mut self, source: &Piece) -> MergeSummary {
        let mut summary = MergeSummary::default();
        for note in source.notes() {
            if self.insert_if_free(*note) {
                summary.inserted += 1;
            } else {
                summary.collisions += 1;
            }
        }
        log::debug!(
            "overlaid \"{}\" onto \"{}\": {} inserted, {} kept from target",
            source.title(),
            self.title(),
            summary.inserted,
            summary.collisions
        );
        summary
    }

    /// Overlay a copy of `source` shifted to start at this piece's current length.
    pub fn add_to_end(&mut self, source: &Piece) -> Result<MergeSummary> {
        if source.is_empty() {
            return Ok(MergeSummary::default());
        }
        let offset = self.length();
        let mut shifted = source.clone();
        shifted.shift(offset)?;
        log::debug!(
            "appending \"{}\" to \"{}\" at beat {}",
            source.title(),
            self.title(),
            offset
        );
        Ok(self.overlay(&shifted))
    }
}
