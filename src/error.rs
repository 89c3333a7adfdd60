//! # Error Types
//!
//! This module defines all error types for the note editor core.
//!
//! Every failure is local and synchronous: the caller has to fix the request
//! and try again. An operation that returns an error has not changed any state.
//!
//! ## Error Types
//! - `InvalidArgument` - Malformed numeric input (negative beat, zero duration, bad volume)
//! - `OutOfRange` - A MIDI number outside 0..=127
//! - `DuplicateNote` - A note already occupies the (octave, pitch class, start) key
//! - `DuplicateTitle` - A piece with that title is already in the registry
//! - `NotFound` - Missing note or piece
//! - `NoOpenPiece` - The registry has no open piece
//! - `PieceFile` - A YAML piece file could not be read
//!
//! ## Usage
//! ```rust
//! use notegrid::{EditorError, PieceRegistry};
//!
//! let mut registry = PieceRegistry::new();
//! match registry.add_note(0, 3, 1, 60, 64) {
//!     Ok(()) => unreachable!(),
//!     Err(EditorError::NoOpenPiece) => eprintln!("open a piece first"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// Malformed numeric input.
    ///
    /// # Example
    /// ```
    /// # use notegrid::EditorError;
    /// let err = EditorError::InvalidArgument("duration must be positive".to_string());
    /// assert_eq!(err.to_string(), "Invalid argument: duration must be positive");
    /// ```
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// MIDI number outside 0..=127.
    ///
    /// # Example
    /// ```
    /// # use notegrid::EditorError;
    /// let err = EditorError::OutOfRange(128);
    /// assert_eq!(err.to_string(), "MIDI number 128 is outside 0..=127");
    /// ```
    #[error("MIDI number {0} is outside 0..=127")]
    OutOfRange(i64),

    /// A note already exists at the target key.
    ///
    /// # Example
    /// ```
    /// # use notegrid::EditorError;
    /// let err = EditorError::DuplicateNote { pitch: "D3".to_string(), start: 1 };
    /// assert_eq!(err.to_string(), "A note already exists at D3 on beat 1");
    /// ```
    #[error("A note already exists at {pitch} on beat {start}")]
    DuplicateNote { pitch: String, start: u64 },

    #[error("A piece titled \"{0}\" already exists")]
    DuplicateTitle(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("There is no piece currently open")]
    NoOpenPiece,

    /// Invalid YAML piece file.
    #[error("Invalid piece file: {0}")]
    PieceFile(String),
}

pub type Result<T> = std::result::Result<T, EditorError>;
