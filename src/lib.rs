//! # notegrid
//!
//! The model of a small music editor: pieces made of notes on a beat timeline,
//! merged by overlay or concatenation and drawn as a text grid.
//!
//! ## Modules
//! - `pitch` - MIDI numbers, pitch classes and octaves
//! - `note` - validated notes and their identity keys
//! - `piece` - a single timeline of notes with a tempo
//! - `merge` - overlay and append
//! - `grid` - text rendering
//! - `registry` - several titled pieces, one of them open
//! - `config` - grid glyphs
//! - `loader` - YAML piece files
//!
//! ## Example
//! ```rust
//! use notegrid::PieceRegistry;
//!
//! let mut registry = PieceRegistry::new();
//! registry.create("hello")?;
//! registry.add_note(1, 3, 0, 38, 64)?; // D3 from beat 1 to beat 3
//! assert_eq!(registry.view()?, "     D3 \n0       \n1    X  \n2    |  \n3    |  \n");
//! # Ok::<(), notegrid::EditorError>(())
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod loader;
pub mod merge;
pub mod note;
pub mod piece;
pub mod pitch;
pub mod registry;

pub use config::GridConfig;
pub use error::*;
pub use grid::{render, render_with};
pub use loader::{load_piece, PieceFile};
pub use merge::MergeSummary;
pub use note::{BeatState, Note, NoteAtBeat, NoteKey};
pub use piece::Piece;
pub use pitch::PitchClass;
pub use registry::PieceRegistry;
