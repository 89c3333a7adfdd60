//! # Piece Files
//!
//! Reads pieces from YAML and feeds them into a [`PieceRegistry`] the same way
//! an interactive editor would: `create`, then `set_tempo`, then `add_note` for
//! every note.
//!
//! ## Format
//! ```yaml
//! title: jack
//! tempo: 200000
//! grid:
//!   attack: "X"
//!   sustain: "|"
//! notes:
//!   - { start: 0, end: 1, instrument: 1, pitch: 64, volume: 70 }
//!   - { start: 2, end: 2, pitch: 62 }
//! ```
//!
//! - `end` is the last beat of the note, inclusive.
//! - `pitch` is a MIDI number (0-127).
//! - `instrument` defaults to 1 and `volume` to 64.
//! - `title` defaults to `untitled`, `tempo` to 0 (unset).
//! - `grid` is optional; see [`GridConfig`].

use crate::config::GridConfig;
use crate::error::{EditorError, Result};
use crate::piece::Piece;
use crate::registry::PieceRegistry;
use serde::Deserialize;

const DEFAULT_TITLE: &str = "untitled";
const DEFAULT_INSTRUMENT: i64 = 1;
const DEFAULT_VOLUME: i64 = 64;

/// A note entry as written in a piece file.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RawNote {
    pub start: i64,
    pub end: i64,
    pub pitch: i64,
    #[serde(default = "default_instrument")]
    pub instrument: i64,
    #[serde(default = "default_volume")]
    pub volume: i64,
}

fn default_instrument() -> i64 {
    DEFAULT_INSTRUMENT
}

fn default_volume() -> i64 {
    DEFAULT_VOLUME
}

/// A whole piece file.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PieceFile {
    pub title: Option<String>,
    pub tempo: Option<u32>,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub notes: Vec<RawNote>,
}

impl PieceFile {
    pub fn from_yaml(source: &str) -> Result<Self> {
        let file: PieceFile =
            serde_yaml::from_str(source).map_err(|e| EditorError::PieceFile(e.to_string()))?;
        file.grid.validate()?;
        Ok(file)
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    /// Create this piece in `registry` and fill it. Returns the title used.
    ///
    /// Stops at the first note the registry rejects and reports which entry it
    /// was. The piece created so far stays in the registry.
    pub fn load_into(&self, registry: &mut PieceRegistry) -> Result<String> {
        let title = self.title().to_string();
        registry.create(&title)?;
        if let Some(tempo) = self.tempo {
            registry.set_tempo(tempo)?;
        }
        for (index, note) in self.notes.iter().enumerate() {
            registry
                .add_note(note.start, note.end, note.instrument, note.pitch, note.volume)
                .map_err(|e| {
                    log::warn!("note {} of \"{}\" rejected: {}", index + 1, title, e);
                    e
                })?;
        }
        log::debug!("loaded {} notes into \"{}\"", self.notes.len(), title);
        Ok(title)
    }
}

/// Load a single piece file into a standalone [`Piece`].
///
/// ```
/// use notegrid::{load_piece, render};
///
/// let (piece, grid) = load_piece("notes:\n  - { start: 1, end: 3, pitch: 38 }\n").unwrap();
/// assert_eq!(piece.note_count(), 1);
/// assert_eq!(grid.attack, 'X');
/// assert!(render(&piece).starts_with("     D3 \n"));
/// ```
pub fn load_piece(source: &str) -> Result<(Piece, GridConfig)> {
    let file = PieceFile::from_yaml(source)?;
    let mut registry = PieceRegistry::new();
    let title = file.load_into(&mut registry)?;
    let piece = registry
        .piece(&title)
        .cloned()
        .ok_or_else(|| EditorError::NotFound(format!("there is no piece titled \"{}\"", title)))?;
    Ok((piece, file.grid))
}
