//! Grid display settings.
//!
//! Everything here has a default, so a piece file only needs to mention the
//! settings it changes:
//! ```yaml
//! grid:
//!   attack: "o"
//! ```

use crate::error::{EditorError, Result};
use serde::Deserialize;

/// Glyphs used for note cells in the text grid.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Drawn on the beat a note starts
    pub attack: char,
    /// Drawn on every later beat the note is held
    pub sustain: char,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            attack: 'X',
            sustain: '|',
        }
    }
}

impl GridConfig {
    /// Glyphs must be visible characters so columns stay readable.
    pub fn validate(&self) -> Result<()> {
        for (name, glyph) in [("attack", self.attack), ("sustain", self.sustain)] {
            if glyph.is_whitespace() || glyph.is_control() {
                return Err(EditorError::PieceFile(format!(
                    "{} glyph must be a visible character, got {:?}",
                    name, glyph
                )));
            }
        }
        Ok(())
    }
}
