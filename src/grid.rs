//! # Text Grid Rendering
//!
//! Renders a [`Piece`] as a beat-by-pitch text grid.
//!
//! ## Layout
//! ```text
//!       C3  C#3   D3  D#3      <- one column per semitone, lowest to highest
//!  0                           <- one row per beat, labels right-aligned
//!  1              X            <- X: a note starts here
//!  2    X         |            <- |: a note is held through this beat
//! ```
//!
//! - Columns cover every semitone between the lowest and highest pitch used,
//!   including pitches no note uses.
//! - Rows run from beat 0 to the last beat any note sounds on.
//! - Every column is `max(4, longest label) + 1` characters wide. Headers are
//!   right-aligned in it; a cell glyph sits one character in from the right.
//! - Every line ends with one extra space and a newline, so all lines have the
//!   same width.
//! - A start always wins over a held note at the same pitch and beat.
//!
//! An empty piece renders as an empty string.

use crate::config::GridConfig;
use crate::pitch::from_midi_number;
use crate::piece::Piece;
use std::fmt;

/// Columns are never narrower than this, plus one separating space.
const MIN_LABEL_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Attack,
    Sustain,
}

/// Render with the default `X` and `|` glyphs.
///
/// ```
/// use notegrid::{render, Piece, PitchClass};
///
/// let mut piece = Piece::new();
/// piece.add_note(3, PitchClass::D, 1, 3, 0, 64).unwrap();
/// assert_eq!(
///     render(&piece),
///     "     D3 \n0       \n1    X  \n2    |  \n3    |  \n"
/// );
/// ```
pub fn render(piece: &Piece) -> String {
    render_with(piece, &GridConfig::default())
}

/// Render with custom glyphs.
pub fn render_with(piece: &Piece, config: &GridConfig) -> String {
    let Some((low, high)) = pitch_range(piece) else {
        return String::new();
    };

    let labels: Vec<String> = (low..=high)
        .map(|number| {
            let (octave, class) = from_midi_number(number);
            class.label(octave)
        })
        .collect();
    let column_width = labels
        .iter()
        .map(|label| label.len())
        .max()
        .unwrap_or(0)
        .max(MIN_LABEL_WIDTH)
        + 1;

    let length = piece.length();
    let label_width = (length - 1).to_string().len();
    let cells = fill_cells(piece, low, labels.len(), length as usize);

    let mut text = String::new();

    // Header row
    text.push_str(&" ".repeat(label_width + 1));
    for label in &labels {
        text.push_str(&format!("{:>width$}", label, width = column_width));
    }
    text.push_str(" \n");

    for (beat, row) in cells.iter().enumerate() {
        text.push_str(&format!("{:>width$} ", beat, width = label_width));
        for cell in row {
            let glyph = match cell {
                Cell::Empty => ' ',
                Cell::Attack => config.attack,
                Cell::Sustain => config.sustain,
            };
            text.push_str(&format!("{:>width$} ", glyph, width = column_width - 1));
        }
        text.push_str(" \n");
    }

    text
}

/// Lowest and highest semitone used by any note.
fn pitch_range(piece: &Piece) -> Option<(u64, u64)> {
    let mut numbers = piece.notes().map(|note| note.midi_number());
    let first = numbers.next()?;
    Some(numbers.fold((first, first), |(low, high), n| (low.min(n), high.max(n))))
}

/// `rows[beat][column]`, with attacks overriding sustains.
fn fill_cells(piece: &Piece, low: u64, columns: usize, rows: usize) -> Vec<Vec<Cell>> {
    let mut cells = vec![vec![Cell::Empty; columns]; rows];
    for note in piece.notes() {
        let column = (note.midi_number() - low) as usize;
        let start = note.start() as usize;
        cells[start][column] = Cell::Attack;
        for row in cells.iter_mut().take(note.end() as usize + 1).skip(start + 1) {
            if row[column] == Cell::Empty {
                row[column] = Cell::Sustain;
            }
        }
    }
    cells
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}
