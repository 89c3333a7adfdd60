//! Integration tests for notegrid
//!
//! Builds pieces through the public API and checks the rendered grids.

use notegrid::{
    load_piece, render, EditorError, MergeSummary, Piece, PieceFile, PieceRegistry, PitchClass,
};

fn piece(notes: &[(u32, PitchClass, i64, i64)]) -> Piece {
    let mut piece = Piece::new();
    for &(octave, class, start, duration) in notes {
        piece.add_note(octave, class, start, duration, 0, 64).unwrap();
    }
    piece
}

#[test]
fn test_overlapping_notes_grid() {
    let piece = piece(&[
        (3, PitchClass::D, 1, 3),
        (3, PitchClass::C, 2, 4),
        (3, PitchClass::DSharp, 4, 6),
        (3, PitchClass::DSharp, 6, 2),
    ]);
    let expected = concat!(
        "     C3  C#3   D3  D#3 \n",
        "0                      \n",
        "1              X       \n",
        "2    X         |       \n",
        "3    |         |       \n",
        "4    |              X  \n",
        "5    |              |  \n",
        "6                   X  \n",
        "7                   |  \n",
        "8                   |  \n",
        "9                   |  \n",
    );
    assert_eq!(render(&piece), expected);
}

#[test]
fn test_row_labels_right_aligned() {
    let piece = piece(&[
        (3, PitchClass::D, 1, 3),
        (3, PitchClass::C, 2, 4),
        (3, PitchClass::DSharp, 4, 6),
        (3, PitchClass::DSharp, 6, 2),
        (3, PitchClass::DSharp, 8, 4),
    ]);
    let expected = concat!(
        "      C3  C#3   D3  D#3 \n",
        " 0                      \n",
        " 1              X       \n",
        " 2    X         |       \n",
        " 3    |         |       \n",
        " 4    |              X  \n",
        " 5    |              |  \n",
        " 6                   X  \n",
        " 7                   |  \n",
        " 8                   X  \n",
        " 9                   |  \n",
        "10                   |  \n",
        "11                   |  \n",
    );
    assert_eq!(render(&piece), expected);
}

#[test]
fn test_grid_spans_one_octave() {
    let piece = piece(&[
        (3, PitchClass::D, 1, 3),
        (3, PitchClass::C, 2, 8),
        (3, PitchClass::B, 0, 1),
    ]);
    let expected = concat!(
        "     C3  C#3   D3  D#3   E3   F3  F#3   G3  G#3   A3  A#3   B3 \n",
        "0                                                           X  \n",
        "1              X                                               \n",
        "2    X         |                                               \n",
        "3    |         |                                               \n",
        "4    |                                                         \n",
        "5    |                                                         \n",
        "6    |                                                         \n",
        "7    |                                                         \n",
        "8    |                                                         \n",
        "9    |                                                         \n",
    );
    assert_eq!(render(&piece), expected);
}

#[test]
fn test_grid_spans_two_octaves() {
    let piece = piece(&[(3, PitchClass::GSharp, 4, 6), (4, PitchClass::D, 2, 4)]);
    let expected = concat!(
        "    G#3   A3  A#3   B3   C4  C#4   D4 \n",
        "0                                     \n",
        "1                                     \n",
        "2                                  X  \n",
        "3                                  |  \n",
        "4    X                             |  \n",
        "5    |                             |  \n",
        "6    |                                \n",
        "7    |                                \n",
        "8    |                                \n",
        "9    |                                \n",
    );
    assert_eq!(render(&piece), expected);
}

#[test]
fn test_grid_spans_several_octaves() {
    let piece = piece(&[
        (3, PitchClass::GSharp, 4, 6),
        (4, PitchClass::D, 2, 4),
        (2, PitchClass::B, 4, 5),
        (2, PitchClass::B, 2, 4),
    ]);
    let expected = concat!(
        "     B2   C3  C#3   D3  D#3   E3   F3  F#3   G3  G#3   A3  A#3   B3   C4  C#4   D4 \n",
        "0                                                                                  \n",
        "1                                                                                  \n",
        "2    X                                                                          X  \n",
        "3    |                                                                          |  \n",
        "4    X                                            X                             |  \n",
        "5    |                                            |                             |  \n",
        "6    |                                            |                                \n",
        "7    |                                            |                                \n",
        "8    |                                            |                                \n",
        "9                                                 |                                \n",
    );
    assert_eq!(render(&piece), expected);
}

#[test]
fn test_grid_includes_unused_pitches() {
    let piece = piece(&[
        (4, PitchClass::D, 2, 4),
        (2, PitchClass::B, 4, 5),
        (2, PitchClass::B, 2, 4),
    ]);
    let expected = concat!(
        "     B2   C3  C#3   D3  D#3   E3   F3  F#3   G3  G#3   A3  A#3   B3   C4  C#4   D4 \n",
        "0                                                                                  \n",
        "1                                                                                  \n",
        "2    X                                                                          X  \n",
        "3    |                                                                          |  \n",
        "4    X                                                                          |  \n",
        "5    |                                                                          |  \n",
        "6    |                                                                             \n",
        "7    |                                                                             \n",
        "8    |                                                                             \n",
    );
    assert_eq!(render(&piece), expected);
}

#[test]
fn test_registry_overlay_of_two_pieces() {
    let mut registry = PieceRegistry::new();
    registry.create("top").unwrap();
    // D3 = 38, D#3 = 39, C3 = 36
    registry.add_note(1, 3, 0, 38, 64).unwrap();
    registry.add_note(4, 9, 0, 39, 64).unwrap();
    registry.add_note(8, 11, 0, 39, 64).unwrap();
    let top = concat!(
        "      D3  D#3 \n",
        " 0            \n",
        " 1    X       \n",
        " 2    |       \n",
        " 3    |       \n",
        " 4         X  \n",
        " 5         |  \n",
        " 6         |  \n",
        " 7         |  \n",
        " 8         X  \n",
        " 9         |  \n",
        "10         |  \n",
        "11         |  \n",
    );
    assert_eq!(registry.view().unwrap(), top);

    registry.create("bot").unwrap();
    registry.add_note(6, 9, 0, 39, 64).unwrap();
    registry.add_note(2, 5, 0, 36, 64).unwrap();
    let bot = concat!(
        "     C3  C#3   D3  D#3 \n",
        "0                      \n",
        "1                      \n",
        "2    X                 \n",
        "3    |                 \n",
        "4    |                 \n",
        "5    |                 \n",
        "6                   X  \n",
        "7                   |  \n",
        "8                   |  \n",
        "9                   |  \n",
    );
    assert_eq!(registry.view().unwrap(), bot);

    registry.overlay("top").unwrap();
    let overlay = concat!(
        "      C3  C#3   D3  D#3 \n",
        " 0                      \n",
        " 1              X       \n",
        " 2    X         |       \n",
        " 3    |         |       \n",
        " 4    |              X  \n",
        " 5    |              |  \n",
        " 6                   X  \n",
        " 7                   |  \n",
        " 8                   X  \n",
        " 9                   |  \n",
        "10                   |  \n",
        "11                   |  \n",
    );
    assert_eq!(registry.view().unwrap(), overlay);

    registry.open("top").unwrap();
    assert_eq!(registry.view().unwrap(), top);
}

#[test]
fn test_switching_pieces_keeps_views() {
    let mut registry = PieceRegistry::new();
    registry.create("jill").unwrap();
    registry.create("jack").unwrap();
    registry.add_note(1, 1, 0, 64, 64).unwrap();
    registry.add_note(0, 1, 0, 63, 64).unwrap();
    let jack = "    D#5   E5 \n0    X       \n1    |    X  \n";
    assert_eq!(registry.view().unwrap(), jack);

    registry.open("jill").unwrap();
    registry.add_note(1, 3, 0, 38, 64).unwrap();
    assert_eq!(
        registry.view().unwrap(),
        "     D3 \n0       \n1    X  \n2    |  \n3    |  \n"
    );
    registry.open("jack").unwrap();
    assert_eq!(registry.view().unwrap(), jack);
}

#[test]
fn test_append_length_law() {
    let mut a = piece(&[(3, PitchClass::D, 1, 3), (4, PitchClass::A, 0, 2)]);
    let b = piece(&[(3, PitchClass::C, 0, 5), (3, PitchClass::E, 2, 1)]);
    let before = a.length();
    a.add_to_end(&b).unwrap();
    assert_eq!(a.length(), before + b.length());
    assert_eq!(a.note_count(), 4);
}

#[test]
fn test_overlay_copy_is_idempotent() {
    let mut a = piece(&[(3, PitchClass::D, 1, 3), (4, PitchClass::A, 0, 2)]);
    let before = a.clone();
    let copy = a.clone();
    a.overlay(&copy);
    assert_eq!(a, before);
    assert_eq!(render(&a), render(&before));
}

#[test]
fn test_failed_remove_does_not_change_render() {
    let mut piece = piece(&[(3, PitchClass::D, 1, 3)]);
    let before = render(&piece);
    assert!(matches!(
        piece.remove_note(3, PitchClass::D, 2),
        Err(EditorError::NotFound(_))
    ));
    assert_eq!(render(&piece), before);
}

#[test]
fn test_closed_piece_keeps_listing() {
    let mut registry = PieceRegistry::new();
    registry.create("hey").unwrap();
    registry.add_note(1, 3, 0, 38, 64).unwrap();
    assert_eq!(registry.list(), ">  hey\n");
    registry.close().unwrap();
    assert_eq!(registry.view(), Err(EditorError::NoOpenPiece));
    assert_eq!(registry.list(), "   hey\n");
}

#[test]
fn test_piece_file_into_grid() {
    let source = r#"
title: melody
tempo: 120
notes:
  - { start: 0, end: 3, pitch: 60 }
  - { start: 2, end: 2, pitch: 62, volume: 100 }
"#;
    let mut registry = PieceRegistry::new();
    let file = PieceFile::from_yaml(source).unwrap();
    assert_eq!(file.load_into(&mut registry).unwrap(), "melody");
    assert_eq!(registry.tempo().unwrap(), 120);
    let expected = concat!(
        "     C5  C#5   D5 \n",
        "0    X            \n",
        "1    |            \n",
        "2    |         X  \n",
        "3    |            \n",
    );
    assert_eq!(registry.view().unwrap(), expected);
}

#[test]
fn test_merge_untitled_piece_files() {
    let first = "notes:\n  - { start: 0, end: 1, pitch: 60 }\n";
    let second = "notes:\n  - { start: 0, end: 0, pitch: 62 }\n";
    let (mut base, _) = load_piece(first).unwrap();
    let (other, _) = load_piece(second).unwrap();
    assert_eq!(base.title(), other.title());
    let summary = base.add_to_end(&other).unwrap();
    assert_eq!(summary, MergeSummary { inserted: 1, collisions: 0 });
    assert_eq!(
        render(&base),
        "     C5  C#5   D5 \n0    X            \n1    |            \n2              X  \n"
    );

    let (mut same, _) = load_piece(first).unwrap();
    let (again, _) = load_piece(first).unwrap();
    assert_eq!(same.overlay(&again), MergeSummary { inserted: 0, collisions: 1 });
    assert_eq!(same, again);
}
