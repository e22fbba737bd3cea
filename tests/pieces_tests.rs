//! Piece catalog and rotation tests

use tetrecs::core::pieces::{self, base_pattern, rotate_pattern_cw};
use tetrecs::core::{GameError, Piece};
use tetrecs::types::{PieceKind, Rotation, PIECE_COUNT};

#[test]
fn test_create_every_id() {
    for id in 0..PIECE_COUNT {
        let piece = pieces::create(id).unwrap();
        assert_eq!(piece.kind.id(), id);
        assert_eq!(piece.rotation, Rotation::North);
        assert_eq!(piece.value(), id + 1);
    }
}

#[test]
fn test_create_unknown_id() {
    assert_eq!(pieces::create(PIECE_COUNT), Err(GameError::UnknownPiece(15)));
    assert_eq!(pieces::create(255), Err(GameError::UnknownPiece(255)));
}

#[test]
fn test_four_turns_is_identity() {
    for kind in PieceKind::ALL {
        let piece = Piece::new(kind);
        let turned = pieces::rotate(piece, 4);
        assert_eq!(turned, piece);
        assert_eq!(turned.pattern(), piece.pattern(), "{:?}", kind);
    }
}

#[test]
fn test_negative_steps_turn_counter_clockwise() {
    for kind in PieceKind::ALL {
        let piece = Piece::new(kind);
        assert_eq!(piece.rotate(-1).pattern(), piece.rotate(3).pattern());
        assert_eq!(piece.rotate(-2).pattern(), piece.rotate(2).pattern());
        assert_eq!(piece.rotate(1).rotate(-1), piece);
    }
}

#[test]
fn test_rotation_preserves_block_count_and_centre() {
    for kind in PieceKind::ALL {
        let base = Piece::new(kind);
        for steps in 0..4 {
            let piece = base.rotate(steps);
            assert_eq!(piece.block_count(), base.block_count(), "{:?} x{}", kind, steps);
            assert!(piece.pattern()[1][1], "{:?} x{} lost its centre", kind, steps);
        }
    }
}

#[test]
fn test_rotation_does_not_mutate_input() {
    let piece = Piece::new(PieceKind::L);
    let before = piece.pattern();
    let _ = piece.rotate(1);
    assert_eq!(piece.pattern(), before);
    assert_eq!(piece.rotation, Rotation::North);
}

#[test]
fn test_line_turns_horizontal() {
    let line = Piece::new(PieceKind::Line).rotate(1);
    assert_eq!(line.cells().as_slice(), &[(0, 1), (1, 1), (2, 1)]);
}

#[test]
fn test_symmetric_shapes_are_rotation_invariant() {
    for kind in [PieceKind::Plus, PieceKind::Dot, PieceKind::X] {
        let pattern = base_pattern(kind);
        assert_eq!(rotate_pattern_cw(&pattern), pattern, "{:?}", kind);
    }
}

#[test]
fn test_square_rotates_around_centre() {
    // The 2x2 block sits in the top-left quadrant and moves one quadrant
    // clockwise per turn
    let square = Piece::new(PieceKind::Square);
    assert_eq!(square.cells().as_slice(), &[(0, 0), (1, 0), (0, 1), (1, 1)]);
    assert_eq!(
        square.rotate(1).cells().as_slice(),
        &[(1, 0), (2, 0), (1, 1), (2, 1)]
    );
    assert_eq!(
        square.rotate(2).cells().as_slice(),
        &[(1, 1), (2, 1), (1, 2), (2, 2)]
    );
}

#[test]
fn test_block_counts() {
    let counts: Vec<usize> = PieceKind::ALL
        .iter()
        .map(|&kind| Piece::new(kind).block_count())
        .collect();
    assert_eq!(counts, vec![3, 5, 5, 1, 4, 4, 4, 4, 4, 4, 5, 3, 3, 3, 2]);
}
