//! Step tables and attack queries.

use chess_core::{Color, Piece, PieceKind, Square};

use crate::Board;

/// Knight jumps as `(row, col)` steps.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// The eight neighbouring squares, also the queen's ray directions.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Ray directions for a sliding piece kind; empty for the others.
pub const fn slide_directions(kind: PieceKind) -> &'static [(i8, i8)] {
    match kind {
        PieceKind::Bishop => &BISHOP_DIRECTIONS,
        PieceKind::Rook => &ROOK_DIRECTIONS,
        PieceKind::Queen => &KING_OFFSETS,
        PieceKind::Pawn | PieceKind::Knight | PieceKind::King => &[],
    }
}

impl Board {
    /// Returns true if any piece of `by` attacks `square`.
    ///
    /// A piece attacks the squares in its attack-only destinations. Pins are
    /// not considered, since pin validation is itself built on this query.
    pub fn is_attacked(&self, square: Square, by: Color) -> bool {
        let mut targets = Vec::with_capacity(32);
        for (from, occupant) in self.squares() {
            let Some(piece) = occupant else { continue };
            if piece.color != by {
                continue;
            }
            targets.clear();
            self.push_destinations(from, piece, true, &mut targets);
            if targets.contains(&square) {
                return true;
            }
        }
        false
    }

    /// Returns the square of `color`'s king, scanning from a8.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceKind::King, color);
        self.squares()
            .find(|&(_, occupant)| occupant == Some(king))
            .map(|(sq, _)| sq)
    }

    /// Returns true if `color`'s king is attacked by the other side.
    ///
    /// # Panics
    ///
    /// Panics if `color` has no king on the board. With more than one king
    /// only the first found from a8 is examined.
    pub fn in_check(&self, color: Color) -> bool {
        let king = self
            .king_square(color)
            .expect("check query on a board without a king of that color");
        self.is_attacked(king, color.opposite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn startpos_attacks() {
        let board = Board::new();
        assert!(board.is_attacked(sq("e3"), Color::White));
        assert!(board.is_attacked(sq("f3"), Color::White));
        assert!(!board.is_attacked(sq("e4"), Color::White));
        assert!(board.is_attacked(sq("c6"), Color::Black));
        assert!(!board.is_attacked(sq("e5"), Color::Black));
    }

    #[test]
    fn startpos_nobody_in_check() {
        let board = Board::new();
        assert!(!board.in_check(Color::White));
        assert!(!board.in_check(Color::Black));
    }

    #[test]
    fn pawn_attacks_empty_diagonals() {
        let board = Board::from_fen("4k3/8/8/8/8/8/4p3/K7 w - - 0 1").unwrap();
        assert!(board.is_attacked(Square::D1, Color::Black));
        assert!(board.is_attacked(Square::F1, Color::Black));
        assert!(!board.is_attacked(Square::E1, Color::Black));
    }

    #[test]
    fn sliders_are_blocked() {
        let board = Board::from_fen("4k3/8/8/8/r2P3K/8/8/8 w - - 0 1").unwrap();
        assert!(board.is_attacked(sq("c4"), Color::Black));
        assert!(board.is_attacked(sq("d4"), Color::Black));
        assert!(!board.is_attacked(sq("e4"), Color::Black));
        assert!(!board.in_check(Color::White));
    }

    #[test]
    fn knight_gives_check() {
        let board = Board::from_fen("4k3/8/3N4/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert!(board.in_check(Color::Black));
        assert!(!board.in_check(Color::White));
    }

    #[test]
    fn king_square_lookup() {
        let board = Board::new();
        assert_eq!(board.king_square(Color::White), Some(Square::E1));
        assert_eq!(board.king_square(Color::Black), Some(Square::E8));
        assert_eq!(Board::empty().king_square(Color::White), None);
    }

    #[test]
    #[should_panic]
    fn in_check_without_king_panics() {
        Board::empty().in_check(Color::White);
    }

    #[test]
    fn slide_direction_tables() {
        assert_eq!(slide_directions(PieceKind::Rook).len(), 4);
        assert_eq!(slide_directions(PieceKind::Bishop).len(), 4);
        assert_eq!(slide_directions(PieceKind::Queen).len(), 8);
        assert!(slide_directions(PieceKind::Knight).is_empty());
    }
}
