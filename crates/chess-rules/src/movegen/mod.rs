//! Move generation.
//!
//! Destinations are produced per square by walking the piece's step or ray
//! table over the grid. Legality against self-check is decided by probing:
//! the move is played on a scratch copy of the board, the mover's king is
//! tested for attack, and the touched squares are restored.

mod attacks;
pub mod perft;

use std::collections::HashMap;

use chess_core::{Color, Move, Piece, PieceKind, Square};

use crate::Board;

pub use attacks::{
    slide_directions, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS,
};

/// Every occupied square mapped to its piece and destinations.
pub type MoveMap = HashMap<Square, (Piece, Vec<Square>)>;

impl Board {
    /// Returns the destinations of the piece on `square`.
    ///
    /// With `attack_only`, pawn advances and castling are left out and a
    /// pawn reports both forward diagonals, empty or not: the result is the
    /// set of squares the piece attacks. With `validate_pin`, destinations
    /// that would leave the mover's own king attacked are removed.
    ///
    /// Returns an empty list for an empty square.
    pub fn pseudo_legal_moves(
        &self,
        square: Square,
        attack_only: bool,
        validate_pin: bool,
    ) -> Vec<Square> {
        let Some(piece) = self.piece_at(square) else {
            return Vec::new();
        };

        let mut moves = Vec::with_capacity(28);
        self.push_destinations(square, piece, attack_only, &mut moves);

        if validate_pin {
            let mut probe = self.clone();
            moves.retain(|&to| !probe.exposes_king(square, to));
        }
        moves
    }

    /// Runs [`Board::pseudo_legal_moves`] for every occupied square.
    pub fn all_pseudo_legal_moves(&self, attack_only: bool, validate_pins: bool) -> MoveMap {
        self.squares()
            .filter_map(|(sq, occupant)| {
                occupant.map(|piece| {
                    (
                        sq,
                        (piece, self.pseudo_legal_moves(sq, attack_only, validate_pins)),
                    )
                })
            })
            .collect()
    }

    /// Lists every legal move for the side to move.
    ///
    /// A pawn move onto the last row appears once per promotion kind.
    pub fn legal_moves(&self) -> Vec<Move> {
        let us = self.side_to_move;
        let mut moves = Vec::new();
        for (from, occupant) in self.squares() {
            let Some(piece) = occupant.filter(|p| p.color == us) else {
                continue;
            };
            for to in self.pseudo_legal_moves(from, false, true) {
                if piece.kind == PieceKind::Pawn && to.row() == us.promotion_row() {
                    moves.extend(
                        PieceKind::PROMOTIONS
                            .iter()
                            .filter_map(|&kind| Move::from_squares(from, to, Some(kind)).ok()),
                    );
                } else {
                    moves.push(Move::normal(from, to));
                }
            }
        }
        moves
    }

    pub(crate) fn push_destinations(
        &self,
        from: Square,
        piece: Piece,
        attack_only: bool,
        out: &mut Vec<Square>,
    ) {
        match piece.kind {
            PieceKind::Pawn => self.pawn_destinations(from, piece.color, attack_only, out),
            PieceKind::Knight => self.step_destinations(from, piece.color, &KNIGHT_OFFSETS, out),
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                self.ray_destinations(from, piece.color, slide_directions(piece.kind), out)
            }
            PieceKind::King => {
                self.step_destinations(from, piece.color, &KING_OFFSETS, out);
                if !attack_only {
                    self.castling_destinations(from, piece.color, out);
                }
            }
        }
    }

    fn pawn_destinations(
        &self,
        from: Square,
        us: Color,
        attack_only: bool,
        out: &mut Vec<Square>,
    ) {
        let dir = us.pawn_direction();

        if !attack_only {
            let empty = |sq: &Square| self.piece_at(*sq).is_none();
            if let Some(one) = from.offset(dir, 0).filter(empty) {
                out.push(one);
                if from.row() == us.pawn_start_row() {
                    out.extend(from.offset(2 * dir, 0).filter(empty));
                }
            }
        }

        // The opponent's skipped square sits one row past their pawn start row
        let them = us.opposite();
        let en_passant = self.en_passant.filter(|sq| {
            sq.row() as i8 == them.pawn_start_row() as i8 + them.pawn_direction()
        });

        for dc in [-1, 1] {
            let Some(to) = from.offset(dir, dc) else { continue };
            match self.piece_at(to) {
                Some(target) if target.color != us => out.push(to),
                Some(_) => {}
                None if attack_only || en_passant == Some(to) => out.push(to),
                None => {}
            }
        }
    }

    fn step_destinations(
        &self,
        from: Square,
        us: Color,
        offsets: &[(i8, i8)],
        out: &mut Vec<Square>,
    ) {
        for &(dr, dc) in offsets {
            if let Some(to) = from.offset(dr, dc) {
                if self.piece_at(to).map_or(true, |p| p.color != us) {
                    out.push(to);
                }
            }
        }
    }

    fn ray_destinations(
        &self,
        from: Square,
        us: Color,
        directions: &[(i8, i8)],
        out: &mut Vec<Square>,
    ) {
        for &(dr, dc) in directions {
            let mut current = from;
            while let Some(to) = current.offset(dr, dc) {
                match self.piece_at(to) {
                    None => out.push(to),
                    Some(p) if p.color != us => {
                        out.push(to);
                        break;
                    }
                    Some(_) => break,
                }
                current = to;
            }
        }
    }

    /// Adds the king's two-square castling moves.
    ///
    /// Requires the king on its home square with the matching right, the
    /// squares up to the rook empty, the rook at home, and neither the
    /// king's square nor the square it crosses attacked. Whether the landing
    /// square is attacked is left to pin validation.
    fn castling_destinations(&self, from: Square, us: Color, out: &mut Vec<Square>) {
        let row = us.home_row();
        if from.row() != row || from.col() != 4 {
            return;
        }

        let them = us.opposite();
        let rook = Some(Piece::new(PieceKind::Rook, us));

        let kingside = self.castling.can_castle_kingside(us)
            && self.row_empty(row, &[5, 6])
            && self.piece_on(row, 7) == rook
            && self.row_safe(row, &[4, 5], them);
        if kingside {
            out.extend(Square::new(row, 6));
        }

        let queenside = self.castling.can_castle_queenside(us)
            && self.row_empty(row, &[1, 2, 3])
            && self.piece_on(row, 0) == rook
            && self.row_safe(row, &[4, 3], them);
        if queenside {
            out.extend(Square::new(row, 2));
        }
    }

    fn piece_on(&self, row: u8, col: u8) -> Option<Piece> {
        Square::new(row, col).and_then(|sq| self.piece_at(sq))
    }

    fn row_empty(&self, row: u8, cols: &[u8]) -> bool {
        cols.iter().all(|&col| self.piece_on(row, col).is_none())
    }

    fn row_safe(&self, row: u8, cols: &[u8], them: Color) -> bool {
        cols.iter()
            .filter_map(|&col| Square::new(row, col))
            .all(|sq| !self.is_attacked(sq, them))
    }

    /// Plays `from -> to` on this scratch board, reports whether the mover's
    /// king is then attacked, and puts every touched square back.
    fn exposes_king(&mut self, from: Square, to: Square) -> bool {
        let Some(piece) = self.piece_at(from) else {
            return false;
        };

        let passed = if piece.kind == PieceKind::Pawn
            && from.col() != to.col()
            && self.piece_at(to).is_none()
            && self.en_passant == Some(to)
        {
            Square::new(from.row(), to.col())
        } else {
            None
        };

        let saved_to = self.piece_at(to);
        let saved_passed = passed.map(|sq| (sq, self.piece_at(sq)));

        self.apply_raw(Move::normal(from, to));
        if let Some(sq) = passed {
            self.set_piece(sq, None);
        }

        let exposed = self.in_check(piece.color);

        self.set_piece(from, Some(piece));
        self.set_piece(to, saved_to);
        if let Some((sq, occupant)) = saved_passed {
            self.set_piece(sq, occupant);
        }
        exposed
    }
}
