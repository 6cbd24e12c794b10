//! Board state and the move commit path.

use chess_core::{Color, FenParser, Move, Piece, PieceKind, Placement, Square};

use crate::{BoardError, IllegalReason};

/// Castling rights flags.
///
/// Rights are only ever removed once a game is under way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Builds rights from FEN letters (`K`, `Q`, `k`, `q`); other characters are ignored.
    pub fn from_fen(letters: &str) -> Self {
        let flags = letters.chars().fold(0u8, |acc, c| {
            acc | match c {
                'K' => Self::WHITE_KINGSIDE,
                'Q' => Self::WHITE_QUEENSIDE,
                'k' => Self::BLACK_KINGSIDE,
                'q' => Self::BLACK_QUEENSIDE,
                _ => 0,
            }
        });
        CastlingRights(flags)
    }

    /// Renders the rights as FEN letters, or `-` if none remain.
    pub fn to_fen(self) -> String {
        let letters: String = [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ]
        .iter()
        .filter(|(flag, _)| self.0 & flag != 0)
        .map(|&(_, c)| c)
        .collect();
        if letters.is_empty() {
            "-".to_string()
        } else {
            letters
        }
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove_kingside(color);
        self.remove_queenside(color);
    }

    /// Removes kingside castling for a color.
    #[inline]
    pub fn remove_kingside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_KINGSIDE,
            Color::Black => !Self::BLACK_KINGSIDE,
        };
        self.0 &= mask;
    }

    /// Removes queenside castling for a color.
    #[inline]
    pub fn remove_queenside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_QUEENSIDE,
            Color::Black => !Self::BLACK_QUEENSIDE,
        };
        self.0 &= mask;
    }

    /// Removes the right tied to a rook standing on `square` at the start,
    /// if `square` is one of the four rook home squares.
    pub fn remove_for_rook_square(&mut self, square: Square) {
        match square {
            sq if sq == Square::H1 => self.remove_kingside(Color::White),
            sq if sq == Square::A1 => self.remove_queenside(Color::White),
            sq if sq == Square::H8 => self.remove_kingside(Color::Black),
            sq if sq == Square::A8 => self.remove_queenside(Color::Black),
            _ => {}
        }
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// The game state: an 8x8 grid plus everything derived from the move sequence.
///
/// A `Board` is a plain owned value with no interior synchronization. Share
/// it across threads behind a lock, or give each thread its own clone.
///
/// Check and attack queries require exactly one king of each color on the
/// grid. Positions loaded through [`Board::from_fen`] are verified; a board
/// assembled with [`Board::set_piece`] is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) grid: Placement,
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) check_flags: [bool; 2],
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl Board {
    /// Creates the standard starting position.
    pub fn new() -> Self {
        let parsed = FenParser::default();
        Board {
            grid: parsed.placement,
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            check_flags: [false; 2],
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates a board with no pieces, White to move and no castling rights.
    pub fn empty() -> Self {
        Board {
            grid: [[None; 8]; 8],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            check_flags: [false; 2],
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates a board from a FEN string.
    ///
    /// # Errors
    ///
    /// [`BoardError::Fen`] for malformed text, [`BoardError::InvalidPosition`]
    /// unless each color has exactly one king, the side not on move is out
    /// of check, and any en passant target follows a two-square advance of
    /// the side not on move.
    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        let parsed = FenParser::parse(fen)?;
        let mut board = Board {
            grid: parsed.placement,
            side_to_move: parsed.side_to_move,
            castling: CastlingRights::from_fen(&parsed.castling),
            check_flags: [false; 2],
            en_passant: parsed.en_passant,
            halfmove_clock: parsed.halfmove_clock,
            fullmove_number: parsed.fullmove_number,
        };

        for color in Color::ALL {
            let kings = board.find(Piece::new(PieceKind::King, color)).len();
            if kings != 1 {
                return Err(BoardError::InvalidPosition(format!(
                    "expected one {} king, found {}",
                    color, kings
                )));
            }
        }

        if let Some(target) = board.en_passant {
            board.check_en_passant(target)?;
        }

        let us = board.side_to_move;
        if board.in_check(us.opposite()) {
            return Err(BoardError::InvalidPosition(format!(
                "{} is in check but not on move",
                us.opposite()
            )));
        }
        board.check_flags[us.index()] = board.in_check(us);

        tracing::debug!(fen, side_to_move = %us, "loaded position");
        Ok(board)
    }

    /// Converts the board to a FEN string.
    pub fn to_fen(&self) -> String {
        let en_passant = self
            .en_passant
            .map_or_else(|| "-".to_string(), Square::to_algebraic);
        format!(
            "{} {} {} {} {} {}",
            FenParser::placement_to_string(&self.grid),
            self.side_to_move.to_fen_char(),
            self.castling.to_fen(),
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Returns the piece on `square`, or `None` if it is empty.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.grid[square.row() as usize][square.col() as usize]
    }

    /// Puts `piece` on `square` (or empties it), leaving all other state alone.
    #[inline]
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.grid[square.row() as usize][square.col() as usize] = piece;
    }

    /// Iterates over every square and its occupant, row by row from a8 to h1.
    pub fn squares(&self) -> impl Iterator<Item = (Square, Option<Piece>)> + '_ {
        Square::all().map(move |sq| (sq, self.piece_at(sq)))
    }

    /// Returns every square holding `piece`.
    pub fn find(&self, piece: Piece) -> Vec<Square> {
        self.squares()
            .filter(|&(_, occupant)| occupant == Some(piece))
            .map(|(sq, _)| sq)
            .collect()
    }

    /// The side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Sets the side to move. Check flags are not recomputed.
    #[inline]
    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    /// The castling rights still held by both sides.
    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Replaces the castling rights. The king and rooks are not checked
    /// against them.
    #[inline]
    pub fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.castling = rights;
    }

    /// The square skipped by the last move's two-square pawn advance, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Sets the en passant target.
    ///
    /// The caller keeps it consistent: the square must be empty, and the
    /// side not on move must have a pawn just beyond it that came from the
    /// square just behind. Move generation and [`Board::commit`] remove
    /// the piece in front of the target on an en passant capture.
    #[inline]
    pub fn set_en_passant(&mut self, square: Option<Square>) {
        self.en_passant = square;
    }

    /// Plies since the last pawn move or capture.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Starts at 1 and increments after each Black move.
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// The stored check flag for `color`.
    ///
    /// Only the side to move's flag is computed, by [`Board::commit`] and
    /// [`Board::from_fen`]; the side that just moved always reads `false`.
    #[inline]
    pub fn check_flag(&self, color: Color) -> bool {
        self.check_flags[color.index()]
    }

    /// Relocates the piece on the source square to the target square.
    ///
    /// Whatever stood on the target is overwritten and the source is left
    /// empty. No legality check is made and no other state changes.
    pub fn apply_raw(&mut self, mv: Move) {
        let piece = self.piece_at(mv.source());
        self.set_piece(mv.source(), None);
        self.set_piece(mv.target(), piece);
    }

    /// Plays a legal move for the side to move and advances the game by one ply.
    ///
    /// Besides relocating the piece this updates the en passant target,
    /// castling rights, check flags, both move counters and the side to
    /// move. Castling also brings the rook across, an en passant capture
    /// removes the passed pawn, and a pawn reaching the last row becomes the
    /// move's promotion kind (a queen when none is given).
    ///
    /// # Errors
    ///
    /// [`BoardError::IllegalMove`] if the source square is empty, holds a
    /// piece of the side not on move, or the target is not one of its legal
    /// destinations. The board is unchanged on error.
    pub fn commit(&mut self, mv: Move) -> Result<(), BoardError> {
        let piece = match self.check_legal(mv) {
            Ok(piece) => piece,
            Err(reason) => {
                tracing::trace!(%mv, %reason, "rejected move");
                return Err(BoardError::IllegalMove { mv, reason });
            }
        };

        let from = mv.source();
        let to = mv.target();
        let us = piece.color;
        let them = us.opposite();
        let captured = self.piece_at(to);
        let is_pawn = piece.kind == PieceKind::Pawn;
        let en_passant_capture = is_pawn && captured.is_none() && from.col() != to.col();

        self.en_passant = if is_pawn && from.row().abs_diff(to.row()) == 2 {
            from.offset(us.pawn_direction(), 0)
        } else {
            None
        };

        match piece.kind {
            PieceKind::King => self.castling.remove_color(us),
            PieceKind::Rook => self.castling.remove_for_rook_square(from),
            _ => {}
        }
        if captured.is_some() {
            self.castling.remove_for_rook_square(to);
        }

        self.apply_raw(mv);
        if en_passant_capture {
            if let Some(passed) = Square::new(from.row(), to.col()) {
                self.set_piece(passed, None);
            }
        }
        if piece.kind == PieceKind::King && from.col().abs_diff(to.col()) == 2 {
            let row = from.row();
            let (rook_from, rook_to) = if to.col() > from.col() { (7, 5) } else { (0, 3) };
            if let (Some(rook_from), Some(rook_to)) =
                (Square::new(row, rook_from), Square::new(row, rook_to))
            {
                self.apply_raw(Move::normal(rook_from, rook_to));
            }
        }
        if is_pawn && to.row() == us.promotion_row() {
            let kind = mv.promotion().unwrap_or(PieceKind::Queen);
            self.set_piece(to, Some(Piece::new(kind, us)));
        }

        self.check_flags[us.index()] = false;

        if is_pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }

        if us == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.side_to_move = them;
        self.check_flags[them.index()] = self.in_check(them);

        tracing::debug!(
            %mv,
            side_to_move = %them,
            check = self.check_flags[them.index()],
            "committed move"
        );
        Ok(())
    }

    /// Returns the moving piece if `mv` is legal for the side to move.
    fn check_legal(&self, mv: Move) -> Result<Piece, IllegalReason> {
        let piece = self
            .piece_at(mv.source())
            .ok_or(IllegalReason::EmptySource)?;
        if piece.color != self.side_to_move {
            return Err(IllegalReason::WrongSide);
        }
        if !self
            .pseudo_legal_moves(mv.source(), false, true)
            .contains(&mv.target())
        {
            return Err(IllegalReason::Unreachable);
        }
        Ok(piece)
    }

    /// Verifies that `target` is the square skipped by a two-square advance
    /// of the side not on move: the target and the pawn's start square are
    /// empty and the pawn stands just beyond the target.
    fn check_en_passant(&self, target: Square) -> Result<(), BoardError> {
        let them = self.side_to_move.opposite();
        let dir = them.pawn_direction();
        let skipped_row = them.pawn_start_row() as i8 + dir;
        let pawn = Some(Piece::new(PieceKind::Pawn, them));

        let valid = target.row() as i8 == skipped_row
            && self.piece_at(target).is_none()
            && target
                .offset(-dir, 0)
                .is_some_and(|start| self.piece_at(start).is_none())
            && target
                .offset(dir, 0)
                .is_some_and(|sq| self.piece_at(sq) == pawn);

        if valid {
            Ok(())
        } else {
            Err(BoardError::InvalidPosition(format!(
                "en passant target {} does not follow a {} pawn advance",
                target, them
            )))
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
