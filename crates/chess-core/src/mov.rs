//! Move representation.

use crate::{MoveError, PieceKind, Square};
use std::fmt;

/// A chess move: a source square, a target square, and an optional
/// promotion choice.
///
/// A `Move` is an immutable value. Constructors check that both squares are
/// on the board and that a promotion names a queen, rook, bishop or knight;
/// whether the move is legal is decided by the board it is played on.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    source: Square,
    target: Square,
    promotion: Option<PieceKind>,
}

impl Move {
    /// Creates a move from `(row, col)` coordinates.
    ///
    /// # Errors
    ///
    /// [`MoveError::OutOfRange`] if a coordinate lies outside `0..8`,
    /// [`MoveError::InvalidPromotion`] if `promotion` is a pawn or king.
    pub fn new(
        source: (i32, i32),
        target: (i32, i32),
        promotion: Option<PieceKind>,
    ) -> Result<Self, MoveError> {
        let source = Square::try_from(source)?;
        let target = Square::try_from(target)?;
        Self::from_squares(source, target, promotion)
    }

    /// Creates a move between two squares.
    pub fn from_squares(
        source: Square,
        target: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Self, MoveError> {
        if let Some(kind) = promotion {
            if !kind.is_promotion_target() {
                return Err(MoveError::InvalidPromotion(kind.to_char().to_string()));
            }
        }
        Ok(Move {
            source,
            target,
            promotion,
        })
    }

    /// Creates a move without a promotion. Always valid.
    #[inline]
    pub const fn normal(source: Square, target: Square) -> Self {
        Move {
            source,
            target,
            promotion: None,
        }
    }

    /// Creates a move from algebraic squares such as `"e2"`, `"e4"`, with an
    /// optional promotion letter (`q`, `b`, `n` or `r`, either case).
    ///
    /// # Errors
    ///
    /// [`MoveError::MalformedNotation`] if a square is not exactly a file
    /// letter followed by a rank digit, [`MoveError::InvalidPromotion`] for
    /// any other promotion letter.
    pub fn from_algebraic(
        source: &str,
        target: &str,
        promotion: Option<char>,
    ) -> Result<Self, MoveError> {
        let source: Square = source.parse()?;
        let target: Square = target.parse()?;
        let promotion = promotion
            .map(|c| {
                PieceKind::from_char(c)
                    .filter(|kind| kind.is_promotion_target())
                    .ok_or_else(|| MoveError::InvalidPromotion(c.to_string()))
            })
            .transpose()?;
        Self::from_squares(source, target, promotion)
    }

    /// Parses coordinate notation (e.g., "e2e4", "e7e8q").
    pub fn from_uci(s: &str) -> Result<Self, MoveError> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return Err(MoveError::MalformedNotation(s.to_string()));
        }
        Self::from_algebraic(&s[0..2], &s[2..4], s[4..].chars().next())
    }

    /// Returns the source square.
    #[inline]
    pub const fn source(self) -> Square {
        self.source
    }

    /// Returns the target square.
    #[inline]
    pub const fn target(self) -> Square {
        self.target
    }

    /// Returns the promotion choice, if any.
    #[inline]
    pub const fn promotion(self) -> Option<PieceKind> {
        self.promotion
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        match self.promotion {
            Some(kind) => format!("{}{}{}", self.source, self.target, kind.to_char()),
            None => format!("{}{}", self.source, self.target),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_new_from_coords() {
        let m = Move::new((6, 4), (4, 4), None).unwrap();
        assert_eq!(m.source(), Square::from_algebraic("e2").unwrap());
        assert_eq!(m.target(), Square::from_algebraic("e4").unwrap());
        assert_eq!(m.promotion(), None);
    }

    #[test]
    fn move_new_out_of_range() {
        assert_eq!(
            Move::new((8, 0), (0, 0), None),
            Err(MoveError::OutOfRange { row: 8, col: 0 })
        );
        assert_eq!(
            Move::new((0, 0), (0, -1), None),
            Err(MoveError::OutOfRange { row: 0, col: -1 })
        );
    }

    #[test]
    fn move_invalid_promotion_kind() {
        assert!(matches!(
            Move::new((1, 0), (0, 0), Some(PieceKind::King)),
            Err(MoveError::InvalidPromotion(_))
        ));
        assert!(matches!(
            Move::new((1, 0), (0, 0), Some(PieceKind::Pawn)),
            Err(MoveError::InvalidPromotion(_))
        ));
        for kind in PieceKind::PROMOTIONS {
            assert!(Move::new((1, 0), (0, 0), Some(kind)).is_ok());
        }
    }

    #[test]
    fn move_from_algebraic() {
        let m = Move::from_algebraic("e2", "e4", None).unwrap();
        assert_eq!(m.source().row(), 6);
        assert_eq!(m.source().col(), 4);
        assert_eq!(m.target().row(), 4);
        assert_eq!(m.target().col(), 4);

        let promo = Move::from_algebraic("a7", "a8", Some('n')).unwrap();
        assert_eq!(promo.promotion(), Some(PieceKind::Knight));
        let promo = Move::from_algebraic("a7", "a8", Some('Q')).unwrap();
        assert_eq!(promo.promotion(), Some(PieceKind::Queen));
    }

    #[test]
    fn move_from_algebraic_errors() {
        assert!(matches!(
            Move::from_algebraic("e2e", "e4", None),
            Err(MoveError::MalformedNotation(_))
        ));
        assert!(matches!(
            Move::from_algebraic("e2", "i4", None),
            Err(MoveError::MalformedNotation(_))
        ));
        assert!(matches!(
            Move::from_algebraic("e2", "e9", None),
            Err(MoveError::MalformedNotation(_))
        ));
        assert!(matches!(
            Move::from_algebraic("e7", "e8", Some('k')),
            Err(MoveError::InvalidPromotion(_))
        ));
        assert!(matches!(
            Move::from_algebraic("e7", "e8", Some('x')),
            Err(MoveError::InvalidPromotion(_))
        ));
    }

    #[test]
    fn move_uci() {
        let m = Move::from_algebraic("e2", "e4", None).unwrap();
        assert_eq!(m.to_uci(), "e2e4");

        let promo = Move::from_algebraic("e7", "e8", Some('q')).unwrap();
        assert_eq!(promo.to_uci(), "e7e8q");
    }

    #[test]
    fn move_from_uci() {
        let m = Move::from_uci("g1f3").unwrap();
        assert_eq!(m.source(), Square::G1);
        assert_eq!(m.target().to_algebraic(), "f3");

        let promo = Move::from_uci("b7b8r").unwrap();
        assert_eq!(promo.promotion(), Some(PieceKind::Rook));

        assert!(Move::from_uci("e2").is_err());
        assert!(Move::from_uci("e2e4qq").is_err());
        assert!(Move::from_uci("e2e9").is_err());
        assert!(Move::from_uci("e7e8x").is_err());
    }

    #[test]
    fn move_debug_display() {
        let m = Move::normal(Square::E1, Square::G1);
        assert_eq!(format!("{:?}", m), "Move(e1g1)");
        assert_eq!(format!("{}", m), "e1g1");
    }
}
