//! Board square representation.

use crate::MoveError;
use std::fmt;
use std::str::FromStr;

/// A file (column) on the chess board, from A to H.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// Parses `'a'..='h'`, either case.
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            c @ 'a'..='h' => Some(Self::ALL[(c as u8 - b'a') as usize]),
            _ => None,
        }
    }

    /// The board column of this file.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rank on the chess board, from 1 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rank {
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
}

impl Rank {
    pub const ALL: [Rank; 8] = [
        Rank::R1,
        Rank::R2,
        Rank::R3,
        Rank::R4,
        Rank::R5,
        Rank::R6,
        Rank::R7,
        Rank::R8,
    ];

    /// Parses `'1'..='8'`.
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Some(Self::ALL[(c as u8 - b'1') as usize]),
            _ => None,
        }
    }

    /// The board row of this rank: rank 8 is row 0, rank 1 is row 7.
    #[inline]
    pub const fn row(self) -> u8 {
        7 - self as u8
    }

    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A square on the chess board, addressed by `(row, col)`.
///
/// Row 0 is rank 8 and row 7 is rank 1; column 0 is file a. Both
/// coordinates are always in `0..8`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Creates a square, or `None` if either coordinate is off the board.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Square { row, col })
        } else {
            None
        }
    }

    /// Creates a square from signed coordinates.
    pub fn try_from_coords(row: i32, col: i32) -> Result<Self, MoveError> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Ok(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(MoveError::OutOfRange { row, col })
        }
    }

    /// Creates a square from file and rank.
    #[inline]
    pub const fn from_file_rank(file: File, rank: Rank) -> Self {
        Square {
            row: rank.row(),
            col: file.index(),
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = match File::from_char(bytes[0] as char) {
            Some(f) => f,
            None => return None,
        };
        let rank = match Rank::from_char(bytes[1] as char) {
            Some(r) => r,
            None => return None,
        };
        Some(Square::from_file_rank(file, rank))
    }

    /// Returns the row (0 = rank 8).
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column (0 = file a).
    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    #[inline]
    pub const fn file(self) -> File {
        File::ALL[self.col as usize]
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(7 - self.row) as usize]
    }

    /// Returns the square `(dr, dc)` away, if it is still on the board.
    #[inline]
    pub const fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if row >= 0 && row < 8 && col >= 0 && col < 8 {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Iterates over all 64 squares in row-major order, starting at a8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    // Squares the castling rules refer to
    pub const A1: Square = Square { row: 7, col: 0 };
    pub const B1: Square = Square { row: 7, col: 1 };
    pub const C1: Square = Square { row: 7, col: 2 };
    pub const D1: Square = Square { row: 7, col: 3 };
    pub const E1: Square = Square { row: 7, col: 4 };
    pub const F1: Square = Square { row: 7, col: 5 };
    pub const G1: Square = Square { row: 7, col: 6 };
    pub const H1: Square = Square { row: 7, col: 7 };
    pub const A8: Square = Square { row: 0, col: 0 };
    pub const B8: Square = Square { row: 0, col: 1 };
    pub const C8: Square = Square { row: 0, col: 2 };
    pub const D8: Square = Square { row: 0, col: 3 };
    pub const E8: Square = Square { row: 0, col: 4 };
    pub const F8: Square = Square { row: 0, col: 5 };
    pub const G8: Square = Square { row: 0, col: 6 };
    pub const H8: Square = Square { row: 0, col: 7 };
}

impl FromStr for Square {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s).ok_or_else(|| MoveError::MalformedNotation(s.to_string()))
    }
}

impl TryFrom<(i32, i32)> for Square {
    type Error = MoveError;

    fn try_from((row, col): (i32, i32)) -> Result<Self, Self::Error> {
        Square::try_from_coords(row, col)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn square_orientation() {
        let e4 = Square::from_file_rank(File::E, Rank::R4);
        assert_eq!(e4.row(), 4);
        assert_eq!(e4.col(), 4);
        assert_eq!(e4.file(), File::E);
        assert_eq!(e4.rank(), Rank::R4);
        assert_eq!(Square::new(0, 0), Some(Square::A8));
        assert_eq!(Square::new(7, 7), Some(Square::H1));
    }

    #[test]
    fn square_new_bounds() {
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, 8).is_none());
        assert_eq!(
            Square::try_from_coords(-1, 3),
            Err(MoveError::OutOfRange { row: -1, col: 3 })
        );
        assert_eq!(
            Square::try_from((3, 8)),
            Err(MoveError::OutOfRange { row: 3, col: 8 })
        );
        assert_eq!(Square::try_from((6, 4)), Ok(Square::from_file_rank(File::E, Rank::R2)));
    }

    #[test]
    fn square_from_algebraic() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square::A1));
        assert_eq!(Square::from_algebraic("h8"), Some(Square::H8));
        assert_eq!(Square::from_algebraic("E2"), Square::new(6, 4));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("a0"), None);
        assert_eq!(Square::from_algebraic("e44"), None);
        assert_eq!(Square::from_algebraic(""), None);
    }

    #[test]
    fn square_from_str_error() {
        assert_eq!("c6".parse::<Square>(), Ok(Square::new(2, 2).unwrap()));
        assert_eq!(
            "z1".parse::<Square>(),
            Err(MoveError::MalformedNotation("z1".to_string()))
        );
    }

    #[test]
    fn square_offset() {
        assert_eq!(Square::E1.offset(0, 1), Some(Square::F1));
        assert_eq!(Square::H1.offset(0, 1), None);
        assert_eq!(Square::A8.offset(-1, 0), None);
        assert_eq!(Square::E8.offset(7, -4), Some(Square::A1));
    }

    #[test]
    fn all_squares() {
        let squares: Vec<Square> = Square::all().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0], Square::A8);
        assert_eq!(squares[63], Square::H1);
    }

    #[test]
    fn algebraic_roundtrip_every_square() {
        for square in Square::all() {
            let text = square.to_algebraic();
            assert_eq!(Square::from_algebraic(&text), Some(square));
        }
    }

    proptest! {
        #[test]
        fn coords_roundtrip_through_algebraic(row in 0u8..8, col in 0u8..8) {
            let square = Square::new(row, col).unwrap();
            let parsed: Square = square.to_algebraic().parse().unwrap();
            prop_assert_eq!(parsed.row(), row);
            prop_assert_eq!(parsed.col(), col);
        }

        #[test]
        fn off_board_coords_rejected(row in -20i32..20, col in -20i32..20) {
            let on_board = (0..8).contains(&row) && (0..8).contains(&col);
            prop_assert_eq!(Square::try_from_coords(row, col).is_ok(), on_board);
        }
    }
}
