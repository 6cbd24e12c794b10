//! Errors raised by the board.

use chess_core::{FenError, Move};
use std::fmt;
use thiserror::Error;

/// Why a move was refused by [`Board::commit`](crate::Board::commit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalReason {
    /// No piece stands on the source square.
    EmptySource,
    /// The piece on the source square belongs to the side not on move.
    WrongSide,
    /// The target is not among the piece's legal destinations.
    Unreachable,
}

impl fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalReason::EmptySource => write!(f, "no piece on the source square"),
            IllegalReason::WrongSide => write!(f, "piece belongs to the side not on move"),
            IllegalReason::Unreachable => write!(f, "target is not a legal destination"),
        }
    }
}

/// Errors returned by board construction and move application.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("illegal move {mv}: {reason}")]
    IllegalMove { mv: Move, reason: IllegalReason },

    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("invalid position: {0}")]
    InvalidPosition(String),
}
