//! Errors raised while constructing squares and moves.

use thiserror::Error;

/// Errors that can occur when building a [`Square`](crate::Square) or [`Move`](crate::Move).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("square ({row}, {col}) is off the board: each coordinate must be between 0 and 7")]
    OutOfRange { row: i32, col: i32 },

    #[error("invalid promotion '{0}': must be one of q, b, n, r")]
    InvalidPromotion(String),

    #[error("malformed square notation '{0}': expected a file a-h followed by a rank 1-8")]
    MalformedNotation(String),
}
