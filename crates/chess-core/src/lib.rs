//! Core types for chess.
//!
//! This crate provides the fundamental values shared by the rules engine:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] for proposed and committed moves
//! - [`MoveError`] for construction failures
//! - FEN parsing and serialization

mod color;
mod error;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use error::MoveError;
pub use fen::{FenError, FenParser, Placement};
pub use mov::Move;
pub use piece::{Piece, PieceKind};
pub use square::{File, Rank, Square};
