//! Chess rules engine on an 8x8 grid.
//!
//! This crate provides:
//! - [`Board`] - the grid plus side to move, castling rights, check flags,
//!   en passant target and move counters
//! - Per-square move generation with optional pin filtering
//! - Attack and check queries
//! - [`Board::commit`], the single entry point that plays a validated move
//! - Perft counting for generator validation
//!
//! Checkmate, stalemate and draw detection are not provided.
//!
//! # Example
//!
//! ```
//! use chess_core::{Color, Move};
//! use chess_rules::Board;
//!
//! let mut board = Board::new();
//! board.commit(Move::from_algebraic("e2", "e4", None).unwrap()).unwrap();
//! assert_eq!(board.side_to_move(), Color::Black);
//! assert_eq!(board.en_passant().map(|sq| sq.to_algebraic()), Some("e3".to_string()));
//! ```

mod board;
mod error;
pub mod movegen;

pub use board::{Board, CastlingRights};
pub use error::{BoardError, IllegalReason};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::MoveMap;
