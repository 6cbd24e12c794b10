//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Every move is played through [`Board::commit`], so the counts cover the
//! commit path as well as generation.

use crate::{Board, BoardError};

/// Counts the number of leaf nodes at the given depth.
pub fn perft(board: &Board, depth: u32) -> Result<u64, BoardError> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = board.legal_moves();

    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for m in moves {
        let mut next = board.clone();
        next.commit(m)?;
        nodes += perft(&next, depth - 1)?;
    }
    Ok(nodes)
}

/// Perft with divide: the node count below each root move, sorted by move text.
pub fn perft_divide(board: &Board, depth: u32) -> Result<Vec<(String, u64)>, BoardError> {
    let moves = board.legal_moves();
    let mut results = Vec::with_capacity(moves.len());

    for m in moves {
        let mut next = board.clone();
        next.commit(m)?;
        let nodes = if depth > 1 {
            perft(&next, depth - 1)?
        } else {
            1
        };
        results.push((m.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(results)
}
