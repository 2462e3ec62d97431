//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Promotions are counted once each, completed as queens.

use crate::{Game, MoveOutcome};
use chess_core::Piece;

/// Counts the number of leaf nodes at the given depth.
///
/// Walks the tree with make/undo on `game`, which is left as it was found.
pub fn perft(game: &mut Game, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = match game.legal_moves() {
        Ok(moves) => moves.to_vec(),
        Err(_) => return 0,
    };

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in moves {
        if play(game, m) {
            nodes += perft(game, depth - 1);
            if let Err(e) = game.undo_move() {
                debug_assert!(false, "undo failed during perft: {}", e);
            }
        }
    }
    nodes
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(game: &mut Game, depth: u32) -> Vec<(String, u64)> {
    let moves = match game.legal_moves() {
        Ok(moves) => moves.to_vec(),
        Err(_) => return Vec::new(),
    };
    let mut results = Vec::with_capacity(moves.len());

    for m in moves {
        if play(game, m) {
            let nodes = if depth > 1 {
                perft(game, depth - 1)
            } else {
                1
            };
            results.push((m.to_notation(), nodes));
            if let Err(e) = game.undo_move() {
                debug_assert!(false, "undo failed during perft: {}", e);
            }
        }
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

fn play(game: &mut Game, m: crate::Move) -> bool {
    match game.make_move(m) {
        Ok(MoveOutcome::PendingPromotion { .. }) => game.complete_promotion(Piece::Queen).is_ok(),
        Ok(_) => true,
        Err(_) => false,
    }
}
