//! Legal move filtering.
//!
//! A pseudo-legal move is legal when, after it is played, no reply of the
//! opponent captures the mover's king. Each candidate is played on the board,
//! the replies are scanned, and the candidate is taken back again.

use crate::board::Board;
use crate::execute::{execute, reverse};
use crate::movegen::{mark_attacks, pseudo_legal_moves, MoveContext};
use crate::Move;
use chess_core::Color;

/// Result of a legality pass.
#[derive(Debug, Clone, Default)]
pub struct LegalMoves {
    pub moves: Vec<Move>,
    /// Whether the side to move is in check.
    pub in_check: bool,
}

/// Computes the legal moves for `side`.
///
/// Refreshes the board's attack marks for `side` first; castling reads them.
/// The board is left as it was found apart from those marks.
pub fn legal_moves(board: &mut Board, side: Color, last_move: Option<&Move>) -> LegalMoves {
    mark_attacks(board, side);
    let candidates = pseudo_legal_moves(&MoveContext::new(board, side, last_move));
    let mut moves = Vec::with_capacity(candidates.len());
    for mv in candidates {
        if keeps_king_safe(board, side, &mv) {
            moves.push(mv);
        }
    }
    tracing::trace!(side = %side, legal = moves.len(), "legal moves generated");
    LegalMoves {
        in_check: board.king_in_danger(side),
        moves,
    }
}

/// Plays `mv`, looks for a reply that takes `side`'s king, and takes `mv`
/// back before returning either way.
fn keeps_king_safe(board: &mut Board, side: Color, mv: &Move) -> bool {
    execute(board, mv);
    let replies = pseudo_legal_moves(&MoveContext::replies(board, side.opposite(), Some(mv)));
    let safe = !replies.iter().any(Move::captures_king);
    reverse(board, mv);
    safe
}
