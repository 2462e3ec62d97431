//! Applying and reversing moves on a board.
//!
//! [`reverse`] is the exact inverse of [`execute`]: for every generated move
//! `m`, `execute(b, m)` followed by `reverse(b, m)` leaves `b` equal to what
//! it was, move counters included.

use crate::board::Board;
use crate::mov::{Move, Special};
use chess_core::Piece;

/// Applies `mv` to the board.
///
/// A promotion leaves the pawn on the far rank; the new kind is set once the
/// choice is known.
pub(crate) fn execute(board: &mut Board, mv: &Move) {
    match mv.special() {
        Special::Castle(castle) => {
            board.set_occupant(mv.from(), None);
            board.set_occupant(castle.rook_from, None);
            board.set_occupant(castle.king_to, Some(mv.piece()));
            board.set_occupant(castle.rook_to, Some(castle.rook));
            board.piece_mut(castle.rook).record_move();
        }
        Special::EnPassant { captured_square } => {
            board.set_occupant(mv.from(), None);
            board.set_occupant(mv.to(), Some(mv.piece()));
            board.set_occupant(captured_square, None);
        }
        Special::None | Special::DoublePush | Special::Promotion => {
            board.set_occupant(mv.from(), None);
            board.set_occupant(mv.to(), Some(mv.piece()));
        }
    }
    board.piece_mut(mv.piece()).record_move();
}

/// Undoes `mv`, which must be the last move executed on the board.
pub(crate) fn reverse(board: &mut Board, mv: &Move) {
    match mv.special() {
        Special::Castle(castle) => {
            debug_assert_eq!(board.occupant(castle.king_to), Some(mv.piece()));
            debug_assert_eq!(board.occupant(castle.rook_to), Some(castle.rook));
            board.set_occupant(castle.king_to, None);
            board.set_occupant(castle.rook_to, None);
            board.set_occupant(mv.from(), Some(mv.piece()));
            board.set_occupant(castle.rook_from, Some(castle.rook));
            board.piece_mut(castle.rook).unrecord_move();
        }
        Special::EnPassant { captured_square } => {
            debug_assert_eq!(board.occupant(mv.to()), Some(mv.piece()));
            board.set_occupant(mv.to(), None);
            board.set_occupant(mv.from(), Some(mv.piece()));
            board.set_occupant(captured_square, mv.captured());
        }
        Special::None | Special::DoublePush | Special::Promotion => {
            debug_assert_eq!(board.occupant(mv.to()), Some(mv.piece()));
            board.set_occupant(mv.from(), Some(mv.piece()));
            board.set_occupant(mv.to(), mv.captured());
        }
    }
    let record = board.piece_mut(mv.piece());
    if mv.is_promotion() {
        record.kind = Piece::Pawn;
    }
    record.unrecord_move();
}

/// Gives the pawn that just reached the far rank its chosen kind.
pub(crate) fn promote(board: &mut Board, mv: &Move, kind: Piece) {
    debug_assert!(mv.is_promotion() && kind.is_promotion_choice());
    debug_assert_eq!(board.occupant(mv.to()), Some(mv.piece()));
    board.piece_mut(mv.piece()).kind = kind;
}
