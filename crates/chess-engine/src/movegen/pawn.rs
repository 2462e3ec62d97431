//! Pawn movement: pushes, diagonal captures, en passant and promotion.

use super::{MoveContext, MovementRule};
use crate::board::{Board, PieceId};
use crate::Move;
use chess_core::Square;

/// Pawn rules. Direction, starting row and promotion row depend on color.
#[derive(Debug, Clone, Copy)]
pub struct PawnRule;

impl PawnRule {
    /// Checks whether the pawn beside `from` on `beside` can be taken en
    /// passant: the last move must be that pawn's two-square advance.
    fn en_passant_victim(ctx: &MoveContext<'_>, beside: Square) -> bool {
        let Some(last) = ctx.last_move else {
            return false;
        };
        last.is_double_push()
            && last.to() == beside
            && ctx.board.occupant(beside) == Some(last.piece())
            && ctx.board.piece(last.piece()).color != ctx.side
    }
}

impl MovementRule for PawnRule {
    fn generate(&self, ctx: &MoveContext<'_>, from: Square, piece: PieceId, out: &mut Vec<Move>) {
        let forward = ctx.side.forward();

        if let Some(one) = from.offset(forward, 0) {
            if ctx.board.is_empty(one) {
                out.push(Move::pawn(ctx.board, piece, from, one));
                if from.row() == ctx.side.pawn_start_row() {
                    if let Some(two) = from.offset(2 * forward, 0) {
                        if ctx.board.is_empty(two) {
                            out.push(Move::pawn(ctx.board, piece, from, two));
                        }
                    }
                }
            }
        }

        for dc in [-1, 1] {
            let Some(target) = from.offset(forward, dc) else {
                continue;
            };
            if ctx.is_enemy(target) {
                out.push(Move::pawn(ctx.board, piece, from, target));
            } else if ctx.board.is_empty(target) {
                let Some(beside) = from.offset(0, dc) else {
                    continue;
                };
                if Self::en_passant_victim(ctx, beside) {
                    let mv = Move::pawn(ctx.board, piece, from, target);
                    out.push(mv.with_en_passant(ctx.board, beside));
                }
            }
        }
    }

    fn attacks(&self, board: &Board, from: Square, piece: PieceId, out: &mut Vec<Square>) {
        let forward = board.piece(piece).color.forward();
        out.extend([-1, 1].into_iter().filter_map(|dc| from.offset(forward, dc)));
    }
}
