//! Stepping pieces: the knight, and the king's ordinary moves.

use super::{MoveContext, MovementRule};
use crate::board::PieceId;
use crate::Move;
use chess_core::Square;

/// Tests each offset once; lands on empty or enemy squares.
#[derive(Debug, Clone, Copy)]
pub struct Stepper {
    offsets: &'static [(i8, i8)],
}

impl Stepper {
    pub const fn new(offsets: &'static [(i8, i8)]) -> Self {
        Stepper { offsets }
    }
}

impl MovementRule for Stepper {
    fn generate(&self, ctx: &MoveContext<'_>, from: Square, piece: PieceId, out: &mut Vec<Move>) {
        for &(dr, dc) in self.offsets {
            if let Some(to) = from.offset(dr, dc) {
                if !ctx.is_own(to) {
                    out.push(Move::new(ctx.board, piece, from, to));
                }
            }
        }
    }
}
