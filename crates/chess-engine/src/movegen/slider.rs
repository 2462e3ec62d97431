//! Sliding pieces: rook, bishop and queen.

use super::{MoveContext, MovementRule};
use crate::board::PieceId;
use crate::Move;
use chess_core::Square;

/// Walks each direction until the board edge or a blocker. An own blocker
/// ends the ray; an enemy blocker is included, then ends it.
#[derive(Debug, Clone, Copy)]
pub struct Slider {
    directions: &'static [(i8, i8)],
}

impl Slider {
    pub const fn new(directions: &'static [(i8, i8)]) -> Self {
        Slider { directions }
    }
}

impl MovementRule for Slider {
    fn generate(&self, ctx: &MoveContext<'_>, from: Square, piece: PieceId, out: &mut Vec<Move>) {
        for &(dr, dc) in self.directions {
            let mut cursor = from.offset(dr, dc);
            while let Some(to) = cursor {
                if ctx.is_own(to) {
                    break;
                }
                out.push(Move::new(ctx.board, piece, from, to));
                if ctx.is_enemy(to) {
                    break;
                }
                cursor = to.offset(dr, dc);
            }
        }
    }
}
