//! King movement, including castling.

use super::{MoveContext, MovementRule, Stepper};
use crate::board::{Board, PieceId};
use crate::mov::Castle;
use crate::Move;
use chess_core::{Piece, Square};

/// Column the king must stand on to castle, on its back row.
const KING_HOME_COL: u8 = 4;

/// One castling side: the step direction along the back row, the rook's
/// column, and where king and rook end up.
struct CastleSide {
    step: i8,
    rook_col: u8,
    king_to_col: u8,
    rook_to_col: u8,
}

const KINGSIDE: CastleSide = CastleSide {
    step: 1,
    rook_col: 7,
    king_to_col: 6,
    rook_to_col: 5,
};

const QUEENSIDE: CastleSide = CastleSide {
    step: -1,
    rook_col: 0,
    king_to_col: 2,
    rook_to_col: 3,
};

/// King rules: one step in any direction, plus castling.
#[derive(Debug, Clone, Copy)]
pub struct KingRule {
    steps: Stepper,
}

impl KingRule {
    pub const fn new(steps: Stepper) -> Self {
        KingRule { steps }
    }

    fn castle(ctx: &MoveContext<'_>, from: Square, side: &CastleSide) -> Option<Castle> {
        let row = from.row();
        let mut col = from.col() as i8 + side.step;
        while col != side.rook_col as i8 {
            let between = Square::new(row, col as u8);
            if !ctx.board.is_empty(between) || ctx.board.is_attacked(between) {
                return None;
            }
            col += side.step;
        }

        let rook_from = Square::new(row, side.rook_col);
        let rook = ctx.board.occupant(rook_from)?;
        let record = ctx.board.piece(rook);
        if record.color != ctx.side || record.kind != Piece::Rook || record.has_moved() {
            return None;
        }

        Some(Castle {
            king_to: Square::new(row, side.king_to_col),
            rook_from,
            rook_to: Square::new(row, side.rook_to_col),
            rook,
        })
    }
}

impl MovementRule for KingRule {
    fn generate(&self, ctx: &MoveContext<'_>, from: Square, piece: PieceId, out: &mut Vec<Move>) {
        self.steps.generate(ctx, from, piece, out);

        if !ctx.castling
            || ctx.board.piece(piece).has_moved()
            || ctx.board.king_in_danger(ctx.side)
            || from.col() != KING_HOME_COL
            || from.row() != ctx.side.back_row()
        {
            return;
        }
        for side in [&KINGSIDE, &QUEENSIDE] {
            if let Some(castle) = Self::castle(ctx, from, side) {
                out.push(Move::castle(piece, from, castle));
            }
        }
    }

    fn attacks(&self, board: &Board, from: Square, piece: PieceId, out: &mut Vec<Square>) {
        self.steps.attacks(board, from, piece, out);
    }
}
