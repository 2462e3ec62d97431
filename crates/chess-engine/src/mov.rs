//! Move records.
//!
//! A [`Move`] snapshots the mover, the captured piece and whether the
//! capture takes the enemy king at the moment it is generated. Special moves
//! carry their extra squares in [`Special`].

use crate::board::{Board, PieceId};
use chess_core::{Color, Piece, Square};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Castling metadata. The move itself goes from the king's square to the
/// rook's square; the pieces land on `king_to` and `rook_to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Castle {
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    pub rook: PieceId,
}

/// Special-move data attached to a [`Move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Special {
    None,
    /// Pawn advance of two squares from its starting row.
    DoublePush,
    /// Pawn capture of the pawn standing on `captured_square`.
    EnPassant { captured_square: Square },
    /// Pawn arriving on the far rank. The new kind is chosen afterwards.
    Promotion,
    Castle(Castle),
}

impl Special {
    #[inline]
    fn tag(self) -> u8 {
        match self {
            Special::None => 0,
            Special::DoublePush => 1,
            Special::EnPassant { .. } => 2,
            Special::Promotion => 3,
            Special::Castle(_) => 4,
        }
    }
}

/// A move generated against a board.
///
/// Two moves are equal when they share endpoints and the kind of special
/// move. Piece ids, the capture snapshot and a resolved promotion choice do
/// not take part.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    from: Square,
    to: Square,
    piece: PieceId,
    captured: Option<PieceId>,
    captures_king: bool,
    special: Special,
    promoted_to: Option<Piece>,
}

impl Move {
    /// Builds a move of `piece` from `from` to `to`, capturing whatever
    /// stands on `to`.
    pub(crate) fn new(board: &Board, piece: PieceId, from: Square, to: Square) -> Self {
        let mover = board.piece(piece).color;
        let captured = board.occupant(to);
        Move {
            from,
            to,
            piece,
            captured,
            captures_king: captures_enemy_king(board, mover, captured),
            special: Special::None,
            promoted_to: None,
        }
    }

    /// Builds a pawn move, flagging double pushes and promotions.
    pub(crate) fn pawn(board: &Board, piece: PieceId, from: Square, to: Square) -> Self {
        let color = board.piece(piece).color;
        let mut mv = Move::new(board, piece, from, to);
        if to.row() == color.promotion_row() {
            mv.special = Special::Promotion;
        } else if from.row().abs_diff(to.row()) == 2 {
            mv.special = Special::DoublePush;
        }
        mv
    }

    /// Turns a freshly built diagonal pawn move into an en passant capture
    /// of the pawn on `captured_square`.
    pub(crate) fn with_en_passant(mut self, board: &Board, captured_square: Square) -> Self {
        let mover = board.piece(self.piece).color;
        self.captured = board.occupant(captured_square);
        self.captures_king = captures_enemy_king(board, mover, self.captured);
        self.special = Special::EnPassant { captured_square };
        self
    }

    /// Builds a castling move from the king's square to the rook's square.
    pub(crate) fn castle(king: PieceId, from: Square, castle: Castle) -> Self {
        Move {
            from,
            to: castle.rook_from,
            piece: king,
            captured: None,
            captures_king: false,
            special: Special::Castle(castle),
            promoted_to: None,
        }
    }

    #[inline]
    pub fn from(&self) -> Square {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Square {
        self.to
    }

    /// The moving piece.
    #[inline]
    pub fn piece(&self) -> PieceId {
        self.piece
    }

    /// The captured piece, snapshotted when the move was generated.
    #[inline]
    pub fn captured(&self) -> Option<PieceId> {
        self.captured
    }

    /// True if this move would take the enemy king.
    #[inline]
    pub fn captures_king(&self) -> bool {
        self.captures_king
    }

    #[inline]
    pub fn special(&self) -> Special {
        self.special
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        matches!(self.special, Special::Promotion)
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        matches!(self.special, Special::Castle(_))
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        matches!(self.special, Special::EnPassant { .. })
    }

    #[inline]
    pub fn is_double_push(&self) -> bool {
        matches!(self.special, Special::DoublePush)
    }

    /// The castling metadata, if this is a castling move.
    pub fn castle_info(&self) -> Option<Castle> {
        match self.special {
            Special::Castle(castle) => Some(castle),
            _ => None,
        }
    }

    /// The kind chosen for a completed promotion.
    #[inline]
    pub fn promoted_to(&self) -> Option<Piece> {
        self.promoted_to
    }

    pub(crate) fn resolve_promotion(&mut self, kind: Piece) {
        debug_assert!(self.is_promotion());
        self.promoted_to = Some(kind);
    }

    /// Long algebraic notation, e.g. `e2e4` or `e7e8q`.
    pub fn to_notation(&self) -> String {
        match self.promoted_to {
            Some(kind) => format!(
                "{}{}{}",
                self.from,
                self.to,
                kind.to_char(Color::Black)
            ),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

fn captures_enemy_king(board: &Board, mover: Color, captured: Option<PieceId>) -> bool {
    captured.is_some_and(|id| {
        let record = board.piece(id);
        record.kind == Piece::King && record.color != mover
    })
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.special.tag() == other.special.tag()
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.special.tag().hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}
