//! Pseudo-legal move generation.
//!
//! Every piece kind maps to a [`MovementRule`]. Rules produce candidate moves
//! that respect the piece's movement pattern and board occupancy but may
//! still leave the mover's king capturable; [`crate::legality`] filters
//! those out.

mod king;
mod pawn;
pub mod perft;
mod slider;
mod stepper;

use crate::board::{Board, PieceId};
use crate::Move;
use chess_core::{Color, Piece, Square};

pub use king::KingRule;
pub use pawn::PawnRule;
pub use slider::Slider;
pub use stepper::Stepper;

/// Everything a rule may look at while generating.
#[derive(Debug, Clone, Copy)]
pub struct MoveContext<'a> {
    pub board: &'a Board,
    pub side: Color,
    /// The most recent move, consulted for en passant.
    pub last_move: Option<&'a Move>,
    /// Whether castling candidates are produced. Castling reads the attack
    /// marks, which are only meaningful for the side the legality pass is
    /// run for.
    pub castling: bool,
}

impl<'a> MoveContext<'a> {
    /// Context for the side to move.
    pub fn new(board: &'a Board, side: Color, last_move: Option<&'a Move>) -> Self {
        MoveContext {
            board,
            side,
            last_move,
            castling: true,
        }
    }

    /// Context for scanning the opponent's replies to a tentative move.
    pub fn replies(board: &'a Board, side: Color, last_move: Option<&'a Move>) -> Self {
        MoveContext {
            castling: false,
            ..MoveContext::new(board, side, last_move)
        }
    }

    /// True if `square` holds a piece of the side to move.
    #[inline]
    pub fn is_own(&self, square: Square) -> bool {
        self.board.color_at(square) == Some(self.side)
    }

    /// True if `square` holds a piece of the opponent.
    #[inline]
    pub fn is_enemy(&self, square: Square) -> bool {
        self.board.color_at(square) == Some(self.side.opposite())
    }
}

/// Movement pattern of one piece kind.
pub trait MovementRule: Sync {
    /// Appends the pseudo-legal moves of `piece` standing on `from`.
    fn generate(&self, ctx: &MoveContext<'_>, from: Square, piece: PieceId, out: &mut Vec<Move>);

    /// Appends the squares `piece` on `from` attacks.
    ///
    /// By default these are the destinations of its generated moves.
    fn attacks(&self, board: &Board, from: Square, piece: PieceId, out: &mut Vec<Square>) {
        let color = board.piece(piece).color;
        let ctx = MoveContext::replies(board, color, None);
        let mut moves = Vec::new();
        self.generate(&ctx, from, piece, &mut moves);
        out.extend(moves.iter().map(Move::to));
    }
}

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
const ROYAL: [(i8, i8); 8] = [
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
    (2, 1),
    (-2, 1),
    (2, -1),
    (-2, -1),
];

static ROOK: Slider = Slider::new(&ORTHOGONAL);
static BISHOP: Slider = Slider::new(&DIAGONAL);
static QUEEN: Slider = Slider::new(&ROYAL);
static KNIGHT: Stepper = Stepper::new(&KNIGHT_JUMPS);
static KING: KingRule = KingRule::new(Stepper::new(&ROYAL));
static PAWN: PawnRule = PawnRule;

/// Returns the movement rule for a piece kind.
pub fn rule_for(kind: Piece) -> &'static dyn MovementRule {
    match kind {
        Piece::Pawn => &PAWN,
        Piece::Knight => &KNIGHT,
        Piece::Bishop => &BISHOP,
        Piece::Rook => &ROOK,
        Piece::Queen => &QUEEN,
        Piece::King => &KING,
    }
}

/// Generates every pseudo-legal move for `ctx.side`, scanning the board in
/// row-major order.
pub fn pseudo_legal_moves(ctx: &MoveContext<'_>) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    for (square, id) in ctx.board.occupied() {
        let record = ctx.board.piece(id);
        if record.color == ctx.side {
            rule_for(record.kind).generate(ctx, square, id, &mut moves);
        }
    }
    moves
}

/// Recomputes the attack marks for `side`: every square the opponent
/// attacks is marked, and `side`'s king is flagged when it stands on one.
pub fn mark_attacks(board: &mut Board, side: Color) {
    board.clear_attacks();
    let opponent = side.opposite();
    let mut attacked = Vec::with_capacity(64);
    for (square, id) in board.occupied() {
        let record = board.piece(id);
        if record.color == opponent {
            rule_for(record.kind).attacks(board, square, id, &mut attacked);
        }
    }
    for square in attacked {
        board.mark_attacked(square);
    }
    let in_danger = board
        .find_king(side)
        .is_some_and(|king| board.is_attacked(king));
    board.set_king_in_danger(side, in_danger);
}
