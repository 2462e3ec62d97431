//! Game state management.
//!
//! The [`Game`] struct owns the board, the turn flag and the move history,
//! and is the entry point for a front end:
//! - [`Game::legal_moves`] lists what the side to move may play
//! - [`Game::make_move`] plays one of those moves
//! - [`Game::complete_promotion`] supplies the piece for a pawn on the far rank
//! - [`Game::undo_move`] takes the last move back

use crate::board::Board;
use crate::execute::{execute, promote, reverse};
use crate::legality::{legal_moves, LegalMoves};
use crate::mov::{Move, Special};
use crate::outcome::{Outcome, OutcomePolicy};
use chess_core::{Color, Piece, Square};
use thiserror::Error;

/// Error type for game operations. A failed call leaves the game unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The move is not among the current legal moves.
    #[error("illegal move: {0}")]
    IllegalMoveRequested(String),

    /// The side to move has no legal moves.
    #[error("game has already ended")]
    GameOver,

    /// A promotion is waiting for [`Game::complete_promotion`].
    #[error("a pawn promotion is waiting for a piece choice")]
    PromotionPending,

    #[error("no promotion is pending")]
    PromotionNotPending,

    #[error("the last promotion has already been resolved")]
    PromotionAlreadyResolved,

    #[error("a pawn cannot promote to a {0}")]
    InvalidPromotionPiece(Piece),

    #[error("no move to undo")]
    NothingToUndo,
}

/// What a front end has to do after [`Game::make_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// One piece moved, possibly capturing.
    Normal,
    /// A pawn reached the far rank; a piece kind must be chosen.
    PendingPromotion { square: Square },
    /// King and rook both moved.
    Castled {
        king_to: Square,
        rook_from: Square,
        rook_to: Square,
    },
    /// The captured pawn was removed from a square other than the target.
    EnPassant { captured_square: Square },
}

/// A two-player game with history.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    /// Executed moves, most recent last. Doubles as the undo stack.
    history: Vec<Move>,
    /// Legal moves for the current position, dropped on every change.
    legal: Option<LegalMoves>,
    outcome: Option<Outcome>,
    pending_promotion: bool,
    policy: OutcomePolicy,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game from the standard starting position.
    pub fn new() -> Self {
        Self::with_policy(OutcomePolicy::default())
    }

    /// Creates a new game scoring positions without legal moves by `policy`.
    pub fn with_policy(policy: OutcomePolicy) -> Self {
        let mut game = Self::from_board(Board::standard(), Color::White);
        game.policy = policy;
        game
    }

    /// Creates a game from a custom board.
    pub fn from_board(board: Board, side_to_move: Color) -> Self {
        Game {
            board,
            side_to_move,
            history: Vec::new(),
            legal: None,
            outcome: None,
            pending_promotion: false,
            policy: OutcomePolicy::default(),
        }
    }

    /// Starts over from the standard position, keeping the policy.
    pub fn reset(&mut self) {
        *self = Self::with_policy(self.policy);
        tracing::debug!("game reset");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Read access by raw coordinates.
    ///
    /// # Panics
    ///
    /// Panics on an invalid coordinate.
    pub fn piece_at(&self, row: u8, col: u8) -> Option<(Color, Piece)> {
        self.board.at(row, col)
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn policy(&self) -> OutcomePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: OutcomePolicy) {
        self.policy = policy;
        self.legal = None;
        self.outcome = None;
    }

    /// Returns the move history, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.history.last()
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// True once [`Game::legal_moves`] has found no legal move.
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Whether the side to move was in check at the last legality pass.
    pub fn in_check(&self) -> bool {
        self.legal.as_ref().is_some_and(|legal| legal.in_check)
    }

    /// The square of a pawn waiting for its promotion piece.
    pub fn pending_promotion(&self) -> Option<Square> {
        if self.pending_promotion {
            self.history.last().map(Move::to)
        } else {
            None
        }
    }

    /// Returns all legal moves for the side to move.
    ///
    /// Also refreshes [`Game::is_terminal`], [`Game::in_check`] and the
    /// board's attack marks.
    pub fn legal_moves(&mut self) -> Result<&[Move], GameError> {
        Ok(&self.refresh()?.moves)
    }

    fn refresh(&mut self) -> Result<&LegalMoves, GameError> {
        if self.pending_promotion {
            return Err(GameError::PromotionPending);
        }
        let legal = match self.legal.take() {
            Some(legal) => legal,
            None => {
                let legal = legal_moves(&mut self.board, self.side_to_move, self.history.last());
                self.outcome = if legal.moves.is_empty() {
                    let outcome = self.policy.classify(self.side_to_move, legal.in_check);
                    tracing::info!(%outcome, "game over");
                    Some(outcome)
                } else {
                    None
                };
                legal
            }
        };
        Ok(self.legal.insert(legal))
    }

    /// Finds the legal move from `from` to `to`.
    ///
    /// A castling move matches both the rook's square and the king's
    /// destination.
    pub fn find_move(&mut self, from: Square, to: Square) -> Result<Option<Move>, GameError> {
        let legal = &self.refresh()?.moves;
        let exact = legal.iter().find(|m| m.from() == from && m.to() == to);
        let by_king = || {
            legal.iter().find(|m| {
                m.from() == from && m.castle_info().is_some_and(|c| c.king_to == to)
            })
        };
        Ok(exact.or_else(by_king).copied())
    }

    /// Plays a move from the current legal moves.
    pub fn make_move(&mut self, mv: Move) -> Result<MoveOutcome, GameError> {
        self.refresh()?;
        if self.outcome.is_some() {
            return Err(GameError::GameOver);
        }
        let found = self
            .legal
            .as_ref()
            .and_then(|legal| legal.moves.iter().find(|m| **m == mv).copied());
        let Some(mv) = found else {
            return Err(GameError::IllegalMoveRequested(mv.to_notation()));
        };

        execute(&mut self.board, &mv);
        self.history.push(mv);
        self.side_to_move = self.side_to_move.opposite();
        self.legal = None;
        tracing::debug!(mv = %mv, ply = self.history.len(), "move made");

        Ok(match mv.special() {
            Special::Promotion => {
                self.pending_promotion = true;
                MoveOutcome::PendingPromotion { square: mv.to() }
            }
            Special::Castle(castle) => MoveOutcome::Castled {
                king_to: castle.king_to,
                rook_from: castle.rook_from,
                rook_to: castle.rook_to,
            },
            Special::EnPassant { captured_square } => MoveOutcome::EnPassant { captured_square },
            Special::None | Special::DoublePush => MoveOutcome::Normal,
        })
    }

    /// Places the chosen piece for the pending promotion.
    pub fn complete_promotion(&mut self, kind: Piece) -> Result<(), GameError> {
        if !self.pending_promotion {
            return Err(match self.history.last() {
                Some(last) if last.promoted_to().is_some() => GameError::PromotionAlreadyResolved,
                _ => GameError::PromotionNotPending,
            });
        }
        if !kind.is_promotion_choice() {
            return Err(GameError::InvalidPromotionPiece(kind));
        }
        let Some(mv) = self.history.last_mut() else {
            return Err(GameError::PromotionNotPending);
        };
        promote(&mut self.board, mv, kind);
        mv.resolve_promotion(kind);
        self.pending_promotion = false;
        tracing::debug!(mv = %mv, "promotion completed");
        Ok(())
    }

    /// Takes back the last move and returns it.
    ///
    /// A promotion must be completed before it can be undone.
    pub fn undo_move(&mut self) -> Result<Move, GameError> {
        if self.pending_promotion {
            return Err(GameError::PromotionPending);
        }
        let mv = self.history.pop().ok_or(GameError::NothingToUndo)?;
        reverse(&mut self.board, &mv);
        self.side_to_move = self.side_to_move.opposite();
        self.legal = None;
        self.outcome = None;
        tracing::debug!(mv = %mv, ply = self.history.len(), "move undone");
        Ok(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn play(game: &mut Game, notation: &str) -> MoveOutcome {
        let mv = game
            .find_move(sq(&notation[0..2]), sq(&notation[2..4]))
            .unwrap()
            .unwrap_or_else(|| panic!("{} is not legal", notation));
        game.make_move(mv).unwrap()
    }

    #[test]
    fn new_game() {
        let mut game = Game::new();
        assert_eq!(game.ply_count(), 0);
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.legal_moves().unwrap().len(), 20);
        assert!(!game.is_terminal());
        assert!(!game.in_check());
        assert!(game.last_move().is_none());
    }

    #[test]
    fn make_move_flips_turn_and_logs() {
        let mut game = Game::new();
        assert_eq!(play(&mut game, "e2e4"), MoveOutcome::Normal);
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.last_move().unwrap().to_notation(), "e2e4");
        assert_eq!(game.piece_at(4, 4), Some((Color::White, Piece::Pawn)));
        assert_eq!(game.piece_at(6, 4), None);
    }

    #[test]
    fn illegal_move_leaves_state_unchanged() {
        let mut game = Game::new();
        play(&mut game, "e2e4");
        let stale = game.history()[0];
        let board_before = game.board().clone();

        let err = game.make_move(stale).unwrap_err();
        assert_eq!(err, GameError::IllegalMoveRequested("e2e4".to_string()));
        assert_eq!(game.board(), &board_before);
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.ply_count(), 1);
    }

    #[test]
    fn fools_mate_is_terminal() {
        let mut game = Game::new();
        for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            play(&mut game, mv);
        }
        assert!(game.legal_moves().unwrap().is_empty());
        assert!(game.is_terminal());
        assert!(game.in_check());
        assert_eq!(
            game.outcome(),
            Some(Outcome::Checkmate {
                winner: Color::Black
            })
        );

        let any = game.history()[0];
        assert_eq!(game.make_move(any), Err(GameError::GameOver));

        game.undo_move().unwrap();
        assert!(!game.is_terminal());
        assert!(!game.legal_moves().unwrap().is_empty());
    }

    fn stalemate_board() -> Board {
        let mut board = Board::empty();
        board.spawn(sq("h8"), Color::Black, Piece::King);
        board.spawn(sq("f7"), Color::White, Piece::Queen);
        board.spawn(sq("g6"), Color::White, Piece::King);
        board
    }

    #[test]
    fn stalemate_scored_by_policy() {
        let mut game = Game::from_board(stalemate_board(), Color::Black);
        assert!(game.legal_moves().unwrap().is_empty());
        assert!(!game.in_check());
        assert_eq!(
            game.outcome(),
            Some(Outcome::NoLegalMoves {
                winner: Color::White
            })
        );

        game.set_policy(OutcomePolicy::DistinguishStalemate);
        assert!(!game.is_terminal());
        game.legal_moves().unwrap();
        assert_eq!(game.outcome(), Some(Outcome::Stalemate));
    }

    #[test]
    fn promotion_waits_for_choice() {
        let mut board = Board::empty();
        board.spawn(sq("e7"), Color::White, Piece::Pawn);
        board.spawn(sq("a1"), Color::White, Piece::King);
        board.spawn(sq("h5"), Color::Black, Piece::King);
        let mut game = Game::from_board(board, Color::White);

        assert_eq!(
            play(&mut game, "e7e8"),
            MoveOutcome::PendingPromotion { square: sq("e8") }
        );
        assert_eq!(game.pending_promotion(), Some(sq("e8")));
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.legal_moves().unwrap_err(), GameError::PromotionPending);
        assert_eq!(game.undo_move().unwrap_err(), GameError::PromotionPending);
        assert_eq!(
            game.complete_promotion(Piece::King),
            Err(GameError::InvalidPromotionPiece(Piece::King))
        );

        game.complete_promotion(Piece::Queen).unwrap();
        assert_eq!(game.piece_at(0, 4), Some((Color::White, Piece::Queen)));
        assert_eq!(game.pending_promotion(), None);
        assert_eq!(game.last_move().unwrap().to_notation(), "e7e8q");
        assert_eq!(
            game.complete_promotion(Piece::Queen),
            Err(GameError::PromotionAlreadyResolved)
        );

        let undone = game.undo_move().unwrap();
        assert!(undone.is_promotion());
        assert_eq!(game.piece_at(1, 4), Some((Color::White, Piece::Pawn)));
        assert_eq!(game.piece_at(0, 4), None);
        assert_eq!(
            game.complete_promotion(Piece::Queen),
            Err(GameError::PromotionNotPending)
        );
    }

    #[test]
    fn castling_reports_rook_squares() {
        let mut game = Game::new();
        for mv in ["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"] {
            play(&mut game, mv);
        }
        let outcome = play(&mut game, "e1g1");
        assert_eq!(
            outcome,
            MoveOutcome::Castled {
                king_to: sq("g1"),
                rook_from: sq("h1"),
                rook_to: sq("f1"),
            }
        );
        assert_eq!(game.piece_at(7, 6), Some((Color::White, Piece::King)));
        assert_eq!(game.piece_at(7, 5), Some((Color::White, Piece::Rook)));
        assert_eq!(game.last_move().unwrap().to(), sq("h1"));
    }

    #[test]
    fn en_passant_only_on_next_ply() {
        let mut game = Game::new();
        for mv in ["e2e4", "a7a6", "e4e5", "d7d5"] {
            play(&mut game, mv);
        }
        assert_eq!(
            play(&mut game, "e5d6"),
            MoveOutcome::EnPassant {
                captured_square: sq("d5")
            }
        );
        assert_eq!(game.piece_at(3, 3), None);
        game.undo_move().unwrap();

        play(&mut game, "h2h3");
        play(&mut game, "h7h6");
        let late = game.find_move(sq("e5"), sq("d6")).unwrap();
        assert!(late.is_none());
    }

    #[test]
    fn undo_on_empty_history() {
        let mut game = Game::new();
        assert_eq!(game.undo_move(), Err(GameError::NothingToUndo));
    }

    #[test]
    fn reset_restores_start() {
        let mut game = Game::with_policy(OutcomePolicy::DistinguishStalemate);
        play(&mut game, "d2d4");
        game.reset();
        assert_eq!(game.ply_count(), 0);
        assert_eq!(game.board(), &Board::standard());
        assert_eq!(game.policy(), OutcomePolicy::DistinguishStalemate);
    }
}
