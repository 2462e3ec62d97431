//! Rules engine for two-player chess.
//!
//! This crate provides:
//! - [`Board`] - 8x8 grid of cells over an arena of pieces
//! - Piece movement rules producing pseudo-legal moves ([`movegen`])
//! - [`Move`] records with en passant, castling and promotion data
//! - Legal move filtering by simulated play ([`legality`])
//! - [`Game`] - turn, history, undo and pending promotions
//!
//! # Example
//!
//! ```
//! use chess_engine::{Game, MoveOutcome};
//! use chess_core::{Piece, Square};
//!
//! let mut game = Game::new();
//! assert_eq!(game.legal_moves().unwrap().len(), 20);
//!
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//! let mv = game.find_move(e2, e4).unwrap().expect("e2e4 is legal");
//! assert_eq!(game.make_move(mv).unwrap(), MoveOutcome::Normal);
//!
//! game.undo_move().unwrap();
//! assert_eq!(game.piece_at(6, 4), Some((chess_core::Color::White, Piece::Pawn)));
//! ```

mod board;
mod execute;
mod game;
pub mod legality;
mod mov;
pub mod movegen;
mod outcome;

pub use board::{Board, Cell, PieceId, PieceRecord};
pub use game::{Game, GameError, MoveOutcome};
pub use legality::LegalMoves;
pub use mov::{Castle, Move, Special};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{pseudo_legal_moves, rule_for, MoveContext, MovementRule};
pub use outcome::{Outcome, OutcomePolicy};
