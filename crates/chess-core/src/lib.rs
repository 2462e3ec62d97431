//! Core types for chess.
//!
//! This crate provides the fundamental types used across the chess engine:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates

mod color;
mod piece;
mod square;

pub use color::Color;
pub use piece::Piece;
pub use square::{File, Rank, Square, SquareError};
