//! Parsing of the commands typed at the prompt.

use chess_core::{Piece, Square, SquareError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error(transparent)]
    Square(#[from] SquareError),

    #[error("expected a promotion piece (q, r, b or n), got '{0}'")]
    InvalidPromotion(String),

    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),
}

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the piece on `from` to `to`.
    Move { from: Square, to: Square },
    /// Choose the piece for a pending promotion.
    Promote(Piece),
    Undo,
    /// List the legal moves.
    Moves,
    Board,
    Reset,
    Help,
    Quit,
    /// Blank line.
    Empty,
}

impl Command {
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd.to_ascii_lowercase().as_str() {
            "" => Ok(Command::Empty),
            "undo" | "u" => Ok(Command::Undo),
            "moves" | "m" => Ok(Command::Moves),
            "board" | "b" => Ok(Command::Board),
            "reset" => Ok(Command::Reset),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "promote" | "p" => Self::parse_promotion(parts.next().unwrap_or("")),
            word => Self::parse_move(word).ok_or_else(|| CommandError::Unknown(input.to_string()))?,
        }
    }

    fn parse_promotion(arg: &str) -> Result<Self, CommandError> {
        let mut chars = arg.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Piece::from_char(c)
                .map(|(kind, _)| kind)
                .filter(|kind| kind.is_promotion_choice())
                .map(Command::Promote)
                .ok_or_else(|| CommandError::InvalidPromotion(arg.to_string())),
            _ => Err(CommandError::InvalidPromotion(arg.to_string())),
        }
    }

    /// `e2e4`; `None` when the word is not shaped like a move at all.
    fn parse_move(word: &str) -> Option<Result<Self, CommandError>> {
        if word.len() != 4 || !word.is_ascii() {
            return None;
        }
        let (from, to) = word.split_at(2);
        let parsed = Square::from_algebraic(from).and_then(|from| {
            Square::from_algebraic(to).map(|to| Command::Move { from, to })
        });
        Some(parsed.map_err(CommandError::from))
    }
}

pub const HELP: &str = "\
Commands:
  e2e4          move a piece (castle with e1h1 or e1g1)
  promote <p>   choose the promotion piece: q, r, b or n
  undo          take back the last move
  moves         list the legal moves
  board         redraw the board
  reset         start a new game
  help          show this text
  quit          leave";
