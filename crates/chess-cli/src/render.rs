//! Text rendering of the board for the terminal.

use crate::config::CliConfig;
use chess_engine::Board;
use std::fmt::Write;

/// Draws the board rank 8 first with file letters underneath.
///
/// With `show_attacked`, empty squares attacked by the opponent of the side
/// to move are drawn as `x`. The marks come from the last legality pass.
pub fn render_board(board: &Board, config: &CliConfig) -> String {
    if !config.show_attacked {
        return if config.unicode {
            format!("{:#}", board)
        } else {
            board.to_string()
        };
    }

    let mut out = String::new();
    for row in 0..8u8 {
        let _ = write!(out, "{} ", 8 - row);
        for col in 0..8u8 {
            let square = chess_core::Square::new(row, col);
            let c = match board.piece_at(square) {
                Some((color, kind)) if config.unicode => kind.glyph(color),
                Some((color, kind)) => kind.to_char(color),
                None if board.is_attacked(square) => 'x',
                None => '.',
            };
            if col > 0 {
                out.push(' ');
            }
            out.push(c);
        }
        out.push('\n');
    }
    out.push_str("  a b c d e f g h");
    out
}
