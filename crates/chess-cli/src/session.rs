//! One interactive game: turns player commands into engine calls and
//! writes the replies.

use crate::command::{Command, HELP};
use crate::config::CliConfig;
use crate::render::render_board;
use chess_engine::{Game, GameError, MoveOutcome};
use std::io::Write;

pub struct Session {
    game: Game,
    config: CliConfig,
}

impl Session {
    pub fn new(config: CliConfig) -> Self {
        Self {
            game: Game::with_policy(config.outcome_policy.into()),
            config,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Runs one command. Returns `false` when the player asked to quit.
    ///
    /// Rule violations are reported to the player; only output failures
    /// are errors.
    pub fn handle(&mut self, cmd: Command, out: &mut impl Write) -> anyhow::Result<bool> {
        match cmd {
            Command::Move { from, to } => {
                let mv = match self.game.find_move(from, to) {
                    Ok(Some(mv)) => mv,
                    Ok(None) if self.game.is_terminal() => {
                        writeln!(out, "{}", GameError::GameOver)?;
                        return Ok(true);
                    }
                    Ok(None) => {
                        writeln!(out, "illegal move: {}{}", from, to)?;
                        return Ok(true);
                    }
                    Err(e) => {
                        writeln!(out, "{}", e)?;
                        return Ok(true);
                    }
                };
                match self.game.make_move(mv) {
                    Ok(MoveOutcome::Castled {
                        rook_from, rook_to, ..
                    }) => writeln!(out, "castled, rook {} -> {}", rook_from, rook_to)?,
                    Ok(MoveOutcome::EnPassant { captured_square }) => {
                        writeln!(out, "en passant, pawn on {} captured", captured_square)?
                    }
                    Ok(MoveOutcome::Normal | MoveOutcome::PendingPromotion { .. }) => {}
                    Err(e) => {
                        writeln!(out, "{}", e)?;
                        return Ok(true);
                    }
                }
                self.show(out)?;
            }
            Command::Promote(kind) => match self.game.complete_promotion(kind) {
                Ok(()) => self.show(out)?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            Command::Undo => match self.game.undo_move() {
                Ok(mv) => {
                    writeln!(out, "took back {}", mv)?;
                    self.show(out)?;
                }
                Err(e) => writeln!(out, "{}", e)?,
            },
            Command::Moves => match self.game.legal_moves() {
                Ok(moves) => {
                    let mut list: Vec<String> = moves.iter().map(|m| m.to_notation()).collect();
                    list.sort();
                    if list.is_empty() {
                        writeln!(out, "no legal moves")?;
                    } else {
                        writeln!(out, "{}", list.join(" "))?;
                    }
                }
                Err(e) => writeln!(out, "{}", e)?,
            },
            Command::Board => self.show(out)?,
            Command::Reset => {
                self.game.reset();
                self.show(out)?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(false),
            Command::Empty => {}
        }
        Ok(true)
    }

    /// Draws the board followed by a status line.
    pub fn show(&mut self, out: &mut impl Write) -> anyhow::Result<()> {
        let status = self.status();
        writeln!(out, "{}", render_board(self.game.board(), &self.config))?;
        writeln!(out, "{}", status)?;
        Ok(())
    }

    fn status(&mut self) -> String {
        if let Some(square) = self.game.pending_promotion() {
            return format!("pawn on {} promotes: type 'promote q|r|b|n'", square);
        }
        // Refreshes outcome, check flag and attack marks.
        if let Err(e) = self.game.legal_moves() {
            return e.to_string();
        }
        match self.game.outcome() {
            Some(outcome) => outcome.to_string(),
            None if self.game.in_check() => format!("{} to move, in check", self.game.side_to_move()),
            None => format!("{} to move", self.game.side_to_move()),
        }
    }
}
