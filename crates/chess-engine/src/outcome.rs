//! How a game without legal moves ends.
//!
//! When the side to move has no legal move the game is over. Whether that
//! counts as a loss even without check is a policy choice: the classic
//! behavior of this engine declares the other side the winner in both cases.

use chess_core::Color;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No legal moves while in check.
    Checkmate { winner: Color },
    /// No legal moves without check, scored as a draw.
    Stalemate,
    /// No legal moves without check, scored as a loss for the side to move.
    NoLegalMoves { winner: Color },
}

impl Outcome {
    /// The winning color, or `None` for a draw.
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } | Outcome::NoLegalMoves { winner } => Some(winner),
            Outcome::Stalemate => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "{} wins by checkmate", winner),
            Outcome::Stalemate => write!(f, "Draw by stalemate"),
            Outcome::NoLegalMoves { winner } => {
                write!(f, "{} wins, opponent has no legal moves", winner)
            }
        }
    }
}

/// Scoring of a position without legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutcomePolicy {
    /// The side to move loses whether or not it is in check.
    #[default]
    SideToMoveLoses,
    /// Checkmate loses; stalemate is a draw.
    DistinguishStalemate,
}

impl OutcomePolicy {
    /// Scores a terminal position for `side_to_move`.
    pub fn classify(self, side_to_move: Color, in_check: bool) -> Outcome {
        let winner = side_to_move.opposite();
        match (self, in_check) {
            (_, true) => Outcome::Checkmate { winner },
            (OutcomePolicy::SideToMoveLoses, false) => Outcome::NoLegalMoves { winner },
            (OutcomePolicy::DistinguishStalemate, false) => Outcome::Stalemate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkmate_under_both_policies() {
        for policy in [
            OutcomePolicy::SideToMoveLoses,
            OutcomePolicy::DistinguishStalemate,
        ] {
            assert_eq!(
                policy.classify(Color::White, true),
                Outcome::Checkmate {
                    winner: Color::Black
                }
            );
        }
    }

    #[test]
    fn stalemate_depends_on_policy() {
        assert_eq!(
            OutcomePolicy::SideToMoveLoses.classify(Color::Black, false),
            Outcome::NoLegalMoves {
                winner: Color::White
            }
        );
        assert_eq!(
            OutcomePolicy::DistinguishStalemate.classify(Color::Black, false),
            Outcome::Stalemate
        );
        assert_eq!(Outcome::Stalemate.winner(), None);
    }

    #[test]
    fn display() {
        let outcome = Outcome::Checkmate {
            winner: Color::Black,
        };
        assert_eq!(outcome.to_string(), "Black wins by checkmate");
    }
}
