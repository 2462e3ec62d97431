//! Integration tests for chess-engine.
//!
//! Random games check that undo restores every earlier position and that no
//! legal move leaves the mover's king open to capture. The remaining tests
//! pin down castling and en passant on hand-built boards.

use chess_core::{Color, Piece, Square};
use chess_engine::{
    pseudo_legal_moves, Board, Game, GameError, Move, MoveContext, MoveOutcome, OutcomePolicy,
};
use proptest::prelude::*;

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).unwrap()
}

fn play(game: &mut Game, from: &str, to: &str) -> MoveOutcome {
    let mv = game
        .find_move(sq(from), sq(to))
        .unwrap()
        .unwrap_or_else(|| panic!("{}{} should be legal", from, to));
    game.make_move(mv).unwrap()
}

fn has_move(game: &mut Game, from: &str, to: &str) -> bool {
    game.find_move(sq(from), sq(to)).unwrap().is_some()
}

/// Plays up to `choices.len()` plies, picking moves by index.
/// Returns the boards seen before each ply.
fn random_game(game: &mut Game, choices: &[(usize, usize)]) -> Vec<Board> {
    let mut seen = Vec::new();
    for &(pick, promo) in choices {
        let moves: Vec<Move> = game.legal_moves().unwrap().to_vec();
        if moves.is_empty() {
            assert!(game.is_terminal());
            break;
        }
        seen.push(game.board().clone());
        let mv = moves[pick % moves.len()];
        if let MoveOutcome::PendingPromotion { .. } = game.make_move(mv).unwrap() {
            let kind = Piece::PROMOTION_CHOICES[promo % Piece::PROMOTION_CHOICES.len()];
            game.complete_promotion(kind).unwrap();
        }
    }
    seen
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn undo_restores_every_position(choices in prop::collection::vec((0usize..256, 0usize..4), 1..60)) {
        let mut game = Game::new();
        let seen = random_game(&mut game, &choices);
        prop_assert_eq!(game.ply_count(), seen.len());

        for before in seen.iter().rev() {
            game.undo_move().unwrap();
            prop_assert_eq!(game.board(), before);
        }
        prop_assert_eq!(game.board(), &Board::standard());
        prop_assert_eq!(game.side_to_move(), Color::White);
        prop_assert_eq!(game.undo_move(), Err(GameError::NothingToUndo));
    }

    #[test]
    fn legal_moves_never_expose_the_king(choices in prop::collection::vec((0usize..256, 0usize..4), 1..60)) {
        let mut game = Game::new();
        for &(pick, promo) in &choices {
            let moves: Vec<Move> = game.legal_moves().unwrap().to_vec();
            if moves.is_empty() {
                break;
            }
            let mover = game.side_to_move();
            if let MoveOutcome::PendingPromotion { .. } = game.make_move(moves[pick % moves.len()]).unwrap() {
                game.complete_promotion(Piece::PROMOTION_CHOICES[promo]).unwrap();
            }

            let ctx = MoveContext::replies(game.board(), mover.opposite(), game.last_move());
            let replies = pseudo_legal_moves(&ctx);
            prop_assert!(replies.iter().all(|m| !m.captures_king()));
        }
    }
}

#[test]
fn castling_both_sides_from_open_back_rank() {
    let mut board = Board::empty();
    board.spawn(sq("e1"), Color::White, Piece::King);
    board.spawn(sq("a1"), Color::White, Piece::Rook);
    board.spawn(sq("h1"), Color::White, Piece::Rook);
    board.spawn(sq("e8"), Color::Black, Piece::King);
    let mut game = Game::from_board(board, Color::White);

    let castles: Vec<_> = game
        .legal_moves()
        .unwrap()
        .iter()
        .filter(|m| m.is_castle())
        .map(|m| m.to().to_algebraic())
        .collect();
    assert_eq!(castles.len(), 2);
    assert!(castles.contains(&"a1".to_string()));
    assert!(castles.contains(&"h1".to_string()));

    let outcome = play(&mut game, "e1", "a1");
    assert_eq!(
        outcome,
        MoveOutcome::Castled {
            king_to: sq("c1"),
            rook_from: sq("a1"),
            rook_to: sq("d1"),
        }
    );
    assert_eq!(game.board().piece_at(sq("c1")), Some((Color::White, Piece::King)));
    assert_eq!(game.board().piece_at(sq("d1")), Some((Color::White, Piece::Rook)));
}

#[test]
fn no_castling_through_attacked_square() {
    let mut board = Board::empty();
    board.spawn(sq("e1"), Color::White, Piece::King);
    board.spawn(sq("h1"), Color::White, Piece::Rook);
    board.spawn(sq("f8"), Color::Black, Piece::Rook);
    board.spawn(sq("a8"), Color::Black, Piece::King);
    let mut game = Game::from_board(board, Color::White);

    assert!(!has_move(&mut game, "e1", "h1"));
    assert!(!has_move(&mut game, "e1", "g1"));
}

#[test]
fn no_castling_out_of_check() {
    let mut board = Board::empty();
    board.spawn(sq("e1"), Color::White, Piece::King);
    board.spawn(sq("h1"), Color::White, Piece::Rook);
    board.spawn(sq("e8"), Color::Black, Piece::Rook);
    board.spawn(sq("a8"), Color::Black, Piece::King);
    let mut game = Game::from_board(board, Color::White);

    assert!(game.legal_moves().unwrap().iter().all(|m| !m.is_castle()));
    assert!(game.in_check());
}

#[test]
fn queenside_blocked_by_attack_on_b_file() {
    let mut board = Board::empty();
    board.spawn(sq("e1"), Color::White, Piece::King);
    board.spawn(sq("a1"), Color::White, Piece::Rook);
    board.spawn(sq("a3"), Color::Black, Piece::Knight);
    board.spawn(sq("h8"), Color::Black, Piece::King);
    let mut game = Game::from_board(board, Color::White);

    assert!(!has_move(&mut game, "e1", "a1"));
}

#[test]
fn rook_that_moved_and_returned_cannot_castle() {
    let mut board = Board::empty();
    board.spawn(sq("e1"), Color::White, Piece::King);
    board.spawn(sq("h1"), Color::White, Piece::Rook);
    board.spawn(sq("a8"), Color::Black, Piece::King);
    let mut game = Game::from_board(board, Color::White);
    assert!(has_move(&mut game, "e1", "h1"));

    play(&mut game, "h1", "h2");
    play(&mut game, "a8", "b8");
    play(&mut game, "h2", "h1");
    play(&mut game, "b8", "a8");
    assert!(!has_move(&mut game, "e1", "h1"));

    // Taking the excursion back restores the right.
    for _ in 0..4 {
        game.undo_move().unwrap();
    }
    assert!(has_move(&mut game, "e1", "h1"));
}

#[test]
fn castle_undo_restores_rook_and_king() {
    let mut game = Game::new();
    for (from, to) in [
        ("e2", "e4"),
        ("e7", "e5"),
        ("g1", "f3"),
        ("b8", "c6"),
        ("f1", "c4"),
        ("g8", "f6"),
    ] {
        play(&mut game, from, to);
    }
    let before = game.board().clone();

    assert!(matches!(
        play(&mut game, "e1", "h1"),
        MoveOutcome::Castled { .. }
    ));
    let undone = game.undo_move().unwrap();
    assert!(undone.is_castle());
    assert_eq!(game.board(), &before);
    assert!(has_move(&mut game, "e1", "g1"));
}

#[test]
fn en_passant_captures_beside_pawn() {
    let mut game = Game::new();
    play(&mut game, "e2", "e4");
    play(&mut game, "a7", "a6");
    play(&mut game, "e4", "e5");
    play(&mut game, "f7", "f5");

    assert_eq!(
        play(&mut game, "e5", "f6"),
        MoveOutcome::EnPassant {
            captured_square: sq("f5")
        }
    );
    assert!(game.board().is_empty(sq("f5")));
    assert_eq!(
        game.board().piece_at(sq("f6")),
        Some((Color::White, Piece::Pawn))
    );
}

#[test]
fn en_passant_requires_double_push_last_ply() {
    let mut game = Game::new();
    play(&mut game, "e2", "e4");
    play(&mut game, "f7", "f6");
    play(&mut game, "e4", "e5");
    play(&mut game, "f6", "f5");

    assert!(!has_move(&mut game, "e5", "f6"));
}

#[test]
fn moves_rejected_after_checkmate() {
    let mut game = Game::new();
    play(&mut game, "f2", "f3");
    play(&mut game, "e7", "e5");
    play(&mut game, "g2", "g4");
    let mate = game.find_move(sq("d8"), sq("h4")).unwrap().unwrap();
    game.make_move(mate).unwrap();

    assert!(game.legal_moves().unwrap().is_empty());
    assert!(game.is_terminal());
    assert_eq!(game.make_move(mate), Err(GameError::GameOver));
    assert_eq!(game.outcome().and_then(|o| o.winner()), Some(Color::Black));
}

#[test]
fn stalemate_policy_in_game() {
    let mut board = Board::empty();
    board.spawn(sq("a8"), Color::Black, Piece::King);
    board.spawn(sq("b6"), Color::White, Piece::Queen);
    board.spawn(sq("h1"), Color::White, Piece::King);

    let mut game = Game::from_board(board.clone(), Color::Black);
    game.set_policy(OutcomePolicy::DistinguishStalemate);
    assert!(game.legal_moves().unwrap().is_empty());
    assert!(!game.in_check());
    assert_eq!(game.outcome().and_then(|o| o.winner()), None);

    let mut game = Game::from_board(board, Color::Black);
    assert!(game.legal_moves().unwrap().is_empty());
    assert_eq!(game.outcome().and_then(|o| o.winner()), Some(Color::White));
}

#[test]
fn underpromotion_and_undo() {
    let mut board = Board::empty();
    board.spawn(sq("b7"), Color::White, Piece::Pawn);
    board.spawn(sq("a8"), Color::Black, Piece::Rook);
    board.spawn(sq("e1"), Color::White, Piece::King);
    board.spawn(sq("h5"), Color::Black, Piece::King);
    let before = board.clone();
    let mut game = Game::from_board(board, Color::White);

    assert_eq!(
        play(&mut game, "b7", "a8"),
        MoveOutcome::PendingPromotion { square: sq("a8") }
    );
    assert_eq!(game.pending_promotion(), Some(sq("a8")));
    assert_eq!(
        game.complete_promotion(Piece::King),
        Err(GameError::InvalidPromotionPiece(Piece::King))
    );
    game.complete_promotion(Piece::Knight).unwrap();
    assert_eq!(
        game.board().piece_at(sq("a8")),
        Some((Color::White, Piece::Knight))
    );
    assert_eq!(game.last_move().and_then(|m| m.promoted_to()), Some(Piece::Knight));

    game.undo_move().unwrap();
    assert_eq!(game.board(), &before);
}
