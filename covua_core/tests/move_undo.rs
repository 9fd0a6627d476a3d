use covua_core::logic::board::{Board, Color};
use covua_core::logic::generator::MoveGenerator;

const FIXTURES: [&str; 5] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    // Castling available on both wings for both sides.
    "r3k2r/pppq1ppp/2n2n2/3pp3/3PP3/2N2N2/PPPQ1PPP/R3K2R w KQkq - 6 1",
    // En-passant capture on the table.
    "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 1",
    // Straight and capturing promotions.
    "1n6/P6k/8/8/8/8/8/7K w - - 0 1",
    // Open tactical middlegame.
    "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK1NR w KQkq - 4 1",
];

/// Applying then immediately undoing any generated move (maintenance
/// moves included) must leave the whole board bit-for-bit identical.
#[test]
fn test_apply_undo_restores_board_exactly() {
    let generator = MoveGenerator::new();
    for fen in FIXTURES {
        let (mut board, turn) = Board::from_fen(fen).expect("fixture FEN must parse");
        let reference = board.clone();

        for color in [turn, turn.opposite()] {
            let (regulars, maintenance) = generator.generate(&board, color);
            for mv in regulars.iter().chain(maintenance.iter()) {
                board.apply_move(mv);
                board.undo_move(mv);
                assert_eq!(board, reference, "fen '{fen}' move {mv}");
            }
        }
    }
}

/// A two-ply walk with the same push/undo discipline the search uses;
/// the board must come back identical after every subtree.
#[test]
fn test_nested_apply_undo_stack() {
    let generator = MoveGenerator::new();
    let (mut board, turn) = Board::from_fen(FIXTURES[1]).expect("fixture FEN must parse");
    let reference = board.clone();

    let (regulars, maintenance) = generator.generate(&board, turn);
    for mv in &maintenance {
        board.apply_move(mv);
    }
    let after_maintenance = board.clone();

    for mv in &regulars {
        board.apply_move(mv);
        let parent = board.clone();

        let (replies, reply_maintenance) = generator.generate(&board, turn.opposite());
        for nm in &reply_maintenance {
            board.apply_move(nm);
        }
        let child_base = board.clone();
        for reply in &replies {
            board.apply_move(reply);
            board.undo_move(reply);
            assert_eq!(board, child_base, "reply {reply} under {mv}");
        }
        for nm in reply_maintenance.iter().rev() {
            board.undo_move(nm);
        }
        assert_eq!(board, parent, "maintenance rollback under {mv}");

        board.undo_move(mv);
        assert_eq!(board, after_maintenance, "rollback of {mv}");
    }

    for mv in maintenance.iter().rev() {
        board.undo_move(mv);
    }
    assert_eq!(board, reference);
}

#[test]
fn test_en_passant_undo_restores_victim_flags() {
    let (mut board, turn) =
        Board::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 1")
            .expect("fixture FEN must parse");
    assert_eq!(turn, Color::White);
    let reference = board.clone();

    let generator = MoveGenerator::new();
    let (regulars, _) = generator.generate(&board, turn);
    let ep = regulars
        .iter()
        .find(|m| m.capture.is_some_and(|p| p.passing))
        .expect("en-passant capture expected");

    board.apply_move(ep);
    // The passing pawn is off the board entirely.
    assert!(board.get_piece(4, 3).is_none());
    board.undo_move(ep);
    assert_eq!(board, reference);
    assert!(board.get_piece(4, 3).is_some_and(|p| p.passing));
}
