use pretty_assertions::assert_eq;
use referee_core::{
    board::{Color, Piece, PieceType, Square},
    position::{GameResult, Position, Reason, Winner},
};

const MIDDLEGAMES: [&str; 4] = [
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
];

#[test]
fn legal_moves_never_leave_the_mover_in_check() {
    for fen in MIDDLEGAMES {
        let position = Position::from_fen(fen).unwrap();
        let mover = position.to_move();

        for the_move in position.legal_moves() {
            let mut after = position.clone();
            let played = after.make_move(the_move.from_square(), the_move.to_square(), mover);
            assert!(played.is_ok(), "{fen}: {the_move} rejected with {played:?}");

            if let Some(piece) = the_move.promotion() {
                after.promote(piece.piece_type(), mover).unwrap();
            }
            assert!(!after.is_in_check(mover), "{fen}: {the_move} leaves check");
        }
    }
}

#[test]
fn pinned_pieces_stay_on_their_line() {
    for fen in [
        "4k3/4r3/8/8/4B3/8/8/4K3 w - - 0 1",
        "4k3/8/8/1b6/8/3Q4/8/5K2 w - - 0 1",
        "8/8/8/8/R2p3k/8/8/K7 b - - 0 1",
    ] {
        let position = Position::from_fen(fen).unwrap();
        let pinned_side = position.to_move();

        for pin in &position.interactions().pieces(pinned_side.flip()).pins {
            let reachable = position
                .moves_of(pin.pinned)
                .map(|set| set.reachable())
                .unwrap_or_default();
            assert!(
                (reachable & !pin.line).is_empty(),
                "{fen}: pinned piece on {} leaves its line",
                pin.pinned
            );
        }
    }
}

#[test]
fn fen_round_trip() {
    for fen in MIDDLEGAMES {
        let position = Position::from_fen(fen).unwrap();
        let reparsed = Position::from_fen(&position.fen()).unwrap();

        assert_eq!(reparsed.board(), position.board());
        assert_eq!(reparsed.to_move(), position.to_move());
        assert_eq!(reparsed.castling(), position.castling());
        assert_eq!(reparsed.en_passant(), position.en_passant());
    }
}

#[test]
fn insufficient_material() {
    let drawn = Some(GameResult::draw(Reason::InsufficientMaterial));

    let cases = [
        ("3K4/2B5/8/8/8/8/8/3k4 w - - 0 1", drawn),
        ("3K4/3P4/8/4nn2/8/8/8/3k4 w - - 0 1", None),
        ("4k3/8/8/8/8/8/8/4KB1B w - - 0 1", drawn),
        ("2B1KB2/8/8/8/8/8/8/4k3 w - - 0 1", None),
    ];

    for (fen, expected) in cases {
        assert_eq!(Position::from_fen(fen).unwrap().result(), expected, "{fen}");
    }
}

#[test]
fn capturing_the_last_pawn_draws() {
    let mut position = Position::from_fen("4k3/8/8/8/8/8/3p4/4K3 w - - 0 1").unwrap();
    position.make_move(Square::E1, Square::D2, Color::White).unwrap();

    assert_eq!(
        position.result(),
        Some(GameResult::draw(Reason::InsufficientMaterial))
    );
}

#[test]
fn checkmate() {
    let position =
        Position::from_fen("rnbqkbnr/ppppp2p/8/5ppQ/8/4P3/PPPP1PPP/RNB1KBNR w KQkq - 0 1").unwrap();
    let result = position.result().unwrap();

    assert_eq!(result.winner, Winner::White);
    assert_eq!(result.reason, Reason::Mate);
}

#[test]
fn double_check_only_allows_king_moves() {
    // knight f6 and rook e1 both give check
    let position = Position::from_fen("4k3/8/5N2/8/8/8/3b4/4R1K1 b - - 0 1").unwrap();

    assert!(position.is_in_check(Color::Black));
    assert_eq!(position.interactions().checks_against(Color::Black).len(), 2);
    assert!(position
        .legal_moves()
        .iter()
        .all(|m| m.is_move_of(PieceType::King)));
    assert!(!position.legal_moves().is_empty());
}

#[test]
fn knight_checks_cannot_be_blocked() {
    let position = Position::from_fen("4k3/8/8/8/8/3n4/8/R3K3 w - - 0 1").unwrap();
    let moves = position.legal_moves();

    assert!(position.is_in_check(Color::White));
    assert!(moves.iter().all(|m| m.is_move_of(PieceType::King)));
    assert!(moves.iter().all(|m| m.to_square() != Square::F2));
    assert_eq!(moves.len(), 4);
}

#[test]
fn slider_checks_can_be_blocked() {
    let position = Position::from_fen("4r1k1/8/8/8/8/2N5/3P1P2/4K3 w - - 0 1").unwrap();

    let mut moves = position
        .legal_moves()
        .into_iter()
        .map(|m| (m.from_square(), m.to_square()))
        .collect::<Vec<_>>();
    moves.sort();

    let mut expected = vec![
        (Square::E1, Square::D1),
        (Square::E1, Square::F1),
        (Square::C3, Square::E2),
        (Square::C3, Square::E4),
    ];
    expected.sort();

    assert_eq!(moves, expected);
}

#[test]
fn en_passant_is_only_available_immediately() {
    let mut position = Position::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1").unwrap();
    position.make_move(Square::D7, Square::D5, Color::Black).unwrap();
    assert_eq!(position.en_passant(), Some(Square::D6));

    let mut taken = position.clone();
    let the_move = taken.make_move(Square::E5, Square::D6, Color::White).unwrap();
    assert!(the_move.is_en_passant());
    assert_eq!(taken.board().piece_at(Square::D5), None);

    position.make_move(Square::E1, Square::E2, Color::White).unwrap();
    position.make_move(Square::E8, Square::E7, Color::Black).unwrap();
    assert!(position
        .make_move(Square::E5, Square::D6, Color::White)
        .is_err());
}

#[test]
fn castling_requires_every_condition() {
    // in check
    let checked = Position::from_fen("4k3/8/8/8/8/8/8/R3K2r w Q - 0 1").unwrap();
    assert!(checked.legal_moves().iter().all(|m| !m.is_castle()));

    // blocked path
    let blocked = Position::from_fen("4k3/8/8/8/8/8/8/RN2K3 w Q - 0 1").unwrap();
    assert!(blocked.legal_moves().iter().all(|m| !m.is_castle()));

    // missing right
    let no_right = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
    assert!(no_right.legal_moves().iter().all(|m| !m.is_castle()));

    // destination attacked
    let attacked = Position::from_fen("2r1k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
    assert!(attacked.legal_moves().iter().all(|m| !m.is_castle()));

    // all clear, and an attacked b1 does not matter
    let clear = Position::from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
    let castle = clear
        .legal_moves()
        .into_iter()
        .find(|m| m.is_castle())
        .unwrap();
    assert_eq!(castle.to_square(), Square::C1);

    let mut after = clear.clone();
    after.make_move(Square::E1, Square::C1, Color::White).unwrap();
    assert_eq!(after.board().piece_at(Square::D1), Some(Piece::WHITE_ROOK));
    assert_eq!(after.board().piece_at(Square::A1), None);
}
