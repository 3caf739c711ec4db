//! Move application and null move tests.

use super::{find_move, from_fen, play, sq};
use crate::board::{CastlingRights, Color, Move, Piece, PositionError, Square};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_en_passant_removes_captured_pawn() {
    let mut pos = from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
    let mv = find_move(&pos, "e5f6");
    assert!(mv.is_en_passant());
    pos.apply_move(mv, Color::White).unwrap();
    assert_eq!(pos.piece_at(sq("f6")), Some((Color::White, Piece::Pawn)));
    assert_eq!(pos.piece_at(sq("f5")), None);
    assert_eq!(pos.piece_at(sq("e5")), None);
    assert_eq!(pos.ep_file(), None);
    assert_eq!(pos.fingerprint(), pos.compute_fingerprint());
}

#[test]
fn test_en_passant_expires_after_one_ply() {
    let mut pos = from_fen("rnbqkbnr/pppp1ppp/8/4P3/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2");
    play(&mut pos, &["d7d5"]);
    assert_eq!(pos.ep_file(), Some(3));
    let eps: Vec<Move> = pos
        .legal_moves(Color::White)
        .into_iter()
        .filter(|mv| mv.is_en_passant())
        .collect();
    assert_eq!(eps.len(), 1);
    assert_eq!(eps[0].to_string(), "e5d6");

    play(&mut pos, &["g1f3", "g8f6"]);
    assert_eq!(pos.ep_file(), None);
    assert!(pos.legal_moves(Color::White).iter().all(|mv| !mv.is_en_passant()));
}

#[test]
fn test_promotion_places_new_piece() {
    let mut pos = from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
    let mv = find_move(&pos, "a7a8n");
    pos.apply_move(mv, Color::White).unwrap();
    assert_eq!(pos.piece_at(Square::A8), Some((Color::White, Piece::Knight)));
    assert!(pos.pieces(Color::White, Piece::Pawn).is_empty());
    assert_eq!(pos.halfmove_clock(), 0);
}

#[test]
fn test_kingside_castle_moves_rook() {
    let mut pos = from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    play(&mut pos, &["e1g1"]);
    assert_eq!(pos.piece_at(Square::G1), Some((Color::White, Piece::King)));
    assert_eq!(pos.piece_at(Square::F1), Some((Color::White, Piece::Rook)));
    assert_eq!(pos.piece_at(Square::H1), None);
    assert!(!pos.castling_rights().has(Color::White, true));
    assert!(!pos.castling_rights().has(Color::White, false));
    assert!(pos.castling_rights().has(Color::Black, true));
}

#[test]
fn test_queenside_castle_moves_rook() {
    let mut pos = from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
    play(&mut pos, &["e8c8"]);
    assert_eq!(pos.piece_at(Square::C8), Some((Color::Black, Piece::King)));
    assert_eq!(pos.piece_at(Square::D8), Some((Color::Black, Piece::Rook)));
    assert_eq!(pos.piece_at(Square::A8), None);
    assert_eq!(pos.fullmove_number(), 2);
}

#[test]
fn test_rook_capture_on_home_square_removes_right_for_good() {
    // Black bishop takes the h1 rook; a white rook later returning to h1
    // must not restore the kingside right.
    let mut pos = from_fen("4k3/8/8/8/8/8/6b1/R3K2R b KQ - 0 1");
    play(&mut pos, &["g2h1"]);
    assert!(!pos.castling_rights().has(Color::White, true));
    assert!(pos.castling_rights().has(Color::White, false));

    play(&mut pos, &["a1a2", "e8d8", "a2a8", "d8c7", "a8h8", "c7d7", "h8h1", "d7e7"]);
    assert_eq!(pos.piece_at(Square::H1), Some((Color::White, Piece::Rook)));
    assert!(!pos.castling_rights().has(Color::White, true));
    assert!(pos.legal_moves(Color::White).iter().all(|mv| !mv.is_castling()));
}

#[test]
fn test_rights_never_grow() {
    let mut pos = from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let mut rng = StdRng::seed_from_u64(0xCA57);
    let mut previous = pos.castling_rights().as_u8();
    for _ in 0..40 {
        let moves = pos.legal_moves(pos.side_to_move());
        if moves.is_empty() {
            break;
        }
        let mv = moves.as_slice()[rng.gen_range(0..moves.len())];
        pos.apply_move(mv, pos.side_to_move()).unwrap();
        let now = pos.castling_rights().as_u8();
        assert_eq!(now & !previous, 0, "rights grew after {mv}");
        previous = now;
    }
}

#[test]
fn test_double_push_sets_ep_file() {
    let mut pos = from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    play(&mut pos, &["c2c4"]);
    assert_eq!(pos.ep_file(), Some(2));
    assert_eq!(pos.en_passant_square(), Some(sq("c3")));
    play(&mut pos, &["g8f6"]);
    assert_eq!(pos.ep_file(), None);
}

#[test]
fn test_apply_rejects_empty_origin() {
    let mut pos = from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let before = pos;
    let err = pos.apply_move(Move::quiet(sq("e4"), sq("e5")), Color::White);
    assert!(matches!(err, Err(PositionError::IllegalMoveApplied { .. })));
    assert_eq!(pos, before);
}

#[test]
fn test_apply_rejects_wrong_color() {
    let mut pos = from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let err = pos.apply_move(Move::quiet(sq("e7"), sq("e6")), Color::White);
    assert!(matches!(err, Err(PositionError::IllegalMoveApplied { .. })));
}

#[test]
fn test_apply_rejects_capture_of_empty_square() {
    let mut pos = from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let err = pos.apply_move(Move::capture(Square::G1, sq("f3")), Color::White);
    assert!(matches!(err, Err(PositionError::IllegalMoveApplied { .. })));
}

#[test]
fn test_apply_rejects_own_piece_on_destination() {
    let mut pos = from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let err = pos.apply_move(Move::quiet(Square::A1, sq("a2")), Color::White);
    assert!(matches!(err, Err(PositionError::IllegalMoveApplied { .. })));
}

#[test]
fn test_apply_rejects_castle_without_rook() {
    let mut pos = from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1");
    let mut no_rook = from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    let castle = Move::castle(Square::E1, Square::G1);
    assert!(matches!(
        no_rook.apply_move(castle, Color::White),
        Err(PositionError::IllegalMoveApplied { .. })
    ));
    pos.apply_move(castle, Color::White).unwrap();
    assert_eq!(pos.piece_at(Square::F1), Some((Color::White, Piece::Rook)));
}

#[test]
fn test_apply_rejects_impossible_geometry() {
    let mut pos = from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let err = pos.apply_move(Move::quiet(Square::B1, sq("b3")), Color::White);
    assert!(matches!(err, Err(PositionError::IllegalMoveApplied { .. })));
}

#[test]
fn test_apply_sets_side_to_opponent_of_mover() {
    let mut pos = from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
    // Black moves out of turn; the side to move becomes White.
    pos.apply_move(Move::quiet(Square::E8, sq("d8")), Color::Black).unwrap();
    assert_eq!(pos.side_to_move(), Color::White);
    assert_eq!(pos.fingerprint(), pos.compute_fingerprint());
}

#[test]
fn test_null_move_round_trip_restores_position() {
    let mut pos = from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
    let original = pos;

    let previous = pos.make_null_move();
    assert_eq!(previous, Some(5));
    assert_eq!(pos.ep_file(), None);
    assert_eq!(pos.side_to_move(), Color::Black);
    assert_ne!(pos.fingerprint(), original.fingerprint());
    assert_eq!(pos.fingerprint(), pos.compute_fingerprint());

    pos.unmake_null_move(previous);
    assert_eq!(pos, original);
}

#[test]
fn test_null_move_preserves_castling_and_clocks() {
    let mut pos = from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 7 12");
    let previous = pos.make_null_move();
    assert_eq!(previous, None);
    assert_eq!(pos.castling_rights(), CastlingRights::all());
    assert_eq!(pos.halfmove_clock(), 7);
    assert_eq!(pos.fullmove_number(), 12);
    pos.unmake_null_move(previous);
    assert_eq!(pos.side_to_move(), Color::White);
}

#[test]
fn test_legal_moves_stable_after_copy_apply() {
    let pos = from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let before: Vec<String> = pos.legal_moves(Color::White).iter().map(Move::to_string).collect();
    for mv in pos.legal_moves(Color::White) {
        let mut child = pos;
        child.apply_move(mv, Color::White).unwrap();
    }
    let after: Vec<String> = pos.legal_moves(Color::White).iter().map(Move::to_string).collect();
    assert_eq!(before, after);
}

#[test]
fn test_fingerprint_matches_recompute_after_random_moves() {
    let mut pos = from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    for _ in 0..80 {
        let side = pos.side_to_move();
        let moves = pos.legal_moves(side);
        if moves.is_empty() {
            break;
        }
        let mv = moves.as_slice()[rng.gen_range(0..moves.len())];
        pos.apply_move(mv, side).unwrap();
        assert_eq!(pos.fingerprint(), pos.compute_fingerprint());
        assert!(pos.validate().is_ok());
    }
}

#[test]
fn test_transposition_gives_same_fingerprint() {
    let mut a = from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let mut b = a;
    play(&mut a, &["g1f3", "g8f6", "b1c3"]);
    play(&mut b, &["b1c3", "g8f6", "g1f3"]);
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_eq!(a, b);
}
