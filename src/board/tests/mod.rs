//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Node counts for standard positions
//! - `draw.rs` - Draw detection (50-move, insufficient material, stalemate)
//! - `make_unmake.rs` - Move application and null moves
//! - `edge_cases.rs` - Special positions and edge cases
//! - `movegen_views.rs` - Quiet/capture/promotion/check/escape views and attack queries
//! - `proptest.rs` - Property-based tests

mod make_unmake;

use crate::board::{CastlingRights, Color, Move, Piece, Position, PositionBuilder, Square};

/// Build a position from FEN. Test-only; panics on malformed input.
pub(crate) fn from_fen(fen: &str) -> Position {
    crate::init().expect("init failed");
    let fields: Vec<&str> = fen.split_whitespace().collect();
    assert!(fields.len() >= 4, "FEN needs at least four fields: {fen}");

    let mut builder = PositionBuilder::new();
    for (row, rank_text) in fields[0].split('/').enumerate() {
        let rank = 7 - row;
        let mut file = 0;
        for ch in rank_text.chars() {
            if let Some(skip) = ch.to_digit(10) {
                file += skip as usize;
                continue;
            }
            let piece = Piece::from_char(ch).unwrap_or_else(|| panic!("bad piece '{ch}' in {fen}"));
            let color = if ch.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            builder = builder.piece(Square::new(rank, file).unwrap(), color, piece);
            file += 1;
        }
    }

    builder = builder.side_to_move(if fields[1] == "b" { Color::Black } else { Color::White });

    let mut rights = CastlingRights::none();
    for ch in fields[2].chars() {
        match ch {
            'K' => rights.set(Color::White, true),
            'Q' => rights.set(Color::White, false),
            'k' => rights.set(Color::Black, true),
            'q' => rights.set(Color::Black, false),
            _ => {}
        }
    }
    builder = builder.castling(rights);

    if fields[3] != "-" {
        let ep: Square = fields[3].parse().unwrap();
        builder = builder.en_passant_file(ep.file() as u8);
    }
    if let Some(clock) = fields.get(4) {
        builder = builder.halfmove_clock(clock.parse().unwrap());
    }
    if let Some(number) = fields.get(5) {
        builder = builder.fullmove_number(number.parse().unwrap());
    }
    builder.build().unwrap_or_else(|e| panic!("{e}: {fen}"))
}

pub(crate) fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

/// The legal move for the side to move whose coordinate text is `uci`.
pub(crate) fn find_move(pos: &Position, uci: &str) -> Move {
    pos.legal_moves(pos.side_to_move())
        .into_iter()
        .find(|mv| mv.to_string() == uci)
        .unwrap_or_else(|| panic!("{uci} is not legal in\n{pos}"))
}

/// Play a sequence of coordinate moves for alternating sides.
pub(crate) fn play(pos: &mut Position, moves: &[&str]) {
    for uci in moves {
        let mv = find_move(pos, uci);
        let side = pos.side_to_move();
        pos.apply_move(mv, side).unwrap();
    }
}
