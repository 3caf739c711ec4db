#![allow(dead_code)]

use brahma_core::{CastlingRights, Color, Move, Piece, Position, PositionBuilder, Square};

/// Build a position from FEN through the public builder. Panics on bad input.
pub fn position_from_fen(fen: &str) -> Position {
    brahma_core::init().expect("table init failed");
    let fields: Vec<&str> = fen.split_whitespace().collect();
    assert!(fields.len() >= 4, "short FEN: {fen}");

    let mut builder = PositionBuilder::new();
    for (row, text) in fields[0].split('/').enumerate() {
        let mut file = 0;
        for ch in text.chars() {
            if let Some(skip) = ch.to_digit(10) {
                file += skip as usize;
                continue;
            }
            let piece = Piece::from_char(ch).unwrap_or_else(|| panic!("bad piece '{ch}' in {fen}"));
            let color = if ch.is_ascii_uppercase() { Color::White } else { Color::Black };
            let square = Square::new(7 - row, file).unwrap_or_else(|| panic!("board overflow in {fen}"));
            builder = builder.piece(square, color, piece);
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
        let target: Square = fields[3].parse().expect("bad en passant square");
        builder = builder.en_passant_file(target.file() as u8);
    }
    if let Some(clock) = fields.get(4) {
        builder = builder.halfmove_clock(clock.parse().expect("bad halfmove clock"));
    }
    if let Some(number) = fields.get(5) {
        builder = builder.fullmove_number(number.parse().expect("bad fullmove number"));
    }
    builder.build().unwrap_or_else(|e| panic!("{e}: {fen}"))
}

/// The legal move for the side to move written as `uci`.
pub fn legal_move(pos: &Position, uci: &str) -> Move {
    pos.legal_moves(pos.side_to_move())
        .into_iter()
        .find(|mv| mv.to_string() == uci)
        .unwrap_or_else(|| panic!("{uci} is not legal in\n{pos}"))
}

/// Play coordinate moves for alternating sides.
pub fn play_line(pos: &mut Position, line: &str) {
    for uci in line.split_whitespace() {
        let mv = legal_move(pos, uci);
        let side = pos.side_to_move();
        pos.apply_move(mv, side).expect("legal move rejected");
    }
}
