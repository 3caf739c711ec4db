//! Move application and the reversible null move.
//!
//! Ordinary moves are destructive: callers that need the previous position
//! copy it first (`Position` is `Copy`). The fingerprint is updated
//! incrementally and checked against a full recomputation in debug builds.

use super::error::PositionError;
use super::{Color, Move, Piece, Position, Square};

impl Position {
    /// Apply `mv` for `color` and hand the move to the opponent.
    ///
    /// The move must be pseudo-legal for `color`; it may leave `color`'s own
    /// king in check (use [`Position::legal_moves`] to avoid that). On error
    /// the position is left untouched.
    ///
    /// # Errors
    /// [`PositionError::IllegalMoveApplied`] when `mv` does not fit the board.
    pub fn apply_move(&mut self, mv: Move, color: Color) -> Result<(), PositionError> {
        self.check_applicable(mv, color)?;
        self.make_move(mv, color);
        Ok(())
    }

    fn check_applicable(&self, mv: Move, color: Color) -> Result<(), PositionError> {
        let from = mv.from();
        let to = mv.to();
        let Some(piece) = self.piece_on(from, color) else {
            return Err(PositionError::illegal(mv, format!("no {color} piece on {from}")));
        };
        if self.occupancy(color).contains(to) {
            return Err(PositionError::illegal(mv, format!("{to} holds a {color} piece")));
        }

        if mv.is_en_passant() {
            let victim = Square::from_coords(from.rank(), to.file());
            if piece != Piece::Pawn || self.piece_on(victim, color.opponent()) != Some(Piece::Pawn) {
                return Err(PositionError::illegal(mv, "no pawn to capture en passant"));
            }
        } else if mv.is_capture() {
            match self.piece_on(to, color.opponent()) {
                None => {
                    return Err(PositionError::illegal(mv, format!("capture flag but {to} is empty")))
                }
                Some(Piece::King) => return Err(PositionError::illegal(mv, "kings cannot be captured")),
                Some(_) => {}
            }
        } else if self.all_occupied.contains(to) {
            return Err(PositionError::illegal(mv, format!("{to} is occupied but move is not a capture")));
        }

        if mv.is_castling() {
            let rook_file = if to.file() == 6 { 7 } else { 0 };
            let rook_sq = Square::from_coords(to.rank(), rook_file);
            if piece != Piece::King || self.piece_on(rook_sq, color) != Some(Piece::Rook) {
                return Err(PositionError::illegal(mv, format!("castling rook missing from {rook_sq}")));
            }
        }

        if !self.pseudo_legal_moves(color).contains(mv) {
            return Err(PositionError::illegal(mv, format!("not a move for {color} in this position")));
        }
        Ok(())
    }

    /// Apply a move already known to be pseudo-legal for `color`.
    pub(crate) fn make_move(&mut self, mv: Move, color: Color) {
        let from = mv.from();
        let to = mv.to();
        let them = color.opponent();
        let Some(piece) = self.piece_on(from, color) else {
            debug_assert!(false, "make_move {mv}: origin empty");
            return;
        };
        let keys = self.tables.zobrist();
        let mut hash = self.fingerprint;

        if let Some(file) = self.ep_file.take() {
            hash ^= keys.en_passant(file);
        }
        hash ^= keys.castling(self.castling_rights);

        let mut resets_clock = piece == Piece::Pawn;

        if mv.is_en_passant() {
            // The captured pawn sits beside the mover, not on the destination.
            let victim = Square::from_coords(from.rank(), to.file());
            self.remove_piece(victim, them, Piece::Pawn);
            hash ^= keys.piece(them, Piece::Pawn, victim);
            resets_clock = true;
        } else if let Some(captured) = self.piece_on(to, them) {
            self.remove_piece(to, them, captured);
            hash ^= keys.piece(them, captured, to);
            resets_clock = true;
        }

        let placed = mv.promotion_piece().unwrap_or(piece);
        self.remove_piece(from, color, piece);
        self.set_piece(to, color, placed);
        hash ^= keys.piece(color, piece, from) ^ keys.piece(color, placed, to);

        if mv.is_castling() {
            let rank = to.rank();
            let (rook_from, rook_to) = if to.file() == 6 {
                (Square::from_coords(rank, 7), Square::from_coords(rank, 5))
            } else {
                (Square::from_coords(rank, 0), Square::from_coords(rank, 3))
            };
            self.remove_piece(rook_from, color, Piece::Rook);
            self.set_piece(rook_to, color, Piece::Rook);
            hash ^= keys.piece(color, Piece::Rook, rook_from) ^ keys.piece(color, Piece::Rook, rook_to);
        }

        if piece == Piece::Pawn && from.index().abs_diff(to.index()) == 16 {
            let file = from.file() as u8;
            self.ep_file = Some(file);
            hash ^= keys.en_passant(file);
        }

        self.castling_rights.touch(from);
        self.castling_rights.touch(to);
        hash ^= keys.castling(self.castling_rights);

        self.halfmove_clock = if resets_clock { 0 } else { self.halfmove_clock + 1 };
        if color == Color::Black {
            self.fullmove_number += 1;
        }

        if self.side_to_move != them {
            hash ^= keys.black_to_move();
        }
        self.side_to_move = them;
        self.fingerprint = hash;

        #[cfg(debug_assertions)]
        self.assert_consistent();
    }

    /// Pass the turn. Returns the en-passant file that was cleared, which
    /// [`Position::unmake_null_move`] needs to restore it.
    pub fn make_null_move(&mut self) -> Option<u8> {
        let keys = self.tables.zobrist();
        let previous = self.ep_file.take();
        if let Some(file) = previous {
            self.fingerprint ^= keys.en_passant(file);
        }
        self.side_to_move = self.side_to_move.opponent();
        self.fingerprint ^= keys.black_to_move();

        #[cfg(debug_assertions)]
        self.assert_consistent();
        previous
    }

    /// Undo [`Position::make_null_move`], restoring `previous_ep_file`.
    pub fn unmake_null_move(&mut self, previous_ep_file: Option<u8>) {
        let keys = self.tables.zobrist();
        if let Some(file) = self.ep_file.take() {
            self.fingerprint ^= keys.en_passant(file);
        }
        if let Some(file) = previous_ep_file {
            self.ep_file = Some(file);
            self.fingerprint ^= keys.en_passant(file);
        }
        self.side_to_move = self.side_to_move.opponent();
        self.fingerprint ^= keys.black_to_move();

        #[cfg(debug_assertions)]
        self.assert_consistent();
    }
}
