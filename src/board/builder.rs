//! Fluent builder for constructing chess positions.
//!
//! Allows creating positions piece by piece. [`PositionBuilder::build`]
//! validates the result, so a built [`Position`] always satisfies its
//! invariants.
//!
//! # Example
//! ```
//! use brahma_core::board::{Color, Piece, PositionBuilder, Square};
//!
//! brahma_core::init().unwrap();
//! let pos = PositionBuilder::new()
//!     .piece(Square::E1, Color::White, Piece::King)
//!     .piece(Square::E8, Color::Black, Piece::King)
//!     .piece("a2".parse().unwrap(), Color::White, Piece::Pawn)
//!     .side_to_move(Color::White)
//!     .build()
//!     .unwrap();
//! assert_eq!(pos.legal_moves(Color::White).len(), 7);
//! ```

use super::context::{tables, EngineTables};
use super::error::PositionError;
use super::{Bitboard, CastlingRights, Color, Piece, Position, Square};

/// A fluent builder for constructing `Position` values.
#[derive(Clone, Debug)]
pub struct PositionBuilder {
    pieces: Vec<(Square, Color, Piece)>,
    side_to_move: Color,
    castling_rights: CastlingRights,
    ep_file: Option<u8>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Default for PositionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionBuilder {
    /// Create a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        PositionBuilder {
            pieces: Vec::new(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            ep_file: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Create a builder starting from the standard initial position.
    #[must_use]
    pub fn starting_position() -> Self {
        let mut builder = Self::new();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, &piece) in back_rank.iter().enumerate() {
            builder.pieces.push((Square::from_coords(0, file), Color::White, piece));
            builder.pieces.push((Square::from_coords(7, file), Color::Black, piece));
            builder.pieces.push((Square::from_coords(1, file), Color::White, Piece::Pawn));
            builder.pieces.push((Square::from_coords(6, file), Color::Black, Piece::Pawn));
        }
        builder.castling_rights = CastlingRights::all();
        builder
    }

    /// Place a piece. Placing two pieces on one square is reported by
    /// [`PositionBuilder::build`]; use [`PositionBuilder::clear`] first to
    /// replace a piece.
    #[must_use]
    pub fn piece(mut self, square: Square, color: Color, piece: Piece) -> Self {
        self.pieces.push((square, color, piece));
        self
    }

    /// Remove whatever stands on a square.
    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.pieces.retain(|(sq, _, _)| *sq != square);
        self
    }

    #[must_use]
    pub const fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    #[must_use]
    pub const fn castling(mut self, rights: CastlingRights) -> Self {
        self.castling_rights = rights;
        self
    }

    /// Enable kingside castling for a color.
    #[must_use]
    pub fn castle_kingside(mut self, color: Color) -> Self {
        self.castling_rights.set(color, true);
        self
    }

    /// Enable queenside castling for a color.
    #[must_use]
    pub fn castle_queenside(mut self, color: Color) -> Self {
        self.castling_rights.set(color, false);
        self
    }

    #[must_use]
    pub const fn no_castling_rights(mut self) -> Self {
        self.castling_rights = CastlingRights::none();
        self
    }

    /// File (0 = a) of a pawn that just advanced two squares.
    #[must_use]
    pub const fn en_passant_file(mut self, file: u8) -> Self {
        self.ep_file = Some(file);
        self
    }

    #[must_use]
    pub const fn clear_en_passant(mut self) -> Self {
        self.ep_file = None;
        self
    }

    /// Set the halfmove clock (for 50-move rule).
    #[must_use]
    pub const fn halfmove_clock(mut self, clock: u32) -> Self {
        self.halfmove_clock = clock;
        self
    }

    #[must_use]
    pub const fn fullmove_number(mut self, number: u32) -> Self {
        self.fullmove_number = number;
        self
    }

    /// Build over the shared tables.
    ///
    /// # Errors
    /// [`PositionError::NotInitialized`] before [`crate::init`]; otherwise see
    /// [`PositionBuilder::build_with`].
    pub fn build(self) -> Result<Position, PositionError> {
        let tables = tables().ok_or(PositionError::NotInitialized)?;
        self.build_with(tables)
    }

    /// Build over an explicit set of tables.
    ///
    /// # Errors
    /// [`PositionError::InvalidPosition`] when two pieces share a square,
    /// a side has other than one king, a pawn stands on a back rank, the
    /// en-passant file has no double-pushed pawn behind it, a castling right
    /// has no king and rook on their home squares, the side not to move is
    /// in check, or the move number is zero.
    pub fn build_with(self, tables: &'static EngineTables) -> Result<Position, PositionError> {
        let mut pos = Position::empty(tables);

        for &(square, color, piece) in &self.pieces {
            if pos.all_occupied.contains(square) {
                return Err(PositionError::invalid(format!(
                    "square {square} occupied twice"
                )));
            }
            pos.set_piece(square, color, piece);
        }

        for color in Color::BOTH {
            let kings = pos.pieces(color, Piece::King).popcount();
            if kings != 1 {
                return Err(PositionError::invalid(format!(
                    "{color} has {kings} kings"
                )));
            }
        }

        let pawns = pos.pieces(Color::White, Piece::Pawn) | pos.pieces(Color::Black, Piece::Pawn);
        if (pawns & (Bitboard::RANK_1 | Bitboard::RANK_8)).any() {
            return Err(PositionError::invalid("pawn on first or last rank"));
        }

        if self.fullmove_number == 0 {
            return Err(PositionError::invalid("fullmove number must start at 1"));
        }

        pos.side_to_move = self.side_to_move;
        pos.halfmove_clock = self.halfmove_clock;
        pos.fullmove_number = self.fullmove_number;

        if let Some(file) = self.ep_file {
            validate_en_passant(&pos, file)?;
            pos.ep_file = Some(file);
        }

        for color in Color::BOTH {
            for kingside in [true, false] {
                if !self.castling_rights.has(color, kingside) {
                    continue;
                }
                let rank = color.back_rank();
                let rook_file = if kingside { 7 } else { 0 };
                let king_home = pos.piece_on(Square::from_coords(rank, 4), color) == Some(Piece::King);
                let rook_home =
                    pos.piece_on(Square::from_coords(rank, rook_file), color) == Some(Piece::Rook);
                if !(king_home && rook_home) {
                    let side = if kingside { "kingside" } else { "queenside" };
                    return Err(PositionError::invalid(format!(
                        "{color} {side} castling right without king and rook at home"
                    )));
                }
            }
        }
        pos.castling_rights = self.castling_rights;

        let waiting = self.side_to_move.opponent();
        if pos.is_in_check(waiting) {
            return Err(PositionError::invalid(format!(
                "{waiting} is in check but not to move"
            )));
        }

        pos.fingerprint = pos.compute_fingerprint();
        Ok(pos)
    }
}

fn validate_en_passant(pos: &Position, file: u8) -> Result<(), PositionError> {
    if file >= 8 {
        return Err(PositionError::invalid(format!("en-passant file {file} out of range")));
    }
    let side = pos.side_to_move;
    let file = usize::from(file);
    let target = Square::from_coords(side.relative_rank(5), file);
    let pushed = Square::from_coords(side.relative_rank(4), file);
    let origin = Square::from_coords(side.relative_rank(6), file);
    if pos.piece_on(pushed, side.opponent()) != Some(Piece::Pawn) {
        return Err(PositionError::invalid(format!(
            "en-passant target {target} without a pawn on {pushed}"
        )));
    }
    if pos.all_occupied.contains(target) || pos.all_occupied.contains(origin) {
        return Err(PositionError::invalid(format!(
            "en-passant target {target} is not behind a double push"
        )));
    }
    Ok(())
}
