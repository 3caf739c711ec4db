//! Core chess types.
//!
//! This module contains the fundamental types used throughout the crate:
//! - `Piece` and `Color` - chess piece types and colors
//! - `Square` - compact board square representation (u8 index)
//! - `Bitboard` - 64-bit set of squares
//! - `Move` and `MoveList` - packed move representation
//! - `CastlingRights` - castling state

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::CastlingRights;
pub use moves::{Move, MoveList, MAX_MOVES};
pub use piece::{Color, Piece};
pub use square::Square;

pub(crate) use bitboard::pop_lsb;
pub(crate) use piece::PROMOTION_PIECES;
