//! Chess position representation and move generation.
//!
//! Uses bitboards and magic slider lookups. Supports full chess rules
//! including castling, en passant, and promotions. The shared tables must be
//! built with [`crate::init`] before the first position is created.
//!
//! # Example
//! ```
//! use brahma_core::board::{Color, Position};
//!
//! brahma_core::init().unwrap();
//! let pos = Position::new().unwrap();
//! let moves = pos.legal_moves(Color::White);
//! println!("Starting position has {} legal moves", moves.len());
//! ```

mod attack_tables;
mod builder;
mod context;
mod debug;
mod error;
mod make_unmake;
mod movegen;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use attack_tables::{king_attacks, knight_attacks, pawn_attacks, AttackTables, MagicInfo};
pub use builder::PositionBuilder;
pub use context::{init, init_with, tables, EngineTables, TableConfig};
pub use error::{InitError, PositionError, SliderKind, SquareError};
pub use state::{MailboxEntry, Position};
pub use types::{Bitboard, BitboardIter, CastlingRights, Color, Move, MoveList, Piece, Square, MAX_MOVES};

pub(crate) use types::PROMOTION_PIECES;
