//! Chess position representation and legal move generation.
//!
//! Call [`init`] once before creating any [`Position`]; it builds the shared
//! magic attack tables and fingerprint keys.

pub mod board;
pub mod perft;
pub mod zobrist;

pub use board::{
    init, init_with, tables, Bitboard, CastlingRights, Color, EngineTables, InitError, Move, MoveList, Piece,
    Position, PositionBuilder, PositionError, Square, TableConfig,
};
pub use perft::PerftResult;
pub use zobrist::ZobristKeys;
