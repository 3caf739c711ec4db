//! Zobrist hashing for chess positions.
//!
//! Provides incrementally-updatable 64-bit position fingerprints. Keys come
//! from a seeded `StdRng`, so one seed always yields the same key set.

use rand::prelude::*;

use crate::board::{CastlingRights, Color, Piece, Square};

/// Random keys XORed together to form a position fingerprint.
pub struct ZobristKeys {
    // piece_keys[color][piece_type][square_index]
    piece_keys: [[[u64; 64]; 6]; 2],
    // one key per full castling-rights value (0..16)
    castling_keys: [u64; 16],
    // en_passant_keys[file_index] (only file matters for EP target)
    en_passant_keys: [u64; 8],
    black_to_move_key: u64,
}

impl ZobristKeys {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut piece_keys = [[[0; 64]; 6]; 2];
        let mut castling_keys = [0; 16];
        let mut en_passant_keys = [0; 8];

        for color in &mut piece_keys {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        for key in &mut castling_keys {
            *key = rng.gen();
        }

        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        let black_to_move_key = rng.gen();

        ZobristKeys {
            piece_keys,
            castling_keys,
            en_passant_keys,
            black_to_move_key,
        }
    }

    #[inline]
    #[must_use]
    pub fn piece(&self, color: Color, piece: Piece, sq: Square) -> u64 {
        self.piece_keys[color.index()][piece.index()][sq.index()]
    }

    #[inline]
    #[must_use]
    pub fn castling(&self, rights: CastlingRights) -> u64 {
        self.castling_keys[usize::from(rights.as_u8())]
    }

    #[inline]
    #[must_use]
    pub fn en_passant(&self, file: u8) -> u64 {
        self.en_passant_keys[usize::from(file & 7)]
    }

    #[inline]
    #[must_use]
    pub fn black_to_move(&self) -> u64 {
        self.black_to_move_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_same_seed_same_keys() {
        let a = ZobristKeys::new(1070372);
        let b = ZobristKeys::new(1070372);
        assert_eq!(
            a.piece(Color::Black, Piece::Queen, Square::D8),
            b.piece(Color::Black, Piece::Queen, Square::D8)
        );
        assert_eq!(a.black_to_move(), b.black_to_move());
        assert_eq!(a.castling(CastlingRights::all()), b.castling(CastlingRights::all()));
    }

    #[test]
    fn test_different_seed_different_keys() {
        let a = ZobristKeys::new(1);
        let b = ZobristKeys::new(2);
        assert_ne!(a.black_to_move(), b.black_to_move());
    }

    #[test]
    fn test_keys_are_distinct() {
        let keys = ZobristKeys::new(1070372);
        let mut seen = HashSet::new();
        for color in Color::BOTH {
            for piece in Piece::ALL {
                for sq in Square::all() {
                    assert!(seen.insert(keys.piece(color, piece, sq)));
                }
            }
        }
        for rights in 0..16 {
            assert!(seen.insert(keys.castling(CastlingRights::from_u8(rights))));
        }
        for file in 0..8 {
            assert!(seen.insert(keys.en_passant(file)));
        }
        assert!(seen.insert(keys.black_to_move()));
    }
}
