//! Precomputed attack tables for leaper pieces (knights, kings, pawns) and
//! the ray-walking slider reference used to fill the magic tables.

use once_cell::sync::Lazy;

use crate::board::types::{Bitboard, Color, Square};

const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

const KING_DELTAS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub(crate) const ROOK_DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const BISHOP_DIRECTIONS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

fn leaper_table(deltas: &[(isize, isize)]) -> [Bitboard; 64] {
    let mut attacks = [Bitboard::EMPTY; 64];
    for (sq, slot) in attacks.iter_mut().enumerate() {
        let r = (sq / 8) as isize;
        let f = (sq % 8) as isize;
        let mut mask = 0u64;
        for &(dr, df) in deltas {
            let nr = r + dr;
            let nf = f + df;
            if (0..8).contains(&nr) && (0..8).contains(&nf) {
                mask |= 1u64 << ((nr as usize) * 8 + (nf as usize));
            }
        }
        *slot = Bitboard(mask);
    }
    attacks
}

static KNIGHT_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| leaper_table(&KNIGHT_DELTAS));

static KING_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| leaper_table(&KING_DELTAS));

// PAWN_ATTACKS[color][sq]: squares a pawn of `color` on `sq` attacks
static PAWN_ATTACKS: Lazy<[[Bitboard; 64]; 2]> =
    Lazy::new(|| [leaper_table(&[(1, -1), (1, 1)]), leaper_table(&[(-1, -1), (-1, 1)])]);

#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index()]
}

#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index()]
}

/// Squares attacked by a pawn of `color` standing on `sq`.
#[inline]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index()]
}

/// Walk each ray from `sq` until the board edge or the first blocker
/// (inclusive). Slow; only used while building and verifying tables.
pub(crate) fn ray_attacks(sq: Square, blockers: Bitboard, directions: &[(isize, isize)]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &(dr, df) in directions {
        let mut r = sq.rank() as isize + dr;
        let mut f = sq.file() as isize + df;
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let target = Bitboard::from_index((r * 8 + f) as usize);
            attacks |= target;
            if (blockers & target).any() {
                break;
            }
            r += dr;
            f += df;
        }
    }
    attacks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_knight_corner_and_center() {
        assert_eq!(knight_attacks(Square::A1).popcount(), 2);
        assert_eq!(knight_attacks(sq("d4")).popcount(), 8);
        assert!(knight_attacks(Square::G1).contains(sq("f3")));
    }

    #[test]
    fn test_king_edges() {
        assert_eq!(king_attacks(Square::H8).popcount(), 3);
        assert_eq!(king_attacks(sq("e4")).popcount(), 8);
    }

    #[test]
    fn test_pawn_attacks_by_color() {
        let white = pawn_attacks(Color::White, sq("e4"));
        assert!(white.contains(sq("d5")) && white.contains(sq("f5")));
        let black = pawn_attacks(Color::Black, sq("a5"));
        assert_eq!(black, Bitboard::from_square(sq("b4")));
        assert!(pawn_attacks(Color::White, sq("h8")).is_empty());
    }

    #[test]
    fn test_ray_attacks_stop_at_blocker() {
        let blockers = Bitboard::from_square(sq("e6")) | Bitboard::from_square(sq("c4"));
        let attacks = ray_attacks(sq("e4"), blockers, &ROOK_DIRECTIONS);
        assert!(attacks.contains(sq("e6")));
        assert!(!attacks.contains(sq("e7")));
        assert!(attacks.contains(sq("c4")));
        assert!(!attacks.contains(sq("b4")));
        assert!(attacks.contains(sq("h4")));
        assert!(attacks.contains(sq("e1")));
        assert_eq!(ray_attacks(sq("e4"), Bitboard::EMPTY, &ROOK_DIRECTIONS).popcount(), 14);
    }
}
