//! Magic bitboard construction.
//!
//! For every square and slider class the relevant occupancy mask is hashed
//! with `(occ & mask) * magic >> shift` into a slice of one shared attack
//! table. Magics are searched for at startup from a seeded generator, so a
//! given seed always produces the same tables.

use log::debug;

use super::prng::MagicRng;
use super::tables::{ray_attacks, BISHOP_DIRECTIONS, ROOK_DIRECTIONS};
use crate::board::error::{InitError, SliderKind};
use crate::board::types::{pop_lsb, Bitboard, Square};

/// Candidates whose product with the mask leaves fewer top-byte bits than
/// this are skipped without testing. Empirical filter only.
const MIN_TOP_BYTE_BITS: u32 = 6;

/// Per-square hashing parameters. `offset..offset + len` is this square's
/// slice of the shared attack table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MagicInfo {
    pub mask: Bitboard,
    pub magic: u64,
    pub shift: u32,
    pub(crate) offset: usize,
    pub(crate) len: usize,
}

impl MagicInfo {
    const EMPTY: MagicInfo = MagicInfo {
        mask: Bitboard::EMPTY,
        magic: 0,
        shift: 0,
        offset: 0,
        len: 0,
    };

    /// Index into the shared table for the given full-board occupancy.
    #[inline]
    pub(crate) fn index(&self, occupancy: Bitboard) -> usize {
        self.offset + ((occupancy & self.mask).0.wrapping_mul(self.magic) >> self.shift) as usize
    }

    /// Number of relevant occupancy bits.
    #[inline]
    #[must_use]
    pub fn bits(&self) -> u32 {
        64 - self.shift
    }
}

/// Both slider classes packed into one allocation.
pub(crate) struct SliderTables {
    pub(crate) bishop: [MagicInfo; 64],
    pub(crate) rook: [MagicInfo; 64],
    pub(crate) attacks: Vec<Bitboard>,
}

impl SliderKind {
    pub(crate) fn directions(self) -> &'static [(isize, isize)] {
        match self {
            SliderKind::Bishop => &BISHOP_DIRECTIONS,
            SliderKind::Rook => &ROOK_DIRECTIONS,
        }
    }
}

/// Squares whose occupancy can change the slider's attacks from `sq`: every
/// ray square except the last one before the board edge.
pub(crate) fn relevant_mask(sq: Square, slider: SliderKind) -> Bitboard {
    let edges = ((Bitboard::RANK_1 | Bitboard::RANK_8) & !Bitboard::rank_mask(sq.rank()))
        | ((Bitboard::FILE_A | Bitboard::FILE_H) & !Bitboard::file_mask(sq.file()));
    ray_attacks(sq, Bitboard::EMPTY, slider.directions()) & !edges
}

/// The `index`-th subset of `mask`: bit `i` of `index` selects the `i`-th
/// lowest square of `mask`. Enumerates every subset as `index` runs over
/// `0..1 << mask.popcount()`.
pub(crate) fn index_to_occupancy(index: usize, mask: Bitboard) -> Bitboard {
    let mut result = Bitboard::EMPTY;
    let mut remaining = mask;
    let mut bit = 0;
    while remaining.any() {
        let sq = pop_lsb(&mut remaining);
        if index & (1 << bit) != 0 {
            result |= Bitboard::from_square(sq);
        }
        bit += 1;
    }
    result
}

/// Search for a multiplier that maps every subset of `mask` to a slot
/// holding its attack set. Two subsets may share a slot only when their
/// attack sets agree.
fn find_magic(
    occupancies: &[Bitboard],
    reference: &[Bitboard],
    mask: Bitboard,
    rng: &mut MagicRng,
    max_attempts: u32,
) -> Option<(u64, u32)> {
    let bits = mask.popcount();
    let size = occupancies.len();
    let mut used = vec![Bitboard::EMPTY; size];
    // epoch[i] == attempt marks slot i as filled during this attempt
    let mut epoch = vec![0u32; size];

    for attempt in 1..=max_attempts {
        let magic = rng.next_sparse_u64();
        if (mask.0.wrapping_mul(magic) & 0xFF00_0000_0000_0000).count_ones() < MIN_TOP_BYTE_BITS {
            continue;
        }

        let mut collision = false;
        for (occ, attacks) in occupancies.iter().zip(reference) {
            let idx = (occ.0.wrapping_mul(magic) >> (64 - bits)) as usize;
            if epoch[idx] != attempt {
                epoch[idx] = attempt;
                used[idx] = *attacks;
            } else if used[idx] != *attacks {
                collision = true;
                break;
            }
        }

        if !collision {
            return Some((magic, attempt));
        }
    }
    None
}

/// Build the magic entry for one square and write its attack sets into
/// `attacks[offset..]`.
fn build_square(
    sq: Square,
    slider: SliderKind,
    offset: usize,
    attacks: &mut [Bitboard],
    rng: &mut MagicRng,
    max_attempts: u32,
) -> Result<(MagicInfo, u32), InitError> {
    let mask = relevant_mask(sq, slider);
    let bits = mask.popcount();
    let size = 1usize << bits;

    let occupancies: Vec<Bitboard> = (0..size).map(|i| index_to_occupancy(i, mask)).collect();
    let reference: Vec<Bitboard> = occupancies
        .iter()
        .map(|&occ| ray_attacks(sq, occ, slider.directions()))
        .collect();

    let (magic, attempts) = find_magic(&occupancies, &reference, mask, rng, max_attempts).ok_or(
        InitError::MagicSearchExhausted {
            square: sq,
            slider,
            attempts: max_attempts,
        },
    )?;

    let info = MagicInfo {
        mask,
        magic,
        shift: 64 - bits,
        offset,
        len: size,
    };
    for (&occ, &att) in occupancies.iter().zip(&reference) {
        attacks[info.index(occ)] = att;
    }
    Ok((info, attempts))
}

fn build_class(
    slider: SliderKind,
    offset: &mut usize,
    attacks: &mut [Bitboard],
    rng: &mut MagicRng,
    max_attempts: u32,
) -> Result<[MagicInfo; 64], InitError> {
    let mut infos = [MagicInfo::EMPTY; 64];
    let mut total_attempts = 0u64;
    let start = *offset;
    for sq in Square::all() {
        let (info, attempts) = build_square(sq, slider, *offset, attacks, rng, max_attempts)?;
        *offset += info.len;
        total_attempts += u64::from(attempts);
        infos[sq.index()] = info;
    }
    debug!(
        "{slider} magics: {} entries, {total_attempts} candidates tried",
        *offset - start
    );
    Ok(infos)
}

/// Build both slider classes, bishops first, into one contiguous table.
pub(crate) fn build_slider_tables(seed: u64, max_attempts: u32) -> Result<SliderTables, InitError> {
    let total: usize = Square::all()
        .map(|sq| {
            (1usize << relevant_mask(sq, SliderKind::Bishop).popcount())
                + (1usize << relevant_mask(sq, SliderKind::Rook).popcount())
        })
        .sum();

    let mut attacks = vec![Bitboard::EMPTY; total];
    let mut rng = MagicRng::new(seed);
    let mut offset = 0;

    let bishop = build_class(SliderKind::Bishop, &mut offset, &mut attacks, &mut rng, max_attempts)?;
    let rook = build_class(SliderKind::Rook, &mut offset, &mut attacks, &mut rng, max_attempts)?;
    debug_assert_eq!(offset, total);

    Ok(SliderTables {
        bishop,
        rook,
        attacks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TableConfig;

    fn default_tables() -> Result<SliderTables, InitError> {
        let config = TableConfig::default();
        build_slider_tables(config.magic_seed, config.max_magic_attempts)
    }

    #[test]
    fn test_relevant_mask_sizes() {
        assert_eq!(relevant_mask(Square::A1, SliderKind::Rook).popcount(), 12);
        assert_eq!(relevant_mask(Square::from_index(27), SliderKind::Rook).popcount(), 10);
        assert_eq!(relevant_mask(Square::A1, SliderKind::Bishop).popcount(), 6);
        assert_eq!(relevant_mask(Square::from_index(27), SliderKind::Bishop).popcount(), 9);
    }

    #[test]
    fn test_relevant_mask_excludes_edges() {
        // Rook on a1: a8 and h1 can never block anything further along.
        let mask = relevant_mask(Square::A1, SliderKind::Rook);
        assert!(!mask.contains(Square::A8));
        assert!(!mask.contains(Square::H1));
        assert!(mask.contains(Square::from_index(48))); // a7
        assert!(mask.contains(Square::G1));
    }

    #[test]
    fn test_index_to_occupancy_enumerates_subsets() {
        let mask = Bitboard(0b1011_0000);
        let subsets: Vec<u64> = (0..8).map(|i| index_to_occupancy(i, mask).0).collect();
        assert_eq!(
            subsets,
            vec![0, 0x10, 0x20, 0x30, 0x80, 0x90, 0xA0, 0xB0]
        );
    }

    #[test]
    fn test_table_size_matches_subset_total() {
        let tables = default_tables().expect("magic search failed");
        assert_eq!(tables.attacks.len(), 5248 + 102_400);
        let last = tables.rook[63];
        assert_eq!(last.offset + last.len, tables.attacks.len());
    }

    #[test]
    fn test_exhausted_budget_is_an_error() {
        let err = build_slider_tables(TableConfig::default().magic_seed, 0).err();
        assert!(matches!(
            err,
            Some(InitError::MagicSearchExhausted {
                slider: SliderKind::Bishop,
                attempts: 0,
                ..
            })
        ));
    }
}
