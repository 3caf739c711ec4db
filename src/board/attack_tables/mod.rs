//! Attack tables for move generation.
//!
//! Leaper attacks (knight, king, pawn) are fixed lazily-built arrays shared by
//! the whole process. Slider attacks come from magic bitboards built by
//! [`AttackTables::build`], which also fills the square-pair in-between table
//! used for pin and check-line detection.

mod magic;
mod prng;
mod tables;

pub use magic::MagicInfo;
pub use tables::{king_attacks, knight_attacks, pawn_attacks};

use log::debug;

use crate::board::error::{InitError, SliderKind};
use crate::board::types::{Bitboard, Square};
use magic::{build_slider_tables, SliderTables};

/// Read-only slider lookups plus the in-between table.
pub struct AttackTables {
    sliders: SliderTables,
    between: Box<[[Bitboard; 64]; 64]>,
}

impl AttackTables {
    /// Search magics from `seed` and fill every table.
    ///
    /// # Errors
    /// Returns [`InitError::MagicSearchExhausted`] if some square has no
    /// collision-free multiplier within `max_attempts` candidates.
    pub fn build(seed: u64, max_attempts: u32) -> Result<Self, InitError> {
        let sliders = build_slider_tables(seed, max_attempts)?;
        let mut tables = AttackTables {
            sliders,
            between: Box::new([[Bitboard::EMPTY; 64]; 64]),
        };
        tables.fill_between();
        debug!(
            "attack tables ready: {} slider entries",
            tables.sliders.attacks.len()
        );
        Ok(tables)
    }

    // Two squares on a shared line: each one's attacks with only the other as
    // blocker intersect in exactly the squares strictly between them.
    fn fill_between(&mut self) {
        for a in Square::all() {
            for b in Square::all() {
                let b_bit = Bitboard::from_square(b);
                let a_bit = Bitboard::from_square(a);
                let rook = self.rook_attacks(a, b_bit);
                self.between[a.index()][b.index()] = if rook.contains(b) {
                    rook & self.rook_attacks(b, a_bit)
                } else {
                    let bishop = self.bishop_attacks(a, b_bit);
                    if bishop.contains(b) {
                        bishop & self.bishop_attacks(b, a_bit)
                    } else {
                        Bitboard::EMPTY
                    }
                };
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn bishop_attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        let info = &self.sliders.bishop[sq.index()];
        self.sliders.attacks[info.index(occupancy)]
    }

    #[inline]
    #[must_use]
    pub fn rook_attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        let info = &self.sliders.rook[sq.index()];
        self.sliders.attacks[info.index(occupancy)]
    }

    #[inline]
    #[must_use]
    pub fn queen_attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        self.bishop_attacks(sq, occupancy) | self.rook_attacks(sq, occupancy)
    }

    /// Squares strictly between `a` and `b` when they share a rank, file or
    /// diagonal; empty otherwise.
    #[inline]
    #[must_use]
    pub fn between(&self, a: Square, b: Square) -> Bitboard {
        self.between[a.index()][b.index()]
    }

    /// Rook attacks revealed by lifting the first layer of `blockers` hit
    /// from `sq`.
    #[must_use]
    pub fn rook_xrays(&self, sq: Square, occupancy: Bitboard, blockers: Bitboard) -> Bitboard {
        let attacks = self.rook_attacks(sq, occupancy);
        let hit = blockers & attacks;
        attacks ^ self.rook_attacks(sq, occupancy ^ hit)
    }

    /// Bishop counterpart of [`AttackTables::rook_xrays`].
    #[must_use]
    pub fn bishop_xrays(&self, sq: Square, occupancy: Bitboard, blockers: Bitboard) -> Bitboard {
        let attacks = self.bishop_attacks(sq, occupancy);
        let hit = blockers & attacks;
        attacks ^ self.bishop_attacks(sq, occupancy ^ hit)
    }

    /// Hashing parameters for one square.
    #[must_use]
    pub fn magic_info(&self, sq: Square, slider: SliderKind) -> &MagicInfo {
        match slider {
            SliderKind::Bishop => &self.sliders.bishop[sq.index()],
            SliderKind::Rook => &self.sliders.rook[sq.index()],
        }
    }

    /// Total entries in the shared slider table.
    #[must_use]
    pub fn slider_table_len(&self) -> usize {
        self.sliders.attacks.len()
    }
}
