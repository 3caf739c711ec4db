//! Internal consistency checks.

use super::error::PositionError;
use super::{Bitboard, Color, Piece, Position};

impl Position {
    /// Check every structural invariant: disjoint piece sets, occupancy equal
    /// to the union of piece sets, one king per side, and a fingerprint equal
    /// to a full recomputation.
    ///
    /// # Errors
    /// [`PositionError::InvalidPosition`] naming the first broken invariant.
    pub fn validate(&self) -> Result<(), PositionError> {
        let mut seen = Bitboard::EMPTY;
        for color in Color::BOTH {
            let mut union = Bitboard::EMPTY;
            for piece in Piece::ALL {
                let set = self.pieces(color, piece);
                if (seen & set).any() {
                    return Err(PositionError::invalid(format!(
                        "{color} {piece:?} set overlaps another piece set"
                    )));
                }
                seen |= set;
                union |= set;
            }
            if union != self.occupancy(color) {
                return Err(PositionError::invalid(format!(
                    "{color} occupancy {:?} differs from its pieces {union:?}",
                    self.occupancy(color)
                )));
            }
            let kings = self.pieces(color, Piece::King).popcount();
            if kings != 1 {
                return Err(PositionError::invalid(format!("{color} has {kings} kings")));
            }
        }
        if seen != self.all_occupied {
            return Err(PositionError::invalid("combined occupancy out of sync"));
        }
        if let Some(file) = self.ep_file {
            if file >= 8 {
                return Err(PositionError::invalid(format!("en-passant file {file} out of range")));
            }
        }
        let expected = self.compute_fingerprint();
        if expected != self.fingerprint {
            return Err(PositionError::invalid(format!(
                "fingerprint {:#018x} drifted from {expected:#018x}",
                self.fingerprint
            )));
        }
        Ok(())
    }

    #[cfg(debug_assertions)]
    pub(crate) fn assert_consistent(&self) {
        if let Err(err) = self.validate() {
            panic!("{err}\n{self:?}");
        }
    }
}
