use super::super::{Bitboard, Color, MoveList, Piece, Position, Square};

/// Type of sliding piece for move generation
#[derive(Clone, Copy)]
pub(crate) enum SliderType {
    Bishop,
    Rook,
    Queen,
}

impl SliderType {
    fn piece(self) -> Piece {
        match self {
            SliderType::Bishop => Piece::Bishop,
            SliderType::Rook => Piece::Rook,
            SliderType::Queen => Piece::Queen,
        }
    }
}

impl Position {
    pub(crate) fn slider_targets(&self, from: Square, slider: SliderType) -> Bitboard {
        let attacks = self.tables.attacks();
        let occ = self.all_occupied;
        match slider {
            SliderType::Bishop => attacks.bishop_attacks(from, occ),
            SliderType::Rook => attacks.rook_attacks(from, occ),
            SliderType::Queen => attacks.queen_attacks(from, occ),
        }
    }

    pub(crate) fn generate_slider_moves(&self, color: Color, slider: SliderType, moves: &mut MoveList) {
        let own = self.occupancy(color);
        for from in self.pieces(color, slider.piece()) {
            self.push_targets(from, self.slider_targets(from, slider) & !own, color, moves);
        }
    }
}
