use super::super::attack_tables::knight_attacks;
use super::super::{Color, MoveList, Piece, Position};

impl Position {
    pub(crate) fn generate_knight_moves(&self, color: Color, moves: &mut MoveList) {
        let own = self.occupancy(color);
        for from in self.pieces(color, Piece::Knight) {
            self.push_targets(from, knight_attacks(from) & !own, color, moves);
        }
    }
}
