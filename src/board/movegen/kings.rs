use super::super::attack_tables::king_attacks;
use super::super::{Color, Move, MoveList, Piece, Position, Square};

impl Position {
    pub(crate) fn generate_king_moves(&self, color: Color, moves: &mut MoveList) {
        let from = self.king_square(color);
        self.push_targets(from, king_attacks(from) & !self.occupancy(color), color, moves);
        self.generate_castles(color, moves);
    }

    /// Castles whose right is held, whose path is empty, and whose king
    /// neither stands in nor passes through check. Landing in check is left
    /// to the legality filter.
    fn generate_castles(&self, color: Color, moves: &mut MoveList) {
        let rank = color.back_rank();
        let king = Square::from_coords(rank, 4);
        let rights = self.castling_rights;
        if !(rights.has(color, true) || rights.has(color, false)) {
            return;
        }
        if self.piece_on(king, color) != Some(Piece::King) {
            return;
        }
        let them = color.opponent();
        if self.is_square_attacked(king, them) {
            return;
        }

        let empty = |file: usize| !self.all_occupied.contains(Square::from_coords(rank, file));
        let rook_at = |file: usize| self.piece_on(Square::from_coords(rank, file), color) == Some(Piece::Rook);

        if rights.has(color, true)
            && empty(5)
            && empty(6)
            && rook_at(7)
            && !self.is_square_attacked(Square::from_coords(rank, 5), them)
        {
            moves.push(Move::castle(king, Square::from_coords(rank, 6)));
        }

        if rights.has(color, false)
            && empty(3)
            && empty(2)
            && empty(1)
            && rook_at(0)
            && !self.is_square_attacked(Square::from_coords(rank, 3), them)
        {
            moves.push(Move::castle(king, Square::from_coords(rank, 2)));
        }
    }
}
