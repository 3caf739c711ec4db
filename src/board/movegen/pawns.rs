use super::super::attack_tables::pawn_attacks;
use super::super::{Color, Move, MoveList, Piece, Position, Square, PROMOTION_PIECES};

fn push_promotions(from: Square, to: Square, is_capture: bool, moves: &mut MoveList) {
    for piece in PROMOTION_PIECES {
        moves.push(Move::promotion(from, to, piece, is_capture));
    }
}

impl Position {
    pub(crate) fn generate_pawn_moves(&self, color: Color, moves: &mut MoveList) {
        let them = color.opponent();
        let enemies = self.occupancy(them) & !self.pieces(them, Piece::King);
        let start_rank = color.relative_rank(1);
        let ep_rank = color.relative_rank(4);
        let last_rank = color.relative_rank(7);
        // en passant belongs to the side to move only
        let ep_target = if color == self.side_to_move {
            self.en_passant_square()
        } else {
            None
        };

        for from in self.pieces(color, Piece::Pawn) {
            let file = from.file();
            let one_rank = match color {
                Color::White => from.rank() + 1,
                Color::Black => from.rank() - 1,
            };
            let one = Square::from_coords(one_rank, file);

            if !self.all_occupied.contains(one) {
                if one.rank() == last_rank {
                    push_promotions(from, one, false, moves);
                } else {
                    moves.push(Move::quiet(from, one));
                    if from.rank() == start_rank {
                        let two = Square::from_coords(color.relative_rank(3), file);
                        if !self.all_occupied.contains(two) {
                            moves.push(Move::double_pawn_push(from, two));
                        }
                    }
                }
            }

            let attacks = pawn_attacks(color, from);
            for to in attacks & enemies {
                if to.rank() == last_rank {
                    push_promotions(from, to, true, moves);
                } else {
                    moves.push(Move::capture(from, to));
                }
            }

            if let Some(target) = ep_target {
                if from.rank() == ep_rank && attacks.contains(target) {
                    moves.push(Move::en_passant(from, target));
                }
            }
        }
    }
}
