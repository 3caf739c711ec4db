use super::super::attack_tables::{king_attacks, knight_attacks, pawn_attacks};
use super::super::{Bitboard, Color, Piece, Position, Square};

impl Position {
    /// Pieces of `by` attacking `sq` under the current occupancy.
    #[must_use]
    pub fn attack_map(&self, sq: Square, by: Color) -> Bitboard {
        let attacks = self.tables.attacks();
        let occ = self.all_occupied;
        let queens = self.pieces(by, Piece::Queen);
        // A pawn of `by` attacks sq iff a pawn of the other colour on sq would attack it back.
        (pawn_attacks(by.opponent(), sq) & self.pieces(by, Piece::Pawn))
            | (knight_attacks(sq) & self.pieces(by, Piece::Knight))
            | (king_attacks(sq) & self.pieces(by, Piece::King))
            | (attacks.bishop_attacks(sq, occ) & (self.pieces(by, Piece::Bishop) | queens))
            | (attacks.rook_attacks(sq, occ) & (self.pieces(by, Piece::Rook) | queens))
    }

    /// Pieces of either colour attacking `sq`.
    #[must_use]
    pub fn attack_map_all(&self, sq: Square) -> Bitboard {
        self.attack_map(sq, Color::White) | self.attack_map(sq, Color::Black)
    }

    /// Whether any piece of `by` attacks `sq`.
    #[must_use]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        let attacks = self.tables.attacks();
        let occ = self.all_occupied;
        let queens = self.pieces(by, Piece::Queen);
        (pawn_attacks(by.opponent(), sq) & self.pieces(by, Piece::Pawn)).any()
            || (knight_attacks(sq) & self.pieces(by, Piece::Knight)).any()
            || (king_attacks(sq) & self.pieces(by, Piece::King)).any()
            || (attacks.bishop_attacks(sq, occ) & (self.pieces(by, Piece::Bishop) | queens)).any()
            || (attacks.rook_attacks(sq, occ) & (self.pieces(by, Piece::Rook) | queens)).any()
    }

    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), color.opponent())
    }

    /// Opponent pieces giving check to `color`'s king.
    #[must_use]
    pub fn checkers(&self, color: Color) -> Bitboard {
        self.attack_map(self.king_square(color), color.opponent())
    }

    /// Pieces of `color` pinned against their own king by an enemy slider.
    #[must_use]
    pub fn pinned_map(&self, color: Color) -> Bitboard {
        let attacks = self.tables.attacks();
        let them = color.opponent();
        let king = self.king_square(color);
        // Slider rays seen from the king through a board with only enemy pieces on it.
        let enemy_occ = self.occupancy(them);
        let queens = self.pieces(them, Piece::Queen);
        let snipers = (attacks.rook_attacks(king, enemy_occ) & (self.pieces(them, Piece::Rook) | queens))
            | (attacks.bishop_attacks(king, enemy_occ) & (self.pieces(them, Piece::Bishop) | queens));

        let mut pinned = Bitboard::EMPTY;
        for sniper in snipers {
            let blockers = attacks.between(king, sniper) & self.all_occupied;
            if blockers.popcount() == 1 && (blockers & self.occupancy(color)).any() {
                pinned |= blockers;
            }
        }
        pinned
    }

    /// Sliders of `color` that would attack `sq` if the first layer of
    /// `blocker_color` pieces on each line were lifted.
    #[must_use]
    pub fn xray_piece_map(&self, color: Color, sq: Square, blocker_color: Color) -> Bitboard {
        let attacks = self.tables.attacks();
        let occ = self.all_occupied;
        let blockers = self.occupancy(blocker_color);
        let queens = self.pieces(color, Piece::Queen);
        (attacks.rook_xrays(sq, occ, blockers) & (self.pieces(color, Piece::Rook) | queens))
            | (attacks.bishop_xrays(sq, occ, blockers) & (self.pieces(color, Piece::Bishop) | queens))
    }

    /// For each piece type (indexed by [`Piece::index`]), the squares from
    /// which an enemy piece of that type would attack `color`'s king.
    #[must_use]
    pub fn check_maps(&self, color: Color) -> [Bitboard; 6] {
        let attacks = self.tables.attacks();
        let king = self.king_square(color);
        let occ = self.all_occupied;
        let bishop = attacks.bishop_attacks(king, occ);
        let rook = attacks.rook_attacks(king, occ);
        [
            pawn_attacks(color, king),
            knight_attacks(king),
            bishop,
            rook,
            bishop | rook,
            Bitboard::EMPTY,
        ]
    }
}
