//! Move generation.
//!
//! Pseudo-legal moves come from the per-piece generators in this module's
//! children. Legal moves are the pseudo-legal moves that do not leave the
//! mover's king attacked, tested on a scratch copy of the position. The
//! quiet/capture/promotion/check/escape views are filters over the
//! pseudo-legal set.

mod attacks;
mod kings;
mod knights;
mod pawns;
mod sliders;

use sliders::SliderType;

use super::{Bitboard, Color, Move, MoveList, Piece, Position, Square};

impl Position {
    /// Push a quiet or capture move to every square of `targets`. The enemy
    /// king is never a target.
    pub(crate) fn push_targets(&self, from: Square, targets: Bitboard, color: Color, moves: &mut MoveList) {
        let them = color.opponent();
        let enemies = self.occupancy(them);
        for to in targets & !self.pieces(them, Piece::King) {
            if enemies.contains(to) {
                moves.push(Move::capture(from, to));
            } else {
                moves.push(Move::quiet(from, to));
            }
        }
    }

    /// Every move obeying piece movement rules for `color`, including those
    /// that leave its own king in check.
    #[must_use]
    pub fn pseudo_legal_moves(&self, color: Color) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_pawn_moves(color, &mut moves);
        self.generate_knight_moves(color, &mut moves);
        self.generate_slider_moves(color, SliderType::Bishop, &mut moves);
        self.generate_slider_moves(color, SliderType::Rook, &mut moves);
        self.generate_slider_moves(color, SliderType::Queen, &mut moves);
        self.generate_king_moves(color, &mut moves);
        moves
    }

    /// Pseudo-legal moves that keep `color`'s king out of check.
    #[must_use]
    pub fn legal_moves(&self, color: Color) -> MoveList {
        let mut moves = self.pseudo_legal_moves(color);
        moves.retain(|&mv| self.keeps_king_safe(mv, color));
        moves
    }

    /// Whether a pseudo-legal move leaves the mover's king unattacked.
    pub(crate) fn keeps_king_safe(&self, mv: Move, color: Color) -> bool {
        let mut scratch = *self;
        scratch.make_move(mv, color);
        !scratch.is_in_check(color)
    }

    /// Whether a pseudo-legal move for `color` is also legal.
    #[must_use]
    pub fn is_legal(&self, mv: Move, color: Color) -> bool {
        self.pseudo_legal_moves(color).contains(mv) && self.keeps_king_safe(mv, color)
    }

    /// Non-capturing, non-promoting moves (castles and double pushes included).
    #[must_use]
    pub fn quiet_moves(&self, color: Color) -> MoveList {
        let mut moves = self.pseudo_legal_moves(color);
        moves.retain(|mv| mv.is_quiet());
        moves
    }

    /// Captures, including en passant and capturing promotions. With
    /// `include_promotions`, non-capturing promotions are added too.
    #[must_use]
    pub fn captures(&self, color: Color, include_promotions: bool) -> MoveList {
        let mut moves = self.pseudo_legal_moves(color);
        moves.retain(|mv| mv.is_capture() || (include_promotions && mv.is_promotion()));
        moves
    }

    /// Promotions, capturing or not.
    #[must_use]
    pub fn promotions(&self, color: Color) -> MoveList {
        let mut moves = self.pseudo_legal_moves(color);
        moves.retain(|mv| mv.is_promotion());
        moves
    }

    /// Quiet moves that give check.
    #[must_use]
    pub fn checking_moves(&self, color: Color) -> MoveList {
        let mut moves = self.quiet_moves(color);
        let maps = self.check_maps(color.opponent());
        moves.retain(|&mv| self.gives_check(mv, color, &maps));
        moves
    }

    /// Moves that may answer a check on `color`'s king: king moves, captures
    /// of a lone checker and interpositions on its line. Pins are not
    /// considered, so some of these can still be illegal. Empty when not in
    /// check.
    #[must_use]
    pub fn check_escapes(&self, color: Color) -> MoveList {
        let checkers = self.checkers(color);
        if checkers.is_empty() {
            return MoveList::new();
        }
        let king = self.king_square(color);
        let mut moves = self.pseudo_legal_moves(color);

        if checkers.has_many() {
            moves.retain(|mv| mv.from() == king && !mv.is_castling());
            return moves;
        }

        let checker = checkers.lsb();
        let block = self.tables.attacks().between(king, checker);
        // An en-passant capture removes the checker without landing on it.
        let ep_victim = self
            .ep_file
            .map(|file| Square::from_coords(color.relative_rank(4), usize::from(file)));
        moves.retain(|mv| {
            if mv.from() == king {
                return !mv.is_castling();
            }
            mv.to() == checker
                || block.contains(mv.to())
                || (mv.is_en_passant() && ep_victim == Some(checker))
        });
        moves
    }

    /// Whether `mv`, pseudo-legal for `color`, checks the opposing king.
    #[must_use]
    pub fn is_check_move(&self, mv: Move, color: Color) -> bool {
        let maps = self.check_maps(color.opponent());
        self.gives_check(mv, color, &maps)
    }

    fn gives_check(&self, mv: Move, color: Color, maps: &[Bitboard; 6]) -> bool {
        // Direct checks from a plain move show up in the precomputed maps.
        if !(mv.is_castling() || mv.is_en_passant() || mv.is_promotion()) {
            if let Some(piece) = self.piece_on(mv.from(), color) {
                if maps[piece.index()].contains(mv.to()) {
                    return true;
                }
            }
        }
        // Discovered checks and special moves: play it out.
        let mut scratch = *self;
        scratch.make_move(mv, color);
        scratch.is_in_check(color.opponent())
    }
}
