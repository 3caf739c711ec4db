//! Perft: full-width legal move tree counts for validating move generation.

use std::ops::AddAssign;

use log::trace;

use crate::board::{Move, Position};

/// Leaf statistics of a perft walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerftResult {
    pub nodes: u64,
    pub captures: u64,
    pub en_passants: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl AddAssign for PerftResult {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passants += rhs.en_passants;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

impl Position {
    /// Number of leaf nodes `depth` plies below this position.
    #[must_use]
    pub fn perft(&self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let side = self.side_to_move;
        let moves = self.legal_moves(side);
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for mv in moves {
            let mut child = *self;
            child.make_move(mv, side);
            nodes += child.perft(depth - 1);
        }
        nodes
    }

    /// Like [`Position::perft`], also classifying the moves that reach the
    /// leaves.
    #[must_use]
    pub fn perft_detailed(&self, depth: usize) -> PerftResult {
        if depth == 0 {
            return PerftResult {
                nodes: 1,
                ..PerftResult::default()
            };
        }

        let side = self.side_to_move;
        let mut result = PerftResult::default();
        for mv in self.legal_moves(side) {
            let mut child = *self;
            child.make_move(mv, side);
            if depth > 1 {
                result += child.perft_detailed(depth - 1);
                continue;
            }

            result.nodes += 1;
            if mv.is_capture() {
                result.captures += 1;
            }
            if mv.is_en_passant() {
                result.en_passants += 1;
            }
            if mv.is_castling() {
                result.castles += 1;
            }
            if mv.is_promotion() {
                result.promotions += 1;
            }
            let reply = child.side_to_move;
            if child.is_in_check(reply) {
                result.checks += 1;
                if child.legal_moves(reply).is_empty() {
                    result.checkmates += 1;
                }
            }
        }
        result
    }

    /// Node counts below each legal root move, in generation order.
    #[must_use]
    pub fn perft_divide(&self, depth: usize) -> Vec<(Move, u64)> {
        if depth == 0 {
            return Vec::new();
        }
        let side = self.side_to_move;
        self.legal_moves(side)
            .into_iter()
            .map(|mv| {
                let mut child = *self;
                child.make_move(mv, side);
                let nodes = child.perft(depth - 1);
                trace!("{mv}: {nodes}");
                (mv, nodes)
            })
            .collect()
    }
}
