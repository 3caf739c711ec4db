use std::fmt;

use super::context::{tables, EngineTables};
use super::error::PositionError;
use super::{Bitboard, CastlingRights, Color, Piece, Square};

/// One entry of a square-indexed piece array.
pub type MailboxEntry = Option<(Color, Piece)>;

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

/// Full game state. Cheap to copy; every copy shares the same read-only
/// [`EngineTables`].
#[derive(Clone, Copy)]
pub struct Position {
    pub(crate) tables: &'static EngineTables,
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) ep_file: Option<u8>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) fingerprint: u64,
}

impl Position {
    /// The standard initial position.
    ///
    /// # Errors
    /// [`PositionError::NotInitialized`] if [`crate::init`] has not run.
    pub fn new() -> Result<Self, PositionError> {
        let tables = tables().ok_or(PositionError::NotInitialized)?;
        Ok(Self::start_with_tables(tables))
    }

    /// The standard initial position over an explicit set of tables.
    #[must_use]
    pub fn start_with_tables(tables: &'static EngineTables) -> Self {
        let mut pos = Position::empty(tables);
        for (file, &piece) in BACK_RANK.iter().enumerate() {
            pos.set_piece(Square::from_coords(0, file), Color::White, piece);
            pos.set_piece(Square::from_coords(7, file), Color::Black, piece);
            pos.set_piece(Square::from_coords(1, file), Color::White, Piece::Pawn);
            pos.set_piece(Square::from_coords(6, file), Color::Black, Piece::Pawn);
        }
        pos.castling_rights = CastlingRights::all();
        pos.fingerprint = pos.compute_fingerprint();
        pos
    }

    /// Build from a square-indexed piece array plus explicit state.
    ///
    /// # Errors
    /// [`PositionError::NotInitialized`] before [`crate::init`], otherwise
    /// [`PositionError::InvalidPosition`] when the described position breaks
    /// an invariant (see [`super::PositionBuilder::build`]).
    pub fn from_mailbox(
        mailbox: &[MailboxEntry; 64],
        castling_rights: CastlingRights,
        ep_file: Option<u8>,
        halfmove_clock: u32,
        fullmove_number: u32,
        side_to_move: Color,
    ) -> Result<Self, PositionError> {
        let mut builder = super::PositionBuilder::new()
            .castling(castling_rights)
            .halfmove_clock(halfmove_clock)
            .fullmove_number(fullmove_number)
            .side_to_move(side_to_move);
        if let Some(file) = ep_file {
            builder = builder.en_passant_file(file);
        }
        for (idx, entry) in mailbox.iter().enumerate() {
            if let Some((color, piece)) = *entry {
                builder = builder.piece(Square::from_index(idx), color, piece);
            }
        }
        builder.build()
    }

    pub(crate) fn empty(tables: &'static EngineTables) -> Self {
        Position {
            tables,
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            ep_file: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            fingerprint: 0,
        }
    }

    // Board mutation without fingerprint maintenance; callers fix it up.
    #[inline]
    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = Bitboard::from_square(sq);
        self.pieces[color.index()][piece.index()] |= bit;
        self.occupied[color.index()] |= bit;
        self.all_occupied |= bit;
    }

    #[inline]
    pub(crate) fn remove_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = !Bitboard::from_square(sq);
        self.pieces[color.index()][piece.index()] &= bit;
        self.occupied[color.index()] &= bit;
        self.all_occupied &= bit;
    }

    /// Recompute the fingerprint from scratch.
    #[must_use]
    pub fn compute_fingerprint(&self) -> u64 {
        let keys = self.tables.zobrist();
        let mut hash = 0u64;
        for color in Color::BOTH {
            for piece in Piece::ALL {
                for sq in self.pieces[color.index()][piece.index()] {
                    hash ^= keys.piece(color, piece, sq);
                }
            }
        }
        hash ^= keys.castling(self.castling_rights);
        if let Some(file) = self.ep_file {
            hash ^= keys.en_passant(file);
        }
        if self.side_to_move == Color::Black {
            hash ^= keys.black_to_move();
        }
        hash
    }

    #[inline]
    #[must_use]
    pub fn tables(&self) -> &'static EngineTables {
        self.tables
    }

    #[inline]
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// File of the en-passant target, if the last move was a double push.
    #[inline]
    #[must_use]
    pub fn ep_file(&self) -> Option<u8> {
        self.ep_file
    }

    /// Square a pawn of the side to move would land on capturing en passant.
    #[must_use]
    pub fn en_passant_square(&self) -> Option<Square> {
        let rank = self.side_to_move.relative_rank(5);
        self.ep_file
            .map(|file| Square::from_coords(rank, usize::from(file)))
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[inline]
    #[must_use]
    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    #[inline]
    #[must_use]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn all_occupied(&self) -> Bitboard {
        self.all_occupied
    }

    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        self.pieces[color.index()][Piece::King.index()].lsb()
    }

    /// Piece of `color` standing on `sq`.
    #[must_use]
    pub fn piece_on(&self, sq: Square, color: Color) -> Option<Piece> {
        if !self.occupied[color.index()].contains(sq) {
            return None;
        }
        Piece::ALL
            .into_iter()
            .find(|&p| self.pieces[color.index()][p.index()].contains(sq))
    }

    /// Whatever piece stands on `sq`.
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        Color::BOTH
            .into_iter()
            .find_map(|color| self.piece_on(sq, color).map(|piece| (color, piece)))
    }

    /// Square-indexed piece array, the inverse of [`Position::from_mailbox`].
    #[must_use]
    pub fn to_mailbox(&self) -> [MailboxEntry; 64] {
        let mut mailbox = [None; 64];
        for sq in self.all_occupied {
            mailbox[sq.index()] = self.piece_at(sq);
        }
        mailbox
    }

    /// Sum of piece values for `color` (kings count zero).
    #[must_use]
    pub fn material(&self, color: Color) -> i32 {
        Piece::ALL
            .into_iter()
            .map(|p| p.value() * self.pieces(color, p).popcount() as i32)
            .sum()
    }

    /// Neither side can possibly mate: bare kings, a single minor piece, or
    /// only bishops that all stand on one square colour.
    #[must_use]
    pub fn is_insufficient_material(&self) -> bool {
        let both = |p: Piece| self.pieces(Color::White, p) | self.pieces(Color::Black, p);

        if (both(Piece::Pawn) | both(Piece::Rook) | both(Piece::Queen)).any() {
            return false;
        }

        let knights = both(Piece::Knight);
        let bishops = both(Piece::Bishop);
        let minors = knights.popcount() + bishops.popcount();
        if minors <= 1 {
            return true;
        }

        knights.is_empty()
            && ((bishops & Bitboard::LIGHT_SQUARES).is_empty()
                || (bishops & Bitboard::DARK_SQUARES).is_empty())
    }

    /// Fifty-move rule, insufficient material, or stalemate for the side to
    /// move.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        if self.halfmove_clock >= 100 || self.is_insufficient_material() {
            return true;
        }
        let side = self.side_to_move;
        !self.is_in_check(side) && self.legal_moves(side).is_empty()
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tables, other.tables)
            && self.pieces == other.pieces
            && self.side_to_move == other.side_to_move
            && self.castling_rights == other.castling_rights
            && self.ep_file == other.ep_file
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
            && self.fingerprint == other.fingerprint
    }
}

impl Eq for Position {}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let ch = match self.piece_at(Square::from_coords(rank, file)) {
                    Some((Color::White, p)) => p.to_char().to_ascii_uppercase(),
                    Some((Color::Black, p)) => p.to_char(),
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{self}")?;
        f.debug_struct("Position")
            .field("side_to_move", &self.side_to_move)
            .field("castling_rights", &self.castling_rights)
            .field("ep_file", &self.ep_file)
            .field("halfmove_clock", &self.halfmove_clock)
            .field("fullmove_number", &self.fullmove_number)
            .field("fingerprint", &format_args!("{:#018x}", self.fingerprint))
            .finish()
    }
}
