//! Board representation.
//!
//! The board is an 8x8 grid of [`Cell`]s. Pieces live in an arena owned by
//! the board and cells refer to them by [`PieceId`]. A captured piece stays
//! in the arena, unlinked from the grid, so that undoing the capture only has
//! to relink it.

use chess_core::{Color, Piece, Square};
use std::fmt;

/// Index of a piece in the board's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(u16);

impl PieceId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A piece and the number of moves it has made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceRecord {
    pub color: Color,
    pub kind: Piece,
    moves_made: u32,
}

impl PieceRecord {
    fn new(color: Color, kind: Piece) -> Self {
        PieceRecord {
            color,
            kind,
            moves_made: 0,
        }
    }

    /// Number of executed moves this piece took part in.
    #[inline]
    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    /// Returns true once the piece has moved. Castling requires both king
    /// and rook to answer false.
    #[inline]
    pub fn has_moved(&self) -> bool {
        self.moves_made > 0
    }

    pub(crate) fn record_move(&mut self) {
        self.moves_made += 1;
    }

    pub(crate) fn unrecord_move(&mut self) {
        debug_assert!(self.moves_made > 0, "move counter underflow");
        self.moves_made = self.moves_made.saturating_sub(1);
    }
}

/// One board square: an optional occupant and the transient attack mark.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cell {
    occupant: Option<PieceId>,
    attacked: bool,
}

impl Cell {
    #[inline]
    pub fn occupant(&self) -> Option<PieceId> {
        self.occupant
    }

    /// Set by the legality pass when the opponent of the side to move
    /// attacks this square.
    #[inline]
    pub fn is_attacked(&self) -> bool {
        self.attacked
    }
}

/// An 8x8 board with its piece arena.
///
/// Equality compares occupants and piece records only. Attack marks are
/// scratch data recomputed before every legality pass.
#[derive(Debug, Clone)]
pub struct Board {
    cells: [[Cell; 8]; 8],
    pieces: Vec<PieceRecord>,
    king_in_danger: [bool; 2],
}

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

impl Board {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Board {
            cells: [[Cell::default(); 8]; 8],
            pieces: Vec::with_capacity(32),
            king_in_danger: [false; 2],
        }
    }

    /// Creates the standard starting position.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            let back = color.back_row();
            let pawns = color.pawn_start_row();
            for (col, kind) in BACK_RANK.iter().enumerate() {
                board.spawn(Square::new(back, col as u8), color, *kind);
                board.spawn(Square::new(pawns, col as u8), color, Piece::Pawn);
            }
        }
        board
    }

    /// Places a new piece on an empty square.
    ///
    /// This is for setting up positions; play goes through
    /// [`Game`](crate::Game).
    ///
    /// # Panics
    ///
    /// Panics if the square is already occupied.
    pub fn spawn(&mut self, square: Square, color: Color, kind: Piece) -> PieceId {
        assert!(
            self.occupant(square).is_none(),
            "square {} is already occupied",
            square
        );
        let id = PieceId(self.pieces.len() as u16);
        self.pieces.push(PieceRecord::new(color, kind));
        self.cell_mut(square).occupant = Some(id);
        id
    }

    #[inline]
    pub fn cell(&self, square: Square) -> &Cell {
        &self.cells[square.row() as usize][square.col() as usize]
    }

    #[inline]
    fn cell_mut(&mut self, square: Square) -> &mut Cell {
        &mut self.cells[square.row() as usize][square.col() as usize]
    }

    /// Returns the id of the piece on the square, if any.
    #[inline]
    pub fn occupant(&self, square: Square) -> Option<PieceId> {
        self.cell(square).occupant
    }

    /// Returns the record of an arena piece.
    #[inline]
    pub fn piece(&self, id: PieceId) -> &PieceRecord {
        &self.pieces[id.index()]
    }

    /// Returns the color and kind of the piece on the square, if any.
    pub fn piece_at(&self, square: Square) -> Option<(Color, Piece)> {
        self.occupant(square).map(|id| {
            let record = self.piece(id);
            (record.color, record.kind)
        })
    }

    /// Read access by raw coordinates.
    ///
    /// # Panics
    ///
    /// Panics on an invalid coordinate.
    pub fn at(&self, row: u8, col: u8) -> Option<(Color, Piece)> {
        self.piece_at(Square::new(row, col))
    }

    /// Returns the color of the piece on the square, if any.
    #[inline]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.occupant(square).map(|id| self.piece(id).color)
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.occupant(square).is_none()
    }

    #[inline]
    pub fn is_attacked(&self, square: Square) -> bool {
        self.cell(square).attacked
    }

    /// Returns true if the last legality pass found this color's king attacked.
    #[inline]
    pub fn king_in_danger(&self, color: Color) -> bool {
        self.king_in_danger[color.index()]
    }

    /// Finds the square of this color's king.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.occupied()
            .find(|&(_, id)| {
                let record = self.piece(id);
                record.color == color && record.kind == Piece::King
            })
            .map(|(square, _)| square)
    }

    /// Iterates over occupied squares in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, PieceId)> + '_ {
        Square::all().filter_map(move |sq| self.occupant(sq).map(|id| (sq, id)))
    }

    pub(crate) fn set_occupant(&mut self, square: Square, occupant: Option<PieceId>) {
        self.cell_mut(square).occupant = occupant;
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut PieceRecord {
        &mut self.pieces[id.index()]
    }

    pub(crate) fn clear_attacks(&mut self) {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                cell.attacked = false;
            }
        }
        self.king_in_danger = [false; 2];
    }

    pub(crate) fn mark_attacked(&mut self, square: Square) {
        self.cell_mut(square).attacked = true;
    }

    pub(crate) fn set_king_in_danger(&mut self, color: Color, in_danger: bool) {
        self.king_in_danger[color.index()] = in_danger;
    }

    fn write_rows(&self, f: &mut fmt::Formatter<'_>, glyphs: bool) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                let c = match self.at(row, col) {
                    Some((color, kind)) if glyphs => kind.glyph(color),
                    Some((color, kind)) => kind.to_char(color),
                    None => '.',
                };
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces
            && Square::all().all(|sq| self.occupant(sq) == other.occupant(sq))
    }
}

impl Eq for Board {}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

/// Renders the board rank 8 first; `{:#}` uses Unicode glyphs.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_rows(f, f.alternate())
    }
}
