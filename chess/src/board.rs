//! Board and related things

use crate::bitboard::Bitboard;
use crate::geometry;
use crate::moves::{Move, MoveError};
use crate::types::{Cell, Piece, PieceKind, Side, Square};
use crate::{attack, movegen};

use std::fmt::{self, Display};

use thiserror::Error;

/// Board validation error
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// Too many pieces of given side
    ///
    /// No more than 16 pieces of each side is allowed.
    #[error("too many pieces of side {0:?}")]
    TooManyPieces(Side),
    /// One of the sides has more than one king
    #[error("more than one king of side {0:?}")]
    TooManyKings(Side),
    /// The king of the side which is not to move is under attack
    #[error("opponent's king is attacked")]
    OpponentKingAttacked,
}

const BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Raw chess board
///
/// Raw board contains all the information about the position, but, unlike [`Board`], it is not
/// validated. It can be used to set up a position programmatically. After filling the necessary
/// fields, convert it to [`Board`] via [`Board::try_from()`].
///
/// # Example
///
/// ```
/// # use gridchess::{RawBoard, Board, Cell, Side, PieceKind, Square};
/// #
/// let mut raw = RawBoard::empty();
/// raw.put(Square::new(0, 4), Cell::from_parts(Side::White, PieceKind::King));
/// raw.put(Square::new(4, 4), Cell::from_parts(Side::White, PieceKind::Knight));
///
/// let board: Board = raw.try_into().unwrap();
/// assert_eq!(board.king_pos(Side::White), Some(Square::new(0, 4)));
/// assert_eq!(board.king_pos(Side::Black), None);
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RawBoard {
    /// Contents of the board, indexed by [`Square::index()`]
    pub cells: [Cell; 64],
    /// Squares holding pieces which already moved
    ///
    /// Only pawns are affected by this flag.
    pub moved: Bitboard,
    /// Side to move
    pub side: Side,
}

impl RawBoard {
    /// Returns an empty `RawBoard` with White to move
    #[inline]
    pub const fn empty() -> RawBoard {
        RawBoard {
            cells: [Cell::EMPTY; 64],
            moved: Bitboard::EMPTY,
            side: Side::White,
        }
    }

    /// Returns a board with the initial position
    pub fn initial() -> RawBoard {
        let mut res = RawBoard::empty();
        for side in [Side::White, Side::Black] {
            for (col, kind) in BACK_ROW.into_iter().enumerate() {
                res.put(
                    Square::new(geometry::home_row(side), col),
                    Cell::from_parts(side, kind),
                );
                res.put(
                    Square::new(geometry::pawn_row(side), col),
                    Cell::from_parts(side, PieceKind::Pawn),
                );
            }
        }
        res
    }

    /// Returns the contents of square `sq`
    #[inline]
    pub fn get(&self, sq: Square) -> Cell {
        self.cells[sq.index()]
    }

    /// Puts `cell` to square `sq`
    #[inline]
    pub fn put(&mut self, sq: Square, cell: Cell) {
        self.cells[sq.index()] = cell;
    }

    /// Marks the piece on square `sq` as already moved
    #[inline]
    pub fn set_moved(&mut self, sq: Square) {
        self.moved.set(sq);
    }
}

impl Default for RawBoard {
    #[inline]
    fn default() -> RawBoard {
        RawBoard::empty()
    }
}

/// Board that contains a valid position
///
/// The board owns all of its pieces. Each piece is stored in the cell matching its position, and
/// the squares of each side's pieces are also kept in a per-side index. Both are changed only
/// by applying a move, so they never go out of sync.
///
/// Moves are applied with [`Board::attempt_move()`], which either commits a legal move and passes
/// the turn, or rejects the move with [`MoveError`] and leaves the board untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    grid: [Option<Piece>; 64],
    side: Side,
    index: [Bitboard; 2],
}

impl Board {
    /// Returns a board with the initial position
    pub fn initial() -> Board {
        Board::from_raw_unchecked(&RawBoard::initial())
    }

    fn from_raw_unchecked(raw: &RawBoard) -> Board {
        let mut grid = [None; 64];
        let mut index = [Bitboard::EMPTY; 2];
        for sq in Square::iter() {
            let cell = raw.get(sq);
            if let (Some(side), Some(kind)) = (cell.side(), cell.kind()) {
                grid[sq.index()] = Some(Piece::new(kind, side, sq, raw.moved.has(sq)));
                index[side.index()].set(sq);
            }
        }
        Board {
            grid,
            side: raw.side,
            index,
        }
    }

    /// Returns the raw board with the same position
    pub fn raw(&self) -> RawBoard {
        let mut res = RawBoard::empty();
        res.side = self.side;
        for piece in self.grid.iter().flatten() {
            res.put(piece.position(), piece.cell());
            if piece.has_moved() {
                res.set_moved(piece.position());
            }
        }
        res
    }

    /// Returns the piece on square `sq`, if any
    #[inline]
    pub fn get(&self, sq: Square) -> Option<&Piece> {
        self.grid[sq.index()].as_ref()
    }

    /// Returns side to move
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Returns the squares occupied by the pieces of side `s`
    #[inline]
    pub fn occupied(&self, s: Side) -> Bitboard {
        self.index[s.index()]
    }

    /// Iterates over the pieces of side `s`
    pub fn pieces(&self, s: Side) -> impl Iterator<Item = &Piece> + '_ {
        self.index[s.index()]
            .into_iter()
            .filter_map(move |sq| self.grid[sq.index()].as_ref())
    }

    /// Returns the position of the king of side `s`, or `None` if this side has no king
    pub fn king_pos(&self, s: Side) -> Option<Square> {
        self.pieces(s)
            .find(|p| p.kind() == PieceKind::King)
            .map(|p| p.position())
    }

    /// Returns `true` if the side to move is in check
    #[inline]
    pub fn is_check(&self) -> bool {
        attack::in_check(self, self.side)
    }

    /// Returns the board after `piece` goes to `dst`, with the turn passed to the opponent
    ///
    /// No legality checks are done here.
    pub(crate) fn advance(&self, piece: &Piece, dst: Square) -> Board {
        let mut next = self.clone();
        let src = piece.position();
        if let Some(taken) = next.grid[dst.index()].take() {
            next.index[taken.side().index()].unset(dst);
        }
        next.grid[src.index()] = None;
        next.index[piece.side().index()].unset(src);
        next.grid[dst.index()] = Some(piece.relocated(dst));
        next.index[piece.side().index()].set(dst);
        next.side = piece.side().inv();
        next
    }

    /// Returns the board after making move `mv`
    ///
    /// The move is checked in order: there must be a piece on the source square, it must belong
    /// to the side to move, the destination must be among its pseudo-legal destinations, and the
    /// mover's king must not be attacked afterwards.
    pub fn make_move(&self, mv: Move) -> Result<Board, MoveError> {
        let (src, dst) = (mv.src(), mv.dst());
        let piece = self.get(src).ok_or(MoveError::EmptySource(src))?;
        if piece.side() != self.side {
            return Err(MoveError::WrongSide {
                square: src,
                owner: piece.side(),
            });
        }
        if !movegen::destinations(self, piece).has(dst) {
            return Err(MoveError::IllegalDestination { src, dst });
        }
        let next = self.advance(piece, dst);
        if attack::in_check(&next, piece.side()) {
            return Err(MoveError::SelfCheck { src, dst });
        }
        Ok(next)
    }

    /// Moves the piece from `src` to `dst` and passes the turn
    ///
    /// On error, the board is left unchanged.
    pub fn attempt_move(&mut self, src: Square, dst: Square) -> Result<(), MoveError> {
        let mv = Move::new(src, dst);
        match self.make_move(mv) {
            Ok(next) => {
                tracing::trace!(%mv, side = %self.side, "move applied");
                *self = next;
                #[cfg(feature = "selftest")]
                assert!(self.is_consistent(), "board index broken after {}", mv);
                Ok(())
            }
            Err(err) => {
                tracing::debug!(%src, %dst, reason = %err, "move rejected");
                Err(err)
            }
        }
    }

    #[cfg(any(test, feature = "selftest"))]
    fn is_consistent(&self) -> bool {
        let mut index = [Bitboard::EMPTY; 2];
        for sq in Square::iter() {
            if let Some(p) = self.get(sq) {
                if p.position() != sq {
                    return false;
                }
                index[p.side().index()].set(sq);
            }
        }
        let single_kings = [Side::White, Side::Black].into_iter().all(|s| {
            self.pieces(s)
                .filter(|p| p.kind() == PieceKind::King)
                .count()
                <= 1
        });
        index == self.index && (index[0] & index[1]).is_empty() && single_kings
    }

    /// Passes every square, top row first, to the renderer `r`
    pub fn render<R: Render + ?Sized>(&self, r: &mut R) {
        for row in (0..8).rev() {
            for col in 0..8 {
                let sq = Square::new(row, col);
                r.cell(sq, self.get(sq));
            }
            r.end_row(row);
        }
    }

    /// Wraps the board to allow pretty-printing with the given style `style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use gridchess::{Board, board::PrettyStyle};
    /// #
    /// let b = Board::initial();
    ///
    /// let res = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    /// W|abcdefgh
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { board: self, style }
    }
}

impl TryFrom<RawBoard> for Board {
    type Error = ValidateError;

    fn try_from(raw: RawBoard) -> Result<Board, ValidateError> {
        for side in [Side::White, Side::Black] {
            let count = raw.cells.iter().filter(|c| c.side() == Some(side)).count();
            if count > 16 {
                return Err(ValidateError::TooManyPieces(side));
            }
            let king = Cell::from_parts(side, PieceKind::King);
            if raw.cells.iter().filter(|&&c| c == king).count() > 1 {
                return Err(ValidateError::TooManyKings(side));
            }
        }

        let res = Board::from_raw_unchecked(&raw);
        if attack::in_check(&res, raw.side.inv()) {
            return Err(ValidateError::OpponentKingAttacked);
        }
        Ok(res)
    }
}

impl TryFrom<&RawBoard> for Board {
    type Error = ValidateError;

    fn try_from(raw: &RawBoard) -> Result<Board, ValidateError> {
        (*raw).try_into()
    }
}

/// Formats the board in [`PrettyStyle::Labeled`] style
impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        self.pretty(PrettyStyle::Labeled).fmt(f)
    }
}

/// Receiver of the board contents, square by square
///
/// See [`Board::render()`]. Squares are visited row by row, from row 7 down to row 0, and from
/// the a-file to the h-file within a row.
pub trait Render {
    /// Called for each square with the piece standing on it, if any
    fn cell(&mut self, square: Square, piece: Option<&Piece>);

    /// Called after the last square of row `row`
    fn end_row(&mut self, _row: usize) {}
}

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
    /// Print each square as a six-character label like `WP(E2)`, or `______` if empty
    Labeled,
}

struct Frame {
    horz: char,
    vert: char,
    angle: char,
    white: char,
    black: char,
}

impl PrettyStyle {
    fn frame(&self) -> Option<Frame> {
        match *self {
            PrettyStyle::Ascii => Some(Frame {
                horz: '-',
                vert: '|',
                angle: '+',
                white: 'W',
                black: 'B',
            }),
            PrettyStyle::Utf8 => Some(Frame {
                horz: '─',
                vert: '│',
                angle: '┼',
                white: '○',
                black: '●',
            }),
            PrettyStyle::Labeled => None,
        }
    }
}

/// Wrapper to pretty-print the board
///
/// See docs for [`Board::pretty()`] for more details.
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
}

struct PrettyWriter<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
    style: PrettyStyle,
    res: fmt::Result,
}

impl<'a, 'b> PrettyWriter<'a, 'b> {
    fn write_cell(&mut self, sq: Square, piece: Option<&Piece>) -> fmt::Result {
        let cell = piece.map_or(Cell::EMPTY, Piece::cell);
        match self.style {
            PrettyStyle::Ascii | PrettyStyle::Utf8 => {
                if sq.col() == 0 {
                    if let Some(frame) = self.style.frame() {
                        write!(self.f, "{}{}", sq.rank_char(), frame.vert)?;
                    }
                }
                match self.style {
                    PrettyStyle::Utf8 => write!(self.f, "{}", cell.as_utf8_char()),
                    _ => write!(self.f, "{}", cell.as_char()),
                }
            }
            PrettyStyle::Labeled => {
                if sq.col() != 0 {
                    write!(self.f, " ")?;
                }
                match piece {
                    Some(p) => write!(self.f, "{}", p),
                    None => write!(self.f, "______"),
                }
            }
        }
    }
}

impl<'a, 'b> Render for PrettyWriter<'a, 'b> {
    fn cell(&mut self, square: Square, piece: Option<&Piece>) {
        if self.res.is_ok() {
            self.res = self.write_cell(square, piece);
        }
    }

    fn end_row(&mut self, _row: usize) {
        if self.res.is_ok() {
            self.res = writeln!(self.f);
        }
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let mut writer = PrettyWriter {
            f: &mut *f,
            style: self.style,
            res: Ok(()),
        };
        self.board.render(&mut writer);
        writer.res?;

        if let Some(frame) = self.style.frame() {
            write!(f, "{}{}", frame.horz, frame.angle)?;
            for _ in 0..8 {
                write!(f, "{}", frame.horz)?;
            }
            writeln!(f)?;
            let indicator = match self.board.side() {
                Side::White => frame.white,
                Side::Black => frame.black,
            };
            write!(f, "{}{}", indicator, frame.vert)?;
            for col in 0..8 {
                write!(f, "{}", Square::new(0, col).file_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
