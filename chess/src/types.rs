//! Core types
//!
//! Most of the primitive types live in `gridchess_base` and are re-exported here. This module
//! adds [`Piece`], which is a piece as it is held by a [`Board`](crate::board::Board).

pub use gridchess_base::types::{
    Cell, CellParseError, PieceKind, Side, SideParseError, Square, SquareParseError,
};

use std::fmt;

/// Piece standing on the board
///
/// A piece knows its own square. The board keeps this square equal to the cell that holds the
/// piece, so the only way to obtain a `Piece` is to read it from a board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    side: Side,
    position: Square,
    has_moved: bool,
}

impl Piece {
    #[inline]
    pub(crate) const fn new(kind: PieceKind, side: Side, position: Square, has_moved: bool) -> Piece {
        Piece {
            kind,
            side,
            position,
            has_moved,
        }
    }

    /// Returns the kind of the piece
    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the side which owns the piece
    #[inline]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Returns the square the piece is standing on
    #[inline]
    pub const fn position(&self) -> Square {
        self.position
    }

    /// Returns `true` if the piece was relocated by at least one applied move
    ///
    /// Only pawns track this flag, as it decides between single and double forward steps. For
    /// other pieces it is `false` unless it was set explicitly via [`RawBoard`](crate::board::RawBoard).
    #[inline]
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Returns the visible identity of the piece, i.e. its kind and side without position
    #[inline]
    pub const fn cell(&self) -> Cell {
        Cell::from_parts(self.side, self.kind)
    }

    #[inline]
    pub(crate) fn relocated(self, dst: Square) -> Piece {
        Piece {
            position: dst,
            has_moved: self.has_moved || self.kind == PieceKind::Pawn,
            ..self
        }
    }
}

/// Formats the piece as a six-character label, like `WN(B1)` for the white knight on b1
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "{}{}({}{})",
            self.side.as_char().to_ascii_uppercase(),
            self.kind.as_char(),
            self.position.file_char().to_ascii_uppercase(),
            self.position.rank_char(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() {
        let knight = Piece::new(PieceKind::Knight, Side::White, Square::new(0, 1), false);
        assert_eq!(knight.to_string(), "WN(B1)");
        let pawn = Piece::new(PieceKind::Pawn, Side::Black, Square::new(6, 4), false);
        assert_eq!(pawn.to_string(), "BP(E7)");
        assert_eq!(pawn.to_string().len(), 6);
    }

    #[test]
    fn test_relocated() {
        let pawn = Piece::new(PieceKind::Pawn, Side::White, Square::new(1, 4), false);
        let moved = pawn.relocated(Square::new(3, 4));
        assert_eq!(moved.position(), Square::new(3, 4));
        assert!(moved.has_moved());
        assert_eq!(moved.cell(), pawn.cell());

        let rook = Piece::new(PieceKind::Rook, Side::Black, Square::new(7, 0), false);
        assert!(!rook.relocated(Square::new(5, 0)).has_moved());
    }
}
