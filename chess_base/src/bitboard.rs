use crate::types::Square;
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};
use std::fmt;

/// Set of squares
///
/// Bit `i` is set when the square with [`Square::index()`] equal to `i` belongs to the set.
#[derive(
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct Bitboard(u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    #[inline]
    const fn bit(sq: Square) -> u64 {
        1_u64 << sq.index()
    }

    #[inline]
    pub const fn from_square(sq: Square) -> Bitboard {
        Bitboard(Self::bit(sq))
    }

    /// Returns a copy of the set with `sq` added
    #[inline]
    pub const fn with(self, sq: Square) -> Bitboard {
        Bitboard(self.0 | Self::bit(sq))
    }

    /// Returns a copy of the set with `sq` removed
    #[inline]
    pub const fn without(self, sq: Square) -> Bitboard {
        Bitboard(self.0 & !Self::bit(sq))
    }

    #[inline]
    pub fn set(&mut self, sq: Square) {
        self.0 |= Self::bit(sq);
    }

    #[inline]
    pub fn unset(&mut self, sq: Square) {
        self.0 &= !Self::bit(sq);
    }

    #[inline]
    pub const fn has(&self, sq: Square) -> bool {
        self.0 & Self::bit(sq) != 0
    }

    /// Returns the number of squares in the set
    #[inline]
    pub const fn popcount(&self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut res = Bitboard::EMPTY;
        for sq in iter {
            res.set(sq);
        }
        res
    }
}

/// Lists the squares in ascending order, like `{e2, a4}`
impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{{")?;
        for (i, sq) in self.into_iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", sq)?;
        }
        write!(f, "}}")
    }
}

/// Draws the set as a grid, top row first, with `*` for members and `.` for the rest
impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for row in (0..8).rev() {
            for col in 0..8 {
                let c = if self.has(Square::new(row, col)) { '*' } else { '.' };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the squares of a [`Bitboard`], in ascending index order
pub struct Squares(u64);

impl Iterator for Squares {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let idx = self.0.trailing_zeros() as usize;
        self.0 ^= 1_u64 << idx;
        Some(Square::from_index(idx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Squares {}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = Squares;

    fn into_iter(self) -> Squares {
        Squares(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_squares_ascending() {
        let pawns: Bitboard = ["h7", "a2", "e4", "d2"].into_iter().map(sq).collect();
        assert_eq!(
            pawns.into_iter().collect::<Vec<_>>(),
            vec![sq("a2"), sq("d2"), sq("e4"), sq("h7")],
        );
        assert_eq!(pawns.into_iter().len(), 4);
        assert_eq!(pawns.popcount(), 4);
        assert!(Bitboard::EMPTY.into_iter().next().is_none());
    }

    #[test]
    fn test_set_ops() {
        let white: Bitboard = (0..16).map(Square::from_index).collect();
        let black: Bitboard = (48..64).map(Square::from_index).collect();
        assert!((white & black).is_empty());
        assert_eq!((white | black).popcount(), 32);
        assert_eq!((!(white | black)).popcount(), 32);
        assert!(!(!white).has(sq("e1")));

        let mut moved = white;
        moved.unset(sq("e2"));
        moved.set(sq("e4"));
        assert_eq!(moved ^ white, Bitboard::from_square(sq("e2")).with(sq("e4")));
        assert_eq!(moved.without(sq("e4")).with(sq("e2")), white);
        assert!(moved.has(sq("e4")));
        assert!(!moved.has(sq("e2")));
    }

    #[test]
    fn test_format() {
        let bb = Bitboard::EMPTY.with(sq("a1")).with(sq("e4")).with(sq("h8"));
        assert_eq!(
            bb.to_string(),
            "\
.......*
........
........
........
....*...
........
........
*.......
"
        );
        assert_eq!(format!("{:?}", bb), "{a1, e4, h8}");
    }
}
