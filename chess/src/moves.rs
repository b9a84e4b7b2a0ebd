//! Moves and move errors

use crate::types::{Side, Square};

use std::fmt;

use thiserror::Error;

/// Request to relocate the piece from `src` to `dst`
///
/// The move itself doesn't know anything about the board. Use
/// [`Board::make_move()`](crate::board::Board::make_move) or
/// [`Board::attempt_move()`](crate::board::Board::attempt_move) to check and apply it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    src: Square,
    dst: Square,
}

impl Move {
    #[inline]
    pub const fn new(src: Square, dst: Square) -> Move {
        Move { src, dst }
    }

    #[inline]
    pub const fn src(&self) -> Square {
        self.src
    }

    #[inline]
    pub const fn dst(&self) -> Square {
        self.dst
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)
    }
}

/// Reason why a move was rejected
///
/// A rejected move never changes the board.
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum MoveError {
    /// There is no piece on the source square
    #[error("no piece on {0}")]
    EmptySource(Square),
    /// The piece on the source square belongs to the side which is not to move
    #[error("piece on {square} belongs to {owner}, which is not to move")]
    WrongSide { square: Square, owner: Side },
    /// The destination is not reachable by the piece according to its movement rules
    #[error("piece on {src} cannot move to {dst}")]
    IllegalDestination { src: Square, dst: Square },
    /// The move would leave the mover's own king under attack
    #[error("move {src}{dst} leaves own king attacked")]
    SelfCheck { src: Square, dst: Square },
}
