//! # Gridchess
//!
//! Chess position engine built around a square grid. It generates destinations for every piece,
//! detects checks, and applies moves while keeping turn order. A move which would leave the
//! mover's own king attacked is rejected, and a rejected move never changes the board.
//!
//! # Example
//!
//! ```
//! use gridchess::{Board, MoveError, Side, Square};
//!
//! let mut b = Board::initial();
//! b.attempt_move(Square::new(1, 4), Square::new(3, 4)).unwrap();
//! assert_eq!(b.side(), Side::Black);
//!
//! let res = b.attempt_move(Square::new(3, 4), Square::new(4, 4));
//! assert!(matches!(res, Err(MoveError::WrongSide { .. })));
//! ```

pub mod attack;
pub mod board;
pub mod movegen;
pub mod moves;
pub mod types;

pub use gridchess_base::{bitboard, geometry};

pub use bitboard::Bitboard;
pub use board::{Board, PrettyStyle, RawBoard, Render, ValidateError};
pub use moves::{Move, MoveError};
pub use types::{Cell, Piece, PieceKind, Side, Square};
