//! Check detection
//!
//! Checks are found by generating pseudo-legal moves for every opposing piece and looking for
//! the king's square among their destinations. Nothing is cached between calls.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::movegen;
use crate::types::Side;

/// Returns the squares of all the opposing pieces which attack the king of side `side`
///
/// If `side` has no king on the board, the result is empty.
pub fn checkers(b: &Board, side: Side) -> Bitboard {
    let king = match b.king_pos(side) {
        Some(king) => king,
        None => return Bitboard::EMPTY,
    };
    b.pieces(side.inv())
        .filter(|p| movegen::destinations(b, p).has(king))
        .map(|p| p.position())
        .collect()
}

/// Returns `true` if the king of side `side` is attacked by any opposing piece
pub fn in_check(b: &Board, side: Side) -> bool {
    let king = match b.king_pos(side) {
        Some(king) => king,
        None => return false,
    };
    b.pieces(side.inv())
        .any(|p| movegen::destinations(b, p).has(king))
}
