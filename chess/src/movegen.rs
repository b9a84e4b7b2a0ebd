//! Move generation
//!
//! All the pieces except the knight are treated as sliding pieces with a per-direction radius.
//! The knight jumps over a fixed offset table. Generated moves are pseudo-legal, i.e. they
//! obey the movement, blocking and capture rules, but may leave the mover's own king attacked.
//! Use [`legal_destinations()`] or [`gen_legal()`] to filter such moves out.

use crate::attack;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::geometry::{self, Direction, KNIGHT_OFFSETS};
use crate::moves::Move;
use crate::types::{Piece, PieceKind, Side, Square};

use std::ops::Deref;
use std::slice;

use arrayvec::ArrayVec;

/// Maximum number of steps a piece may take along each direction
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Radii([u8; Direction::COUNT]);

impl Radii {
    pub const NONE: Radii = Radii([0; Direction::COUNT]);

    pub const fn uniform(r: u8) -> Radii {
        Radii([r; Direction::COUNT])
    }

    pub fn along(dirs: &[Direction], r: u8) -> Radii {
        let mut res = Radii::NONE;
        for dir in dirs {
            res.0[dir.index()] = r;
        }
        res
    }

    /// Returns the radii of a sliding piece of kind `kind`
    ///
    /// Pawns and knights are not sliding pieces in this sense, so they get [`Radii::NONE`].
    pub fn for_kind(kind: PieceKind) -> Radii {
        match kind {
            PieceKind::Rook => Radii::along(&Direction::ORTHOGONAL, 7),
            PieceKind::Bishop => Radii::along(&Direction::DIAGONAL, 7),
            PieceKind::Queen => Radii::uniform(7),
            PieceKind::King => Radii::uniform(1),
            PieceKind::Pawn | PieceKind::Knight => Radii::NONE,
        }
    }

    /// Returns the radii of the forward ray of a pawn
    pub fn pawn_forward(side: Side, has_moved: bool) -> Radii {
        let r = if has_moved { 1 } else { 2 };
        Radii::along(&[geometry::pawn_forward_dir(side)], r)
    }

    #[inline]
    pub fn get(&self, dir: Direction) -> u8 {
        self.0[dir.index()]
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Landing {
    Capture,
    QuietOnly,
}

/// Destinations of a single piece
///
/// A queen in the middle of an empty board has 27 destinations, which is the most any piece
/// can have.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Destinations(ArrayVec<Square, 32>);

impl Deref for Destinations {
    type Target = ArrayVec<Square, 32>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Destinations {
    type Item = &'a Square;
    type IntoIter = slice::Iter<'a, Square>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Destinations {
    pub fn new() -> Destinations {
        Destinations(ArrayVec::new())
    }

    pub fn has(&self, sq: Square) -> bool {
        self.0.contains(&sq)
    }

    pub fn to_bitboard(&self) -> Bitboard {
        self.0.iter().copied().collect()
    }

    fn push(&mut self, sq: Square) {
        self.0.push(sq);
    }
}

/// List of moves for a whole side
///
/// A side holds at most 16 pieces, each of them having no more than 27 destinations.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Move, 512>);

impl Deref for MoveList {
    type Target = ArrayVec<Move, 512>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }

    fn push(&mut self, mv: Move) {
        self.0.push(mv);
    }
}

fn slide(b: &Board, piece: &Piece, radii: Radii, landing: Landing, res: &mut Destinations) {
    for dir in Direction::ALL {
        let mut cur = piece.position();
        for _ in 0..radii.get(dir) {
            cur = match geometry::step_dir(cur, dir) {
                Some(next) => next,
                None => break,
            };
            match b.get(cur) {
                None => res.push(cur),
                Some(other) => {
                    if other.side() != piece.side() && landing == Landing::Capture {
                        res.push(cur);
                    }
                    break;
                }
            }
        }
    }
}

fn jump(b: &Board, piece: &Piece, offsets: &[(isize, isize)], res: &mut Destinations) {
    for &(dr, dc) in offsets {
        if let Some(dst) = geometry::step(piece.position(), dr, dc) {
            match b.get(dst) {
                Some(other) if other.side() == piece.side() => {}
                _ => res.push(dst),
            }
        }
    }
}

fn pawn(b: &Board, piece: &Piece, res: &mut Destinations) {
    let radii = Radii::pawn_forward(piece.side(), piece.has_moved());
    slide(b, piece, radii, Landing::QuietOnly, res);

    let forward = geometry::pawn_forward(piece.side());
    for dc in [-1, 1] {
        if let Some(dst) = geometry::step(piece.position(), forward, dc) {
            if matches!(b.get(dst), Some(other) if other.side() != piece.side()) {
                res.push(dst);
            }
        }
    }
}

/// Returns all the pseudo-legal destinations of `piece` on board `b`
///
/// The piece is expected to stand on `b`, though only its kind, side, position and move flag
/// are actually used.
pub fn destinations(b: &Board, piece: &Piece) -> Destinations {
    let mut res = Destinations::new();
    match piece.kind() {
        PieceKind::Pawn => pawn(b, piece, &mut res),
        PieceKind::Knight => jump(b, piece, &KNIGHT_OFFSETS, &mut res),
        PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen | PieceKind::King => {
            slide(b, piece, Radii::for_kind(piece.kind()), Landing::Capture, &mut res)
        }
    }
    res
}

/// Returns the pseudo-legal destinations of the piece on `sq`, or `None` if `sq` is empty
pub fn destinations_from(b: &Board, sq: Square) -> Option<Destinations> {
    b.get(sq).map(|piece| destinations(b, piece))
}

/// Generates all the pseudo-legal moves of side `side`
pub fn gen_all(b: &Board, side: Side) -> MoveList {
    let mut res = MoveList::new();
    for piece in b.pieces(side) {
        for &dst in &destinations(b, piece) {
            res.push(Move::new(piece.position(), dst));
        }
    }
    res
}

fn is_safe(b: &Board, piece: &Piece, dst: Square) -> bool {
    !attack::in_check(&b.advance(piece, dst), piece.side())
}

/// Returns the destinations of the piece on `sq` which don't leave its own king attacked
///
/// Unlike [`Board::make_move()`], this function doesn't care whether the piece's side is
/// to move.
pub fn legal_destinations(b: &Board, sq: Square) -> Option<Destinations> {
    let piece = b.get(sq)?;
    let mut res = Destinations::new();
    for &dst in &destinations(b, piece) {
        if is_safe(b, piece, dst) {
            res.push(dst);
        }
    }
    Some(res)
}

/// Generates all the legal moves for the side to move
pub fn gen_legal(b: &Board) -> MoveList {
    let mut res = MoveList::new();
    for piece in b.pieces(b.side()) {
        for &dst in &destinations(b, piece) {
            if is_safe(b, piece, dst) {
                res.push(Move::new(piece.position(), dst));
            }
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::RawBoard;
    use crate::types::Cell;
    use std::collections::BTreeSet;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn board(items: &[(&str, Side, PieceKind)]) -> Board {
        let mut raw = RawBoard::empty();
        for &(s, side, kind) in items {
            raw.put(sq(s), Cell::from_parts(side, kind));
        }
        Board::try_from(raw).unwrap()
    }

    fn dsts(b: &Board, at: Square) -> BTreeSet<Square> {
        destinations_from(b, at).unwrap().iter().copied().collect()
    }

    fn set(items: &[(usize, usize)]) -> BTreeSet<Square> {
        items.iter().map(|&(r, c)| Square::new(r, c)).collect()
    }

    #[test]
    fn test_radii() {
        let rook = Radii::for_kind(PieceKind::Rook);
        let bishop = Radii::for_kind(PieceKind::Bishop);
        for dir in Direction::ALL {
            assert_eq!(rook.get(dir) > 0, !dir.is_diagonal());
            assert_eq!(bishop.get(dir) > 0, dir.is_diagonal());
            assert_eq!(Radii::for_kind(PieceKind::King).get(dir), 1);
        }
        let fresh = Radii::pawn_forward(Side::Black, false);
        assert_eq!(fresh.get(Direction::South), 2);
        assert_eq!(fresh.get(Direction::North), 0);
        assert_eq!(Radii::pawn_forward(Side::White, true).get(Direction::North), 1);
    }

    #[test]
    fn test_rook_blocking() {
        let b = board(&[
            ("a1", Side::White, PieceKind::Rook),
            ("d1", Side::White, PieceKind::Knight),
            ("f1", Side::Black, PieceKind::Bishop),
        ]);
        let res = dsts(&b, Square::new(0, 0));
        let horizontal: BTreeSet<_> = res.iter().copied().filter(|s| s.row() == 0).collect();
        assert_eq!(horizontal, set(&[(0, 1), (0, 2)]));
        for col in 3..8 {
            assert!(!res.contains(&Square::new(0, col)));
        }
        let vertical: BTreeSet<_> = res.iter().copied().filter(|s| s.col() == 0).collect();
        assert_eq!(vertical.len(), 7);
    }

    #[test]
    fn test_rook_capture_stops_ray() {
        let b = board(&[
            ("a1", Side::White, PieceKind::Rook),
            ("a4", Side::Black, PieceKind::Pawn),
            ("b1", Side::White, PieceKind::King),
        ]);
        assert_eq!(dsts(&b, sq("a1")), set(&[(1, 0), (2, 0), (3, 0)]));
    }

    #[test]
    fn test_knight_jump() {
        let b = board(&[("e5", Side::White, PieceKind::Knight)]);
        assert_eq!(
            dsts(&b, Square::new(4, 4)),
            set(&[
                (6, 5),
                (6, 3),
                (2, 5),
                (2, 3),
                (5, 6),
                (3, 6),
                (5, 2),
                (3, 2)
            ]),
        );
    }

    #[test]
    fn test_knight_jumps_over_and_captures() {
        let b = board(&[
            ("b1", Side::White, PieceKind::Knight),
            ("b2", Side::White, PieceKind::Pawn),
            ("c2", Side::White, PieceKind::Pawn),
            ("d2", Side::White, PieceKind::Pawn),
            ("a3", Side::Black, PieceKind::Pawn),
        ]);
        assert_eq!(dsts(&b, sq("b1")), set(&[(2, 0), (2, 2)]));
    }

    #[test]
    fn test_knight_corner() {
        let b = board(&[("h8", Side::Black, PieceKind::Knight)]);
        assert_eq!(dsts(&b, sq("h8")), set(&[(5, 6), (6, 5)]));
    }

    #[test]
    fn test_bishop_and_queen() {
        let b = board(&[
            ("d4", Side::White, PieceKind::Bishop),
            ("f6", Side::Black, PieceKind::Knight),
            ("b2", Side::White, PieceKind::Pawn),
        ]);
        assert_eq!(
            dsts(&b, sq("d4")),
            ["c3", "e5", "f6", "c5", "b6", "a7", "e3", "f2", "g1"]
                .iter()
                .map(|s| sq(s))
                .collect::<BTreeSet<_>>(),
        );

        let b = board(&[("d4", Side::White, PieceKind::Queen)]);
        assert_eq!(dsts(&b, sq("d4")).len(), 27);
    }

    #[test]
    fn test_king_radius() {
        let b = board(&[
            ("a1", Side::White, PieceKind::King),
            ("a2", Side::White, PieceKind::Pawn),
            ("b2", Side::Black, PieceKind::Pawn),
        ]);
        assert_eq!(dsts(&b, sq("a1")), set(&[(0, 1), (1, 1)]));

        let b = board(&[("e4", Side::Black, PieceKind::King)]);
        assert_eq!(dsts(&b, sq("e4")).len(), 8);
    }

    #[test]
    fn test_pawn_forward() {
        let b = board(&[("e2", Side::White, PieceKind::Pawn)]);
        assert_eq!(dsts(&b, Square::new(1, 4)), set(&[(2, 4), (3, 4)]));

        let b = board(&[("e7", Side::Black, PieceKind::Pawn)]);
        assert_eq!(dsts(&b, sq("e7")), set(&[(5, 4), (4, 4)]));

        // Pawns never capture straight ahead, and a blocked square stops the ray
        let b = board(&[
            ("e2", Side::White, PieceKind::Pawn),
            ("e3", Side::Black, PieceKind::Knight),
        ]);
        assert!(dsts(&b, sq("e2")).is_empty());

        let b = board(&[
            ("e2", Side::White, PieceKind::Pawn),
            ("e4", Side::Black, PieceKind::Knight),
        ]);
        assert_eq!(dsts(&b, sq("e2")), set(&[(2, 4)]));
    }

    #[test]
    fn test_pawn_captures() {
        let b = board(&[
            ("e4", Side::White, PieceKind::Pawn),
            ("d5", Side::Black, PieceKind::Rook),
            ("f5", Side::White, PieceKind::Knight),
            ("e5", Side::Black, PieceKind::Pawn),
        ]);
        assert_eq!(dsts(&b, sq("e4")), set(&[(4, 3)]));

        let b = board(&[
            ("a7", Side::Black, PieceKind::Pawn),
            ("b6", Side::White, PieceKind::Pawn),
        ]);
        assert_eq!(dsts(&b, sq("a7")), set(&[(5, 0), (4, 0), (5, 1)]));
    }

    #[test]
    fn test_gen_all_initial() {
        let b = Board::initial();
        assert_eq!(gen_all(&b, Side::White).len(), 20);
        assert_eq!(gen_all(&b, Side::Black).len(), 20);
        assert_eq!(gen_legal(&b).len(), 20);
        assert!(destinations_from(&b, sq("e4")).is_none());
    }

    #[test]
    fn test_legal_filter() {
        let b = board(&[
            ("e1", Side::White, PieceKind::King),
            ("e2", Side::White, PieceKind::Rook),
            ("e8", Side::Black, PieceKind::Queen),
        ]);
        let pinned: BTreeSet<_> = legal_destinations(&b, sq("e2"))
            .unwrap()
            .iter()
            .copied()
            .collect();
        assert_eq!(
            pinned,
            ["e3", "e4", "e5", "e6", "e7", "e8"]
                .iter()
                .map(|s| sq(s))
                .collect()
        );
        assert_eq!(dsts(&b, sq("e2")).len(), 6 + 7);
        assert!(gen_legal(&b).iter().all(|mv| mv.src() != sq("e2") || mv.dst().col() == 4));
    }
}
