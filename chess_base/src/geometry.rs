use crate::types::{Side, Square};

/// One of the eight compass directions on the board
///
/// North points towards increasing row index, i.e. from White's side to Black's side.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

impl Direction {
    pub const COUNT: usize = 8;

    pub const ALL: [Direction; Direction::COUNT] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    /// Returns `(row_delta, col_delta)` of a single step
    pub const fn delta(&self) -> (isize, isize) {
        match *self {
            Direction::North => (1, 0),
            Direction::NorthEast => (1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (-1, 1),
            Direction::South => (-1, 0),
            Direction::SouthWest => (-1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (1, -1),
        }
    }

    pub const fn is_diagonal(&self) -> bool {
        (*self as u8) & 1 != 0
    }
}

pub const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
];

/// Moves `sq` by the given deltas, returning `None` if the result leaves the board
#[inline]
pub fn step(sq: Square, row_delta: isize, col_delta: isize) -> Option<Square> {
    Square::try_new(sq.row() as isize + row_delta, sq.col() as isize + col_delta)
}

#[inline]
pub fn step_dir(sq: Square, dir: Direction) -> Option<Square> {
    let (dr, dc) = dir.delta();
    step(sq, dr, dc)
}

pub const fn pawn_forward(s: Side) -> isize {
    match s {
        Side::White => 1,
        Side::Black => -1,
    }
}

pub const fn pawn_forward_dir(s: Side) -> Direction {
    match s {
        Side::White => Direction::North,
        Side::Black => Direction::South,
    }
}

pub const fn home_row(s: Side) -> usize {
    match s {
        Side::White => 0,
        Side::Black => 7,
    }
}

pub const fn pawn_row(s: Side) -> usize {
    match s {
        Side::White => 1,
        Side::Black => 6,
    }
}
