//! The fixed catalog of face turns and their action on corner state.
//!
//! Every move is a corner permutation plus a per-slot twist delta. Applying
//! a move builds a new state where slot `i` receives the piece previously in
//! slot `perm[i]`, twisted by `twist[i]`:
//!
//! ```text
//! new_pos[i] = old_pos[perm[i]]
//! new_ori[i] = (old_ori[perm[i]] + twist[i]) % 3
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::SolverError;
use crate::state::{PuzzleState, CORNER_COUNT, CORNER_TWISTS};

/// Faces that can be turned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    U,
    R,
    F,
}

/// How far a face is turned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
    Half,
}

/// A single face turn, e.g. `R'`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub turn: Turn,
}

/// Corner permutation and twist delta for one move.
struct MoveDef {
    perm: [u8; CORNER_COUNT],
    twist: [u8; CORNER_COUNT],
}

/// Definitions for all moves, indexed by [`Move::index`].
///
/// Ordering note: must stay in sync with `Move::ALL`.
const MOVE_TABLE: [MoveDef; 9] = [
    // U: top layer, no twist
    MoveDef {
        perm: [1, 2, 3, 0, 4, 5, 6, 7],
        twist: [0; CORNER_COUNT],
    },
    // U'
    MoveDef {
        perm: [3, 0, 1, 2, 4, 5, 6, 7],
        twist: [0; CORNER_COUNT],
    },
    // U2
    MoveDef {
        perm: [2, 3, 0, 1, 4, 5, 6, 7],
        twist: [0; CORNER_COUNT],
    },
    // R: cycles slots 0 -> 1 -> 5 -> 4 -> 0
    MoveDef {
        perm: [4, 0, 2, 3, 5, 1, 6, 7],
        twist: [2, 1, 0, 0, 1, 2, 0, 0],
    },
    // R'
    MoveDef {
        perm: [1, 5, 2, 3, 0, 4, 6, 7],
        twist: [2, 1, 0, 0, 1, 2, 0, 0],
    },
    // R2
    MoveDef {
        perm: [5, 4, 2, 3, 1, 0, 6, 7],
        twist: [0; CORNER_COUNT],
    },
    // F: cycles slots 0 -> 4 -> 7 -> 3 -> 0
    MoveDef {
        perm: [3, 1, 2, 7, 0, 5, 6, 4],
        twist: [1, 0, 0, 2, 2, 0, 0, 1],
    },
    // F'
    MoveDef {
        perm: [4, 1, 2, 0, 7, 5, 6, 3],
        twist: [1, 0, 0, 2, 2, 0, 0, 1],
    },
    // F2
    MoveDef {
        perm: [7, 1, 2, 4, 3, 5, 6, 0],
        twist: [0; CORNER_COUNT],
    },
];

impl Move {
    /// The full catalog in search order.
    pub const ALL: [Move; 9] = [
        Move::new(Face::U, Turn::Clockwise),
        Move::new(Face::U, Turn::CounterClockwise),
        Move::new(Face::U, Turn::Half),
        Move::new(Face::R, Turn::Clockwise),
        Move::new(Face::R, Turn::CounterClockwise),
        Move::new(Face::R, Turn::Half),
        Move::new(Face::F, Turn::Clockwise),
        Move::new(Face::F, Turn::CounterClockwise),
        Move::new(Face::F, Turn::Half),
    ];

    pub const fn new(face: Face, turn: Turn) -> Self {
        Self { face, turn }
    }

    /// Position of this move in [`Move::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self.face as usize * 3 + self.turn as usize
    }

    #[must_use]
    pub const fn inverse(self) -> Self {
        let turn = match self.turn {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
            Turn::Half => Turn::Half,
        };
        Self::new(self.face, turn)
    }

    /// True if `self` undoes `previous` exactly.
    #[inline]
    pub fn cancels(self, previous: Move) -> bool {
        self == previous.inverse()
    }

    #[inline]
    pub fn same_face(self, other: Move) -> bool {
        self.face == other.face
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let face = match self.face {
            Face::U => "U",
            Face::R => "R",
            Face::F => "F",
        };
        let suffix = match self.turn {
            Turn::Clockwise => "",
            Turn::CounterClockwise => "'",
            Turn::Half => "2",
        };
        write!(f, "{face}{suffix}")
    }
}

impl FromStr for Move {
    type Err = SolverError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let mut chars = name.chars();
        let face = match chars.next() {
            Some('U') => Face::U,
            Some('R') => Face::R,
            Some('F') => Face::F,
            _ => return Err(SolverError::UnknownMove(name.to_owned())),
        };
        let turn = match chars.as_str() {
            "" => Turn::Clockwise,
            "'" => Turn::CounterClockwise,
            "2" => Turn::Half,
            _ => return Err(SolverError::UnknownMove(name.to_owned())),
        };
        Ok(Move::new(face, turn))
    }
}

impl PuzzleState {
    /// Returns the state reached by turning `mv`. `self` is left untouched.
    #[inline]
    #[must_use]
    pub fn apply(&self, mv: Move) -> Self {
        let def = &MOVE_TABLE[mv.index()];
        let mut next = *self;

        for slot in 0..CORNER_COUNT {
            let source = def.perm[slot] as usize;
            next.corner_positions[slot] = self.corner_positions[source];
            next.corner_orientations[slot] =
                (self.corner_orientations[source] + def.twist[slot]) % CORNER_TWISTS;
        }

        next
    }

    /// Applies each move in order.
    #[must_use]
    pub fn apply_sequence(&self, moves: &[Move]) -> Self {
        moves.iter().fold(*self, |state, &mv| state.apply(mv))
    }
}

/// Applies the move named `name` to `state`.
///
/// # Errors
///
/// `UnknownMove` if `name` is not in the catalog.
pub fn apply_move(state: &PuzzleState, name: &str) -> Result<PuzzleState, SolverError> {
    let mv: Move = name.parse()?;
    Ok(state.apply(mv))
}

/// Name of the move that undoes `name`: `R` <-> `R'`, `R2` stays `R2`.
///
/// # Errors
///
/// `UnknownMove` if `name` is not in the catalog.
pub fn inverse_move_name(name: &str) -> Result<String, SolverError> {
    let mv: Move = name.parse()?;
    Ok(mv.inverse().to_string())
}

/// Parses a sequence such as `R U F'` or `R,U,F'`.
///
/// # Errors
///
/// `UnknownMove` for the first token not in the catalog.
pub fn parse_sequence(text: &str) -> Result<Vec<Move>, SolverError> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::parse::<Move>)
        .collect()
}

/// Formats moves separated by spaces.
pub fn format_sequence(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
