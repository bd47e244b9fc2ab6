//! Puzzle state representation and the packed corner key.
//!
//! A state is four small arrays: the permutation and twist of the 8 corners,
//! and the permutation and flip of the 12 edges. Slot `i` holds piece
//! `corner_positions[i]`. Edges are carried for completeness only; no move in
//! this crate touches them, so they stay at identity.

use std::fmt;

use crate::error::SolverError;

/// Number of corner slots.
pub const CORNER_COUNT: usize = 8;

/// Number of edge slots.
pub const EDGE_COUNT: usize = 12;

/// Number of distinct corner twists.
pub const CORNER_TWISTS: u8 = 3;

/// Bits used per corner position in a packed [`CornerKey`].
const POSITION_BITS: u32 = 3;

/// Bits used per corner orientation in a packed [`CornerKey`].
const ORIENTATION_BITS: u32 = 2;

/// Bit offset of the first orientation field in a packed [`CornerKey`].
const ORIENTATION_OFFSET: u32 = POSITION_BITS * CORNER_COUNT as u32;

const IDENTITY_CORNERS: [u8; CORNER_COUNT] = [0, 1, 2, 3, 4, 5, 6, 7];
const IDENTITY_EDGES: [u8; EDGE_COUNT] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

/// A full puzzle configuration.
///
/// `Copy` so that every search branch owns its own value; moves never mutate
/// the state they are applied to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PuzzleState {
    pub(crate) corner_positions: [u8; CORNER_COUNT],
    pub(crate) corner_orientations: [u8; CORNER_COUNT],
    edge_positions: [u8; EDGE_COUNT],
    edge_orientations: [u8; EDGE_COUNT],
}

/// The 16 corner values of a state packed into one integer.
///
/// Positions use 3 bits each (bits 0..24), orientations 2 bits each
/// (bits 24..40).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CornerKey(pub u64);

impl PuzzleState {
    /// The goal state: identity permutations and zero orientations.
    pub const SOLVED: Self = Self {
        corner_positions: IDENTITY_CORNERS,
        corner_orientations: [0; CORNER_COUNT],
        edge_positions: IDENTITY_EDGES,
        edge_orientations: [0; EDGE_COUNT],
    };

    pub const fn new() -> Self {
        Self::SOLVED
    }

    /// Builds a state from corner arrays, with edges left solved.
    ///
    /// # Errors
    ///
    /// If `positions` is not a permutation of `0..8` or any orientation is 3
    /// or more.
    pub fn from_corners(
        positions: [u8; CORNER_COUNT],
        orientations: [u8; CORNER_COUNT],
    ) -> Result<Self, SolverError> {
        let mut seen = [false; CORNER_COUNT];
        for &piece in &positions {
            match seen.get_mut(piece as usize) {
                Some(slot) if !*slot => *slot = true,
                _ => return Err(SolverError::InvalidCornerPermutation(positions)),
            }
        }

        if let Some((slot, &value)) = orientations
            .iter()
            .enumerate()
            .find(|&(_, &value)| value >= CORNER_TWISTS)
        {
            return Err(SolverError::InvalidCornerOrientation { slot, value });
        }

        Ok(Self {
            corner_positions: positions,
            corner_orientations: orientations,
            ..Self::SOLVED
        })
    }

    #[inline]
    pub fn is_solved(&self) -> bool {
        *self == Self::SOLVED
    }

    /// Packs the corner permutation and orientation into a [`CornerKey`].
    #[inline]
    pub fn corner_key(&self) -> CornerKey {
        let mut key = 0u64;
        for slot in 0..CORNER_COUNT {
            key |= u64::from(self.corner_positions[slot]) << (POSITION_BITS * slot as u32);
            key |= u64::from(self.corner_orientations[slot])
                << (ORIENTATION_OFFSET + ORIENTATION_BITS * slot as u32);
        }
        CornerKey(key)
    }

    pub fn corner_positions(&self) -> &[u8; CORNER_COUNT] {
        &self.corner_positions
    }

    pub fn corner_orientations(&self) -> &[u8; CORNER_COUNT] {
        &self.corner_orientations
    }

    pub fn edge_positions(&self) -> &[u8; EDGE_COUNT] {
        &self.edge_positions
    }

    pub fn edge_orientations(&self) -> &[u8; EDGE_COUNT] {
        &self.edge_orientations
    }

    /// Sum of corner orientations modulo 3. Every move preserves it.
    pub fn corner_twist_sum(&self) -> u8 {
        let sum: u32 = self.corner_orientations.iter().map(|&o| u32::from(o)).sum();
        (sum % u32::from(CORNER_TWISTS)) as u8
    }
}

impl Default for PuzzleState {
    fn default() -> Self {
        Self::SOLVED
    }
}

impl CornerKey {
    /// Decodes the key back into a state with solved edges.
    ///
    /// Returns `None` if the bits do not describe a valid corner
    /// configuration.
    pub fn to_state(self) -> Option<PuzzleState> {
        if self.0 >> (ORIENTATION_OFFSET + ORIENTATION_BITS * CORNER_COUNT as u32) != 0 {
            return None;
        }

        let position_mask = (1u64 << POSITION_BITS) - 1;
        let orientation_mask = (1u64 << ORIENTATION_BITS) - 1;
        let mut positions = [0u8; CORNER_COUNT];
        let mut orientations = [0u8; CORNER_COUNT];
        for slot in 0..CORNER_COUNT {
            positions[slot] = ((self.0 >> (POSITION_BITS * slot as u32)) & position_mask) as u8;
            orientations[slot] = ((self.0
                >> (ORIENTATION_OFFSET + ORIENTATION_BITS * slot as u32))
                & orientation_mask) as u8;
        }

        PuzzleState::from_corners(positions, orientations).ok()
    }
}

impl fmt::Display for PuzzleState {
    /// Two rows: the piece in each corner slot, then its twist.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "corners")?;
        for position in self.corner_positions {
            write!(f, " {position}")?;
        }
        write!(f, "\ntwists ")?;
        for orientation in self.corner_orientations {
            write!(f, " {orientation}")?;
        }
        Ok(())
    }
}
