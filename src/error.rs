//! Error types shared by the state model, move algebra and pattern database.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("Move '{0}' is not defined")]
    UnknownMove(String),
    #[error("Corner positions {0:?} are not a permutation of 0..8")]
    InvalidCornerPermutation([u8; 8]),
    #[error("Corner slot {slot} has orientation {value}, expected a value between 0 and 2")]
    InvalidCornerOrientation { slot: usize, value: u8 },
    #[error("Pattern database failed validation: {0}")]
    DatabaseIntegrity(#[from] IntegrityError),
}

/// Ways a pattern database can be unusable for search.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("missing the solved state")]
    MissingGoalEntry,
    #[error("solved state should have distance 0, got {0}")]
    NonZeroGoalEntry(u8),
}
