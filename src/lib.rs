//! Corner Solver Library
//!
//! Solves the corners of a cube puzzle with IDA* search, guided by a pattern
//! database of exact corner distances built by breadth-first search.

pub mod error;
pub mod heuristic;
pub mod moves;
pub mod pattern_db;
pub mod persistence;
pub mod scramble;
pub mod solver;
pub mod state;

pub use error::{IntegrityError, SolverError};
pub use heuristic::{CornerHeuristic, Heuristic, ZeroHeuristic, INFINITY};
pub use moves::{apply_move, inverse_move_name, Face, Move, Turn};
pub use pattern_db::PatternDatabase;
pub use solver::{IdaStar, MovePruning, SearchOutcome, SearchReport, SearchStats};
pub use state::{CornerKey, PuzzleState};

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}
