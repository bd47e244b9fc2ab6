//! Lower bounds on the number of moves left to reach the goal.

use crate::error::SolverError;
use crate::pattern_db::PatternDatabase;
use crate::state::PuzzleState;

/// Cost meaning "no information": the state was not reached while building
/// the table, so it is at least `max_depth + 1` moves from the goal.
pub const INFINITY: u32 = u32::MAX;

/// An admissible estimate of the remaining distance to the goal.
pub trait Heuristic {
    fn estimate(&self, state: &PuzzleState) -> u32;
}

/// Always 0. Turns IDA* into plain iterative-deepening DFS.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    #[inline]
    fn estimate(&self, _state: &PuzzleState) -> u32 {
        0
    }
}

/// Looks up the corner distance in a validated [`PatternDatabase`].
#[derive(Clone, Copy, Debug)]
pub struct CornerHeuristic<'a> {
    database: &'a PatternDatabase,
}

impl<'a> CornerHeuristic<'a> {
    /// # Errors
    ///
    /// `DatabaseIntegrity` if `database` fails validation. A table that does
    /// not map the goal to 0 is never used for search.
    pub fn new(database: &'a PatternDatabase) -> Result<Self, SolverError> {
        database.validate()?;
        Ok(Self { database })
    }

    pub fn database(&self) -> &'a PatternDatabase {
        self.database
    }
}

impl Heuristic for CornerHeuristic<'_> {
    #[inline]
    fn estimate(&self, state: &PuzzleState) -> u32 {
        self.database
            .distance(state.corner_key())
            .map_or(INFINITY, u32::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IntegrityError;
    use crate::moves::{parse_sequence, Move};

    #[test]
    fn test_goal_estimate_is_zero() {
        let db = PatternDatabase::build(3);
        let heuristic = CornerHeuristic::new(&db).unwrap();
        assert_eq!(heuristic.estimate(&PuzzleState::SOLVED), 0);
    }

    #[test]
    fn test_estimate_matches_table_within_depth() {
        let db = PatternDatabase::build(4);
        let heuristic = CornerHeuristic::new(&db).unwrap();
        for (key, depth) in db.iter() {
            let state = key.to_state().unwrap();
            assert_eq!(heuristic.estimate(&state), u32::from(depth));
        }
    }

    #[test]
    fn test_estimate_never_exceeds_scramble_length() {
        let db = PatternDatabase::build(5);
        let heuristic = CornerHeuristic::new(&db).unwrap();
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..500 {
            let length = rng.usize(0..=5);
            let state = (0..length).fold(PuzzleState::new(), |state, _| {
                state.apply(Move::ALL[rng.usize(..Move::ALL.len())])
            });
            // a scramble of `length` moves is an upper bound on the true distance
            assert!(heuristic.estimate(&state) <= length as u32);
        }
    }

    #[test]
    fn test_unreached_state_is_infinite() {
        let db = PatternDatabase::build(1);
        let heuristic = CornerHeuristic::new(&db).unwrap();
        let state = PuzzleState::new().apply_sequence(&parse_sequence("R U").unwrap());
        assert_eq!(heuristic.estimate(&state), INFINITY);
    }

    #[test]
    fn test_rejects_invalid_database() {
        let db = PatternDatabase::from_entries(3, [(PuzzleState::SOLVED.corner_key(), 2)]);
        assert_eq!(
            CornerHeuristic::new(&db).unwrap_err(),
            SolverError::DatabaseIntegrity(IntegrityError::NonZeroGoalEntry(2))
        );
    }

    #[test]
    fn test_zero_heuristic() {
        let state = PuzzleState::new().apply_sequence(&parse_sequence("F R").unwrap());
        assert_eq!(ZeroHeuristic.estimate(&state), 0);
    }
}
