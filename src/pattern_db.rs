//! Corner pattern database: exact corner distances from the goal state.
//!
//! Built once by breadth-first search over the move catalog. Because every
//! move costs 1, the first depth recorded for a key is its shortest distance.
//! The table is read-only once built.

use std::collections::VecDeque;
use std::time::Instant;

use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::error::{IntegrityError, SolverError};
use crate::moves::Move;
use crate::state::{CornerKey, PuzzleState};
use crate::{start, success, working};

/// How often to report build progress, in recorded states.
const PROGRESS_INTERVAL: usize = 50_000;

/// Mapping from corner key to shortest move distance, up to `max_depth`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternDatabase {
    max_depth: u8,
    distances: FxHashMap<CornerKey, u8>,
}

impl PatternDatabase {
    /// Explores every corner configuration within `max_depth` moves of the
    /// goal state.
    pub fn build(max_depth: u8) -> Self {
        info!(start!("Generating corner pattern database (max depth: {})"), max_depth);
        let build_start = Instant::now();

        // the distance map doubles as the visited set: a key is recorded
        // exactly when it is first dequeued
        let mut distances: FxHashMap<CornerKey, u8> = FxHashMap::default();
        let mut queue = VecDeque::from([(PuzzleState::new(), 0u8)]);

        while let Some((state, depth)) = queue.pop_front() {
            let key = state.corner_key();
            if depth > max_depth || distances.contains_key(&key) {
                continue;
            }
            distances.insert(key, depth);

            if distances.len() % PROGRESS_INTERVAL == 0 {
                debug!(
                    working!("Processed {} states at depth {}"),
                    distances.len(),
                    depth
                );
            }

            // successors past the cap would be skipped on dequeue anyway
            if depth == max_depth {
                continue;
            }

            for mv in Move::ALL {
                let next = state.apply(mv);
                if !distances.contains_key(&next.corner_key()) {
                    queue.push_back((next, depth + 1));
                }
            }
        }

        info!(
            success!("Pattern database generation complete: {} entries in {:.3}s"),
            distances.len(),
            build_start.elapsed().as_secs_f64()
        );

        Self {
            max_depth,
            distances,
        }
    }

    /// Wraps a pre-supplied table, e.g. one loaded from disk.
    ///
    /// The table is not checked here; call [`PatternDatabase::validate`]
    /// before searching with it.
    pub fn from_entries(
        max_depth: u8,
        entries: impl IntoIterator<Item = (CornerKey, u8)>,
    ) -> Self {
        Self {
            max_depth,
            distances: entries.into_iter().collect(),
        }
    }

    /// Checks that the goal state is present with distance 0.
    ///
    /// # Errors
    ///
    /// `DatabaseIntegrity` if the goal entry is missing or nonzero.
    pub fn validate(&self) -> Result<(), SolverError> {
        match self.distance(PuzzleState::SOLVED.corner_key()) {
            None => Err(IntegrityError::MissingGoalEntry.into()),
            Some(0) => {
                debug!("Pattern database validation passed");
                Ok(())
            }
            Some(depth) => Err(IntegrityError::NonZeroGoalEntry(depth).into()),
        }
    }

    #[inline]
    pub fn distance(&self, key: CornerKey) -> Option<u8> {
        self.distances.get(&key).copied()
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CornerKey, u8)> + '_ {
        self.distances.iter().map(|(&key, &depth)| (key, depth))
    }

    /// Number of entries at each depth, indexed by depth.
    pub fn depth_histogram(&self) -> Vec<usize> {
        let mut histogram = vec![0; usize::from(self.max_depth) + 1];
        for &depth in self.distances.values() {
            if let Some(count) = histogram.get_mut(usize::from(depth)) {
                *count += 1;
            }
        }
        histogram
    }
}
