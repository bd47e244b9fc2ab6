//! Iterative-deepening A* search over the move catalog.
//!
//! Each iteration is a depth-first probe bounded by an f-cost threshold
//! (`g + h`). A probe either finds the goal or reports the smallest f-cost
//! that exceeded the threshold, which becomes the next threshold.
//!
//! Key points:
//! - The probe uses an explicit frame stack instead of recursion, so the
//!   depth ceiling is limited only by memory
//! - States are `Copy` values owned by their frame, so siblings never alias
//! - A move that exactly undoes the previous one is never expanded

use std::time::Instant;

use log::{debug, info};

use crate::heuristic::{Heuristic, INFINITY};
use crate::moves::{format_sequence, Move};
use crate::state::PuzzleState;
use crate::{start, success, working};

/// Deeper probes grow the frame stack on demand.
const MAX_PREALLOCATED_DEPTH: u32 = 64;

/// Which successors are skipped based on the previous move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MovePruning {
    /// Skip only the exact inverse of the previous move (`R` after `R'`,
    /// `R2` after `R2`).
    #[default]
    InverseOnly,
    /// Skip every move on the same face as the previous move. Two turns of
    /// one face always combine into at most one, so optimality is kept.
    SameFace,
}

impl MovePruning {
    #[inline]
    fn skips(self, mv: Move, previous: Move) -> bool {
        match self {
            MovePruning::InverseOnly => mv.cancels(previous),
            MovePruning::SameFace => mv.same_face(previous),
        }
    }
}

/// Final result of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Solved(Vec<Move>),
    /// Every threshold up to the depth ceiling was exhausted.
    NoSolutionWithinDepth,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of depth-first probes run.
    pub iterations: u32,
    /// Nodes visited across all probes.
    pub nodes_explored: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

/// Result of one bounded depth-first probe.
enum Probe {
    Found(Vec<Move>),
    /// Smallest f-cost above the threshold, or `INFINITY`.
    Exceeded(u32),
}

/// What to do with a node after checking it against the threshold.
enum Visit {
    Cutoff(u32),
    Goal,
    Expand,
}

/// A node being expanded in the depth-first probe.
#[derive(Clone, Copy)]
struct Frame {
    state: PuzzleState,
    /// Path cost from the start.
    g: u32,
    /// Move that produced `state`, `None` at the root.
    last_move: Option<Move>,
    /// Index into `Move::ALL` of the next successor to try.
    next_move_index: usize,
    /// Smallest overshoot reported by children so far.
    min_overshoot: u32,
}

/// IDA* solver configured with a heuristic and a depth ceiling.
pub struct IdaStar<'h, H: Heuristic> {
    heuristic: &'h H,
    max_depth: u32,
    pruning: MovePruning,
}

impl<'h, H: Heuristic> IdaStar<'h, H> {
    pub fn new(heuristic: &'h H, max_depth: u32) -> Self {
        Self {
            heuristic,
            max_depth,
            pruning: MovePruning::default(),
        }
    }

    #[must_use]
    pub fn with_pruning(mut self, pruning: MovePruning) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Searches for a shortest move sequence taking `start` to the goal.
    ///
    /// Running out of thresholds is reported as
    /// [`SearchOutcome::NoSolutionWithinDepth`], not as an error.
    pub fn solve(&self, start: &PuzzleState) -> SearchReport {
        let mut stats = SearchStats::default();

        if start.is_solved() {
            return SearchReport {
                outcome: SearchOutcome::Solved(Vec::new()),
                stats,
            };
        }

        info!(start!("Starting IDA* search (max depth: {})"), self.max_depth);
        let search_start = Instant::now();
        let mut threshold = self.heuristic.estimate(start);

        while threshold != INFINITY && threshold <= self.max_depth {
            stats.iterations += 1;
            debug!(
                working!("IDA* iteration {}: threshold = {}"),
                stats.iterations,
                threshold
            );
            let iteration_start = Instant::now();
            let nodes_before = stats.nodes_explored;

            let probe = self.probe(start, threshold, &mut stats);

            debug!(
                working!("Explored {} nodes in {:.3}s"),
                stats.nodes_explored - nodes_before,
                iteration_start.elapsed().as_secs_f64()
            );

            match probe {
                Probe::Found(path) => {
                    info!(
                        success!("Solution found in {} iterations ({} nodes, {:.3}s): {}"),
                        stats.iterations,
                        stats.nodes_explored,
                        search_start.elapsed().as_secs_f64(),
                        format_sequence(&path)
                    );
                    return SearchReport {
                        outcome: SearchOutcome::Solved(path),
                        stats,
                    };
                }
                Probe::Exceeded(INFINITY) => break,
                Probe::Exceeded(next_threshold) => threshold = next_threshold,
            }
        }

        info!("No solution found within depth {}", self.max_depth);
        SearchReport {
            outcome: SearchOutcome::NoSolutionWithinDepth,
            stats,
        }
    }

    /// Checks a node against the threshold, the goal and the depth ceiling.
    #[inline]
    fn visit(
        &self,
        state: &PuzzleState,
        g: u32,
        threshold: u32,
        stats: &mut SearchStats,
    ) -> Visit {
        stats.nodes_explored += 1;

        let f = g.saturating_add(self.heuristic.estimate(state));
        if f > threshold {
            Visit::Cutoff(f)
        } else if state.is_solved() {
            Visit::Goal
        } else if g >= self.max_depth {
            Visit::Cutoff(INFINITY)
        } else {
            Visit::Expand
        }
    }

    /// Depth-first probe bounded by `threshold`.
    ///
    /// Invariant: `path.len() + 1 == stack.len()` whenever the stack is
    /// non-empty, i.e. `path` holds the moves leading to the top frame.
    fn probe(&self, start: &PuzzleState, threshold: u32, stats: &mut SearchStats) -> Probe {
        match self.visit(start, 0, threshold, stats) {
            Visit::Cutoff(f) => return Probe::Exceeded(f),
            Visit::Goal => return Probe::Found(Vec::new()),
            Visit::Expand => {}
        }

        let capacity = self.max_depth.min(MAX_PREALLOCATED_DEPTH) as usize + 1;
        let mut path: Vec<Move> = Vec::with_capacity(capacity);
        let mut stack: Vec<Frame> = Vec::with_capacity(capacity);
        stack.push(Frame {
            state: *start,
            g: 0,
            last_move: None,
            next_move_index: 0,
            min_overshoot: INFINITY,
        });

        while let Some(frame) = stack.last_mut() {
            // find the next successor not ruled out by the previous move
            let next_move = loop {
                let Some(&mv) = Move::ALL.get(frame.next_move_index) else {
                    break None;
                };
                frame.next_move_index += 1;
                match frame.last_move {
                    Some(previous) if self.pruning.skips(mv, previous) => continue,
                    _ => break Some(mv),
                }
            };

            let Some(mv) = next_move else {
                // all children tried: report the smallest overshoot upward
                let finished = *frame;
                stack.pop();
                path.pop();
                match stack.last_mut() {
                    Some(parent) => {
                        parent.min_overshoot = parent.min_overshoot.min(finished.min_overshoot);
                    }
                    None => return Probe::Exceeded(finished.min_overshoot),
                }
                continue;
            };

            let child = frame.state.apply(mv);
            let child_g = frame.g + 1;
            match self.visit(&child, child_g, threshold, stats) {
                Visit::Cutoff(f) => frame.min_overshoot = frame.min_overshoot.min(f),
                Visit::Goal => {
                    path.push(mv);
                    return Probe::Found(path);
                }
                Visit::Expand => {
                    path.push(mv);
                    stack.push(Frame {
                        state: child,
                        g: child_g,
                        last_move: Some(mv),
                        next_move_index: 0,
                        min_overshoot: INFINITY,
                    });
                }
            }
        }

        Probe::Exceeded(INFINITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::{CornerHeuristic, ZeroHeuristic};
    use crate::moves::parse_sequence;
    use crate::pattern_db::PatternDatabase;
    use crate::scramble::verify_solution;

    fn scrambled(text: &str) -> (Vec<Move>, PuzzleState) {
        let scramble = parse_sequence(text).unwrap();
        let state = PuzzleState::new().apply_sequence(&scramble);
        (scramble, state)
    }

    fn solution(report: &SearchReport) -> &[Move] {
        match &report.outcome {
            SearchOutcome::Solved(moves) => moves,
            SearchOutcome::NoSolutionWithinDepth => panic!("expected a solution"),
        }
    }

    #[test_log::test]
    fn test_solved_start_returns_empty_solution() {
        let db = PatternDatabase::build(3);
        let heuristic = CornerHeuristic::new(&db).unwrap();
        let report = IdaStar::new(&heuristic, 10).solve(&PuzzleState::new());
        assert_eq!(report.outcome, SearchOutcome::Solved(vec![]));
        assert_eq!(report.stats, SearchStats::default());
    }

    #[test_log::test]
    fn test_single_move_scramble() {
        let db = PatternDatabase::build(7);
        let heuristic = CornerHeuristic::new(&db).unwrap();
        let (scramble, state) = scrambled("R");
        let report = IdaStar::new(&heuristic, 1).solve(&state);
        assert_eq!(report.outcome, SearchOutcome::Solved(parse_sequence("R'").unwrap()));
        assert!(verify_solution(&scramble, solution(&report)));
    }

    #[test_log::test]
    fn test_three_move_scramble() {
        let db = PatternDatabase::build(7);
        let heuristic = CornerHeuristic::new(&db).unwrap();
        let (scramble, state) = scrambled("R U F");
        let report = IdaStar::new(&heuristic, 10).solve(&state);
        let moves = solution(&report);
        assert_eq!(moves.len(), 3);
        assert!(verify_solution(&scramble, moves));
        // the exact heuristic goes straight to the answer
        assert_eq!(report.stats.iterations, 1);
    }

    #[test_log::test]
    fn test_matches_blind_search_length() {
        let db = PatternDatabase::build(5);
        let heuristic = CornerHeuristic::new(&db).unwrap();
        for text in ["U R", "F R' U2", "R2 F U'", "U F2 R U'"] {
            let (scramble, state) = scrambled(text);
            let informed = IdaStar::new(&heuristic, 8).solve(&state);
            let blind = IdaStar::new(&ZeroHeuristic, 8).solve(&state);
            assert_eq!(solution(&informed).len(), solution(&blind).len(), "{text}");
            assert!(verify_solution(&scramble, solution(&informed)));
            assert!(verify_solution(&scramble, solution(&blind)));
        }
    }

    #[test_log::test]
    fn test_same_face_pruning_keeps_optimality() {
        let db = PatternDatabase::build(6);
        let heuristic = CornerHeuristic::new(&db).unwrap();
        for text in ["R U F", "F2 U R'", "U R2 F' U"] {
            let (scramble, state) = scrambled(text);
            let narrow = IdaStar::new(&heuristic, 10).solve(&state);
            let strong = IdaStar::new(&heuristic, 10)
                .with_pruning(MovePruning::SameFace)
                .solve(&state);
            assert_eq!(solution(&narrow).len(), solution(&strong).len(), "{text}");
            assert!(verify_solution(&scramble, solution(&strong)));
        }
    }

    #[test_log::test]
    fn test_blind_search_finds_optimal_two_move_solution() {
        let (scramble, state) = scrambled("F U");
        let report = IdaStar::new(&ZeroHeuristic, 4).solve(&state);
        assert_eq!(solution(&report), parse_sequence("U' F'").unwrap());
        assert!(verify_solution(&scramble, solution(&report)));
        // thresholds 0, 1 and 2
        assert_eq!(report.stats.iterations, 3);
    }

    #[test_log::test]
    fn test_depth_ceiling_stops_search() {
        let (_, state) = scrambled("R U F");
        let report = IdaStar::new(&ZeroHeuristic, 2).solve(&state);
        assert_eq!(report.outcome, SearchOutcome::NoSolutionWithinDepth);
    }

    #[test_log::test]
    fn test_state_beyond_table_has_no_solution() {
        // the table only reaches depth 1, so `R U` estimates as infinite
        let db = PatternDatabase::build(1);
        let heuristic = CornerHeuristic::new(&db).unwrap();
        let (_, state) = scrambled("R U");
        let report = IdaStar::new(&heuristic, 10).solve(&state);
        assert_eq!(report.outcome, SearchOutcome::NoSolutionWithinDepth);
        assert_eq!(report.stats.iterations, 0);
    }

    #[test_log::test]
    fn test_unbounded_depth_ceiling() {
        let db = PatternDatabase::build(7);
        let heuristic = CornerHeuristic::new(&db).unwrap();
        let (scramble, state) = scrambled("R");
        let report = IdaStar::new(&heuristic, u32::MAX).solve(&state);
        assert_eq!(report.outcome, SearchOutcome::Solved(parse_sequence("R'").unwrap()));
        assert!(verify_solution(&scramble, solution(&report)));
    }

    #[test_log::test]
    fn test_infinite_estimate_with_unbounded_ceiling() {
        let db = PatternDatabase::build(1);
        let heuristic = CornerHeuristic::new(&db).unwrap();
        let (_, state) = scrambled("R U");
        let report = IdaStar::new(&heuristic, u32::MAX).solve(&state);
        assert_eq!(report.outcome, SearchOutcome::NoSolutionWithinDepth);
        assert_eq!(report.stats.iterations, 0);
    }

    #[test]
    fn test_inverse_only_pruning_rule() {
        let r = Move::ALL[3];
        let r_prime = Move::ALL[4];
        let r2 = Move::ALL[5];
        assert!(MovePruning::InverseOnly.skips(r_prime, r));
        assert!(MovePruning::InverseOnly.skips(r2, r2));
        assert!(!MovePruning::InverseOnly.skips(r, r));
        assert!(!MovePruning::InverseOnly.skips(r2, r));
        assert!(MovePruning::SameFace.skips(r, r));
        assert!(!MovePruning::SameFace.skips(Move::ALL[0], r));
    }
}
