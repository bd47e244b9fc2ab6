//! Random scrambles and solution checking.

use crate::moves::Move;
use crate::state::PuzzleState;

/// Draws `length` moves uniformly from the catalog.
pub fn random_scramble(length: usize, rng: &mut fastrand::Rng) -> Vec<Move> {
    (0..length)
        .map(|_| Move::ALL[rng.usize(..Move::ALL.len())])
        .collect()
}

/// Replays `scramble` then `solution` on a fresh goal state and reports
/// whether it ends solved.
pub fn verify_solution(scramble: &[Move], solution: &[Move]) -> bool {
    PuzzleState::new()
        .apply_sequence(scramble)
        .apply_sequence(solution)
        .is_solved()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::parse_sequence;

    #[test]
    fn test_scramble_length_and_catalog() {
        let mut rng = fastrand::Rng::with_seed(3);
        let scramble = random_scramble(25, &mut rng);
        assert_eq!(scramble.len(), 25);
        assert!(scramble.iter().all(|mv| Move::ALL.contains(mv)));
    }

    #[test]
    fn test_seeded_scrambles_repeat() {
        let first = random_scramble(12, &mut fastrand::Rng::with_seed(42));
        let second = random_scramble(12, &mut fastrand::Rng::with_seed(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_inverse_sequence_verifies() {
        let scramble = parse_sequence("R U F' U2").unwrap();
        let solution: Vec<Move> = scramble.iter().rev().map(|mv| mv.inverse()).collect();
        assert!(verify_solution(&scramble, &solution));
    }

    #[test]
    fn test_wrong_solution_fails() {
        let scramble = parse_sequence("R U").unwrap();
        let solution = parse_sequence("R' U'").unwrap();
        assert!(!verify_solution(&scramble, &solution));
    }

    #[test]
    fn test_empty_scramble_is_solved() {
        assert!(verify_solution(&[], &[]));
    }
}
