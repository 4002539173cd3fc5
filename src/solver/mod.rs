//! TSP solver implementations.
//!
//! Provides four interchangeable solving strategies:
//! - MST approximation (spanning tree + greedy matching + shortcut)
//! - Nearest neighbor (greedy construction)
//! - Held-Karp (exact dynamic programming, small instances)
//! - Adaptive (cheapest heuristic seed refined by local search)
//!
//! plus the [`LocalSearch`] refinement engine the adaptive strategy is
//! built on.

mod adaptive;
mod held_karp;
mod local_search;
mod mst;
mod nearest;

pub use adaptive::{AdaptiveSolver, SeedStrategy};
pub use held_karp::HeldKarp;
pub use local_search::{LocalSearch, Neighborhood};
pub use mst::MstApproximation;
pub use nearest::NearestNeighbor;

use crate::error::TspResult;
use crate::matrix::DistanceMatrix;

/// Why a solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// One-shot construction, no iterative phase
    Constructed,
    /// Exact search, result is provably optimal
    Optimal,
    /// No improving move remained
    Converged,
    /// Iteration cap reached while still improving
    IterationCap,
}

impl TerminationReason {
    /// Get string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Constructed => "constructed",
            Self::Optimal => "optimal",
            Self::Converged => "converged",
            Self::IterationCap => "iteration cap",
        }
    }
}

/// TSP solution
#[derive(Debug, Clone)]
pub struct TspSolution {
    /// Tour as city indices
    pub tour: Vec<usize>,
    /// Total cycle cost, closing edge included
    pub cost: f64,
    /// Refinement iterations executed (0 for one-shot constructions)
    pub iterations: usize,
    /// Best cost after each iteration; the leading entry is the
    /// starting cost, so the length is always `iterations + 1`
    pub history: Vec<f64>,
    /// Why the solver stopped
    pub termination: TerminationReason,
}

impl TspSolution {
    /// Create a solution for a one-shot construction
    #[must_use]
    pub fn constructed(tour: Vec<usize>, cost: f64) -> Self {
        Self {
            tour,
            cost,
            iterations: 0,
            history: vec![cost],
            termination: TerminationReason::Constructed,
        }
    }

    /// Check if this solution is better than another
    #[must_use]
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.cost < other.cost
    }
}

/// Trait for TSP solvers
pub trait TspSolver: Send + Sync {
    /// Solve an instance given its distance matrix
    fn solve(&mut self, matrix: &DistanceMatrix) -> TspResult<TspSolution>;

    /// Get algorithm name
    fn name(&self) -> &'static str;
}

/// Calculate gap from optimal (or best known), in percent
#[must_use]
pub fn optimality_gap(solution_cost: f64, optimal_cost: f64) -> f64 {
    ((solution_cost - optimal_cost) / optimal_cost) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_constructed() {
        let solution = TspSolution::constructed(vec![0, 1, 2], 10.5);
        assert_eq!(solution.tour, vec![0, 1, 2]);
        assert!((solution.cost - 10.5).abs() < 1e-10);
        assert_eq!(solution.iterations, 0);
        assert_eq!(solution.history, vec![10.5]);
        assert_eq!(solution.termination, TerminationReason::Constructed);
    }

    #[test]
    fn test_solution_comparison() {
        let better = TspSolution::constructed(vec![0, 1, 2], 10.0);
        let worse = TspSolution::constructed(vec![0, 2, 1], 15.0);

        assert!(better.is_better_than(&worse));
        assert!(!worse.is_better_than(&better));
    }

    #[test]
    fn test_termination_as_str() {
        assert_eq!(TerminationReason::Constructed.as_str(), "constructed");
        assert_eq!(TerminationReason::Optimal.as_str(), "optimal");
        assert_eq!(TerminationReason::Converged.as_str(), "converged");
        assert_eq!(TerminationReason::IterationCap.as_str(), "iteration cap");
    }

    #[test]
    fn test_optimality_gap() {
        let gap = optimality_gap(102.0, 100.0);
        assert!((gap - 2.0).abs() < 1e-10);

        let gap = optimality_gap(100.0, 100.0);
        assert!((gap - 0.0).abs() < 1e-10);
    }
}
