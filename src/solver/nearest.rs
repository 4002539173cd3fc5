//! Nearest-neighbor tour construction.
//!
//! The textbook greedy heuristic: start at city 0, repeatedly hop to the
//! closest unvisited city. Fast and mediocre on its own; its real job here
//! is to compete with the MST tour as a refinement seed.

use crate::error::TspResult;
use crate::matrix::DistanceMatrix;
use crate::solver::{TspSolution, TspSolver};

/// Nearest-neighbor construction solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighbor;

impl NearestNeighbor {
    /// Create a new nearest-neighbor solver
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build a tour greedily from city 0. Ties go to the lowest index.
    #[must_use]
    pub fn construct(&self, matrix: &DistanceMatrix) -> Vec<usize> {
        let n = matrix.n_cities();
        let mut tour = Vec::with_capacity(n);
        tour.push(0);
        let mut last = 0;
        let mut remaining: Vec<usize> = (1..n).collect();

        while !remaining.is_empty() {
            let mut best_idx = 0;
            let mut best_dist = matrix.distance(last, remaining[0]);
            for (idx, &city) in remaining.iter().enumerate().skip(1) {
                let d = matrix.distance(last, city);
                if d < best_dist {
                    best_dist = d;
                    best_idx = idx;
                }
            }
            // remove() keeps the rest ascending, so ties stay lowest-first
            last = remaining.remove(best_idx);
            tour.push(last);
        }

        tour
    }
}

impl TspSolver for NearestNeighbor {
    fn solve(&mut self, matrix: &DistanceMatrix) -> TspResult<TspSolution> {
        let tour = self.construct(matrix);
        let cost = matrix.tour_cost(&tour);
        Ok(TspSolution::constructed(tour, cost))
    }

    fn name(&self) -> &'static str {
        "Nearest Neighbor"
    }
}
