//! Exact Held-Karp dynamic programming.
//!
//! `dp[mask][i]` is the cheapest cost of starting at city 0, visiting
//! exactly the cities in `mask`, and ending at `i`. O(n^2 * 2^n) time and
//! O(n * 2^n) memory, so instances are capacity-checked before the tables
//! are allocated.
//!
//! # References
//!
//! - Held, Karp (1962) "A dynamic programming approach to sequencing
//!   problems"

use crate::error::{TspError, TspResult};
use crate::matrix::DistanceMatrix;
use crate::solver::{TerminationReason, TspSolution, TspSolver};

/// Largest instance accepted by default. `2^22` subsets is around 700 MB
/// of table; beyond that the memory curve gets unreasonable fast.
pub const DEFAULT_MAX_CITIES: usize = 22;

/// Ceiling values above this are clamped. At 30 cities the tables alone
/// would top 250 GB.
const CEILING_LIMIT: usize = 30;

const NO_PRED: usize = usize::MAX;

/// Exact solver. Provably optimal within its capacity ceiling.
#[derive(Debug, Clone, Copy)]
pub struct HeldKarp {
    max_cities: usize,
}

impl Default for HeldKarp {
    fn default() -> Self {
        Self {
            max_cities: DEFAULT_MAX_CITIES,
        }
    }
}

impl HeldKarp {
    /// Create a new exact solver with the default ceiling
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the capacity ceiling. Values above 30 are clamped.
    #[must_use]
    pub fn with_max_cities(mut self, max_cities: usize) -> Self {
        self.max_cities = max_cities.min(CEILING_LIMIT);
        self
    }

    /// Current capacity ceiling
    #[must_use]
    pub fn max_cities(&self) -> usize {
        self.max_cities
    }

    fn run(&self, matrix: &DistanceMatrix) -> TspResult<TspSolution> {
        let n = matrix.n_cities();
        if n > self.max_cities {
            return Err(TspError::CapacityExceeded {
                cities: n,
                ceiling: self.max_cities,
            });
        }

        if n == 1 {
            return Ok(optimal_solution(vec![0], 0.0));
        }

        let size = 1usize << n;
        let mut dp = vec![f64::INFINITY; size * n];
        let mut pred = vec![NO_PRED; size * n];
        dp[n] = 0.0; // mask {0}, city 0: index 1 * n + 0

        for mask in 1..size {
            for u in 0..n {
                if mask & (1 << u) == 0 {
                    continue;
                }
                let cost_here = dp[mask * n + u];
                if !cost_here.is_finite() {
                    continue;
                }
                for v in 0..n {
                    if mask & (1 << v) != 0 {
                        continue;
                    }
                    let next = mask | (1 << v);
                    let candidate = cost_here + matrix.distance(u, v);
                    if candidate < dp[next * n + v] {
                        dp[next * n + v] = candidate;
                        pred[next * n + v] = u;
                    }
                }
            }
        }

        let full = size - 1;
        let mut best_last = 1;
        let mut best_cost = dp[full * n + 1] + matrix.distance(1, 0);
        for i in 2..n {
            let candidate = dp[full * n + i] + matrix.distance(i, 0);
            if candidate < best_cost {
                best_cost = candidate;
                best_last = i;
            }
        }

        // Walk the predecessor chain backward, clearing each visited bit
        let mut tour = Vec::with_capacity(n);
        let mut mask = full;
        let mut current = best_last;
        while current != 0 {
            tour.push(current);
            let p = pred[mask * n + current];
            mask &= !(1 << current);
            current = p;
        }
        tour.push(0);
        tour.reverse();

        Ok(optimal_solution(tour, best_cost))
    }
}

fn optimal_solution(tour: Vec<usize>, cost: f64) -> TspSolution {
    TspSolution {
        tour,
        cost,
        iterations: 0,
        history: vec![cost],
        termination: TerminationReason::Optimal,
    }
}

impl TspSolver for HeldKarp {
    fn solve(&mut self, matrix: &DistanceMatrix) -> TspResult<TspSolution> {
        self.run(matrix)
    }

    fn name(&self) -> &'static str {
        "Held-Karp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_matrix() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 2.0, 9.0, 10.0],
            vec![2.0, 0.0, 6.0, 4.0],
            vec![9.0, 6.0, 0.0, 5.0],
            vec![10.0, 4.0, 5.0, 0.0],
        ])
        .expect("should build")
    }

    fn uniform_matrix(n: usize) -> DistanceMatrix {
        let rows = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if i == j { 0.0 } else { 1.0 })
                    .collect()
            })
            .collect();
        DistanceMatrix::from_rows(rows).expect("should build")
    }

    #[test]
    fn test_held_karp_scenario_optimum() {
        let matrix = scenario_matrix();
        let mut solver = HeldKarp::new();
        let solution = solver.solve(&matrix).expect("should solve");

        assert!((solution.cost - 20.0).abs() < 1e-10);
        assert!(matrix.validate_tour(&solution.tour).is_ok());
        // The optimal cycle, in either direction
        assert!(solution.tour == vec![0, 1, 3, 2] || solution.tour == vec![0, 2, 3, 1]);
        assert_eq!(solution.termination, TerminationReason::Optimal);
    }

    #[test]
    fn test_held_karp_square() {
        let coords = vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        let matrix = DistanceMatrix::from_coords(&coords).expect("should build");
        let mut solver = HeldKarp::new();
        let solution = solver.solve(&matrix).expect("should solve");
        assert!((solution.cost - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_held_karp_single_city() {
        let matrix = DistanceMatrix::from_rows(vec![vec![0.0]]).expect("should build");
        let mut solver = HeldKarp::new();
        let solution = solver.solve(&matrix).expect("should solve");
        assert_eq!(solution.tour, vec![0]);
        assert!((solution.cost - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_held_karp_two_cities() {
        let matrix = DistanceMatrix::from_rows(vec![vec![0.0, 7.0], vec![7.0, 0.0]])
            .expect("should build");
        let mut solver = HeldKarp::new();
        let solution = solver.solve(&matrix).expect("should solve");
        assert_eq!(solution.tour, vec![0, 1]);
        assert!((solution.cost - 14.0).abs() < 1e-10);
    }

    #[test]
    fn test_held_karp_rejects_oversized() {
        let matrix = uniform_matrix(23);
        let mut solver = HeldKarp::new();
        let result = solver.solve(&matrix);
        assert!(matches!(
            result,
            Err(TspError::CapacityExceeded {
                cities: 23,
                ceiling: 22
            })
        ));
    }

    #[test]
    fn test_held_karp_lowered_ceiling() {
        let matrix = uniform_matrix(5);
        let mut solver = HeldKarp::new().with_max_cities(4);
        let result = solver.solve(&matrix);
        assert!(matches!(
            result,
            Err(TspError::CapacityExceeded {
                cities: 5,
                ceiling: 4
            })
        ));
    }

    #[test]
    fn test_held_karp_ceiling_clamped() {
        let solver = HeldKarp::new().with_max_cities(64);
        assert_eq!(solver.max_cities(), 30);
    }

    #[test]
    fn test_held_karp_name() {
        assert_eq!(HeldKarp::new().name(), "Held-Karp");
    }
}
