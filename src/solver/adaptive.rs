//! Adaptive strategy: cheapest construction seed, then local search.
//!
//! Builds both heuristic tours, keeps whichever is cheaper, and hands it
//! to the 2-opt engine. "Adaptive" means exactly this one-shot comparison;
//! there is no online learning. The final cost can never exceed either
//! seed's cost.

use crate::error::TspResult;
use crate::matrix::DistanceMatrix;
use crate::solver::{
    LocalSearch, MstApproximation, NearestNeighbor, Neighborhood, TspSolution, TspSolver,
};

/// Which construction produced the refinement seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStrategy {
    /// MST shortcut tour won (or tied)
    Mst,
    /// Nearest-neighbor tour was strictly cheaper
    NearestNeighbor,
}

impl SeedStrategy {
    /// Get string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mst => "MST Approximation",
            Self::NearestNeighbor => "Nearest Neighbor",
        }
    }
}

/// Adaptive solver combining both constructions with 2-opt refinement.
#[derive(Debug, Clone)]
pub struct AdaptiveSolver {
    /// Refinement iteration cap; `None` picks a size-based default
    pub max_iterations: Option<usize>,
    /// Sampling policy; `None` picks [`Neighborhood::auto`]
    pub neighborhood: Option<Neighborhood>,
    /// Random swaps per escape attempt
    pub escape_moves: usize,
    /// Random seed
    seed: Option<u64>,
}

impl Default for AdaptiveSolver {
    fn default() -> Self {
        Self {
            max_iterations: None,
            neighborhood: None,
            escape_moves: 3,
            seed: None,
        }
    }
}

impl AdaptiveSolver {
    /// Create a new adaptive solver with default parameters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the refinement iteration cap
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Set the neighborhood sampling policy
    #[must_use]
    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = Some(neighborhood);
        self
    }

    /// Set the number of random swaps per escape attempt
    #[must_use]
    pub fn with_escape_moves(mut self, escape_moves: usize) -> Self {
        self.escape_moves = escape_moves;
        self
    }

    /// Set random seed
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Choose the cheaper construction tour. Ties favor the MST tour.
    ///
    /// # Errors
    ///
    /// Propagates the MST solver's errors (`Disconnected`,
    /// `UnmatchedOddVertex`).
    pub fn select_seed(
        &self,
        matrix: &DistanceMatrix,
    ) -> TspResult<(Vec<usize>, SeedStrategy)> {
        let mst_tour = MstApproximation::new().approximate(matrix)?;
        let nn_tour = NearestNeighbor::new().construct(matrix);

        let mst_cost = matrix.tour_cost(&mst_tour);
        let nn_cost = matrix.tour_cost(&nn_tour);

        if nn_cost < mst_cost {
            Ok((nn_tour, SeedStrategy::NearestNeighbor))
        } else {
            Ok((mst_tour, SeedStrategy::Mst))
        }
    }

    /// Build the refinement engine from this solver's configuration
    pub(crate) fn engine(&self) -> LocalSearch {
        let mut engine = LocalSearch::new().with_escape_moves(self.escape_moves);
        if let Some(cap) = self.max_iterations {
            engine = engine.with_max_iterations(cap);
        }
        if let Some(policy) = self.neighborhood {
            engine = engine.with_neighborhood(policy);
        }
        if let Some(seed) = self.seed {
            engine = engine.with_seed(seed);
        }
        engine
    }
}

impl TspSolver for AdaptiveSolver {
    fn solve(&mut self, matrix: &DistanceMatrix) -> TspResult<TspSolution> {
        let (seed_tour, _) = self.select_seed(matrix)?;
        self.engine().refine(matrix, &seed_tour)
    }

    fn name(&self) -> &'static str {
        "Adaptive"
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

    fn six_city_matrix() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 3.0, 9.0, 4.0, 8.0, 2.0],
            vec![3.0, 0.0, 5.0, 7.0, 1.0, 6.0],
            vec![9.0, 5.0, 0.0, 2.0, 4.0, 7.0],
            vec![4.0, 7.0, 2.0, 0.0, 6.0, 5.0],
            vec![8.0, 1.0, 4.0, 6.0, 0.0, 9.0],
            vec![2.0, 6.0, 7.0, 5.0, 9.0, 0.0],
        ])
        .expect("should build")
    }

    #[test]
    fn test_adaptive_builder() {
        let solver = AdaptiveSolver::new()
            .with_max_iterations(20)
            .with_neighborhood(Neighborhood::Exhaustive)
            .with_escape_moves(5)
            .with_seed(42);

        assert_eq!(solver.max_iterations, Some(20));
        assert_eq!(solver.neighborhood, Some(Neighborhood::Exhaustive));
        assert_eq!(solver.escape_moves, 5);
        assert_eq!(solver.seed, Some(42));
    }

    #[test]
    fn test_adaptive_scenario_reaches_optimum() {
        let matrix = scenario_matrix();
        let mut solver = AdaptiveSolver::new().with_seed(42);
        let solution = solver.solve(&matrix).expect("should solve");

        assert!((solution.cost - 20.0).abs() < 1e-10);
        assert!(matrix.validate_tour(&solution.tour).is_ok());
    }

    #[test]
    fn test_adaptive_tie_prefers_mst() {
        // Both constructions cost 20 on this instance
        let matrix = scenario_matrix();
        let solver = AdaptiveSolver::new();
        let (_, strategy) = solver.select_seed(&matrix).expect("should seed");
        assert_eq!(strategy, SeedStrategy::Mst);
    }

    #[test]
    fn test_adaptive_dominates_seeds() {
        let matrix = six_city_matrix();

        let mst_cost = matrix.tour_cost(
            &MstApproximation::new()
                .approximate(&matrix)
                .expect("should solve"),
        );
        let nn_cost = matrix.tour_cost(&NearestNeighbor::new().construct(&matrix));

        let mut solver = AdaptiveSolver::new().with_seed(42);
        let solution = solver.solve(&matrix).expect("should solve");

        assert!(solution.cost <= mst_cost.min(nn_cost) + 1e-10);
    }

    #[test]
    fn test_adaptive_deterministic_with_seed() {
        let matrix = six_city_matrix();

        let mut first = AdaptiveSolver::new().with_seed(42);
        let mut second = AdaptiveSolver::new().with_seed(42);

        let a = first.solve(&matrix).expect("should solve");
        let b = second.solve(&matrix).expect("should solve");

        assert_eq!(a.tour, b.tour);
        assert!((a.cost - b.cost).abs() < 1e-10);
    }

    #[test]
    fn test_adaptive_single_city() {
        let matrix = DistanceMatrix::from_rows(vec![vec![0.0]]).expect("should build");
        let mut solver = AdaptiveSolver::new();
        let solution = solver.solve(&matrix).expect("should solve");
        assert_eq!(solution.tour, vec![0]);
        assert!((solution.cost - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_adaptive_propagates_disconnection() {
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 0.0],
            vec![1.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0],
        ])
        .expect("should build");
        let mut solver = AdaptiveSolver::new();
        assert!(solver.solve(&matrix).is_err());
    }

    #[test]
    fn test_adaptive_name() {
        assert_eq!(AdaptiveSolver::new().name(), "Adaptive");
        assert_eq!(SeedStrategy::Mst.as_str(), "MST Approximation");
        assert_eq!(SeedStrategy::NearestNeighbor.as_str(), "Nearest Neighbor");
    }
}
