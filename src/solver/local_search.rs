//! 2-opt local search with a randomized escape move.
//!
//! The single refinement engine behind the adaptive solver. Each iteration
//! scans a neighborhood of 2-opt moves and applies the best improving one;
//! when no reversal helps, a burst of random interior swaps is tried and
//! kept only if it strictly improves the tour. Pure hill climbing: cost
//! never increases.
//!
//! A 2-opt move removes edges `(tour[i-1], tour[i])` and
//! `(tour[j], tour[j+1])` and reverses the segment between them. Its cost
//! delta is computable from four distances, so a scan is O(1) per pair.
//!
//! # References
//!
//! - Croes (1958) "A method for solving traveling-salesman problems"

use crate::error::TspResult;
use crate::matrix::DistanceMatrix;
use crate::solver::{TerminationReason, TspSolution};
use rand::rngs::StdRng;
use rand::{thread_rng, Rng, RngCore, SeedableRng};

/// Improvements smaller than this are float noise, not progress.
const EPSILON: f64 = 1e-10;

/// Default iteration cap.
const DEFAULT_ITERATIONS: usize = 100;

/// Iteration cap above [`LARGE_INSTANCE_THRESHOLD`] cities.
const LARGE_INSTANCE_ITERATIONS: usize = 5;

const LARGE_INSTANCE_THRESHOLD: usize = 5000;

/// Default number of random swaps in one escape attempt.
const DEFAULT_ESCAPE_MOVES: usize = 3;

/// Largest instance scanned exhaustively by [`Neighborhood::auto`].
const SMALL_INSTANCE_LIMIT: usize = 500;

/// Which 2-opt pairs a pass examines.
///
/// Exact window and stride sizes are scalability policy, not part of the
/// algorithm's contract: every variant applies the best improving move it
/// saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighborhood {
    /// Every pair `1 <= i < j <= n-1`
    Exhaustive,
    /// First index below `max_first`, second index within `span` of it
    Windowed {
        /// Exclusive upper bound on the first index
        max_first: usize,
        /// Window width for the second index
        span: usize,
    },
    /// Both indices advance by `stride`, with a hard cap on examined pairs
    Strided {
        /// Maximum number of pairs to examine per pass
        max_checks: usize,
        /// Index increment (minimum 1)
        stride: usize,
    },
}

impl Neighborhood {
    /// Size-based default: exhaustive scans for small instances, strided
    /// sampling once a full pass would be too expensive.
    #[must_use]
    pub fn auto(n: usize) -> Self {
        if n <= SMALL_INSTANCE_LIMIT {
            Self::Exhaustive
        } else {
            Self::Strided {
                max_checks: (10 * n).min(50_000),
                stride: (n / 1000).max(1),
            }
        }
    }
}

/// Parameterized 2-opt refinement engine.
///
/// Not a standalone solver: it improves a seed tour, it does not build
/// one. The adaptive solver owns the seeding strategy.
///
/// # Examples
///
/// ```
/// use viajante::{DistanceMatrix, LocalSearch};
///
/// let matrix = DistanceMatrix::from_coords(&[
///     (0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0),
/// ]).expect("valid coords");
///
/// // A tour crossing the square diagonally
/// let refined = LocalSearch::new()
///     .with_seed(42)
///     .refine(&matrix, &[0, 2, 1, 3])
///     .expect("valid seed tour");
/// assert!((refined.cost - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct LocalSearch {
    /// Iteration cap; `None` picks a size-based default
    pub max_iterations: Option<usize>,
    /// Sampling policy; `None` picks [`Neighborhood::auto`]
    pub neighborhood: Option<Neighborhood>,
    /// Random swaps per escape attempt
    pub escape_moves: usize,
    /// Random seed
    seed: Option<u64>,
}

impl Default for LocalSearch {
    fn default() -> Self {
        Self {
            max_iterations: None,
            neighborhood: None,
            escape_moves: DEFAULT_ESCAPE_MOVES,
            seed: None,
        }
    }
}

impl LocalSearch {
    /// Create a new engine with default parameters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the iteration cap
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

    /// Improve a seed tour until convergence or the iteration cap.
    ///
    /// The returned cost is never above the seed's cost. A fresh RNG is
    /// created per call, so two calls with the same seed are identical.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTour` if the seed is not a permutation of the
    /// matrix's cities.
    pub fn refine(&self, matrix: &DistanceMatrix, seed_tour: &[usize]) -> TspResult<TspSolution> {
        matrix.validate_tour(seed_tour)?;
        let n = matrix.n_cities();
        let cap = self.max_iterations.unwrap_or_else(|| default_cap(n));
        let policy = self.neighborhood.unwrap_or_else(|| Neighborhood::auto(n));

        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(thread_rng()),
        };

        let mut tour = seed_tour.to_vec();
        let mut cost = matrix.tour_cost(&tour);
        let mut history = Vec::with_capacity(cap + 1);
        history.push(cost);
        let mut iterations = 0;
        let mut termination = TerminationReason::IterationCap;

        for _ in 0..cap {
            let mut improved = false;

            if let Some((i, j, delta)) = best_move(matrix, &tour, policy) {
                tour[i..=j].reverse();
                cost += delta;
                improved = true;
            } else if n >= 4 {
                // Positions 1..n-1 keep the start city fixed
                let mut candidate = tour.clone();
                for _ in 0..self.escape_moves {
                    let a = rng.gen_range(1..n - 1);
                    let b = rng.gen_range(1..n - 1);
                    candidate.swap(a, b);
                }
                let candidate_cost = matrix.tour_cost(&candidate);
                if candidate_cost < cost - EPSILON {
                    tour = candidate;
                    cost = candidate_cost;
                    improved = true;
                }
            }

            iterations += 1;
            history.push(cost);

            if !improved {
                termination = TerminationReason::Converged;
                break;
            }
        }

        // Report the recomputed cycle cost, not the sum of deltas
        let cost = matrix.tour_cost(&tour);

        Ok(TspSolution {
            tour,
            cost,
            iterations,
            history,
            termination,
        })
    }
}

fn default_cap(n: usize) -> usize {
    if n > LARGE_INSTANCE_THRESHOLD {
        LARGE_INSTANCE_ITERATIONS
    } else {
        DEFAULT_ITERATIONS
    }
}

/// Cost change of reversing `tour[i..=j]`. Relies on symmetry: the
/// reversed segment's internal edges keep their cost.
#[inline]
fn two_opt_delta(matrix: &DistanceMatrix, tour: &[usize], i: usize, j: usize) -> f64 {
    let n = tour.len();
    let a = tour[i - 1];
    let b = tour[i];
    let c = tour[j];
    let d = tour[(j + 1) % n];
    matrix.distance(a, c) + matrix.distance(b, d)
        - matrix.distance(a, b)
        - matrix.distance(c, d)
}

/// Best improving move in the sampled neighborhood, as `(i, j, delta)`.
fn best_move(
    matrix: &DistanceMatrix,
    tour: &[usize],
    policy: Neighborhood,
) -> Option<(usize, usize, f64)> {
    let n = tour.len();
    if n < 3 {
        return None;
    }
    let mut best: Option<(usize, usize, f64)> = None;

    let consider = |i: usize, j: usize, best: &mut Option<(usize, usize, f64)>| {
        let delta = two_opt_delta(matrix, tour, i, j);
        if delta < -EPSILON && best.map_or(true, |(_, _, bd)| delta < bd) {
            *best = Some((i, j, delta));
        }
    };

    match policy {
        Neighborhood::Exhaustive => {
            for i in 1..n - 1 {
                for j in (i + 1)..n {
                    consider(i, j, &mut best);
                }
            }
        }
        Neighborhood::Windowed { max_first, span } => {
            for i in 1..max_first.min(n - 1) {
                for j in (i + 1)..(i + span).min(n) {
                    consider(i, j, &mut best);
                }
            }
        }
        Neighborhood::Strided { max_checks, stride } => {
            let stride = stride.max(1);
            let mut checks = 0;
            let mut i = 1;
            while i < n - 1 && checks < max_checks {
                let mut j = i + 1;
                while j < n && checks < max_checks {
                    checks += 1;
                    consider(i, j, &mut best);
                    j += stride;
                }
                i += stride;
            }
        }
    }

    best
}
