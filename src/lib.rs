//! Viajante: symmetric TSP toolkit in pure Rust.
//!
//! Three constructive solvers and a refinement engine behind one trait:
//! an MST-based approximation, nearest-neighbor construction, exact
//! Held-Karp dynamic programming for small instances, and 2-opt local
//! search driven by an adaptive controller that refines the cheaper of
//! the two heuristic tours.
//!
//! # Quick Start
//!
//! ```
//! use viajante::{AdaptiveSolver, DistanceMatrix, TspSolver};
//!
//! let matrix = DistanceMatrix::from_rows(vec![
//!     vec![0.0, 2.0, 9.0, 10.0],
//!     vec![2.0, 0.0, 6.0, 4.0],
//!     vec![9.0, 6.0, 0.0, 5.0],
//!     vec![10.0, 4.0, 5.0, 0.0],
//! ]).unwrap();
//!
//! let mut solver = AdaptiveSolver::new().with_seed(42);
//! let solution = solver.solve(&matrix).unwrap();
//!
//! assert!((solution.cost - 20.0).abs() < 1e-10);
//! assert_eq!(solution.tour.len(), 4);
//! ```
//!
//! # Modules
//!
//! - [`matrix`]: Validated symmetric distance matrix
//! - [`solver`]: The four solving strategies and the 2-opt engine
//! - [`instance`]: TSPLIB parsing and synthetic instance generation
//! - [`error`]: Typed error enum and result alias

pub mod error;
pub mod instance;
pub mod matrix;
pub mod solver;

pub use error::{TspError, TspResult};
pub use instance::{TspInstance, TsplibParser};
pub use matrix::DistanceMatrix;
pub use solver::{
    AdaptiveSolver, HeldKarp, LocalSearch, MstApproximation, NearestNeighbor, Neighborhood,
    SeedStrategy, TerminationReason, TspSolution, TspSolver,
};
