//! Problem instances: named distance matrices with optional coordinates.
//!
//! Instances come from TSPLIB files ([`TsplibParser`]), from raw matrices
//! or coordinate lists, or from the seeded synthetic generators used by
//! benchmarks and the comparison driver.

mod tsplib;

pub use tsplib::{EdgeWeightType, TsplibParser};

use crate::error::TspResult;
use crate::matrix::DistanceMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

/// A named TSP instance.
#[derive(Debug, Clone)]
pub struct TspInstance {
    /// Instance name
    pub name: String,
    /// Free-form comment from the source file, if any
    pub comment: Option<String>,
    /// City coordinates, when the instance came from points
    pub coords: Option<Vec<(f64, f64)>>,
    /// Validated distance matrix
    pub matrix: DistanceMatrix,
    /// Best known tour cost, for gap reporting
    pub best_known: Option<f64>,
}

impl TspInstance {
    /// Create an instance from 2-D city coordinates (Euclidean metric).
    ///
    /// # Errors
    ///
    /// Returns `EmptyMatrix` for an empty coordinate list.
    pub fn from_coords(name: impl Into<String>, coords: Vec<(f64, f64)>) -> TspResult<Self> {
        let matrix = DistanceMatrix::from_coords(&coords)?;
        Ok(Self {
            name: name.into(),
            comment: None,
            coords: Some(coords),
            matrix,
            best_known: None,
        })
    }

    /// Create an instance from an already validated matrix.
    #[must_use]
    pub fn from_matrix(name: impl Into<String>, matrix: DistanceMatrix) -> Self {
        Self {
            name: name.into(),
            comment: None,
            coords: None,
            matrix,
            best_known: None,
        }
    }

    /// Load a TSPLIB file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, or `ParseError` with file
    /// and line context if the content is malformed.
    pub fn load(path: &Path) -> TspResult<Self> {
        TsplibParser::parse_file(path)
    }

    /// Attach a best known cost
    #[must_use]
    pub fn with_best_known(mut self, cost: f64) -> Self {
        self.best_known = Some(cost);
        self
    }

    /// Number of cities
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.matrix.n_cities()
    }

    /// Distance between two cities
    #[must_use]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.matrix.distance(from, to)
    }

    /// Random cities uniform in a `side` x `side` square.
    ///
    /// Deterministic for a given seed.
    ///
    /// # Errors
    ///
    /// Returns `EmptyMatrix` when `n` is 0.
    ///
    /// # Panics
    ///
    /// Panics if `side` is not positive.
    pub fn random_euclidean(n: usize, side: f64, seed: u64) -> TspResult<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let coords: Vec<(f64, f64)> = (0..n)
            .map(|_| (rng.gen_range(0.0..side), rng.gen_range(0.0..side)))
            .collect();
        Self::from_coords(format!("euclidean-{n}"), coords)
    }

    /// Random symmetric matrix with off-diagonal costs uniform in
    /// `[min, max)`.
    ///
    /// Deterministic for a given seed.
    ///
    /// # Errors
    ///
    /// Returns `EmptyMatrix` when `n` is 0, or `InvalidDistance` if the
    /// bounds admit negative costs.
    ///
    /// # Panics
    ///
    /// Panics if `min >= max`.
    pub fn random_matrix(n: usize, min: f64, max: f64, seed: u64) -> TspResult<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut rows = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = rng.gen_range(min..max);
                rows[i][j] = d;
                rows[j][i] = d;
            }
        }
        let matrix = DistanceMatrix::from_rows(rows)?;
        Ok(Self::from_matrix(format!("uniform-{n}"), matrix))
    }
}
