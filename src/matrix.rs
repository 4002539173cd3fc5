//! Validated symmetric distance matrix.
//!
//! All malformed-input detection lives here: solvers receive a
//! `DistanceMatrix` that is already known to be square, symmetric,
//! zero-diagonal, and free of negative or non-finite entries, and never
//! re-validate.

use crate::error::{TspError, TspResult};

/// Relative tolerance for the symmetry check.
const SYMMETRY_TOLERANCE: f64 = 1e-6;

/// Symmetric matrix of pairwise travel costs.
///
/// Off-diagonal zero entries are legal. The spanning-tree solver treats
/// them as missing edges; every other consumer treats them as free travel.
///
/// # Examples
///
/// ```
/// use viajante::DistanceMatrix;
///
/// let matrix = DistanceMatrix::from_rows(vec![
///     vec![0.0, 2.0, 9.0, 10.0],
///     vec![2.0, 0.0, 6.0, 4.0],
///     vec![9.0, 6.0, 0.0, 5.0],
///     vec![10.0, 4.0, 5.0, 0.0],
/// ]).expect("valid matrix");
///
/// assert_eq!(matrix.n_cities(), 4);
/// assert!((matrix.tour_cost(&[0, 1, 3, 2]) - 20.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    rows: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Build a matrix from raw rows, validating shape and entries.
    ///
    /// # Errors
    ///
    /// Returns `EmptyMatrix`, `NonSquare`, `InvalidDistance`,
    /// `NonZeroDiagonal`, or `Asymmetric` depending on the first defect
    /// found.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> TspResult<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(TspError::EmptyMatrix);
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(TspError::NonSquare {
                    row: i,
                    expected: n,
                    actual: row.len(),
                });
            }
        }

        for (i, row) in rows.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(TspError::InvalidDistance {
                        from: i,
                        to: j,
                        value,
                    });
                }
            }
            if rows[i][i] != 0.0 {
                return Err(TspError::NonZeroDiagonal {
                    city: i,
                    value: rows[i][i],
                });
            }
        }

        for i in 0..n {
            for j in (i + 1)..n {
                let a = rows[i][j];
                let b = rows[j][i];
                let delta = (a - b).abs();
                let tolerance = SYMMETRY_TOLERANCE * a.abs().max(b.abs()).max(1.0);
                if delta > tolerance {
                    return Err(TspError::Asymmetric {
                        from: i,
                        to: j,
                        delta,
                    });
                }
            }
        }

        Ok(Self { rows })
    }

    /// Build a Euclidean matrix from 2-D city coordinates.
    ///
    /// # Errors
    ///
    /// Returns `EmptyMatrix` for an empty coordinate list, or
    /// `InvalidDistance` if a coordinate is not finite.
    pub fn from_coords(coords: &[(f64, f64)]) -> TspResult<Self> {
        let n = coords.len();
        if n == 0 {
            return Err(TspError::EmptyMatrix);
        }

        let mut rows = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = coords[i].0 - coords[j].0;
                let dy = coords[i].1 - coords[j].1;
                let dist = (dx * dx + dy * dy).sqrt();
                if !dist.is_finite() {
                    return Err(TspError::InvalidDistance {
                        from: i,
                        to: j,
                        value: dist,
                    });
                }
                rows[i][j] = dist;
                rows[j][i] = dist;
            }
        }

        Ok(Self { rows })
    }

    /// Number of cities.
    #[must_use]
    pub fn n_cities(&self) -> usize {
        self.rows.len()
    }

    /// Distance between two cities.
    ///
    /// # Panics
    ///
    /// Panics if `from` or `to` is out of range.
    #[inline]
    #[must_use]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.rows[from][to]
    }

    /// Raw rows, for bulk scans.
    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Total cost of a closed tour, including the edge back to the start.
    ///
    /// A single-city tour costs 0; a two-city tour costs twice the
    /// connecting distance (out and back).
    #[must_use]
    pub fn tour_cost(&self, tour: &[usize]) -> f64 {
        if tour.len() < 2 {
            return 0.0;
        }
        let mut total = 0.0;
        for window in tour.windows(2) {
            total += self.rows[window[0]][window[1]];
        }
        total + self.rows[tour[tour.len() - 1]][tour[0]]
    }

    /// Check that a tour is a permutation of `0..n_cities()`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTour` naming the first defect: wrong length, an
    /// out-of-range city, or a repeated city.
    pub fn validate_tour(&self, tour: &[usize]) -> TspResult<()> {
        let n = self.n_cities();
        if tour.len() != n {
            return Err(TspError::invalid_tour(format!(
                "length {}, expected {n}",
                tour.len()
            )));
        }

        let mut seen = vec![false; n];
        for &city in tour {
            if city >= n {
                return Err(TspError::invalid_tour(format!(
                    "city {city} out of range (0..{n})"
                )));
            }
            if seen[city] {
                return Err(TspError::invalid_tour(format!("city {city} repeated")));
            }
            seen[city] = true;
        }

        Ok(())
    }
}
