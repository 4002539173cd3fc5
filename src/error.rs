//! Error types for viajante operations.
//!
//! Every failure mode is a typed variant carrying enough context to act on,
//! such as which row was ragged or which vertex the spanning tree could not
//! reach. Malformed input is detected at matrix construction or solver
//! entry, never mid-algorithm.

use std::fmt;
use std::path::PathBuf;

/// Main error type for viajante operations.
///
/// # Examples
///
/// ```
/// use viajante::error::TspError;
///
/// let err = TspError::CapacityExceeded { cities: 30, ceiling: 22 };
/// assert!(err.to_string().contains("exact solver"));
/// ```
#[derive(Debug)]
pub enum TspError {
    /// Distance matrix has zero rows.
    EmptyMatrix,

    /// A matrix row has the wrong length.
    NonSquare {
        /// Row index
        row: usize,
        /// Expected length (matrix dimension)
        expected: usize,
        /// Actual row length
        actual: usize,
    },

    /// A distance entry is negative or not finite.
    InvalidDistance {
        /// Source city
        from: usize,
        /// Destination city
        to: usize,
        /// Offending value
        value: f64,
    },

    /// A diagonal entry is nonzero.
    NonZeroDiagonal {
        /// City index
        city: usize,
        /// Offending value
        value: f64,
    },

    /// The matrix is not symmetric within tolerance.
    Asymmetric {
        /// Source city
        from: usize,
        /// Destination city
        to: usize,
        /// Absolute difference between the two entries
        delta: f64,
    },

    /// Instance is too large for the exact solver.
    CapacityExceeded {
        /// Number of cities in the instance
        cities: usize,
        /// Maximum the solver accepts
        ceiling: usize,
    },

    /// The spanning tree could not reach a vertex.
    ///
    /// Zero off-diagonal entries are treated as missing edges by the tree
    /// builder, so a matrix of isolated components lands here.
    Disconnected {
        /// First unreachable vertex
        vertex: usize,
    },

    /// An odd-degree vertex was left without a matching partner.
    UnmatchedOddVertex {
        /// The vertex that could not be paired
        vertex: usize,
    },

    /// A tour passed in for refinement is not a permutation of the cities.
    InvalidTour {
        /// What was wrong with it
        reason: String,
    },

    /// TSPLIB file could not be parsed.
    ParseError {
        /// File being parsed
        file: PathBuf,
        /// 1-based line number, when attributable to a line
        line: Option<usize>,
        /// Error description
        cause: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),
}

impl fmt::Display for TspError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TspError::EmptyMatrix => {
                write!(f, "Distance matrix is empty: at least one city required")
            }
            TspError::NonSquare {
                row,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Distance matrix is not square: row {row} has {actual} entries, expected {expected}"
                )
            }
            TspError::InvalidDistance { from, to, value } => {
                write!(
                    f,
                    "Invalid distance at ({from}, {to}): {value} (must be finite and non-negative)"
                )
            }
            TspError::NonZeroDiagonal { city, value } => {
                write!(f, "Nonzero diagonal at city {city}: {value}")
            }
            TspError::Asymmetric { from, to, delta } => {
                write!(
                    f,
                    "Asymmetric distances between {from} and {to}: entries differ by {delta}"
                )
            }
            TspError::CapacityExceeded { cities, ceiling } => {
                write!(
                    f,
                    "Instance with {cities} cities exceeds the exact solver ceiling of {ceiling}"
                )
            }
            TspError::Disconnected { vertex } => {
                write!(
                    f,
                    "Graph is disconnected: vertex {vertex} is unreachable (zero entries count as missing edges)"
                )
            }
            TspError::UnmatchedOddVertex { vertex } => {
                write!(f, "Odd-degree vertex {vertex} could not be matched")
            }
            TspError::InvalidTour { reason } => {
                write!(f, "Invalid tour: {reason}")
            }
            TspError::ParseError { file, line, cause } => match line {
                Some(n) => write!(f, "Parse error in {} at line {n}: {cause}", file.display()),
                None => write!(f, "Parse error in {}: {cause}", file.display()),
            },
            TspError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for TspError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TspError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TspError {
    fn from(err: std::io::Error) -> Self {
        TspError::Io(err)
    }
}

impl TspError {
    /// Create an invalid-tour error with descriptive context
    #[must_use]
    pub fn invalid_tour(reason: impl Into<String>) -> Self {
        Self::InvalidTour {
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results.
pub type TspResult<T> = std::result::Result<T, TspError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_matrix_display() {
        let err = TspError::EmptyMatrix;
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_non_square_display() {
        let err = TspError::NonSquare {
            row: 2,
            expected: 4,
            actual: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("not square"));
        assert!(msg.contains("row 2"));
        assert!(msg.contains('3'));
        assert!(msg.contains('4'));
    }

    #[test]
    fn test_invalid_distance_display() {
        let err = TspError::InvalidDistance {
            from: 0,
            to: 3,
            value: -1.5,
        };
        let msg = err.to_string();
        assert!(msg.contains("(0, 3)"));
        assert!(msg.contains("-1.5"));
    }

    #[test]
    fn test_capacity_exceeded_display() {
        let err = TspError::CapacityExceeded {
            cities: 30,
            ceiling: 22,
        };
        let msg = err.to_string();
        assert!(msg.contains("30"));
        assert!(msg.contains("22"));
    }

    #[test]
    fn test_disconnected_display() {
        let err = TspError::Disconnected { vertex: 5 };
        let msg = err.to_string();
        assert!(msg.contains("disconnected"));
        assert!(msg.contains("vertex 5"));
    }

    #[test]
    fn test_parse_error_with_line() {
        let err = TspError::ParseError {
            file: PathBuf::from("berlin52.tsp"),
            line: Some(7),
            cause: "Invalid x coordinate: abc".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("berlin52.tsp"));
        assert!(msg.contains("line 7"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn test_parse_error_without_line() {
        let err = TspError::ParseError {
            file: PathBuf::from("x.tsp"),
            line: None,
            cause: "Missing DIMENSION field".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("x.tsp"));
        assert!(!msg.contains("line"));
    }

    #[test]
    fn test_invalid_tour_helper() {
        let err = TspError::invalid_tour("length 3, expected 5");
        assert!(err.to_string().contains("Invalid tour"));
        assert!(err.to_string().contains("length 3"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TspError = io_err.into();
        assert!(matches!(err, TspError::Io(_)));
    }

    #[test]
    fn test_error_source_io() {
        use std::error::Error;
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = TspError::Io(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_source_other() {
        use std::error::Error;
        let err = TspError::EmptyMatrix;
        assert!(err.source().is_none());
    }
}
