//! TSPLIB format parser.
//!
//! Supports the coordinate-based subset of the format: NAME, COMMENT,
//! DIMENSION, and EDGE_WEIGHT_TYPE headers followed by a
//! NODE_COORD_SECTION with 1-based indices. EUC_2D and CEIL_2D metrics
//! are accepted; anything else is a parse error.
//!
//! Reference: Reinelt (1991) "TSPLIB - A Traveling Salesman Problem Library"

use crate::error::{TspError, TspResult};
use crate::instance::TspInstance;
use crate::matrix::DistanceMatrix;
use std::path::Path;

/// Distance metric named by EDGE_WEIGHT_TYPE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeWeightType {
    /// Plain Euclidean distance
    Euc2d,
    /// Euclidean distance rounded up
    Ceil2d,
}

/// Parser for TSPLIB format files
#[derive(Debug)]
pub struct TsplibParser;

impl TsplibParser {
    /// Parse a TSPLIB file
    ///
    /// # Errors
    ///
    /// Returns `Io` if reading fails, otherwise the same errors as
    /// [`TsplibParser::parse`].
    pub fn parse_file(path: &Path) -> TspResult<TspInstance> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    /// Parse TSPLIB content
    ///
    /// # Errors
    ///
    /// Returns `ParseError` with file and line context for malformed
    /// headers or coordinates, a missing DIMENSION, a coordinate count
    /// that does not match it, or an unsupported EDGE_WEIGHT_TYPE.
    pub fn parse(content: &str, path: &Path) -> TspResult<TspInstance> {
        let mut name = String::new();
        let mut comment = None;
        let mut dimension = 0usize;
        let mut weight_type = EdgeWeightType::Euc2d;
        let mut coords: Vec<(f64, f64)> = Vec::new();
        let mut in_node_section = false;

        for (line_num, raw) in content.lines().enumerate() {
            let line = raw.trim();

            if line.is_empty() || line == "EOF" {
                continue;
            }
            if line == "NODE_COORD_SECTION" {
                in_node_section = true;
                continue;
            }

            if in_node_section {
                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts.len() < 3 {
                    return Err(TspError::ParseError {
                        file: path.to_path_buf(),
                        line: Some(line_num + 1),
                        cause: format!("Malformed coordinate line: {line}"),
                    });
                }
                let x: f64 = parts[1].parse().map_err(|_| TspError::ParseError {
                    file: path.to_path_buf(),
                    line: Some(line_num + 1),
                    cause: format!("Invalid x coordinate: {}", parts[1]),
                })?;
                let y: f64 = parts[2].parse().map_err(|_| TspError::ParseError {
                    file: path.to_path_buf(),
                    line: Some(line_num + 1),
                    cause: format!("Invalid y coordinate: {}", parts[2]),
                })?;
                coords.push((x, y));
                continue;
            }

            if let Some((key, value)) = line.split_once(':') {
                let value = value.trim();
                match key.trim().to_uppercase().as_str() {
                    "NAME" => name = value.to_string(),
                    "COMMENT" => comment = Some(value.to_string()),
                    "DIMENSION" => {
                        dimension = value.parse().map_err(|_| TspError::ParseError {
                            file: path.to_path_buf(),
                            line: Some(line_num + 1),
                            cause: format!("Invalid dimension: {value}"),
                        })?;
                    }
                    "EDGE_WEIGHT_TYPE" => {
                        weight_type = Self::parse_edge_weight_type(value, path, line_num)?;
                    }
                    // Unknown or informational fields - ignore
                    _ => {}
                }
            }
        }

        if dimension == 0 {
            return Err(TspError::ParseError {
                file: path.to_path_buf(),
                line: None,
                cause: "Missing DIMENSION field".into(),
            });
        }
        if coords.is_empty() {
            return Err(TspError::ParseError {
                file: path.to_path_buf(),
                line: None,
                cause: "No NODE_COORD_SECTION found".into(),
            });
        }
        if coords.len() != dimension {
            return Err(TspError::ParseError {
                file: path.to_path_buf(),
                line: None,
                cause: format!("Expected {dimension} coordinates, found {}", coords.len()),
            });
        }

        let matrix = DistanceMatrix::from_rows(Self::distance_rows(&coords, weight_type))?;

        if name.is_empty() {
            name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unnamed")
                .to_string();
        }

        Ok(TspInstance {
            name,
            comment,
            coords: Some(coords),
            matrix,
            best_known: None,
        })
    }

    fn parse_edge_weight_type(
        value: &str,
        path: &Path,
        line_num: usize,
    ) -> TspResult<EdgeWeightType> {
        match value.to_uppercase().as_str() {
            "EUC_2D" => Ok(EdgeWeightType::Euc2d),
            "CEIL_2D" => Ok(EdgeWeightType::Ceil2d),
            _ => Err(TspError::ParseError {
                file: path.to_path_buf(),
                line: Some(line_num + 1),
                cause: format!("Unsupported edge weight type: {value}"),
            }),
        }
    }

    fn distance_rows(coords: &[(f64, f64)], weight_type: EdgeWeightType) -> Vec<Vec<f64>> {
        let n = coords.len();
        let mut rows = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = coords[i].0 - coords[j].0;
                let dy = coords[i].1 - coords[j].1;
                let euclidean = (dx * dx + dy * dy).sqrt();
                let dist = match weight_type {
                    EdgeWeightType::Euc2d => euclidean,
                    EdgeWeightType::Ceil2d => euclidean.ceil(),
                };
                rows[i][j] = dist;
                rows[j][i] = dist;
            }
        }
        rows
    }
}
