//! MST-based tour approximation.
//!
//! Builds a minimum spanning tree, pairs up odd-degree vertices with a
//! greedy nearest-available matching, then shortcuts a depth-first walk of
//! the combined multigraph into a tour.
//!
//! The matching is greedy rather than minimum-weight, so the classical
//! Christofides 1.5x bound does not strictly hold; in practice the tours
//! land well inside 2x of optimal.
//!
//! # References
//!
//! - Prim (1957) "Shortest connection networks and some generalizations"
//! - Christofides (1976) "Worst-case analysis of a new heuristic for the
//!   travelling salesman problem"

use crate::error::{TspError, TspResult};
use crate::matrix::DistanceMatrix;
use crate::solver::{TspSolution, TspSolver};

/// MST approximation solver.
///
/// Deterministic: no parameters, no randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct MstApproximation;

impl MstApproximation {
    /// Create a new MST approximation solver
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Produce an approximate tour.
    ///
    /// # Errors
    ///
    /// Returns `Disconnected` if the matrix has no spanning tree under the
    /// zero-entries-are-missing-edges convention, or `UnmatchedOddVertex`
    /// if the odd-degree pairing invariant breaks.
    pub fn approximate(&self, matrix: &DistanceMatrix) -> TspResult<Vec<usize>> {
        let parent = Self::build_tree(matrix)?;
        let edges = Self::tree_edges(&parent);
        let odd = Self::odd_vertices(parent.len(), &edges);
        let matching = Self::greedy_matching(matrix, &odd)?;
        Ok(Self::shortcut_tour(parent.len(), &edges, &matching))
    }

    /// Prim's algorithm over the dense matrix, O(n^2).
    ///
    /// `parent[v]` is the tree parent of `v`, `None` for the root (vertex
    /// 0). A zero off-diagonal entry never relaxes a key: it counts as a
    /// missing edge.
    fn build_tree(matrix: &DistanceMatrix) -> TspResult<Vec<Option<usize>>> {
        let n = matrix.n_cities();
        let mut parent: Vec<Option<usize>> = vec![None; n];
        let mut key = vec![f64::INFINITY; n];
        let mut in_tree = vec![false; n];
        key[0] = 0.0;

        for _ in 0..n {
            let mut next: Option<usize> = None;
            for v in 0..n {
                if !in_tree[v]
                    && key[v].is_finite()
                    && next.map_or(true, |u| key[v] < key[u])
                {
                    next = Some(v);
                }
            }
            let Some(u) = next else {
                let vertex = (0..n).find(|&v| !in_tree[v]).unwrap_or(0);
                return Err(TspError::Disconnected { vertex });
            };
            in_tree[u] = true;

            for v in 0..n {
                let d = matrix.distance(u, v);
                if d != 0.0 && !in_tree[v] && d < key[v] {
                    key[v] = d;
                    parent[v] = Some(u);
                }
            }
        }

        Ok(parent)
    }

    /// Edge list `(child, parent)` of the spanning tree.
    fn tree_edges(parent: &[Option<usize>]) -> Vec<(usize, usize)> {
        parent
            .iter()
            .enumerate()
            .filter_map(|(v, p)| p.map(|p| (v, p)))
            .collect()
    }

    /// Vertices with odd degree in the tree, ascending.
    fn odd_vertices(n: usize, edges: &[(usize, usize)]) -> Vec<usize> {
        let mut degree = vec![0usize; n];
        for &(a, b) in edges {
            degree[a] += 1;
            degree[b] += 1;
        }
        (0..n).filter(|&v| degree[v] % 2 == 1).collect()
    }

    /// Pair each odd vertex with the nearest still-unmatched odd vertex
    /// after it, in index order. Nearest-available, not minimum-weight.
    fn greedy_matching(
        matrix: &DistanceMatrix,
        odd: &[usize],
    ) -> TspResult<Vec<(usize, usize)>> {
        let mut matched = vec![false; odd.len()];
        let mut pairs = Vec::with_capacity(odd.len() / 2);

        for i in 0..odd.len() {
            if matched[i] {
                continue;
            }
            let mut best: Option<(usize, f64)> = None;
            for j in (i + 1)..odd.len() {
                if matched[j] {
                    continue;
                }
                let d = matrix.distance(odd[i], odd[j]);
                if best.map_or(true, |(_, bd)| d < bd) {
                    best = Some((j, d));
                }
            }
            match best {
                Some((j, _)) => {
                    matched[i] = true;
                    matched[j] = true;
                    pairs.push((odd[i], odd[j]));
                }
                None => return Err(TspError::UnmatchedOddVertex { vertex: odd[i] }),
            }
        }

        Ok(pairs)
    }

    /// Depth-first walk of the tree-plus-matching multigraph from vertex 0,
    /// shortcutting repeat visits. Iterative: an explicit stack replaces
    /// recursion so deep trees cannot overflow the call stack. Neighbors
    /// are pushed in descending order so the lowest index is expanded
    /// first, reproducing the recursive visit order.
    fn shortcut_tour(
        n: usize,
        tree_edges: &[(usize, usize)],
        matching: &[(usize, usize)],
    ) -> Vec<usize> {
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
        for &(a, b) in tree_edges.iter().chain(matching) {
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
        for list in &mut adjacency {
            list.sort_unstable();
        }

        let mut visited = vec![false; n];
        let mut tour = Vec::with_capacity(n);
        let mut stack = vec![0];
        while let Some(u) = stack.pop() {
            if visited[u] {
                continue;
            }
            visited[u] = true;
            tour.push(u);
            for &v in adjacency[u].iter().rev() {
                if !visited[v] {
                    stack.push(v);
                }
            }
        }

        tour
    }
}

impl TspSolver for MstApproximation {
    fn solve(&mut self, matrix: &DistanceMatrix) -> TspResult<TspSolution> {
        let tour = self.approximate(matrix)?;
        let cost = matrix.tour_cost(&tour);
        Ok(TspSolution::constructed(tour, cost))
    }

    fn name(&self) -> &'static str {
        "MST Approximation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> DistanceMatrix {
        let coords = vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        DistanceMatrix::from_coords(&coords).expect("should build")
    }

    fn scenario_matrix() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 2.0, 9.0, 10.0],
            vec![2.0, 0.0, 6.0, 4.0],
            vec![9.0, 6.0, 0.0, 5.0],
            vec![10.0, 4.0, 5.0, 0.0],
        ])
        .expect("should build")
    }

    #[test]
    fn test_prim_parent_structure() {
        let parent = MstApproximation::build_tree(&scenario_matrix()).expect("connected");
        assert_eq!(parent[0], None);
        // Tree: 0-1 (2), 1-3 (4), 3-2 (5)
        assert_eq!(parent[1], Some(0));
        assert_eq!(parent[3], Some(1));
        assert_eq!(parent[2], Some(3));
    }

    #[test]
    fn test_mst_square_tour() {
        let matrix = unit_square();
        let tour = MstApproximation::new().approximate(&matrix).expect("should solve");
        assert!(matrix.validate_tour(&tour).is_ok());
        // The square shortcuts to the optimal perimeter
        assert!((matrix.tour_cost(&tour) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_mst_scenario_tour() {
        let matrix = scenario_matrix();
        let tour = MstApproximation::new().approximate(&matrix).expect("should solve");
        assert_eq!(tour, vec![0, 1, 3, 2]);
        assert!((matrix.tour_cost(&tour) - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_mst_single_city() {
        let matrix = DistanceMatrix::from_rows(vec![vec![0.0]]).expect("should build");
        let tour = MstApproximation::new().approximate(&matrix).expect("should solve");
        assert_eq!(tour, vec![0]);
    }

    #[test]
    fn test_mst_two_cities() {
        let matrix = DistanceMatrix::from_rows(vec![vec![0.0, 7.0], vec![7.0, 0.0]])
            .expect("should build");
        let mut solver = MstApproximation::new();
        let solution = solver.solve(&matrix).expect("should solve");
        assert_eq!(solution.tour, vec![0, 1]);
        assert!((solution.cost - 14.0).abs() < 1e-10);
    }

    #[test]
    fn test_mst_disconnected() {
        // Vertex 2 has no nonzero edge to anything
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 0.0],
            vec![1.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0],
        ])
        .expect("should build");
        let result = MstApproximation::new().approximate(&matrix);
        assert!(matches!(result, Err(TspError::Disconnected { vertex: 2 })));
    }

    #[test]
    fn test_odd_vertices_of_path() {
        // Path 0-1-2: endpoints odd, middle even
        let edges = vec![(1, 0), (2, 1)];
        let odd = MstApproximation::odd_vertices(3, &edges);
        assert_eq!(odd, vec![0, 2]);
    }

    #[test]
    fn test_greedy_matching_pairs_nearest() {
        let matrix = scenario_matrix();
        // Odd set {0, 1, 2, 3}: 0 pairs with 1 (d=2), then 2 with 3 (d=5)
        let pairs = MstApproximation::greedy_matching(&matrix, &[0, 1, 2, 3])
            .expect("should match");
        assert_eq!(pairs, vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn test_shortcut_visits_ascending() {
        // Star centered on 0 plus a matching edge 1-2: DFS prefers low
        // indices, so the tour is in index order
        let edges = vec![(1, 0), (2, 0), (3, 0)];
        let matching = vec![(1, 2)];
        let tour = MstApproximation::shortcut_tour(4, &edges, &matching);
        assert_eq!(tour, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_mst_solver_trait() {
        let matrix = unit_square();
        let mut solver = MstApproximation::new();
        let solution = solver.solve(&matrix).expect("should solve");
        assert_eq!(solution.tour.len(), 4);
        assert_eq!(solution.iterations, 0);
        assert_eq!(solver.name(), "MST Approximation");
    }
}
