//! Travel-time lookup over routing indices.

use crate::distance::TimeMatrix;
use crate::error::ConfigError;
use crate::models::{IndexManager, RoutingIndex};

/// Transit cost between any two routing indices.
///
/// Each index is resolved to its node and the matrix is consulted once per
/// ordered pair at registration; later lookups read the precomputed table.
///
/// # Examples
///
/// ```
/// use vrptw_engine::distance::{TimeMatrix, TransitOracle};
/// use vrptw_engine::models::IndexManager;
///
/// let tm = TimeMatrix::from_rows(&[vec![0, 4], vec![6, 0]]).unwrap();
/// let manager = IndexManager::new(2, 1, &[0], &[0]).unwrap();
/// let oracle = TransitOracle::register(&manager, &tm).unwrap();
///
/// let visit = manager.node_to_index(1).unwrap();
/// assert_eq!(oracle.cost(manager.start_index(0), visit), 4);
/// assert_eq!(oracle.cost(visit, manager.end_index(0)), 6);
/// ```
#[derive(Debug, Clone)]
pub struct TransitOracle {
    table: Vec<i64>,
    num_indices: usize,
}

impl TransitOracle {
    /// Registers the matrix against the index model.
    ///
    /// Fails if the matrix does not cover exactly the manager's nodes.
    pub fn register(manager: &IndexManager, matrix: &TimeMatrix) -> Result<Self, ConfigError> {
        if matrix.size() != manager.num_nodes() {
            return Err(ConfigError::MatrixSize {
                expected: manager.num_nodes(),
                found: matrix.size(),
            });
        }
        let n = manager.num_indices();
        let mut table = Vec::with_capacity(n * n);
        for from in 0..n {
            let from_node = manager.node_of(RoutingIndex(from));
            for to in 0..n {
                table.push(matrix.get(from_node, manager.node_of(RoutingIndex(to))));
            }
        }
        Ok(Self {
            table,
            num_indices: n,
        })
    }

    /// Travel time from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is outside the registered index space.
    pub fn cost(&self, from: RoutingIndex, to: RoutingIndex) -> i64 {
        self.table[from.0 * self.num_indices + to.0]
    }

    /// Sum of arc costs along a path.
    pub fn path_cost(&self, path: &[RoutingIndex]) -> i64 {
        path.windows(2).map(|w| self.cost(w[0], w[1])).sum()
    }

    /// Size of the index space this oracle was registered for.
    pub fn num_indices(&self) -> usize {
        self.num_indices
    }
}
