//! Dense travel-time matrix.

use crate::error::ConfigError;

/// A dense n×n travel-time matrix stored in row-major order.
///
/// Entries are non-negative integers; asymmetric matrices are allowed and
/// no triangle inequality is assumed.
///
/// # Examples
///
/// ```
/// use vrptw_engine::distance::TimeMatrix;
///
/// let tm = TimeMatrix::from_rows(&[vec![0, 6, 9], vec![6, 0, 7], vec![9, 7, 0]]).unwrap();
/// assert_eq!(tm.get(0, 2), 9);
/// assert_eq!(tm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeMatrix {
    data: Vec<i64>,
    size: usize,
}

impl TimeMatrix {
    /// Builds a matrix from nested rows.
    ///
    /// Fails if any row length differs from the number of rows or if any
    /// entry is negative.
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self, ConfigError> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (from, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(ConfigError::NonSquareMatrix {
                    row: from,
                    len: row.len(),
                    expected: size,
                });
            }
            if let Some(to) = row.iter().position(|&v| v < 0) {
                return Err(ConfigError::NegativeTransit {
                    from,
                    to,
                    value: row[to],
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, size })
    }

    /// Returns the travel time from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.size + to]
    }

    /// Number of nodes in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }
}
