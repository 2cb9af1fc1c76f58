//! Input record handed over by the data-supply side.

use serde::{Deserialize, Serialize};

use super::{TimeWindow, Vehicle};
use crate::error::ConfigError;

/// Raw model data: travel times, windows, and the fleet layout.
///
/// The engine validates this record when a [`RoutingModel`] is built and
/// otherwise treats it as opaque.
///
/// [`RoutingModel`]: crate::solver::RoutingModel
///
/// # Examples
///
/// ```
/// use vrptw_engine::models::ProblemData;
///
/// let data = ProblemData {
///     time_matrix: vec![vec![0, 4], vec![4, 0]],
///     time_windows: vec![(0, 50), (0, 50)],
///     num_vehicles: 1,
///     starts: vec![0],
///     ends: vec![0],
/// };
/// assert_eq!(data.num_nodes(), 2);
/// assert_eq!(data.vehicles()[0].end(), 0);
/// assert!(data.windows().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemData {
    /// `N×N` travel times, `time_matrix[i][j]` from node `i` to node `j`.
    pub time_matrix: Vec<Vec<i64>>,
    /// One `(earliest, latest)` pair per node.
    pub time_windows: Vec<(i64, i64)>,
    /// Fleet size.
    pub num_vehicles: usize,
    /// Start node of each vehicle.
    pub starts: Vec<usize>,
    /// End node of each vehicle.
    pub ends: Vec<usize>,
}

impl ProblemData {
    /// Number of nodes (rows of the time matrix).
    pub fn num_nodes(&self) -> usize {
        self.time_matrix.len()
    }

    /// Vehicles described by `starts`/`ends`.
    ///
    /// Vehicles without a complete endpoint pair are omitted; the index
    /// manager reports the mismatch.
    pub fn vehicles(&self) -> Vec<Vehicle> {
        self.starts
            .iter()
            .zip(&self.ends)
            .take(self.num_vehicles)
            .enumerate()
            .map(|(id, (&start, &end))| Vehicle::new(id, start, end))
            .collect()
    }

    /// Validated time windows, one per node.
    pub fn windows(&self) -> Result<Vec<TimeWindow>, ConfigError> {
        if self.time_windows.len() != self.num_nodes() {
            return Err(ConfigError::WindowCount {
                expected: self.num_nodes(),
                found: self.time_windows.len(),
            });
        }
        self.time_windows
            .iter()
            .enumerate()
            .map(|(node, &(earliest, latest))| {
                TimeWindow::new(earliest, latest).ok_or(ConfigError::InvertedWindow {
                    node,
                    earliest,
                    latest,
                })
            })
            .collect()
    }
}
