//! Working representation of routes during search.

use crate::models::{IndexManager, RoutingIndex};

/// One routing-index path per vehicle, start and end included.
///
/// This is the `next` relation in list form: `path[k + 1]` is the successor
/// of `path[k]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    paths: Vec<Vec<RoutingIndex>>,
}

impl Plan {
    /// Every vehicle goes straight from its start to its end.
    pub fn empty(manager: &IndexManager) -> Self {
        let paths = (0..manager.num_vehicles())
            .map(|v| vec![manager.start_index(v), manager.end_index(v)])
            .collect();
        Self { paths }
    }

    /// Wraps explicit paths.
    pub fn from_paths(paths: Vec<Vec<RoutingIndex>>) -> Self {
        Self { paths }
    }

    /// All paths, indexed by vehicle.
    pub fn paths(&self) -> &[Vec<RoutingIndex>] {
        &self.paths
    }

    /// Path of one vehicle.
    pub fn path(&self, vehicle: usize) -> &[RoutingIndex] {
        &self.paths[vehicle]
    }

    /// Replaces the path of one vehicle.
    pub fn set_path(&mut self, vehicle: usize, path: Vec<RoutingIndex>) {
        self.paths[vehicle] = path;
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.paths.len()
    }

    /// Visits of one vehicle, depots excluded.
    pub fn visits(&self, vehicle: usize) -> &[RoutingIndex] {
        let path = &self.paths[vehicle];
        &path[1..path.len() - 1]
    }

    /// Total number of visits across all vehicles.
    pub fn num_visits(&self) -> usize {
        self.paths.iter().map(|p| p.len() - 2).sum()
    }

    /// Every arc in use, vehicle by vehicle.
    pub fn arcs(&self) -> impl Iterator<Item = (RoutingIndex, RoutingIndex)> + '_ {
        self.paths
            .iter()
            .flat_map(|p| p.windows(2).map(|w| (w[0], w[1])))
    }
}
