//! Solution and read-only solution access.

use serde::{Deserialize, Serialize};

use super::{Route, RoutingIndex};
use crate::error::RoutingError;

/// A completed assignment: one route per vehicle plus the cumul bounds of
/// every routing index.
///
/// # Examples
///
/// ```
/// use vrptw_engine::models::{Route, Solution};
///
/// let sol = Solution::new(vec![Route::new(0)], vec![(0, 50), (0, 50)], 0);
/// assert_eq!(sol.num_routes(), 1);
/// assert_eq!(sol.objective(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    routes: Vec<Route>,
    cumul_bounds: Vec<(i64, i64)>,
    objective: i64,
}

impl Solution {
    /// Assembles a solution.
    pub fn new(routes: Vec<Route>, cumul_bounds: Vec<(i64, i64)>, objective: i64) -> Self {
        Self {
            routes,
            cumul_bounds,
            objective,
        }
    }

    /// Routes, indexed by vehicle.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of routes (one per vehicle, empty ones included).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Objective value.
    pub fn objective(&self) -> i64 {
        self.objective
    }

    /// Sum of travel times over all routes.
    pub fn total_transit_time(&self) -> i64 {
        self.routes.iter().map(|r| r.transit_time()).sum()
    }

    /// Number of locations served (depots excluded).
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.visited_nodes().len()).sum()
    }

    /// Cumul bounds indexed by routing index.
    pub fn cumul_bounds(&self) -> &[(i64, i64)] {
        &self.cumul_bounds
    }
}

/// Read-only view handed to reporting and visualization collaborators.
///
/// Obtained from [`RoutingModel::reader`](crate::solver::RoutingModel::reader),
/// which fails with [`RoutingError::NoSolutionAvailable`] before a solve.
#[derive(Debug, Clone, Copy)]
pub struct SolutionReader<'a> {
    solution: &'a Solution,
}

impl<'a> SolutionReader<'a> {
    /// Wraps a completed solution.
    pub fn new(solution: &'a Solution) -> Self {
        Self { solution }
    }

    /// Node sequence driven by `vehicle`, depots included.
    pub fn route_of(&self, vehicle: usize) -> Result<Vec<usize>, RoutingError> {
        self.solution
            .routes
            .get(vehicle)
            .map(Route::nodes)
            .ok_or(RoutingError::VehicleOutOfRange {
                vehicle,
                num_vehicles: self.solution.routes.len(),
            })
    }

    /// Propagated `(min, max)` of the cumulative time at `index`.
    pub fn cumulative_bounds(&self, index: RoutingIndex) -> Result<(i64, i64), RoutingError> {
        self.solution
            .cumul_bounds
            .get(index.0)
            .copied()
            .ok_or(RoutingError::IndexOutOfRange {
                index: index.0,
                num_indices: self.solution.cumul_bounds.len(),
            })
    }

    /// Objective value of the solution.
    pub fn objective(&self) -> i64 {
        self.solution.objective
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.solution.routes.len()
    }

    /// Full route, stops carrying their cumul bounds.
    pub fn route(&self, vehicle: usize) -> Option<&'a Route> {
        self.solution.routes.get(vehicle)
    }

    /// Underlying solution.
    pub fn solution(&self) -> &'a Solution {
        self.solution
    }
}
