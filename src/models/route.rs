//! Route and stop types.

use serde::{Deserialize, Serialize};

use super::RoutingIndex;

/// One stop on a finished route.
///
/// Carries the node, the routing index it was visited through, and the
/// propagated bounds of the cumulative time at that point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    /// Physical node visited.
    pub node: usize,
    /// Routing index of the visit.
    pub index: RoutingIndex,
    /// Lower bound of the cumulative time.
    pub cumul_min: i64,
    /// Upper bound of the cumulative time.
    pub cumul_max: i64,
}

/// The ordered stops of one vehicle, first = start depot, last = end depot.
///
/// # Examples
///
/// ```
/// use vrptw_engine::models::{Route, RoutingIndex, Stop};
///
/// let mut route = Route::new(0);
/// route.push_stop(Stop { node: 0, index: RoutingIndex(1), cumul_min: 0, cumul_max: 40 });
/// route.push_stop(Stop { node: 0, index: RoutingIndex(2), cumul_min: 0, cumul_max: 50 });
/// assert_eq!(route.len(), 2);
/// assert!(route.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    vehicle_id: usize,
    stops: Vec<Stop>,
    transit_time: i64,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            stops: Vec::new(),
            transit_time: 0,
        }
    }

    /// Appends a stop.
    pub fn push_stop(&mut self, stop: Stop) {
        self.stops.push(stop);
    }

    /// Returns the vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Returns the ordered stops, depots included.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Number of stops, depots included.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if the vehicle serves no location.
    pub fn is_empty(&self) -> bool {
        self.stops.len() <= 2
    }

    /// Node sequence from start to end.
    pub fn nodes(&self) -> Vec<usize> {
        self.stops.iter().map(|s| s.node).collect()
    }

    /// Nodes served between the depots.
    pub fn visited_nodes(&self) -> Vec<usize> {
        if self.stops.len() < 2 {
            return Vec::new();
        }
        self.stops[1..self.stops.len() - 1]
            .iter()
            .map(|s| s.node)
            .collect()
    }

    /// Sum of travel times along the route.
    pub fn transit_time(&self) -> i64 {
        self.transit_time
    }

    /// Sets the travel time (used when the solution is assembled).
    pub fn set_transit_time(&mut self, t: i64) {
        self.transit_time = t;
    }
}
