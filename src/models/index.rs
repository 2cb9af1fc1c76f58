//! Mapping between physical nodes and routing variable indices.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A slot in the routing variable space.
///
/// Every visitable node owns exactly one index. Each vehicle additionally owns
/// a private start index and a private end index, so two vehicles sharing a
/// physical depot never share a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoutingIndex(pub usize);

impl RoutingIndex {
    /// Raw position in the index space.
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for RoutingIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bidirectional table between nodes and routing indices.
///
/// Layout: visitable nodes first (in node order), then one start index per
/// vehicle, then one end index per vehicle.
///
/// # Examples
///
/// ```
/// use vrptw_engine::models::{IndexManager, RoutingIndex};
///
/// // 4 nodes, 2 vehicles sharing depot 0, the second one ending at node 3.
/// let manager = IndexManager::new(4, 2, &[0, 0], &[0, 3]).unwrap();
/// assert_eq!(manager.num_indices(), 2 + 2 * 2);
/// assert_eq!(manager.node_of(manager.start_index(1)), 0);
/// assert_eq!(manager.node_of(manager.end_index(1)), 3);
/// assert!(manager.is_end(manager.end_index(0)));
/// assert_eq!(manager.node_to_index(1), Some(RoutingIndex(0)));
/// assert_eq!(manager.node_to_index(0), None);
/// ```
#[derive(Debug, Clone)]
pub struct IndexManager {
    num_nodes: usize,
    num_vehicles: usize,
    index_to_node: Vec<usize>,
    node_to_index: Vec<Option<RoutingIndex>>,
    depot: Vec<bool>,
    num_visits: usize,
}

impl IndexManager {
    /// Builds the index tables.
    ///
    /// Fails if `num_vehicles` is zero, if `starts`/`ends` do not have one
    /// entry per vehicle, or if any endpoint lies outside `[0, num_nodes)`.
    pub fn new(
        num_nodes: usize,
        num_vehicles: usize,
        starts: &[usize],
        ends: &[usize],
    ) -> Result<Self, ConfigError> {
        if num_vehicles == 0 {
            return Err(ConfigError::NoVehicles);
        }
        if num_nodes == 0 {
            return Err(ConfigError::NoNodes);
        }
        if starts.len() != num_vehicles || ends.len() != num_vehicles {
            return Err(ConfigError::EndpointCount {
                vehicles: num_vehicles,
                starts: starts.len(),
                ends: ends.len(),
            });
        }
        for (vehicle, &node) in starts.iter().chain(ends).enumerate() {
            if node >= num_nodes {
                return Err(ConfigError::NodeOutOfRange {
                    vehicle: vehicle % num_vehicles,
                    node,
                    num_nodes,
                });
            }
        }

        let mut depot = vec![false; num_nodes];
        for &node in starts.iter().chain(ends) {
            depot[node] = true;
        }

        let mut index_to_node = Vec::with_capacity(num_nodes + 2 * num_vehicles);
        let mut node_to_index = vec![None; num_nodes];
        for node in (0..num_nodes).filter(|&n| !depot[n]) {
            node_to_index[node] = Some(RoutingIndex(index_to_node.len()));
            index_to_node.push(node);
        }
        let num_visits = index_to_node.len();
        index_to_node.extend_from_slice(starts);
        index_to_node.extend_from_slice(ends);

        Ok(Self {
            num_nodes,
            num_vehicles,
            index_to_node,
            node_to_index,
            depot,
            num_visits,
        })
    }

    /// Number of physical nodes.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    /// Size of the routing index space.
    pub fn num_indices(&self) -> usize {
        self.index_to_node.len()
    }

    /// Number of visitable (non-depot) indices.
    pub fn num_visits(&self) -> usize {
        self.num_visits
    }

    /// Physical node addressed by a routing index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the index space.
    pub fn node_of(&self, index: RoutingIndex) -> usize {
        self.index_to_node[index.0]
    }

    /// Routing index of a visitable node, `None` for depots.
    pub fn node_to_index(&self, node: usize) -> Option<RoutingIndex> {
        self.node_to_index.get(node).copied().flatten()
    }

    /// Start index of a vehicle.
    ///
    /// # Panics
    ///
    /// Panics if `vehicle >= num_vehicles()`.
    pub fn start_index(&self, vehicle: usize) -> RoutingIndex {
        assert!(
            vehicle < self.num_vehicles,
            "vehicle {vehicle} out of range, {} vehicles",
            self.num_vehicles
        );
        RoutingIndex(self.num_visits + vehicle)
    }

    /// End index of a vehicle.
    ///
    /// # Panics
    ///
    /// Panics if `vehicle >= num_vehicles()`.
    pub fn end_index(&self, vehicle: usize) -> RoutingIndex {
        assert!(
            vehicle < self.num_vehicles,
            "vehicle {vehicle} out of range, {} vehicles",
            self.num_vehicles
        );
        RoutingIndex(self.num_visits + self.num_vehicles + vehicle)
    }

    /// Returns `true` if `index` is some vehicle's start.
    pub fn is_start(&self, index: RoutingIndex) -> bool {
        (self.num_visits..self.num_visits + self.num_vehicles).contains(&index.0)
    }

    /// Returns `true` if `index` is some vehicle's end.
    pub fn is_end(&self, index: RoutingIndex) -> bool {
        index.0 >= self.num_visits + self.num_vehicles
    }

    /// Vehicle owning a start or end index.
    pub fn vehicle_of(&self, index: RoutingIndex) -> Option<usize> {
        if self.is_start(index) {
            Some(index.0 - self.num_visits)
        } else if self.is_end(index) && index.0 < self.num_indices() {
            Some(index.0 - self.num_visits - self.num_vehicles)
        } else {
            None
        }
    }

    /// Returns `true` if `node` is used as a start or end by any vehicle.
    pub fn is_depot(&self, node: usize) -> bool {
        self.depot.get(node).copied().unwrap_or(false)
    }

    /// Routing indices of all visitable nodes, in node order.
    pub fn visit_indices(&self) -> impl Iterator<Item = RoutingIndex> {
        (0..self.num_visits).map(RoutingIndex)
    }
}
