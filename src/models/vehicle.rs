//! Vehicle type with start and end depots.

use serde::{Deserialize, Serialize};

/// A vehicle of the fleet.
///
/// Start and end nodes may differ, which allows open routes or routes that
/// finish at another depot.
///
/// # Examples
///
/// ```
/// use vrptw_engine::models::Vehicle;
///
/// let v = Vehicle::new(1, 5, 5);
/// assert_eq!(v.id(), 1);
/// assert!(v.returns_to_start());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    id: usize,
    start: usize,
    end: usize,
}

impl Vehicle {
    /// Creates a vehicle travelling from node `start` to node `end`.
    pub fn new(id: usize, start: usize, end: usize) -> Self {
        Self { id, start, end }
    }

    /// Vehicle ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Node the route starts from.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Node the route ends at.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns `true` if the route returns to its start depot.
    pub fn returns_to_start(&self) -> bool {
        self.start == self.end
    }
}
