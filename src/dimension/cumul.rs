//! Cumulative time variables with trail-based backtracking.
//!
//! # Propagation
//!
//! For every arc `i -> j` committed to a route:
//!
//! ```text
//! cumul[i] + cost(i, j) <= cumul[j] <= cumul[i] + cost(i, j) + slack_max
//! ```
//!
//! A forward pass narrows each successor from its predecessor; a backward
//! pass narrows each predecessor from its successor. On a single path the two
//! sweeps reach the fixed point, so a path is feasible iff the forward pass
//! leaves every domain non-empty.
//!
//! # Backtracking
//!
//! Every narrowing pushes the previous domain on a trail. A [`Checkpoint`]
//! records the trail height; restoring pops entries last-in first-out until
//! that height is reached, giving back exactly the prior state.

use thiserror::Error;

use super::Domain;
use crate::config::TimeDimensionConfig;
use crate::distance::TransitOracle;
use crate::error::ConfigError;
use crate::models::{IndexManager, RoutingIndex};

/// A propagation emptied the domain of `index`.
///
/// Local to the search: the move or insertion that caused it is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cumul domain of routing index {index} became empty")]
pub struct DomainWipeout {
    /// Index whose domain would have become empty.
    pub index: RoutingIndex,
}

/// Trail height to return to with [`CumulDimension::restore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Checkpoint(usize);

/// One bounded cumul variable per routing index.
///
/// # Examples
///
/// ```
/// use vrptw_engine::config::TimeDimensionConfig;
/// use vrptw_engine::dimension::{CumulDimension, Domain};
/// use vrptw_engine::distance::{TimeMatrix, TransitOracle};
/// use vrptw_engine::models::IndexManager;
///
/// let tm = TimeMatrix::from_rows(&[vec![0, 10], vec![10, 0]]).unwrap();
/// let manager = IndexManager::new(2, 1, &[0], &[0]).unwrap();
/// let oracle = TransitOracle::register(&manager, &tm).unwrap();
/// let config = TimeDimensionConfig { force_start_cumul_zero: true, ..Default::default() };
/// let mut dim = CumulDimension::new(&manager, &config).unwrap();
///
/// let start = manager.start_index(0);
/// let visit = manager.node_to_index(1).unwrap();
/// let cp = dim.checkpoint();
/// dim.propagate_arc(&oracle, start, visit).unwrap();
/// assert_eq!(dim.domain(visit), Domain::new(10, 40));
/// dim.restore(cp);
/// assert_eq!(dim.domain(visit), Domain::new(0, 50));
/// ```
#[derive(Debug, Clone)]
pub struct CumulDimension {
    slack_max: i64,
    capacity: i64,
    fix_start_to_zero: bool,
    domains: Vec<Domain>,
    trail: Vec<(RoutingIndex, Domain)>,
}

impl CumulDimension {
    /// Creates one variable per routing index, each in `[0, capacity]`.
    ///
    /// Start variables are fixed to zero when `force_start_cumul_zero` is set.
    pub fn new(manager: &IndexManager, config: &TimeDimensionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let capacity = config.vehicle_max_time;
        let mut domains = vec![Domain::new(0, capacity); manager.num_indices()];
        if config.force_start_cumul_zero {
            for vehicle in 0..manager.num_vehicles() {
                domains[manager.start_index(vehicle).0] = Domain::fixed(0);
            }
        }
        Ok(Self {
            slack_max: config.allow_wait_time,
            capacity,
            fix_start_to_zero: config.force_start_cumul_zero,
            domains,
            trail: Vec::new(),
        })
    }

    /// Maximum waiting time between consecutive stops.
    pub fn slack_max(&self) -> i64 {
        self.slack_max
    }

    /// Upper bound of every cumul variable.
    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    /// Whether start variables are pinned to zero.
    pub fn fix_start_to_zero(&self) -> bool {
        self.fix_start_to_zero
    }

    /// Current domain of `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the index space.
    pub fn domain(&self, index: RoutingIndex) -> Domain {
        self.domains[index.0]
    }

    /// All current domains, indexed by routing index.
    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// Marks the current state for a later [`restore`](Self::restore).
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.trail.len())
    }

    /// Undoes every narrowing made since `checkpoint`, newest first.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        while self.trail.len() > checkpoint.0 {
            if let Some((index, previous)) = self.trail.pop() {
                self.domains[index.0] = previous;
            }
        }
    }

    /// Number of narrowings currently on the trail.
    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// Intersects the domain of `index` with `[min, max]`.
    ///
    /// On failure the domain is left untouched; earlier narrowings made by the
    /// caller stay on the trail until it restores its checkpoint.
    pub fn narrow(&mut self, index: RoutingIndex, min: i64, max: i64) -> Result<(), DomainWipeout> {
        let current = self.domains[index.0];
        let narrowed = current
            .intersect(Domain::new(min, max))
            .ok_or(DomainWipeout { index })?;
        if narrowed != current {
            self.trail.push((index, current));
            self.domains[index.0] = narrowed;
        }
        Ok(())
    }

    /// Narrows `to` from `from` across the arc `from -> to`.
    pub fn propagate_arc(
        &mut self,
        oracle: &TransitOracle,
        from: RoutingIndex,
        to: RoutingIndex,
    ) -> Result<(), DomainWipeout> {
        let transit = oracle.cost(from, to);
        let source = self.domains[from.0];
        self.narrow(
            to,
            source.min.saturating_add(transit),
            source
                .max
                .saturating_add(transit)
                .saturating_add(self.slack_max),
        )
    }

    /// Narrows `from` from `to` across the arc `from -> to`.
    pub fn propagate_arc_backward(
        &mut self,
        oracle: &TransitOracle,
        from: RoutingIndex,
        to: RoutingIndex,
    ) -> Result<(), DomainWipeout> {
        let transit = oracle.cost(from, to);
        let target = self.domains[to.0];
        self.narrow(
            from,
            target
                .min
                .saturating_sub(transit)
                .saturating_sub(self.slack_max),
            target.max.saturating_sub(transit),
        )
    }

    /// Propagates every arc of `path` forward, then backward.
    ///
    /// After success the domains along the path are at their fixed point.
    pub fn propagate_path(
        &mut self,
        oracle: &TransitOracle,
        path: &[RoutingIndex],
    ) -> Result<(), DomainWipeout> {
        for arc in path.windows(2) {
            self.propagate_arc(oracle, arc[0], arc[1])?;
        }
        for arc in path.windows(2).rev() {
            self.propagate_arc_backward(oracle, arc[0], arc[1])?;
        }
        Ok(())
    }

    /// Returns `true` if `path` admits consistent cumul values.
    ///
    /// The dimension is left exactly as it was.
    pub fn path_is_feasible(&mut self, oracle: &TransitOracle, path: &[RoutingIndex]) -> bool {
        let checkpoint = self.checkpoint();
        let feasible = path
            .windows(2)
            .all(|arc| self.propagate_arc(oracle, arc[0], arc[1]).is_ok());
        self.restore(checkpoint);
        feasible
    }
}
