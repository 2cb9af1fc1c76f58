//! Cheapest-arc path extension.
//!
//! # Algorithm
//!
//! Every vehicle keeps a partial path from its start. At each step all
//! (vehicle, unrouted node) pairs are ranked by the cost of the arc from the
//! vehicle's current tail to the node. The cheapest pair whose arc keeps the
//! cumul domains non-empty, and from which the vehicle's end is still
//! reachable, is committed. Committed arcs stay propagated on the dimension
//! trail, so each check only propagates the new arc.
//!
//! # Complexity
//!
//! O(n² V log(nV)) where n = visits, V = vehicles.

use log::{debug, warn};

use crate::dimension::CumulDimension;
use crate::distance::TransitOracle;
use crate::error::RoutingError;
use crate::evaluation::{Plan, RouteEvaluator};
use crate::models::{IndexManager, RoutingIndex};

/// Builds a first solution by repeatedly appending the cheapest feasible arc.
///
/// Returns [`RoutingError::NoFeasibleSolution`] if some nodes cannot be
/// appended to any route. The dimension is restored before returning.
///
/// # Examples
///
/// ```
/// use vrptw_engine::config::{Objective, TimeDimensionConfig};
/// use vrptw_engine::constructive::cheapest_arc;
/// use vrptw_engine::dimension::CumulDimension;
/// use vrptw_engine::distance::{TimeMatrix, TransitOracle};
/// use vrptw_engine::evaluation::RouteEvaluator;
/// use vrptw_engine::models::IndexManager;
///
/// let tm = TimeMatrix::from_rows(&[vec![0, 1, 2], vec![1, 0, 1], vec![2, 1, 0]]).unwrap();
/// let manager = IndexManager::new(3, 1, &[0], &[0]).unwrap();
/// let oracle = TransitOracle::register(&manager, &tm).unwrap();
/// let mut dim = CumulDimension::new(&manager, &TimeDimensionConfig::default()).unwrap();
/// let mut eval = RouteEvaluator::new(&oracle, &mut dim, Objective::TotalTransit);
///
/// let plan = cheapest_arc(&manager, &mut eval).unwrap();
/// assert_eq!(plan.num_visits(), 2);
/// assert_eq!(eval.plan_objective(&plan), 4);
/// ```
pub fn cheapest_arc(
    manager: &IndexManager,
    eval: &mut RouteEvaluator<'_>,
) -> Result<Plan, RoutingError> {
    let oracle = eval.oracle();
    let dim = eval.dimension_mut();
    let base = dim.checkpoint();

    let num_vehicles = manager.num_vehicles();
    let mut paths: Vec<Vec<RoutingIndex>> = (0..num_vehicles)
        .map(|v| vec![manager.start_index(v)])
        .collect();
    let mut unrouted: Vec<RoutingIndex> = manager.visit_indices().collect();

    while !unrouted.is_empty() {
        let mut candidates: Vec<(i64, usize, usize)> = Vec::with_capacity(num_vehicles * unrouted.len());
        for (vehicle, path) in paths.iter().enumerate() {
            let tail = path[path.len() - 1];
            for (k, &node) in unrouted.iter().enumerate() {
                candidates.push((oracle.cost(tail, node), vehicle, k));
            }
        }
        candidates.sort_unstable();

        let chosen = candidates.into_iter().find(|&(_, vehicle, k)| {
            let tail = paths[vehicle][paths[vehicle].len() - 1];
            try_append(dim, oracle, tail, unrouted[k], manager.end_index(vehicle))
        });

        match chosen {
            Some((cost, vehicle, k)) => {
                let node = unrouted.remove(k);
                debug!("cheapest arc: vehicle {vehicle} -> index {node} (cost {cost})");
                paths[vehicle].push(node);
            }
            None => {
                warn!(
                    "cheapest arc stopped with {} unrouted node(s)",
                    unrouted.len()
                );
                dim.restore(base);
                return Err(RoutingError::NoFeasibleSolution {
                    unrouted: unrouted.len(),
                });
            }
        }
    }

    dim.restore(base);
    for (vehicle, path) in paths.iter_mut().enumerate() {
        path.push(manager.end_index(vehicle));
    }
    Ok(Plan::from_paths(paths))
}

/// Commits `tail -> node` if it is feasible and `node -> end` stays feasible.
///
/// On failure the dimension is left unchanged.
fn try_append(
    dim: &mut CumulDimension,
    oracle: &TransitOracle,
    tail: RoutingIndex,
    node: RoutingIndex,
    end: RoutingIndex,
) -> bool {
    let checkpoint = dim.checkpoint();
    if dim.propagate_arc(oracle, tail, node).is_ok() {
        let probe = dim.checkpoint();
        let closable = dim.propagate_arc(oracle, node, end).is_ok();
        dim.restore(probe);
        if closable {
            return true;
        }
    }
    dim.restore(checkpoint);
    false
}
