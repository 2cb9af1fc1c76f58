//! Cheapest-insertion heuristics.
//!
//! # Algorithm
//!
//! All vehicles start with the empty path `start -> end`. Inserting node `u`
//! between `p` and `q` changes the transit time by
//!
//! ```text
//! delta = c(p, u) + c(u, q) - c(p, q)
//! ```
//!
//! - *Parallel*: each step scans every (vehicle, position, unrouted node)
//!   triple and commits the feasible one with the smallest delta.
//! - *Local*: nodes are taken in index order, each inserted at its own
//!   cheapest feasible position.
//!
//! Feasibility is checked by propagating the candidate path through the
//! cumul dimension; only candidates that beat the incumbent delta are checked.
//!
//! # Complexity
//!
//! Parallel: O(n³ V L) where L = route length. Local: O(n V L²).

use log::{debug, warn};

use crate::distance::TransitOracle;
use crate::error::RoutingError;
use crate::evaluation::{Plan, RouteEvaluator};
use crate::models::{IndexManager, RoutingIndex};

/// Transit delta of inserting `node` before `path[pos]`.
pub(crate) fn insertion_delta(
    oracle: &TransitOracle,
    path: &[RoutingIndex],
    pos: usize,
    node: RoutingIndex,
) -> i64 {
    let prev = path[pos - 1];
    let next = path[pos];
    oracle.cost(prev, node) + oracle.cost(node, next) - oracle.cost(prev, next)
}

/// Copy of `path` with `node` inserted before `path[pos]`.
pub(crate) fn with_inserted(path: &[RoutingIndex], pos: usize, node: RoutingIndex) -> Vec<RoutingIndex> {
    let mut out = Vec::with_capacity(path.len() + 1);
    out.extend_from_slice(&path[..pos]);
    out.push(node);
    out.extend_from_slice(&path[pos..]);
    out
}

/// A feasible insertion found by the scan.
#[derive(Debug, Clone, Copy)]
struct Insertion {
    delta: i64,
    vehicle: usize,
    pos: usize,
}

/// Cheapest feasible insertion of `node` over all vehicles and positions.
fn best_insertion(
    plan: &Plan,
    node: RoutingIndex,
    eval: &mut RouteEvaluator<'_>,
    incumbent: Option<i64>,
) -> Option<Insertion> {
    let oracle = eval.oracle();
    let mut best: Option<Insertion> = None;
    for vehicle in 0..plan.num_vehicles() {
        let path = plan.path(vehicle);
        for pos in 1..path.len() {
            let delta = insertion_delta(oracle, path, pos, node);
            let bound = best.map(|b| b.delta).or(incumbent);
            if bound.is_some_and(|b| delta >= b) {
                continue;
            }
            if eval.is_feasible(&with_inserted(path, pos, node)) {
                best = Some(Insertion {
                    delta,
                    vehicle,
                    pos,
                });
            }
        }
    }
    best
}

/// Builds a first solution by parallel cheapest insertion.
///
/// Returns [`RoutingError::NoFeasibleSolution`] once no unrouted node has a
/// feasible insertion left.
///
/// # Examples
///
/// ```
/// use vrptw_engine::config::{Objective, TimeDimensionConfig};
/// use vrptw_engine::constructive::parallel_cheapest_insertion;
/// use vrptw_engine::dimension::CumulDimension;
/// use vrptw_engine::distance::{TimeMatrix, TransitOracle};
/// use vrptw_engine::evaluation::RouteEvaluator;
/// use vrptw_engine::models::IndexManager;
///
/// let tm = TimeMatrix::from_rows(&[
///     vec![0, 2, 9, 9],
///     vec![2, 0, 9, 9],
///     vec![9, 9, 0, 2],
///     vec![9, 9, 2, 0],
/// ]).unwrap();
/// // Vehicle 0 lives at node 0, vehicle 1 at node 3.
/// let manager = IndexManager::new(4, 2, &[0, 3], &[0, 3]).unwrap();
/// let oracle = TransitOracle::register(&manager, &tm).unwrap();
/// let mut dim = CumulDimension::new(&manager, &TimeDimensionConfig::default()).unwrap();
/// let mut eval = RouteEvaluator::new(&oracle, &mut dim, Objective::TotalTransit);
///
/// let plan = parallel_cheapest_insertion(&manager, &mut eval).unwrap();
/// assert_eq!(plan.visits(0), &[manager.node_to_index(1).unwrap()]);
/// assert_eq!(plan.visits(1), &[manager.node_to_index(2).unwrap()]);
/// ```
pub fn parallel_cheapest_insertion(
    manager: &IndexManager,
    eval: &mut RouteEvaluator<'_>,
) -> Result<Plan, RoutingError> {
    let mut plan = Plan::empty(manager);
    let mut unrouted: Vec<RoutingIndex> = manager.visit_indices().collect();

    while !unrouted.is_empty() {
        let mut chosen: Option<(usize, Insertion)> = None;
        for (k, &node) in unrouted.iter().enumerate() {
            let incumbent = chosen.map(|(_, ins)| ins.delta);
            if let Some(ins) = best_insertion(&plan, node, eval, incumbent) {
                chosen = Some((k, ins));
            }
        }

        let Some((k, ins)) = chosen else {
            warn!(
                "parallel cheapest insertion stopped with {} unrouted node(s)",
                unrouted.len()
            );
            return Err(RoutingError::NoFeasibleSolution {
                unrouted: unrouted.len(),
            });
        };
        let node = unrouted.remove(k);
        debug!(
            "parallel insertion: index {node} into vehicle {} at {} (delta {})",
            ins.vehicle, ins.pos, ins.delta
        );
        let path = with_inserted(plan.path(ins.vehicle), ins.pos, node);
        plan.set_path(ins.vehicle, path);
    }

    Ok(plan)
}

/// Builds a first solution by inserting nodes one at a time, in index order.
///
/// Stops with [`RoutingError::NoFeasibleSolution`] at the first node that has
/// no feasible position.
pub fn local_cheapest_insertion(
    manager: &IndexManager,
    eval: &mut RouteEvaluator<'_>,
) -> Result<Plan, RoutingError> {
    let mut plan = Plan::empty(manager);
    let visits: Vec<RoutingIndex> = manager.visit_indices().collect();

    for (k, &node) in visits.iter().enumerate() {
        let Some(ins) = best_insertion(&plan, node, eval, None) else {
            warn!("local cheapest insertion found no position for index {node}");
            return Err(RoutingError::NoFeasibleSolution {
                unrouted: visits.len() - k,
            });
        };
        let path = with_inserted(plan.path(ins.vehicle), ins.pos, node);
        plan.set_path(ins.vehicle, path);
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Objective, TimeDimensionConfig};
    use crate::dimension::CumulDimension;
    use crate::distance::TimeMatrix;

    fn reference_matrix() -> TimeMatrix {
        TimeMatrix::from_rows(&[
            vec![0, 6, 9, 5, 8],
            vec![6, 0, 7, 3, 2],
            vec![9, 7, 0, 4, 8],
            vec![5, 3, 4, 0, 3],
            vec![8, 2, 8, 3, 0],
        ])
        .expect("valid")
    }

    fn setup(num_vehicles: usize) -> (IndexManager, TransitOracle, CumulDimension) {
        let starts = vec![0; num_vehicles];
        let m = IndexManager::new(5, num_vehicles, &starts, &starts).expect("valid");
        let o = TransitOracle::register(&m, &reference_matrix()).expect("valid");
        let dim = CumulDimension::new(&m, &TimeDimensionConfig::default()).expect("valid");
        (m, o, dim)
    }

    #[test]
    fn test_insertion_delta() {
        let (m, o, _) = setup(1);
        let three = m.node_to_index(3).expect("visitable");
        let one = m.node_to_index(1).expect("visitable");
        let path = vec![m.start_index(0), three, m.end_index(0)];
        // 0 -> 1 -> 3 replaces 0 -> 3: 6 + 3 - 5
        assert_eq!(insertion_delta(&o, &path, 1, one), 4);
        assert_eq!(
            with_inserted(&path, 1, one),
            vec![m.start_index(0), one, three, m.end_index(0)]
        );
    }

    #[test]
    fn test_parallel_covers_all_nodes() {
        let (m, o, mut dim) = setup(2);
        let mut eval = RouteEvaluator::new(&o, &mut dim, Objective::TotalTransit);
        let plan = parallel_cheapest_insertion(&m, &mut eval).expect("feasible");
        assert_eq!(plan.num_visits(), 4);
        let mut seen: Vec<RoutingIndex> = (0..2).flat_map(|v| plan.visits(v).to_vec()).collect();
        seen.sort();
        assert_eq!(seen, m.visit_indices().collect::<Vec<_>>());
        assert!(eval.plan_is_feasible(&plan));
    }

    #[test]
    fn test_parallel_first_insertion_is_cheapest_round_trip() {
        let (m, o, mut dim) = setup(1);
        let mut eval = RouteEvaluator::new(&o, &mut dim, Objective::TotalTransit);
        let plan = parallel_cheapest_insertion(&m, &mut eval).expect("feasible");
        // Round trips are 12, 18, 10, 16; total of the final route stays small.
        assert!(eval.plan_objective(&plan) <= 30);
    }

    #[test]
    fn test_local_insertion_feasible() {
        let (m, o, mut dim) = setup(1);
        let mut eval = RouteEvaluator::new(&o, &mut dim, Objective::TotalTransit);
        let plan = local_cheapest_insertion(&m, &mut eval).expect("feasible");
        assert_eq!(plan.num_visits(), 4);
        assert!(eval.plan_is_feasible(&plan));
    }

    #[test]
    fn test_insertion_reports_infeasible() {
        let (m, o, mut dim) = setup(1);
        dim.apply_window(&m, 2, 0, 8).expect("installable");
        let mut eval = RouteEvaluator::new(&o, &mut dim, Objective::TotalTransit);
        assert_eq!(
            parallel_cheapest_insertion(&m, &mut eval),
            Err(RoutingError::NoFeasibleSolution { unrouted: 1 })
        );
        assert_eq!(
            local_cheapest_insertion(&m, &mut eval),
            Err(RoutingError::NoFeasibleSolution { unrouted: 3 })
        );
    }
}
