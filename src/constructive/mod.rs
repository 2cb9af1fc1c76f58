//! Construction heuristics for the first solution.
//!
//! - [`cheapest_arc`]: extend route tails with the cheapest feasible arc
//! - [`parallel_cheapest_insertion`]: globally cheapest (vehicle, position, node) insertion
//! - [`local_cheapest_insertion`]: insert nodes in index order at their cheapest position
//!
//! Every heuristic either routes all visitable nodes or fails with
//! [`RoutingError::NoFeasibleSolution`]; depots only ever appear as path
//! endpoints.

mod cheapest_arc;
mod insertion;

pub use cheapest_arc::cheapest_arc;
pub use insertion::{local_cheapest_insertion, parallel_cheapest_insertion};
pub(crate) use insertion::with_inserted;

use crate::config::FirstSolutionStrategy;
use crate::error::RoutingError;
use crate::evaluation::{Plan, RouteEvaluator};
use crate::models::IndexManager;

/// Runs the construction heuristic selected by `strategy`.
pub fn build_first_solution(
    strategy: FirstSolutionStrategy,
    manager: &IndexManager,
    eval: &mut RouteEvaluator<'_>,
) -> Result<Plan, RoutingError> {
    match strategy {
        FirstSolutionStrategy::CheapestArc => cheapest_arc(manager, eval),
        FirstSolutionStrategy::ParallelCheapestInsertion => {
            parallel_cheapest_insertion(manager, eval)
        }
        FirstSolutionStrategy::LocalCheapestInsertion => local_cheapest_insertion(manager, eval),
    }
}
