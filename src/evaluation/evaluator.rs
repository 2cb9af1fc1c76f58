//! Route evaluator that computes transit cost, cumul feasibility, and the
//! objective.

use crate::config::Objective;
use crate::dimension::{CumulDimension, DomainWipeout};
use crate::distance::TransitOracle;
use crate::evaluation::Plan;
use crate::models::{IndexManager, Route, RoutingIndex, Solution, Stop};

impl Objective {
    /// Combines per-route transit times into the objective value.
    pub fn aggregate(self, route_costs: impl IntoIterator<Item = i64>) -> i64 {
        match self {
            Objective::TotalTransit => route_costs.into_iter().sum(),
            Objective::MaxRouteTransit => route_costs.into_iter().max().unwrap_or(0),
        }
    }
}

/// Evaluates paths against the transit oracle and the cumul dimension.
///
/// Feasibility checks always leave the dimension in the state they found it.
///
/// # Examples
///
/// ```
/// use vrptw_engine::config::{Objective, TimeDimensionConfig};
/// use vrptw_engine::dimension::CumulDimension;
/// use vrptw_engine::distance::{TimeMatrix, TransitOracle};
/// use vrptw_engine::evaluation::RouteEvaluator;
/// use vrptw_engine::models::IndexManager;
///
/// let tm = TimeMatrix::from_rows(&[vec![0, 3, 4], vec![3, 0, 5], vec![4, 5, 0]]).unwrap();
/// let manager = IndexManager::new(3, 1, &[0], &[0]).unwrap();
/// let oracle = TransitOracle::register(&manager, &tm).unwrap();
/// let mut dim = CumulDimension::new(&manager, &TimeDimensionConfig::default()).unwrap();
///
/// let mut eval = RouteEvaluator::new(&oracle, &mut dim, Objective::TotalTransit);
/// let path = [
///     manager.start_index(0),
///     manager.node_to_index(1).unwrap(),
///     manager.node_to_index(2).unwrap(),
///     manager.end_index(0),
/// ];
/// assert_eq!(eval.path_cost(&path), 12);
/// assert!(eval.is_feasible(&path));
/// ```
pub struct RouteEvaluator<'a> {
    oracle: &'a TransitOracle,
    dimension: &'a mut CumulDimension,
    objective: Objective,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator.
    pub fn new(
        oracle: &'a TransitOracle,
        dimension: &'a mut CumulDimension,
        objective: Objective,
    ) -> Self {
        Self {
            oracle,
            dimension,
            objective,
        }
    }

    /// Transit oracle in use.
    pub fn oracle(&self) -> &'a TransitOracle {
        self.oracle
    }

    /// Objective in use.
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Mutable access to the dimension, for incremental construction.
    pub fn dimension_mut(&mut self) -> &mut CumulDimension {
        &mut *self.dimension
    }

    /// Sum of arc costs along `path`.
    pub fn path_cost(&self, path: &[RoutingIndex]) -> i64 {
        self.oracle.path_cost(path)
    }

    /// Returns `true` if `path` satisfies every cumul constraint.
    pub fn is_feasible(&mut self, path: &[RoutingIndex]) -> bool {
        self.dimension.path_is_feasible(self.oracle, path)
    }

    /// Objective value of a whole plan.
    pub fn plan_objective(&self, plan: &Plan) -> i64 {
        self.objective
            .aggregate(plan.paths().iter().map(|p| self.path_cost(p)))
    }

    /// Returns `true` if every path of `plan` is feasible.
    pub fn plan_is_feasible(&mut self, plan: &Plan) -> bool {
        let oracle = self.oracle;
        plan.paths()
            .iter()
            .all(|p| self.dimension.path_is_feasible(oracle, p))
    }

    /// Freezes `plan` into a [`Solution`].
    ///
    /// Every path is propagated to its fixed point, the resulting bounds are
    /// copied out, and the dimension is restored.
    pub fn build_solution(
        &mut self,
        manager: &IndexManager,
        plan: &Plan,
    ) -> Result<Solution, DomainWipeout> {
        let checkpoint = self.dimension.checkpoint();
        let propagated = plan
            .paths()
            .iter()
            .try_for_each(|p| self.dimension.propagate_path(self.oracle, p));
        if let Err(wipeout) = propagated {
            self.dimension.restore(checkpoint);
            return Err(wipeout);
        }

        let mut routes = Vec::with_capacity(plan.num_vehicles());
        let mut costs = Vec::with_capacity(plan.num_vehicles());
        for (vehicle, path) in plan.paths().iter().enumerate() {
            let mut route = Route::new(vehicle);
            for &index in path {
                let domain = self.dimension.domain(index);
                route.push_stop(Stop {
                    node: manager.node_of(index),
                    index,
                    cumul_min: domain.min,
                    cumul_max: domain.max,
                });
            }
            let cost = self.path_cost(path);
            route.set_transit_time(cost);
            costs.push(cost);
            routes.push(route);
        }
        let bounds = self.dimension.domains().iter().map(|&d| d.into()).collect();
        self.dimension.restore(checkpoint);

        Ok(Solution::new(routes, bounds, self.objective.aggregate(costs)))
    }
}
