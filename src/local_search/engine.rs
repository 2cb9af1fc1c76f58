//! Improvement phase: first-improvement descent, optionally guided by edge
//! penalties.
//!
//! # Algorithm
//!
//! Neighbourhoods are scanned in order; the first feasible candidate that
//! lowers the acceptance cost replaces the current plan and the scan starts
//! over. When no candidate is accepted the plan is a local optimum:
//!
//! - plain descent stops there;
//! - guided local search penalizes the arcs of maximal utility and keeps
//!   descending on the augmented cost
//!
//! ```text
//! g(plan) = objective(plan) + lambda * sum(penalty(e) for e in plan)
//! lambda  = coefficient * objective(first local optimum) / arcs
//! ```
//!
//! Limits are checked after every evaluated candidate. The best plan by
//! plain objective is returned; every accepted plan is feasible.
//!
//! # Reference
//!
//! Voudouris, C. & Tsang, E. (1999). "Guided local search and its application
//! to the traveling salesman problem", *European Journal of Operational
//! Research* 113(2), 469-499.

use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use log::{debug, info, trace};

use super::exchange::CrossExchange;
use super::neighborhood::{Candidate, Neighborhood};
use super::or_opt::OrOpt;
use super::penalty::EdgePenalties;
use super::relocate::Relocate;
use super::swap::Swap;
use super::two_opt::TwoOpt;
use crate::config::{LocalSearchMetaheuristic, Objective, SearchParameters};
use crate::evaluation::{Plan, RouteEvaluator};

/// Lifecycle of a [`LocalSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Created, not run yet.
    Seeded,
    /// Running.
    Improving,
    /// Stopped at a local optimum better than the seed.
    Improved,
    /// Stopped at a local optimum no better than the seed.
    NoImprovementFound,
    /// Wall-clock budget exhausted.
    TimedOut,
    /// Candidate budget exhausted.
    IterationLimit,
}

/// Statistics of one improvement run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Terminal state.
    pub state: SearchState,
    /// Objective of the seed plan.
    pub seed_objective: i64,
    /// Objective of the returned plan.
    pub best_objective: i64,
    /// Candidates evaluated.
    pub evaluated: u64,
    /// Candidates accepted.
    pub accepted: u64,
    /// Local optima reached.
    pub local_optima: u64,
}

/// Default operator set, in scan order.
pub fn default_neighborhoods() -> Vec<Box<dyn Neighborhood>> {
    vec![
        Box::new(Relocate),
        Box::new(Swap),
        Box::new(TwoOpt),
        Box::new(OrOpt),
        Box::new(CrossExchange),
    ]
}

/// Objective after replacing the costs of the changed vehicles.
fn objective_with(objective: Objective, costs: &[i64], changed: &[(usize, i64)]) -> i64 {
    objective.aggregate(costs.iter().enumerate().map(|(v, &c)| {
        changed
            .iter()
            .find(|(cv, _)| *cv == v)
            .map_or(c, |&(_, nc)| nc)
    }))
}

/// Terminal state if a budget is spent.
fn limit_reached(
    evaluated: u64,
    max_iterations: Option<u64>,
    started: Instant,
    time_limit: Duration,
) -> Option<SearchState> {
    if max_iterations.is_some_and(|m| evaluated >= m) {
        Some(SearchState::IterationLimit)
    } else if started.elapsed() >= time_limit {
        Some(SearchState::TimedOut)
    } else {
        None
    }
}

fn augmented(objective: i64, penalty: u64, lambda: f64) -> f64 {
    objective as f64 + lambda * penalty as f64
}

/// Local search driver.
///
/// # Examples
///
/// ```
/// use vrptw_engine::config::{SearchParameters, TimeDimensionConfig};
/// use vrptw_engine::dimension::CumulDimension;
/// use vrptw_engine::distance::{TimeMatrix, TransitOracle};
/// use vrptw_engine::evaluation::{Plan, RouteEvaluator};
/// use vrptw_engine::local_search::LocalSearch;
/// use vrptw_engine::models::IndexManager;
///
/// let tm = TimeMatrix::from_rows(&[
///     vec![0, 1, 5, 5],
///     vec![1, 0, 1, 5],
///     vec![5, 1, 0, 1],
///     vec![5, 5, 1, 0],
/// ]).unwrap();
/// let manager = IndexManager::new(4, 1, &[0], &[3]).unwrap();
/// let oracle = TransitOracle::register(&manager, &tm).unwrap();
/// let mut dim = CumulDimension::new(&manager, &TimeDimensionConfig::default()).unwrap();
/// let params = SearchParameters::default();
/// let mut eval = RouteEvaluator::new(&oracle, &mut dim, params.objective);
///
/// // 0 -> 2 -> 1 -> 3 costs 11; 0 -> 1 -> 2 -> 3 costs 3.
/// let (s, e) = (manager.start_index(0), manager.end_index(0));
/// let (one, two) = (manager.node_to_index(1).unwrap(), manager.node_to_index(2).unwrap());
/// let seed = Plan::from_paths(vec![vec![s, two, one, e]]);
///
/// let (best, outcome) = LocalSearch::new(&params).run(seed, &mut eval);
/// assert_eq!(best.visits(0), &[one, two]);
/// assert_eq!(outcome.best_objective, 3);
/// ```
pub struct LocalSearch {
    neighborhoods: Vec<Box<dyn Neighborhood>>,
    metaheuristic: LocalSearchMetaheuristic,
    time_limit: Duration,
    max_iterations: Option<u64>,
    lambda_coefficient: f64,
    state: SearchState,
}

impl LocalSearch {
    /// Creates a search with the default neighbourhoods.
    pub fn new(params: &SearchParameters) -> Self {
        Self::with_neighborhoods(params, default_neighborhoods())
    }

    /// Creates a search with an explicit operator list.
    pub fn with_neighborhoods(
        params: &SearchParameters,
        neighborhoods: Vec<Box<dyn Neighborhood>>,
    ) -> Self {
        Self {
            neighborhoods,
            metaheuristic: params.local_search_metaheuristic,
            time_limit: params.time_limit(),
            max_iterations: params.max_iterations,
            lambda_coefficient: params.gls_lambda_coefficient,
            state: SearchState::Seeded,
        }
    }

    /// Current state.
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Improves `seed`, which must be feasible, and returns the best plan
    /// found with the run statistics.
    pub fn run(&mut self, seed: Plan, eval: &mut RouteEvaluator<'_>) -> (Plan, SearchOutcome) {
        let started = Instant::now();
        self.state = SearchState::Improving;

        let objective = eval.objective();
        let oracle = eval.oracle();
        let guided = self.metaheuristic == LocalSearchMetaheuristic::GuidedLocalSearch;
        let (time_limit, max_iterations) = (self.time_limit, self.max_iterations);

        let mut current = seed;
        let mut costs: Vec<i64> = current.paths().iter().map(|p| oracle.path_cost(p)).collect();
        let mut current_obj = objective.aggregate(costs.iter().copied());
        let seed_objective = current_obj;
        let mut best = current.clone();
        let mut best_obj = current_obj;

        let mut penalties = EdgePenalties::new();
        let mut route_penalty = vec![0u64; current.num_vehicles()];
        let mut lambda = 0.0_f64;

        let mut evaluated = 0u64;
        let mut accepted = 0u64;
        let mut local_optima = 0u64;

        let final_state = loop {
            let scan_start = evaluated;
            let mut found: Option<(Candidate, Vec<(usize, i64)>, i64)> = None;
            let mut stop: Option<SearchState> = None;
            {
                let penalty_total: u64 = route_penalty.iter().sum();
                let mut visit = |cand: Candidate| -> ControlFlow<()> {
                    evaluated += 1;
                    let changed: Vec<(usize, i64)> = cand
                        .changes
                        .iter()
                        .map(|(v, p)| (*v, oracle.path_cost(p)))
                        .collect();
                    let obj = objective_with(objective, &costs, &changed);

                    let improves = if lambda > 0.0 {
                        let removed: u64 = cand.changes.iter().map(|(v, _)| route_penalty[*v]).sum();
                        let added: u64 = cand
                            .changes
                            .iter()
                            .map(|(_, p)| penalties.path_penalty(p))
                            .sum();
                        let pen = penalty_total - removed + added;
                        augmented(obj, pen, lambda) < augmented(current_obj, penalty_total, lambda)
                    } else {
                        obj < current_obj
                    };
                    if improves && cand.changes.iter().all(|(_, p)| eval.is_feasible(p)) {
                        found = Some((cand, changed, obj));
                    }

                    stop = limit_reached(evaluated, max_iterations, started, time_limit);
                    if found.is_some() || stop.is_some() {
                        ControlFlow::Break(())
                    } else {
                        ControlFlow::Continue(())
                    }
                };
                for nb in &self.neighborhoods {
                    if nb.explore(&current, &mut visit).is_break() {
                        trace!("{} produced a move", nb.name());
                        break;
                    }
                }
            }

            let moved = found.is_some();
            if let Some((cand, changed, obj)) = found {
                for &(v, c) in &changed {
                    costs[v] = c;
                }
                cand.apply(&mut current);
                if lambda > 0.0 {
                    for &(v, _) in &changed {
                        route_penalty[v] = penalties.path_penalty(current.path(v));
                    }
                }
                current_obj = obj;
                accepted += 1;
                if obj < best_obj {
                    best_obj = obj;
                    best = current.clone();
                    debug!("new best objective {best_obj} after {evaluated} candidates");
                }
            }
            if let Some(state) = stop {
                break state;
            }
            if moved {
                continue;
            }

            local_optima += 1;
            let converged = if best_obj < seed_objective {
                SearchState::Improved
            } else {
                SearchState::NoImprovementFound
            };
            // Penalties cannot change an empty neighbourhood.
            if !guided || evaluated == scan_start {
                break converged;
            }
            if let Some(state) = limit_reached(evaluated, max_iterations, started, time_limit) {
                break state;
            }
            if lambda == 0.0 {
                let arcs = current.arcs().count().max(1);
                lambda = self.lambda_coefficient * current_obj as f64 / arcs as f64;
                if lambda <= 0.0 {
                    debug!("guided local search disabled: zero penalty weight");
                    break converged;
                }
            }
            let penalized = penalties.penalize_max_utility(&current, oracle);
            if penalized == 0 {
                break converged;
            }
            for (v, pen) in route_penalty.iter_mut().enumerate() {
                *pen = penalties.path_penalty(current.path(v));
            }
            trace!(
                "local optimum {local_optima} at objective {current_obj}: penalized {penalized} arc(s)"
            );
        };

        self.state = final_state;
        info!(
            "local search finished ({final_state:?}): {seed_objective} -> {best_obj}, \
             {evaluated} candidates, {accepted} accepted, {:.3}s",
            started.elapsed().as_secs_f64()
        );
        (
            best,
            SearchOutcome {
                state: final_state,
                seed_objective,
                best_objective: best_obj,
                evaluated,
                accepted,
                local_optima,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimeDimensionConfig;
    use crate::dimension::CumulDimension;
    use crate::distance::{TimeMatrix, TransitOracle};
    use crate::models::{IndexManager, RoutingIndex};

    fn setup(num_vehicles: usize) -> (IndexManager, TransitOracle, CumulDimension) {
        let tm = TimeMatrix::from_rows(&[
            vec![0, 6, 9, 5, 8],
            vec![6, 0, 7, 3, 2],
            vec![9, 7, 0, 4, 8],
            vec![5, 3, 4, 0, 3],
            vec![8, 2, 8, 3, 0],
        ])
        .expect("valid");
        let depots = vec![0; num_vehicles];
        let m = IndexManager::new(5, num_vehicles, &depots, &depots).expect("valid");
        let o = TransitOracle::register(&m, &tm).expect("valid");
        let dim = CumulDimension::new(&m, &TimeDimensionConfig::default()).expect("valid");
        (m, o, dim)
    }

    fn path(m: &IndexManager, vehicle: usize, nodes: &[usize]) -> Vec<RoutingIndex> {
        let mut p = vec![m.start_index(vehicle)];
        p.extend(nodes.iter().map(|&n| m.node_to_index(n).expect("visitable")));
        p.push(m.end_index(vehicle));
        p
    }

    fn params(meta: LocalSearchMetaheuristic, max_iterations: Option<u64>) -> SearchParameters {
        SearchParameters {
            local_search_metaheuristic: meta,
            max_iterations,
            ..SearchParameters::default()
        }
    }

    #[test]
    fn test_descent_improves_bad_seed() {
        let (m, o, mut dim) = setup(1);
        let mut eval = RouteEvaluator::new(&o, &mut dim, Objective::TotalTransit);
        // 8 + 8 + 7 + 3 + 5
        let seed = Plan::from_paths(vec![path(&m, 0, &[4, 2, 1, 3])]);
        assert_eq!(eval.plan_objective(&seed), 31);

        let mut ls = LocalSearch::new(&params(LocalSearchMetaheuristic::None, None));
        assert_eq!(ls.state(), SearchState::Seeded);
        let (best, outcome) = ls.run(seed, &mut eval);

        assert_eq!(ls.state(), SearchState::Improved);
        assert_eq!(outcome.seed_objective, 31);
        assert!(outcome.best_objective < 31);
        assert_eq!(outcome.best_objective, eval.plan_objective(&best));
        assert_eq!(outcome.local_optima, 1);
        assert_eq!(best.num_visits(), 4);
        assert!(eval.plan_is_feasible(&best));
    }

    #[test]
    fn test_descent_at_local_optimum() {
        let (m, o, mut dim) = setup(1);
        let mut eval = RouteEvaluator::new(&o, &mut dim, Objective::TotalTransit);
        // A single visit has no neighbour.
        let seed = Plan::from_paths(vec![path(&m, 0, &[3])]);
        let (best, outcome) =
            LocalSearch::new(&params(LocalSearchMetaheuristic::None, None)).run(seed.clone(), &mut eval);
        assert_eq!(best, seed);
        assert_eq!(outcome.state, SearchState::NoImprovementFound);
        assert_eq!(outcome.evaluated, 0);
    }

    #[test]
    fn test_iteration_limit() {
        let (m, o, mut dim) = setup(2);
        let mut eval = RouteEvaluator::new(&o, &mut dim, Objective::TotalTransit);
        let seed = Plan::from_paths(vec![path(&m, 0, &[4, 2]), path(&m, 1, &[1, 3])]);
        let p = params(LocalSearchMetaheuristic::GuidedLocalSearch, Some(200));
        let (best, outcome) = LocalSearch::new(&p).run(seed.clone(), &mut eval);
        assert_eq!(outcome.state, SearchState::IterationLimit);
        assert_eq!(outcome.evaluated, 200);
        assert!(outcome.best_objective <= eval.plan_objective(&seed));
        assert!(eval.plan_is_feasible(&best));
    }

    #[test]
    fn test_zero_time_limit_stops_after_one_candidate() {
        let (m, o, mut dim) = setup(1);
        let mut eval = RouteEvaluator::new(&o, &mut dim, Objective::TotalTransit);
        let seed = Plan::from_paths(vec![path(&m, 0, &[1, 2, 3, 4])]);
        let p = SearchParameters {
            time_limit_seconds: 0,
            ..SearchParameters::default()
        };
        let (_, outcome) = LocalSearch::new(&p).run(seed, &mut eval);
        assert_eq!(outcome.state, SearchState::TimedOut);
        assert_eq!(outcome.evaluated, 1);
    }

    #[test]
    fn test_guided_search_ends_without_moves() {
        let (m, o, mut dim) = setup(1);
        let mut eval = RouteEvaluator::new(&o, &mut dim, Objective::TotalTransit);
        // One visit, one vehicle: no operator has a candidate.
        let seed = Plan::from_paths(vec![path(&m, 0, &[3])]);
        let p = params(LocalSearchMetaheuristic::GuidedLocalSearch, None);
        let (best, outcome) = LocalSearch::new(&p).run(seed.clone(), &mut eval);
        assert_eq!(best, seed);
        assert_eq!(outcome.state, SearchState::NoImprovementFound);
        assert_eq!(outcome.evaluated, 0);
        assert_eq!(outcome.local_optima, 1);
    }

    #[test]
    fn test_guided_search_ends_on_empty_open_route() {
        let tm = TimeMatrix::from_rows(&[vec![0, 7], vec![7, 0]]).expect("valid");
        let m = IndexManager::new(2, 1, &[0], &[1]).expect("valid");
        let o = TransitOracle::register(&m, &tm).expect("valid");
        let mut dim = CumulDimension::new(&m, &TimeDimensionConfig::default()).expect("valid");
        let mut eval = RouteEvaluator::new(&o, &mut dim, Objective::TotalTransit);
        let seed = Plan::empty(&m);
        let p = SearchParameters {
            local_search_metaheuristic: LocalSearchMetaheuristic::GuidedLocalSearch,
            time_limit_seconds: 1,
            ..SearchParameters::default()
        };
        let started = Instant::now();
        let (_, outcome) = LocalSearch::new(&p).run(seed, &mut eval);
        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(outcome.best_objective, 7);
        assert_eq!(outcome.state, SearchState::NoImprovementFound);
    }

    #[test]
    fn test_guided_search_respects_wall_clock() {
        let (m, o, mut dim) = setup(2);
        let mut eval = RouteEvaluator::new(&o, &mut dim, Objective::TotalTransit);
        let seed = Plan::from_paths(vec![path(&m, 0, &[4, 2]), path(&m, 1, &[1, 3])]);
        let p = SearchParameters {
            local_search_metaheuristic: LocalSearchMetaheuristic::GuidedLocalSearch,
            time_limit_seconds: 1,
            ..SearchParameters::default()
        };
        let started = Instant::now();
        let (best, outcome) = LocalSearch::new(&p).run(seed, &mut eval);
        assert_eq!(outcome.state, SearchState::TimedOut);
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(eval.plan_is_feasible(&best));
    }

    #[test]
    fn test_limit_reached() {
        let now = Instant::now();
        assert_eq!(
            limit_reached(5, Some(5), now, Duration::from_secs(60)),
            Some(SearchState::IterationLimit)
        );
        assert_eq!(limit_reached(4, Some(5), now, Duration::from_secs(60)), None);
        assert_eq!(
            limit_reached(0, None, now, Duration::ZERO),
            Some(SearchState::TimedOut)
        );
    }

    #[test]
    fn test_keeps_window_feasibility() {
        let (m, o, mut dim) = setup(1);
        // Node 2 is only reachable by 9: straight from the depot or via node 3.
        dim.apply_window(&m, 2, 0, 9).expect("installable");
        let mut eval = RouteEvaluator::new(&o, &mut dim, Objective::TotalTransit);
        let seed = Plan::from_paths(vec![path(&m, 0, &[2, 3, 1, 4])]);
        assert!(eval.plan_is_feasible(&seed));

        let p = params(LocalSearchMetaheuristic::GuidedLocalSearch, Some(500));
        let (best, outcome) = LocalSearch::new(&p).run(seed, &mut eval);
        assert!(eval.plan_is_feasible(&best));
        assert!(outcome.best_objective <= 26);
        let two = m.node_to_index(2).expect("visitable");
        let pos = best.visits(0).iter().position(|&i| i == two);
        assert!(matches!(pos, Some(0) | Some(1)));
    }

    #[test]
    fn test_objective_with_max_route() {
        assert_eq!(
            objective_with(Objective::MaxRouteTransit, &[10, 4], &[(0, 3)]),
            4
        );
        assert_eq!(objective_with(Objective::TotalTransit, &[10, 4], &[(1, 1)]), 11);
    }
}
