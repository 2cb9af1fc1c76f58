//! The routing model: index space, transit oracle, and cumul dimension owned
//! together, plus the solve pipeline.
//!
//! A solve runs construction, then local search, then freezes the best plan
//! into a [`Solution`]. Domains installed before the solve (windows) are kept;
//! everything the search narrows is undone afterwards, so solving twice with
//! the same parameters gives the same answer.

use std::time::Instant;

use log::{debug, info, warn};

use crate::config::{SearchParameters, TimeDimensionConfig};
use crate::constructive::build_first_solution;
use crate::dimension::CumulDimension;
use crate::distance::{TimeMatrix, TransitOracle};
use crate::error::RoutingError;
use crate::evaluation::RouteEvaluator;
use crate::local_search::{LocalSearch, SearchOutcome};
use crate::models::{IndexManager, ProblemData, Solution, SolutionReader, SolutionReport};

/// A VRPTW instance ready to be solved.
///
/// # Examples
///
/// ```
/// use vrptw_engine::config::{SearchParameters, TimeDimensionConfig};
/// use vrptw_engine::models::ProblemData;
/// use vrptw_engine::solver::RoutingModel;
///
/// let data = ProblemData {
///     time_matrix: vec![vec![0, 4], vec![4, 0]],
///     time_windows: vec![(0, 50), (0, 50)],
///     num_vehicles: 1,
///     starts: vec![0],
///     ends: vec![0],
/// };
/// let mut model = RoutingModel::from_data(&data, &TimeDimensionConfig::default()).unwrap();
/// model.solve(&SearchParameters::default()).unwrap();
///
/// let reader = model.reader().unwrap();
/// assert_eq!(reader.route_of(0).unwrap(), vec![0, 1, 0]);
/// assert_eq!(reader.objective(), 8);
/// ```
#[derive(Debug)]
pub struct RoutingModel {
    manager: IndexManager,
    oracle: TransitOracle,
    dimension: CumulDimension,
    solution: Option<Solution>,
    outcome: Option<SearchOutcome>,
}

impl RoutingModel {
    /// Builds a model without time windows.
    pub fn new(
        manager: IndexManager,
        matrix: &TimeMatrix,
        config: &TimeDimensionConfig,
    ) -> Result<Self, RoutingError> {
        let oracle = TransitOracle::register(&manager, matrix)?;
        let dimension = CumulDimension::new(&manager, config)?;
        Ok(Self {
            manager,
            oracle,
            dimension,
            solution: None,
            outcome: None,
        })
    }

    /// Builds a model from raw data and installs its time windows.
    pub fn from_data(
        data: &ProblemData,
        config: &TimeDimensionConfig,
    ) -> Result<Self, RoutingError> {
        let windows = data.windows()?;
        let manager = IndexManager::new(
            data.num_nodes(),
            data.num_vehicles,
            &data.starts,
            &data.ends,
        )?;
        let matrix = TimeMatrix::from_rows(&data.time_matrix)?;
        let mut model = Self::new(manager, &matrix, config)?;
        model
            .dimension
            .install_windows(&model.manager, &windows)?;
        debug!(
            "routing model: {} nodes, {} vehicles, {} visits",
            model.manager.num_nodes(),
            model.manager.num_vehicles(),
            model.manager.num_visits()
        );
        for vehicle in data.vehicles() {
            if !vehicle.returns_to_start() {
                debug!(
                    "vehicle {} runs open: {} -> {}",
                    vehicle.id(),
                    vehicle.start(),
                    vehicle.end()
                );
            }
        }
        Ok(model)
    }

    /// Installs a time window on `node`; see [`CumulDimension::apply_window`].
    pub fn apply_window(
        &mut self,
        node: usize,
        earliest: i64,
        latest: i64,
    ) -> Result<(), RoutingError> {
        self.dimension
            .apply_window(&self.manager, node, earliest, latest)
    }

    /// Index space of the model.
    pub fn manager(&self) -> &IndexManager {
        &self.manager
    }

    /// Transit oracle of the model.
    pub fn oracle(&self) -> &TransitOracle {
        &self.oracle
    }

    /// Cumul dimension with the installed domains.
    pub fn dimension(&self) -> &CumulDimension {
        &self.dimension
    }

    /// Statistics of the last successful solve.
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }

    /// Last solution, if any.
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Searches for a solution and stores it.
    ///
    /// On failure the previous solution, if any, is kept.
    pub fn solve(&mut self, params: &SearchParameters) -> Result<&Solution, RoutingError> {
        let started = Instant::now();
        let base = self.dimension.checkpoint();
        let result = self.run(params);
        self.dimension.restore(base);
        let (solution, outcome) = result?;

        info!(
            "solved with {:?} / {:?}: objective {} over {} served node(s), search {:?}, {:.3}s",
            params.first_solution_strategy,
            params.local_search_metaheuristic,
            solution.objective(),
            solution.num_served(),
            outcome.state,
            started.elapsed().as_secs_f64()
        );
        self.outcome = Some(outcome);
        Ok(self.solution.insert(solution))
    }

    fn run(&mut self, params: &SearchParameters) -> Result<(Solution, SearchOutcome), RoutingError> {
        let mut eval = RouteEvaluator::new(&self.oracle, &mut self.dimension, params.objective);

        let seed = build_first_solution(params.first_solution_strategy, &self.manager, &mut eval)?;
        debug!(
            "first solution ({:?}): objective {}",
            params.first_solution_strategy,
            eval.plan_objective(&seed)
        );

        let (best, outcome) = LocalSearch::new(params).run(seed, &mut eval);

        // Every plan the search keeps has passed the feasibility check.
        let solution = eval.build_solution(&self.manager, &best).map_err(|wipeout| {
            warn!("best plan failed final propagation at index {}", wipeout.index);
            RoutingError::NoFeasibleSolution { unrouted: 0 }
        })?;
        Ok((solution, outcome))
    }

    /// Read access to the last solution.
    pub fn reader(&self) -> Result<SolutionReader<'_>, RoutingError> {
        self.solution
            .as_ref()
            .map(SolutionReader::new)
            .ok_or(RoutingError::NoSolutionAvailable)
    }

    /// Printable report of the last solution.
    pub fn report(&self) -> Result<SolutionReport<'_>, RoutingError> {
        self.reader().map(SolutionReport::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FirstSolutionStrategy, LocalSearchMetaheuristic};
    use crate::error::ConfigError;

    fn data() -> ProblemData {
        ProblemData {
            time_matrix: vec![
                vec![0, 6, 9, 5, 8],
                vec![6, 0, 7, 3, 2],
                vec![9, 7, 0, 4, 8],
                vec![5, 3, 4, 0, 3],
                vec![8, 2, 8, 3, 0],
            ],
            time_windows: vec![(0, 50); 5],
            num_vehicles: 1,
            starts: vec![0],
            ends: vec![0],
        }
    }

    #[test]
    fn test_reader_before_solve() {
        let model = RoutingModel::from_data(&data(), &TimeDimensionConfig::default()).expect("valid");
        assert_eq!(model.reader().err(), Some(RoutingError::NoSolutionAvailable));
        assert!(model.report().is_err());
        assert!(model.outcome().is_none());
    }

    #[test]
    fn test_solve_restores_domains() {
        let mut model =
            RoutingModel::from_data(&data(), &TimeDimensionConfig::default()).expect("valid");
        model.apply_window(2, 10, 40).expect("installable");
        let before = model.dimension().domains().to_vec();
        let height = model.dimension().trail_len();

        let params = SearchParameters {
            local_search_metaheuristic: LocalSearchMetaheuristic::GuidedLocalSearch,
            max_iterations: Some(300),
            ..SearchParameters::default()
        };
        model.solve(&params).expect("feasible");
        assert_eq!(model.dimension().domains(), &before[..]);
        assert_eq!(model.dimension().trail_len(), height);
        assert!(model.outcome().is_some());
    }

    #[test]
    fn test_solve_twice_is_deterministic() {
        let mut model =
            RoutingModel::from_data(&data(), &TimeDimensionConfig::default()).expect("valid");
        let params = SearchParameters {
            first_solution_strategy: FirstSolutionStrategy::ParallelCheapestInsertion,
            ..SearchParameters::default()
        };
        let first = model.solve(&params).expect("feasible").clone();
        let second = model.solve(&params).expect("feasible").clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_failed_solve_keeps_previous_solution() {
        let mut model =
            RoutingModel::from_data(&data(), &TimeDimensionConfig::default()).expect("valid");
        model.solve(&SearchParameters::default()).expect("feasible");
        // Node 2 is at least 9 away from the depot.
        model.apply_window(2, 0, 8).expect("installable");
        assert!(matches!(
            model.solve(&SearchParameters::default()),
            Err(RoutingError::NoFeasibleSolution { .. })
        ));
        assert!(model.reader().is_ok());
    }

    #[test]
    fn test_from_data_validates() {
        let mut bad = data();
        bad.time_windows.pop();
        assert_eq!(
            RoutingModel::from_data(&bad, &TimeDimensionConfig::default()).err(),
            Some(RoutingError::Config(ConfigError::WindowCount {
                expected: 5,
                found: 4
            }))
        );

        let mut bad = data();
        bad.time_windows[3] = (60, 70);
        assert!(matches!(
            RoutingModel::from_data(&bad, &TimeDimensionConfig::default()),
            Err(RoutingError::InfeasibleModel { node: 3, .. })
        ));
    }

    #[test]
    fn test_apply_window_rejects_unknown_node() {
        let mut model =
            RoutingModel::from_data(&data(), &TimeDimensionConfig::default()).expect("valid");
        assert_eq!(
            model.apply_window(5, 0, 10),
            Err(RoutingError::Config(ConfigError::WindowNodeOutOfRange {
                node: 5,
                num_nodes: 5
            }))
        );
    }

    #[test]
    fn test_model_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<RoutingModel>();
    }
}
