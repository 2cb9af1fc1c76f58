//! # vrptw-engine
//!
//! Vehicle routing with time windows: an index model over nodes and vehicle
//! endpoints, a cumulative time dimension with undoable interval
//! propagation, construction heuristics, and a local search with optional
//! guided local search.
//!
//! ## Modules
//!
//! - [`models`]: index space, windows, routes, solutions and the solution reader
//! - [`distance`]: travel-time matrix and the routing-index transit oracle
//! - [`dimension`]: cumul domains, propagation along paths, window installation
//! - [`evaluation`]: path cost, path feasibility, objective aggregation
//! - [`constructive`]: cheapest-arc and cheapest-insertion first solutions
//! - [`local_search`]: move operators, edge penalties, the search driver
//! - [`solver`]: [`RoutingModel`](solver::RoutingModel), the end-to-end pipeline
//! - [`config`]: dimension and search options
//! - [`error`]: error types
//!
//! ## Example
//!
//! ```
//! use vrptw_engine::config::{FirstSolutionStrategy, SearchParameters, TimeDimensionConfig};
//! use vrptw_engine::models::ProblemData;
//! use vrptw_engine::solver::RoutingModel;
//!
//! let data = ProblemData {
//!     time_matrix: vec![
//!         vec![0, 6, 9, 5],
//!         vec![6, 0, 7, 3],
//!         vec![9, 7, 0, 4],
//!         vec![5, 3, 4, 0],
//!     ],
//!     time_windows: vec![(0, 50); 4],
//!     num_vehicles: 2,
//!     starts: vec![0, 0],
//!     ends: vec![0, 0],
//! };
//! let mut model = RoutingModel::from_data(&data, &TimeDimensionConfig::default()).unwrap();
//! let params = SearchParameters {
//!     first_solution_strategy: FirstSolutionStrategy::ParallelCheapestInsertion,
//!     ..SearchParameters::default()
//! };
//! model.solve(&params).unwrap();
//! println!("{}", model.report().unwrap());
//! ```

pub mod config;
pub mod constructive;
pub mod dimension;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod solver;

pub use error::{ConfigError, RoutingError};
pub use solver::RoutingModel;
