//! Dimension and search configuration.
//!
//! Option names and enum spellings follow the routing-parameters vocabulary
//! (`first_solution_strategy: "PARALLEL_CHEAPEST_INSERTION"`, ...), so a
//! caller can load them straight from JSON.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Parameters of the cumulative time dimension.
///
/// # Examples
///
/// ```
/// use vrptw_engine::config::TimeDimensionConfig;
///
/// let cfg = TimeDimensionConfig::default();
/// assert_eq!(cfg.allow_wait_time, 30);
/// assert_eq!(cfg.vehicle_max_time, 50);
/// assert!(!cfg.force_start_cumul_zero);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeDimensionConfig {
    /// Maximum waiting time between two consecutive stops (slack).
    pub allow_wait_time: i64,
    /// Upper bound of every cumul variable (per-vehicle horizon).
    pub vehicle_max_time: i64,
    /// Pin every vehicle's start cumul to zero instead of leaving it free.
    pub force_start_cumul_zero: bool,
}

impl TimeDimensionConfig {
    /// Checks that slack and capacity are non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.allow_wait_time < 0 {
            return Err(ConfigError::NegativeParameter {
                name: "allow_wait_time",
                value: self.allow_wait_time,
            });
        }
        if self.vehicle_max_time < 0 {
            return Err(ConfigError::NegativeParameter {
                name: "vehicle_max_time",
                value: self.vehicle_max_time,
            });
        }
        Ok(())
    }
}

impl Default for TimeDimensionConfig {
    fn default() -> Self {
        Self {
            allow_wait_time: 30,
            vehicle_max_time: 50,
            force_start_cumul_zero: false,
        }
    }
}

/// Construction heuristic used to obtain the first solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FirstSolutionStrategy {
    /// Extend route ends with the cheapest feasible arc.
    #[default]
    CheapestArc,
    /// Insert the globally cheapest (vehicle, position, node) triple.
    ParallelCheapestInsertion,
    /// Insert nodes in index order, each at its cheapest feasible position.
    LocalCheapestInsertion,
}

/// Metaheuristic layered on top of local search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocalSearchMetaheuristic {
    /// Plain descent; stops at the first local optimum.
    #[default]
    None,
    /// Guided local search with edge penalties.
    GuidedLocalSearch,
}

/// Quantity minimized by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Objective {
    /// Sum of travel times over all routes.
    #[default]
    TotalTransit,
    /// Travel time of the longest route.
    MaxRouteTransit,
}

/// Search tuning for one solve.
///
/// # Examples
///
/// ```
/// use vrptw_engine::config::{FirstSolutionStrategy, SearchParameters};
///
/// let params = SearchParameters {
///     first_solution_strategy: FirstSolutionStrategy::ParallelCheapestInsertion,
///     ..SearchParameters::default()
/// };
/// assert_eq!(params.time_limit_seconds, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParameters {
    /// Construction heuristic.
    pub first_solution_strategy: FirstSolutionStrategy,
    /// Metaheuristic for the improvement phase.
    pub local_search_metaheuristic: LocalSearchMetaheuristic,
    /// Wall-clock budget of the improvement phase.
    pub time_limit_seconds: u64,
    /// Optional cap on evaluated candidate moves.
    pub max_iterations: Option<u64>,
    /// Scales the guided local search penalty weight.
    pub gls_lambda_coefficient: f64,
    /// Quantity to minimize.
    pub objective: Objective,
}

impl SearchParameters {
    /// Time budget as a [`Duration`].
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_seconds)
    }
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            first_solution_strategy: FirstSolutionStrategy::default(),
            local_search_metaheuristic: LocalSearchMetaheuristic::default(),
            time_limit_seconds: 30,
            max_iterations: None,
            gls_lambda_coefficient: 0.1,
            objective: Objective::default(),
        }
    }
}

/// Dimension and search options in one flat record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Time dimension options.
    #[serde(flatten)]
    pub dimension: TimeDimensionConfig,
    /// Search options.
    #[serde(flatten)]
    pub search: SearchParameters,
}
