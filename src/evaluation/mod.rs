//! Route evaluation: transit cost, cumul feasibility, and objective.

mod evaluator;
mod plan;

pub use evaluator::RouteEvaluator;
pub use plan::Plan;
