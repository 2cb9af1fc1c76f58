//! Domain model types for vehicle routing with time windows.
//!
//! Provides the index model that separates physical nodes from routing
//! variables, the input record, and the finished solution with its
//! read-only accessors.

mod index;
mod problem;
mod report;
mod route;
mod solution;
mod time_window;
mod vehicle;

pub use index::{IndexManager, RoutingIndex};
pub use problem::ProblemData;
pub use report::SolutionReport;
pub use route::{Route, Stop};
pub use solution::{Solution, SolutionReader};
pub use time_window::TimeWindow;
pub use vehicle::Vehicle;
