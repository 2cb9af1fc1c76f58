//! Local search operators and the improvement driver.
//!
//! - [`Relocate`]: single-node relocation, within and across routes
//! - [`Swap`]: pairwise visit exchange, within and across routes
//! - [`TwoOpt`]: intra-route segment reversal
//! - [`OrOpt`]: intra-route segment relocation
//! - [`CrossExchange`]: inter-route tail exchange (2-opt*)
//! - [`LocalSearch`]: first-improvement descent with optional guided local
//!   search

mod engine;
mod exchange;
mod neighborhood;
mod or_opt;
mod penalty;
mod relocate;
mod swap;
mod two_opt;

pub use engine::{default_neighborhoods, LocalSearch, SearchOutcome, SearchState};
pub use exchange::CrossExchange;
pub use neighborhood::{Candidate, Neighborhood};
pub use or_opt::OrOpt;
pub use penalty::EdgePenalties;
pub use relocate::Relocate;
pub use swap::Swap;
pub use two_opt::TwoOpt;
