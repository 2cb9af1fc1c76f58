//! Cumulative time dimension.
//!
//! - [`Domain`]: closed integer interval
//! - [`CumulDimension`]: one cumul variable per routing index, arc
//!   propagation, and a trail for exact backtracking
//! - [`CumulDimension::apply_window`]: time-window installation

mod cumul;
mod domain;
mod windows;

pub use cumul::{Checkpoint, CumulDimension, DomainWipeout};
pub use domain::Domain;
