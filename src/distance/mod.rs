//! Travel-time matrix and the transit oracle built on it.

mod matrix;
mod oracle;

pub use matrix::TimeMatrix;
pub use oracle::TransitOracle;
