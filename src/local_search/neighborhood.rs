//! Neighbourhood abstraction shared by the move operators.

use std::ops::ControlFlow;

use crate::evaluation::Plan;
use crate::models::RoutingIndex;

/// A neighbour of the current plan, expressed as the paths it replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// `(vehicle, new path)` for every vehicle whose path changes.
    pub changes: Vec<(usize, Vec<RoutingIndex>)>,
}

impl Candidate {
    /// Candidate touching a single vehicle.
    pub fn single(vehicle: usize, path: Vec<RoutingIndex>) -> Self {
        Self {
            changes: vec![(vehicle, path)],
        }
    }

    /// Candidate touching two vehicles.
    pub fn pair(a: (usize, Vec<RoutingIndex>), b: (usize, Vec<RoutingIndex>)) -> Self {
        Self {
            changes: vec![a, b],
        }
    }

    /// Writes the changed paths into `plan`.
    pub fn apply(self, plan: &mut Plan) {
        for (vehicle, path) in self.changes {
            plan.set_path(vehicle, path);
        }
    }
}

/// A family of moves around a plan.
///
/// `explore` hands candidates to `visit` in a fixed order and stops as soon
/// as `visit` breaks, returning that break.
pub trait Neighborhood: Send + Sync {
    /// Short operator name for logs.
    fn name(&self) -> &'static str;

    /// Enumerates the neighbours of `plan`.
    fn explore(
        &self,
        plan: &Plan,
        visit: &mut dyn FnMut(Candidate) -> ControlFlow<()>,
    ) -> ControlFlow<()>;
}

/// Interior positions of a path (everything but the depots).
pub(crate) fn interior(path: &[RoutingIndex]) -> std::ops::Range<usize> {
    1..path.len() - 1
}
