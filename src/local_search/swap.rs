//! Pairwise visit swap, within and across routes.

use std::ops::ControlFlow;

use super::neighborhood::{interior, Candidate, Neighborhood};
use crate::evaluation::Plan;

/// Exchanges the positions of two visits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Swap;

impl Neighborhood for Swap {
    fn name(&self) -> &'static str {
        "swap"
    }

    fn explore(
        &self,
        plan: &Plan,
        visit: &mut dyn FnMut(Candidate) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        let n = plan.num_vehicles();
        for r1 in 0..n {
            let p1 = plan.path(r1);
            for i in interior(p1) {
                // Same route: only later positions, to visit each pair once.
                for j in (i + 1)..p1.len() - 1 {
                    let mut swapped = p1.to_vec();
                    swapped.swap(i, j);
                    visit(Candidate::single(r1, swapped))?;
                }
                for r2 in (r1 + 1)..n {
                    let p2 = plan.path(r2);
                    for j in interior(p2) {
                        let mut new1 = p1.to_vec();
                        let mut new2 = p2.to_vec();
                        new1[i] = p2[j];
                        new2[j] = p1[i];
                        visit(Candidate::pair((r1, new1), (r2, new2)))?;
                    }
                }
            }
        }
        ControlFlow::Continue(())
    }
}
