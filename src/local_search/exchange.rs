//! Inter-route tail exchange (2-opt*).
//!
//! # Algorithm
//!
//! Given routes R1 = [s₁, a₁, ..., aᵢ, aᵢ₊₁, ..., aₙ, e₁] and
//! R2 = [s₂, b₁, ..., bⱼ, bⱼ₊₁, ..., bₘ, e₂], produce:
//!
//! R1' = [s₁, a₁, ..., aᵢ, bⱼ₊₁, ..., bₘ, e₁]
//! R2' = [s₂, b₁, ..., bⱼ, aᵢ₊₁, ..., aₙ, e₂]
//!
//! Each vehicle keeps its own start and end.
//!
//! # Complexity
//!
//! O(n² × R²) candidates, n = visits per route, R = number of routes.
//!
//! # Reference
//!
//! Potvin, J.-Y. & Rousseau, J.-M. (1995). "An Exchange Heuristic for
//! Routeing Problems with Time Windows", *Journal of the Operational Research
//! Society* 46(12), 1433-1446.

use std::ops::ControlFlow;

use super::neighborhood::{Candidate, Neighborhood};
use crate::evaluation::Plan;
use crate::models::RoutingIndex;

/// Tail exchange between two routes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossExchange;

fn splice(head: &[RoutingIndex], tail: &[RoutingIndex], end: RoutingIndex) -> Vec<RoutingIndex> {
    let mut out = Vec::with_capacity(head.len() + tail.len() + 1);
    out.extend_from_slice(head);
    out.extend_from_slice(tail);
    out.push(end);
    out
}

impl Neighborhood for CrossExchange {
    fn name(&self) -> &'static str {
        "cross_exchange"
    }

    fn explore(
        &self,
        plan: &Plan,
        visit: &mut dyn FnMut(Candidate) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        let n = plan.num_vehicles();
        for r1 in 0..n {
            for r2 in (r1 + 1)..n {
                let p1 = plan.path(r1);
                let p2 = plan.path(r2);
                let (end1, end2) = (p1[p1.len() - 1], p2[p2.len() - 1]);
                // Cut before position `a` of R1 and `b` of R2.
                for a in 1..p1.len() {
                    for b in 1..p2.len() {
                        let tail1 = &p1[a..p1.len() - 1];
                        let tail2 = &p2[b..p2.len() - 1];
                        if tail1.is_empty() && tail2.is_empty() {
                            continue;
                        }
                        let new1 = splice(&p1[..a], tail2, end1);
                        let new2 = splice(&p2[..b], tail1, end2);
                        visit(Candidate::pair((r1, new1), (r2, new2)))?;
                    }
                }
            }
        }
        ControlFlow::Continue(())
    }
}
