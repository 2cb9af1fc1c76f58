//! Intra-route Or-opt.
//!
//! # Algorithm
//!
//! Moves a segment of 2 or 3 consecutive visits to another position of the
//! same route, keeping its orientation. Single-visit moves are left to
//! [`Relocate`](super::Relocate).
//!
//! # Complexity
//!
//! O(n²) candidates per route.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use std::ops::ControlFlow;

use super::neighborhood::{Candidate, Neighborhood};
use crate::evaluation::Plan;
use crate::models::RoutingIndex;

const SEGMENT_LENGTHS: [usize; 2] = [2, 3];

/// Segment relocation within one route.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrOpt;

impl Neighborhood for OrOpt {
    fn name(&self) -> &'static str {
        "or_opt"
    }

    fn explore(
        &self,
        plan: &Plan,
        visit: &mut dyn FnMut(Candidate) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        for vehicle in 0..plan.num_vehicles() {
            let path = plan.path(vehicle);
            for seg_len in SEGMENT_LENGTHS {
                // The segment occupies [start, start + seg_len) and may not
                // touch the end depot.
                if path.len() < seg_len + 3 {
                    continue;
                }
                for start in 1..=(path.len() - 1 - seg_len) {
                    let segment = &path[start..start + seg_len];
                    let mut rest: Vec<RoutingIndex> = Vec::with_capacity(path.len() - seg_len);
                    rest.extend_from_slice(&path[..start]);
                    rest.extend_from_slice(&path[start + seg_len..]);

                    for ins in 1..rest.len() {
                        if ins == start {
                            continue;
                        }
                        let mut moved = Vec::with_capacity(path.len());
                        moved.extend_from_slice(&rest[..ins]);
                        moved.extend_from_slice(segment);
                        moved.extend_from_slice(&rest[ins..]);
                        visit(Candidate::single(vehicle, moved))?;
                    }
                }
            }
        }
        ControlFlow::Continue(())
    }
}
