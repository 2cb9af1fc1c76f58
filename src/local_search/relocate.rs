//! Single-node relocation, within and across routes.
//!
//! # Algorithm
//!
//! Removes one visit from its route and reinserts it at any position of any
//! route, its own included.
//!
//! # Complexity
//!
//! O(n²) candidates per pass, n = visits.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use std::ops::ControlFlow;

use super::neighborhood::{interior, Candidate, Neighborhood};
use crate::constructive::with_inserted;
use crate::evaluation::Plan;

/// Relocate-single-node operator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Relocate;

impl Neighborhood for Relocate {
    fn name(&self) -> &'static str {
        "relocate"
    }

    fn explore(
        &self,
        plan: &Plan,
        visit: &mut dyn FnMut(Candidate) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        for from in 0..plan.num_vehicles() {
            let source = plan.path(from);
            for pos in interior(source) {
                let node = source[pos];
                let mut removed = source.to_vec();
                removed.remove(pos);

                for to in 0..plan.num_vehicles() {
                    let target = if to == from { &removed[..] } else { plan.path(to) };
                    for ins in 1..target.len() {
                        if to == from && ins == pos {
                            continue;
                        }
                        let inserted = with_inserted(target, ins, node);
                        let cand = if to == from {
                            Candidate::single(from, inserted)
                        } else {
                            Candidate::pair((from, removed.clone()), (to, inserted))
                        };
                        visit(cand)?;
                    }
                }
            }
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_search::neighborhood::test_support::{collect, plan, visits_after};

    #[test]
    fn test_relocate_intra_route() {
        let p = plan(&[&[1, 2, 3]]);
        let cands = collect(&Relocate, &p);
        let results: Vec<Vec<Vec<usize>>> = cands.iter().map(|c| visits_after(&p, c)).collect();
        assert!(results.contains(&vec![vec![2, 3, 1]]));
        assert!(results.contains(&vec![vec![2, 1, 3]]));
        // Identity moves are skipped.
        assert_eq!(cands.len(), 6);
        assert!(!results.contains(&vec![vec![1, 2, 3]]));
    }

    #[test]
    fn test_relocate_across_routes() {
        let p = plan(&[&[1, 2], &[]]);
        let cands = collect(&Relocate, &p);
        let results: Vec<Vec<Vec<usize>>> = cands.iter().map(|c| visits_after(&p, c)).collect();
        assert!(results.contains(&vec![vec![2], vec![1]]));
        assert!(results.contains(&vec![vec![1], vec![2]]));
        // Every candidate keeps each visit exactly once.
        for r in &results {
            let mut all: Vec<usize> = r.concat();
            all.sort();
            assert_eq!(all, vec![1, 2]);
        }
    }

    #[test]
    fn test_relocate_empty_plan() {
        let p = plan(&[&[], &[]]);
        assert!(collect(&Relocate, &p).is_empty());
    }

    #[test]
    fn test_relocate_stops_on_break() {
        let p = plan(&[&[1, 2, 3]]);
        let mut seen = 0;
        let flow = Relocate.explore(&p, &mut |_| {
            seen += 1;
            ControlFlow::Break(())
        });
        assert!(flow.is_break());
        assert_eq!(seen, 1);
    }
}
