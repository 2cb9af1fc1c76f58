//! Intra-route 2-opt.
//!
//! # Algorithm
//!
//! For each pair of interior positions `i < j` of a route, reverse the
//! segment `[i..=j]`. The transit change only involves the two boundary arcs
//! when the matrix is symmetric; asymmetric matrices are handled by the
//! caller, which re-costs the whole path.
//!
//! # Complexity
//!
//! O(n²) candidates per route.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use std::ops::ControlFlow;

use super::neighborhood::{interior, Candidate, Neighborhood};
use crate::evaluation::Plan;

/// Segment reversal within one route.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoOpt;

impl Neighborhood for TwoOpt {
    fn name(&self) -> &'static str {
        "two_opt"
    }

    fn explore(
        &self,
        plan: &Plan,
        visit: &mut dyn FnMut(Candidate) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        for vehicle in 0..plan.num_vehicles() {
            let path = plan.path(vehicle);
            let inner = interior(path);
            for i in inner.clone() {
                for j in (i + 1)..inner.end {
                    let mut reversed = path.to_vec();
                    reversed[i..=j].reverse();
                    visit(Candidate::single(vehicle, reversed))?;
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
    fn test_two_opt_reversals() {
        let p = plan(&[&[1, 2, 3]]);
        let results: Vec<Vec<Vec<usize>>> = collect(&TwoOpt, &p)
            .iter()
            .map(|c| visits_after(&p, c))
            .collect();
        assert_eq!(
            results,
            vec![
                vec![vec![2, 1, 3]],
                vec![vec![3, 2, 1]],
                vec![vec![1, 3, 2]],
            ]
        );
    }

    #[test]
    fn test_two_opt_short_routes() {
        let p = plan(&[&[], &[4]]);
        assert!(collect(&TwoOpt, &p).is_empty());
    }

    #[test]
    fn test_two_opt_keeps_depots() {
        let p = plan(&[&[1, 2, 3, 4]]);
        for c in collect(&TwoOpt, &p) {
            let path = &c.changes[0].1;
            assert_eq!(path.first(), p.path(0).first());
            assert_eq!(path.last(), p.path(0).last());
        }
    }
}
