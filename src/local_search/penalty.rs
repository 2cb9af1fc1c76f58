//! Edge penalties for guided local search.
//!
//! At a local optimum every arc `e` in use has utility
//! `cost(e) / (1 + penalty(e))`; the arcs of maximal utility get one more
//! penalty unit. Utilities are compared by cross-multiplication so ties are
//! exact.

use std::collections::HashMap;

use crate::distance::TransitOracle;
use crate::evaluation::Plan;
use crate::models::RoutingIndex;

/// Penalty counters keyed by directed arc.
#[derive(Debug, Clone, Default)]
pub struct EdgePenalties {
    counts: HashMap<(RoutingIndex, RoutingIndex), u32>,
}

impl EdgePenalties {
    /// Creates an empty penalty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Penalty of the arc `from -> to`.
    pub fn get(&self, from: RoutingIndex, to: RoutingIndex) -> u32 {
        self.counts.get(&(from, to)).copied().unwrap_or(0)
    }

    /// Adds one unit to the arc `from -> to`.
    pub fn increment(&mut self, from: RoutingIndex, to: RoutingIndex) {
        *self.counts.entry((from, to)).or_insert(0) += 1;
    }

    /// Sum of penalties along a path.
    pub fn path_penalty(&self, path: &[RoutingIndex]) -> u64 {
        if self.counts.is_empty() {
            return 0;
        }
        path.windows(2)
            .map(|w| u64::from(self.get(w[0], w[1])))
            .sum()
    }

    /// Number of penalized arcs.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no arc has been penalized.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Penalizes the arcs of `plan` with maximal utility.
    ///
    /// Returns the number of arcs penalized, zero when every arc in use has
    /// zero cost.
    pub fn penalize_max_utility(&mut self, plan: &Plan, oracle: &TransitOracle) -> usize {
        let arcs: Vec<(RoutingIndex, RoutingIndex, i128, i128)> = plan
            .arcs()
            .map(|(from, to)| {
                let cost = i128::from(oracle.cost(from, to));
                let denom = 1 + i128::from(self.get(from, to));
                (from, to, cost, denom)
            })
            .collect();

        let Some(&(_, _, best_cost, best_denom)) = arcs
            .iter()
            .max_by(|a, b| (a.2 * b.3).cmp(&(b.2 * a.3)))
        else {
            return 0;
        };
        if best_cost <= 0 {
            return 0;
        }

        let mut penalized = 0;
        for &(from, to, cost, denom) in &arcs {
            if cost * best_denom == best_cost * denom {
                self.increment(from, to);
                penalized += 1;
            }
        }
        penalized
    }
}
