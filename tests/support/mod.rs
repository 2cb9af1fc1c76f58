//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vrptw_engine::config::TimeDimensionConfig;
use vrptw_engine::models::{ProblemData, Solution};

/// The 9-node reference travel-time matrix.
pub const REFERENCE_MATRIX: [[i64; 9]; 9] = [
    [0, 6, 9, 5, 8, 10, 7, 9, 8],
    [6, 0, 7, 3, 2, 6, 7, 5, 8],
    [9, 7, 0, 4, 8, 9, 8, 10, 7],
    [5, 3, 4, 0, 3, 8, 9, 4, 3],
    [8, 2, 8, 3, 0, 5, 6, 2, 3],
    [10, 6, 9, 8, 5, 0, 4, 6, 5],
    [7, 7, 8, 9, 6, 4, 0, 5, 8],
    [9, 5, 10, 4, 2, 6, 5, 0, 3],
    [8, 8, 7, 3, 3, 5, 8, 3, 0],
];

/// Top-left `n×n` block of the reference matrix.
pub fn reference_rows(n: usize) -> Vec<Vec<i64>> {
    REFERENCE_MATRIX[..n]
        .iter()
        .map(|row| row[..n].to_vec())
        .collect()
}

/// Single vehicle over the first five reference nodes, depot 0.
pub fn single_vehicle() -> ProblemData {
    ProblemData {
        time_matrix: reference_rows(5),
        time_windows: vec![(0, 50); 5],
        num_vehicles: 1,
        starts: vec![0],
        ends: vec![0],
    }
}

/// Four vehicles on the full reference matrix, depots at 0, 5, 7 and 8.
pub fn multi_depot() -> ProblemData {
    ProblemData {
        time_matrix: reference_rows(9),
        time_windows: vec![(0, 50); 9],
        num_vehicles: 4,
        starts: vec![0, 5, 7, 8],
        ends: vec![0, 5, 7, 8],
    }
}

/// Random instance in the style of the reference generator: transit times in
/// `[1, 10]`, zero diagonal, depots on the first `num_vehicles` nodes, and a
/// window inside `[0, 50]` on every node.
pub fn random_instance(seed: u64, num_nodes: usize, num_vehicles: usize) -> ProblemData {
    let mut rng = StdRng::seed_from_u64(seed);
    let time_matrix: Vec<Vec<i64>> = (0..num_nodes)
        .map(|i| {
            (0..num_nodes)
                .map(|j| if i == j { 0 } else { rng.random_range(1..=10) })
                .collect()
        })
        .collect();
    let time_windows: Vec<(i64, i64)> = (0..num_nodes)
        .map(|_| {
            let earliest: i64 = rng.random_range(0..=20);
            let latest = rng.random_range(earliest + 10..=50);
            (earliest, latest)
        })
        .collect();
    let depots: Vec<usize> = (0..num_vehicles).collect();
    ProblemData {
        time_matrix,
        time_windows,
        num_vehicles,
        starts: depots.clone(),
        ends: depots,
    }
}

/// Dimension parameters of the reference example.
pub fn reference_dimension() -> TimeDimensionConfig {
    TimeDimensionConfig::default()
}

/// Non-depot nodes served by the solution, sorted.
pub fn served_nodes(solution: &Solution) -> Vec<usize> {
    let mut nodes: Vec<usize> = solution
        .routes()
        .iter()
        .flat_map(|r| r.visited_nodes())
        .collect();
    nodes.sort_unstable();
    nodes
}

/// Checks the arc rule and the window rule on every stop; returns the first
/// violation found.
pub fn check_solution(
    data: &ProblemData,
    config: &TimeDimensionConfig,
    solution: &Solution,
) -> Result<(), String> {
    let is_depot = |n: usize| data.starts.contains(&n) || data.ends.contains(&n);
    for route in solution.routes() {
        for pair in route.stops().windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let c = data.time_matrix[a.node][b.node];
            if b.cumul_min < a.cumul_min + c {
                return Err(format!("arc {} -> {}: min bound too low", a.node, b.node));
            }
            if b.cumul_max > a.cumul_max + c + config.allow_wait_time {
                return Err(format!("arc {} -> {}: max bound too high", a.node, b.node));
            }
        }
        for stop in route.stops() {
            if stop.cumul_min > stop.cumul_max {
                return Err(format!("empty bounds at node {}", stop.node));
            }
            if stop.cumul_max > config.vehicle_max_time {
                return Err(format!("node {} exceeds the horizon", stop.node));
            }
            if !is_depot(stop.node) {
                let (e, l) = data.time_windows[stop.node];
                if stop.cumul_min < e || stop.cumul_max > l {
                    return Err(format!("node {} violates its window", stop.node));
                }
            }
        }
    }
    Ok(())
}
