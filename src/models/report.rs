//! Plain-text rendering of a solution.

use std::fmt;

use super::SolutionReader;

/// Formats a solution the way the console reporter prints it.
///
/// # Examples
///
/// ```
/// use vrptw_engine::models::{Route, RoutingIndex, Solution, SolutionReader, SolutionReport, Stop};
///
/// let mut route = Route::new(0);
/// route.push_stop(Stop { node: 0, index: RoutingIndex(1), cumul_min: 0, cumul_max: 44 });
/// route.push_stop(Stop { node: 1, index: RoutingIndex(0), cumul_min: 3, cumul_max: 47 });
/// route.push_stop(Stop { node: 0, index: RoutingIndex(2), cumul_min: 6, cumul_max: 50 });
/// route.set_transit_time(6);
/// let sol = Solution::new(vec![route], vec![(3, 47), (0, 44), (6, 50)], 6);
///
/// let text = SolutionReport::new(SolutionReader::new(&sol)).to_string();
/// assert!(text.contains("0 Time(0, 44) -> 1 Time(3, 47) -> 0 Time(6, 50)"));
/// assert!(text.contains("Total time of all routes: 6min"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SolutionReport<'a> {
    reader: SolutionReader<'a>,
}

impl<'a> SolutionReport<'a> {
    /// Creates a report over a solution reader.
    pub fn new(reader: SolutionReader<'a>) -> Self {
        Self { reader }
    }
}

impl fmt::Display for SolutionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Objective: {}", self.reader.objective())?;
        for vehicle in 0..self.reader.num_vehicles() {
            let Some(route) = self.reader.route(vehicle) else {
                continue;
            };
            writeln!(f, "Route for vehicle {vehicle}:")?;
            let stops: Vec<String> = route
                .stops()
                .iter()
                .map(|s| format!("{} Time({}, {})", s.node, s.cumul_min, s.cumul_max))
                .collect();
            writeln!(f, "{}", stops.join(" -> "))?;
            writeln!(f, "Time of the route: {}min", route.transit_time())?;
            writeln!(f)?;
        }
        write!(
            f,
            "Total time of all routes: {}min",
            self.reader.solution().total_transit_time()
        )
    }
}
