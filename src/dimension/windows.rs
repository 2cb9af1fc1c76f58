//! Installation of time windows on cumul variables.

use log::debug;

use super::CumulDimension;
use crate::error::{ConfigError, RoutingError};
use crate::models::{IndexManager, TimeWindow};

impl CumulDimension {
    /// Restricts the cumul of every visit to `node` to `[earliest, latest]`.
    ///
    /// Start and end indices are exempt, so windows on depots are ignored.
    /// Fails with [`ConfigError::WindowNodeOutOfRange`] for an unknown node and
    /// with [`RoutingError::InfeasibleModel`] if the window does not meet the
    /// bounds already in force.
    pub fn apply_window(
        &mut self,
        manager: &IndexManager,
        node: usize,
        earliest: i64,
        latest: i64,
    ) -> Result<(), RoutingError> {
        if earliest > latest {
            return Err(ConfigError::InvertedWindow {
                node,
                earliest,
                latest,
            }
            .into());
        }
        if node >= manager.num_nodes() {
            return Err(ConfigError::WindowNodeOutOfRange {
                node,
                num_nodes: manager.num_nodes(),
            }
            .into());
        }
        let Some(index) = manager.node_to_index(node) else {
            debug!("skipping time window on depot node {node}");
            return Ok(());
        };
        let current = self.domain(index);
        self.narrow(index, earliest, latest)
            .map_err(|_| RoutingError::InfeasibleModel {
                node,
                earliest,
                latest,
                min: current.min,
                max: current.max,
            })
    }

    /// Applies one window per node, skipping depots.
    pub fn install_windows(
        &mut self,
        manager: &IndexManager,
        windows: &[TimeWindow],
    ) -> Result<(), RoutingError> {
        for (node, tw) in windows.iter().enumerate() {
            self.apply_window(manager, node, tw.earliest(), tw.latest())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::TimeDimensionConfig;
    use crate::dimension::{CumulDimension, Domain};
    use crate::error::{ConfigError, RoutingError};
    use crate::models::{IndexManager, TimeWindow};

    fn setup() -> (IndexManager, CumulDimension) {
        let manager = IndexManager::new(4, 2, &[0, 3], &[0, 3]).expect("valid");
        let dim = CumulDimension::new(&manager, &TimeDimensionConfig::default()).expect("valid");
        (manager, dim)
    }

    #[test]
    fn test_apply_window_narrows_visit() {
        let (m, mut dim) = setup();
        dim.apply_window(&m, 1, 10, 20).expect("feasible");
        let idx = m.node_to_index(1).expect("visitable");
        assert_eq!(dim.domain(idx), Domain::new(10, 20));
    }

    #[test]
    fn test_apply_window_intersects_capacity() {
        let (m, mut dim) = setup();
        dim.apply_window(&m, 2, 40, 90).expect("feasible");
        let idx = m.node_to_index(2).expect("visitable");
        assert_eq!(dim.domain(idx), Domain::new(40, 50));
    }

    #[test]
    fn test_apply_window_beyond_capacity() {
        let (m, mut dim) = setup();
        assert_eq!(
            dim.apply_window(&m, 1, 60, 70),
            Err(RoutingError::InfeasibleModel {
                node: 1,
                earliest: 60,
                latest: 70,
                min: 0,
                max: 50
            })
        );
    }

    #[test]
    fn test_apply_window_skips_depots() {
        let (m, mut dim) = setup();
        dim.apply_window(&m, 3, 60, 70).expect("depots are exempt");
        assert_eq!(dim.domain(m.start_index(1)), Domain::new(0, 50));
        assert_eq!(dim.domain(m.end_index(1)), Domain::new(0, 50));
    }

    #[test]
    fn test_apply_window_unknown_node() {
        let (m, mut dim) = setup();
        let before = dim.domains().to_vec();
        assert_eq!(
            dim.apply_window(&m, 99, 60, 70),
            Err(RoutingError::Config(ConfigError::WindowNodeOutOfRange {
                node: 99,
                num_nodes: 4
            }))
        );
        assert_eq!(
            dim.apply_window(&m, 4, 0, 10),
            Err(RoutingError::Config(ConfigError::WindowNodeOutOfRange {
                node: 4,
                num_nodes: 4
            }))
        );
        assert_eq!(dim.domains(), &before[..]);
    }

    #[test]
    fn test_apply_window_inverted() {
        let (m, mut dim) = setup();
        assert!(matches!(
            dim.apply_window(&m, 1, 20, 10),
            Err(RoutingError::Config(ConfigError::InvertedWindow { .. }))
        ));
    }

    #[test]
    fn test_install_windows() {
        let (m, mut dim) = setup();
        let windows: Vec<TimeWindow> = [(0, 50), (5, 15), (20, 30), (0, 0)]
            .iter()
            .map(|&(e, l)| TimeWindow::new(e, l).expect("valid"))
            .collect();
        dim.install_windows(&m, &windows).expect("feasible");
        assert_eq!(
            dim.domain(m.node_to_index(2).expect("visitable")),
            Domain::new(20, 30)
        );
        // Node 3 is a depot, its (0, 0) window is ignored.
        assert_eq!(dim.domain(m.start_index(1)), Domain::new(0, 50));
    }
}
