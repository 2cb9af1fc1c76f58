//! Time window type.

use serde::{Deserialize, Serialize};

/// An arrival-time constraint at a node.
///
/// The cumulative time at the node must lie in `[earliest, latest]`. A vehicle
/// arriving before `earliest` waits, provided the dimension's slack allows it.
///
/// # Examples
///
/// ```
/// use vrptw_engine::models::TimeWindow;
///
/// let tw = TimeWindow::new(10, 20).unwrap();
/// assert_eq!(tw.earliest(), 10);
/// assert_eq!(tw.latest(), 20);
/// assert!(TimeWindow::new(20, 10).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(i64, i64)", into = "(i64, i64)")]
pub struct TimeWindow {
    earliest: i64,
    latest: i64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `earliest > latest`.
    pub fn new(earliest: i64, latest: i64) -> Option<Self> {
        if earliest > latest {
            return None;
        }
        Some(Self { earliest, latest })
    }

    /// Earliest allowed cumulative time.
    pub fn earliest(&self) -> i64 {
        self.earliest
    }

    /// Latest allowed cumulative time.
    pub fn latest(&self) -> i64 {
        self.latest
    }
}

impl TryFrom<(i64, i64)> for TimeWindow {
    type Error = String;

    fn try_from((earliest, latest): (i64, i64)) -> Result<Self, Self::Error> {
        Self::new(earliest, latest)
            .ok_or_else(|| format!("inverted time window ({earliest}, {latest})"))
    }
}

impl From<TimeWindow> for (i64, i64) {
    fn from(tw: TimeWindow) -> Self {
        (tw.earliest, tw.latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_valid() {
        let tw = TimeWindow::new(10, 20).expect("valid");
        assert_eq!(tw.earliest(), 10);
        assert_eq!(tw.latest(), 20);
    }

    #[test]
    fn test_time_window_degenerate() {
        let tw = TimeWindow::new(7, 7).expect("valid");
        assert_eq!((tw.earliest(), tw.latest()), (7, 7));
    }

    #[test]
    fn test_time_window_invalid() {
        assert!(TimeWindow::new(20, 10).is_none());
    }

    #[test]
    fn test_time_window_try_from_tuple() {
        assert!(TimeWindow::try_from((0, 50)).is_ok());
        assert!(TimeWindow::try_from((60, 50)).is_err());
    }
}
