//! Closed integer interval used as a variable domain.

/// The feasible values `[min, max]` of a cumul variable.
///
/// # Examples
///
/// ```
/// use vrptw_engine::dimension::Domain;
///
/// let d = Domain::new(0, 50);
/// assert_eq!(d.intersect(Domain::new(60, 70)), None);
/// assert_eq!(d.intersect(Domain::new(10, 70)), Some(Domain::new(10, 50)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Domain {
    /// Smallest feasible value.
    pub min: i64,
    /// Largest feasible value.
    pub max: i64,
}

impl Domain {
    /// Creates a domain. Callers keep `min <= max`.
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Single-value domain.
    pub const fn fixed(value: i64) -> Self {
        Self::new(value, value)
    }

    /// Intersection with `other`, `None` if empty.
    pub fn intersect(self, other: Domain) -> Option<Domain> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        (min <= max).then_some(Domain { min, max })
    }

}

impl From<Domain> for (i64, i64) {
    fn from(d: Domain) -> Self {
        (d.min, d.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect_overlap() {
        let a = Domain::new(0, 30);
        let b = Domain::new(20, 50);
        assert_eq!(a.intersect(b), Some(Domain::new(20, 30)));
    }

    #[test]
    fn test_intersect_touching() {
        let a = Domain::new(0, 20);
        assert_eq!(a.intersect(Domain::new(20, 40)), Some(Domain::fixed(20)));
    }

    #[test]
    fn test_intersect_disjoint() {
        assert_eq!(Domain::new(0, 5).intersect(Domain::new(6, 9)), None);
    }

    #[test]
    fn test_into_bounds() {
        let bounds: (i64, i64) = Domain::fixed(4).into();
        assert_eq!(bounds, (4, 4));
    }
}
