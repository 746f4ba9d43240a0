//! Alignment cost newtype.

use std::cmp::Ordering;
use std::fmt;

/// Accumulated cost of a warp path. Non-negative for well-formed inputs.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct WarpCost(f64);

impl WarpCost {
    /// Cost of an unreachable cell.
    pub const INFINITY: Self = Self(f64::INFINITY);

    pub(crate) fn new(value: f64) -> Self {
        Self(value)
    }

    /// Return the raw cost value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Total ordering comparison using [`f64::total_cmp`].
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for WarpCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_has_six_decimals() {
        assert_eq!(WarpCost::new(2.5).to_string(), "2.500000");
    }

    #[test]
    fn infinity_sorts_last() {
        let finite = WarpCost::new(1e300);
        assert_eq!(finite.total_cmp(&WarpCost::INFINITY), Ordering::Less);
        assert!(WarpCost::INFINITY > finite);
    }
}
