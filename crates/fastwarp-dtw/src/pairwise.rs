//! All-pairs FastDTW costs over a collection of series.

use rayon::prelude::*;
use tracing::instrument;

use crate::cost::WarpCost;
use crate::error::DtwError;
use crate::fastdtw::FastDtw;
use crate::metric::Metric;
use crate::series::TimeSeries;

/// Symmetric cost table for `n` series, stored as its strict lower triangle.
///
/// The pair `(i, j)` with `i > j` lives at `i * (i - 1) / 2 + j`. The
/// diagonal is implicitly zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseCosts {
    n: usize,
    lower: Vec<WarpCost>,
}

fn tri(i: usize, j: usize) -> usize {
    i * (i - 1) / 2 + j
}

impl PairwiseCosts {
    /// Return the number of series covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Return true if no series are covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Return the cost between series `i` and `j`; zero when `i == j`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is not below [`len`][Self::len].
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> WarpCost {
        assert!(
            i < self.n && j < self.n,
            "pair ({i}, {j}) out of bounds for {} series",
            self.n
        );
        match i.cmp(&j) {
            std::cmp::Ordering::Equal => WarpCost::new(0.0),
            std::cmp::Ordering::Greater => self.lower[tri(i, j)],
            std::cmp::Ordering::Less => self.lower[tri(j, i)],
        }
    }

    /// Iterate over every unordered pair as `(i, j, cost)` with `i > j`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, WarpCost)> + '_ {
        (1..self.n).flat_map(move |i| (0..i).map(move |j| (i, j, self.lower[tri(i, j)])))
    }
}

impl<M: Metric + Sync> FastDtw<M> {
    /// Align every unordered pair of `series` in parallel.
    ///
    /// Runs on the current rayon pool; results are independent of its size.
    ///
    /// # Errors
    ///
    /// Returns the first [`DtwError`] raised by any pair, e.g.
    /// [`DtwError::EmptySeries`] if a series has no samples.
    #[instrument(skip_all, fields(n = series.len(), radius = self.radius()))]
    pub fn pairwise<S: TimeSeries + Sync>(&self, series: &[S]) -> Result<PairwiseCosts, DtwError> {
        let n = series.len();
        let pairs: Vec<(usize, usize)> = (1..n).flat_map(|i| (0..i).map(move |j| (i, j))).collect();
        let lower = pairs
            .par_iter()
            .map(|&(i, j)| self.align(&series[i], &series[j]).map(|a| a.cost))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PairwiseCosts { n, lower })
    }
}
