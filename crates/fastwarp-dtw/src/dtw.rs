//! Exact and window-constrained DTW engines.

use tracing::instrument;

use crate::cost::WarpCost;
use crate::error::DtwError;
use crate::matrix::WindowMatrix;
use crate::metric::{Euclidean, Metric};
use crate::path::{Point, WarpPath};
use crate::series::TimeSeries;
use crate::window::{Window, check_connected};

/// Optimal warp path together with its accumulated cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// Accumulated cost at the far corner of the grid.
    pub cost: WarpCost,
    /// Path from `(0, 0)` to the far corner, in forward order.
    pub path: WarpPath,
}

/// Exact DTW calculator. Immutable, cheap to copy for `Copy` metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dtw<M = Euclidean> {
    metric: M,
}

impl Dtw {
    /// Create a DTW calculator using the [`Euclidean`] metric.
    #[must_use]
    pub fn new() -> Self {
        Self { metric: Euclidean }
    }
}

impl Default for Dtw {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Dtw<M> {
    /// Replace the per-sample metric.
    #[must_use]
    pub fn with_metric<N: Metric>(self, metric: N) -> Dtw<N> {
        Dtw { metric }
    }

    /// Return the per-sample metric.
    #[must_use]
    pub fn metric(&self) -> &M {
        &self.metric
    }
}

impl<M: Metric> Dtw<M> {
    /// Align two series over the full `len_a x len_b` grid.
    ///
    /// Runs in O(n * m) time and space and reconstructs the optimal path.
    /// Use [`warp_distance`][Dtw::warp_distance] when only the cost is needed.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptySeries`] | Either series has no samples |
    #[instrument(skip_all, fields(len_a = a.len(), len_b = b.len()))]
    pub fn align<A, B>(&self, a: &A, b: &B) -> Result<Alignment, DtwError>
    where
        A: TimeSeries + ?Sized,
        B: TimeSeries + ?Sized,
    {
        full_dtw(a, b, &self.metric)
    }

    /// Compute the optimal alignment cost without a path.
    ///
    /// Keeps two rows sized to the shorter series, so it needs
    /// O(min(n, m)) memory. The result is bit-identical to the cost returned
    /// by [`align`][Dtw::align].
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptySeries`] | Either series has no samples |
    #[instrument(skip_all, fields(len_a = a.len(), len_b = b.len()))]
    pub fn warp_distance<A, B>(&self, a: &A, b: &B) -> Result<WarpCost, DtwError>
    where
        A: TimeSeries + ?Sized,
        B: TimeSeries + ?Sized,
    {
        if a.is_empty() || b.is_empty() {
            return Err(DtwError::EmptySeries);
        }
        let metric = &self.metric;
        let cost = if a.len() <= b.len() {
            rolling_cost(a.len(), b.len(), |x, y| {
                metric.distance(a.sample(x), b.sample(y))
            })
        } else {
            // Transposed grid: the recurrence is symmetric in x and y, so
            // every cell holds the same value.
            rolling_cost(b.len(), a.len(), |y, x| {
                metric.distance(a.sample(x), b.sample(y))
            })
        };
        Ok(WarpCost::new(cost))
    }

    /// Align two series considering only the cells admitted by `window`.
    ///
    /// The window's rectangle must start at `(0, 0)` and fit inside both
    /// series; the path ends at its `(max_x, max_y)` corner. When `matrix` is
    /// supplied it is reset to `window` and reused, otherwise a fresh one is
    /// allocated.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptySeries`] | Either series has no samples |
    /// | [`DtwError::WindowShape`] | The window does not start at the origin or overruns a series |
    /// | [`DtwError::DisconnectedWindow`] | Some admissible cell would have no admissible predecessor |
    #[instrument(skip_all, fields(len_a = a.len(), len_b = b.len(), area = window.area()))]
    pub fn constrained<A, B, W>(
        &self,
        a: &A,
        b: &B,
        window: &W,
        matrix: Option<&mut WindowMatrix>,
    ) -> Result<Alignment, DtwError>
    where
        A: TimeSeries + ?Sized,
        B: TimeSeries + ?Sized,
        W: Window + ?Sized,
    {
        constrained_dtw(a, b, window, matrix, &self.metric)
    }
}

pub(crate) fn full_dtw<A, B, M>(a: &A, b: &B, metric: &M) -> Result<Alignment, DtwError>
where
    A: TimeSeries + ?Sized,
    B: TimeSeries + ?Sized,
    M: Metric + ?Sized,
{
    let n = a.len();
    let m = b.len();
    if n == 0 || m == 0 {
        return Err(DtwError::EmptySeries);
    }

    // Row-major by y: cell (x, y) lives at y * n + x.
    let mut grid = vec![0.0_f64; n * m];
    grid[0] = metric.distance(a.sample(0), b.sample(0));
    for x in 1..n {
        grid[x] = grid[x - 1] + metric.distance(a.sample(x), b.sample(0));
    }
    for y in 1..m {
        let row = y * n;
        grid[row] = grid[row - n] + metric.distance(a.sample(0), b.sample(y));
        for x in 1..n {
            let idx = row + x;
            let best = grid[idx - 1].min(grid[idx - n]).min(grid[idx - n - 1]);
            grid[idx] = best + metric.distance(a.sample(x), b.sample(y));
        }
    }

    let path = trace_back(Point::new(n - 1, m - 1), |x, y| grid[y * n + x]);
    Ok(Alignment {
        cost: WarpCost::new(grid[n * m - 1]),
        path,
    })
}

pub(crate) fn constrained_dtw<A, B, W, M>(
    a: &A,
    b: &B,
    window: &W,
    matrix: Option<&mut WindowMatrix>,
    metric: &M,
) -> Result<Alignment, DtwError>
where
    A: TimeSeries + ?Sized,
    B: TimeSeries + ?Sized,
    W: Window + ?Sized,
    M: Metric + ?Sized,
{
    if a.is_empty() || b.is_empty() {
        return Err(DtwError::EmptySeries);
    }
    let rect = window.rect();
    if rect.min_x != 0 || rect.min_y != 0 || rect.max_x >= a.len() || rect.max_y >= b.len() {
        return Err(DtwError::WindowShape {
            min_x: rect.min_x,
            max_x: rect.max_x,
            min_y: rect.min_y,
            max_y: rect.max_y,
            len_a: a.len(),
            len_b: b.len(),
        });
    }
    check_connected(window)?;

    let mut owned;
    let grid = match matrix {
        Some(m) => {
            m.reset(window);
            m
        }
        None => {
            owned = WindowMatrix::new(window);
            &mut owned
        }
    };

    for y in 0..=rect.max_y {
        let Some(range) = window.range(y) else {
            return Err(DtwError::DisconnectedWindow { row: y });
        };
        for x in range.min..=range.max {
            let best = if x == 0 && y == 0 {
                0.0
            } else {
                let left = if x > 0 { grid.get(x - 1, y) } else { f64::INFINITY };
                let down = if y > 0 { grid.get(x, y - 1) } else { f64::INFINITY };
                let diag = if x > 0 && y > 0 {
                    grid.get(x - 1, y - 1)
                } else {
                    f64::INFINITY
                };
                left.min(down).min(diag)
            };
            grid.set(x, y, best + metric.distance(a.sample(x), b.sample(y)));
        }
    }

    let corner = Point::new(rect.max_x, rect.max_y);
    let path = trace_back(corner, |x, y| grid.get(x, y));
    Ok(Alignment {
        cost: WarpCost::new(grid.get(corner.x, corner.y)),
        path,
    })
}

/// Two-row DTW over a `cols x rows` grid, returning the corner cost.
fn rolling_cost(cols: usize, rows: usize, cost: impl Fn(usize, usize) -> f64) -> f64 {
    let mut prev = vec![0.0_f64; cols];
    let mut curr = vec![0.0_f64; cols];

    curr[0] = cost(0, 0);
    for x in 1..cols {
        curr[x] = curr[x - 1] + cost(x, 0);
    }
    for y in 1..rows {
        std::mem::swap(&mut prev, &mut curr);
        curr[0] = prev[0] + cost(0, y);
        for x in 1..cols {
            let best = curr[x - 1].min(prev[x]).min(prev[x - 1]);
            curr[x] = best + cost(x, y);
        }
    }
    curr[cols - 1]
}

/// Walk back from `corner` to `(0, 0)` over accumulated costs.
///
/// Prefers the diagonal when it is no worse than either neighbour, then a
/// strictly cheaper left or down step; a left/down tie steps toward the main
/// diagonal (left when `x <= y`, down otherwise).
fn trace_back(corner: Point, cost: impl Fn(usize, usize) -> f64) -> WarpPath {
    let Point { mut x, mut y } = corner;
    let mut points = vec![corner];
    while x > 0 || y > 0 {
        let diag = if x > 0 && y > 0 { cost(x - 1, y - 1) } else { f64::INFINITY };
        let left = if x > 0 { cost(x - 1, y) } else { f64::INFINITY };
        let down = if y > 0 { cost(x, y - 1) } else { f64::INFINITY };

        if diag <= left && diag <= down {
            x -= 1;
            y -= 1;
        } else if left < diag && left < down {
            x -= 1;
        } else if down < diag && down < left {
            y -= 1;
        } else if x <= y {
            x -= 1;
        } else {
            y -= 1;
        }
        points.push(Point::new(x, y));
    }
    points.reverse();
    WarpPath::new(points)
}
