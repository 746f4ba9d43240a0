//! Multiresolution FastDTW approximation.
//!
//! Both series are halved until the shorter one fits within `radius + 2`
//! samples, solved exactly there, and the coarse path is projected back up one
//! level at a time as a [`CustomWindow`] dilated by `radius`. Each level runs the
//! constrained engine over that window, so work and memory stay proportional to
//! the window area rather than `n * m`.

use tracing::{debug, instrument};

use crate::downsample::downsample;
use crate::dtw::{Alignment, constrained_dtw, full_dtw};
use crate::error::DtwError;
use crate::matrix::WindowMatrix;
use crate::metric::{Euclidean, Metric};
use crate::path::{Point, WarpPath};
use crate::series::TimeSeries;
use crate::window::{CustomWindow, Window};

/// Downsampling factor between resolution levels.
const FACTOR: usize = 2;

/// FastDTW calculator.
///
/// # Examples
///
/// ```
/// use fastwarp_dtw::{FastDtw, ScalarSeries};
///
/// let a = ScalarSeries::new(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// let b = ScalarSeries::new(vec![0.0, 0.0, 1.0, 2.0, 4.0, 5.0]).unwrap();
/// let result = FastDtw::new(1).align(&a, &b).unwrap();
/// assert_eq!(result.cost.value(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FastDtw<M = Euclidean> {
    radius: usize,
    metric: M,
}

impl FastDtw {
    /// Create a FastDTW calculator with the given search radius and the
    /// [`Euclidean`] metric.
    #[must_use]
    pub fn new(radius: usize) -> Self {
        Self {
            radius,
            metric: Euclidean,
        }
    }
}

impl<M> FastDtw<M> {
    /// Replace the per-sample metric.
    #[must_use]
    pub fn with_metric<N: Metric>(self, metric: N) -> FastDtw<N> {
        FastDtw {
            radius: self.radius,
            metric,
        }
    }

    /// Return the search radius.
    #[must_use]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Return the per-sample metric.
    #[must_use]
    pub fn metric(&self) -> &M {
        &self.metric
    }
}

impl<M: Metric> FastDtw<M> {
    /// Approximate the optimal alignment of `a` and `b`.
    ///
    /// The returned cost is never below the exact DTW cost, and equals it once
    /// the radius is large enough for the projected windows to cover the grid.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptySeries`] | Either series has no samples |
    /// | [`DtwError::DisconnectedWindow`] | A projected window is not path-connected |
    #[instrument(skip_all, fields(len_a = a.len(), len_b = b.len(), radius = self.radius))]
    pub fn align<A, B>(&self, a: &A, b: &B) -> Result<Alignment, DtwError>
    where
        A: TimeSeries + ?Sized,
        B: TimeSeries + ?Sized,
    {
        if a.is_empty() || b.is_empty() {
            return Err(DtwError::EmptySeries);
        }
        let mut matrix = WindowMatrix::default();
        self.align_level(a, b, &mut matrix, 0)
    }

    fn align_level<A, B>(
        &self,
        a: &A,
        b: &B,
        matrix: &mut WindowMatrix,
        depth: usize,
    ) -> Result<Alignment, DtwError>
    where
        A: TimeSeries + ?Sized,
        B: TimeSeries + ?Sized,
    {
        let min_size = self.radius + 2;
        if a.len() <= min_size || b.len() <= min_size {
            debug!(depth, len_a = a.len(), len_b = b.len(), "exact base case");
            return full_dtw(a, b, &self.metric);
        }

        let coarse_a = downsample(a, FACTOR)?;
        let coarse_b = downsample(b, FACTOR)?;
        let coarse = self.align_level(&coarse_a, &coarse_b, matrix, depth + 1)?;

        let window = project_window(&coarse.path, a.len(), b.len(), FACTOR, self.radius)?;
        debug!(
            depth,
            len_a = a.len(),
            len_b = b.len(),
            area = window.area(),
            "constrained level"
        );
        constrained_dtw(a, b, &window, Some(matrix), &self.metric)
    }
}

/// Project a path found on series downsampled by `factor` onto a
/// `len_a x len_b` grid, then dilate it by `radius`.
///
/// Each coarse cell covers a `factor x factor` block of fine cells. Coarse
/// diagonal steps also mark the two fine cells flanking the block corner so
/// the projected region stays connected before dilation.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`DtwError::ZeroFactor`] | `factor` is zero |
/// | [`DtwError::EmptyWindow`] | Either length is zero |
pub fn project_window(
    path: &WarpPath,
    len_a: usize,
    len_b: usize,
    factor: usize,
    radius: usize,
) -> Result<CustomWindow, DtwError> {
    if factor == 0 {
        return Err(DtwError::ZeroFactor);
    }
    let mut window = CustomWindow::new(len_a, len_b)?;
    let last_x = len_a - 1;
    let last_y = len_b - 1;

    let mut anchor = Point::new(0, 0);
    let mut prev: Option<Point> = None;
    for &p in path {
        if let Some(prev) = prev {
            let step_x = p.x > prev.x;
            let step_y = p.y > prev.y;
            if step_x {
                anchor.x += factor;
            }
            if step_y {
                anchor.y += factor;
            }
            if step_x && step_y {
                window.mark((anchor.x - 1).min(last_x), anchor.y.min(last_y));
                window.mark(anchor.x.min(last_x), (anchor.y - 1).min(last_y));
            }
        }
        let left = anchor.x.min(last_x);
        let right = (anchor.x + factor - 1).min(last_x);
        for y in (anchor.y..anchor.y + factor).take_while(|&y| y < len_b) {
            window.mark(left, y);
            window.mark(right, y);
        }
        prev = Some(p);
    }

    window.expand(radius);
    Ok(window)
}
