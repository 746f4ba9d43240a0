//! Warp path types for DTW alignment.

use std::fmt;

/// A cell of the cost grid: `x` indexes the first series, `y` the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    /// Index in the first time series.
    pub x: usize,
    /// Index in the second time series.
    pub y: usize,
}

impl Point {
    /// Create a grid point.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Point {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

/// An ordered sequence of unit steps from `(0, 0)` to `(len_a - 1, len_b - 1)`.
///
/// Renders as one text row per `y`, with `*` on path cells and `.` elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarpPath(Vec<Point>);

impl WarpPath {
    pub(crate) fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Return the path points in forward order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Return the number of points in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the path contains no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the final point, i.e. the far corner of the aligned grid.
    #[must_use]
    pub fn last(&self) -> Option<Point> {
        self.0.last().copied()
    }
}

impl<'a> IntoIterator for &'a WarpPath {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for WarpPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(corner) = self.last() else {
            return Ok(());
        };
        let width = corner.x + 1;
        let mut row = vec![b'.'; width];
        let mut points = self.0.iter().peekable();
        for y in 0..=corner.y {
            row.fill(b'.');
            while let Some(p) = points.next_if(|p| p.y == y) {
                row[p.x] = b'*';
            }
            // Row bytes are ASCII.
            f.write_str(std::str::from_utf8(&row).map_err(|_| fmt::Error)?)?;
            f.write_str("\n")?;
        }
        Ok(())
    }
}
