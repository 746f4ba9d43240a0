//! Admissible regions of the cost grid.
//!
//! A [`Window`] assigns every row `y` (an index into the second series) either
//! a closed interval of admissible columns (indices into the first series) or
//! nothing. Three shapes are provided:
//!
//! - [`SakoeChibaWindow`]: a fixed diagonal band, independent of the data.
//! - [`FullWindow`]: every cell admissible.
//! - [`CustomWindow`]: built by marking cells, then dilated by a radius.

use std::fmt;

use crate::error::DtwError;

/// Closed interval `[min, max]` of admissible columns for one row.
///
/// Always non-empty; an unset row is `None` at the [`Window`] level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRange {
    /// First admissible column.
    pub min: usize,
    /// Last admissible column.
    pub max: usize,
}

impl ColumnRange {
    /// Create the interval `[min, max]`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    #[must_use]
    pub fn new(min: usize, max: usize) -> Self {
        assert!(min <= max, "column range [{min}, {max}] is inverted");
        Self { min, max }
    }

    /// Return the number of columns in the interval.
    #[must_use]
    pub fn size(&self) -> usize {
        self.max - self.min + 1
    }

    /// Return true if `x` lies inside the interval.
    #[must_use]
    pub fn contains(&self, x: usize) -> bool {
        self.min <= x && x <= self.max
    }

    fn hull(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// Inclusive bounding rectangle of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// First column.
    pub min_x: usize,
    /// Last column.
    pub max_x: usize,
    /// First row.
    pub min_y: usize,
    /// Last row.
    pub max_y: usize,
}

/// The set of grid cells eligible during alignment, one column interval per row.
pub trait Window {
    /// Return the admissible columns of row `y`, or `None` if the row is empty
    /// or lies outside the window.
    fn range(&self, y: usize) -> Option<ColumnRange>;

    /// Return the bounding rectangle.
    fn rect(&self) -> Rect;

    /// Return the total number of admissible cells.
    fn area(&self) -> usize {
        let rect = self.rect();
        (rect.min_y..=rect.max_y)
            .filter_map(|y| self.range(y))
            .map(|r| r.size())
            .sum()
    }
}

/// Sakoe-Chiba band over a `size x size` grid: row `y` admits columns within
/// `2 * width` of `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SakoeChibaWindow {
    size: usize,
    width: usize,
}

impl SakoeChibaWindow {
    /// Create a band over a `size x size` grid.
    ///
    /// # Errors
    ///
    /// Returns [`DtwError::EmptyWindow`] if `size` is zero.
    pub fn new(size: usize, width: usize) -> Result<Self, DtwError> {
        if size == 0 {
            return Err(DtwError::EmptyWindow { width: 0, height: 0 });
        }
        Ok(Self { size, width })
    }
}

impl Window for SakoeChibaWindow {
    fn range(&self, y: usize) -> Option<ColumnRange> {
        if y >= self.size {
            return None;
        }
        let reach = self.width * 2;
        Some(ColumnRange::new(
            y.saturating_sub(reach),
            (y + reach).min(self.size - 1),
        ))
    }

    fn rect(&self) -> Rect {
        Rect {
            min_x: 0,
            max_x: self.size - 1,
            min_y: 0,
            max_y: self.size - 1,
        }
    }
}

/// Unconstrained window: every cell of a `width x height` grid is admissible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullWindow {
    width: usize,
    height: usize,
}

impl FullWindow {
    /// Create a window covering `width` columns and `height` rows.
    ///
    /// # Errors
    ///
    /// Returns [`DtwError::EmptyWindow`] if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, DtwError> {
        if width == 0 || height == 0 {
            return Err(DtwError::EmptyWindow { width, height });
        }
        Ok(Self { width, height })
    }
}

impl Window for FullWindow {
    fn range(&self, y: usize) -> Option<ColumnRange> {
        (y < self.height).then(|| ColumnRange::new(0, self.width - 1))
    }

    fn rect(&self) -> Rect {
        Rect {
            min_x: 0,
            max_x: self.width - 1,
            min_y: 0,
            max_y: self.height - 1,
        }
    }

    fn area(&self) -> usize {
        self.width * self.height
    }
}

/// Window assembled cell by cell, then dilated with [`CustomWindow::expand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomWindow {
    width: usize,
    rows: Vec<Option<ColumnRange>>,
}

impl CustomWindow {
    /// Create a `width x height` window with every row empty.
    ///
    /// # Errors
    ///
    /// Returns [`DtwError::EmptyWindow`] if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, DtwError> {
        if width == 0 || height == 0 {
            return Err(DtwError::EmptyWindow { width, height });
        }
        Ok(Self {
            width,
            rows: vec![None; height],
        })
    }

    /// Widen row `y` to include column `x`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the grid.
    pub fn mark(&mut self, x: usize, y: usize) {
        assert!(
            x < self.width && y < self.rows.len(),
            "cell ({x}, {y}) outside {}x{} window",
            self.width,
            self.rows.len()
        );
        let cell = ColumnRange { min: x, max: x };
        let row = &mut self.rows[y];
        *row = Some(row.map_or(cell, |r| r.hull(cell)));
    }

    /// Dilate the marked region by `radius` cells in every direction.
    ///
    /// Every cell within Chebyshev distance `radius` of a marked cell becomes
    /// admissible, clamped to the grid. Rows out of reach of any mark stay empty.
    pub fn expand(&mut self, radius: usize) {
        if radius == 0 {
            return;
        }
        let height = self.rows.len();
        let mut dilated: Vec<Option<ColumnRange>> = vec![None; height];
        for (y, row) in self.rows.iter().enumerate() {
            let Some(r) = row else { continue };
            let widened = ColumnRange {
                min: r.min.saturating_sub(radius),
                max: (r.max + radius).min(self.width - 1),
            };
            let last = (y + radius).min(height - 1);
            for target in &mut dilated[y.saturating_sub(radius)..=last] {
                *target = Some(target.map_or(widened, |t| t.hull(widened)));
            }
        }
        self.rows = dilated;
    }
}

impl Window for CustomWindow {
    fn range(&self, y: usize) -> Option<ColumnRange> {
        self.rows.get(y).copied().flatten()
    }

    fn rect(&self) -> Rect {
        Rect {
            min_x: 0,
            max_x: self.width - 1,
            min_y: 0,
            max_y: self.rows.len() - 1,
        }
    }
}

/// Check that a monotone unit-step path exists through `window` from
/// `(min_x, min_y)` to `(max_x, max_y)` and that every admissible cell has an
/// admissible predecessor.
///
/// # Errors
///
/// Returns [`DtwError::DisconnectedWindow`] naming the first offending row:
/// an empty row, a first row that does not start at `min_x`, a row starting
/// left of the previous row's start or more than one column past its end, or
/// a last row that does not reach `max_x`.
pub fn check_connected<W: Window + ?Sized>(window: &W) -> Result<(), DtwError> {
    let rect = window.rect();
    let mut prev: Option<ColumnRange> = None;
    for y in rect.min_y..=rect.max_y {
        let Some(cur) = window.range(y) else {
            return Err(DtwError::DisconnectedWindow { row: y });
        };
        let joined = match prev {
            None => cur.min == rect.min_x,
            Some(p) => cur.min >= p.min && cur.min <= p.max + 1,
        };
        if !joined {
            return Err(DtwError::DisconnectedWindow { row: y });
        }
        prev = Some(cur);
    }
    match prev {
        Some(last) if last.contains(rect.max_x) => Ok(()),
        _ => Err(DtwError::DisconnectedWindow { row: rect.max_y }),
    }
}

/// Text rendering of a window, see [`display_window`].
pub struct WindowDisplay<'a, W: ?Sized>(&'a W);

/// Render `window` as one text row per `y`: `' '` inside the admissible range,
/// `'#'` outside.
pub fn display_window<W: Window + ?Sized>(window: &W) -> WindowDisplay<'_, W> {
    WindowDisplay(window)
}

impl<W: Window + ?Sized> fmt::Display for WindowDisplay<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rect = self.0.rect();
        for y in rect.min_y..=rect.max_y {
            let range = self.0.range(y);
            for x in rect.min_x..=rect.max_x {
                let inside = range.is_some_and(|r| r.contains(x));
                f.write_str(if inside { " " } else { "#" })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
