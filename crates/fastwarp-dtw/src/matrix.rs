//! Cost storage restricted to a window's admissible cells.

use crate::window::{ColumnRange, Window};

/// Row-indexed sparse cost grid backed by one flat vector.
///
/// Row `y` occupies the contiguous slice starting at `row_offsets[y - min_y]`,
/// one slot per admissible column. Reads outside the window return
/// `f64::INFINITY`; writes outside the window panic.
#[derive(Debug, Clone, Default)]
pub struct WindowMatrix {
    min_y: usize,
    ranges: Vec<Option<ColumnRange>>,
    row_offsets: Vec<usize>,
    values: Vec<f64>,
}

impl WindowMatrix {
    /// Allocate storage for exactly the admissible cells of `window`.
    #[must_use]
    pub fn new<W: Window + ?Sized>(window: &W) -> Self {
        let mut matrix = Self::default();
        matrix.reset(window);
        matrix
    }

    /// Re-target this matrix at `window`, reusing the backing storage when its
    /// capacity suffices. All cells read as unset (`f64::INFINITY`) afterwards.
    pub fn reset<W: Window + ?Sized>(&mut self, window: &W) {
        let rect = window.rect();
        self.min_y = rect.min_y;
        self.ranges.clear();
        self.row_offsets.clear();

        let mut offset = 0;
        for y in rect.min_y..=rect.max_y {
            let range = window.range(y);
            self.ranges.push(range);
            self.row_offsets.push(offset);
            offset += range.map_or(0, |r| r.size());
        }

        self.values.clear();
        self.values.resize(offset, f64::INFINITY);
    }

    /// Return the number of stored cells.
    #[must_use]
    pub fn area(&self) -> usize {
        self.values.len()
    }

    /// Return the number of cells the backing storage can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    fn slot(&self, x: usize, y: usize) -> Option<usize> {
        let row = y.checked_sub(self.min_y)?;
        let range = (*self.ranges.get(row)?)?;
        range
            .contains(x)
            .then(|| self.row_offsets[row] + (x - range.min))
    }

    /// Return the cost at `(x, y)`, or `f64::INFINITY` outside the window.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.slot(x, y).map_or(f64::INFINITY, |i| self.values[i])
    }

    /// Store `value` at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is not admissible in the window.
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        let Some(i) = self.slot(x, y) else {
            panic!("cell ({x}, {y}) is outside the window's admissible region");
        };
        self.values[i] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{CustomWindow, FullWindow, SakoeChibaWindow};

    #[test]
    fn storage_matches_window_area() {
        let w = SakoeChibaWindow::new(20, 2).unwrap();
        let m = WindowMatrix::new(&w);
        assert_eq!(m.area(), w.area());
    }

    #[test]
    fn set_then_get_round_trips_inside_window() {
        let mut w = CustomWindow::new(6, 3).unwrap();
        w.mark(0, 0);
        w.mark(2, 0);
        w.mark(2, 1);
        w.mark(4, 1);
        w.mark(5, 2);
        let mut m = WindowMatrix::new(&w);
        assert_eq!(m.area(), 3 + 3 + 1);

        m.set(1, 0, 1.5);
        m.set(4, 1, 2.5);
        m.set(5, 2, 3.5);
        assert_eq!(m.get(1, 0), 1.5);
        assert_eq!(m.get(4, 1), 2.5);
        assert_eq!(m.get(5, 2), 3.5);
    }

    #[test]
    fn reads_outside_window_are_infinite() {
        let mut w = CustomWindow::new(6, 3).unwrap();
        w.mark(2, 1);
        w.mark(3, 1);
        let m = WindowMatrix::new(&w);
        assert_eq!(m.get(1, 1), f64::INFINITY);
        assert_eq!(m.get(4, 1), f64::INFINITY);
        assert_eq!(m.get(2, 0), f64::INFINITY);
        assert_eq!(m.get(2, 7), f64::INFINITY);
    }

    #[test]
    #[should_panic(expected = "outside the window")]
    fn write_outside_window_panics() {
        let w = SakoeChibaWindow::new(10, 1).unwrap();
        let mut m = WindowMatrix::new(&w);
        m.set(9, 0, 1.0);
    }

    #[test]
    #[should_panic(expected = "outside the window")]
    fn write_to_empty_row_panics() {
        let mut w = CustomWindow::new(4, 3).unwrap();
        w.mark(0, 0);
        let mut m = WindowMatrix::new(&w);
        m.set(0, 1, 1.0);
    }

    #[test]
    fn reset_reuses_storage_and_clears_values() {
        let big = FullWindow::new(10, 10).unwrap();
        let mut m = WindowMatrix::new(&big);
        m.set(3, 3, 7.0);
        let capacity = m.capacity();

        let small = SakoeChibaWindow::new(10, 1).unwrap();
        m.reset(&small);
        assert_eq!(m.area(), small.area());
        assert_eq!(m.capacity(), capacity);
        assert_eq!(m.get(3, 3), f64::INFINITY);
        m.set(0, 2, 1.0);
        assert_eq!(m.get(0, 2), 1.0);
        assert_eq!(m.get(9, 0), f64::INFINITY);
    }
}
