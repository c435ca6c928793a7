//! Row-major 2D grids.

/// A dense 2D grid of `f64` values in row-major order.
///
/// Row `r`, column `c` lives at `data[r * cols + c]`.
#[derive(Debug, Clone)]
pub struct Grid {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Create a grid with every cell set to `fill_value`.
    pub fn filled(rows: usize, cols: usize, fill_value: f64) -> Self {
        Self {
            data: vec![fill_value; rows * cols],
            rows,
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Grid shape as (rows, cols).
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if grid is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the 1D index for a (row, col) position.
    pub fn flat_index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row * self.cols + col)
    }

    /// Get the value at a grid position.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.flat_index(row, col).map(|i| self.data[i])
    }

    /// Set the value at a grid position. Returns false if out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> bool {
        match self.flat_index(row, col) {
            Some(i) => {
                self.data[i] = value;
                true
            }
            None => false,
        }
    }

    /// One grid row as a slice.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.data[start..start + self.cols])
    }

    pub fn values(&self) -> &[f64] {
        &self.data
    }

    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_values(self) -> Vec<f64> {
        self.data
    }

    /// Count cells that differ from `fill_value` (NaN-aware).
    pub fn count_populated(&self, fill_value: f64) -> usize {
        self.data
            .iter()
            .filter(|&&v| !same_value(v, fill_value))
            .count()
    }

    /// Check whether every cell equals `fill_value` (NaN-aware).
    pub fn is_all(&self, fill_value: f64) -> bool {
        self.data.iter().all(|&v| same_value(v, fill_value))
    }
}

/// Equality that treats NaN as equal to NaN.
#[inline]
pub fn same_value(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_grid() {
        let grid = Grid::filled(3, 4, -9999.0);
        assert_eq!(grid.shape(), (3, 4));
        assert_eq!(grid.len(), 12);
        assert!(grid.is_all(-9999.0));
        assert_eq!(grid.count_populated(-9999.0), 0);
    }

    #[test]
    fn test_nan_fill_is_all_nan() {
        let grid = Grid::filled(2, 2, f64::NAN);
        assert!(grid.values().iter().all(|v| v.is_nan()));
        assert!(grid.is_all(f64::NAN));
    }

    #[test]
    fn test_get_set_row_major() {
        let mut grid = Grid::filled(3, 3, f64::NAN);
        assert!(grid.set(1, 2, 7.5));
        assert_eq!(grid.get(1, 2), Some(7.5));
        assert_eq!(grid.values()[5], 7.5);
        assert_eq!(grid.count_populated(f64::NAN), 1);

        assert!(!grid.set(3, 0, 1.0));
        assert_eq!(grid.get(0, 3), None);
    }

    #[test]
    fn test_row_slice() {
        let mut grid = Grid::filled(2, 3, 0.0);
        grid.set(1, 0, 1.0);
        grid.set(1, 2, 3.0);
        assert_eq!(grid.row(1), Some(&[1.0, 0.0, 3.0][..]));
        assert!(grid.row(2).is_none());
    }
}
