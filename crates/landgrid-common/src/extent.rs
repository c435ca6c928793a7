//! Extent of a regular coordinate plane.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};

/// Relative slack applied when dividing a span by the resolution, so that
/// spans like `0.3 / 0.1` count as three whole steps.
const STEP_TOLERANCE: f64 = 1e-9;

/// Most cells one `Vec<f64>` grid buffer can hold.
const MAX_CELLS: usize = isize::MAX as usize / std::mem::size_of::<f64>();

/// Axis-aligned bounds plus the cell size of a regular grid.
///
/// Both endpoints are grid points, so a global plane at 0.5 degrees has
/// 721 columns and 361 rows. Row 0 sits at `y_min`, column 0 at `x_min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extent {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
    pub resolution: f64,
}

impl Extent {
    /// Create a new extent from bounds and resolution.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64, resolution: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
            resolution,
        }
    }

    /// Global lon/lat plane (-180..180, -90..90) at the given resolution.
    pub fn global(resolution: f64) -> Self {
        Self::new(-180.0, -90.0, 180.0, 90.0, resolution)
    }

    /// Check that the bounds and resolution describe a usable grid.
    pub fn validate(&self) -> GridResult<()> {
        let values = [
            ("x_min", self.x_min),
            ("y_min", self.y_min),
            ("x_max", self.x_max),
            ("y_max", self.y_max),
            ("resolution", self.resolution),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(GridError::invalid_extent(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        if self.resolution <= 0.0 {
            return Err(GridError::invalid_extent(format!(
                "resolution must be > 0, got {}",
                self.resolution
            )));
        }
        if self.x_max <= self.x_min {
            return Err(GridError::invalid_extent(format!(
                "x_max ({}) must be greater than x_min ({})",
                self.x_max, self.x_min
            )));
        }
        if self.y_max <= self.y_min {
            return Err(GridError::invalid_extent(format!(
                "y_max ({}) must be greater than y_min ({})",
                self.y_max, self.y_min
            )));
        }

        let rows = steps(self.height(), self.resolution);
        let cols = steps(self.width(), self.resolution);
        let cells = rows.zip(cols).and_then(|(r, c)| r.checked_mul(c));
        if !cells.is_some_and(|n| n <= MAX_CELLS) {
            return Err(GridError::invalid_extent(format!(
                "{} x {} at resolution {} exceeds {} grid cells",
                self.width(),
                self.height(),
                self.resolution,
                MAX_CELLS
            )));
        }

        Ok(())
    }

    /// Width of the extent in coordinate units.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height of the extent in coordinate units.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Number of grid rows (points along y, both endpoints included).
    pub fn rows(&self) -> usize {
        steps(self.height(), self.resolution).unwrap_or(0)
    }

    /// Number of grid columns (points along x, both endpoints included).
    pub fn cols(&self) -> usize {
        steps(self.width(), self.resolution).unwrap_or(0)
    }

    /// Grid shape as (rows, cols).
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// X coordinate of every column, ascending from `x_min`.
    pub fn x_coords(&self) -> Vec<f64> {
        (0..self.cols())
            .map(|i| self.x_min + i as f64 * self.resolution)
            .collect()
    }

    /// Y coordinate of every row, ascending from `y_min`.
    pub fn y_coords(&self) -> Vec<f64> {
        (0..self.rows())
            .map(|j| self.y_min + j as f64 * self.resolution)
            .collect()
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::global(0.5)
    }
}

/// `floor(span / resolution) + 1`, tolerant of floating-point error.
///
/// None for an invalid span or resolution, or a count `usize` cannot hold.
fn steps(span: f64, resolution: f64) -> Option<usize> {
    if span.is_nan() || span < 0.0 || resolution.is_nan() || resolution <= 0.0 {
        return None;
    }
    let n = span / resolution;
    let whole = (n + n.max(1.0) * STEP_TOLERANCE).floor();
    if !whole.is_finite() || whole >= usize::MAX as f64 {
        return None;
    }
    (whole as usize).checked_add(1)
}
