//! Empty grid construction for an extent.

use landgrid_common::{Extent, Grid, GridResult};
use tracing::debug;

/// Builds sentinel-filled grids for one extent.
///
/// The extent is validated once and an empty template is kept, so each
/// [`GridBuilder::build_grid`] call is a single buffer clone.
#[derive(Debug, Clone)]
pub struct GridBuilder {
    extent: Extent,
    fill_value: f64,
    template: Grid,
}

impl GridBuilder {
    /// Validate `extent` and prepare the empty template.
    pub fn new(extent: Extent, fill_value: f64) -> GridResult<Self> {
        extent.validate()?;
        let (rows, cols) = extent.shape();
        debug!(rows, cols, fill_value, "Prepared empty grid template");

        Ok(Self {
            extent,
            fill_value,
            template: Grid::filled(rows, cols, fill_value),
        })
    }

    pub fn extent(&self) -> &Extent {
        &self.extent
    }

    pub fn fill_value(&self) -> f64 {
        self.fill_value
    }

    /// Grid shape as (rows, cols).
    pub fn shape(&self) -> (usize, usize) {
        self.template.shape()
    }

    /// A fresh grid with every cell set to the fill value.
    pub fn build_grid(&self) -> Grid {
        self.template.clone()
    }
}

/// Build one sentinel-filled grid for `extent`.
pub fn build_grid(extent: &Extent, fill_value: f64) -> GridResult<Grid> {
    extent.validate()?;
    let (rows, cols) = extent.shape();
    Ok(Grid::filled(rows, cols, fill_value))
}
