//! The (time, row, col) output cube.

use landgrid_common::{Grid, GridError, GridResult, TimeStep};

use crate::join::JoinReport;

/// A stack of equally shaped grids, one per time step.
///
/// Each layer owns its buffer; layer `t` holds the values of the `t`-th
/// value column of the data table.
#[derive(Debug, Clone)]
pub struct Cube {
    labels: Vec<String>,
    layers: Vec<Grid>,
    rows: usize,
    cols: usize,
}

impl Cube {
    /// Assemble a cube. Every layer must share one shape and have a label.
    pub fn from_layers(labels: Vec<String>, layers: Vec<Grid>) -> GridResult<Self> {
        if labels.len() != layers.len() {
            return Err(GridError::InvalidTable(format!(
                "{} labels for {} layers",
                labels.len(),
                layers.len()
            )));
        }

        let (rows, cols) = layers.first().map(Grid::shape).unwrap_or((0, 0));
        if let Some(bad) = layers.iter().position(|g| g.shape() != (rows, cols)) {
            return Err(GridError::InvalidTable(format!(
                "layer {} has shape {:?}, expected {:?}",
                bad,
                layers[bad].shape(),
                (rows, cols)
            )));
        }

        Ok(Self {
            labels,
            layers,
            rows,
            cols,
        })
    }

    /// Shape as (time_steps, rows, cols).
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.layers.len(), self.rows, self.cols)
    }

    pub fn num_steps(&self) -> usize {
        self.layers.len()
    }

    /// Value column labels in layer order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Labels parsed as time steps, in layer order.
    pub fn time_steps(&self) -> Vec<TimeStep> {
        self.labels.iter().map(|l| TimeStep::parse(l)).collect()
    }

    pub fn layer(&self, step: usize) -> Option<&Grid> {
        self.layers.get(step)
    }

    /// Layer for a value column label.
    pub fn layer_by_label(&self, label: &str) -> Option<&Grid> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| &self.layers[i])
    }

    pub fn layers(&self) -> &[Grid] {
        &self.layers
    }

    /// Value at (step, row, col).
    pub fn get(&self, step: usize, row: usize, col: usize) -> Option<f64> {
        self.layers.get(step).and_then(|g| g.get(row, col))
    }

    /// `(label, layer)` pairs in layer order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Grid)> {
        self.labels.iter().map(String::as_str).zip(self.layers.iter())
    }

    /// Flatten to one time-major buffer of `steps * rows * cols` values.
    pub fn into_values(self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.layers.len() * self.rows * self.cols);
        for layer in self.layers {
            out.extend_from_slice(layer.values());
        }
        out
    }
}

/// A conversion result: the cube plus the join diagnostics behind it.
#[derive(Debug, Clone)]
pub struct MappedCube {
    pub cube: Cube,
    pub report: JoinReport,
}
