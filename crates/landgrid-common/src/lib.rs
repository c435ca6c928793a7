//! Common types shared across the landgrid crates.
//!
//! - [`Extent`]: bounds plus resolution of a regular coordinate plane
//! - [`Grid`]: a row-major 2D buffer shaped by an extent
//! - [`Table`]: column-oriented in-memory tables keyed by column name
//! - [`TimeStep`]: typed view of `YYYY` / `YYYYMM` column labels

pub mod error;
pub mod extent;
pub mod grid;
pub mod table;
pub mod time;

pub use error::{GridError, GridResult};
pub use extent::Extent;
pub use grid::Grid;
pub use table::{CellKey, Column, ColumnKind, Table, TableRole};
pub use time::TimeStep;
