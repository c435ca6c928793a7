//! Land-cell table to grid cube conversion.
//!
//! Converts a reference table (cell id -> row/col index) and a data table
//! (cell id -> one value per time step) into a dense `(time, row, col)`
//! cube. Positions without land-cell data keep the fill value.
//!
//! # Architecture
//!
//! ```text
//! reference table ──┐
//!                   ├─► validate schema ─► join_cells ─► JoinedCells + JoinReport
//! data table ───────┘                          │
//!                                              ▼
//!                        per value column: GridBuilder::build_grid()
//!                                              │ scatter (rayon, one worker per layer)
//!                                              ▼
//!                                     Cube (layers in column order)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use cell_mapper::{CellDataMapper, MapperConfig};
//!
//! let mapper = CellDataMapper::new(MapperConfig::default())?;
//! let mapped = mapper.build_cube(&reference, &data)?;
//!
//! assert_eq!(mapped.cube.shape(), (3, 361, 721));
//! if mapped.report.unmatched_count() > 0 {
//!     // some data rows had no land cell
//! }
//! ```

pub mod builder;
pub mod config;
pub mod cube;
pub mod join;
pub mod mapper;

// Re-export commonly used types at crate root
pub use builder::{build_grid, GridBuilder};
pub use config::MapperConfig;
pub use cube::{Cube, MappedCube};
pub use join::{join_cells, JoinFields, JoinReport, JoinedCells};
pub use landgrid_common::{Extent, Grid, GridError, GridResult, Table, TimeStep};
pub use mapper::{build_cube, CellDataMapper};
