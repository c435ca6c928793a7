//! Common test fixtures for landgrid tests.
//!
//! Pre-defined extents, column names and labels that mirror the
//! shapes real land-cell outputs come in.

/// Common extents for testing.
pub mod extent {
    use landgrid_common::Extent;

    /// Global plane at 0.5 degrees: 361 rows x 721 columns.
    pub fn global_half_degree() -> Extent {
        Extent::global(0.5)
    }

    /// Global plane at 1 degree: 181 rows x 361 columns.
    pub fn global_one_degree() -> Extent {
        Extent::global(1.0)
    }

    /// Small 5 x 6 plane for hand-checked scatter tests.
    pub fn small_5x6() -> Extent {
        Extent::new(0.0, 0.0, 5.0, 4.0, 1.0)
    }

    /// Invalid extent (min > max).
    pub fn inverted() -> Extent {
        Extent::new(10.0, 10.0, 5.0, 5.0, 1.0)
    }
}

/// Default column names of land-cell tables.
pub mod fields {
    pub const KEY: &str = "grid_id";
    pub const DATA_ID: &str = "id";
    pub const ROW: &str = "latitude_index";
    pub const COL: &str = "longitude_index";
}

/// Common time-step labels.
pub mod labels {
    /// Annual runoff for 2014 through 2016.
    pub const YEARS_2014_2016: [&str; 3] = ["2014", "2015", "2016"];

    /// First quarter of 1995, monthly.
    pub const MONTHS_1995_Q1: [&str; 3] = ["199501", "199502", "199503"];
}

/// Number of land cells in the global 0.5 degree land mask.
pub const GLOBAL_LAND_CELLS: usize = 67_420;
