//! Shared test utilities for the landgrid workspace.
//!
//! - [`fixtures`]: extents, column names and time-step labels
//! - [`generators`]: synthetic land-cell reference and data tables
//! - [`paths`]: testdata lookup and temp-dir CSV writers
//! - assertion macros for float slices and optional testdata files
//!
//! Used as a dev-dependency only:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Install a test-writer tracing subscriber once per test binary.
///
/// Honors `RUST_LOG`; defaults to `warn` so unmatched-key warnings show up
/// in failing test output.
pub fn init_test_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Resolve a committed testdata file, or return early from the test.
///
/// ```ignore
/// let path = test_utils::require_test_file!("runoff_small.csv");
/// ```
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        let name: &str = $name;
        let Some(path) = $crate::find_test_file(name) else {
            eprintln!("skipping: {} not in any testdata/ dir or TEST_DATA_DIR", name);
            return;
        };
        path
    }};
}

/// Assert two numbers are within `tolerance` (default `1e-9`).
///
/// ```ignore
/// test_utils::assert_approx_eq!(extent.x_coords()[1], -179.5);
/// test_utils::assert_approx_eq!(0.1 + 0.2, 0.3, 1e-12);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr) => {
        $crate::assert_approx_eq!($left, $right, 1e-9)
    };
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let (left, right, tolerance) = ($left as f64, $right as f64, $tolerance as f64);
        assert!(
            (left - right).abs() <= tolerance,
            "values differ by more than {}: left {}, right {}",
            tolerance,
            left,
            right
        );
    }};
}

/// Assert every value in a slice of floats is NaN.
///
/// ```ignore
/// test_utils::assert_all_nan!(grid.values());
/// ```
#[macro_export]
macro_rules! assert_all_nan {
    ($values:expr) => {{
        let values: &[f64] = $values;
        if let Some(pos) = values.iter().position(|v| !v.is_nan()) {
            panic!(
                "expected all NaN, found {:?} at index {} of {}",
                values[pos],
                pos,
                values.len()
            );
        }
    }};
}
