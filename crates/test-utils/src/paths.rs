//! Locating committed testdata and writing generated tables to temp dirs.

use std::path::{Path, PathBuf};

use landgrid_common::Table;

use crate::generators::table_to_csv;

/// Crates that commit sample files under `testdata/`.
const TESTDATA_CRATES: [&str; 2] = ["table-reader", "cell-mapper"];

/// The workspace root: two levels above this crate's manifest.
pub fn workspace_root() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .ancestors()
        .nth(2)
        .unwrap_or(manifest)
        .to_path_buf()
}

/// `crates/{crate_name}/testdata/` under the workspace root.
pub fn crate_testdata_dir(crate_name: &str) -> PathBuf {
    workspace_root()
        .join("crates")
        .join(crate_name)
        .join("testdata")
}

/// Find a committed test file by name.
///
/// Looks in `$TEST_DATA_DIR` first, then each crate's `testdata/`, then a
/// workspace-level `testdata/`.
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    let env_dir = std::env::var_os("TEST_DATA_DIR").map(PathBuf::from);

    env_dir
        .into_iter()
        .chain(TESTDATA_CRATES.iter().map(|c| crate_testdata_dir(c)))
        .chain(std::iter::once(workspace_root().join("testdata")))
        .map(|dir| dir.join(name))
        .find(|path| path.is_file())
}

/// A fresh temp dir, removed when dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix("landgrid_test_")
        .tempdir()
        .expect("temp dir should be creatable")
}

/// Write `table` as CSV to `dir/name` and return the file path.
pub fn write_csv(dir: &Path, name: &str, table: &Table) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, table_to_csv(table)).expect("CSV should be writable");
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::data_table;

    #[test]
    fn test_workspace_root_holds_manifest() {
        let root = workspace_root();
        assert!(root.join("Cargo.toml").is_file(), "{}", root.display());
        assert!(root.join("crates").join("test-utils").is_dir());
    }

    #[test]
    fn test_committed_sample_is_found() {
        let path = find_test_file("runoff_small.csv").expect("sample committed");
        assert!(path.starts_with(crate_testdata_dir("table-reader")));
        assert!(find_test_file("no_such_table.csv").is_none());
    }

    #[test]
    fn test_write_csv_text() {
        let dir = temp_test_dir();
        let path = write_csv(dir.path(), "data.csv", &data_table(&[3], &["2014"]));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "id,2014\n3,3.0\n");
    }
}
