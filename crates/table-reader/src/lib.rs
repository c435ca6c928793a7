//! Delimited-text reader for land-cell tables.
//!
//! Reads CSV-like files with a header row into [`Table`]s. Each column's
//! element type is inferred from its cells:
//!
//! - every cell an integer -> [`Column::Int`]
//! - every cell a float or a missing marker -> [`Column::Float`] (missing = NaN)
//! - anything else -> [`Column::Text`]
//!
//! The reference table of a global 0.5 degree land mask and a per-cell
//! runoff table both read cleanly into integer and float columns.

mod error;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use landgrid_common::{Column, Table};
use tracing::{debug, info};

pub use error::{ReaderError, ReaderResult};

/// Cell contents treated as missing numeric values.
const MISSING_MARKERS: [&str; 6] = ["", "NA", "N/A", "NaN", "nan", "null"];

/// Options controlling how delimited text is parsed.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Trim surrounding whitespace from headers and fields.
    pub trim: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

/// Return `path` if it names an existing regular file.
pub fn ensure_file_exists(path: impl AsRef<Path>) -> ReaderResult<PathBuf> {
    let path = path.as_ref();
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(ReaderError::FileNotFound(path.to_path_buf()))
    }
}

/// Read a comma-delimited file with a header row.
pub fn read_table(path: impl AsRef<Path>) -> ReaderResult<Table> {
    read_table_with(path, &ReadOptions::default())
}

/// Read a delimited file with a header row using explicit options.
pub fn read_table_with(path: impl AsRef<Path>, options: &ReadOptions) -> ReaderResult<Table> {
    let path = ensure_file_exists(path)?;
    let file = File::open(&path)?;
    let table = read_table_from_reader(file, options, &path.display().to_string())?;

    debug!(
        path = %path.display(),
        rows = table.num_rows(),
        columns = table.num_columns(),
        "Read table"
    );
    Ok(table)
}

/// Read delimited text from any reader. `source` names the input in errors.
pub fn read_table_from_reader<R: Read>(
    reader: R,
    options: &ReadOptions,
    source: &str,
) -> ReaderResult<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .trim(if options.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(ReaderError::MissingHeader(source.to_string()));
    }

    let mut raw: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in csv_reader.records() {
        let record = record?;
        for (cells, field) in raw.iter_mut().zip(record.iter()) {
            cells.push(field.to_string());
        }
    }

    let table = Table::from_columns(headers.into_iter().zip(raw.into_iter().map(infer_column)))?;
    Ok(table)
}

/// Read the reference and data tables of one conversion.
pub fn load_tables(
    reference_path: impl AsRef<Path>,
    data_path: impl AsRef<Path>,
) -> ReaderResult<(Table, Table)> {
    let reference_path = ensure_file_exists(reference_path)?;
    let data_path = ensure_file_exists(data_path)?;

    let reference = read_table(&reference_path)?;
    let data = read_table(&data_path)?;

    info!(
        reference = %reference_path.display(),
        reference_rows = reference.num_rows(),
        data = %data_path.display(),
        data_rows = data.num_rows(),
        data_columns = data.num_columns(),
        "Loaded input tables"
    );
    Ok((reference, data))
}

/// Pick the narrowest column type that holds every cell.
pub fn infer_column(cells: Vec<String>) -> Column {
    let is_missing = |s: &str| MISSING_MARKERS.contains(&s);

    let all_ints = !cells.is_empty() && cells.iter().all(|s| s.parse::<i64>().is_ok());
    if all_ints {
        return Column::Int(cells.iter().filter_map(|s| s.parse().ok()).collect());
    }

    let all_floats = cells
        .iter()
        .all(|s| is_missing(s) || s.parse::<f64>().is_ok());
    if all_floats {
        return Column::Float(
            cells
                .iter()
                .map(|s| {
                    if is_missing(s) {
                        f64::NAN
                    } else {
                        s.parse().unwrap_or(f64::NAN)
                    }
                })
                .collect(),
        );
    }

    Column::Text(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use landgrid_common::{CellKey, ColumnKind};

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_infer_int_column() {
        let column = infer_column(cells(&["1", "-2", "300"]));
        assert_eq!(column, Column::Int(vec![1, -2, 300]));
    }

    #[test]
    fn test_infer_float_column_with_missing() {
        let column = infer_column(cells(&["1.5", "", "NA", "2"]));
        match column {
            Column::Float(v) => {
                assert_eq!(v[0], 1.5);
                assert!(v[1].is_nan());
                assert!(v[2].is_nan());
                assert_eq!(v[3], 2.0);
            }
            other => panic!("expected float column, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_infer_text_column() {
        let column = infer_column(cells(&["a1", "2"]));
        assert_eq!(column.kind(), ColumnKind::Text);
    }

    #[test]
    fn test_infer_zero_rows_is_float() {
        assert_eq!(infer_column(Vec::new()).kind(), ColumnKind::Float);
    }

    #[test]
    fn test_read_from_reader_keeps_header_order() {
        let text = "id,2014,2015\n1,0.5,0.75\n2,1.0,1.25\n";
        let table =
            read_table_from_reader(text.as_bytes(), &ReadOptions::default(), "inline").unwrap();

        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, vec!["id", "2014", "2015"]);
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.column("id").unwrap().key_at(1), Some(CellKey::Int(2)));
        assert_eq!(table.column("2015").unwrap().kind(), ColumnKind::Float);
    }

    #[test]
    fn test_read_semicolon_delimited_with_spaces() {
        let text = "grid_id ; latitude_index ; longitude_index\n 7 ; 3 ; 4\n";
        let options = ReadOptions {
            delimiter: b';',
            ..Default::default()
        };
        let table = read_table_from_reader(text.as_bytes(), &options, "inline").unwrap();
        assert!(table.has_column("latitude_index"));
        assert_eq!(table.column("longitude_index").unwrap().integer_at(0), Some(4));
    }

    #[test]
    fn test_ragged_rows_fail() {
        let text = "id,2014\n1,0.5\n2\n";
        let err = read_table_from_reader(text.as_bytes(), &ReadOptions::default(), "inline")
            .unwrap_err();
        assert!(matches!(err, ReaderError::Csv(_)));
    }

    #[test]
    fn test_empty_input_has_no_header() {
        let err =
            read_table_from_reader("".as_bytes(), &ReadOptions::default(), "inline").unwrap_err();
        assert!(matches!(err, ReaderError::MissingHeader(_)));
    }

    #[test]
    fn test_duplicate_headers_fail() {
        let text = "id,id\n1,2\n";
        let err = read_table_from_reader(text.as_bytes(), &ReadOptions::default(), "inline")
            .unwrap_err();
        assert!(matches!(err, ReaderError::Table(_)));
    }
}
