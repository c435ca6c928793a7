//! Inner join of data rows onto reference grid positions.
//!
//! The reference table is indexed once into a key -> (row, col) map; the data
//! table is then scanned a single time. Data rows whose key has no reference
//! entry are dropped and reported, reference cells without data are never
//! scattered.
//!
//! Duplicates resolve by table order, last one wins:
//! - a key repeated in the reference table takes its last position
//! - a data row landing on an already joined position overwrites it

use std::collections::{HashMap, HashSet};

use landgrid_common::{CellKey, GridError, GridResult, Table, TableRole};
use serde::{Deserialize, Serialize};

/// Column names used to join the two tables.
#[derive(Debug, Clone, Copy)]
pub struct JoinFields<'a> {
    /// Key column in the reference table.
    pub reference_key: &'a str,
    /// Key column in the data table.
    pub data_key: &'a str,
    /// Row index column in the reference table.
    pub row: &'a str,
    /// Column index column in the reference table.
    pub col: &'a str,
}

/// Joined rows: flat grid position and the data row that fills it.
#[derive(Debug, Clone, Default)]
pub struct JoinedCells {
    positions: Vec<usize>,
    data_rows: Vec<usize>,
}

impl JoinedCells {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// `(flat_position, data_row)` pairs in data-table order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.positions.iter().copied().zip(self.data_rows.iter().copied())
    }

    /// Write `values[data_row]` to each joined position of `cells`.
    ///
    /// `cells` is a row-major grid buffer and `values` one data-table column.
    pub fn scatter(&self, cells: &mut [f64], values: &[f64]) {
        for (pos, row) in self.iter() {
            cells[pos] = values[row];
        }
    }
}

/// Diagnostics of one join. Unmatched and duplicate rows are not errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinReport {
    pub reference_rows: usize,
    pub data_rows: usize,
    /// Data rows that found a reference position.
    pub joined_rows: usize,
    /// Keys of data rows dropped for lack of a reference entry, in table order.
    pub unmatched_data_keys: Vec<CellKey>,
    /// Reference keys no data row matched; their cells keep the fill value.
    pub reference_cells_without_data: usize,
    /// Rows (in either table) with an empty key cell.
    pub missing_keys: usize,
    /// Reference rows repeating an earlier key.
    pub duplicate_reference_keys: usize,
    /// Joined data rows repeating an earlier key.
    pub duplicate_data_keys: usize,
    /// Joined data rows overwriting a position already written.
    pub position_collisions: usize,
}

impl JoinReport {
    /// Number of data rows dropped from the join.
    pub fn unmatched_count(&self) -> usize {
        self.unmatched_data_keys.len()
    }

    /// True when every data row joined exactly once onto a distinct position.
    pub fn is_clean(&self) -> bool {
        self.unmatched_data_keys.is_empty()
            && self.missing_keys == 0
            && self.duplicate_reference_keys == 0
            && self.duplicate_data_keys == 0
            && self.position_collisions == 0
    }
}

/// Join `data` onto `reference` for a grid of `shape` (rows, cols).
///
/// Fails if a required column is missing, an index column is not integral,
/// or a reference position lies outside the grid.
pub fn join_cells(
    reference: &Table,
    data: &Table,
    fields: &JoinFields<'_>,
    shape: (usize, usize),
) -> GridResult<(JoinedCells, JoinReport)> {
    let (rows, cols) = shape;
    let ref_keys = reference.require_column(TableRole::Reference, fields.reference_key)?;
    let ref_rows = reference.require_column(TableRole::Reference, fields.row)?;
    let ref_cols = reference.require_column(TableRole::Reference, fields.col)?;
    let data_keys = data.require_column(TableRole::Data, fields.data_key)?;

    let mut report = JoinReport {
        reference_rows: reference.num_rows(),
        data_rows: data.num_rows(),
        ..Default::default()
    };

    let mut index: HashMap<CellKey, usize> = HashMap::with_capacity(reference.num_rows());
    for i in 0..reference.num_rows() {
        let Some(key) = ref_keys.key_at(i) else {
            report.missing_keys += 1;
            continue;
        };
        let row = ref_rows
            .integer_at(i)
            .ok_or_else(|| GridError::column_type(TableRole::Reference, fields.row, "integer"))?;
        let col = ref_cols
            .integer_at(i)
            .ok_or_else(|| GridError::column_type(TableRole::Reference, fields.col, "integer"))?;

        if row < 0 || col < 0 || row as usize >= rows || col as usize >= cols {
            return Err(GridError::CellOutOfBounds {
                key: key.to_string(),
                row,
                col,
                rows,
                cols,
            });
        }

        let pos = row as usize * cols + col as usize;
        if index.insert(key, pos).is_some() {
            report.duplicate_reference_keys += 1;
        }
    }

    let mut joined = JoinedCells {
        positions: Vec::with_capacity(data.num_rows()),
        data_rows: Vec::with_capacity(data.num_rows()),
    };
    let mut matched_keys: HashSet<CellKey> = HashSet::with_capacity(data.num_rows());
    let mut written: HashSet<usize> = HashSet::with_capacity(data.num_rows());

    for j in 0..data.num_rows() {
        let Some(key) = data_keys.key_at(j) else {
            report.missing_keys += 1;
            continue;
        };
        let Some(&pos) = index.get(&key) else {
            report.unmatched_data_keys.push(key);
            continue;
        };

        if !written.insert(pos) {
            report.position_collisions += 1;
        }
        if !matched_keys.insert(key) {
            report.duplicate_data_keys += 1;
        }
        joined.positions.push(pos);
        joined.data_rows.push(j);
    }

    report.joined_rows = joined.len();
    report.reference_cells_without_data = index.len() - matched_keys.len();

    Ok((joined, report))
}
