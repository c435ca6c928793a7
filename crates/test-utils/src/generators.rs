//! Test data generators for synthetic land-cell tables.
//!
//! These generators create predictable, verifiable tables so tests can
//! check exactly which grid cell received which value.

use landgrid_common::{Column, Table};

use crate::fixtures::fields;

/// Land cells placed on a grid: parallel id/row/col vectors.
#[derive(Debug, Clone)]
pub struct LandCells {
    pub ids: Vec<i64>,
    pub rows: Vec<i64>,
    pub cols: Vec<i64>,
}

impl LandCells {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Spread `count` unique cells evenly over a `rows` x `cols` grid.
///
/// Ids run from 1 to `count`. Cell k sits at flat position
/// `k * rows * cols / count`, so positions are unique while
/// `count <= rows * cols` and cover the whole grid.
///
/// # Example
///
/// ```
/// use test_utils::spread_land_cells;
///
/// let cells = spread_land_cells(10, 10, 4);
/// assert_eq!(cells.ids, vec![1, 2, 3, 4]);
/// assert_eq!(cells.rows, vec![0, 2, 5, 7]);
/// assert_eq!(cells.cols, vec![0, 5, 0, 5]);
/// ```
pub fn spread_land_cells(rows: usize, cols: usize, count: usize) -> LandCells {
    let total = rows * cols;
    assert!(count <= total, "cannot place {} cells on {} positions", count, total);

    let mut cells = LandCells {
        ids: Vec::with_capacity(count),
        rows: Vec::with_capacity(count),
        cols: Vec::with_capacity(count),
    };
    for k in 0..count {
        let flat = k * total / count;
        cells.ids.push(k as i64 + 1);
        cells.rows.push((flat / cols) as i64);
        cells.cols.push((flat % cols) as i64);
    }
    cells
}

/// Value of cell `id` at time step `step`: `id + step * 0.25`.
///
/// Distinct per (id, step) and exactly representable for moderate ids.
pub fn cell_value(id: i64, step: usize) -> f64 {
    id as f64 + step as f64 * 0.25
}

/// Reference table with the default `grid_id`, `latitude_index`,
/// `longitude_index` columns.
pub fn reference_table(cells: &LandCells) -> Table {
    Table::from_columns([
        (fields::KEY, Column::Int(cells.ids.clone())),
        (fields::ROW, Column::Int(cells.rows.clone())),
        (fields::COL, Column::Int(cells.cols.clone())),
    ])
    .expect("generated reference columns have equal length")
}

/// Data table with an `id` column and one [`cell_value`] column per label.
pub fn data_table(ids: &[i64], labels: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .push_column(fields::DATA_ID, Column::Int(ids.to_vec()))
        .expect("fresh table accepts id column");
    for (step, label) in labels.iter().enumerate() {
        let values = ids.iter().map(|&id| cell_value(id, step)).collect();
        table
            .push_column(*label, Column::Float(values))
            .expect("generated value columns have equal length and unique labels");
    }
    table
}

/// Render a table as comma-separated text with a header row.
pub fn table_to_csv(table: &Table) -> String {
    let mut out = table.column_names().collect::<Vec<_>>().join(",");
    out.push('\n');

    let columns: Vec<&Column> = table.columns().map(|(_, c)| c).collect();
    for row in 0..table.num_rows() {
        let cells: Vec<String> = columns.iter().map(|c| format_cell(c, row)).collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

fn format_cell(column: &Column, row: usize) -> String {
    match column {
        Column::Int(v) => v[row].to_string(),
        Column::Float(v) if v[row].is_nan() => String::new(),
        Column::Float(v) => format!("{:?}", v[row]),
        Column::Text(v) => v[row].clone(),
    }
}
