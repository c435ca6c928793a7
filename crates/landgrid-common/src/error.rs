//! Error types for grid construction.

use thiserror::Error;

use crate::table::TableRole;

/// Result type alias using GridError.
pub type GridResult<T> = Result<T, GridError>;

/// Primary error type for building grids and cubes.
#[derive(Debug, Error)]
pub enum GridError {
    // === Configuration Errors ===
    #[error("Invalid extent: {0}")]
    InvalidExtent(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // === Input Table Errors ===
    #[error("Schema error in {table} table: {message}")]
    Schema { table: TableRole, message: String },

    #[error("The {0} table has no rows")]
    EmptyInput(TableRole),

    #[error("Column '{column}' in {table} table must hold {expected} values")]
    ColumnType {
        table: TableRole,
        column: String,
        expected: &'static str,
    },

    #[error("Invalid table: {0}")]
    InvalidTable(String),

    // === Join Errors ===
    #[error("Cell {key} maps to (row {row}, col {col}) outside the {rows}x{cols} grid")]
    CellOutOfBounds {
        key: String,
        row: i64,
        col: i64,
        rows: usize,
        cols: usize,
    },
}

impl GridError {
    /// Create an InvalidExtent error.
    pub fn invalid_extent(msg: impl Into<String>) -> Self {
        Self::InvalidExtent(msg.into())
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a Schema error for a column that is absent from a table.
    pub fn missing_column(table: TableRole, column: &str) -> Self {
        Self::Schema {
            table,
            message: format!("missing required column '{}'", column),
        }
    }

    /// Create a Schema error with a free-form message.
    pub fn schema(table: TableRole, msg: impl Into<String>) -> Self {
        Self::Schema {
            table,
            message: msg.into(),
        }
    }

    /// Create a ColumnType error.
    pub fn column_type(table: TableRole, column: &str, expected: &'static str) -> Self {
        Self::ColumnType {
            table,
            column: column.to_string(),
            expected,
        }
    }
}
