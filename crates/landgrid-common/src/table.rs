//! Column-oriented in-memory tables.
//!
//! Both inputs of a conversion arrive as a [`Table`]: an ordered set of
//! named, equally long, typed columns. Column order is preserved because the
//! order of value columns in the data table defines the time axis of the
//! output cube.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};

/// Which input a table plays in a conversion. Used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableRole {
    Reference,
    Data,
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference => write!(f, "reference"),
            Self::Data => write!(f, "data"),
        }
    }
}

/// Join key identifying a land cell.
///
/// Integral floats normalize to [`CellKey::Int`], so `12` and `12.0` join.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellKey {
    Int(i64),
    Text(String),
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for CellKey {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for CellKey {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Element type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Int,
    Float,
    Text,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// A single typed column. Missing float cells are NaN.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Text(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Self::Int(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Int(_) => ColumnKind::Int,
            Self::Float(_) => ColumnKind::Float,
            Self::Text(_) => ColumnKind::Text,
        }
    }

    /// Join key at `row`, or None when the cell is missing.
    pub fn key_at(&self, row: usize) -> Option<CellKey> {
        match self {
            Self::Int(v) => v.get(row).map(|&k| CellKey::Int(k)),
            Self::Float(v) => v.get(row).and_then(|&k| integral(k)).map(CellKey::Int),
            Self::Text(v) => v.get(row).and_then(|s| {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else if let Ok(k) = s.parse::<i64>() {
                    Some(CellKey::Int(k))
                } else {
                    Some(CellKey::Text(s.to_string()))
                }
            }),
        }
    }

    /// Integer value at `row`. None for text, NaN or fractional cells.
    pub fn integer_at(&self, row: usize) -> Option<i64> {
        match self {
            Self::Int(v) => v.get(row).copied(),
            Self::Float(v) => v.get(row).and_then(|&x| integral(x)),
            Self::Text(_) => None,
        }
    }

    /// The column as floats. None for text columns.
    pub fn as_f64(&self) -> Option<Cow<'_, [f64]>> {
        match self {
            Self::Float(v) => Some(Cow::Borrowed(v.as_slice())),
            Self::Int(v) => Some(Cow::Owned(v.iter().map(|&x| x as f64).collect())),
            Self::Text(_) => None,
        }
    }
}

impl From<Vec<i64>> for Column {
    fn from(v: Vec<i64>) -> Self {
        Self::Int(v)
    }
}

impl From<Vec<f64>> for Column {
    fn from(v: Vec<f64>) -> Self {
        Self::Float(v)
    }
}

impl From<Vec<String>> for Column {
    fn from(v: Vec<String>) -> Self {
        Self::Text(v)
    }
}

fn integral(x: f64) -> Option<i64> {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < i64::MAX as f64 {
        Some(x as i64)
    } else {
        None
    }
}

/// An ordered collection of equally long named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, column)` pairs, keeping their order.
    pub fn from_columns<N, I>(columns: I) -> GridResult<Self>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Column)>,
    {
        let mut table = Self::new();
        for (name, column) in columns {
            table.push_column(name, column)?;
        }
        Ok(table)
    }

    /// Builder-style [`Table::push_column`].
    pub fn with_column(mut self, name: impl Into<String>, column: impl Into<Column>) -> GridResult<Self> {
        self.push_column(name, column.into())?;
        Ok(self)
    }

    /// Append a column. Names must be unique and lengths must agree.
    pub fn push_column(&mut self, name: impl Into<String>, column: Column) -> GridResult<()> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(GridError::InvalidTable(format!(
                "duplicate column name '{}'",
                name
            )));
        }
        if let Some(first) = self.columns.first() {
            if first.len() != column.len() {
                return Err(GridError::InvalidTable(format!(
                    "column '{}' has {} rows, expected {}",
                    name,
                    column.len(),
                    first.len()
                )));
            }
        }
        self.names.push(name);
        self.columns.push(column);
        Ok(())
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Column names in table order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.columns[i])
    }

    /// Look up a column, failing with a schema error naming `role`.
    pub fn require_column(&self, role: TableRole, name: &str) -> GridResult<&Column> {
        self.column(name)
            .ok_or_else(|| GridError::missing_column(role, name))
    }

    /// `(name, column)` pairs in table order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names.iter().map(String::as_str).zip(self.columns.iter())
    }
}
