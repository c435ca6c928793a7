//! Join-and-scatter of land-cell tables into a cube.

use std::borrow::Cow;

use landgrid_common::{Extent, Grid, GridError, GridResult, Table, TableRole};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::builder::GridBuilder;
use crate::config::MapperConfig;
use crate::cube::{Cube, MappedCube};
use crate::join::{join_cells, JoinFields};

/// Number of unmatched keys echoed in the warning log.
const LOGGED_KEY_SAMPLE: usize = 10;

/// Converts reference + data tables into a [`Cube`] for one configuration.
#[derive(Debug, Clone)]
pub struct CellDataMapper {
    config: MapperConfig,
}

impl CellDataMapper {
    /// Create a mapper, validating the configuration.
    pub fn new(config: MapperConfig) -> GridResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Build a cube from every value column of `data`, in table order.
    pub fn build_cube(&self, reference: &Table, data: &Table) -> GridResult<MappedCube> {
        self.map_tables(reference, data, None)
    }

    /// Build a cube from the named value columns, in the given order.
    pub fn build_cube_with_columns(
        &self,
        reference: &Table,
        data: &Table,
        value_columns: &[&str],
    ) -> GridResult<MappedCube> {
        self.map_tables(reference, data, Some(value_columns))
    }

    /// Identifier column of `data`: `data_id_field`, else `key_field`.
    pub fn data_key_field(&self, data: &Table) -> GridResult<&str> {
        let config = &self.config;
        if data.has_column(&config.data_id_field) {
            Ok(&config.data_id_field)
        } else if data.has_column(&config.key_field) {
            Ok(&config.key_field)
        } else {
            Err(GridError::missing_column(
                TableRole::Data,
                &config.data_id_field,
            ))
        }
    }

    /// Every column of `data` other than the identifier, in table order.
    pub fn value_columns<'t>(&self, data: &'t Table) -> GridResult<Vec<&'t str>> {
        let config = &self.config;
        let columns: Vec<&str> = data
            .column_names()
            .filter(|name| *name != config.data_id_field && *name != config.key_field)
            .collect();

        if columns.is_empty() {
            return Err(GridError::schema(TableRole::Data, "no value columns"));
        }
        Ok(columns)
    }

    fn requested_columns(
        &self,
        data: &Table,
        data_key: &str,
        requested: &[&str],
    ) -> GridResult<Vec<String>> {
        if requested.is_empty() {
            return Err(GridError::schema(TableRole::Data, "no value columns requested"));
        }
        for name in requested {
            if *name == data_key {
                return Err(GridError::schema(
                    TableRole::Data,
                    format!("key column '{}' cannot be a value column", name),
                ));
            }
            data.require_column(TableRole::Data, name)?;
        }
        Ok(requested.iter().map(|s| s.to_string()).collect())
    }

    fn map_tables(
        &self,
        reference: &Table,
        data: &Table,
        requested: Option<&[&str]>,
    ) -> GridResult<MappedCube> {
        let config = &self.config;

        // Schema checks come before anything is allocated
        for field in [&config.key_field, &config.ref_row_field, &config.ref_col_field] {
            reference.require_column(TableRole::Reference, field)?;
        }
        let data_key = self.data_key_field(data)?;
        let labels: Vec<String> = match requested {
            Some(names) => self.requested_columns(data, data_key, names)?,
            None => self
                .value_columns(data)?
                .into_iter()
                .map(str::to_string)
                .collect(),
        };

        if reference.is_empty() {
            return Err(GridError::EmptyInput(TableRole::Reference));
        }
        if data.is_empty() {
            return Err(GridError::EmptyInput(TableRole::Data));
        }

        let values: Vec<Cow<'_, [f64]>> = labels
            .iter()
            .map(|label| {
                data.column(label)
                    .and_then(|c| c.as_f64())
                    .ok_or_else(|| GridError::column_type(TableRole::Data, label, "numeric"))
            })
            .collect::<GridResult<_>>()?;

        let shape = config.extent.shape();
        let fields = JoinFields {
            reference_key: &config.key_field,
            data_key,
            row: &config.ref_row_field,
            col: &config.ref_col_field,
        };
        let (joined, report) = join_cells(reference, data, &fields, shape)?;
        debug!(
            reference_rows = report.reference_rows,
            data_rows = report.data_rows,
            joined_rows = report.joined_rows,
            "Joined data table onto reference cells"
        );

        if report.unmatched_count() > 0 {
            let sample: Vec<String> = report
                .unmatched_data_keys
                .iter()
                .take(LOGGED_KEY_SAMPLE)
                .map(|k| k.to_string())
                .collect();
            warn!(
                unmatched = report.unmatched_count(),
                sample = ?sample,
                "Dropped data rows without a reference cell"
            );
        }
        if report.duplicate_reference_keys > 0
            || report.duplicate_data_keys > 0
            || report.position_collisions > 0
        {
            warn!(
                duplicate_reference_keys = report.duplicate_reference_keys,
                duplicate_data_keys = report.duplicate_data_keys,
                position_collisions = report.position_collisions,
                "Duplicate cells resolved by last write in table order"
            );
        }

        let builder = GridBuilder::new(config.extent, config.fill_value)?;
        let scatter = |column: &Cow<'_, [f64]>| -> Grid {
            let mut grid = builder.build_grid();
            joined.scatter(grid.values_mut(), column);
            grid
        };
        let layers: Vec<Grid> = if config.parallel_layers {
            values.par_iter().map(scatter).collect()
        } else {
            values.iter().map(scatter).collect()
        };

        let cube = Cube::from_layers(labels, layers)?;
        let (steps, rows, cols) = cube.shape();
        info!(
            steps,
            rows,
            cols,
            joined_rows = report.joined_rows,
            unmatched = report.unmatched_count(),
            "Built land-cell cube"
        );

        Ok(MappedCube { cube, report })
    }
}

/// One-shot conversion with an explicit key, extent and fill value.
///
/// The data table's identifier may be named `id` or `key_field`. With
/// `value_columns` of None every non-key column is used in table order.
pub fn build_cube(
    reference: &Table,
    data: &Table,
    key_field: &str,
    value_columns: Option<&[&str]>,
    extent: Extent,
    fill_value: f64,
) -> GridResult<MappedCube> {
    let mapper = CellDataMapper::new(MapperConfig {
        extent,
        fill_value,
        key_field: key_field.to_string(),
        ..Default::default()
    })?;

    match value_columns {
        Some(names) => mapper.build_cube_with_columns(reference, data, names),
        None => mapper.build_cube(reference, data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landgrid_common::Column;

    fn small_config() -> MapperConfig {
        MapperConfig {
            extent: Extent::new(0.0, 0.0, 3.0, 2.0, 1.0),
            ..Default::default()
        }
    }

    fn reference() -> Table {
        Table::from_columns([
            ("grid_id", Column::Int(vec![10, 20, 30])),
            ("latitude_index", Column::Int(vec![0, 1, 2])),
            ("longitude_index", Column::Int(vec![0, 3, 1])),
        ])
        .unwrap()
    }

    fn data() -> Table {
        Table::from_columns([
            ("id", Column::Int(vec![20, 10])),
            ("2015", Column::Float(vec![2.0, 1.0])),
            ("2014", Column::Int(vec![200, 100])),
        ])
        .unwrap()
    }

    #[test]
    fn test_scatter_small_grid() {
        let mapper = CellDataMapper::new(small_config()).unwrap();
        let mapped = mapper.build_cube(&reference(), &data()).unwrap();
        let cube = &mapped.cube;

        assert_eq!(cube.shape(), (2, 3, 4));
        assert_eq!(cube.labels(), &["2015".to_string(), "2014".to_string()]);
        assert_eq!(cube.get(0, 0, 0), Some(1.0));
        assert_eq!(cube.get(0, 1, 3), Some(2.0));
        assert_eq!(cube.get(1, 0, 0), Some(100.0));
        assert_eq!(cube.get(1, 1, 3), Some(200.0));
        assert!(cube.get(0, 2, 1).unwrap().is_nan());
        assert_eq!(cube.layer(0).unwrap().count_populated(f64::NAN), 2);
        assert_eq!(mapped.report.reference_cells_without_data, 1);
    }

    #[test]
    fn test_requested_columns_order() {
        let mapper = CellDataMapper::new(small_config()).unwrap();
        let mapped = mapper
            .build_cube_with_columns(&reference(), &data(), &["2014"])
            .unwrap();
        assert_eq!(mapped.cube.shape(), (1, 3, 4));
        assert_eq!(mapped.cube.get(0, 0, 0), Some(100.0));
    }

    #[test]
    fn test_requested_key_column_is_rejected() {
        let mapper = CellDataMapper::new(small_config()).unwrap();
        let err = mapper
            .build_cube_with_columns(&reference(), &data(), &["id"])
            .unwrap_err();
        assert!(matches!(err, GridError::Schema { .. }));

        let err = mapper
            .build_cube_with_columns(&reference(), &data(), &["1999"])
            .unwrap_err();
        assert!(err.to_string().contains("1999"));
    }

    #[test]
    fn test_data_already_keyed_by_key_field() {
        let data = Table::from_columns([
            ("grid_id", Column::Int(vec![30])),
            ("2014", Column::Float(vec![3.0])),
        ])
        .unwrap();
        let mapper = CellDataMapper::new(small_config()).unwrap();
        assert_eq!(mapper.data_key_field(&data).unwrap(), "grid_id");

        let mapped = mapper.build_cube(&reference(), &data).unwrap();
        assert_eq!(mapped.cube.get(0, 2, 1), Some(3.0));
    }

    #[test]
    fn test_text_value_column_is_type_error() {
        let data = Table::from_columns([
            ("id", Column::Int(vec![10])),
            ("2014", Column::Text(vec!["wet".into()])),
        ])
        .unwrap();
        let mapper = CellDataMapper::new(small_config()).unwrap();
        let err = mapper.build_cube(&reference(), &data).unwrap_err();
        assert!(matches!(err, GridError::ColumnType { .. }));
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let parallel = CellDataMapper::new(small_config()).unwrap();
        let sequential = CellDataMapper::new(MapperConfig {
            parallel_layers: false,
            ..small_config()
        })
        .unwrap();

        let a = parallel.build_cube(&reference(), &data()).unwrap().cube;
        let b = sequential.build_cube(&reference(), &data()).unwrap().cube;
        let bits = |c: Cube| c.into_values().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(a), bits(b));
    }

    #[test]
    fn test_free_function_uses_explicit_settings() {
        let data = Table::from_columns([
            ("cell", Column::Int(vec![1])),
            ("2014", Column::Float(vec![4.0])),
        ])
        .unwrap();
        let reference = Table::from_columns([
            ("cell", Column::Int(vec![1])),
            ("latitude_index", Column::Int(vec![1])),
            ("longitude_index", Column::Int(vec![1])),
        ])
        .unwrap();

        let mapped = build_cube(
            &reference,
            &data,
            "cell",
            None,
            Extent::new(0.0, 0.0, 1.0, 1.0, 1.0),
            -1.0,
        )
        .unwrap();
        assert_eq!(mapped.cube.shape(), (1, 2, 2));
        assert_eq!(mapped.cube.layer(0).unwrap().values(), &[-1.0, -1.0, -1.0, 4.0]);
    }
}
