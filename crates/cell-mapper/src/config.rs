//! Configuration for the cell data mapper.

use std::path::Path;

use landgrid_common::{Extent, GridError, GridResult};
use serde::{Deserialize, Serialize};

/// Configuration for a land-cell to cube conversion.
///
/// Defaults describe the global 0.5 degree land-cell layout: reference
/// columns `grid_id`, `latitude_index`, `longitude_index` and a data table
/// keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Bounds and resolution of the output plane.
    #[serde(flatten)]
    pub extent: Extent,

    /// Value of cells without land-cell data.
    pub fill_value: f64,

    /// Join key column of the reference table.
    pub key_field: String,

    /// Identifier column of the data table, treated as `key_field`.
    pub data_id_field: String,

    /// Reference column holding row indices.
    pub ref_row_field: String,

    /// Reference column holding column indices.
    pub ref_col_field: String,

    /// Build time-step layers on the rayon pool.
    pub parallel_layers: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            extent: Extent::default(),
            fill_value: f64::NAN,
            key_field: "grid_id".to_string(),
            data_id_field: "id".to_string(),
            ref_row_field: "latitude_index".to_string(),
            ref_col_field: "longitude_index".to_string(),
            parallel_layers: true,
        }
    }
}

impl MapperConfig {
    /// Load configuration from `LANDGRID_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup over the defaults.
    ///
    /// Values that fail to parse are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let number = |key: &str| lookup(key).and_then(|v| v.trim().parse::<f64>().ok());

        if let Some(v) = number("LANDGRID_X_MIN") {
            config.extent.x_min = v;
        }
        if let Some(v) = number("LANDGRID_Y_MIN") {
            config.extent.y_min = v;
        }
        if let Some(v) = number("LANDGRID_X_MAX") {
            config.extent.x_max = v;
        }
        if let Some(v) = number("LANDGRID_Y_MAX") {
            config.extent.y_max = v;
        }
        if let Some(v) = number("LANDGRID_RESOLUTION") {
            config.extent.resolution = v;
        }
        if let Some(v) = number("LANDGRID_FILL_VALUE") {
            config.fill_value = v;
        }

        if let Some(v) = lookup("LANDGRID_KEY_FIELD") {
            config.key_field = v;
        }
        if let Some(v) = lookup("LANDGRID_DATA_ID_FIELD") {
            config.data_id_field = v;
        }
        if let Some(v) = lookup("LANDGRID_REF_ROW_FIELD") {
            config.ref_row_field = v;
        }
        if let Some(v) = lookup("LANDGRID_REF_COL_FIELD") {
            config.ref_col_field = v;
        }
        if let Some(v) = lookup("LANDGRID_PARALLEL") {
            config.parallel_layers = v.to_lowercase() == "true" || v == "1";
        }

        config
    }

    /// Parse a YAML document. Missing keys keep their defaults.
    pub fn from_yaml_str(s: &str) -> GridResult<Self> {
        serde_yaml::from_str(s)
            .map_err(|e| GridError::invalid_config(format!("YAML error: {}", e)))
    }

    /// Parse a JSON document. Missing keys keep their defaults.
    pub fn from_json_str(s: &str) -> GridResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| GridError::invalid_config(format!("JSON error: {}", e)))
    }

    /// Load a `.yaml`/`.yml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> GridResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            GridError::invalid_config(format!("cannot read {}: {}", path.display(), e))
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            Some("json") => Self::from_json_str(&text),
            _ => Err(GridError::invalid_config(format!(
                "unsupported config format: {}",
                path.display()
            ))),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> GridResult<()> {
        self.extent.validate()?;

        let fields = [
            ("key_field", &self.key_field),
            ("data_id_field", &self.data_id_field),
            ("ref_row_field", &self.ref_row_field),
            ("ref_col_field", &self.ref_col_field),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(GridError::invalid_config(format!(
                    "{} must not be empty",
                    name
                )));
            }
        }

        if self.ref_row_field == self.ref_col_field {
            return Err(GridError::invalid_config(
                "ref_row_field and ref_col_field must differ",
            ));
        }

        Ok(())
    }
}
