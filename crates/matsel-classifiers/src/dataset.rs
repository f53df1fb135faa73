//! Loading and validating the labelled material-property table.
//!
//! The table is a CSV with (at least) the six mechanical-property columns
//! named in [`FEATURE_COLUMNS`], a 0/1 suitability label and the material
//! name. Extra columns are ignored and column order does not matter; the
//! feature matrix is always assembled in `FEATURE_COLUMNS` order.
use std::collections::BTreeMap;
use std::path::Path;

use csv::StringRecord;
use ndarray::Array2;

use crate::error::DatasetError;

/// Model inputs, in the order every feature row is laid out.
pub const FEATURE_COLUMNS: [&str; 6] = ["Su", "Sy", "E", "G", "mu", "Ro"];
pub const LABEL_COLUMN: &str = "Use";
pub const MATERIAL_COLUMN: &str = "Material";

/// Ordered feature names as owned strings, as stored in a bundle.
pub fn feature_columns() -> Vec<String> {
    FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect()
}

/// One query vector of mechanical properties.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MaterialProperties {
    /// Ultimate tensile strength
    pub su: f64,
    /// Yield strength
    pub sy: f64,
    /// Elastic modulus
    pub e: f64,
    /// Shear modulus
    pub g: f64,
    /// Poisson ratio
    pub mu: f64,
    /// Density
    pub ro: f64,
}

impl MaterialProperties {
    pub fn to_row(&self) -> [f64; 6] {
        [self.su, self.sy, self.e, self.g, self.mu, self.ro]
    }
}

#[derive(Debug, Clone)]
pub struct MaterialDataset {
    /// rows x `FEATURE_COLUMNS`, exactly as parsed
    pub features: Array2<f64>,
    pub labels: Vec<i32>,
    pub materials: Vec<String>,
}

impl MaterialDataset {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Single-precision copy of the features for the tree backend.
    pub fn feature_matrix_f32(&self) -> Array2<f32> {
        self.features.mapv(|v| v as f32)
    }

    /// Row counts per label, ordered by label.
    pub fn class_counts(&self) -> BTreeMap<i32, usize> {
        let mut counts = BTreeMap::new();
        for &label in &self.labels {
            *counts.entry(label).or_insert(0) += 1;
        }
        counts
    }

    pub fn log_summary(&self) {
        let counts = self.class_counts();
        log::info!(
            "Loaded {} samples: {} suitable, {} unsuitable, {} feature columns",
            self.len(),
            counts.get(&1).copied().unwrap_or(0),
            counts.get(&0).copied().unwrap_or(0),
            self.features.ncols()
        );
    }
}

/// Read and validate the material table at `path`.
pub fn load_material_data<P: AsRef<Path>>(path: P) -> Result<MaterialDataset, DatasetError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DatasetError::MissingFile(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut missing: Vec<String> = FEATURE_COLUMNS
        .iter()
        .copied()
        .chain([LABEL_COLUMN, MATERIAL_COLUMN])
        .filter(|name| find_column(&headers, name).is_none())
        .map(String::from)
        .collect();
    if !missing.is_empty() {
        missing.sort();
        return Err(DatasetError::MissingColumns(missing));
    }

    // Presence was checked above.
    let feature_idx: Vec<usize> = FEATURE_COLUMNS
        .iter()
        .filter_map(|name| find_column(&headers, name))
        .collect();
    let label_idx = find_column(&headers, LABEL_COLUMN).unwrap_or_default();
    let material_idx = find_column(&headers, MATERIAL_COLUMN).unwrap_or_default();

    let mut values = Vec::new();
    let mut labels = Vec::new();
    let mut materials = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let row = row_idx + 1;

        for (&idx, &name) in feature_idx.iter().zip(FEATURE_COLUMNS.iter()) {
            let raw = record.get(idx).unwrap_or("");
            let value = raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| invalid(row, name, raw))?;
            values.push(value);
        }

        let raw_label = record.get(label_idx).unwrap_or("");
        labels.push(parse_label(raw_label).ok_or_else(|| invalid(row, LABEL_COLUMN, raw_label))?);
        materials.push(record.get(material_idx).unwrap_or("").to_string());
    }

    if labels.is_empty() {
        return Err(DatasetError::Empty);
    }

    let features = Array2::from_shape_vec((labels.len(), FEATURE_COLUMNS.len()), values)
        .map_err(|_| DatasetError::Empty)?;

    let dataset = MaterialDataset {
        features,
        labels,
        materials,
    };
    log::debug!("Parsed {} rows from {}", dataset.len(), path.display());
    Ok(dataset)
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn invalid(row: usize, column: &str, value: &str) -> DatasetError {
    DatasetError::InvalidValue {
        row,
        column: column.to_string(),
        value: value.to_string(),
    }
}

/// Coerce a label cell to 0/1. Integral floats and booleans are accepted.
fn parse_label(raw: &str) -> Option<i32> {
    match raw.to_ascii_lowercase().as_str() {
        "true" => return Some(1),
        "false" => return Some(0),
        _ => {}
    }
    let value = raw.parse::<f64>().ok()?;
    if value == 0.0 {
        Some(0)
    } else if value == 1.0 {
        Some(1)
    } else {
        None
    }
}
