//! Persisted model bundle: the fitted classifier plus the ordered feature
//! columns it was trained on. Inference is positional, so the column order
//! stored here is the schema every prediction request is mapped onto.
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BundleError;
use crate::models::GBDTClassifier;

/// Where the trainer writes the bundle and where `recommend` and the server look for it.
pub const DEFAULT_BUNDLE_PATH: &str = "model/material_gbc.joblib";

#[derive(Serialize)]
pub struct ModelBundle {
    pub model: GBDTClassifier,
    pub feature_columns: Vec<String>,
}

/// On-disk shape; either half may be absent in a damaged file.
#[derive(Deserialize)]
struct StoredBundle {
    model: Option<GBDTClassifier>,
    feature_columns: Option<Vec<String>>,
}

impl ModelBundle {
    pub fn new(model: GBDTClassifier, feature_columns: Vec<String>) -> Self {
        Self {
            model,
            feature_columns,
        }
    }

    /// Write the bundle to `path`, creating parent directories as needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), BundleError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        log::debug!("Wrote model bundle to {}", path.display());
        Ok(())
    }

    /// Read a bundle back, rejecting files that lack the model, the feature
    /// columns, or hold an unfitted model.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BundleError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(BundleError::MissingFile(path.to_path_buf()));
        }
        let reader = BufReader::new(File::open(path)?);
        let stored: StoredBundle = serde_json::from_reader(reader)?;

        match (stored.model, stored.feature_columns) {
            (Some(model), Some(feature_columns))
                if model.is_fitted()
                    && !feature_columns.is_empty()
                    && model.n_features() == feature_columns.len() =>
            {
                log::debug!(
                    "Loaded {} bundle with columns {:?}",
                    crate::models::Classifier::name(&model),
                    feature_columns
                );
                Ok(Self {
                    model,
                    feature_columns,
                })
            }
            _ => Err(BundleError::Invalid),
        }
    }

    pub fn into_parts(self) -> (GBDTClassifier, Vec<String>) {
        (self.model, self.feature_columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use crate::models::Classifier;
    use ndarray::Array2;

    fn fitted() -> GBDTClassifier {
        let x = Array2::from_shape_vec(
            (6, 2),
            vec![1.0, 0.0, 0.0, 1.0, 1.0, 0.1, 0.0, 0.9, 1.1, 0.0, 0.0, 1.2],
        )
        .unwrap();
        let mut model = GBDTClassifier::new(ModelConfig::new(0.1, 10, 2));
        model.fit(&x, &[1, 0, 1, 0, 1, 0]).unwrap();
        model
    }

    #[test]
    fn save_creates_parents_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/bundle.json");
        let model = fitted();
        let x = Array2::from_shape_vec((2, 2), vec![0.9, 0.05, 0.1, 1.1]).unwrap();
        let before = model.predict_proba(&x).unwrap();

        ModelBundle::new(model, vec!["a".into(), "b".into()])
            .save(&path)
            .unwrap();
        let loaded = ModelBundle::load(&path).unwrap();

        assert_eq!(loaded.feature_columns, vec!["a", "b"]);
        assert_eq!(loaded.model.predict_proba(&x).unwrap(), before);
    }

    #[test]
    fn missing_file() {
        let err = ModelBundle::load("/no/such/bundle.json").err().unwrap();
        assert!(matches!(err, BundleError::MissingFile(_)));
    }

    #[test]
    fn malformed_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.json");
        fs::write(&path, b"\x00\x01 not json").unwrap();
        assert!(matches!(
            ModelBundle::load(&path).err().unwrap(),
            BundleError::Malformed(_)
        ));
    }

    #[test]
    fn incomplete_bundle_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.json");
        fs::write(&path, br#"{"feature_columns": ["Su"]}"#).unwrap();
        let err = ModelBundle::load(&path).err().unwrap();
        assert!(matches!(err, BundleError::Invalid));
        assert_eq!(
            err.to_string(),
            "Invalid model bundle. Expected model and feature_columns."
        );

        let unfitted = GBDTClassifier::new(ModelConfig::default());
        let json = serde_json::json!({ "model": unfitted, "feature_columns": ["Su"] });
        fs::write(&path, json.to_string()).unwrap();
        assert!(matches!(
            ModelBundle::load(&path).err().unwrap(),
            BundleError::Invalid
        ));
    }
}
