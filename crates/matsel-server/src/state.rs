use std::path::Path;
use std::sync::Arc;

use matsel_classifiers::bundle::ModelBundle;
use matsel_classifiers::error::BundleError;
use matsel_classifiers::models::Classifier;

/// Process-wide, read-only prediction state.
///
/// Built once at startup (or injected directly in tests) and cloned into
/// each request; clones share the same model and schema.
#[derive(Clone)]
pub struct AppState {
    model: Arc<dyn Classifier>,
    feature_columns: Arc<[String]>,
}

impl AppState {
    pub fn new(model: Arc<dyn Classifier>, feature_columns: Vec<String>) -> Self {
        Self {
            model,
            feature_columns: feature_columns.into(),
        }
    }

    pub fn from_bundle(bundle: ModelBundle) -> Self {
        let (model, feature_columns) = bundle.into_parts();
        Self::new(Arc::new(model), feature_columns)
    }

    /// Load the bundle at `path`; any failure here should abort startup.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BundleError> {
        let bundle = ModelBundle::load(path.as_ref())?;
        log::info!(
            "Loaded model bundle from {} ({} features)",
            path.as_ref().display(),
            bundle.feature_columns.len()
        );
        Ok(Self::from_bundle(bundle))
    }

    pub fn model(&self) -> &dyn Classifier {
        self.model.as_ref()
    }

    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }
}
