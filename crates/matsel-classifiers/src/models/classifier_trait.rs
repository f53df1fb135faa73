use ndarray::Array2;

use crate::error::ModelError;

/// Inference contract shared by the trained model and anything standing in
/// for it (the prediction service only ever sees this trait).
///
/// Labels are 0 (unsuitable) or 1 (suitable).
pub trait Classifier: Send + Sync {
    /// Predict one label per row of `x`.
    fn predict(&self, x: &Array2<f32>) -> Result<Vec<i32>, ModelError>;

    /// Positive-class probability per row, or `Ok(None)` when the model has
    /// no probability estimates.
    fn predict_proba(&self, _x: &Array2<f32>) -> Result<Option<Vec<f32>>, ModelError> {
        Ok(None)
    }

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}
