use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::config::ModelConfig;
use crate::error::ModelError;
use crate::models::classifier_trait::Classifier;

/// Gradient Boosting Decision Tree (GBDT) classifier
#[derive(Serialize, Deserialize)]
pub struct GBDTClassifier {
    model: Option<GBDT>,
    params: ModelConfig,
    n_features: usize,
}

impl GBDTClassifier {
    pub fn new(params: ModelConfig) -> Self {
        GBDTClassifier {
            model: None,
            params,
            n_features: 0,
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Fit on `x` with 0/1 labels `y`.
    pub fn fit(&mut self, x: &Array2<f32>, y: &[i32]) -> Result<(), ModelError> {
        if x.nrows() == 0 {
            return Err(ModelError::EmptyTrainingSet);
        }
        if x.nrows() != y.len() {
            return Err(ModelError::LengthMismatch {
                rows: x.nrows(),
                labels: y.len(),
            });
        }
        if y.iter().all(|&label| label == y[0]) {
            return Err(ModelError::SingleClass(y[0]));
        }

        let feature_size = x.ncols();
        let mut config = Config::new();
        config.set_feature_size(feature_size);
        config.set_shrinkage(self.params.learning_rate);
        config.set_max_depth(self.params.max_depth);
        config.set_iterations(self.params.num_boost_round as usize);
        config.set_min_leaf_size(self.params.min_leaf_size);
        config.set_debug(self.params.debug);
        config.set_training_optimization_level(self.params.training_optimization_level);
        config.set_loss(self.params.loss_type.as_gbdt_str());
        config.set_data_sample_ratio(1.0);
        config.set_feature_sample_ratio(1.0);

        let mut gbdt = GBDT::new(&config);

        // LogLikelyhood expects +1 / -1 targets.
        let mut train_x = DataVec::with_capacity(x.nrows());
        for (row, &label) in x.rows().into_iter().zip(y) {
            let target = if label != 0 { 1.0 } else { -1.0 };
            train_x.push(Data::new_training_data(row.to_vec(), 1.0, target, None));
        }

        log::debug!(
            "Fitting GBDT on {} rows x {} features ({} rounds, depth {})",
            x.nrows(),
            feature_size,
            self.params.num_boost_round,
            self.params.max_depth
        );
        gbdt.fit(&mut train_x);

        self.model = Some(gbdt);
        self.n_features = feature_size;
        Ok(())
    }

    fn to_test_data(&self, x: &Array2<f32>) -> Result<(&GBDT, DataVec), ModelError> {
        let model = self.model.as_ref().ok_or(ModelError::NotFitted)?;
        if x.ncols() != self.n_features {
            return Err(ModelError::ShapeMismatch {
                expected: self.n_features,
                found: x.ncols(),
            });
        }
        let test_x = x
            .rows()
            .into_iter()
            .map(|row| Data::new_test_data(row.to_vec(), None))
            .collect::<DataVec>();
        Ok((model, test_x))
    }

    fn probabilities(&self, x: &Array2<f32>) -> Result<Vec<f32>, ModelError> {
        let (model, test_x) = self.to_test_data(x)?;
        Ok(model
            .predict(&test_x)
            .into_iter()
            .map(|p| p.clamp(0.0, 1.0))
            .collect())
    }
}

impl Classifier for GBDTClassifier {
    fn predict(&self, x: &Array2<f32>) -> Result<Vec<i32>, ModelError> {
        Ok(self
            .probabilities(x)?
            .into_iter()
            .map(|p| i32::from(p >= 0.5))
            .collect())
    }

    fn predict_proba(&self, x: &Array2<f32>) -> Result<Option<Vec<f32>>, ModelError> {
        self.probabilities(x).map(Some)
    }

    fn name(&self) -> &str {
        "gbdt"
    }
}
