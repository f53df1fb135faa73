//! End-to-end fit/evaluate on a loaded material table.
use anyhow::{Context, Result};
use ndarray::Axis;

use crate::config::ModelConfig;
use crate::dataset::MaterialDataset;
use crate::metrics::{ClassificationReport, EvaluationMetrics};
use crate::models::{Classifier, GBDTClassifier};
use crate::split::stratified_split;

/// A fitted model and how it scored on the held-out partition.
pub struct TrainOutcome {
    pub model: GBDTClassifier,
    pub metrics: EvaluationMetrics,
    pub report: ClassificationReport,
    pub n_train: usize,
    pub n_test: usize,
}

/// Stratified split, fit on the train rows, evaluate on the test rows.
///
/// `random_state` seeds the split; the ensemble itself uses no sampling, so
/// the same table, fraction and seed always produce the same model.
pub fn train_model(
    dataset: &MaterialDataset,
    test_size: f64,
    random_state: u64,
    model_config: &ModelConfig,
) -> Result<TrainOutcome> {
    let split = stratified_split(&dataset.labels, test_size, random_state)
        .context("Failed to split training data")?;

    let x = dataset.feature_matrix_f32();
    let x_train = x.select(Axis(0), &split.train);
    let x_test = x.select(Axis(0), &split.test);
    let y_train: Vec<i32> = split.train.iter().map(|&i| dataset.labels[i]).collect();
    let y_test: Vec<i32> = split.test.iter().map(|&i| dataset.labels[i]).collect();

    log::info!(
        "Training on {} rows, evaluating on {} rows",
        y_train.len(),
        y_test.len()
    );

    let start_time = std::time::Instant::now();
    let mut model = GBDTClassifier::new(model_config.clone());
    model
        .fit(&x_train, &y_train)
        .context("Failed to fit gradient-boosted classifier")?;
    log::info!("Model fitted in {:.2?}", start_time.elapsed());

    let y_pred = model
        .predict(&x_test)
        .context("Failed to predict on test partition")?;

    let metrics = EvaluationMetrics::from_predictions(&y_test, &y_pred);
    let report = ClassificationReport::new(&y_test, &y_pred);

    Ok(TrainOutcome {
        model,
        metrics,
        report,
        n_train: y_train.len(),
        n_test: y_test.len(),
    })
}
