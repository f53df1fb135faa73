use anyhow::{Context, Result};

use matsel_classifiers::bundle::ModelBundle;
use matsel_classifiers::config::TrainConfig;
use matsel_classifiers::dataset::{feature_columns, load_material_data};
use matsel_classifiers::training::train_model;

/// Load the table, fit, print the evaluation and write the bundle.
pub fn run_training(config: &TrainConfig) -> Result<()> {
    let dataset = load_material_data(&config.data)?;
    dataset.log_summary();

    let outcome = train_model(
        &dataset,
        config.test_size,
        config.random_state,
        &config.model,
    )?;

    println!("Metrics:");
    println!("{}", outcome.metrics);
    println!("\nClassification report:\n");
    println!("{}", outcome.report);

    let bundle = ModelBundle::new(outcome.model, feature_columns());
    bundle
        .save(&config.model_out)
        .with_context(|| format!("Failed to write model bundle: {}", config.model_out))?;
    println!("\nSaved model bundle to: {}", config.model_out);

    Ok(())
}
