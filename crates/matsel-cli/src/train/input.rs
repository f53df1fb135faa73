use std::path::PathBuf;

use anyhow::Result;
use clap::ArgMatches;

use matsel_classifiers::config::{load_train_config, TrainConfig};

/// Build the training configuration: optional JSON file first, then CLI overrides.
pub fn from_arguments(matches: &ArgMatches) -> Result<TrainConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(config_path) => {
            log::info!("Using training config: {}", config_path.display());
            load_train_config(config_path)?
        }
        None => TrainConfig::default(),
    };

    if let Some(data) = matches.get_one::<String>("data") {
        config.data = data.clone();
    }
    if let Some(model_out) = matches.get_one::<String>("model_out") {
        config.model_out = model_out.clone();
    }
    if let Some(test_size) = matches.get_one::<f64>("test_size") {
        config.test_size = *test_size;
    }
    if let Some(random_state) = matches.get_one::<u64>("random_state") {
        config.random_state = *random_state;
    }

    log::debug!(
        "Effective training config:\n{}",
        serde_json::to_string_pretty(&config).unwrap_or_default()
    );
    Ok(config)
}
