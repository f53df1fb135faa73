use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::bundle::DEFAULT_BUNDLE_PATH;

/// Hyper-parameters for the gradient-boosted tree ensemble.
///
/// Defaults follow the usual gradient-boosting classifier settings
/// (100 rounds of depth-3 trees at learning rate 0.1). Row and feature
/// sub-sampling are never enabled, so fitting is deterministic.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    pub learning_rate: f32,
    pub num_boost_round: u32,
    pub max_depth: u32,
    pub min_leaf_size: usize,
    pub loss_type: LossType,
    pub training_optimization_level: u8,
    pub debug: bool,
}

impl ModelConfig {
    pub fn new(learning_rate: f32, num_boost_round: u32, max_depth: u32) -> Self {
        Self {
            learning_rate,
            num_boost_round,
            max_depth,
            ..Self::default()
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            num_boost_round: 100,
            max_depth: 3,
            min_leaf_size: 1,
            loss_type: LossType::LogLikelyhood,
            training_optimization_level: 2,
            debug: false,
        }
    }
}

/// Binary-classification losses understood by the gbdt backend.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LossType {
    #[default]
    LogLikelyhood,
}

impl LossType {
    /// Name the gbdt `Config::set_loss` expects.
    pub fn as_gbdt_str(&self) -> &'static str {
        match self {
            LossType::LogLikelyhood => "LogLikelyhood",
        }
    }
}

/// Everything a training run needs. Loaded from JSON, then overridden by CLI flags.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrainConfig {
    pub data: String,
    pub model_out: String,
    pub test_size: f64,
    pub random_state: u64,
    pub model: ModelConfig,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data: String::from("data/material.csv"),
            model_out: String::from(DEFAULT_BUNDLE_PATH),
            test_size: 0.30,
            random_state: 0,
            model: ModelConfig::default(),
        }
    }
}

/// Load a training configuration from a JSON file. Missing keys keep their defaults.
pub fn load_train_config<P: AsRef<Path>>(path: P) -> Result<TrainConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: TrainConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: TrainConfig =
            serde_json::from_str(r#"{"test_size": 0.25, "model": {"max_depth": 5}}"#).unwrap();
        assert_eq!(cfg.test_size, 0.25);
        assert_eq!(cfg.random_state, 0);
        assert_eq!(cfg.model.max_depth, 5);
        assert_eq!(cfg.model.num_boost_round, 100);
        assert_eq!(cfg.data, "data/material.csv");
    }

    #[test]
    fn defaults_match_cli_paths() {
        let cfg = TrainConfig::default();
        assert_eq!(cfg.data, "data/material.csv");
        assert_eq!(cfg.model_out, "model/material_gbc.joblib");
        assert_eq!(cfg.test_size, 0.30);
    }
}
